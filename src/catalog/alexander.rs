//! The Epic of Alexander (Ultimate) phase data, encounter 1062.

use super::{EventMatch, FieldValue, PhaseCatalog, TransitionRule};
use super::TransitionKind::{IntermissionEnd, IntermissionStart, PhaseEnd, PhaseStart};
use crate::event::EventType;

const TARGETABLE: EventMatch = EventMatch {
    event_type: EventType::TargetabilityUpdate,
    fields: &[("targetable", FieldValue::Int(1))],
};

const UNTARGETABLE: EventMatch = EventMatch {
    event_type: EventType::TargetabilityUpdate,
    fields: &[("targetable", FieldValue::Int(0))],
};

pub static ALEXANDER: PhaseCatalog = PhaseCatalog {
    encounter_id: 1062,

    phases: &[
        "Living Liquid",
        "Brute Justice and Cruise Chaser",
        "Alexander Prime",
        "Perfect Alexander",
    ],

    intermissions: &[
        "Limit Cut",
        "Temporal Stasis",
        "Inception Formation",
        "Wormhole Formation",
        "P4 Transition",
        "Fate Calibration Alpha",
        "Fate Calibration Beta",
    ],

    rules: &[
        // ─────────────────────────────────────────────────────────────────
        // Limit Cut
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P1 ends, Limit Cut starts",
            source_game_id: 2000032,
            event_match: EventMatch {
                event_type: EventType::Cast,
                fields: &[("abilityGameID", FieldValue::Int(18480))],
            },
            transitions: &[PhaseEnd, IntermissionStart],
        },
        // ─────────────────────────────────────────────────────────────────
        // P2
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "Limit Cut ends, P2 starts",
            source_game_id: 11340,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd, PhaseStart],
        },
        // ─────────────────────────────────────────────────────────────────
        // Temporal Stasis
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P2 ends, Temporal Stasis starts",
            source_game_id: 11340,
            event_match: UNTARGETABLE,
            transitions: &[PhaseEnd, IntermissionStart],
        },
        TransitionRule {
            description: "Temporal Stasis ends, P3 begins",
            source_game_id: 11347,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd, PhaseStart],
        },
        // ─────────────────────────────────────────────────────────────────
        // Inception
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "Inception Formation begins",
            source_game_id: 11347,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "Inception Formation ends",
            source_game_id: 11347,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        // ─────────────────────────────────────────────────────────────────
        // Wormhole
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "Wormhole Formation begins",
            source_game_id: 11347,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "Wormhole Formation ends",
            source_game_id: 11347,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        // ─────────────────────────────────────────────────────────────────
        // P4 transition
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P3 ends, P4 transition begins",
            source_game_id: 11347,
            event_match: UNTARGETABLE,
            transitions: &[PhaseEnd, IntermissionStart],
        },
        // ─────────────────────────────────────────────────────────────────
        // P4
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "Transition ends, P4 begins",
            source_game_id: 11349,
            event_match: TARGETABLE,
            transitions: &[PhaseStart, IntermissionEnd],
        },
        // ─────────────────────────────────────────────────────────────────
        // Fate Calibration
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "Fate Calibration Alpha begins",
            source_game_id: 11349,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "Fate Calibration Alpha ends",
            source_game_id: 11349,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        TransitionRule {
            description: "Fate Calibration Beta begins",
            source_game_id: 11349,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "Fate Calibration Beta ends",
            source_game_id: 11349,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
    ],
};
