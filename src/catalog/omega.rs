//! The Omega Protocol (Ultimate) phase data, encounter 1068.
//!
//! Most boundaries are marked by the active body becoming targetable or
//! untargetable; P6 starts on the Blind Faith cast instead, since
//! Alpha Omega only becomes targetable after the transition cutscene.

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

pub static OMEGA: PhaseCatalog = PhaseCatalog {
    encounter_id: 1068,

    phases: &[
        "Omega",
        "Omega M/F",
        "Omega Reconfigured",
        "Blue Screen",
        "Run: Dynamis",
        "Alpha Omega",
    ],

    intermissions: &[
        "Party Synergy",
        "P3 Transition",
        "P5 Transition",
        "Run: ****mi* (Delta)",
        "Run: ****mi* (Sigma)",
        "Run: ****mi* (Omega)",
        "P6 Transition",
    ],

    rules: &[
        // ─────────────────────────────────────────────────────────────────
        // P2
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P1 ends and P2 starts",
            source_game_id: 15712,
            event_match: TARGETABLE,
            transitions: &[PhaseEnd, PhaseStart],
        },
        TransitionRule {
            description: "P2 - Party Synergy mechanic begins",
            source_game_id: 15712,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "P2 - Party Synergy mechanic ends",
            source_game_id: 15712,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        // ─────────────────────────────────────────────────────────────────
        // P3
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P2 ends, P3 starts with the transition mechanic",
            source_game_id: 15712,
            event_match: UNTARGETABLE,
            transitions: &[PhaseEnd, PhaseStart, IntermissionStart],
        },
        TransitionRule {
            description: "P3 transition ends, Omega becomes targetable",
            source_game_id: 15717,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        // ─────────────────────────────────────────────────────────────────
        // P4
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P3 ends and P4 begins as Omega becomes targetable again",
            source_game_id: 15717,
            event_match: TARGETABLE,
            transitions: &[PhaseEnd, PhaseStart],
        },
        // ─────────────────────────────────────────────────────────────────
        // P5
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P5 transition starts",
            source_game_id: 15717,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "P4 & P5 transition end, P5 starts",
            source_game_id: 15720,
            event_match: TARGETABLE,
            transitions: &[PhaseEnd, IntermissionEnd, PhaseStart],
        },
        // ─────────────────────────────────────────────────────────────────
        // Run: Dynamis
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P5 - Run: ****mi* (Delta) begins",
            source_game_id: 15720,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "P5 - Run: ****mi* (Delta) ends",
            source_game_id: 15720,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        TransitionRule {
            description: "P5 - Run: ****mi* (Sigma) begins",
            source_game_id: 15720,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "P5 - Run: ****mi* (Sigma) ends",
            source_game_id: 15720,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        TransitionRule {
            description: "P5 - Run: ****mi* (Omega) begins",
            source_game_id: 15720,
            event_match: UNTARGETABLE,
            transitions: &[IntermissionStart],
        },
        TransitionRule {
            description: "P5 - Run: ****mi* (Omega) ends",
            source_game_id: 15720,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
        // ─────────────────────────────────────────────────────────────────
        // P6
        // ─────────────────────────────────────────────────────────────────
        TransitionRule {
            description: "P5 ends and P6 transition begins",
            source_game_id: 15720,
            event_match: UNTARGETABLE,
            transitions: &[PhaseEnd, IntermissionStart],
        },
        TransitionRule {
            description: "P6 begins with Omega-F casting Blind Faith",
            source_game_id: 2000021,
            event_match: EventMatch {
                event_type: EventType::Cast,
                fields: &[("abilityGameID", FieldValue::Int(32626))],
            },
            transitions: &[PhaseStart],
        },
        TransitionRule {
            description: "P6 transition ends",
            source_game_id: 15725,
            event_match: TARGETABLE,
            transitions: &[IntermissionEnd],
        },
    ],
};
