//! Hand-authored phase transition catalogs.
//!
//! A catalog describes, for one encounter, which log events mark
//! phase/intermission boundaries. Catalogs are static data: supporting
//! a new encounter means authoring a new module and registering it
//! here, never touching the builder.

mod alexander;
mod omega;


pub use alexander::ALEXANDER;
pub use omega::OMEGA;

use phf::phf_map;
use serde_json::Value;

use crate::error::CatalogError;
use crate::event::{Event, EventType};
use crate::timeline::PhaseKind;

// ═══════════════════════════════════════════════════════════════════════════
// Transition Rules
// ═══════════════════════════════════════════════════════════════════════════

/// Boundary effect fired when a rule's event occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    PhaseStart,
    PhaseEnd,
    IntermissionStart,
    IntermissionEnd,
}

/// Expected value of one event payload field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Bool(bool),
    Str(&'static str),
}

impl FieldValue {
    /// Structural comparison against a raw JSON payload value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldValue::Int(expected) => value.as_i64() == Some(*expected),
            FieldValue::Bool(expected) => value.as_bool() == Some(*expected),
            FieldValue::Str(expected) => value.as_str() == Some(*expected),
        }
    }
}

/// Subset pattern over an event: its type plus any payload fields that
/// must hold the given values.
#[derive(Debug, Clone, Copy)]
pub struct EventMatch {
    pub event_type: EventType,
    pub fields: &'static [(&'static str, FieldValue)],
}

impl EventMatch {
    /// True when this pattern is a field/value subset of `event`.
    pub fn matches(&self, event: &Event) -> bool {
        if event.event_type != self.event_type {
            return false;
        }
        self.fields
            .iter()
            .all(|(name, expected)| event.field(name).is_some_and(|v| expected.matches(v)))
    }
}

/// Maps one log event to one or more phase boundary effects.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    /// Diagnostic only; keeps long rule lists readable and names the
    /// rule in warnings.
    pub description: &'static str,

    /// Game ID of the actor that sources the transition event
    pub source_game_id: i64,

    pub event_match: EventMatch,

    /// Fired in listed order against the one matched event
    pub transitions: &'static [TransitionKind],
}

// ═══════════════════════════════════════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════════════════════════════════════

/// Static phase data for one encounter.
///
/// Rule order encodes the expected temporal order of transitions; the
/// builder consumes the list strictly front to back.
#[derive(Debug, Clone, Copy)]
pub struct PhaseCatalog {
    pub encounter_id: u32,

    /// Ordered names of all phases
    pub phases: &'static [&'static str],

    /// Ordered names of all intermissions
    pub intermissions: &'static [&'static str],

    /// Ordered transition rules
    pub rules: &'static [TransitionRule],
}

impl PhaseCatalog {
    /// Total segment count of a full clear, intermissions included.
    /// Callers compare this against a built timeline's length to detect
    /// incomplete reconstructions.
    pub fn total_phase_count(&self) -> usize {
        self.phases.len() + self.intermissions.len()
    }

    /// Walk the rules and check that every end transition lands inside
    /// the declared name lists. Authoring mistakes fail here, before
    /// any event query runs.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut phase_idx = 0usize;
        let mut intermission_idx = 0usize;
        for rule in self.rules {
            for kind in rule.transitions {
                match kind {
                    TransitionKind::PhaseEnd => {
                        if phase_idx >= self.phases.len() {
                            return Err(CatalogError::RuleIndexOutOfRange {
                                encounter_id: self.encounter_id,
                                rule: rule.description,
                                kind: PhaseKind::Phase,
                                index: phase_idx,
                                declared: self.phases.len(),
                            });
                        }
                        phase_idx += 1;
                    }
                    TransitionKind::IntermissionEnd => {
                        if intermission_idx >= self.intermissions.len() {
                            return Err(CatalogError::RuleIndexOutOfRange {
                                encounter_id: self.encounter_id,
                                rule: rule.description,
                                kind: PhaseKind::Intermission,
                                index: intermission_idx,
                                declared: self.intermissions.len(),
                            });
                        }
                        intermission_idx += 1;
                    }
                    TransitionKind::PhaseStart | TransitionKind::IntermissionStart => {}
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════

/// Supported multi-phase encounters, keyed by encounter ID.
static PHASE_CATALOGS: phf::Map<u32, &'static PhaseCatalog> = phf_map! {
    1068u32 => &OMEGA,
    1062u32 => &ALEXANDER,
};

/// Look up the phase catalog for an encounter, if one is authored.
pub fn catalog_for_encounter(encounter_id: u32) -> Option<&'static PhaseCatalog> {
    PHASE_CATALOGS.get(&encounter_id).copied()
}

/// Whether phase reconstruction is supported for an encounter.
pub fn has_phase_data(encounter_id: u32) -> bool {
    PHASE_CATALOGS.contains_key(&encounter_id)
}

/// All authored catalogs, in no particular order.
pub fn all_catalogs() -> impl Iterator<Item = &'static PhaseCatalog> {
    PHASE_CATALOGS.values().copied()
}
