//! Wire event model for the remote combat-log API.
//!
//! Events arrive as JSON objects with a type tag, a report-local source
//! actor ID and a millisecond timestamp relative to the report start.
//! Everything else is a type-specific payload kept as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event type tags of the remote API's event log.
///
/// The wire representation is the lowercase tag (`"cast"`,
/// `"targetabilityupdate"`, ...), which is also what event query filter
/// expressions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    CombatantInfo,
    BeginCast,
    Cast,
    Damage,
    CalculatedDamage,
    Heal,
    CalculatedHeal,
    Absorbed,
    ApplyBuff,
    ApplyBuffStack,
    RefreshBuff,
    RemoveBuff,
    RemoveBuffStack,
    ApplyDebuff,
    RefreshDebuff,
    RemoveDebuff,
    TargetabilityUpdate,
    LimitBreakUpdate,
    EncounterEnd,
}

impl EventType {
    /// The wire tag for this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::CombatantInfo => "combatantinfo",
            EventType::BeginCast => "begincast",
            EventType::Cast => "cast",
            EventType::Damage => "damage",
            EventType::CalculatedDamage => "calculateddamage",
            EventType::Heal => "heal",
            EventType::CalculatedHeal => "calculatedheal",
            EventType::Absorbed => "absorbed",
            EventType::ApplyBuff => "applybuff",
            EventType::ApplyBuffStack => "applybuffstack",
            EventType::RefreshBuff => "refreshbuff",
            EventType::RemoveBuff => "removebuff",
            EventType::RemoveBuffStack => "removebuffstack",
            EventType::ApplyDebuff => "applydebuff",
            EventType::RefreshDebuff => "refreshdebuff",
            EventType::RemoveDebuff => "removedebuff",
            EventType::TargetabilityUpdate => "targetabilityupdate",
            EventType::LimitBreakUpdate => "limitbreakupdate",
            EventType::EncounterEnd => "encounterend",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hostility classification of an event's source actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hostility {
    Friendlies,
    Enemies,
}

impl Hostility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hostility::Friendlies => "Friendlies",
            Hostility::Enemies => "Enemies",
        }
    }
}

/// One event from a fight's log.
///
/// Deserializes directly from a remote API event object; fields beyond
/// the common three are kept in `fields` for structural matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Report-local actor ID of the event source
    #[serde(rename = "sourceID")]
    pub source_id: i64,
    /// Milliseconds relative to the report start
    pub timestamp: i64,
    /// Type-specific payload (e.g. `targetable`, `abilityGameID`)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    /// Look up a type-specific payload field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Filter for one event query issued by the timeline builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFilter {
    pub event_type: EventType,
    pub hostility: Hostility,
    /// Inclusive lower bound, ms relative to the report start
    pub start_time: i64,
}

/// One page of an event query result.
///
/// Events are ordered ascending by timestamp. A `next_page_timestamp`
/// means the window was truncated; re-issue the query from that
/// timestamp to continue.
#[derive(Debug, Clone, Default)]
pub struct EventBatch {
    pub events: Vec<Event>,
    pub next_page_timestamp: Option<i64>,
}
