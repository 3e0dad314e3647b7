//! Derived phase timeline model.
//!
//! The remote API does not expose phase timings; [`TimelineBuilder`]
//! reconstructs them from the event log and emits [`PhaseInterval`]s.

pub mod builder;

#[cfg(test)]
mod builder_tests;

pub use builder::TimelineBuilder;

use std::fmt;

use serde::Serialize;

/// Whether an interval is a combat phase or an intermission.
///
/// Variant order encodes the sort tie-break: at equal start times a
/// phase is listed before an intermission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PhaseKind {
    Phase,
    Intermission,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Phase => "phase",
            PhaseKind::Intermission => "intermission",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named segment of a fight's reconstructed timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseInterval {
    pub kind: PhaseKind,
    pub name: &'static str,
    /// Milliseconds relative to the report start
    pub start: i64,
    pub end: i64,
}

impl PhaseInterval {
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}
