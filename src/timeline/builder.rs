//! Timeline reconstruction from a fight's event stream.
//!
//! Walks a catalog's transition rules front to back, querying the event
//! log one event-type window at a time and emitting an interval each
//! time a phase or intermission ends. Querying narrow windows as the
//! walk progresses is much faster than fetching the full event log up
//! front: consecutive rules sharing an event type are resolved from one
//! filtered scan.

use tracing::{debug, warn};

use crate::catalog::{PhaseCatalog, TransitionKind, TransitionRule};
use crate::error::BuildError;
use crate::event::{Event, EventFilter, Hostility};
use crate::fight::{ActorDirectory, Fight};

use super::{PhaseInterval, PhaseKind};

/// Reconstructs the phase/intermission timeline of one fight.
///
/// Each `build` call owns an independent walk state, so concurrent
/// builds against different fights need no locking.
pub struct TimelineBuilder<'c> {
    catalog: &'c PhaseCatalog,
}

/// Scan progress after applying an event to the rule cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// The front rule filters the same event type; keep scanning the
    /// current batch.
    AwaitingSameTypeEvent,
    /// The front rule filters a different event type; a fresh query is
    /// needed.
    NeedNewQuery,
    /// Every rule has fired.
    Done,
}

impl<'c> TimelineBuilder<'c> {
    pub fn new(catalog: &'c PhaseCatalog) -> Self {
        Self { catalog }
    }

    /// Build the ordered, non-overlapping timeline for `fight`.
    ///
    /// A rule whose event never arrives (typically a wipe, sometimes an
    /// unresolvable actor) leaves the remaining rules unfired: the
    /// result is then a shorter-than-`total_phase_count()` but still
    /// internally consistent timeline, and a warning names the rule
    /// that never fired. Must not be called for zero-duration fights.
    pub fn build(
        &self,
        fight: &dyn Fight,
        actors: &dyn ActorDirectory,
    ) -> Result<Vec<PhaseInterval>, BuildError> {
        self.catalog.validate()?;

        let mut state = BuildState::new(self.catalog, fight.start_time());
        let mut scan = ScanState::NeedNewQuery;

        while scan == ScanState::NeedNewQuery {
            let Some(rule) = state.front_rule() else {
                break;
            };
            let events = fetch_window(fight, rule, state.query_start())?;

            scan = ScanState::AwaitingSameTypeEvent;
            for event in &events {
                scan = state.apply(event, actors);
                if scan != ScanState::AwaitingSameTypeEvent {
                    break;
                }
            }

            if scan == ScanState::AwaitingSameTypeEvent {
                // Window exhausted with the front rule still unfired; the
                // closing event never arrived and no later rule can fire.
                break;
            }
        }

        if let Some(rule) = state.front_rule() {
            warn!(
                encounter_id = self.catalog.encounter_id,
                rule = rule.description,
                remaining = state.remaining_rules(),
                "transition rule never fired; timeline will be shorter than total_phase_count()"
            );
        }

        Ok(state.finish(fight.end_time()))
    }
}

/// Fetch one event-type window, merging continuation pages transparently.
fn fetch_window(
    fight: &dyn Fight,
    rule: &TransitionRule,
    start_time: i64,
) -> Result<Vec<Event>, BuildError> {
    let mut filter = EventFilter {
        event_type: rule.event_match.event_type,
        hostility: Hostility::Enemies,
        start_time,
    };

    let mut merged = Vec::new();
    loop {
        let mut batch = fight.query_events(&filter).map_err(BuildError::EventSource)?;
        merged.append(&mut batch.events);
        match batch.next_page_timestamp {
            Some(next) => filter.start_time = next,
            None => break,
        }
    }
    Ok(merged)
}

/// Mutable walk state for a single build call.
///
/// At most one phase and one intermission are open at any point; the
/// `*_start` fields hold the provisional open timestamps until the
/// matching end transition fires.
struct BuildState<'c> {
    catalog: &'c PhaseCatalog,
    /// FIFO cursor into `catalog.rules`; rules before it have fired
    next_rule: usize,
    phase_idx: usize,
    intermission_idx: usize,
    phase_start: i64,
    phase_end: i64,
    intermission_start: i64,
    intermission_end: i64,
    intervals: Vec<PhaseInterval>,
}

impl<'c> BuildState<'c> {
    fn new(catalog: &'c PhaseCatalog, fight_start: i64) -> Self {
        Self {
            catalog,
            next_rule: 0,
            phase_idx: 0,
            intermission_idx: 0,
            phase_start: fight_start,
            phase_end: 0,
            intermission_start: 0,
            intermission_end: 0,
            intervals: Vec::with_capacity(catalog.total_phase_count()),
        }
    }

    fn front_rule(&self) -> Option<&'c TransitionRule> {
        self.catalog.rules.get(self.next_rule)
    }

    fn remaining_rules(&self) -> usize {
        self.catalog.rules.len() - self.next_rule
    }

    /// The next query window opens at the most recent open marker.
    fn query_start(&self) -> i64 {
        self.phase_start.max(self.intermission_start)
    }

    /// Try the front rule against one event, firing its transitions on
    /// a match and advancing the cursor.
    fn apply(&mut self, event: &Event, actors: &dyn ActorDirectory) -> ScanState {
        let Some(rule) = self.front_rule() else {
            return ScanState::Done;
        };

        let Some(game_id) = actors.game_id_of(event.source_id) else {
            debug!(
                source_id = event.source_id,
                timestamp = event.timestamp,
                "skipping event from unresolved actor"
            );
            return ScanState::AwaitingSameTypeEvent;
        };
        if game_id != rule.source_game_id {
            return ScanState::AwaitingSameTypeEvent;
        }
        if !rule.event_match.matches(event) {
            return ScanState::AwaitingSameTypeEvent;
        }

        for kind in rule.transitions {
            self.fire(*kind, event.timestamp);
        }

        let fired_type = rule.event_match.event_type;
        self.next_rule += 1;
        match self.front_rule() {
            None => ScanState::Done,
            Some(next) if next.event_match.event_type != fired_type => ScanState::NeedNewQuery,
            Some(_) => ScanState::AwaitingSameTypeEvent,
        }
    }

    /// Apply one transition kind. Intervals are recorded when they end;
    /// `validate()` guarantees the name indexing stays in bounds.
    fn fire(&mut self, kind: TransitionKind, timestamp: i64) {
        match kind {
            TransitionKind::PhaseStart => self.phase_start = timestamp,
            TransitionKind::IntermissionStart => self.intermission_start = timestamp,
            TransitionKind::PhaseEnd => {
                self.phase_end = timestamp;
                self.intervals.push(PhaseInterval {
                    kind: PhaseKind::Phase,
                    name: self.catalog.phases[self.phase_idx],
                    start: self.phase_start,
                    end: self.phase_end,
                });
                self.phase_idx += 1;
            }
            TransitionKind::IntermissionEnd => {
                self.intermission_end = timestamp;
                self.intervals.push(PhaseInterval {
                    kind: PhaseKind::Intermission,
                    name: self.catalog.intermissions[self.intermission_idx],
                    start: self.intermission_start,
                    end: self.intermission_end,
                });
                self.intermission_idx += 1;
            }
        }
    }

    /// Close anything still open at the fight's end and produce the
    /// sorted timeline.
    fn finish(mut self, fight_end: i64) -> Vec<PhaseInterval> {
        // An open marker at or past its end marker means the closing
        // event never arrived (typically a wipe); clamp to the fight end.
        // The zero-sum check keeps a never-opened intermission from
        // producing a spurious trailing interval.
        if self.phase_start >= self.phase_end && self.phase_start + self.phase_end != 0 {
            if let Some(&name) = self.catalog.phases.get(self.phase_idx) {
                self.intervals.push(PhaseInterval {
                    kind: PhaseKind::Phase,
                    name,
                    start: self.phase_start,
                    end: fight_end,
                });
            }
        }
        if self.intermission_start >= self.intermission_end
            && self.intermission_start + self.intermission_end != 0
        {
            if let Some(&name) = self.catalog.intermissions.get(self.intermission_idx) {
                self.intervals.push(PhaseInterval {
                    kind: PhaseKind::Intermission,
                    name,
                    start: self.intermission_start,
                    end: fight_end,
                });
            }
        }

        // Phases outrank intermissions at equal start times.
        self.intervals.sort_by_key(|interval| (interval.start, interval.kind));
        self.intervals
    }
}
