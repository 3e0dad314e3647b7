//! Timeline reconstruction tests against scripted collaborators.
//!
//! Event streams mirror real encounter logs: one event per authored
//! transition, in chronological order, plus whatever noise the test
//! wants the builder to skip.

use std::cell::Cell;

use serde_json::json;

use crate::catalog::{ALEXANDER, OMEGA, PhaseCatalog};
use crate::error::{BoxError, BuildError};
use crate::event::{Event, EventBatch, EventFilter};
use crate::fight::{ActorDirectory, CachedActorDirectory, Fight};

use super::{PhaseInterval, PhaseKind, TimelineBuilder};

// ─────────────────────────────────────────────────────────────────────────
// Scripted collaborators
// ─────────────────────────────────────────────────────────────────────────

/// Fight backed by a pre-scripted, hostile-only event stream.
struct ScriptedFight {
    start: i64,
    end: i64,
    events: Vec<Event>,
    /// Max events per returned batch; `None` disables pagination
    page_size: Option<usize>,
    queries: Cell<usize>,
}

impl ScriptedFight {
    fn new(start: i64, end: i64, events: Vec<Event>) -> Self {
        Self {
            start,
            end,
            events,
            page_size: None,
            queries: Cell::new(0),
        }
    }

    fn paged(start: i64, end: i64, events: Vec<Event>, page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::new(start, end, events)
        }
    }
}

impl Fight for ScriptedFight {
    fn start_time(&self) -> i64 {
        self.start
    }

    fn end_time(&self) -> i64 {
        self.end
    }

    fn query_events(&self, filter: &EventFilter) -> Result<EventBatch, BoxError> {
        self.queries.set(self.queries.get() + 1);
        let matching: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.event_type == filter.event_type && e.timestamp >= filter.start_time)
            .cloned()
            .collect();

        Ok(match self.page_size {
            Some(size) if matching.len() > size => EventBatch {
                next_page_timestamp: Some(matching[size].timestamp),
                events: matching[..size].to_vec(),
            },
            _ => EventBatch {
                events: matching,
                next_page_timestamp: None,
            },
        })
    }
}

/// Fight whose event source always fails.
struct FailingFight;

impl Fight for FailingFight {
    fn start_time(&self) -> i64 {
        0
    }

    fn end_time(&self) -> i64 {
        1000
    }

    fn query_events(&self, _filter: &EventFilter) -> Result<EventBatch, BoxError> {
        Err("rate limited".into())
    }
}

fn targetability(timestamp: i64, source_id: i64, targetable: i64) -> Event {
    serde_json::from_value(json!({
        "type": "targetabilityupdate",
        "sourceID": source_id,
        "timestamp": timestamp,
        "targetable": targetable,
    }))
    .expect("valid event json")
}

fn cast(timestamp: i64, source_id: i64, ability_game_id: i64) -> Event {
    serde_json::from_value(json!({
        "type": "cast",
        "sourceID": source_id,
        "timestamp": timestamp,
        "abilityGameID": ability_game_id,
    }))
    .expect("valid event json")
}

fn names(timeline: &[PhaseInterval]) -> Vec<&'static str> {
    timeline.iter().map(|i| i.name).collect()
}

// ─────────────────────────────────────────────────────────────────────────
// The Omega Protocol
// ─────────────────────────────────────────────────────────────────────────

/// Report-local actor IDs 1..=5 for the Omega bodies and Omega-F.
fn omega_actors() -> CachedActorDirectory {
    [(1, 15712), (2, 15717), (3, 15720), (4, 15725), (5, 2000021)]
        .into_iter()
        .collect()
}

/// One event per Omega transition rule, in rule order.
fn omega_full_clear_events() -> Vec<Event> {
    vec![
        targetability(2_000, 1, 1),  // P1 ends, P2 starts
        targetability(3_000, 1, 0),  // Party Synergy begins
        targetability(4_000, 1, 1),  // Party Synergy ends
        targetability(5_000, 1, 0),  // P2 ends, P3 + transition start
        targetability(6_000, 2, 1),  // P3 transition ends
        targetability(7_000, 2, 1),  // P3 ends, P4 begins
        targetability(8_000, 2, 0),  // P5 transition starts
        targetability(9_000, 3, 1),  // P4 ends, P5 starts
        targetability(10_000, 3, 0), // Delta begins
        targetability(11_000, 3, 1), // Delta ends
        targetability(12_000, 3, 0), // Sigma begins
        targetability(13_000, 3, 1), // Sigma ends
        targetability(14_000, 3, 0), // Omega begins
        targetability(15_000, 3, 1), // Omega ends
        targetability(16_000, 3, 0), // P5 ends, P6 transition begins
        cast(17_000, 5, 32626),      // Blind Faith, P6 begins
        targetability(18_000, 4, 1), // P6 transition ends
    ]
}

const OMEGA_FULL_CLEAR: [&str; 13] = [
    "Omega",
    "Omega M/F",
    "Party Synergy",
    "Omega Reconfigured",
    "P3 Transition",
    "Blue Screen",
    "P5 Transition",
    "Run: Dynamis",
    "Run: ****mi* (Delta)",
    "Run: ****mi* (Sigma)",
    "Run: ****mi* (Omega)",
    "P6 Transition",
    "Alpha Omega",
];

#[test]
fn omega_full_clear_yields_all_phases_in_order() {
    let fight = ScriptedFight::new(1_000, 20_000, omega_full_clear_events());
    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &omega_actors())
        .expect("build succeeds");

    assert_eq!(timeline.len(), OMEGA.total_phase_count());
    assert_eq!(names(&timeline), OMEGA_FULL_CLEAR);
    assert_eq!(timeline[0].start, fight.start_time());
    assert_eq!(timeline[0].duration(), 1_000);
    // The kill ends with Alpha Omega still open; its end is synthesized
    assert_eq!(timeline.last().expect("non-empty").end, fight.end_time());
    assert_eq!(fight.duration(), 19_000);
}

#[test]
fn phases_sort_before_intermissions_at_equal_start() {
    let fight = ScriptedFight::new(1_000, 20_000, omega_full_clear_events());
    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &omega_actors())
        .expect("build succeeds");

    // One event fires PhaseEnd + PhaseStart + IntermissionStart at t=5000:
    // the phase and intermission share a start, and the phase lists first.
    let reconfigured = &timeline[3];
    let transition = &timeline[4];
    assert_eq!(reconfigured.name, "Omega Reconfigured");
    assert_eq!(transition.name, "P3 Transition");
    assert_eq!(reconfigured.start, 5_000);
    assert_eq!(transition.start, 5_000);
    assert_eq!(reconfigured.kind, PhaseKind::Phase);
    assert_eq!(transition.kind, PhaseKind::Intermission);
}

#[test]
fn same_kind_intervals_never_overlap() {
    let fight = ScriptedFight::new(1_000, 20_000, omega_full_clear_events());
    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &omega_actors())
        .expect("build succeeds");

    for kind in [PhaseKind::Phase, PhaseKind::Intermission] {
        let of_kind: Vec<_> = timeline.iter().filter(|i| i.kind == kind).collect();
        for pair in of_kind.windows(2) {
            assert!(
                pair[0].end <= pair[1].start,
                "{kind} intervals overlap: {pair:?}"
            );
        }
    }
    for interval in &timeline {
        assert!(interval.start <= interval.end, "inverted interval: {interval:?}");
    }
}

#[test]
fn mid_fight_wipe_synthesizes_trailing_phase() {
    // Wipe during Blue Screen: the log stops after P4 begins at t=7000
    let events: Vec<Event> = omega_full_clear_events()
        .into_iter()
        .filter(|e| e.timestamp <= 7_000)
        .collect();
    let fight = ScriptedFight::new(1_000, 7_500, events);
    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &omega_actors())
        .expect("build succeeds");

    assert_eq!(
        names(&timeline),
        [
            "Omega",
            "Omega M/F",
            "Party Synergy",
            "Omega Reconfigured",
            "P3 Transition",
            "Blue Screen",
        ]
    );
    let tail = timeline.last().expect("non-empty");
    assert_eq!(tail.kind, PhaseKind::Phase);
    assert_eq!(tail.start, 7_000);
    assert_eq!(tail.end, fight.end_time());
}

#[test]
fn phase_one_wipe_yields_single_interval() {
    let fight = ScriptedFight::new(1_000, 5_000, Vec::new());
    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &omega_actors())
        .expect("build succeeds");

    assert_eq!(
        timeline,
        [PhaseInterval {
            kind: PhaseKind::Phase,
            name: "Omega",
            start: 1_000,
            end: 5_000,
        }]
    );
}

#[test]
fn pagination_is_merged_transparently() {
    let unpaged = ScriptedFight::new(1_000, 20_000, omega_full_clear_events());
    let paged = ScriptedFight::paged(1_000, 20_000, omega_full_clear_events(), 1);
    let builder = TimelineBuilder::new(&OMEGA);
    let actors = omega_actors();

    let from_unpaged = builder.build(&unpaged, &actors).expect("build succeeds");
    let from_paged = builder.build(&paged, &actors).expect("build succeeds");

    assert_eq!(from_paged, from_unpaged);
    assert!(paged.queries.get() > unpaged.queries.get());
}

#[test]
fn repeated_builds_are_idempotent() {
    let fight = ScriptedFight::new(1_000, 20_000, omega_full_clear_events());
    let builder = TimelineBuilder::new(&OMEGA);
    let actors = omega_actors();

    let first = builder.build(&fight, &actors).expect("build succeeds");
    let second = builder.build(&fight, &actors).expect("build succeeds");
    assert_eq!(first, second);
}

#[test]
fn unresolved_actor_truncates_timeline_consistently() {
    // Local ID 2 (game ID 15717) missing from the directory: every rule
    // sourced by it is skipped and nothing after can fire.
    let actors: CachedActorDirectory = [(1, 15712), (3, 15720), (4, 15725), (5, 2000021)]
        .into_iter()
        .collect();
    let fight = ScriptedFight::new(1_000, 20_000, omega_full_clear_events());
    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &actors)
        .expect("build succeeds");

    // Both the open phase and the open intermission are clamped to the
    // fight end; the result is short but internally consistent.
    assert_eq!(
        names(&timeline),
        [
            "Omega",
            "Omega M/F",
            "Party Synergy",
            "Omega Reconfigured",
            "P3 Transition",
        ]
    );
    assert!(timeline.len() < OMEGA.total_phase_count());
    assert_eq!(timeline[3].end, fight.end_time());
    assert_eq!(timeline[4].end, fight.end_time());
}

#[test]
fn non_boss_noise_is_skipped() {
    // A hostile add (local ID 9) flickering targetability between the
    // real transitions must not fire any rule.
    let mut actors = omega_actors();
    actors.insert(9, 4444);
    let mut events = omega_full_clear_events();
    events.insert(1, targetability(2_500, 9, 0));
    events.insert(2, targetability(2_600, 9, 1));
    let fight = ScriptedFight::new(1_000, 20_000, events);

    let timeline = TimelineBuilder::new(&OMEGA)
        .build(&fight, &actors)
        .expect("build succeeds");
    assert_eq!(names(&timeline), OMEGA_FULL_CLEAR);
}

// ─────────────────────────────────────────────────────────────────────────
// The Epic of Alexander
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn alexander_full_clear_yields_all_phases_in_order() {
    let actors: CachedActorDirectory = [(1, 2000032), (2, 11340), (3, 11347), (4, 11349)]
        .into_iter()
        .collect();
    let events = vec![
        cast(2_000, 1, 18480),       // P1 ends, Limit Cut starts
        targetability(3_000, 2, 1),  // Limit Cut ends, P2 starts
        targetability(4_000, 2, 0),  // P2 ends, Temporal Stasis starts
        targetability(5_000, 3, 1),  // Temporal Stasis ends, P3 begins
        targetability(6_000, 3, 0),  // Inception begins
        targetability(7_000, 3, 1),  // Inception ends
        targetability(8_000, 3, 0),  // Wormhole begins
        targetability(9_000, 3, 1),  // Wormhole ends
        targetability(10_000, 3, 0), // P3 ends, P4 transition begins
        targetability(11_000, 4, 1), // Transition ends, P4 begins
        targetability(12_000, 4, 0), // Fate Alpha begins
        targetability(13_000, 4, 1), // Fate Alpha ends
        targetability(14_000, 4, 0), // Fate Beta begins
        targetability(15_000, 4, 1), // Fate Beta ends
    ];
    let fight = ScriptedFight::new(1_000, 16_000, events);

    let timeline = TimelineBuilder::new(&ALEXANDER)
        .build(&fight, &actors)
        .expect("build succeeds");

    assert_eq!(timeline.len(), ALEXANDER.total_phase_count());
    assert_eq!(
        names(&timeline),
        [
            "Living Liquid",
            "Limit Cut",
            "Brute Justice and Cruise Chaser",
            "Temporal Stasis",
            "Alexander Prime",
            "Inception Formation",
            "Wormhole Formation",
            "P4 Transition",
            "Perfect Alexander",
            "Fate Calibration Alpha",
            "Fate Calibration Beta",
        ]
    );
    assert_eq!(timeline[0].start, fight.start_time());
    // The final phase outlives the final intermission; its synthesized
    // end is the fight end even though it is not last in the list.
    let last_phase = timeline
        .iter()
        .filter(|i| i.kind == PhaseKind::Phase)
        .next_back()
        .expect("has phases");
    assert_eq!(last_phase.name, "Perfect Alexander");
    assert_eq!(last_phase.end, fight.end_time());
}

// ─────────────────────────────────────────────────────────────────────────
// Error propagation
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn event_source_failures_propagate_unmodified() {
    let err = TimelineBuilder::new(&OMEGA)
        .build(&FailingFight, &omega_actors())
        .expect_err("query failure must propagate");
    match err {
        BuildError::EventSource(source) => assert_eq!(source.to_string(), "rate limited"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_catalog_fails_before_any_query() {
    use crate::catalog::TransitionKind::PhaseEnd;
    use crate::catalog::{EventMatch, TransitionRule};
    use crate::event::EventType;

    static BAD: PhaseCatalog = PhaseCatalog {
        encounter_id: 9000,
        phases: &[],
        intermissions: &[],
        rules: &[TransitionRule {
            description: "ends a phase that has no name",
            source_game_id: 1,
            event_match: EventMatch {
                event_type: EventType::Cast,
                fields: &[],
            },
            transitions: &[PhaseEnd],
        }],
    };

    let fight = ScriptedFight::new(0, 1_000, Vec::new());
    let err = TimelineBuilder::new(&BAD)
        .build(&fight, &omega_actors())
        .expect_err("authoring mistakes abort immediately");
    assert!(matches!(err, BuildError::Catalog(_)));
    assert_eq!(fight.queries.get(), 0);
}
