//! Collaborator contracts consumed by the timeline builder.
//!
//! The builder never talks to the network itself; it sees one fight
//! through [`Fight`] and resolves report-local actor IDs through
//! [`ActorDirectory`]. Both are implemented by the surrounding client
//! library (or by scripted fakes in tests).

use hashbrown::HashMap;

use crate::error::BoxError;
use crate::event::{EventBatch, EventFilter};

/// One attempt at a boss encounter within a report.
///
/// `query_events` must return events ascending by timestamp. Errors are
/// propagated to the build caller unmodified; the builder performs no
/// retries. Callers needing cancellation check their token inside
/// `query_events` before issuing the request.
pub trait Fight {
    /// Fight start, ms relative to the report start
    fn start_time(&self) -> i64;

    /// Fight end, ms relative to the report start
    fn end_time(&self) -> i64;

    fn duration(&self) -> i64 {
        self.end_time() - self.start_time()
    }

    /// Query one window of this fight's event log.
    fn query_events(&self, filter: &EventFilter) -> Result<EventBatch, BoxError>;
}

/// Maps report-local actor IDs to stable cross-report game IDs.
pub trait ActorDirectory {
    /// `None` when the actor cannot be resolved; the builder skips such
    /// events.
    fn game_id_of(&self, local_actor_id: i64) -> Option<i64>;
}

/// [`ActorDirectory`] backed by a map built once from the report's
/// actor list, so the builder never re-queries actor identities.
#[derive(Debug, Clone, Default)]
pub struct CachedActorDirectory {
    game_ids: HashMap<i64, i64>,
}

impl CachedActorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, local_actor_id: i64, game_id: i64) {
        self.game_ids.insert(local_actor_id, game_id);
    }

    pub fn len(&self) -> usize {
        self.game_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.game_ids.is_empty()
    }
}

impl FromIterator<(i64, i64)> for CachedActorDirectory {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self {
            game_ids: iter.into_iter().collect(),
        }
    }
}

impl ActorDirectory for CachedActorDirectory {
    fn game_id_of(&self, local_actor_id: i64) -> Option<i64> {
        self.game_ids.get(&local_actor_id).copied()
    }
}
