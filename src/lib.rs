pub mod catalog;
pub mod error;
pub mod event;
pub mod fight;
pub mod timeline;

// Re-exports for convenience
pub use catalog::{
    EventMatch, FieldValue, PhaseCatalog, TransitionKind, TransitionRule, all_catalogs,
    catalog_for_encounter, has_phase_data,
};
pub use error::{BoxError, BuildError, CatalogError};
pub use event::{Event, EventBatch, EventFilter, EventType, Hostility};
pub use fight::{ActorDirectory, CachedActorDirectory, Fight};
pub use timeline::{PhaseInterval, PhaseKind, TimelineBuilder};
