//! Error types for catalog validation and timeline construction

use thiserror::Error;

use crate::timeline::PhaseKind;

/// Opaque collaborator error, propagated to the caller unmodified.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Authoring errors in a phase catalog, detected before any query runs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "catalog {encounter_id}: rule \"{rule}\" ends {kind} #{index} but only {declared} {kind} names are declared"
    )]
    RuleIndexOutOfRange {
        encounter_id: u32,
        /// Description of the offending rule
        rule: &'static str,
        kind: PhaseKind,
        /// Name index the rule would consume
        index: usize,
        /// Length of the declared name list
        declared: usize,
    },
}

/// Errors during timeline construction
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed phase catalog")]
    Catalog(#[from] CatalogError),

    #[error("event query failed")]
    EventSource(#[source] BoxError),
}
