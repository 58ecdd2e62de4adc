//! Error types for the populate workflow.

use crate::collaborator::BoxError;
use event_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur during population.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Invalid generator configuration or generation failure.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// The reference store returned no campaign ids.
    #[error("No campaign ids found in {0}. Seed/load campaigns first.")]
    NoKnownReferences(String),

    /// Reference store failure.
    #[error("Reference store error: {0}")]
    Store(#[source] BoxError),

    /// Sink failure.
    #[error("Sink error: {0}")]
    Sink(#[source] BoxError),

    /// Invalid populate options.
    #[error("Configuration error: {0}")]
    Config(String),
}
