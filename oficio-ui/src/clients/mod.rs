//! HTTP clients for the external collaborators

pub mod extraction;
pub mod generation;

pub use extraction::{ExtractionClient, ExtractionError};
pub use generation::{GenerationClient, GenerationError};
