//! The generation pipeline.
//!
//! Ingestion normalises the three accepted input forms into one decoded
//! image; the orchestrator fans out across the requested style variants;
//! the per-variant pipeline runs background removal, both resize tiers, and
//! both uploads for one generated image.

pub mod ingest;
pub mod orchestrator;
pub mod variant;

#[cfg(test)]
pub(crate) mod testutil;

pub use ingest::{Ingestor, MAX_UPLOAD_BYTES, MIN_DIMENSION};
pub use orchestrator::Generator;
pub use variant::process_variant;
