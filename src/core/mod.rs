//! Core domain models for cadence.
//!
//! This module contains the fundamental data structures used throughout
//! the delivery pipeline: chunks, content classifications, pacing
//! metadata, and the delivery configuration. These are pure domain
//! models with no I/O dependencies.

pub mod chunk;
pub mod config;

pub use chunk::{Chunk, ChunkMetadata, ContentType};
pub use config::{DEFAULT_MAX_CHUNK_SIZE, DeliveryConfig};
