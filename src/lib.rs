//! # cadence-rs
//!
//! Message chunking and humanized delivery pacing for chat replies.
//!
//! Cadence splits long outbound messages into chat-sized chunks and
//! computes per-chunk delays that mimic a human typist, so automated
//! senders read like people instead of firing wall-of-text replies.
//!
//! ## Features
//!
//! - **Segmentation**: Structure-aware splitting that keeps paragraphs,
//!   list items, and fenced code blocks intact
//! - **Pacing**: Typing-speed delay models (natural, efficient, formal)
//!   with per-content-type factors and punctuation pauses
//! - **Planning**: Pure, seedable analysis producing serializable
//!   delivery plans
//! - **Dispatch**: Async paced delivery over any transport, with
//!   typing-presence signaling
//! - **Unicode Aware**: Proper grapheme cluster handling
//!
//! ## Example
//!
//! ```
//! use cadence_rs::analysis::analyze;
//! use cadence_rs::core::DeliveryConfig;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = DeliveryConfig::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let message = "Long replies get split into chunks. \
//!     Each chunk is paced like a person typed it. "
//!     .repeat(8);
//!
//! let plan = analyze(&message, &config, &mut rng).unwrap();
//! assert!(plan.should_chunk);
//! assert_eq!(plan.chunks.len(), plan.pacing.len());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod pacing;
pub mod segment;
pub mod text;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{Chunk, ChunkMetadata, ContentType, DEFAULT_MAX_CHUNK_SIZE, DeliveryConfig};

// Re-export planning and pacing types
pub use analysis::{DeliveryMode, DeliveryPlan, analyze};
pub use pacing::{DeliveryStrategy, StrategyParams, available_strategies, compute_delay};

// Re-export segmentation entry points
pub use segment::{classify, segment_message};

// Re-export dispatch types
pub use dispatch::{
    Clock, DispatchOptions, Dispatcher, InstantClock, Payload, Presence, TokioClock, Transport,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
