//! Delivery planning.
//!
//! [`analyze`] runs segmentation and pacing without performing any I/O:
//! it produces a [`DeliveryPlan`] describing exactly what the dispatcher
//! would send and how long it would wait, which makes plans previewable,
//! serializable, and cheap to test.

use crate::core::{Chunk, ChunkMetadata, ContentType, DeliveryConfig};
use crate::error::Result;
use crate::pacing::compute_delay;
use crate::segment::segment_message;
use crate::text::grapheme_count;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse delivery mode: one message or a paced sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// The reply goes out as a single message.
    Single,
    /// The reply goes out as a paced chunk sequence.
    Chunked,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Chunked => f.write_str("chunked"),
        }
    }
}

/// The full result of analyzing a message for delivery.
///
/// `chunks` and `pacing` are parallel sequences; the dispatcher walks
/// them together. Serialized with the wire key `strategy` for the mode
/// label, matching what delivery previews display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPlan {
    /// Whether the message was actually split.
    pub should_chunk: bool,

    /// Coarse mode label (`single` vs `chunked`).
    #[serde(rename = "strategy")]
    pub mode: DeliveryMode,

    /// Outgoing chunks, in delivery order.
    pub chunks: Vec<Chunk>,

    /// Per-chunk pacing metadata, parallel to `chunks`.
    pub pacing: Vec<ChunkMetadata>,

    /// Sum of all pacing delays, in milliseconds.
    pub total_delay_ms: u64,

    /// Number of chunks in the plan.
    pub chunk_count: usize,

    /// Mean chunk size in graphemes, rounded half-up.
    pub avg_chunk_size: usize,
}

impl DeliveryPlan {
    /// Builds a single-message plan: no chunking, no simulated delay.
    #[must_use]
    pub fn single(text: String) -> Self {
        let chunk = Chunk::new(text, 0, ContentType::Text);
        let avg_chunk_size = chunk.size();
        Self {
            should_chunk: false,
            mode: DeliveryMode::Single,
            chunks: vec![chunk],
            pacing: vec![ChunkMetadata::new(ContentType::Text, 0)],
            total_delay_ms: 0,
            chunk_count: 1,
            avg_chunk_size,
        }
    }

    /// Builds a chunked plan, computing the aggregate statistics.
    #[must_use]
    pub fn chunked(chunks: Vec<Chunk>, pacing: Vec<ChunkMetadata>) -> Self {
        let chunk_count = chunks.len();
        let total_delay_ms = pacing.iter().map(|meta| meta.delay_ms).sum();
        let size_sum: usize = chunks.iter().map(Chunk::size).sum();
        let avg_chunk_size = if chunk_count == 0 {
            0
        } else {
            (size_sum + chunk_count / 2) / chunk_count
        };
        Self {
            should_chunk: true,
            mode: DeliveryMode::Chunked,
            chunks,
            pacing,
            total_delay_ms,
            chunk_count,
            avg_chunk_size,
        }
    }
}

/// Analyzes a message and produces its delivery plan.
///
/// Performs no I/O and no waiting; given the same RNG seed and inputs,
/// the plan is identical. When chunking is disabled or the message fits
/// in one chunk, the plan is a single trimmed message with zero delay
/// (a whitespace-only message is kept unchanged).
///
/// # Arguments
///
/// * `message` - The reply text to deliver.
/// * `config` - Chunking and pacing configuration.
/// * `rng` - Randomness source for delay jitter.
///
/// # Errors
///
/// Returns a configuration error if `max_chunk_size` is zero.
///
/// # Examples
///
/// ```
/// use cadence_rs::analysis::analyze;
/// use cadence_rs::core::DeliveryConfig;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let config = DeliveryConfig::default();
/// let mut rng = StdRng::seed_from_u64(42);
/// let plan = analyze("Be there in five!", &config, &mut rng).unwrap();
/// assert!(!plan.should_chunk);
/// assert_eq!(plan.chunk_count, 1);
/// ```
pub fn analyze<R: Rng + ?Sized>(
    message: &str,
    config: &DeliveryConfig,
    rng: &mut R,
) -> Result<DeliveryPlan> {
    config.validate()?;

    let trimmed = message.trim();
    let fits = grapheme_count(trimmed) <= config.max_chunk_size;

    if !config.chunking_enabled || fits {
        let text = if trimmed.is_empty() {
            message.to_string()
        } else {
            trimmed.to_string()
        };
        return Ok(DeliveryPlan::single(text));
    }

    let chunks = segment_message(message, config.max_chunk_size, config.preserve_formatting);
    let pacing: Vec<ChunkMetadata> = chunks
        .iter()
        .map(|chunk| {
            let delay = compute_delay(&chunk.text, chunk.content_type, config.strategy, rng);
            ChunkMetadata::new(chunk.content_type, delay)
        })
        .collect();

    Ok(DeliveryPlan::chunked(chunks, pacing))
}
