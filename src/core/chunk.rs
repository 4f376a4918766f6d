//! Chunk representation for outgoing messages.
//!
//! Chunks are the individual messages produced by segmenting a long
//! reply. Each chunk carries its position in the delivery sequence and
//! a content classification that drives the pacing model.

use crate::text::{grapheme_count, truncate_graphemes};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of chunk content, used to scale typing delays.
///
/// Classification follows a fixed precedence: code beats quote beats
/// list beats emphasis beats plain text. See [`crate::segment::classify`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Plain conversational text.
    #[default]
    Text,

    /// Bulleted or numbered list content.
    List,

    /// Code fences or inline code spans.
    Code,

    /// Quoted material (markdown `>` or a fully quoted paragraph).
    Quote,

    /// WhatsApp-style emphasis (`*bold*`, `_italic_`, `~strikethrough~`).
    Emphasis,
}

impl ContentType {
    /// Returns the lowercase wire name of this content type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::List => "list",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::Emphasis => "emphasis",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one outgoing message chunk.
///
/// Chunks are created by segmentation and delivered in index order.
///
/// # Examples
///
/// ```
/// use cadence_rs::core::{Chunk, ContentType};
///
/// let chunk = Chunk::new("On my way!".to_string(), 0, ContentType::Text);
/// assert_eq!(chunk.size(), 10);
/// assert_eq!(chunk.index, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text as it will be sent.
    pub text: String,

    /// Sequential index within the delivery sequence (0-based).
    pub index: usize,

    /// Content classification driving the pacing model.
    pub content_type: ContentType,
}

impl Chunk {
    /// Creates a new chunk.
    ///
    /// # Arguments
    ///
    /// * `text` - Chunk text as it will be sent.
    /// * `index` - Sequential index within the delivery sequence.
    /// * `content_type` - Content classification.
    #[must_use]
    pub const fn new(text: String, index: usize, content_type: ContentType) -> Self {
        Self {
            text,
            index,
            content_type,
        }
    }

    /// Returns the size of the chunk in grapheme clusters.
    ///
    /// This is the measure compared against `max_chunk_size`.
    #[must_use]
    pub fn size(&self) -> usize {
        grapheme_count(&self.text)
    }

    /// Checks if the chunk text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns a preview of the chunk text (first N graphemes), for logs.
    ///
    /// # Arguments
    ///
    /// * `max_graphemes` - Maximum number of graphemes to include.
    #[must_use]
    pub fn preview(&self, max_graphemes: usize) -> &str {
        truncate_graphemes(&self.text, max_graphemes)
    }
}

/// Pacing metadata associated with a chunk.
///
/// Produced alongside each chunk during analysis; the dispatcher reads
/// the delay, the transport never sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Content classification the delay was computed for.
    pub content_type: ContentType,

    /// Simulated typing delay for this chunk, in milliseconds.
    pub delay_ms: u64,
}

impl ChunkMetadata {
    /// Creates new pacing metadata.
    #[must_use]
    pub const fn new(content_type: ContentType, delay_ms: u64) -> Self {
        Self {
            content_type,
            delay_ms,
        }
    }
}
