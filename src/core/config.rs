//! Delivery configuration.
//!
//! A single serde surface controls the whole pipeline: chunk sizing,
//! strategy selection, formatting preservation, and dispatch behavior.
//! Unknown fields are ignored so configs can be shared with other
//! platform components; unrecognized strategy names are rejected.

use crate::error::{ConfigError, Result};
use crate::pacing::DeliveryStrategy;
use serde::{Deserialize, Serialize};

/// Default maximum chunk size in graphemes (WhatsApp-friendly).
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 280;

/// Configuration for message chunking and delivery pacing.
///
/// All fields have defaults, so an empty JSON object deserializes to the
/// stock configuration. No environment variables are consulted.
///
/// # Examples
///
/// ```
/// use cadence_rs::core::DeliveryConfig;
///
/// let config = DeliveryConfig::from_json_str("{}").unwrap();
/// assert_eq!(config.max_chunk_size, 280);
/// assert!(config.chunking_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Maximum chunk size in grapheme clusters.
    #[serde(rename = "message_chunk_size")]
    pub max_chunk_size: usize,

    /// Whether long messages are chunked at all.
    #[serde(rename = "enable_message_chunking")]
    pub chunking_enabled: bool,

    /// Delay strategy preset.
    #[serde(rename = "chunking_strategy")]
    pub strategy: DeliveryStrategy,

    /// Whether segmentation respects paragraph/list/code structure.
    pub preserve_formatting: bool,

    /// Whether the dispatcher sends typing-presence signals.
    pub typing_indicator: bool,

    /// Minimum per-chunk wait override for dispatch, in milliseconds.
    pub fixed_delay_ms: Option<u64>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            chunking_enabled: true,
            strategy: DeliveryStrategy::Natural,
            preserve_formatting: true,
            typing_indicator: true,
            fixed_delay_ms: None,
        }
    }
}

impl DeliveryConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay strategy preset.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: DeliveryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the maximum chunk size in graphemes.
    #[must_use]
    pub const fn with_max_chunk_size(mut self, size: usize) -> Self {
        self.max_chunk_size = size;
        self
    }

    /// Enables or disables chunking entirely.
    #[must_use]
    pub const fn with_chunking(mut self, enabled: bool) -> Self {
        self.chunking_enabled = enabled;
        self
    }

    /// Enables or disables typing-presence signals.
    #[must_use]
    pub const fn with_typing_indicator(mut self, enabled: bool) -> Self {
        self.typing_indicator = enabled;
        self
    }

    /// Sets a minimum per-chunk wait override for dispatch.
    #[must_use]
    pub const fn with_fixed_delay(mut self, delay_ms: u64) -> Self {
        self.fixed_delay_ms = Some(delay_ms);
        self
    }

    /// Parses a configuration from a JSON string.
    ///
    /// Missing fields fall back to defaults; unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unrecognized strategy name.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_chunk_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize {
                size: self.max_chunk_size,
            }
            .into());
        }
        Ok(())
    }
}
