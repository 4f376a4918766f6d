//! Delay strategy presets.
//!
//! A strategy fixes the simulated typist: total speed, how much it
//! wanders, and the floor/ceiling that keep individual delays inside a
//! tolerable range for chat.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delay strategy preset controlling the simulated typing speed.
///
/// # Examples
///
/// ```
/// use cadence_rs::pacing::DeliveryStrategy;
///
/// let strategy: DeliveryStrategy = "efficient".parse().unwrap();
/// assert_eq!(strategy.params().base_wpm, 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStrategy {
    /// Casual human typist: slow, wide jitter, moderate bounds.
    #[default]
    Natural,

    /// Brisk assistant: faster typing, tight jitter, short waits.
    Efficient,

    /// Deliberate register: slowest typing, long floor and ceiling.
    Formal,
}

/// Parameters describing a delay strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyParams {
    /// Base typing speed in words per minute.
    pub base_wpm: f64,
    /// Uniform jitter applied to the base speed, in WPM.
    pub wpm_variance: f64,
    /// Minimum delay per chunk, in milliseconds.
    pub min_delay_ms: u64,
    /// Maximum delay per chunk, in milliseconds.
    pub max_delay_ms: u64,
}

impl DeliveryStrategy {
    /// All strategies, in listing order.
    pub const ALL: [Self; 3] = [Self::Natural, Self::Efficient, Self::Formal];

    /// Returns the tuning parameters for this strategy.
    #[must_use]
    pub const fn params(self) -> StrategyParams {
        match self {
            Self::Natural => StrategyParams {
                base_wpm: 35.0,
                wpm_variance: 10.0,
                min_delay_ms: 1800,
                max_delay_ms: 10_000,
            },
            Self::Efficient => StrategyParams {
                base_wpm: 50.0,
                wpm_variance: 5.0,
                min_delay_ms: 1000,
                max_delay_ms: 6000,
            },
            Self::Formal => StrategyParams {
                base_wpm: 30.0,
                wpm_variance: 5.0,
                min_delay_ms: 2500,
                max_delay_ms: 12_000,
            },
        }
    }

    /// Returns the lowercase wire name of this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Efficient => "efficient",
            Self::Formal => "formal",
        }
    }

    /// Returns a human-readable description of this strategy.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Natural => "Casual human pacing with wide speed variation and brief afterthought pauses",
            Self::Efficient => "Brisk assistant pacing with tight variation and short waits",
            Self::Formal => "Deliberate pacing with long minimum waits for formal conversations",
        }
    }
}

impl fmt::Display for DeliveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "natural" => Ok(Self::Natural),
            "efficient" => Ok(Self::Efficient),
            "formal" => Ok(Self::Formal),
            _ => Err(ConfigError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}
