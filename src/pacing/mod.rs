//! Humanized typing-delay model.
//!
//! Delays simulate a human typist: a words-per-minute base speed with
//! random jitter, scaled by content difficulty, plus fixed pauses for
//! punctuation and a logarithmic fatigue term for long chunks. The
//! result is clamped to per-strategy floor/ceiling bounds.
//!
//! Randomness is injected; nothing here performs I/O or waits.

mod strategy;

pub use strategy::{DeliveryStrategy, StrategyParams};

use crate::core::ContentType;
use crate::text::grapheme_count;
use rand::Rng;

/// Grapheme count above which reading fatigue is added.
pub const FATIGUE_THRESHOLD_GRAPHEMES: usize = 200;

/// Scale factor for the logarithmic fatigue term, in milliseconds.
const FATIGUE_SCALE_MS: f64 = 500.0;

/// Lowest effective WPM after jitter; keeps the division sane.
const MIN_EFFECTIVE_WPM: f64 = 1.0;

/// Returns the names of all delay strategies, in listing order.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    DeliveryStrategy::ALL.iter().map(|s| s.as_str()).collect()
}

/// Returns the typing-time multiplier for a content classification.
///
/// Code is typed far more carefully than prose; lists and quotes get a
/// milder surcharge.
#[must_use]
pub const fn content_factor(content_type: ContentType) -> f64 {
    match content_type {
        ContentType::Text => 1.0,
        ContentType::Emphasis => 1.05,
        ContentType::Quote => 1.1,
        ContentType::List => 1.2,
        ContentType::Code => 1.8,
    }
}

/// Sums the thinking pauses for punctuation in the text.
///
/// Each occurrence counts, wherever it appears: `.` 300 ms, `!` 400 ms,
/// `?` 350 ms, `:` 200 ms, `;` 250 ms, newline 150 ms.
#[must_use]
pub fn punctuation_pause_ms(text: &str) -> u64 {
    text.chars().map(pause_for).sum()
}

const fn pause_for(c: char) -> u64 {
    match c {
        '.' => 300,
        '!' => 400,
        '?' => 350,
        ':' => 200,
        ';' => 250,
        '\n' => 150,
        _ => 0,
    }
}

/// Computes the reading-fatigue term for a chunk of the given length.
///
/// Zero at or below [`FATIGUE_THRESHOLD_GRAPHEMES`]; grows
/// logarithmically above it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fatigue_ms(graphemes: usize) -> f64 {
    if graphemes <= FATIGUE_THRESHOLD_GRAPHEMES {
        return 0.0;
    }
    (graphemes as f64 / FATIGUE_THRESHOLD_GRAPHEMES as f64).ln() * FATIGUE_SCALE_MS
}

/// Computes the simulated typing delay for one chunk, in milliseconds.
///
/// # Arguments
///
/// * `text` - The chunk text.
/// * `content_type` - Classification scaling the typing time.
/// * `strategy` - Delay strategy preset.
/// * `rng` - Randomness source for the WPM jitter.
///
/// # Examples
///
/// ```
/// use cadence_rs::core::ContentType;
/// use cadence_rs::pacing::{DeliveryStrategy, compute_delay};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let delay = compute_delay("On my way!", ContentType::Text, DeliveryStrategy::Natural, &mut rng);
/// assert!(delay >= 1800 && delay <= 10_000);
/// ```
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn compute_delay<R: Rng + ?Sized>(
    text: &str,
    content_type: ContentType,
    strategy: DeliveryStrategy,
    rng: &mut R,
) -> u64 {
    let params = strategy.params();

    let words = text.split_whitespace().count();
    let jitter = rng.random_range(-params.wpm_variance..=params.wpm_variance);
    let effective_wpm = (params.base_wpm + jitter).max(MIN_EFFECTIVE_WPM);

    let typing = (words as f64 / effective_wpm) * 60_000.0 * content_factor(content_type);
    let pauses = punctuation_pause_ms(text) as f64;
    let fatigue = fatigue_ms(grapheme_count(text));

    let total = (typing + pauses + fatigue).round() as u64;
    total.clamp(params.min_delay_ms, params.max_delay_ms)
}
