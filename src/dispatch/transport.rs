//! Outbound delivery abstraction.
//!
//! The dispatcher drives any channel that can carry text messages and
//! presence updates. Implementations adapt a concrete messaging client;
//! the engine itself never talks to the network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presence state shown to the recipient while a reply is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// The sender appears to be typing.
    Composing,
    /// The sender has finished and is available again.
    Available,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composing => f.write_str("composing"),
            Self::Available => f.write_str("available"),
        }
    }
}

/// A single outbound item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// A text message chunk.
    Text(&'a str),
    /// A presence update.
    Presence(Presence),
}

/// An outbound channel the dispatcher can deliver through.
///
/// Text failures abort the remaining sequence; presence failures are
/// treated as cosmetic and only logged, so implementations may surface
/// either without worrying about retry semantics.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers one payload to the recipient.
    async fn deliver(&self, payload: Payload<'_>) -> anyhow::Result<()>;
}
