//! Output formatting for CLI commands.
//!
//! Supports text, JSON, and NDJSON output formats.

use crate::analysis::DeliveryPlan;
use crate::core::Chunk;
use crate::error::Error;
use crate::pacing::DeliveryStrategy;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
    /// Newline-delimited JSON, one record per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// Formats a delivery plan.
///
/// The strategy is displayed alongside the plan in text mode; the plan's
/// own serialized form carries only the coarse single/chunked mode.
#[must_use]
pub fn format_plan(plan: &DeliveryPlan, strategy: DeliveryStrategy, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_plan_text(plan, strategy),
        OutputFormat::Json => format_json(plan),
        OutputFormat::Ndjson => format_plan_ndjson(plan),
    }
}

fn format_plan_text(plan: &DeliveryPlan, strategy: DeliveryStrategy) -> String {
    let mut output = String::new();
    output.push_str("Delivery plan\n");
    output.push_str("=============\n\n");
    let _ = writeln!(output, "  Mode:         {}", plan.mode);
    let _ = writeln!(output, "  Strategy:     {strategy}");
    let _ = writeln!(output, "  Chunks:       {}", plan.chunk_count);
    let _ = writeln!(output, "  Avg size:     {} graphemes", plan.avg_chunk_size);
    let _ = writeln!(output, "  Total delay:  {} ms", plan.total_delay_ms);

    output.push('\n');
    output.push_str("Chunks:\n");
    let _ = writeln!(
        output,
        "{:<6} {:<10} {:<12} {:<8} Preview",
        "Index", "Type", "Delay (ms)", "Size"
    );
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for (chunk, meta) in plan.chunks.iter().zip(&plan.pacing) {
        let _ = writeln!(
            output,
            "{:<6} {:<10} {:<12} {:<8} {}",
            chunk.index,
            chunk.content_type,
            meta.delay_ms,
            chunk.size(),
            preview_cell(chunk, 30)
        );
    }

    output
}

fn format_plan_ndjson(plan: &DeliveryPlan) -> String {
    let mut output = String::new();
    for (chunk, meta) in plan.chunks.iter().zip(&plan.pacing) {
        let record = json!({
            "index": chunk.index,
            "content_type": chunk.content_type,
            "delay_ms": meta.delay_ms,
            "size": chunk.size(),
            "text": chunk.text,
        });
        let _ = writeln!(output, "{record}");
    }
    output
}

/// Formats the strategy catalog.
#[must_use]
pub fn format_strategies(format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_strategies_text(),
        OutputFormat::Json => {
            let entries: Vec<_> = DeliveryStrategy::ALL
                .iter()
                .map(|s| strategy_record(*s))
                .collect();
            format_json(&entries)
        }
        OutputFormat::Ndjson => {
            let mut output = String::new();
            for strategy in DeliveryStrategy::ALL {
                let _ = writeln!(output, "{}", strategy_record(strategy));
            }
            output
        }
    }
}

fn format_strategies_text() -> String {
    let mut output = String::new();
    output.push_str("Available strategies:\n");
    let _ = writeln!(
        output,
        "{:<10} {:<10} {:<15} Description",
        "Name", "WPM", "Delay range"
    );
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for strategy in DeliveryStrategy::ALL {
        let params = strategy.params();
        let wpm = format!("{:.0}\u{b1}{:.0}", params.base_wpm, params.wpm_variance);
        let range = format!("{}-{} ms", params.min_delay_ms, params.max_delay_ms);
        let _ = writeln!(
            output,
            "{:<10} {:<10} {:<15} {}",
            strategy.as_str(),
            wpm,
            range,
            strategy.description()
        );
    }

    output
}

fn strategy_record(strategy: DeliveryStrategy) -> serde_json::Value {
    let params = strategy.params();
    json!({
        "name": strategy.as_str(),
        "description": strategy.description(),
        "base_wpm": params.base_wpm,
        "wpm_variance": params.wpm_variance,
        "min_delay_ms": params.min_delay_ms,
        "max_delay_ms": params.max_delay_ms,
    })
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json | OutputFormat::Ndjson => {
            let category = match error {
                Error::Config(_) => "config",
                Error::Dispatch(_) => "dispatch",
                Error::Command(_) => "command",
            };
            json!({
                "error": error.to_string(),
                "category": category,
            })
            .to_string()
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Renders a chunk preview column: first graphemes, newlines escaped.
fn preview_cell(chunk: &Chunk, max_graphemes: usize) -> String {
    let head = chunk.preview(max_graphemes).replace('\n', "\\n");
    if chunk.size() > max_graphemes {
        format!("{head}...")
    } else {
        head
    }
}
