//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::analysis::analyze;
use crate::cli::output::{OutputFormat, format_plan, format_strategies};
use crate::cli::parser::{Cli, Commands};
use crate::core::DeliveryConfig;
use crate::dispatch::{DispatchOptions, Dispatcher, InstantClock, Payload, Transport};
use crate::error::{CommandError, Result};
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success. Commands that deliver live
/// (`dispatch`) write to stdout as they go and return a summary.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Analyze {
            message,
            file,
            config,
            max_size,
            strategy,
            no_chunking,
            plain,
            seed,
        } => {
            let text = resolve_message(message.as_deref(), file.as_deref())?;
            let config = resolve_config(
                config.as_deref(),
                *max_size,
                strategy.as_deref(),
                *no_chunking,
                *plain,
            )?;
            cmd_analyze(&text, &config, *seed, format)
        }
        Commands::Dispatch {
            message,
            file,
            config,
            max_size,
            strategy,
            no_chunking,
            plain,
            fixed_delay,
            no_typing,
            seed,
            dry_run,
        } => {
            let text = resolve_message(message.as_deref(), file.as_deref())?;
            let mut config = resolve_config(
                config.as_deref(),
                *max_size,
                strategy.as_deref(),
                *no_chunking,
                *plain,
            )?;
            if *no_typing {
                config.typing_indicator = false;
            }
            if let Some(delay) = fixed_delay {
                config.fixed_delay_ms = Some(*delay);
            }
            cmd_dispatch(&text, &config, *seed, *dry_run, cli.verbose, format).await
        }
        Commands::Strategies => Ok(format_strategies(format)),
    }
}

/// Resolves the message text from the argument, a file, or stdin.
fn resolve_message(message: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (message, file) {
        (Some(_), Some(_)) => Err(CommandError::InvalidArgument(
            "pass the message as an argument or with --file, not both".to_string(),
        )
        .into()),
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            CommandError::ReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        }),
        (None, None) => {
            if io::stdin().is_terminal() {
                return Err(CommandError::MissingArgument(
                    "message (pass it as an argument, with --file, or on stdin)".to_string(),
                )
                .into());
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CommandError::ReadFailed {
                    path: "stdin".to_string(),
                    reason: e.to_string(),
                })?;
            Ok(buffer)
        }
    }
}

/// Loads the delivery configuration and applies flag overrides.
fn resolve_config(
    config_path: Option<&Path>,
    max_size: Option<usize>,
    strategy: Option<&str>,
    no_chunking: bool,
    plain: bool,
) -> Result<DeliveryConfig> {
    let mut config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| CommandError::ReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            DeliveryConfig::from_json_str(&raw)?
        }
        None => DeliveryConfig::default(),
    };

    if let Some(size) = max_size {
        config.max_chunk_size = size;
    }
    if let Some(name) = strategy {
        config.strategy = name.parse()?;
    }
    if no_chunking {
        config.chunking_enabled = false;
    }
    if plain {
        config.preserve_formatting = false;
    }

    config.validate()?;
    Ok(config)
}

/// Builds the randomness source, seeded when requested.
fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Transport that prints deliveries to stdout.
///
/// In text mode chunks come out as raw lines and presence events as
/// `[composing]` markers; in the JSON modes every delivery is one
/// NDJSON event record.
struct StdoutTransport {
    format: OutputFormat,
}

#[async_trait]
impl Transport for StdoutTransport {
    async fn deliver(&self, payload: Payload<'_>) -> anyhow::Result<()> {
        let mut stdout = io::stdout().lock();
        match (self.format, payload) {
            (OutputFormat::Text, Payload::Text(text)) => writeln!(stdout, "{text}")?,
            (OutputFormat::Text, Payload::Presence(presence)) => {
                writeln!(stdout, "[{presence}]")?;
            }
            (OutputFormat::Json | OutputFormat::Ndjson, Payload::Text(text)) => {
                writeln!(stdout, "{}", json!({"type": "message", "text": text}))?;
            }
            (OutputFormat::Json | OutputFormat::Ndjson, Payload::Presence(presence)) => {
                writeln!(stdout, "{}", json!({"type": "presence", "state": presence}))?;
            }
        }
        stdout.flush()?;
        Ok(())
    }
}

// ==================== Command Implementations ====================

fn cmd_analyze(
    text: &str,
    config: &DeliveryConfig,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<String> {
    let mut rng = seeded_rng(seed);
    let plan = analyze(text, config, &mut rng)?;
    Ok(format_plan(&plan, config.strategy, format))
}

async fn cmd_dispatch(
    text: &str,
    config: &DeliveryConfig,
    seed: Option<u64>,
    dry_run: bool,
    verbose: bool,
    format: OutputFormat,
) -> Result<String> {
    let mut rng = seeded_rng(seed);
    let plan = analyze(text, config, &mut rng)?;

    let options = DispatchOptions::from_config(config).with_progress(verbose);
    let transport = StdoutTransport { format };

    if dry_run {
        Dispatcher::with_clock(options, InstantClock)
            .dispatch(&plan, &transport, &mut rng)
            .await?;
    } else {
        Dispatcher::new(options)
            .dispatch(&plan, &transport, &mut rng)
            .await?;
    }

    match format {
        OutputFormat::Text => Ok(format!(
            "Delivered {} chunks ({} ms of pacing)\n",
            plan.chunk_count, plan.total_delay_ms
        )),
        OutputFormat::Json | OutputFormat::Ndjson => {
            let summary = json!({
                "type": "summary",
                "delivered": plan.chunk_count,
                "total_delay_ms": plan.total_delay_ms,
            });
            Ok(format!("{summary}\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DeliveryPlan;
    use crate::error::Error;
    use crate::pacing::DeliveryStrategy;
    use rand::Rng;

    #[test]
    fn test_resolve_message_prefers_argument() {
        let text = resolve_message(Some("hello"), None).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_resolve_message_rejects_conflicting_sources() {
        let err = resolve_message(Some("hello"), Some(Path::new("/tmp/x"))).unwrap_err();
        assert!(matches!(
            err,
            Error::Command(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_message_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"message from a file").unwrap();

        let text = resolve_message(None, Some(file.path())).unwrap();
        assert_eq!(text, "message from a file");
    }

    #[test]
    fn test_resolve_message_missing_file() {
        let err = resolve_message(None, Some(Path::new("/nonexistent/reply.txt"))).unwrap_err();
        assert!(matches!(
            err,
            Error::Command(CommandError::ReadFailed { .. })
        ));
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(None, None, None, false, false).unwrap();
        assert_eq!(config, DeliveryConfig::default());
    }

    #[test]
    fn test_resolve_config_file_with_flag_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"message_chunk_size": 100, "chunking_strategy": "formal"}"#)
            .unwrap();

        let config =
            resolve_config(Some(file.path()), Some(150), Some("efficient"), true, true).unwrap();
        assert_eq!(config.max_chunk_size, 150);
        assert_eq!(config.strategy, DeliveryStrategy::Efficient);
        assert!(!config.chunking_enabled);
        assert!(!config.preserve_formatting);
    }

    #[test]
    fn test_resolve_config_unknown_strategy() {
        let result = resolve_config(None, None, Some("hasty"), false, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_config_rejects_zero_size() {
        let result = resolve_config(None, Some(0), None, false, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_seeded_rng_deterministic() {
        let a: u64 = seeded_rng(Some(9)).random_range(0..1_000_000);
        let b: u64 = seeded_rng(Some(9)).random_range(0..1_000_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cmd_analyze_text_output() {
        let config = DeliveryConfig::default();
        let message = "A sentence that keeps adding words until it must split. ".repeat(10);

        let output = cmd_analyze(&message, &config, Some(1), OutputFormat::Text).unwrap();
        assert!(output.contains("Delivery plan"));
        assert!(output.contains("Mode:         chunked"));
        assert!(output.contains("Strategy:     natural"));
    }

    #[test]
    fn test_cmd_analyze_json_output_parses_as_plan() {
        let config = DeliveryConfig::default();
        let message = "Another sentence that keeps adding words until splitting. ".repeat(10);

        let output = cmd_analyze(&message, &config, Some(1), OutputFormat::Json).unwrap();
        let plan: DeliveryPlan = serde_json::from_str(&output).unwrap();
        assert!(plan.should_chunk);
        assert_eq!(plan.chunks.len(), plan.pacing.len());
    }

    #[tokio::test]
    async fn test_cmd_dispatch_dry_run_returns_summary() {
        let config = DeliveryConfig::default();
        let message = "Dry runs print everything without waiting anything out. ".repeat(10);

        let output = cmd_dispatch(&message, &config, Some(1), true, false, OutputFormat::Text)
            .await
            .unwrap();
        assert!(output.starts_with("Delivered "));
        assert!(output.contains("ms of pacing"));
    }

    #[tokio::test]
    async fn test_execute_strategies() {
        let cli = Cli {
            verbose: false,
            format: "text".to_string(),
            command: Commands::Strategies,
        };
        let output = execute(&cli).await.unwrap();
        assert!(output.contains("natural"));
        assert!(output.contains("efficient"));
        assert!(output.contains("formal"));
    }
}
