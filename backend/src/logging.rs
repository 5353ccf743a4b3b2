// Logging module, powered by tracing-subscriber
//
// Library crates log through the `log` facade. `tracing_log::LogTracer`
// forwards those records into the tracing subscriber installed here.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::Path;

use morphdb_configs::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level plus per-target overrides.
pub fn build_env_filter(
    level: &str,
    target_levels: Option<&HashMap<String, String>>,
) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // rusqlite only logs through the `log` facade at trace level
    directives.push("rusqlite=warn".to_string());

    if let Some(map) = target_levels {
        let mut targets: Vec<_> = map.iter().collect();
        targets.sort();
        for (target, lvl) in targets {
            directives.push(format!("{}={}", target, lvl));
        }
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Initialize logging from the `[logging]` section.
///
/// Sets up `tracing-subscriber` with:
///  - Colored console layer on stderr (when `log_to_console` is true)
///  - File layer under `logs_path` (compact text or JSON lines)
///  - `tracing_log::LogTracer` bridge so that all `log::*` calls are captured
pub fn init_logging(settings: &LoggingSettings, file_name: &str) -> anyhow::Result<()> {
    let log_format = LogFormat::parse(&settings.format);
    let file_path = Path::new(&settings.logs_path).join(file_name);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(&file_path)?;

    tracing_log::LogTracer::init().ok(); // ok() in case already initialized

    // -- Console layer (optional) --
    let console_layer = if settings.log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_filter(build_env_filter(&settings.level, Some(&settings.targets))?),
        )
    } else {
        None
    };

    // -- File layer --
    let file_layer = if log_format == LogFormat::Json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(log_file)
            .with_target(true)
            .with_thread_names(true)
            .with_filter(build_env_filter(&settings.level, Some(&settings.targets))?)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(log_file)
            .with_target(true)
            .with_thread_names(true)
            .with_filter(build_env_filter(&settings.level, Some(&settings.targets))?)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::trace!(
        "Logging initialized: level={}, console={}, file={}",
        settings.level,
        settings.log_to_console,
        file_path.display()
    );

    Ok(())
}
