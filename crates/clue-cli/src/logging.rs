use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

const EVENT_TARGET: &str = "clue::event";

/// Keeps the background log writer alive; dropping it flushes the file.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Installs the global subscriber. Plain text goes to stderr unless
/// `json_path` is set, in which case JSON lines go to that file and the
/// returned guard must be held until exit. `RUST_LOG` overrides the level.
///
/// The `clue::event` target is only recorded when logging to a file; on a
/// terminal those events are narrated on stdout instead.
pub fn init_logging(logging: &LoggingConfig) -> Result<Option<LoggingGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(logging)?,
    };

    let Some(log_path) = logging.json_path.clone() else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        // A subscriber may already be installed, e.g. by a test harness.
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(None);
    };

    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    let file = File::create(&log_path)
        .with_context(|| format!("creating log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}

fn default_filter(logging: &LoggingConfig) -> Result<EnvFilter> {
    let level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::new(level.as_str());
    if logging.json_path.is_some() {
        return Ok(filter);
    }
    let quiet_events = format!("{EVENT_TARGET}=off")
        .parse()
        .context("building the event log directive")?;
    Ok(filter.add_directive(quiet_events))
}

#[cfg(test)]
mod tests {
    use super::default_filter;
    use crate::config::LoggingConfig;
    use std::path::PathBuf;

    #[test]
    fn events_are_silenced_only_on_stderr() {
        let stderr = default_filter(&LoggingConfig::default()).expect("filter");
        assert!(stderr.to_string().contains("clue::event=off"));

        let file = LoggingConfig {
            json_path: Some(PathBuf::from("game.jsonl")),
            ..LoggingConfig::default()
        };
        let json = default_filter(&file).expect("filter");
        assert!(!json.to_string().contains("clue::event"));
    }
}
