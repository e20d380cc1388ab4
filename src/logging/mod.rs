//! Submission logging to disk, plus tracing diagnostics.
//!
//! When enabled, each submitted form is appended to a daily log file named
//! `form_<date>.log` in the configured log directory (default:
//! `~/.local/share/crabform/submissions/`). Diagnostics go to a separate
//! file because stderr is unusable while the terminal is in raw mode.

use crate::config::model::LoggingConfig;
use crate::form::FieldValue;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Writes submitted form values to daily log files.
///
/// File handles are cached for the lifetime of the logger to avoid repeated
/// opens. Falls back to `/dev/null` if a log file cannot be created.
pub struct SubmissionLogger {
    enabled: bool,
    log_dir: String,
    timestamp_format: String,
    file_handles: HashMap<String, fs::File>,
}

impl SubmissionLogger {
    pub fn new(config: &LoggingConfig, timestamp_format: &str) -> Self {
        Self {
            enabled: config.enabled,
            log_dir: config.log_dir.clone(),
            timestamp_format: timestamp_format.to_string(),
            file_handles: HashMap::new(),
        }
    }

    /// Append one submission as a single line. No-op if logging is
    /// disabled.
    pub fn log_submission(&mut self, title: &str, values: &[(String, FieldValue)]) {
        if !self.enabled {
            return;
        }

        let timestamp = chrono::Local::now()
            .format(&self.timestamp_format)
            .to_string();
        let mut line = format!("[{}] {}:", timestamp, title);
        for (name, value) in values {
            line.push_str(&format!(" {}={}", name, value));
        }

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("form_{}.log", date);

        // Expand ~ in log_dir
        let log_dir = if self.log_dir.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                home.join(self.log_dir.trim_start_matches("~/"))
            } else {
                PathBuf::from(&self.log_dir)
            }
        } else {
            PathBuf::from(&self.log_dir)
        };

        let filepath = log_dir.join(&filename);

        let handle = self.file_handles.entry(filename).or_insert_with(|| {
            let _ = fs::create_dir_all(&log_dir);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&filepath)
                .unwrap_or_else(|_| {
                    // Fallback: a handle that goes nowhere
                    OpenOptions::new()
                        .write(true)
                        .open(if cfg!(unix) { "/dev/null" } else { "NUL" })
                        .unwrap()
                })
        });

        let _ = writeln!(handle, "{}", line);
    }
}

/// Route `tracing` output to a file under the local data directory.
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_diagnostics() -> anyhow::Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crabform");
    fs::create_dir_all(&log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("crabform.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
