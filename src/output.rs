// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes, plus deferred build-log flushing.

use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with timing when a timer ran.
    pub fn success(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            let elapsed = self.elapsed_secs();
            if elapsed > 0.0 {
                println!("{message} ({elapsed:.1}s)");
            } else {
                println!("{message}");
            }
        }
    }

    /// Print the machine-facing result: the bare value in quiet mode, a JSON
    /// line in json mode, nothing in normal mode (which gets `success`).
    pub fn result<T: Serialize>(&self, plain: &str, payload: &T) {
        match self.mode {
            OutputMode::Normal => {}
            OutputMode::Quiet => println!("{plain}"),
            OutputMode::Json => {
                let line = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
                println!("{line}");
            }
        }
    }

    /// Dump buffered build logs to stderr. Called before a failure is
    /// reported so users keep their build context.
    pub fn flush_build_logs(&self, logs: &[String]) {
        if self.mode == OutputMode::Json || logs.is_empty() {
            return;
        }

        eprintln!("Build logs:");
        for entry in logs {
            eprintln!("{entry}");
        }
    }
}
