//! Pluggable diagnostic sink for the [`Driver`](crate::Driver).
//!
//! The driver never depends on what a logger does with a message; it only
//! calls it at fixed points (construction, reads, update failure branches).
//! [`TracingLogger`] is the default and forwards to `tracing`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Message severity, from most to least important.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// The `tracing` level used to emit messages of this severity.
    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            Self::Fatal | Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// A diagnostic sink.
///
/// Implementors provide [`Logger::log`]; the per-severity helpers forward to
/// it. Call sites use `format_args!` so nothing is formatted unless a sink
/// actually renders the message.
pub trait Logger: Send + Sync {
    fn log(&self, severity: Severity, args: fmt::Arguments<'_>);

    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warn, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }
}

/// Console logger backed by `tracing` events.
///
/// Messages more verbose than `max_severity` are dropped before they reach
/// the subscriber. `Fatal` is reported as an error event tagged
/// `fatal = true`; it never terminates the process.
#[derive(Clone, Copy, Debug)]
pub struct TracingLogger {
    max_severity: Severity,
}

impl TracingLogger {
    pub fn new(max_severity: Severity) -> Self {
        Self { max_severity }
    }

    pub fn max_severity(&self) -> Severity {
        self.max_severity
    }

    /// Whether a message of `severity` passes this logger's threshold.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity <= self.max_severity
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

impl Logger for TracingLogger {
    fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }
        match severity {
            Severity::Fatal => tracing::error!(fatal = true, "{}", args),
            Severity::Error => tracing::error!("{}", args),
            Severity::Warn => tracing::warn!("{}", args),
            Severity::Info => tracing::info!("{}", args),
            Severity::Debug => tracing::debug!("{}", args),
            Severity::Trace => tracing::trace!("{}", args),
        }
    }
}
