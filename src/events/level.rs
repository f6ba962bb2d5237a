//! # Severity levels and the `sys.log` payload.
//!
//! [`Level`] is ordered from most verbose to most severe:
//! ```text
//! Debug < Info < Important < Warning < Error < Fatal
//! ```
//! The ordering drives the logger's filtering rules:
//! - `Debug` is dropped unless the pool's `debug` flag is set;
//! - everything below `Error` is dropped while `silent` is set;
//! - `Fatal` is never dropped and terminates the process.

use std::fmt;

use serde::Serialize;

/// Tag under which [`LogMessage`] payloads are journaled.
pub const LOG_TAG: &str = "sys.log";

/// Log severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Verbose diagnostics, only recorded in debug mode.
    Debug,
    /// Regular progress messages.
    Info,
    /// Messages worth highlighting but not problems.
    Important,
    /// Recoverable problems.
    Warning,
    /// Failures; still recorded while the pool is silent.
    Error,
    /// Unrecoverable failure; journaled, printed, then the process exits.
    Fatal,
}

impl Level {
    /// All levels, most verbose first.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Important,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Returns a short stable label (lowercase) for logs and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Important => "important",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by events tagged [`LOG_TAG`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogMessage {
    /// Severity of the message.
    pub level: Level,
    /// Fully rendered message text.
    pub message: String,
}

impl LogMessage {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_by_severity() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
        assert_eq!(Level::ALL.iter().max(), Some(&Level::Fatal));
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&LogMessage::new(Level::Warning, "disk")).unwrap();
        assert_eq!(json, r#"{"level":"warning","message":"disk"}"#);
    }
}
