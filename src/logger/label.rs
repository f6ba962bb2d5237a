//! # Level labels.
//!
//! Rendering a human-readable label for a log event is delegated to a
//! [`LabelFormatter`]. The journal never stores labels; it only asks the
//! formatter when [`Event::label`](crate::Event::label) is called.

use crate::events::Level;

const RESET: &str = "\x1b[0m";

/// Maps a severity level to a display label and a style token.
pub trait LabelFormatter: Send + Sync {
    /// Short label for `level`.
    fn label(&self, level: Level) -> &str;

    /// Style prefix (e.g. an ANSI escape) applied before the label.
    fn style(&self, _level: Level) -> &str {
        ""
    }

    /// Suffix that undoes [`style`](Self::style).
    fn reset(&self) -> &str {
        ""
    }
}

fn short_label(level: Level) -> &'static str {
    match level {
        Level::Debug => "dbg",
        Level::Info => "inf",
        Level::Important => "imp",
        Level::Warning => "war",
        Level::Error => "err",
        Level::Fatal => "!!!",
    }
}

/// Three-letter labels without styling.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainLabels;

impl LabelFormatter for PlainLabels {
    fn label(&self, level: Level) -> &str {
        short_label(level)
    }
}

/// Three-letter labels on ANSI colored backgrounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiLabels;

impl LabelFormatter for AnsiLabels {
    fn label(&self, level: Level) -> &str {
        short_label(level)
    }

    fn style(&self, level: Level) -> &str {
        match level {
            Level::Debug => "\x1b[2m\x1b[30m\x1b[100m",
            Level::Info => "\x1b[97m\x1b[42m",
            Level::Important => "\x1b[97m\x1b[104m",
            Level::Warning => "\x1b[97m\x1b[43m",
            Level::Error => "\x1b[97m\x1b[41m",
            Level::Fatal => "\x1b[1m\x1b[97m\x1b[41m",
        }
    }

    fn reset(&self) -> &str {
        RESET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_wraps_label() {
        let fmt = AnsiLabels;
        for level in Level::ALL {
            let rendered = format!("{}{}{}", fmt.style(level), fmt.label(level), fmt.reset());
            assert!(rendered.starts_with("\x1b["));
            assert!(rendered.ends_with(RESET));
            assert!(rendered.contains(PlainLabels.label(level)));
        }
    }
}
