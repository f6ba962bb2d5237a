//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for demos or as a live tail of the journal.
//!
//! ## Example output
//! ```text
//! 14:02:11 inf probing 12 hosts
//! 14:02:12 [wifi.ap.new] {"ssid":"lab"}
//! 14:02:13 err connection refused
//! 14:02:13 [net.tick]
//! ```

use async_trait::async_trait;
use chrono::Local;

use crate::events::{Event, Payload};
use crate::logger::{AnsiLabels, LabelFormatter, PlainLabels};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
pub struct LogWriter {
    labels: Box<dyn LabelFormatter>,
}

impl LogWriter {
    /// Construct a writer with ANSI colored labels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_labels(Box::new(AnsiLabels))
    }

    /// Construct a writer without terminal styling.
    #[must_use]
    pub fn plain() -> Self {
        Self::with_labels(Box::new(PlainLabels))
    }

    #[must_use]
    pub fn with_labels(labels: Box<dyn LabelFormatter>) -> Self {
        Self { labels }
    }

    /// Renders one line for `e` (without trailing newline).
    pub fn render(&self, e: &Event) -> String {
        let time = e.at().with_timezone(&Local).format("%H:%M:%S");
        if let (Some(label), Some(msg)) = (e.label(self.labels.as_ref()), e.log_message()) {
            return format!("{time} {label} {}", msg.message);
        }
        match e.payload() {
            Payload::Empty => format!("{time} [{}]", e.tag()),
            Payload::Text(text) => format!("{time} [{}] {text}", e.tag()),
            Payload::Json(value) => format!("{time} [{}] {value}", e.tag()),
            Payload::Log(msg) => format!("{time} [{}] {}", e.tag(), msg.message),
        }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", self.render(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventPool, PoolConfig};
    use crate::events::{LOG_TAG, Level, LogMessage};

    #[test]
    fn test_render_shapes() {
        let pool = EventPool::new(PoolConfig::default());
        let writer = LogWriter::plain();

        let log = pool.add(LOG_TAG, LogMessage::new(Level::Error, "connection refused"));
        let json = pool.add("wifi.ap.new", serde_json::json!({"ssid": "lab"}));
        let empty = pool.add("net.tick", ());

        assert!(writer.render(&log).ends_with(" err connection refused"));
        assert!(writer.render(&json).ends_with(r#" [wifi.ap.new] {"ssid":"lab"}"#));
        assert!(writer.render(&empty).ends_with(" [net.tick]"));
    }
}
