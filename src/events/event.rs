//! # Journaled events.
//!
//! An [`Event`] is an immutable record made of a `tag`, a creation timestamp,
//! a per-pool sequence number and a [`Payload`]. The tag names the category of
//! the event; the payload variant carries its data.
//!
//! ## Ordering
//! `seq` is assigned by the owning pool under its lock and increases strictly
//! with every `add`. Timestamps come from the wall clock and may tie; `seq`
//! breaks ties when the pool sorts history.
//!
//! ## Example
//! ```rust
//! use eventpool::{EventPool, Payload, PoolConfig};
//!
//! let pool = EventPool::new(PoolConfig::default());
//! let ev = pool.add("wifi.ap.new", serde_json::json!({ "ssid": "lab" }));
//!
//! assert_eq!(ev.tag(), "wifi.ap.new");
//! assert!(matches!(ev.payload(), Payload::Json(_)));
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::level::{LOG_TAG, LogMessage};
use crate::error::PoolError;
use crate::logger::LabelFormatter;

/// Data attached to an [`Event`].
///
/// The set of shapes is closed; host-defined structured data goes into
/// [`Payload::Json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Structured log line (tag `sys.log`).
    Log(LogMessage),
    /// Free-form text.
    Text(Arc<str>),
    /// Host-defined structured data.
    Json(Arc<serde_json::Value>),
    /// Tag-only event.
    Empty,
}

impl From<LogMessage> for Payload {
    fn from(msg: LogMessage) -> Self {
        Payload::Log(msg)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.into())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text.into())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(Arc::new(value))
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Empty
    }
}

/// Immutable journal record.
///
/// Cheap to clone: tag and payload data are reference counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    #[serde(skip)]
    seq: u64,
    tag: Arc<str>,
    #[serde(rename = "time")]
    at: DateTime<Utc>,
    #[serde(rename = "data")]
    payload: Payload,
}

impl Event {
    /// Creates an event stamped with the current time.
    pub(crate) fn new(seq: u64, tag: Arc<str>, payload: Payload) -> Self {
        Self {
            seq,
            tag,
            at: Utc::now(),
            payload,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_time(seq: u64, tag: &str, at: DateTime<Utc>) -> Self {
        Self {
            seq,
            tag: tag.into(),
            at,
            payload: Payload::Empty,
        }
    }

    /// Sequence number assigned by the owning pool.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Event category.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Creation time.
    #[inline]
    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// True for `sys.log` events carrying a [`LogMessage`].
    #[inline]
    pub fn is_log(&self) -> bool {
        self.log_message().is_some()
    }

    /// Returns the log payload if this is a `sys.log` event.
    pub fn log_message(&self) -> Option<&LogMessage> {
        match &self.payload {
            Payload::Log(msg) if &*self.tag == LOG_TAG => Some(msg),
            _ => None,
        }
    }

    /// Renders the styled level label of a log event.
    ///
    /// Returns `style + label + reset` as provided by `fmt`, or `None` when the
    /// event is not a log event.
    pub fn label(&self, fmt: &dyn LabelFormatter) -> Option<String> {
        let level = self.log_message()?.level;
        Some(format!(
            "{}{}{}",
            fmt.style(level),
            fmt.label(level),
            fmt.reset()
        ))
    }

    /// Serializes the event as `{"tag":..,"time":..,"data":..}`.
    pub fn to_json(&self) -> Result<String, PoolError> {
        serde_json::to_string(self).map_err(PoolError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Level;
    use crate::logger::PlainLabels;

    #[test]
    fn test_log_message_requires_log_tag() {
        let msg = LogMessage::new(Level::Info, "hi");
        let tagged = Event::new(0, LOG_TAG.into(), msg.clone().into());
        let other = Event::new(1, "net.probe".into(), msg.into());

        assert!(tagged.is_log());
        assert!(!other.is_log());
        assert!(other.label(&PlainLabels).is_none());
    }

    #[test]
    fn test_label_uses_formatter() {
        let ev = Event::new(0, LOG_TAG.into(), LogMessage::new(Level::Error, "x").into());
        assert_eq!(ev.label(&PlainLabels).as_deref(), Some("err"));
    }

    #[test]
    fn test_json_shape() {
        let ev = Event::new(7, "wifi.ap.new".into(), serde_json::json!({"ssid": "lab"}).into());
        let value: serde_json::Value = serde_json::from_str(&ev.to_json().unwrap()).unwrap();

        assert_eq!(value["tag"], "wifi.ap.new");
        assert_eq!(value["data"]["ssid"], "lab");
        assert!(value["time"].is_string());
        assert!(value.get("seq").is_none());
    }

    #[test]
    fn test_empty_payload_serializes_as_null() {
        let ev = Event::new(0, "tick".into(), ().into());
        let value: serde_json::Value = serde_json::from_str(&ev.to_json().unwrap()).unwrap();
        assert!(value["data"].is_null());
    }
}
