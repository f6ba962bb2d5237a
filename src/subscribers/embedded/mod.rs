//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos.
//!
//! - [`LogWriter`]: prints events in a human-readable form.

mod log;

pub use log::LogWriter;
