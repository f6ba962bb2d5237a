//! Leveled logging on top of the event pool.
//!
//! - [`Logger`]: filters by severity and journals `sys.log` events;
//! - [`Terminate`], [`ProcessExit`]: the effect run after a fatal message;
//! - [`LabelFormatter`], [`AnsiLabels`], [`PlainLabels`]: display labels for levels.

mod label;
mod leveled;
mod terminate;

pub use label::{AnsiLabels, LabelFormatter, PlainLabels};
pub use leveled::Logger;
pub use terminate::{ProcessExit, Terminate};
