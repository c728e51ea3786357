//! Pulse evaluation and the check pipeline

pub mod evaluator;
pub mod monitor;

pub use evaluator::{evaluate, LastPush, PulseError, PulseStatus, FLATLINE_THRESHOLD_HOURS};
pub use monitor::{alert_message, CheckOutcome, PulseMonitor};
