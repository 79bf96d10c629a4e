//! Foundation utilities shared by every engine subsystem

pub mod logging;
pub mod time;

pub use time::{Stopwatch, Timer};
