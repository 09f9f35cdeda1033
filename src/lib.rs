//! Interval timer / stopwatch for a two-line LED matrix watch.
//!
//! Everything here is board-agnostic and runs on the host under `cargo test`.
//! The RP2040 firmware in `main.rs` only wires interrupts to [`app::App`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alert;
pub mod app;
pub mod clock;
pub mod config;
pub mod display;
pub mod format;
pub mod input;
pub mod timer;

pub use alert::{Haptics, VibePattern, VibeSequencer, ALERT_PATTERN};
pub use app::{App, Screen};
pub use clock::{ClockSampler, ClockState};
pub use config::Config;
pub use display::MatrixDisplay;
pub use input::{Button, Debounce, SelectRecognizer};
pub use timer::{Advance, TimerEngine};
