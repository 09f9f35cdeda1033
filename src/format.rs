//! Text for the two display fields.

use core::fmt::Write;

use heapless::String;

use crate::timer::TimerEngine;

/// Visible width of the timer field.
pub const TIMER_TEXT_LEN: usize = 5;

/// Capacity of the clock field.
pub const CLOCK_TEXT_LEN: usize = 8;

pub type TimerText = String<TIMER_TEXT_LEN>;
pub type ClockText = String<CLOCK_TEXT_LEN>;

/// Render the timer field.
///
/// A stopwatch shows `MM:SS`. A countdown shows `II:EE`, the configured
/// interval followed by the seconds elapsed in the current interval; it
/// is not a remaining-time readout.
///
/// Inputs beyond two digits per side cannot come out of [`TimerEngine`] in
/// practice; if they do, the text is truncated to the field width.
pub fn format_timer(engine: &TimerEngine) -> TimerText {
    let (left, right) = if engine.is_stopwatch() {
        let elapsed = engine.elapsed();
        (elapsed / 60, elapsed % 60)
    } else {
        (u32::from(engine.interval()), engine.elapsed())
    };

    let mut text = TimerText::new();
    let _ = write!(text, "{:02}:{:02}", left, right);
    text
}

/// Render the clock field from a wall-clock minute count.
///
/// Only the minute of the day matters, so both minutes-since-midnight and
/// minutes-since-epoch work. The 12-hour form is zero padded (`01:05`).
pub fn format_clock(minutes: u32, use_24h: bool) -> ClockText {
    let minute_of_day = minutes % (24 * 60);
    let hours = minute_of_day / 60;
    let mins = minute_of_day % 60;

    let hours = if use_24h {
        hours
    } else {
        match hours % 12 {
            0 => 12,
            h => h,
        }
    };

    let mut text = ClockText::new();
    let _ = write!(text, "{:02}:{:02}", hours, mins);
    text
}
