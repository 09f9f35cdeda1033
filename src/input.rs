//! Button events and the gesture handling that produces them.

/// The four button events the watch reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Lengthen the interval.
    Up,
    /// Shorten the interval.
    Down,
    /// Short press: play/pause.
    Select,
    /// Select held past the long-press threshold: reset.
    SelectHeld,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Released,
    Pressed,
    Held,
}

/// Turns the raw Select line into [`Button::Select`] or
/// [`Button::SelectHeld`].
///
/// The caller owns the clock: on [`press`](Self::press) returning true it
/// arms a one-shot timer for the long-press threshold and reports expiry
/// through [`hold_elapsed`](Self::hold_elapsed). A release before expiry is a
/// click; a release after the long press fired produces nothing.
#[derive(Debug, Clone)]
pub struct SelectRecognizer {
    state: Press,
}

impl Default for SelectRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectRecognizer {
    pub const fn new() -> Self {
        Self {
            state: Press::Released,
        }
    }

    /// Button went down. Returns true when the hold timer should be armed.
    pub fn press(&mut self) -> bool {
        if self.state != Press::Released {
            return false;
        }
        self.state = Press::Pressed;
        true
    }

    /// The hold timer expired.
    pub fn hold_elapsed(&mut self) -> Option<Button> {
        if self.state != Press::Pressed {
            return None;
        }
        self.state = Press::Held;
        Some(Button::SelectHeld)
    }

    /// Button came back up.
    pub fn release(&mut self) -> Option<Button> {
        let event = match self.state {
            Press::Pressed => Some(Button::Select),
            Press::Released | Press::Held => None,
        };
        self.state = Press::Released;
        event
    }
}

/// Accepts an edge only after the line has been quiet for `window_us`.
///
/// Every edge restarts the window, accepted or not, so both the press and
/// the release of a button must be fed in. Release bounce then lands inside
/// the window opened by the release edge instead of reading as a new press.
#[derive(Debug, Clone)]
pub struct Debounce {
    window_us: u64,
    last_us: Option<u64>,
}

impl Debounce {
    pub const fn new(window_us: u64) -> Self {
        Self {
            window_us,
            last_us: None,
        }
    }

    pub fn accept(&mut self, now_us: u64) -> bool {
        let quiet = match self.last_us {
            Some(last) => now_us.saturating_sub(last) >= self.window_us,
            None => true,
        };
        self.last_us = Some(now_us);
        quiet
    }
}
