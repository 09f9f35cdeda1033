/// Free-running wall clock, advanced by the 1 Hz tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    pub hours: u8,
    pub mins: u8,
    pub secs: u8,
}

impl ClockState {
    pub fn new(hours: u8, mins: u8, secs: u8) -> Self {
        Self {
            hours: hours % 24,
            mins: mins % 60,
            secs: secs % 60,
        }
    }

    /// Increments the second, rolling into minutes and hours.
    pub fn tick(&mut self) {
        self.secs += 1;
        if self.secs >= 60 {
            self.secs = 0;
            self.add_minute();
        }
    }

    /// Increments the minute. Handles rollover to hours.
    pub fn add_minute(&mut self) {
        self.mins += 1;
        if self.mins >= 60 {
            self.mins = 0;
            self.hours = (self.hours + 1) % 24;
        }
    }

    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.mins) * 60 + u32::from(self.secs)
    }
}

/// Remembers which wall-clock minute was last rendered so the clock field is
/// redrawn once per minute instead of once per tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSampler {
    last_sampled_minute: Option<u32>,
}

impl ClockSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the minute bucket of `now_secs` when it differs from the last
    /// one returned, `None` otherwise.
    pub fn sample(&mut self, now_secs: u32) -> Option<u32> {
        let minute = now_secs / 60;
        if self.last_sampled_minute == Some(minute) {
            return None;
        }
        self.last_sampled_minute = Some(minute);
        Some(minute)
    }
}
