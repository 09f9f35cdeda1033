//! Haptic alert pattern and the sequencer that plays it.

/// On/off vibration pattern. Segments alternate starting with "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VibePattern {
    pub durations_ms: &'static [u32],
}

/// Played when a countdown interval completes.
pub const ALERT_PATTERN: VibePattern = VibePattern {
    durations_ms: &[200, 50, 300, 50, 400],
};

/// Fire-and-forget haptic output.
///
/// Implementations must return immediately; playback happens in the
/// background and failures are never reported back.
pub trait Haptics {
    fn play(&mut self, pattern: &'static VibePattern);
}

/// One step of a pattern: drive the motor `on` for `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    pub on: bool,
    pub duration_ms: u32,
}

/// Steps through a [`VibePattern`] one segment at a time.
///
/// The firmware calls [`next_segment`](Self::next_segment) from a timer
/// interrupt, sets the motor pin and schedules the next interrupt for the
/// returned duration. `None` means the pattern is over and the motor must be
/// off.
#[derive(Debug, Clone, Default)]
pub struct VibeSequencer {
    pattern: Option<&'static VibePattern>,
    index: usize,
}

impl VibeSequencer {
    pub const fn new() -> Self {
        Self {
            pattern: None,
            index: 0,
        }
    }

    /// Start `pattern` from its first segment, abandoning any pattern in
    /// progress.
    pub fn play(&mut self, pattern: &'static VibePattern) {
        self.pattern = Some(pattern);
        self.index = 0;
    }

    pub fn stop(&mut self) {
        self.pattern = None;
        self.index = 0;
    }

    pub fn next_segment(&mut self) -> Option<Segment> {
        let pattern = self.pattern?;
        match pattern.durations_ms.get(self.index) {
            Some(&duration_ms) => {
                let on = self.index % 2 == 0;
                self.index += 1;
                Some(Segment { on, duration_ms })
            }
            None => {
                self.stop();
                None
            }
        }
    }
}
