/// Upper bound for the configurable interval, in seconds.
pub const MAX_INTERVAL: u8 = 60;

/// Interval selected at power-on.
pub const DEFAULT_INTERVAL: u8 = 20;

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// Paused; nothing moved.
    NoChange,
    /// Elapsed time moved forward by one second.
    Advanced,
    /// The countdown hit its boundary and restarted. Time to buzz.
    IntervalCompleted,
}

/// Interval timer state.
///
/// An interval of zero turns the engine into a plain stopwatch that counts up
/// forever. Any other interval counts `0..interval` and wraps, reporting
/// [`Advance::IntervalCompleted`] on the wrapping tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerEngine {
    interval: u8,
    elapsed: u32,
    laps: u32,
    running: bool,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl TimerEngine {
    /// Create a paused engine. `interval` is clamped to [`MAX_INTERVAL`].
    pub fn new(interval: u8) -> Self {
        Self {
            interval: interval.min(MAX_INTERVAL),
            elapsed: 0,
            laps: 0,
            running: false,
        }
    }

    pub fn interval(&self) -> u8 {
        self.interval
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_stopwatch(&self) -> bool {
        self.interval == 0
    }

    /// Called once per second.
    ///
    /// Laps only count the non-terminal ticks of a countdown; the tick that
    /// reaches the boundary resets `elapsed` and leaves `laps` alone.
    pub fn advance(&mut self) -> Advance {
        if !self.running {
            return Advance::NoChange;
        }

        if self.is_stopwatch() {
            self.elapsed = self.elapsed.saturating_add(1);
            return Advance::Advanced;
        }

        if self.elapsed + 1 == u32::from(self.interval) {
            self.elapsed = 0;
            Advance::IntervalCompleted
        } else {
            self.elapsed += 1;
            self.laps = self.laps.saturating_add(1);
            Advance::Advanced
        }
    }

    /// Lengthen the interval by one second, pausing and rewinding the
    /// current interval. Does nothing at [`MAX_INTERVAL`].
    pub fn increase_interval(&mut self) {
        if self.interval < MAX_INTERVAL {
            self.interval += 1;
            self.rewind();
        }
    }

    /// Shorten the interval by one second, pausing and rewinding the
    /// current interval. Does nothing at zero.
    pub fn decrease_interval(&mut self) {
        if self.interval > 0 {
            self.interval -= 1;
            self.rewind();
        }
    }

    pub fn toggle_play(&mut self) {
        self.running = !self.running;
    }

    /// Pause and clear both elapsed time and laps. The interval is kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed = 0;
        self.laps = 0;
    }

    fn rewind(&mut self) {
        self.running = false;
        self.elapsed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(interval: u8) -> TimerEngine {
        let mut engine = TimerEngine::new(interval);
        engine.toggle_play();
        engine
    }

    #[test]
    fn test_power_on_defaults() {
        let engine = TimerEngine::default();
        assert_eq!(engine.interval(), 20);
        assert_eq!(engine.elapsed(), 0);
        assert_eq!(engine.laps(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_countdown_rollover() {
        let mut engine = running(3);

        assert_eq!(engine.advance(), Advance::Advanced);
        assert_eq!((engine.elapsed(), engine.laps()), (1, 1));

        assert_eq!(engine.advance(), Advance::Advanced);
        assert_eq!((engine.elapsed(), engine.laps()), (2, 2));

        // The wrapping tick does not count as a lap.
        assert_eq!(engine.advance(), Advance::IntervalCompleted);
        assert_eq!((engine.elapsed(), engine.laps()), (0, 2));

        assert_eq!(engine.advance(), Advance::Advanced);
        assert_eq!((engine.elapsed(), engine.laps()), (1, 3));
    }

    #[test]
    fn test_one_second_interval_completes_every_tick() {
        let mut engine = running(1);
        for _ in 0..5 {
            assert_eq!(engine.advance(), Advance::IntervalCompleted);
        }
        assert_eq!(engine.elapsed(), 0);
        assert_eq!(engine.laps(), 0);
    }

    #[test]
    fn test_stopwatch_never_completes() {
        let mut engine = running(0);
        for _ in 0..500 {
            assert_eq!(engine.advance(), Advance::Advanced);
        }
        assert_eq!(engine.elapsed(), 500);
        assert_eq!(engine.laps(), 0);
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut engine = running(5);
        engine.advance();
        engine.advance();
        engine.toggle_play();

        let before = engine.clone();
        assert_eq!(engine.advance(), Advance::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_adjusting_interval_pauses_and_rewinds() {
        let mut engine = running(5);
        for _ in 0..4 {
            engine.advance();
        }
        assert_eq!(engine.elapsed(), 4);
        let laps = engine.laps();

        engine.toggle_play();
        engine.toggle_play();
        engine.increase_interval();

        assert_eq!(engine.interval(), 6);
        assert_eq!(engine.elapsed(), 0);
        assert!(!engine.is_running());
        assert_eq!(engine.laps(), laps);

        engine.toggle_play();
        engine.advance();
        engine.decrease_interval();
        assert_eq!(engine.interval(), 5);
        assert_eq!(engine.elapsed(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_clamped_adjustment_touches_nothing() {
        let mut engine = running(MAX_INTERVAL);
        engine.advance();
        let before = engine.clone();
        engine.increase_interval();
        assert_eq!(engine, before);

        let mut engine = running(0);
        engine.advance();
        let before = engine.clone();
        engine.decrease_interval();
        assert_eq!(engine, before);
    }

    #[test]
    fn test_toggle_play_only_flips_running() {
        let mut engine = running(4);
        engine.advance();
        let mut expected = engine.clone();
        expected.running = false;
        engine.toggle_play();
        assert_eq!(engine, expected);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = running(7);
        for _ in 0..10 {
            engine.advance();
        }

        engine.reset();
        let once = engine.clone();
        engine.reset();

        assert_eq!(engine, once);
        assert_eq!(engine.interval(), 7);
        assert_eq!(engine.elapsed(), 0);
        assert_eq!(engine.laps(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_new_clamps_interval() {
        assert_eq!(TimerEngine::new(200).interval(), MAX_INTERVAL);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Tick,
        Up,
        Down,
        Toggle,
        Reset,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Tick),
            1 => Just(Op::Up),
            1 => Just(Op::Down),
            1 => Just(Op::Toggle),
            1 => Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn prop_increase_never_exceeds_max(start in 0u8..=60, presses in 0usize..200) {
            let mut engine = TimerEngine::new(start);
            for _ in 0..presses {
                engine.increase_interval();
                prop_assert!(engine.interval() <= MAX_INTERVAL);
            }
        }

        #[test]
        fn prop_decrease_stops_at_zero(start in 0u8..=60, presses in 0usize..200) {
            let mut engine = TimerEngine::new(start);
            for _ in 0..presses {
                engine.decrease_interval();
            }
            prop_assert_eq!(engine.interval(), start.saturating_sub(presses.min(255) as u8));
        }

        #[test]
        fn prop_countdown_elapsed_stays_below_interval(
            start in 0u8..=60,
            ops in proptest::collection::vec(op(), 0..300),
        ) {
            let mut engine = TimerEngine::new(start);
            for op in ops {
                match op {
                    Op::Tick => { engine.advance(); }
                    Op::Up => engine.increase_interval(),
                    Op::Down => engine.decrease_interval(),
                    Op::Toggle => engine.toggle_play(),
                    Op::Reset => engine.reset(),
                }
                if !engine.is_stopwatch() {
                    prop_assert!(engine.elapsed() < u32::from(engine.interval()));
                }
            }
        }
    }
}
