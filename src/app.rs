//! Event dispatch: ticks and buttons in, display text and alerts out.

use crate::alert::{Haptics, ALERT_PATTERN};
use crate::clock::ClockSampler;
use crate::config::Config;
use crate::format::{format_clock, format_timer};
use crate::input::Button;
use crate::timer::{Advance, TimerEngine};

/// The two text fields of the watch face.
pub trait Screen {
    fn show_clock(&mut self, text: &str);
    fn show_timer(&mut self, text: &str);
}

/// Owns all mutable watch state. The firmware keeps exactly one of these
/// behind a single lock.
#[derive(Debug, Clone)]
pub struct App {
    engine: TimerEngine,
    sampler: ClockSampler,
    use_24h: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: TimerEngine::new(config.default_interval),
            sampler: ClockSampler::new(),
            use_24h: config.use_24h,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Draw both fields for the first time.
    pub fn start<S: Screen>(&mut self, now_secs: u32, screen: &mut S) {
        self.refresh_clock(now_secs, screen);
        self.refresh_timer(screen);
    }

    /// One-second tick.
    pub fn on_tick<S, H>(&mut self, now_secs: u32, screen: &mut S, haptics: &mut H) -> Advance
    where
        S: Screen,
        H: Haptics,
    {
        let outcome = self.engine.advance();
        if outcome == Advance::IntervalCompleted {
            haptics.play(&ALERT_PATTERN);
        }
        self.refresh_timer(screen);
        self.refresh_clock(now_secs, screen);
        outcome
    }

    pub fn on_button<S: Screen>(&mut self, button: Button, screen: &mut S) {
        match button {
            Button::Up => self.engine.increase_interval(),
            Button::Down => self.engine.decrease_interval(),
            Button::Select => self.engine.toggle_play(),
            Button::SelectHeld => self.engine.reset(),
        }
        self.refresh_timer(screen);
    }

    fn refresh_timer<S: Screen>(&self, screen: &mut S) {
        screen.show_timer(&format_timer(&self.engine));
    }

    fn refresh_clock<S: Screen>(&mut self, now_secs: u32, screen: &mut S) {
        if let Some(minute) = self.sampler.sample(now_secs) {
            screen.show_clock(&format_clock(minute, self.use_24h));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::VibePattern;

    #[derive(Default)]
    struct RecordingScreen {
        clock: Vec<String>,
        timer: Vec<String>,
    }

    impl Screen for RecordingScreen {
        fn show_clock(&mut self, text: &str) {
            self.clock.push(text.into());
        }

        fn show_timer(&mut self, text: &str) {
            self.timer.push(text.into());
        }
    }

    #[derive(Default)]
    struct CountingHaptics {
        plays: usize,
    }

    impl Haptics for CountingHaptics {
        fn play(&mut self, pattern: &'static VibePattern) {
            assert_eq!(pattern.durations_ms, &[200, 50, 300, 50, 400]);
            self.plays += 1;
        }
    }

    fn app_with_interval(interval: u8) -> App {
        App::new(&Config {
            default_interval: interval,
            ..Config::DEFAULT
        })
    }

    #[test]
    fn test_start_draws_both_fields() {
        let mut app = App::new(&Config::DEFAULT);
        let mut screen = RecordingScreen::default();

        app.start(12 * 3600 + 34 * 60 + 56, &mut screen);

        assert_eq!(screen.clock, ["12:34"]);
        assert_eq!(screen.timer, ["20:00"]);
    }

    #[test]
    fn test_tick_refreshes_timer_every_second_and_clock_per_minute() {
        let mut app = App::new(&Config::DEFAULT);
        let mut screen = RecordingScreen::default();
        let mut haptics = CountingHaptics::default();

        app.start(58, &mut screen);
        app.on_tick(59, &mut screen, &mut haptics);
        app.on_tick(60, &mut screen, &mut haptics);
        app.on_tick(61, &mut screen, &mut haptics);

        assert_eq!(screen.timer.len(), 4);
        assert_eq!(screen.clock, ["00:00", "00:01"]);
    }

    #[test]
    fn test_completed_interval_buzzes_once() {
        let mut app = app_with_interval(3);
        let mut screen = RecordingScreen::default();
        let mut haptics = CountingHaptics::default();

        app.on_button(Button::Select, &mut screen);
        let outcomes: Vec<Advance> = (0..3)
            .map(|s| app.on_tick(s, &mut screen, &mut haptics))
            .collect();

        assert_eq!(
            outcomes,
            [Advance::Advanced, Advance::Advanced, Advance::IntervalCompleted]
        );
        assert_eq!(haptics.plays, 1);
        assert_eq!(screen.timer, ["03:00", "03:01", "03:02", "03:00"]);
        assert_eq!(app.engine().laps(), 2);
    }

    #[test]
    fn test_stopwatch_never_buzzes() {
        let mut app = app_with_interval(0);
        let mut screen = RecordingScreen::default();
        let mut haptics = CountingHaptics::default();

        app.on_button(Button::Select, &mut screen);
        for s in 0..600 {
            app.on_tick(s, &mut screen, &mut haptics);
        }

        assert_eq!(haptics.plays, 0);
        assert_eq!(screen.timer.last().map(String::as_str), Some("10:00"));
    }

    #[test]
    fn test_paused_tick_still_refreshes_timer() {
        let mut app = App::new(&Config::DEFAULT);
        let mut screen = RecordingScreen::default();
        let mut haptics = CountingHaptics::default();

        assert_eq!(app.on_tick(0, &mut screen, &mut haptics), Advance::NoChange);
        assert_eq!(screen.timer, ["20:00"]);
    }

    #[test]
    fn test_each_button_refreshes_timer_once() {
        let mut app = App::new(&Config::DEFAULT);
        let mut screen = RecordingScreen::default();

        app.on_button(Button::Up, &mut screen);
        app.on_button(Button::Down, &mut screen);
        app.on_button(Button::Down, &mut screen);
        app.on_button(Button::Select, &mut screen);
        app.on_button(Button::SelectHeld, &mut screen);

        assert_eq!(screen.timer, ["21:00", "20:00", "19:00", "19:00", "19:00"]);
        assert!(screen.clock.is_empty());
        assert!(!app.engine().is_running());
    }

    #[test]
    fn test_twelve_hour_clock() {
        let mut app = App::new(&Config {
            use_24h: false,
            ..Config::DEFAULT
        });
        let mut screen = RecordingScreen::default();

        app.start(15 * 3600 + 7 * 60, &mut screen);
        assert_eq!(screen.clock, ["03:07"]);
    }
}
