//! Board and behaviour constants.

use crate::timer::DEFAULT_INTERVAL;

/// Compile-time configuration for the watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Pico crystal.
    pub xtal_freq_hz: u32,
    pub tick_us: u32,
    /// Select must be held this long to reset.
    pub long_press_us: u32,
    pub debounce_us: u64,
    pub spi_freq_hz: u32,
    /// 0x0..=0xF
    pub matrix_intensity: u8,
    /// Wall-clock time at power-on as (hours, minutes, seconds).
    pub initial_time: (u8, u8, u8),
    pub use_24h: bool,
    pub default_interval: u8,
}

impl Config {
    pub const DEFAULT: Config = Config {
        xtal_freq_hz: 12_000_000,
        tick_us: 1_000_000,
        long_press_us: 500_000,
        debounce_us: 30_000,
        spi_freq_hz: 2_000_000,
        matrix_intensity: 0x0,
        initial_time: (12, 34, 56),
        use_24h: true,
        default_interval: DEFAULT_INTERVAL,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
