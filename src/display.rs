use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;

use crate::app::Screen;
use crate::format::CLOCK_TEXT_LEN;

/// Panel width in pixels (four 8x8 modules).
pub const WIDTH: usize = 32;
/// Panel height in pixels (two rows of modules).
pub const HEIGHT: usize = 16;
/// Number of MAX7219 modules, top row left to right, then bottom row.
pub const DEVICES: usize = (WIDTH / 8) * (HEIGHT / 8);

/// Raw register contents for each chained MAX7219.
pub type DeviceBuffers = [[u8; 8]; DEVICES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Clock,
    Timer,
}

impl Field {
    fn top(self) -> usize {
        match self {
            Field::Clock => 0,
            Field::Timer => 8,
        }
    }
}

/// 1-bit frame, one `u32` per row, bit 31 is the leftmost column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Frame {
    rows: [u32; HEIGHT],
}

impl Frame {
    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.rows[y] & (1u32 << (31 - x)) != 0
    }

    fn set(&mut self, x: usize, y: usize, on: bool) {
        let bit = 1u32 << (31 - x);
        if on {
            self.rows[y] |= bit;
        } else {
            self.rows[y] &= !bit;
        }
    }

    fn clear_strip(&mut self, field: Field) {
        for row in &mut self.rows[field.top()..field.top() + 8] {
            *row = 0;
        }
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                if x < WIDTH && y < HEIGHT {
                    self.set(x, y, color.is_on());
                }
            }
        }
        Ok(())
    }
}

/// The watch face on a 32x16 MAX7219 panel.
///
/// The clock occupies the top strip and the timer the bottom strip. Each
/// field caches its text so identical refreshes leave the frame untouched;
/// [`take_dirty`](Self::take_dirty) tells the caller whether the modules need
/// rewriting.
#[derive(Debug, Clone)]
pub struct MatrixDisplay {
    frame: Frame,
    clock: String<CLOCK_TEXT_LEN>,
    timer: String<CLOCK_TEXT_LEN>,
    dirty: bool,
}

impl Default for MatrixDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixDisplay {
    pub fn new() -> Self {
        Self {
            frame: Frame::default(),
            clock: String::new(),
            timer: String::new(),
            dirty: true,
        }
    }

    pub fn clock_text(&self) -> &str {
        &self.clock
    }

    pub fn timer_text(&self) -> &str {
        &self.timer
    }

    /// Returns whether the frame changed since the last call, and clears the
    /// flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Packs the frame for the module chain, FC16 layout.
    pub fn device_buffers(&self) -> DeviceBuffers {
        let mut buffers = [[0u8; 8]; DEVICES];
        for (dev_idx, buffer) in buffers.iter_mut().enumerate() {
            let top = (dev_idx / 4) * 8;
            let shift = 24 - (dev_idx % 4) * 8;
            for (r, byte) in buffer.iter_mut().enumerate() {
                *byte = ((self.frame.rows[top + r] >> shift) & 0xFF) as u8;
            }
        }
        buffers
    }

    fn draw(&mut self, field: Field, text: &str) {
        let cached = match field {
            Field::Clock => &mut self.clock,
            Field::Timer => &mut self.timer,
        };
        if cached.as_str() == text {
            return;
        }
        cached.clear();
        let _ = cached.push_str(text);

        self.frame.clear_strip(field);
        let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let origin = Point::new(WIDTH as i32 / 2, field.top() as i32 + 1);
        let _ = Text::with_text_style(text, origin, style, layout).draw(&mut self.frame);
        self.dirty = true;
    }
}

impl Screen for MatrixDisplay {
    fn show_clock(&mut self, text: &str) {
        self.draw(Field::Clock, text);
    }

    fn show_timer(&mut self, text: &str) {
        self.draw(Field::Timer, text);
    }
}
