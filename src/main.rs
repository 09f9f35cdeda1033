#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use embedded_hal::digital::v2::OutputPin;
use interval_watch::{App, Button, Config, Haptics, MatrixDisplay, VibePattern, VibeSequencer};
use rp_pico::hal::fugit::ExtU32;
use rp_pico::hal::gpio::{
    bank0::{Gpio13, Gpio14, Gpio15, Gpio22},
    FunctionSio, Interrupt, Pin, PinId, PullDown, PullUp, SioInput, SioOutput,
};
use rp_pico::hal::timer::{Alarm, Alarm2};
use rtic::app;
use rtic::Mutex;

const CONFIG: Config = Config::DEFAULT;

type ButtonPin<I> = Pin<I, FunctionSio<SioInput>, PullUp>;
type UpPin = ButtonPin<Gpio14>;
type DownPin = ButtonPin<Gpio13>;
type SelectPin = ButtonPin<Gpio15>;
type MotorPin = Pin<Gpio22, FunctionSio<SioOutput>, PullDown>;

/// Reports and clears a pending edge on a button pin.
fn take_edge<I: PinId>(pin: &mut ButtonPin<I>, edge: Interrupt) -> bool {
    if pin.interrupt_status(edge) {
        pin.clear_interrupt(edge);
        true
    } else {
        false
    }
}

/// Hands interval alerts to the vibration task without waiting for it.
struct VibeTrigger;

impl Haptics for VibeTrigger {
    fn play(&mut self, pattern: &'static VibePattern) {
        app::vibe_start::spawn(pattern).ok();
    }
}

/// Drives the motor for the next pattern segment and arms the alarm for its
/// end. Leaves the motor off once the pattern is exhausted.
fn step_vibe(
    mut vibe: impl Mutex<T = VibeSequencer>,
    mut motor: impl Mutex<T = MotorPin>,
    mut alarm: impl Mutex<T = Alarm2>,
) {
    match vibe.lock(|v| v.next_segment()) {
        Some(segment) => {
            motor.lock(|m| {
                if segment.on {
                    m.set_high().ok();
                } else {
                    m.set_low().ok();
                }
            });
            alarm.lock(|a| {
                a.schedule((segment.duration_ms * 1_000).micros()).ok();
            });
        }
        None => {
            motor.lock(|m| {
                m.set_low().ok();
            });
        }
    }
}

/// Applies one button event and schedules a redraw.
fn dispatch(
    state: &mut impl Mutex<T = App>,
    face: &mut impl Mutex<T = MatrixDisplay>,
    button: Button,
) {
    defmt::debug!("button {}", button);
    state.lock(|state| {
        face.lock(|face| {
            state.on_button(button, face);
            defmt::debug!("timer {=str}", face.timer_text());
        })
    });
    app::update_display::spawn().ok();
}

#[app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use super::*;
    use embedded_hal::digital::v2::{InputPin, ToggleableOutputPin};
    use interval_watch::display::DEVICES;
    use interval_watch::{ClockState, Debounce, SelectRecognizer};
    use max7219::MAX7219;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::RateExtU32,
        sio::Sio,
        spi::Spi,
        timer::{Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };

    // Type definition for the MAX7219 chain
    type Spi0 = Spi<rp_pico::hal::spi::Enabled, rp_pico::hal::pac::SPI0, (
        Pin<rp_pico::hal::gpio::bank0::Gpio19, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio16, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio18, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>
    )>;
    type CsPin = Pin<rp_pico::hal::gpio::bank0::Gpio17, FunctionSio<SioOutput>, PullDown>;
    type DisplayType = MAX7219<max7219::connectors::SpiConnectorSW<Spi0, CsPin>>;
    type LedPin = Pin<rp_pico::hal::gpio::bank0::Gpio25, FunctionSio<SioOutput>, PullDown>;

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        app: App,
        face: MatrixDisplay,
        select: SelectRecognizer,
        select_pin: SelectPin,
        alarm1: Alarm1,
        alarm2: Alarm2,
        vibe: VibeSequencer,
        motor: MotorPin,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        display: DisplayType,
        led: LedPin,
        alarm: Alarm0,
        clock: ClockState,
        timer: Timer,
        up: UpPin,
        down: DownPin,
        up_debounce: Debounce,
        down_debounce: Debounce,
        select_debounce: Debounce,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            CONFIG.xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        // Schedule first tick in 1 second
        alarm.schedule(CONFIG.tick_us.micros()).unwrap();
        alarm.enable_interrupt();

        let mut alarm1 = timer.alarm_1().unwrap();
        alarm1.enable_interrupt();
        let mut alarm2 = timer.alarm_2().unwrap();
        alarm2.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();
        let mut motor = pins.gpio22.into_push_pull_output();
        motor.set_low().ok();

        let up = pins.gpio14.into_pull_up_input();
        let down = pins.gpio13.into_pull_up_input();
        let select_pin = pins.gpio15.into_pull_up_input();
        // Release edges only feed the debounce so release bounce is not
        // taken for another press.
        for edge in [Interrupt::EdgeLow, Interrupt::EdgeHigh] {
            up.set_interrupt_enabled(edge, true);
            down.set_interrupt_enabled(edge, true);
        }
        // Select needs both edges: press arms the long-press alarm, release
        // decides between click and hold.
        select_pin.set_interrupt_enabled(Interrupt::EdgeLow, true);
        select_pin.set_interrupt_enabled(Interrupt::EdgeHigh, true);

        let mosi = pins.gpio19.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let sck = pins.gpio18.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let miso = pins.gpio16.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            CONFIG.spi_freq_hz.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut display = MAX7219::from_spi_cs(DEVICES, spi, cs).unwrap();
        display.power_on().unwrap();
        for i in 0..DEVICES {
            display.set_intensity(i, CONFIG.matrix_intensity).unwrap();
            display.clear_display(i).unwrap();
        }

        let (hours, mins, secs) = CONFIG.initial_time;
        let clock = ClockState::new(hours, mins, secs);

        let mut app = App::new(&CONFIG);
        let mut face = MatrixDisplay::new();
        app.start(clock.seconds_of_day(), &mut face);
        update_display::spawn().ok();

        defmt::info!("interval watch up, interval {=u8}s", app.engine().interval());

        (
            Shared {
                app,
                face,
                select: SelectRecognizer::new(),
                select_pin,
                alarm1,
                alarm2,
                vibe: VibeSequencer::new(),
                motor,
            },
            Local {
                display,
                led,
                alarm,
                clock,
                timer,
                up,
                down,
                up_debounce: Debounce::new(CONFIG.debounce_us),
                down_debounce: Debounce::new(CONFIG.debounce_us),
                select_debounce: Debounce::new(CONFIG.debounce_us),
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [app, face], local = [alarm, led, clock])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        // Clear interrupt and schedule next
        ctx.local.alarm.clear_interrupt();
        ctx.local.alarm.schedule(CONFIG.tick_us.micros()).ok();

        ctx.local.led.toggle().ok();

        ctx.local.clock.tick();
        let now = ctx.local.clock.seconds_of_day();

        let face = &mut ctx.shared.face;
        let outcome = ctx
            .shared
            .app
            .lock(|app| {
                face.lock(|face| {
                    let outcome = app.on_tick(now, face, &mut VibeTrigger);
                    defmt::debug!("timer {=str}", face.timer_text());
                    outcome
                })
            });
        defmt::trace!("tick {}", outcome);

        update_display::spawn().ok();
    }

    // Hardware Task: GPIO Interrupt (any button edge)
    #[task(
        binds = IO_IRQ_BANK0,
        priority = 1,
        shared = [app, face, select, select_pin, alarm1],
        local = [timer, up, down, up_debounce, down_debounce, select_debounce]
    )]
    fn button_press(mut ctx: button_press::Context) {
        let now = ctx.local.timer.get_counter().ticks();

        if take_edge(ctx.local.up, Interrupt::EdgeHigh) {
            ctx.local.up_debounce.accept(now);
        }
        if take_edge(ctx.local.up, Interrupt::EdgeLow) && ctx.local.up_debounce.accept(now) {
            dispatch(&mut ctx.shared.app, &mut ctx.shared.face, Button::Up);
        }

        if take_edge(ctx.local.down, Interrupt::EdgeHigh) {
            ctx.local.down_debounce.accept(now);
        }
        if take_edge(ctx.local.down, Interrupt::EdgeLow) && ctx.local.down_debounce.accept(now) {
            dispatch(&mut ctx.shared.app, &mut ctx.shared.face, Button::Down);
        }

        let (pressed, released) = ctx.shared.select_pin.lock(|pin| {
            (
                take_edge(pin, Interrupt::EdgeLow),
                take_edge(pin, Interrupt::EdgeHigh),
            )
        });

        if pressed && ctx.local.select_debounce.accept(now) && ctx.shared.select.lock(|s| s.press()) {
            ctx.shared.alarm1.lock(|a| {
                a.clear_interrupt();
                a.schedule(CONFIG.long_press_us.micros()).ok();
            });
        }

        if released && ctx.local.select_debounce.accept(now) {
            if let Some(button) = ctx.shared.select.lock(|s| s.release()) {
                ctx.shared.alarm1.lock(|a| {
                    a.cancel().ok();
                });
                dispatch(&mut ctx.shared.app, &mut ctx.shared.face, button);
            }
        }
    }

    // Hardware Task: Select long-press threshold (Timer 1)
    #[task(binds = TIMER_IRQ_1, priority = 1, shared = [app, face, select, select_pin, alarm1])]
    fn long_press(mut ctx: long_press::Context) {
        ctx.shared.alarm1.lock(|a| a.clear_interrupt());

        let is_held = ctx.shared.select_pin.lock(|b| b.is_low().unwrap_or(false));

        // A release edge swallowed by the debounce still ends the press here.
        let event = ctx.shared.select.lock(|s| {
            if is_held {
                s.hold_elapsed()
            } else {
                s.release()
            }
        });

        if let Some(button) = event {
            dispatch(&mut ctx.shared.app, &mut ctx.shared.face, button);
        }
    }

    // Software Task: start an alert pattern
    #[task(shared = [vibe, motor, alarm2])]
    fn vibe_start(mut ctx: vibe_start::Context, pattern: &'static VibePattern) {
        defmt::info!("interval complete, buzzing");
        ctx.shared.vibe.lock(|v| v.play(pattern));
        step_vibe(ctx.shared.vibe, ctx.shared.motor, ctx.shared.alarm2);
    }

    // Hardware Task: next alert segment (Timer 2)
    #[task(binds = TIMER_IRQ_2, priority = 1, shared = [vibe, motor, alarm2])]
    fn vibe_step(mut ctx: vibe_step::Context) {
        ctx.shared.alarm2.lock(|a| a.clear_interrupt());
        step_vibe(ctx.shared.vibe, ctx.shared.motor, ctx.shared.alarm2);
    }

    // Software Task: push the face to the modules when it changed
    #[task(shared = [face], local = [display])]
    fn update_display(mut ctx: update_display::Context) {
        let buffers = ctx.shared.face.lock(|face| {
            if !face.take_dirty() {
                return None;
            }
            defmt::trace!("flush, clock {=str}", face.clock_text());
            Some(face.device_buffers())
        });

        if let Some(buffers) = buffers {
            let display = ctx.local.display;
            for (dev_idx, buffer) in buffers.iter().enumerate() {
                display.write_raw(dev_idx, buffer).ok();
            }
        }
    }
}
