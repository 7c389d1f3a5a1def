//! High-level display controller
//!
//! Wraps a [`CharDisplay`] implementation with two conveniences:
//!
//! - `write`: place an arbitrary string on the fixed-width grid,
//!   wrapping at the configured column count and on newlines, with an
//!   explicit truncate policy once the last row is full.
//! - `fade_out` / `fade_in`: a perceived backlight dimming effect,
//!   produced by pulsing the binary backlight with a sliding duty
//!   cycle (software PWM).
//!
//! Everything here is synchronous and blocking; a fade occupies the
//! calling context for its full duration. That is intentional: this
//! layer targets the single control thread of a microcontroller, where
//! a cosmetic transition is allowed to own the CPU.

use embedded_hal::delay::DelayNs;

use crate::traits::CharDisplay;

/// Default fade duration in milliseconds
const DEFAULT_FADE_TIME_MS: u16 = 500;

/// Fade-capable text layer over a character display
///
/// The controller exclusively owns the driver and a delay source. After
/// construction, [`start`](Self::start) must succeed before any other
/// operation is meaningful; no other operation checks this.
///
/// # Example
///
/// ```ignore
/// let lcd = Hd44780::new(i2c, delay_a, 0x27, 16, 2, Font::default());
/// let mut ctrl = DisplayController::new(lcd, delay_b, 16, 2);
/// ctrl.start()?;
/// ctrl.write("Hello\nWorld")?;
/// ```
pub struct DisplayController<D, DELAY> {
    driver: D,
    delay: DELAY,
    columns: u8,
    rows: u8,
    fade_time_ms: u16,
    fade_on_update: bool,
    clear_on_update: bool,
}

impl<D, DELAY> DisplayController<D, DELAY>
where
    D: CharDisplay,
    DELAY: DelayNs,
{
    /// Create a controller for a `columns` x `rows` display
    ///
    /// Takes ownership of the driver and the delay source. Performs no
    /// bus traffic; call [`start`](Self::start) before anything else.
    ///
    /// Defaults: 500 ms fade time, fade-on-update off, clear-on-update
    /// on.
    pub fn new(driver: D, delay: DELAY, columns: u8, rows: u8) -> Self {
        Self {
            driver,
            delay,
            columns,
            rows,
            fade_time_ms: DEFAULT_FADE_TIME_MS,
            fade_on_update: false,
            clear_on_update: true,
        }
    }

    /// Probe the device and run its initialization sequence
    ///
    /// The probe is a zero-length bus transaction; if no device
    /// acknowledges, the bus error is returned and the driver is left
    /// untouched. The controller is unusable until this succeeds.
    pub fn start(&mut self) -> Result<(), D::Error> {
        self.driver.probe()?;
        self.driver.init()
    }

    /// Show the display contents (after [`display_off`](Self::display_off))
    pub fn display_on(&mut self) -> Result<(), D::Error> {
        self.driver.display_on()
    }

    /// Hide the display contents without clearing them
    ///
    /// The driver's character RAM is preserved; everything written so
    /// far reappears on [`display_on`](Self::display_on). Backlight is
    /// unaffected.
    pub fn display_off(&mut self) -> Result<(), D::Error> {
        self.driver.display_off()
    }

    /// Switch the backlight on (discrete, no fade)
    pub fn backlight_on(&mut self) -> Result<(), D::Error> {
        self.driver.backlight_on()
    }

    /// Switch the backlight off (discrete, no fade)
    pub fn backlight_off(&mut self) -> Result<(), D::Error> {
        self.driver.backlight_off()
    }

    /// Backlight state as last commanded through the driver
    pub fn backlight_state(&self) -> bool {
        self.driver.backlight_state()
    }

    /// Place a string on the display, wrapping across rows
    ///
    /// Behavior:
    ///
    /// - If fade-on-update is enabled, a full [`fade_out`](Self::fade_out)
    ///   runs before the display is touched and a full
    ///   [`fade_in`](Self::fade_in) after.
    /// - If clear-on-update is enabled (the default), the display is
    ///   cleared first; otherwise new text overlays whatever is there.
    /// - Writing starts at row 0, column 0. A line wraps to the next
    ///   row when it holds `columns` characters, or early at a `'\n'`.
    ///   The wrap check precedes the write, so the character that
    ///   forces a wrap becomes the first character of the new row.
    ///   Newlines are never drawn.
    /// - Truncate policy: once a wrap would move past the last row,
    ///   the remainder of the input is dropped and the call returns
    ///   `Ok`.
    pub fn write(&mut self, text: &str) -> Result<(), D::Error> {
        if self.fade_on_update {
            self.fade_out()?;
        }

        if self.clear_on_update {
            self.driver.clear()?;
        }
        self.driver.set_cursor(0, 0)?;

        let mut row: u8 = 0;
        let mut col: u8 = 0;
        for ch in text.chars() {
            if col == self.columns || ch == '\n' {
                row += 1;
                if row >= self.rows {
                    break;
                }
                col = 0;
                self.driver.set_cursor(row, 0)?;
            }
            if ch != '\n' {
                self.driver.write_char(ch)?;
                col += 1;
            }
        }

        if self.fade_on_update {
            self.fade_in()?;
        }
        Ok(())
    }

    /// Write a string verbatim starting at (row, col)
    ///
    /// No newline interpretation, no wrapping, no clearing. The caller
    /// is responsible for keeping `row`, `col`, and the text length
    /// inside the display geometry.
    pub fn write_at(&mut self, text: &str, row: u8, col: u8) -> Result<(), D::Error> {
        self.driver.set_cursor(row, col)?;
        for ch in text.chars() {
            self.driver.write_char(ch)?;
        }
        Ok(())
    }

    /// Set the duration used by subsequent fades, in milliseconds
    ///
    /// Zero is legal and makes fades degenerate (no pulsing at all).
    /// No upper bound: a fade blocks for roughly `ms * ms`
    /// microseconds, so large values stall the caller noticeably.
    pub fn fade_time(&mut self, ms: u16) {
        self.fade_time_ms = ms;
    }

    /// Bracket every [`write`](Self::write) with a fade-out/fade-in
    pub fn fade_on_update(&mut self, enabled: bool) {
        self.fade_on_update = enabled;
    }

    /// Clear the display before every [`write`](Self::write)
    pub fn clear_on_update(&mut self, enabled: bool) {
        self.clear_on_update = enabled;
    }

    /// Fade the backlight out over the configured duration
    ///
    /// One pulse per elapsed millisecond of the configured time: the
    /// off-phase hold grows from 0 to `fade_time_ms` microseconds
    /// while the on-phase hold shrinks to match, so the duty cycle
    /// slides from fully on to fully off. The backlight is forced off
    /// afterwards, including for a zero fade time.
    ///
    /// Blocks the caller for the whole effect.
    pub fn fade_out(&mut self) -> Result<(), D::Error> {
        let period = u32::from(self.fade_time_ms);
        for i in 0..period {
            self.driver.backlight_off()?;
            self.delay.delay_us(i);
            self.driver.backlight_on()?;
            self.delay.delay_us(period - i);
        }
        self.driver.backlight_off()
    }

    /// Fade the backlight in over the configured duration
    ///
    /// Mirror of [`fade_out`](Self::fade_out): the off-phase hold
    /// shrinks while the on-phase hold grows, ending with the final
    /// pulse leaving the backlight on. With a zero fade time the
    /// backlight state is left untouched.
    pub fn fade_in(&mut self) -> Result<(), D::Error> {
        let period = u32::from(self.fade_time_ms);
        for i in 0..period {
            self.driver.backlight_off()?;
            self.delay.delay_us(period - i);
            self.driver.backlight_on()?;
            self.delay.delay_us(i);
        }
        Ok(())
    }

    /// Borrow the underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the underlying driver
    ///
    /// Escape hatch for driver capabilities this layer does not wrap.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the controller, returning the driver and delay source
    pub fn release(self) -> (D, DELAY) {
        (self.driver, self.delay)
    }
}
