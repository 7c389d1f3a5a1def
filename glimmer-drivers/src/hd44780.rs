//! HD44780 character LCD driver (PCF8574 I2C backpack)
//!
//! Drives the common HD44780-class modules (16x2, 20x4) through the
//! 8-bit PCF8574 expander found on I2C backpacks. The expander maps
//! its pins to the LCD's control lines and the upper data nibble, so
//! every byte reaches the controller as two 4-bit transfers framed by
//! an enable pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use glimmer_core::traits::{CharDisplay, Font};

/// PCF8574 pin assignments on the standard backpack
mod pin {
    /// Register select: 0 = command, 1 = character data
    pub const RS: u8 = 0x01;
    /// Enable strobe; data is latched on the falling edge
    pub const EN: u8 = 0x04;
    /// Backlight transistor
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instruction set
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_INCREMENT: u8 = 0x02;

    // Display control flags
    pub const DISPLAY_ON: u8 = 0x04;

    // Function set flags
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X10: u8 = 0x04;
    pub const MODE_8BIT: u8 = 0x10;
}

/// HD44780 LCD behind a PCF8574 I2C backpack
///
/// Owns the bus handle and a delay source. [`CharDisplay::init`] must
/// run before any drawing operation; the backlight defaults to on,
/// which is the usual operating mode.
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    columns: u8,
    rows: u8,
    font: Font,
    backlight: bool,
    showing: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver for the module at the given 7-bit address
    ///
    /// Backpacks ship at 0x27 or 0x3F depending on the expander
    /// variant. No bus traffic happens here.
    pub fn new(i2c: I2C, delay: D, address: u8, columns: u8, rows: u8, font: Font) -> Self {
        Self {
            i2c,
            delay,
            address,
            columns,
            rows,
            font,
            backlight: true,
            showing: true,
        }
    }

    /// Consume the driver, returning the bus handle and delay source
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            pin::BACKLIGHT
        } else {
            0
        }
    }

    /// Put a raw value on the expander pins, keeping the backlight bit
    fn expander_write(&mut self, bits: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[bits | self.backlight_bit()])
    }

    /// Transfer one nibble (in the high four bits) with an enable pulse
    fn write4bits(&mut self, bits: u8) -> Result<(), I2C::Error> {
        self.expander_write(bits | pin::EN)?;
        // Enable pulse width, >450 ns
        self.delay.delay_us(1);
        self.expander_write(bits & !pin::EN)?;
        // Command execution time
        self.delay.delay_us(50);
        Ok(())
    }

    /// Send a full byte as two nibble transfers
    fn send(&mut self, byte: u8, rs: u8) -> Result<(), I2C::Error> {
        self.write4bits((byte & 0xf0) | rs)?;
        self.write4bits((byte << 4) | rs)
    }

    fn command(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.send(byte, 0)
    }

    fn display_control(&mut self) -> Result<(), I2C::Error> {
        let on = if self.showing { cmd::DISPLAY_ON } else { 0 };
        self.command(cmd::DISPLAY_CONTROL | on)
    }

    /// DDRAM address of a (row, col) cell
    ///
    /// Rows 0/1 start at 0x00/0x40; on four-row modules rows 2/3
    /// continue the first two lines, offset by the column count.
    fn ddram_addr(&self, row: u8, col: u8) -> u8 {
        let row_offset = match row {
            0 => 0x00,
            1 => 0x40,
            2 => self.columns,
            _ => 0x40 + self.columns,
        };
        row_offset + col
    }
}

impl<I2C, D> CharDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn probe(&mut self) -> Result<(), Self::Error> {
        // Zero-length transaction: the device either acknowledges its
        // address or the bus reports a NACK.
        self.i2c.write(self.address, &[])
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        // Power-on settle time before the controller accepts commands
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        // Datasheet reset-by-instruction: the controller may be in
        // 8-bit or 4-bit mode, so force 8-bit three times, then switch
        // to 4-bit.
        let mode_8bit = cmd::FUNCTION_SET | cmd::MODE_8BIT;
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(4500);
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(4500);
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(150);
        self.write4bits(cmd::FUNCTION_SET)?;

        let mut function = cmd::FUNCTION_SET;
        if self.rows > 1 {
            function |= cmd::TWO_LINE;
        }
        // The 5x10 font only exists on one-row modules
        if self.font == Font::Dots5x10 && self.rows == 1 {
            function |= cmd::FONT_5X10;
        }
        self.command(function)?;

        self.showing = true;
        self.display_control()?;
        self.clear()?;
        // Left-to-right entry, no display shift
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_INCREMENT)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.command(cmd::CLEAR_DISPLAY)?;
        // Clear is the slowest instruction on this controller
        self.delay.delay_ms(2);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        let addr = self.ddram_addr(row, col);
        self.command(cmd::SET_DDRAM_ADDR | addr)
    }

    fn write_char(&mut self, ch: char) -> Result<(), Self::Error> {
        // The CGROM is ASCII-compatible; anything else renders as the
        // filled cell.
        let byte = if ch.is_ascii() { ch as u8 } else { 0xFF };
        self.send(byte, pin::RS)
    }

    fn display_on(&mut self) -> Result<(), Self::Error> {
        self.showing = true;
        self.display_control()
    }

    fn display_off(&mut self) -> Result<(), Self::Error> {
        self.showing = false;
        self.display_control()
    }

    fn backlight_on(&mut self) -> Result<(), Self::Error> {
        self.backlight = true;
        self.expander_write(0)
    }

    fn backlight_off(&mut self) -> Result<(), Self::Error> {
        self.backlight = false;
        self.expander_write(0)
    }

    fn backlight_state(&self) -> bool {
        self.backlight
    }
}
