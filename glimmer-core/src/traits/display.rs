//! Character display capability trait

/// Character cell size of the display's font.
///
/// Nearly all HD44780-class modules use 5x8; a few one-row modules
/// offer 5x10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 5x8 dot character cells (the common case)
    #[default]
    Dots5x8,
    /// 5x10 dot character cells
    Dots5x10,
}

/// Trait for a text-mode display on a shared bus
///
/// This is the seam between `DisplayController` and the hardware: a
/// cursor-addressed character grid with a binary backlight. Every bus
/// transaction can fail, so all mutating operations return the
/// implementation's bus error.
///
/// Implementations keep their own character RAM; `display_off` hides
/// the glyphs without clearing them.
pub trait CharDisplay {
    /// Error type for bus operations
    type Error;

    /// Address a zero-length transaction to the device to check it is
    /// present and responding. Must not alter display state.
    fn probe(&mut self) -> Result<(), Self::Error>;

    /// Run the device's power-on initialization sequence.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Blank the character RAM and home the cursor.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to a zero-based (row, column) position.
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Write one character at the cursor; the cursor advances one cell.
    fn write_char(&mut self, ch: char) -> Result<(), Self::Error>;

    /// Show the character RAM contents.
    fn display_on(&mut self) -> Result<(), Self::Error>;

    /// Hide all glyphs. Character RAM is preserved and reappears on
    /// `display_on`.
    fn display_off(&mut self) -> Result<(), Self::Error>;

    /// Switch the backlight on.
    fn backlight_on(&mut self) -> Result<(), Self::Error>;

    /// Switch the backlight off.
    fn backlight_off(&mut self) -> Result<(), Self::Error>;

    /// Current backlight state as last commanded.
    fn backlight_state(&self) -> bool;
}
