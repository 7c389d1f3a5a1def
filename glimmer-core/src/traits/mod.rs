//! Hardware abstraction traits
//!
//! These traits define the interface between the text/fade logic and
//! hardware-specific display drivers.

pub mod display;

pub use display::{CharDisplay, Font};
