//! Hardware driver implementations
//!
//! Concrete implementations of the `CharDisplay` trait from
//! `glimmer-core`:
//!
//! - `Hd44780`: HD44780-class character LCDs behind a PCF8574 I2C
//!   backpack (the ubiquitous 16x2 / 20x4 modules)

#![no_std]
#![deny(unsafe_code)]

pub mod hd44780;

pub use hd44780::Hd44780;
