//! Display-agnostic core logic for Glimmer
//!
//! This crate contains everything that does not depend on a specific
//! LCD module or bus expander:
//!
//! - The `CharDisplay` capability trait (what a character display must do)
//! - `DisplayController`: line-wrapped text placement and the backlight
//!   fade effect, generic over any `CharDisplay` implementation
//!
//! Concrete hardware drivers live in `glimmer-drivers`.

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod traits;

pub use controller::DisplayController;
pub use traits::{CharDisplay, Font};
