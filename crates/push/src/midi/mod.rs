//! Push MIDI handling.
//!
//! Handles pad/encoder/button input, long presses and LED feedback.

mod led_feedback;
mod long_press;
mod mapping;

pub use led_feedback::{colors, LedState};
pub use long_press::LongPressDetector;
pub use mapping::{PushMapping, SurfaceInput};
