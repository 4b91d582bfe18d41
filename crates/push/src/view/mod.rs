//! Push views.
//!
//! A view owns the 8x8 pad grid. Pad rows are passed as the button row,
//! row 0 being the bottom row.

mod color;
mod session;

pub use color::{ColorTarget, ColorView};
pub use session::SessionView;
