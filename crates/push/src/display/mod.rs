//! Push display subsystem.
//!
//! Push 1 has a 4x68 character display, Push 2 a graphic display that is fed
//! one element per column.

mod graphic;
mod text;

pub use graphic::{Element, GraphicDisplayModel};
pub use text::{glyphs, TextDisplayBuffer};
