//! Push modes.
//!
//! A mode owns the display and the two button rows next to it, and receives
//! the encoder input.

mod layer_details;
mod mixer;
mod track;
mod transport;

pub use layer_details::LayerDetailsMode;
pub use mixer::{ChannelParameter, ChannelParameterMode};
pub use track::TrackMode;
pub use transport::TransportMode;

use keystone_core::model::Model;
use keystone_core::{button_row_index, ButtonEvent, ButtonId, ColorIndex, FunctionButton, Result};

use crate::display::glyphs;
use crate::midi::colors::button;

/// Touch state of the eight encoders.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct KnobTouch([bool; 8]);

impl KnobTouch {
    pub(crate) fn set(&mut self, index: usize, touched: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = touched;
        }
    }

    pub(crate) fn is_touched(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }
}

/// Row 0 selects a track, row 1 toggles its mute. Both act on release;
/// buttons without a track are ignored.
pub(crate) fn on_track_rows<M: Model>(
    model: &mut M,
    row: u8,
    index: u8,
    event: ButtonEvent,
) -> Result<()> {
    let index = index as usize;
    if event != ButtonEvent::Up || index >= model.tracks().len() {
        return Ok(());
    }

    match row {
        0 => model.tracks_mut().select(index)?,
        1 => model.tracks_mut().channel_mut(index)?.toggle_mute(),
        _ => {}
    }
    Ok(())
}

/// Colors of the track selection and mute rows.
pub(crate) fn track_row_color<M: Model>(model: &M, button: ButtonId) -> Option<ColorIndex> {
    let tracks = model.tracks();
    if let Some(index) = button_row_index(0, button) {
        let index = index as usize;
        return Some(match tracks.channel(index) {
            None => button::OFF,
            Some(_) if tracks.selected_index() == Some(index) => button::HI,
            Some(_) => button::ON,
        });
    }

    let index = button_row_index(1, button)? as usize;
    Some(match tracks.channel(index) {
        None => button::OFF,
        Some(channel) if channel.is_mute() => button::COLOR2_HI,
        Some(_) => button::COLOR2_ON,
    })
}

/// The function button that selects a mode is lit while the mode is active.
pub(crate) fn function_color(own: FunctionButton, button: ButtonId) -> Option<ColorIndex> {
    (button == ButtonId::Function(own)).then_some(button::HI)
}

/// Prefix `label` with the selection arrow when `selected`.
pub(crate) fn selectable(label: &str, selected: bool) -> String {
    let marker = if selected { glyphs::SELECT_ARROW } else { ' ' };
    format!("{}{}", marker, label)
}
