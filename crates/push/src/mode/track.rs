use keystone_core::model::Model;
use keystone_core::{
    ButtonEvent, ButtonId, ColorIndex, Context, Display, FeatureGroup, FunctionButton,
    ParameterElement, Result,
};

use super::{function_color, on_track_rows, selectable, track_row_color, KnobTouch};
use crate::Push;

/// Mix controls of the selected track.
///
/// Knob 0 changes the volume and knob 1 the panorama of the selected track.
/// The button rows select and mute tracks.
#[derive(Debug, Default)]
pub struct TrackMode {
    touched: KnobTouch,
}

impl TrackMode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Model + 'static> FeatureGroup<Push<M>> for TrackMode {
    fn name(&self) -> &str {
        "Track"
    }

    fn on_event(
        &mut self,
        cx: &mut Context<'_, Push<M>>,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()> {
        on_track_rows(cx.model, row, index, event)
    }

    fn on_knob(&mut self, cx: &mut Context<'_, Push<M>>, index: usize, value: u8) -> Result<()> {
        let changer = *cx.model.value_changer();
        let track = cx.model.tracks_mut().selected_mut()?;
        match index {
            0 => track.volume_mut().change_value(value, &changer),
            1 => track.pan_mut().change_value(value, &changer),
            _ => {}
        }
        Ok(())
    }

    fn on_knob_touch(
        &mut self,
        _cx: &mut Context<'_, Push<M>>,
        index: usize,
        touched: bool,
    ) -> Result<()> {
        self.touched.set(index, touched);
        Ok(())
    }

    fn button_color(&self, model: &M, button: ButtonId) -> Option<ColorIndex> {
        function_color(FunctionButton::Track, button).or_else(|| track_row_color(model, button))
    }

    fn update_display(&self, model: &M, display: Display<'_>) {
        let tracks = model.tracks();
        let Some(track) = tracks.selected() else {
            match display {
                Display::Text(d) => {
                    d.set_message(1, "Please select a track...");
                }
                Display::Graphic(d) => d.set_message(3, "Please select a track..."),
            }
            return;
        };

        match display {
            Display::Text(d) => {
                d.clear();
                d.set_cell(0, 0, "Volume").set_cell(1, 0, &track.volume().displayed_value());
                d.set_cell(0, 1, "Pan").set_cell(1, 1, &track.pan().displayed_value());
                d.set_block(2, 0, &format!("Track: {}", track.name()));
                for (i, channel) in tracks.channels().enumerate().take(8) {
                    let selected = tracks.selected_index() == Some(i);
                    d.set_cell(3, i, &selectable(channel.name(), selected));
                }
            }
            Display::Graphic(d) => {
                let changer = model.value_changer();
                d.clear();
                d.add_parameter(
                    ParameterElement::new(
                        track.volume().name(),
                        track.volume().value(changer),
                        track.volume().displayed_value(),
                    )
                    .touched(self.touched.is_touched(0)),
                );
                d.add_parameter(
                    ParameterElement::new(
                        track.pan().name(),
                        track.pan().value(changer),
                        track.pan().displayed_value(),
                    )
                    .touched(self.touched.is_touched(1)),
                );
                for _ in 2..8 {
                    d.add_empty();
                }
            }
        }
    }
}
