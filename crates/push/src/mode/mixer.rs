use keystone_core::model::{Channel, Model, RangedValue};
use keystone_core::{
    ButtonEvent, ButtonId, ColorIndex, Context, Display, FeatureGroup, FunctionButton,
    ParameterElement, Result,
};

use super::{function_color, on_track_rows, selectable, track_row_color, KnobTouch};
use crate::Push;

/// Track parameter edited across the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelParameter {
    Volume,
    Pan,
}

impl ChannelParameter {
    fn of(self, channel: &Channel) -> &RangedValue {
        match self {
            ChannelParameter::Volume => channel.volume(),
            ChannelParameter::Pan => channel.pan(),
        }
    }

    fn of_mut(self, channel: &mut Channel) -> &mut RangedValue {
        match self {
            ChannelParameter::Volume => channel.volume_mut(),
            ChannelParameter::Pan => channel.pan_mut(),
        }
    }

    fn function_button(self) -> FunctionButton {
        match self {
            ChannelParameter::Volume => FunctionButton::Volume,
            ChannelParameter::Pan => FunctionButton::Pan,
        }
    }
}

/// One parameter of all tracks, knob `i` editing track `i`.
#[derive(Debug)]
pub struct ChannelParameterMode {
    parameter: ChannelParameter,
    touched: KnobTouch,
}

impl ChannelParameterMode {
    pub fn new(parameter: ChannelParameter) -> Self {
        Self {
            parameter,
            touched: KnobTouch::default(),
        }
    }

    pub fn parameter(&self) -> ChannelParameter {
        self.parameter
    }
}

impl<M: Model + 'static> FeatureGroup<Push<M>> for ChannelParameterMode {
    fn name(&self) -> &str {
        match self.parameter {
            ChannelParameter::Volume => "Volume",
            ChannelParameter::Pan => "Pan",
        }
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
        // Knobs without a track are not an error
        if let Ok(channel) = cx.model.tracks_mut().channel_mut(index) {
            self.parameter.of_mut(channel).change_value(value, &changer);
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
        function_color(self.parameter.function_button(), button)
            .or_else(|| track_row_color(model, button))
    }

    fn update_display(&self, model: &M, display: Display<'_>) {
        let tracks = model.tracks();
        match display {
            Display::Text(d) => {
                d.clear();
                for (i, channel) in tracks.channels().enumerate().take(8) {
                    let value = self.parameter.of(channel);
                    d.set_cell(0, i, value.name())
                        .set_cell(1, i, &value.displayed_value())
                        .set_cell(3, i, &selectable(channel.name(), tracks.selected_index() == Some(i)));
                }
            }
            Display::Graphic(d) => {
                let changer = model.value_changer();
                d.clear();
                for i in 0..8 {
                    match tracks.channel(i) {
                        Some(channel) => {
                            let value = self.parameter.of(channel);
                            d.add_parameter(
                                ParameterElement::new(
                                    channel.name(),
                                    value.value(changer),
                                    value.displayed_value(),
                                )
                                .touched(self.touched.is_touched(i)),
                            );
                        }
                        None => d.add_empty(),
                    }
                }
            }
        }
    }
}
