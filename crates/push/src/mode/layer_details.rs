use keystone_core::model::Model;
use keystone_core::{
    button_row_index, ButtonEvent, ButtonId, ColorIndex, Context, Display, FeatureGroup,
    FunctionButton, OptionElement, Result,
};

use super::function_color;
use crate::midi::colors::{self, button};
use crate::{Push, Views};

const NO_LAYER: &str = "Please select a layer...";

/// Details of the selected device layer or drum pad.
///
/// Row 0 toggles activation, mute and solo and opens the color picker. On
/// drum pad banks row 1 clears mute and solo of all pads.
#[derive(Debug, Default)]
pub struct LayerDetailsMode;

impl LayerDetailsMode {
    pub fn new() -> Self {
        Self
    }
}

impl<M: Model + 'static> FeatureGroup<Push<M>> for LayerDetailsMode {
    fn name(&self) -> &str {
        "Layer details"
    }

    fn on_event(
        &mut self,
        cx: &mut Context<'_, Push<M>>,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()> {
        if event != ButtonEvent::Up {
            return Ok(());
        }

        if (row, index) == (0, 7) {
            if cx.model.layers().selected().is_some() {
                cx.activate_view_temporarily(Views::ColorLayer);
            }
            return Ok(());
        }

        let layers = cx.model.layers_mut();
        match (row, index) {
            (0, _) => {
                let Ok(layer) = layers.selected_mut() else {
                    return Ok(());
                };
                match index {
                    0 => layer.toggle_activated(),
                    2 => layer.toggle_mute(),
                    3 => layer.toggle_solo(),
                    _ => {}
                }
            }
            (1, 6) if layers.is_drum_pad_bank() => layers.clear_mute()?,
            (1, 7) if layers.is_drum_pad_bank() => layers.clear_solo()?,
            _ => {}
        }
        Ok(())
    }

    fn button_color(&self, model: &M, id: ButtonId) -> Option<ColorIndex> {
        if let Some(color) = function_color(FunctionButton::Device, id) {
            return Some(color);
        }

        let layers = model.layers();
        let layer = layers.selected()?;

        if let Some(index) = button_row_index(0, id) {
            return Some(match index {
                0 if layer.is_activated() => colors::YELLOW,
                0 => colors::YELLOW_DIM,
                2 if layer.is_mute() => colors::ORANGE,
                2 => colors::ORANGE_DIM,
                3 if layer.is_solo() => colors::ORANGE,
                3 => colors::ORANGE_DIM,
                7 => colors::GREEN,
                _ => button::OFF,
            });
        }

        match button_row_index(1, id)? {
            6 | 7 if layers.is_drum_pad_bank() => Some(button::COLOR2_ON),
            _ => Some(button::OFF),
        }
    }

    fn update_display(&self, model: &M, display: Display<'_>) {
        let Some(layer) = model.layers().selected() else {
            match display {
                Display::Text(d) => {
                    d.set_message(1, NO_LAYER);
                }
                Display::Graphic(d) => d.set_message(3, NO_LAYER),
            }
            return;
        };

        let on_off = |on: bool| if on { "On" } else { "Off" };

        match display {
            Display::Text(d) => {
                d.clear();
                let name = layer.name();
                d.set_block(0, 0, &format!("Layer: {}", name));
                if let Some((split, _)) = name.char_indices().nth(10) {
                    d.set_block(0, 1, &name[split..]);
                }
                d.set_cell(2, 0, "Active").set_cell(3, 0, on_off(layer.is_activated()));
                d.set_cell(2, 2, "Mute").set_cell(3, 2, on_off(layer.is_mute()));
                d.set_cell(2, 3, "Solo").set_cell(3, 3, on_off(layer.is_solo()));
                d.set_cell(0, 6, "Clr Mute").set_cell(0, 7, "Clr Solo");
                d.set_cell(2, 7, "Select").set_cell(3, 7, "Color");
            }
            Display::Graphic(d) => {
                d.clear();
                d.add_option(
                    OptionElement::new(format!("Layer: {}", layer.name()))
                        .bottom("Active", layer.is_activated()),
                );
                d.add_empty();
                d.add_option(OptionElement::new("").bottom("Mute", layer.is_mute()));
                d.add_option(OptionElement::new("").bottom("Solo", layer.is_solo()));
                d.add_empty();
                d.add_empty();
                d.add_option(OptionElement::new("").top("Clear Mute", false));
                d.add_option(
                    OptionElement::new("")
                        .top("Clear Solo", false)
                        .bottom("Select Color", false),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{GraphicDisplayModel, TextDisplayBuffer};
    use keystone_core::model::{BankKind, MemoryModel};
    use keystone_core::{ModelError, Request, Transition};

    type P = Push<MemoryModel>;

    #[test]
    fn test_first_row_toggles_selected_layer() {
        let mut model = MemoryModel::default();
        let mut requests = Vec::new();
        let mut cx = Context::<P>::new(&mut model, &mut requests);
        let mut mode = LayerDetailsMode::new();

        mode.on_event(&mut cx, 0, 0, ButtonEvent::Up).unwrap();
        mode.on_event(&mut cx, 0, 2, ButtonEvent::Up).unwrap();
        mode.on_event(&mut cx, 0, 3, ButtonEvent::Down).unwrap();

        let layer = cx.model.layers().selected().unwrap();
        assert!(!layer.is_activated());
        assert!(layer.is_mute());
        assert!(!layer.is_solo());
    }

    #[test]
    fn test_color_button_requests_color_view() {
        let mut model = MemoryModel::default();
        let mut requests = Vec::new();
        let mut cx = Context::<P>::new(&mut model, &mut requests);

        LayerDetailsMode::new()
            .on_event(&mut cx, 0, 7, ButtonEvent::Up)
            .unwrap();
        assert_eq!(
            cx.pending(),
            &[Request::View(Transition::ActivateTemporarily(Views::ColorLayer))]
        );
    }

    #[test]
    fn test_clear_only_on_drum_pads() {
        let mut model = MemoryModel::default();
        model.layers_mut().channel_mut(1).unwrap().set_mute(true);
        let mut requests = Vec::new();
        let mut mode = LayerDetailsMode::new();

        {
            let mut cx = Context::<P>::new(&mut model, &mut requests);
            mode.on_event(&mut cx, 1, 6, ButtonEvent::Up).unwrap();
        }
        assert!(model.layers().channel(1).unwrap().is_mute());
        assert_eq!(
            FeatureGroup::<P>::button_color(&mode, &model, ButtonId::row(1, 6)),
            Some(button::OFF)
        );

        model.layers_mut().set_kind(BankKind::DrumPads);
        {
            let mut cx = Context::<P>::new(&mut model, &mut requests);
            mode.on_event(&mut cx, 1, 6, ButtonEvent::Up).unwrap();
        }
        assert!(!model.layers().channel(1).unwrap().is_mute());
        assert_eq!(
            FeatureGroup::<P>::button_color(&mode, &model, ButtonId::row(1, 6)),
            Some(button::COLOR2_ON)
        );
        assert_eq!(model.layers_mut().clear_solo(), Ok(()));
        assert_eq!(
            keystone_core::model::ChannelBank::new(BankKind::Layers, Vec::new()).clear_mute(),
            Err(ModelError::DrumPadsOnly)
        );
    }

    #[test]
    fn test_no_selection() {
        let model = MemoryModel::new(8, 0, Default::default());
        let mode = LayerDetailsMode::new();

        let mut text = TextDisplayBuffer::new();
        FeatureGroup::<P>::update_display(&mode, &model, Display::Text(&mut text));
        assert_eq!(text.row(1).trim(), NO_LAYER);

        let mut graphic = GraphicDisplayModel::new();
        FeatureGroup::<P>::update_display(&mode, &model, Display::Graphic(&mut graphic));
        assert_eq!(graphic.message(), Some((3, NO_LAYER)));

        // Without a layer only the function button is lit
        assert_eq!(FeatureGroup::<P>::button_color(&mode, &model, ButtonId::row(0, 0)), None);
        assert_eq!(
            FeatureGroup::<P>::button_color(
                &mode,
                &model,
                ButtonId::Function(FunctionButton::Device)
            ),
            Some(button::HI)
        );
    }

    #[test]
    fn test_display_with_layer() {
        let model = MemoryModel::default();
        let mode = LayerDetailsMode::new();

        let mut text = TextDisplayBuffer::new();
        FeatureGroup::<P>::update_display(&mode, &model, Display::Text(&mut text));
        assert!(text.row(0).starts_with("Layer: Layer 1"));
        assert!(text.row(3).starts_with("On"));

        let mut graphic = GraphicDisplayModel::new();
        FeatureGroup::<P>::update_display(&mode, &model, Display::Graphic(&mut graphic));
        assert_eq!(graphic.elements().len(), 8);
    }
}
