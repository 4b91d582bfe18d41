use keystone_core::model::{ChannelBank, Model};
use keystone_core::{ButtonEvent, ButtonId, ColorIndex, Context, FeatureGroup, ModelError, Result};

use crate::midi::colors::{self, PALETTE};
use crate::Push;

/// Whose color the picker changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Track,
    Layer,
}

/// Color picker on the top two pad rows.
///
/// Pressing a palette pad colors the selected track or layer and restores
/// the previous view.
#[derive(Debug)]
pub struct ColorView {
    target: ColorTarget,
}

impl ColorView {
    pub fn new(target: ColorTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> ColorTarget {
        self.target
    }

    /// Palette entry of the pad at `row`/`col`
    fn palette_color(row: u8, col: u8) -> Option<ColorIndex> {
        let offset = match row {
            7 => 0,
            6 => 8,
            _ => return None,
        };
        PALETTE.get(offset + col as usize).copied()
    }

    fn bank<'m, M: Model>(&self, model: &'m M) -> &'m ChannelBank {
        match self.target {
            ColorTarget::Track => model.tracks(),
            ColorTarget::Layer => model.layers(),
        }
    }

    fn bank_mut<'m, M: Model>(&self, model: &'m mut M) -> &'m mut ChannelBank {
        match self.target {
            ColorTarget::Track => model.tracks_mut(),
            ColorTarget::Layer => model.layers_mut(),
        }
    }
}

impl<M: Model + 'static> FeatureGroup<Push<M>> for ColorView {
    fn name(&self) -> &str {
        match self.target {
            ColorTarget::Track => "Track color",
            ColorTarget::Layer => "Layer color",
        }
    }

    fn on_event(
        &mut self,
        cx: &mut Context<'_, Push<M>>,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()> {
        if event != ButtonEvent::Down {
            return Ok(());
        }
        let Some(color) = Self::palette_color(row, index) else {
            return Ok(());
        };

        let channel = self
            .bank_mut(cx.model)
            .selected_mut()
            .map_err(|_| ModelError::NoSelection)?;
        channel.set_color(color.index());
        cx.restore_view();
        Ok(())
    }

    fn button_color(&self, model: &M, id: ButtonId) -> Option<ColorIndex> {
        let ButtonId::Pad { row, col } = id else {
            return None;
        };
        let color = Self::palette_color(row, col)?;

        let current = self.bank(model).selected().map(|c| c.color());
        if current == Some(color.index()) {
            Some(colors::WHITE)
        } else {
            Some(color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::model::MemoryModel;
    use keystone_core::{Error, Request, Transition};

    type P = Push<MemoryModel>;

    #[test]
    fn test_pick_colors_selected_layer_and_restores() {
        let mut model = MemoryModel::default();
        model.layers_mut().select(2).unwrap();
        let mut requests = Vec::new();
        let mut cx = Context::<P>::new(&mut model, &mut requests);
        let mut view = ColorView::new(ColorTarget::Layer);

        // Pads below the palette do nothing
        view.on_event(&mut cx, 0, 0, ButtonEvent::Down).unwrap();
        assert!(cx.pending().is_empty());

        view.on_event(&mut cx, 6, 1, ButtonEvent::Down).unwrap();
        assert_eq!(
            cx.model.layers().channel(2).unwrap().color(),
            PALETTE[9].index()
        );
        assert_eq!(cx.model.tracks().selected().unwrap().color(), 0);
        assert_eq!(cx.pending(), &[Request::View(Transition::Restore)]);
    }

    #[test]
    fn test_pick_without_selection() {
        let mut model = MemoryModel::new(0, 0, Default::default());
        let mut requests = Vec::new();
        let mut cx = Context::<P>::new(&mut model, &mut requests);

        let result = ColorView::new(ColorTarget::Track).on_event(&mut cx, 7, 0, ButtonEvent::Down);
        assert!(matches!(result, Err(Error::Model(ModelError::NoSelection))));
        assert!(cx.pending().is_empty());
    }

    #[test]
    fn test_palette_colors() {
        let mut model = MemoryModel::default();
        model
            .tracks_mut()
            .selected_mut()
            .unwrap()
            .set_color(PALETTE[0].index());
        let view = ColorView::new(ColorTarget::Track);
        let color = |id| FeatureGroup::<P>::button_color(&view, &model, id);

        assert_eq!(color(ButtonId::pad(7, 0)), Some(colors::WHITE));
        assert_eq!(color(ButtonId::pad(7, 1)), Some(PALETTE[1]));
        assert_eq!(color(ButtonId::pad(6, 7)), Some(PALETTE[15]));
        assert_eq!(color(ButtonId::pad(5, 0)), None);
        assert_eq!(color(ButtonId::row(0, 0)), None);
    }
}
