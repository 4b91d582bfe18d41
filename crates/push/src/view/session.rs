use keystone_core::model::Model;
use keystone_core::{ButtonEvent, ButtonId, ColorIndex, Context, FeatureGroup, Result};

use crate::midi::colors;
use crate::{Push, Views};

const SELECT_ROW: u8 = 0;
const MUTE_ROW: u8 = 1;
const SOLO_ROW: u8 = 2;

/// Track overview on the pads, one column per track.
///
/// The bottom row selects a track on release; holding it opens the color
/// picker for that track. The next two rows toggle mute and solo.
#[derive(Debug, Default)]
pub struct SessionView;

impl SessionView {
    pub fn new() -> Self {
        Self
    }
}

impl<M: Model + 'static> FeatureGroup<Push<M>> for SessionView {
    fn name(&self) -> &str {
        "Session"
    }

    fn on_event(
        &mut self,
        cx: &mut Context<'_, Push<M>>,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()> {
        let track = index as usize;
        if track >= cx.model.tracks().len() {
            return Ok(());
        }

        match (row, event) {
            (SELECT_ROW, ButtonEvent::Up) => cx.model.tracks_mut().select(track)?,
            (SELECT_ROW, ButtonEvent::Long) => {
                cx.model.tracks_mut().select(track)?;
                cx.activate_view_temporarily(Views::ColorTrack);
            }
            (MUTE_ROW, ButtonEvent::Down) => cx.model.tracks_mut().channel_mut(track)?.toggle_mute(),
            (SOLO_ROW, ButtonEvent::Down) => cx.model.tracks_mut().channel_mut(track)?.toggle_solo(),
            _ => {}
        }
        Ok(())
    }

    fn button_color(&self, model: &M, id: ButtonId) -> Option<ColorIndex> {
        let ButtonId::Pad { row, col } = id else {
            return None;
        };
        let tracks = model.tracks();
        let track = tracks.channel(col as usize)?;

        match row {
            SELECT_ROW if tracks.selected_index() == Some(col as usize) => Some(colors::WHITE),
            SELECT_ROW if track.color() == 0 => Some(colors::WHITE_DIM),
            SELECT_ROW => Some(ColorIndex(track.color())),
            MUTE_ROW if track.is_mute() => Some(colors::ORANGE),
            MUTE_ROW => Some(colors::ORANGE_DIM),
            SOLO_ROW if track.is_solo() => Some(colors::BLUE),
            SOLO_ROW => Some(colors::BLUE_DIM),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::model::MemoryModel;
    use keystone_core::{Request, Transition};

    type P = Push<MemoryModel>;

    #[test]
    fn test_pad_rows() {
        let mut model = MemoryModel::default();
        let mut requests = Vec::new();
        let mut cx = Context::<P>::new(&mut model, &mut requests);
        let mut view = SessionView::new();

        view.on_event(&mut cx, 0, 4, ButtonEvent::Down).unwrap();
        assert_eq!(cx.model.tracks().selected_index(), Some(0));
        view.on_event(&mut cx, 0, 4, ButtonEvent::Up).unwrap();
        assert_eq!(cx.model.tracks().selected_index(), Some(4));

        view.on_event(&mut cx, 1, 2, ButtonEvent::Down).unwrap();
        view.on_event(&mut cx, 2, 3, ButtonEvent::Down).unwrap();
        assert!(cx.model.tracks().channel(2).unwrap().is_mute());
        assert!(cx.model.tracks().channel(3).unwrap().is_solo());
        assert!(cx.pending().is_empty());
    }

    #[test]
    fn test_long_press_opens_color_picker() {
        let mut model = MemoryModel::default();
        let mut requests = Vec::new();
        let mut cx = Context::<P>::new(&mut model, &mut requests);

        SessionView::new()
            .on_event(&mut cx, 0, 5, ButtonEvent::Long)
            .unwrap();
        assert_eq!(cx.model.tracks().selected_index(), Some(5));
        assert_eq!(
            cx.pending(),
            &[Request::View(Transition::ActivateTemporarily(Views::ColorTrack))]
        );
    }

    #[test]
    fn test_pad_colors_follow_tracks() {
        let mut model = MemoryModel::new(2, 0, Default::default());
        model.tracks_mut().channel_mut(1).unwrap().set_color(colors::GREEN.index());
        model.tracks_mut().channel_mut(1).unwrap().set_mute(true);
        let view = SessionView::new();
        let color = |id| FeatureGroup::<P>::button_color(&view, &model, id);

        assert_eq!(color(ButtonId::pad(0, 0)), Some(colors::WHITE));
        assert_eq!(color(ButtonId::pad(0, 1)), Some(colors::GREEN));
        assert_eq!(color(ButtonId::pad(1, 1)), Some(colors::ORANGE));
        assert_eq!(color(ButtonId::pad(2, 0)), Some(colors::BLUE_DIM));
        // No track in column 2, and rows above the solo row are unused
        assert_eq!(color(ButtonId::pad(0, 2)), None);
        assert_eq!(color(ButtonId::pad(5, 0)), None);
    }
}
