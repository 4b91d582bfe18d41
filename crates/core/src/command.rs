use crate::config::Settings;
use crate::event::ButtonEvent;
use crate::feature_group::Surface;
use crate::model::Model;
use crate::surface::ControlSurface;
use crate::Result;

/// Channel faders with touch sensing
const TOUCH_FADERS: usize = 8;

/// Fader touch: shows the volume mode while a channel fader is touched.
///
/// Touching switches to the volume mode temporarily and releasing restores
/// the previous mode. With `use_faders_as_knobs` the touch is handed to the
/// active mode as a knob touch instead. With `touch_channel` touching also
/// selects the fader's track.
pub struct FaderTouchCommand<S: Surface> {
    index: usize,
    volume_mode: S::ModeId,
}

impl<S> FaderTouchCommand<S>
where
    S: Surface,
    S::Model: Model,
{
    pub fn new(index: usize, volume_mode: S::ModeId) -> Self {
        Self { index, volume_mode }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn execute(
        &self,
        surface: &mut ControlSurface<S>,
        event: ButtonEvent,
        settings: &Settings,
    ) -> Result<()> {
        if self.index < TOUCH_FADERS {
            if settings.use_faders_as_knobs {
                return surface.handle_knob_touch(self.index, event == ButtonEvent::Down);
            }

            match event {
                ButtonEvent::Down => surface.set_active_mode_temporarily(self.volume_mode)?,
                ButtonEvent::Up => surface.restore_mode()?,
                ButtonEvent::Long => {}
            }
        }

        if settings.touch_channel && event == ButtonEvent::Down {
            if let Err(e) = surface.model_mut().tracks_mut().select(self.index) {
                log::debug!("Fader {} touch did not select a track: {}", self.index, e);
            }
        }
        Ok(())
    }
}
