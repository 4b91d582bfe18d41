//! PushController - ties MIDI input, the mode/view dispatch and LED and
//! display feedback together for one Push.

use std::time::{Duration, Instant};

use keystone_core::model::Model;
use keystone_core::{
    ButtonEvent, ButtonId, Category, ControlSurface, Display, FaderTouchCommand, FunctionButton,
    Settings,
};

use crate::display::{GraphicDisplayModel, TextDisplayBuffer};
use crate::error::Result;
use crate::midi::colors::button;
use crate::midi::{LedState, LongPressDetector, PushMapping, SurfaceInput};
use crate::mode::{
    ChannelParameter, ChannelParameterMode, LayerDetailsMode, TrackMode, TransportMode,
};
use crate::view::{ColorTarget, ColorView, SessionView};
use crate::{Modes, Push, Views};

/// Eight channel faders plus the master fader
const FADERS: usize = 9;

/// Ableton Push controller.
///
/// Owns the control surface with all Push modes and views registered, and
/// turns raw MIDI into surface input. Everything is driven by the caller:
/// MIDI messages, fader touches and clock ticks go in, LED messages and
/// display frames come out.
pub struct PushController<M: Model + 'static> {
    surface: ControlSurface<Push<M>>,

    /// LED state for feedback
    leds: LedState,

    long_press: LongPressDetector,
    settings: Settings,
    faders: Vec<FaderTouchCommand<Push<M>>>,
}

impl<M: Model + 'static> PushController<M> {
    /// Register the Push modes and views on a new surface over `model` and
    /// start it in the track mode and session view.
    pub fn new(model: M, settings: Settings) -> Result<Self> {
        let mut surface = ControlSurface::new(model);

        surface.register_mode(Modes::Track, Box::new(TrackMode::new()))?;
        surface.register_mode(
            Modes::Volume,
            Box::new(ChannelParameterMode::new(ChannelParameter::Volume)),
        )?;
        surface.register_mode(
            Modes::Pan,
            Box::new(ChannelParameterMode::new(ChannelParameter::Pan)),
        )?;
        surface.register_mode(Modes::Transport, Box::new(TransportMode::new()))?;
        surface.register_mode(Modes::LayerDetails, Box::new(LayerDetailsMode::new()))?;

        surface.register_view(Views::Session, Box::new(SessionView::new()))?;
        surface.register_view(Views::ColorTrack, Box::new(ColorView::new(ColorTarget::Track)))?;
        surface.register_view(Views::ColorLayer, Box::new(ColorView::new(ColorTarget::Layer)))?;

        // Function buttons are dimly lit unless their mode is active
        for function in FunctionButton::ALL {
            surface
                .colors_mut()
                .set_default(Category::Mode, ButtonId::Function(function), button::ON);
        }

        surface.add_mode_listener(|previous, id| {
            tracing::debug!("Push mode changed from {:?} to {:?}", previous, id);
        });
        surface.add_view_listener(|previous, id| {
            tracing::debug!("Push view changed from {:?} to {:?}", previous, id);
        });

        surface.start(Modes::Track, Views::Session)?;

        let long_press = LongPressDetector::new(Duration::from_millis(settings.long_press_ms));
        let faders = (0..FADERS)
            .map(|index| FaderTouchCommand::new(index, Modes::Volume))
            .collect();

        tracing::info!("{} controller ready", PushMapping::device_name());

        Ok(Self {
            surface,
            leds: LedState::new(),
            long_press,
            settings,
            faders,
        })
    }

    pub fn surface(&self) -> &ControlSurface<Push<M>> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut ControlSurface<Push<M>> {
        &mut self.surface
    }

    pub fn model(&self) -> &M {
        self.surface.model()
    }

    pub fn model_mut(&mut self) -> &mut M {
        self.surface.model_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.long_press
            .set_threshold(Duration::from_millis(settings.long_press_ms));
        self.settings = settings;
    }

    /// Handle an incoming MIDI message received at `now`.
    pub fn handle_midi(&mut self, message: &[u8], now: Instant) -> Result<()> {
        self.tick(now)?;

        match PushMapping::parse(message)? {
            Some(input) => self.handle_input(input, now),
            None => {
                tracing::trace!("Ignoring MIDI message {:02x?}", message);
                Ok(())
            }
        }
    }

    /// Handle decoded surface input received at `now`.
    pub fn handle_input(&mut self, input: SurfaceInput, now: Instant) -> Result<()> {
        match input {
            SurfaceInput::Pad { row, col, event } => {
                self.track_press(ButtonId::pad(row, col), event, now);
                self.surface.handle_event(Category::View, row, col, event)?;
            }
            SurfaceInput::RowButton { row, index, event } => {
                self.track_press(ButtonId::row(row, index), event, now);
                self.surface.handle_event(Category::Mode, row, index, event)?;
            }
            SurfaceInput::Function { button, event } => {
                let was_long = self.track_press(ButtonId::Function(button), event, now);
                self.handle_function(button, event, was_long)?;
            }
            SurfaceInput::Knob { index, value } => self.surface.handle_knob(index, value)?,
            SurfaceInput::KnobTouch { index, touched } => {
                self.surface.handle_knob_touch(index, touched)?
            }
        }
        Ok(())
    }

    /// Handle a touch or release of fader `index`. Index 8 is the master
    /// fader.
    pub fn handle_fader_touch(&mut self, index: usize, event: ButtonEvent) -> Result<()> {
        match self.faders.get(index) {
            Some(command) => command.execute(&mut self.surface, event, &self.settings)?,
            None => tracing::debug!("No fader {}", index),
        }
        Ok(())
    }

    /// Deliver long press events for buttons held past the threshold.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        for id in self.long_press.tick(now) {
            tracing::trace!("Long press on {:?}", id);
            match id {
                ButtonId::Pad { row, col } => {
                    self.surface
                        .handle_event(Category::View, row, col, ButtonEvent::Long)?
                }
                ButtonId::Row { row, index } => {
                    self.surface
                        .handle_event(Category::Mode, row, index, ButtonEvent::Long)?
                }
                ButtonId::Function(function) => {
                    self.handle_function(function, ButtonEvent::Long, false)?
                }
            }
        }
        Ok(())
    }

    /// Resolve all LED colors and return the MIDI messages for the ones that
    /// changed.
    pub fn refresh_leds(&mut self) -> Vec<[u8; 3]> {
        for id in LedState::buttons() {
            let category = match id {
                ButtonId::Pad { .. } => Category::View,
                _ => Category::Mode,
            };
            let color = self.surface.button_color(category, id);
            self.leds.set_color(id, color);
        }
        self.leds.to_midi_messages()
    }

    pub fn leds(&self) -> &LedState {
        &self.leds
    }

    /// Paint the active mode onto a Push 1 character display.
    pub fn render_text(&self, display: &mut TextDisplayBuffer) {
        self.surface.update_display(Display::Text(display));
    }

    /// Paint the active mode onto a Push 2 graphic display.
    pub fn render_graphic(&self, display: &mut GraphicDisplayModel) {
        self.surface.update_display(Display::Graphic(display));
    }

    /// Record press times. Returns true on a release that followed a long
    /// press.
    fn track_press(&mut self, id: ButtonId, event: ButtonEvent, now: Instant) -> bool {
        match event {
            ButtonEvent::Down => {
                self.long_press.press(id, now);
                false
            }
            ButtonEvent::Up => self.long_press.release(id),
            ButtonEvent::Long => false,
        }
    }

    fn handle_function(
        &mut self,
        function: FunctionButton,
        event: ButtonEvent,
        was_long: bool,
    ) -> Result<()> {
        let mode = match function {
            FunctionButton::Volume => Modes::Volume,
            FunctionButton::Pan => Modes::Pan,
            FunctionButton::Track => Modes::Track,
            FunctionButton::Device => Modes::LayerDetails,
            FunctionButton::Metronome => return self.handle_metronome(event, was_long),
        };

        if event == ButtonEvent::Down {
            self.surface.set_active_mode(mode)?;
        }
        Ok(())
    }

    /// Holding metronome shows the transport mode until release. A short
    /// press toggles it.
    fn handle_metronome(&mut self, event: ButtonEvent, was_long: bool) -> Result<()> {
        let showing = self.surface.modes().is_active(Modes::Transport);
        match event {
            ButtonEvent::Long if !showing => self.surface.set_active_mode_temporarily(Modes::Transport)?,
            ButtonEvent::Up if was_long => self.surface.restore_mode()?,
            ButtonEvent::Up if showing => self.surface.restore_mode()?,
            ButtonEvent::Up => self.surface.set_active_mode_temporarily(Modes::Transport)?,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::model::MemoryModel;

    fn controller() -> PushController<MemoryModel> {
        PushController::new(MemoryModel::default(), Settings::default()).unwrap()
    }

    #[test]
    fn test_starts_in_track_mode_and_session_view() {
        let push = controller();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::Track));
        assert_eq!(push.surface().views().active_id(), Some(Views::Session));
    }

    #[test]
    fn test_function_buttons_switch_modes() {
        let mut push = controller();
        let now = Instant::now();

        push.handle_midi(&[0xB0, PushMapping::BUTTON_DEVICE, 127], now).unwrap();
        push.handle_midi(&[0xB0, PushMapping::BUTTON_DEVICE, 0], now).unwrap();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::LayerDetails));

        push.handle_midi(&[0xB0, PushMapping::BUTTON_VOLUME, 127], now).unwrap();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::Volume));
    }

    #[test]
    fn test_metronome_short_press_toggles_transport() {
        let mut push = controller();
        let now = Instant::now();
        let press = [0xB0, PushMapping::BUTTON_METRONOME, 127];
        let release = [0xB0, PushMapping::BUTTON_METRONOME, 0];

        push.handle_midi(&press, now).unwrap();
        push.handle_midi(&release, now).unwrap();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::Transport));

        push.handle_midi(&press, now).unwrap();
        push.handle_midi(&release, now).unwrap();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::Track));
    }

    #[test]
    fn test_metronome_hold_shows_transport_until_release() {
        let mut push = controller();
        let start = Instant::now();

        push.handle_midi(&[0xB0, PushMapping::BUTTON_METRONOME, 127], start)
            .unwrap();
        push.tick(start + Duration::from_millis(500)).unwrap();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::Transport));

        push.handle_midi(
            &[0xB0, PushMapping::BUTTON_METRONOME, 0],
            start + Duration::from_millis(900),
        )
        .unwrap();
        assert_eq!(push.surface().modes().active_id(), Some(Modes::Track));
    }

    #[test]
    fn test_leds_follow_active_mode() {
        let mut push = controller();
        push.refresh_leds();

        let track = ButtonId::Function(FunctionButton::Track);
        let volume = ButtonId::Function(FunctionButton::Volume);
        assert_eq!(push.leds().color(track), Some(button::HI));
        assert_eq!(push.leds().color(volume), Some(button::ON));

        push.surface_mut().set_active_mode(Modes::Volume).unwrap();
        let messages = push.refresh_leds();
        assert!(messages.contains(&[0xB0, PushMapping::BUTTON_TRACK, button::ON.index()]));
        assert!(messages.contains(&[0xB0, PushMapping::BUTTON_VOLUME, button::HI.index()]));
    }

    #[test]
    fn test_truncated_midi_is_an_error() {
        let mut push = controller();
        assert!(push.handle_midi(&[0xB0, 20], Instant::now()).is_err());
    }
}
