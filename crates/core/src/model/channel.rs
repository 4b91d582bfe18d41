use super::value::{RangedValue, ValueFormat};
use crate::ModelError;

/// Mirror of a track, layer or drum pad.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    name: String,
    activated: bool,
    mute: bool,
    solo: bool,
    /// Palette index of the channel color
    color: u8,
    volume: RangedValue,
    pan: RangedValue,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activated: true,
            mute: false,
            solo: false,
            color: 0,
            volume: RangedValue::new("Volume", 0.8, ValueFormat::Percent),
            pan: RangedValue::new("Pan", 0.5, ValueFormat::Pan),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn toggle_activated(&mut self) {
        self.activated = !self.activated;
    }

    pub fn is_mute(&self) -> bool {
        self.mute
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    pub fn toggle_mute(&mut self) {
        self.mute = !self.mute;
    }

    pub fn is_solo(&self) -> bool {
        self.solo
    }

    pub fn set_solo(&mut self, solo: bool) {
        self.solo = solo;
    }

    pub fn toggle_solo(&mut self) {
        self.solo = !self.solo;
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn set_color(&mut self, color: u8) {
        self.color = color;
    }

    pub fn volume(&self) -> &RangedValue {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut RangedValue {
        &mut self.volume
    }

    pub fn pan(&self) -> &RangedValue {
        &self.pan
    }

    pub fn pan_mut(&mut self) -> &mut RangedValue {
        &mut self.pan
    }
}

/// Whether a bank holds device layers or drum pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankKind {
    Tracks,
    Layers,
    DrumPads,
}

/// A page of channels with an optional selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBank {
    kind: BankKind,
    channels: Vec<Channel>,
    selected: Option<usize>,
}

impl ChannelBank {
    pub fn new(kind: BankKind, channels: Vec<Channel>) -> Self {
        let selected = if channels.is_empty() { None } else { Some(0) };
        Self {
            kind,
            channels,
            selected,
        }
    }

    pub fn kind(&self) -> BankKind {
        self.kind
    }

    /// The cursor device switches between layers and drum pads.
    pub fn set_kind(&mut self, kind: BankKind) {
        self.kind = kind;
    }

    pub fn is_drum_pad_bank(&self) -> bool {
        self.kind == BankKind::DrumPads
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn channel_mut(&mut self, index: usize) -> Result<&mut Channel, ModelError> {
        self.channels
            .get_mut(index)
            .ok_or(ModelError::ChannelOutOfRange(index))
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Channel> {
        self.selected.and_then(|index| self.channels.get(index))
    }

    pub fn selected_mut(&mut self) -> Result<&mut Channel, ModelError> {
        let index = self.selected.ok_or(ModelError::NoSelection)?;
        self.channel_mut(index)
    }

    pub fn select(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.channels.len() {
            return Err(ModelError::ChannelOutOfRange(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_mute(&mut self) -> Result<(), ModelError> {
        if !self.is_drum_pad_bank() {
            return Err(ModelError::DrumPadsOnly);
        }
        self.channels.iter_mut().for_each(|c| c.set_mute(false));
        Ok(())
    }

    pub fn clear_solo(&mut self) -> Result<(), ModelError> {
        if !self.is_drum_pad_bank() {
            return Err(ModelError::DrumPadsOnly);
        }
        self.channels.iter_mut().for_each(|c| c.set_solo(false));
        Ok(())
    }
}
