use super::{BankKind, Channel, ChannelBank, Model, Transport, ValueChanger};

/// In-memory model used by the simulator and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryModel {
    transport: Transport,
    tracks: ChannelBank,
    layers: ChannelBank,
    value_changer: ValueChanger,
}

impl MemoryModel {
    /// Create a model with `track_count` tracks and `layer_count` device layers.
    pub fn new(track_count: usize, layer_count: usize, value_changer: ValueChanger) -> Self {
        let tracks = (0..track_count)
            .map(|i| Channel::new(format!("Track {}", i + 1)))
            .collect();
        let layers = (0..layer_count)
            .map(|i| Channel::new(format!("Layer {}", i + 1)))
            .collect();

        Self {
            transport: Transport::default(),
            tracks: ChannelBank::new(BankKind::Tracks, tracks),
            layers: ChannelBank::new(BankKind::Layers, layers),
            value_changer,
        }
    }
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self::new(8, 4, ValueChanger::default())
    }
}

impl Model for MemoryModel {
    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    fn tracks(&self) -> &ChannelBank {
        &self.tracks
    }

    fn tracks_mut(&mut self) -> &mut ChannelBank {
        &mut self.tracks
    }

    fn layers(&self) -> &ChannelBank {
        &self.layers
    }

    fn layers_mut(&mut self) -> &mut ChannelBank {
        &mut self.layers
    }

    fn value_changer(&self) -> &ValueChanger {
        &self.value_changer
    }
}
