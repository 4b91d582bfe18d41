//! Mirrors of the host's musical object model.
//!
//! A host adapter keeps these structures up to date from its own observers.
//! Feature groups read them to render feedback and mutate them in response to
//! surface input.

mod channel;
mod memory;
mod transport;
mod value;

pub use channel::{BankKind, Channel, ChannelBank};
pub use memory::MemoryModel;
pub use transport::{Preroll, Transport, MAX_TEMPO, MIN_TEMPO};
pub use value::{RangedValue, ValueChanger, ValueFormat};

/// Access to the parts of the host model that surfaces work with.
pub trait Model {
    fn transport(&self) -> &Transport;
    fn transport_mut(&mut self) -> &mut Transport;

    fn tracks(&self) -> &ChannelBank;
    fn tracks_mut(&mut self) -> &mut ChannelBank;

    /// Layers or drum pads of the cursor device
    fn layers(&self) -> &ChannelBank;
    fn layers_mut(&mut self) -> &mut ChannelBank;

    fn value_changer(&self) -> &ValueChanger;
}
