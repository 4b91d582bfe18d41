//! Ableton Push support for Keystone.
//!
//! This crate wires the Push hardware layout onto the mode and view dispatch
//! of `keystone-core`:
//! - MIDI mapping for pads, the two display button rows, encoders and
//!   function buttons
//! - LED feedback resolved from the active mode and view
//! - Character (Push 1) and graphic (Push 2) display rendering
//! - Long press detection driven by explicit clock ticks
//!
//! # Layout
//!
//! The display button rows belong to the active mode: row 0 sits above the
//! display (CC 20-27), row 1 below it (CC 102-109). The 8x8 pad grid
//! (notes 36-99) belongs to the active view.

use std::marker::PhantomData;

use keystone_core::model::Model;
use keystone_core::Surface;

pub mod controller;
pub mod display;
pub mod error;
pub mod midi;
pub mod mode;
pub mod view;

pub use controller::PushController;
pub use error::PushError;

/// Modes of the Push, owning the display and its button rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modes {
    Track,
    Volume,
    Pan,
    Transport,
    LayerDetails,
}

/// Views of the Push, owning the pad grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Views {
    Session,
    /// Color picker for the selected track
    ColorTrack,
    /// Color picker for the selected device layer
    ColorLayer,
}

/// Type binding of the Push surface over a host model `M`.
pub struct Push<M>(PhantomData<M>);

impl<M: Model + 'static> Surface for Push<M> {
    type Model = M;
    type ModeId = Modes;
    type ViewId = Views;
}
