//! The contract implemented by every mode and view.

use std::fmt;
use std::hash::Hash;

use crate::color::ColorIndex;
use crate::display::Display;
use crate::event::{ButtonEvent, ButtonId};
use crate::Result;

/// Identifier of a feature group within its category.
pub trait FeatureGroupId: Copy + Eq + Hash + fmt::Debug + 'static {}

impl<T: Copy + Eq + Hash + fmt::Debug + 'static> FeatureGroupId for T {}

/// Binds the model and identifier types of one kind of control surface.
pub trait Surface: 'static {
    type Model;
    type ModeId: FeatureGroupId;
    type ViewId: FeatureGroupId;
}

/// A change of the active feature group within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<Id> {
    Activate(Id),
    ActivateTemporarily(Id),
    Restore,
}

/// A transition queued by a feature group, applied once its handler returns.
pub enum Request<S: Surface> {
    Mode(Transition<S::ModeId>),
    View(Transition<S::ViewId>),
}

impl<S: Surface> Clone for Request<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Surface> Copy for Request<S> {}

impl<S: Surface> PartialEq for Request<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Request::Mode(a), Request::Mode(b)) => a == b,
            (Request::View(a), Request::View(b)) => a == b,
            _ => false,
        }
    }
}

impl<S: Surface> fmt::Debug for Request<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Mode(t) => f.debug_tuple("Mode").field(t).finish(),
            Request::View(t) => f.debug_tuple("View").field(t).finish(),
        }
    }
}

/// Mutable access to the model plus the navigation request queue.
///
/// Feature groups never reach the registries directly. Transitions they ask
/// for are queued here and applied after the current handler or hook has
/// returned.
pub struct Context<'a, S: Surface> {
    pub model: &'a mut S::Model,
    requests: &'a mut Vec<Request<S>>,
}

impl<'a, S: Surface> Context<'a, S> {
    pub fn new(model: &'a mut S::Model, requests: &'a mut Vec<Request<S>>) -> Self {
        Self { model, requests }
    }

    pub fn request(&mut self, request: Request<S>) {
        self.requests.push(request);
    }

    pub fn activate_mode(&mut self, id: S::ModeId) {
        self.request(Request::Mode(Transition::Activate(id)));
    }

    pub fn activate_mode_temporarily(&mut self, id: S::ModeId) {
        self.request(Request::Mode(Transition::ActivateTemporarily(id)));
    }

    pub fn restore_mode(&mut self) {
        self.request(Request::Mode(Transition::Restore));
    }

    pub fn activate_view(&mut self, id: S::ViewId) {
        self.request(Request::View(Transition::Activate(id)));
    }

    pub fn activate_view_temporarily(&mut self, id: S::ViewId) {
        self.request(Request::View(Transition::ActivateTemporarily(id)));
    }

    pub fn restore_view(&mut self) {
        self.request(Request::View(Transition::Restore));
    }

    pub fn pending(&self) -> &[Request<S>] {
        self.requests
    }
}

/// A mode or view: handles surface input for one functional area and
/// renders its feedback.
pub trait FeatureGroup<S: Surface> {
    /// Human readable name, shown on displays and in logs
    fn name(&self) -> &str;

    /// Handle a button of row `row` at position `index`.
    ///
    /// For modes the rows are the display-aligned button rows; for views
    /// they are the pad grid rows.
    fn on_event(
        &mut self,
        cx: &mut Context<'_, S>,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()>;

    /// Handle a relative knob value.
    fn on_knob(&mut self, _cx: &mut Context<'_, S>, _index: usize, _value: u8) -> Result<()> {
        Ok(())
    }

    /// Handle a knob being touched or released.
    fn on_knob_touch(
        &mut self,
        _cx: &mut Context<'_, S>,
        _index: usize,
        _touched: bool,
    ) -> Result<()> {
        Ok(())
    }

    /// Color of `button` in the current state, or `None` to defer to the
    /// category defaults.
    fn button_color(&self, _model: &S::Model, _button: ButtonId) -> Option<ColorIndex> {
        None
    }

    /// Paint the current frame. Must not change anything.
    fn update_display(&self, _model: &S::Model, _display: Display<'_>) {}

    /// Called after this group became the active one
    fn on_activate(&mut self, _cx: &mut Context<'_, S>) {}

    /// Called before another group replaces this one
    fn on_deactivate(&mut self, _cx: &mut Context<'_, S>) {}
}
