//! Routes surface input to the active feature groups and resolves feedback.

use crate::color::{ButtonColorResolver, ColorIndex};
use crate::display::Display;
use crate::event::{ButtonEvent, ButtonId, Category};
use crate::feature_group::{Context, FeatureGroup, FeatureGroupId, Request, Surface, Transition};
use crate::registry::{FeatureGroupManager, ListenerId};
use crate::{Error, Result};

/// Upper bound on navigation requests applied per dispatch. Anything queued
/// beyond this by activation hooks is dropped.
pub const MAX_CASCADE: usize = 8;

/// Owns the model mirror and the mode and view registries of one surface.
pub struct ControlSurface<S: Surface> {
    model: S::Model,
    modes: FeatureGroupManager<S, S::ModeId>,
    views: FeatureGroupManager<S, S::ViewId>,
    colors: ButtonColorResolver,
    started: bool,
}

impl<S: Surface> ControlSurface<S> {
    pub fn new(model: S::Model) -> Self {
        Self {
            model,
            modes: FeatureGroupManager::new(Category::Mode),
            views: FeatureGroupManager::new(Category::View),
            colors: ButtonColorResolver::new(),
            started: false,
        }
    }

    pub fn model(&self) -> &S::Model {
        &self.model
    }

    /// Direct model access for host state updates.
    pub fn model_mut(&mut self) -> &mut S::Model {
        &mut self.model
    }

    pub fn modes(&self) -> &FeatureGroupManager<S, S::ModeId> {
        &self.modes
    }

    pub fn views(&self) -> &FeatureGroupManager<S, S::ViewId> {
        &self.views
    }

    pub fn colors(&self) -> &ButtonColorResolver {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ButtonColorResolver {
        &mut self.colors
    }

    pub fn register_mode(&mut self, id: S::ModeId, group: Box<dyn FeatureGroup<S>>) -> Result<()> {
        self.modes.register(id, group)
    }

    pub fn register_view(&mut self, id: S::ViewId, group: Box<dyn FeatureGroup<S>>) -> Result<()> {
        self.views.register(id, group)
    }

    pub fn add_mode_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Option<S::ModeId>, S::ModeId) + 'static,
    {
        self.modes.add_change_listener(listener)
    }

    pub fn add_view_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Option<S::ViewId>, S::ViewId) + 'static,
    {
        self.views.add_change_listener(listener)
    }

    pub fn remove_mode_listener(&mut self, id: ListenerId) -> bool {
        self.modes.remove_change_listener(id)
    }

    pub fn remove_view_listener(&mut self, id: ListenerId) -> bool {
        self.views.remove_change_listener(id)
    }

    /// Activate the default mode and view. Dispatch is rejected until this
    /// has succeeded.
    pub fn start(&mut self, default_mode: S::ModeId, default_view: S::ViewId) -> Result<()> {
        if !self.modes.contains(default_mode) {
            return Err(Error::NotFound {
                category: Category::Mode,
                id: format!("{:?}", default_mode),
            });
        }
        if !self.views.contains(default_view) {
            return Err(Error::NotFound {
                category: Category::View,
                id: format!("{:?}", default_view),
            });
        }

        self.navigate(Request::Mode(Transition::Activate(default_mode)))?;
        self.navigate(Request::View(Transition::Activate(default_view)))?;
        self.started = true;
        log::info!(
            "Control surface started with {} modes and {} views",
            self.modes.len(),
            self.views.len()
        );
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn set_active_mode(&mut self, id: S::ModeId) -> Result<()> {
        self.navigate(Request::Mode(Transition::Activate(id)))
    }

    pub fn set_active_mode_temporarily(&mut self, id: S::ModeId) -> Result<()> {
        self.navigate(Request::Mode(Transition::ActivateTemporarily(id)))
    }

    pub fn restore_mode(&mut self) -> Result<()> {
        self.navigate(Request::Mode(Transition::Restore))
    }

    pub fn set_active_view(&mut self, id: S::ViewId) -> Result<()> {
        self.navigate(Request::View(Transition::Activate(id)))
    }

    pub fn set_active_view_temporarily(&mut self, id: S::ViewId) -> Result<()> {
        self.navigate(Request::View(Transition::ActivateTemporarily(id)))
    }

    pub fn restore_view(&mut self) -> Result<()> {
        self.navigate(Request::View(Transition::Restore))
    }

    /// Dispatch a button event to the active group of `category`.
    ///
    /// A failing handler is logged; its queued navigation requests are
    /// dropped and the registries keep their state.
    pub fn handle_event(
        &mut self,
        category: Category,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()> {
        self.dispatch(category, |group, cx| group.on_event(cx, row, index, event))
    }

    /// Dispatch a knob value to the active mode.
    pub fn handle_knob(&mut self, index: usize, value: u8) -> Result<()> {
        self.dispatch(Category::Mode, |group, cx| group.on_knob(cx, index, value))
    }

    /// Dispatch a knob touch to the active mode.
    pub fn handle_knob_touch(&mut self, index: usize, touched: bool) -> Result<()> {
        self.dispatch(Category::Mode, |group, cx| {
            group.on_knob_touch(cx, index, touched)
        })
    }

    pub fn button_color(&self, category: Category, button: ButtonId) -> ColorIndex {
        let active = match category {
            Category::Mode => self.modes.active().ok(),
            Category::View => self.views.active().ok(),
        };
        self.colors.resolve::<S>(category, button, active, &self.model)
    }

    /// Let the active mode paint `display`.
    pub fn update_display(&self, display: Display<'_>) {
        if let Ok(mode) = self.modes.active() {
            mode.update_display(&self.model, display);
        }
    }

    fn dispatch<F>(&mut self, category: Category, handler: F) -> Result<()>
    where
        F: FnOnce(&mut dyn FeatureGroup<S>, &mut Context<'_, S>) -> Result<()>,
    {
        if !self.started {
            return Err(Error::NotStarted);
        }

        let mut requests = Vec::new();
        let mut cx = Context::new(&mut self.model, &mut requests);
        let group = match category {
            Category::Mode => self.modes.active_mut()?,
            Category::View => self.views.active_mut()?,
        };
        let name = group.name().to_string();

        match handler(group, &mut cx) {
            Ok(()) => {
                self.apply_requests(requests);
            }
            Err(e) => {
                log::warn!("{} '{}' failed to handle input: {}", category, name, e);
                if !requests.is_empty() {
                    log::debug!("Dropped {} navigation requests from '{}'", requests.len(), name);
                }
            }
        }
        Ok(())
    }

    /// Apply `request`, then whatever the activation hooks queue in turn.
    fn navigate(&mut self, request: Request<S>) -> Result<()> {
        let mut pending = Vec::new();
        let mut cx = Context::new(&mut self.model, &mut pending);
        match request {
            Request::Mode(transition) => Self::apply(&mut self.modes, transition, &mut cx)?,
            Request::View(transition) => Self::apply(&mut self.views, transition, &mut cx)?,
        }
        self.apply_requests(pending);
        Ok(())
    }

    fn apply_requests(&mut self, mut pending: Vec<Request<S>>) {
        let mut applied = 0;
        while !pending.is_empty() {
            let batch = std::mem::take(&mut pending);
            for (i, request) in batch.iter().enumerate() {
                if applied == MAX_CASCADE {
                    log::warn!(
                        "Navigation cascade limit of {} reached, dropping {} requests",
                        MAX_CASCADE,
                        batch.len() - i + pending.len()
                    );
                    return;
                }
                applied += 1;

                let mut cx = Context::new(&mut self.model, &mut pending);
                let result = match *request {
                    Request::Mode(transition) => Self::apply(&mut self.modes, transition, &mut cx),
                    Request::View(transition) => Self::apply(&mut self.views, transition, &mut cx),
                };
                if let Err(e) = result {
                    log::warn!("Ignoring navigation request {:?}: {}", request, e);
                }
            }
        }
    }

    fn apply<Id: FeatureGroupId>(
        manager: &mut FeatureGroupManager<S, Id>,
        transition: Transition<Id>,
        cx: &mut Context<'_, S>,
    ) -> Result<()> {
        match transition {
            Transition::Activate(id) => manager.set_active(id, cx),
            Transition::ActivateTemporarily(id) => manager.set_active_temporarily(id, cx),
            Transition::Restore => {
                manager.restore(cx);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::display::{GraphicDisplay, OptionElement, ParameterElement};
    use crate::ModelError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Modes {
        Main,
        Fail,
        PingA,
        PingB,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Views {
        Play,
        Color,
    }

    struct TestSurface;

    impl Surface for TestSurface {
        type Model = u32;
        type ModeId = Modes;
        type ViewId = Views;
    }

    /// Counts events into the model; row 1 switches to the color view.
    struct Main;

    impl FeatureGroup<TestSurface> for Main {
        fn name(&self) -> &str {
            "Main"
        }

        fn on_event(
            &mut self,
            cx: &mut Context<'_, TestSurface>,
            row: u8,
            _index: u8,
            event: ButtonEvent,
        ) -> Result<()> {
            if event != ButtonEvent::Up {
                return Ok(());
            }
            *cx.model += 1;
            if row == 1 {
                cx.activate_view(Views::Color);
            }
            Ok(())
        }

        fn button_color(&self, model: &u32, button: ButtonId) -> Option<ColorIndex> {
            (button == ButtonId::row(0, 0)).then_some(ColorIndex(*model as u8))
        }

        fn update_display(&self, model: &u32, display: Display<'_>) {
            if let Display::Graphic(d) = display {
                d.add_parameter(ParameterElement::new("Count", *model, model.to_string()));
            }
        }
    }

    /// Queues a navigation request and then fails.
    struct Fail;

    impl FeatureGroup<TestSurface> for Fail {
        fn name(&self) -> &str {
            "Fail"
        }

        fn on_event(
            &mut self,
            cx: &mut Context<'_, TestSurface>,
            _row: u8,
            _index: u8,
            _event: ButtonEvent,
        ) -> Result<()> {
            cx.activate_mode(Modes::Main);
            Err(ModelError::NoSelection.into())
        }
    }

    /// Activates its partner as soon as it becomes active.
    struct Ping(Modes);

    impl FeatureGroup<TestSurface> for Ping {
        fn name(&self) -> &str {
            "Ping"
        }

        fn on_event(
            &mut self,
            _cx: &mut Context<'_, TestSurface>,
            _row: u8,
            _index: u8,
            _event: ButtonEvent,
        ) -> Result<()> {
            Ok(())
        }

        fn on_activate(&mut self, cx: &mut Context<'_, TestSurface>) {
            *cx.model += 1;
            cx.activate_mode(self.0);
        }
    }

    struct Plain(&'static str);

    impl FeatureGroup<TestSurface> for Plain {
        fn name(&self) -> &str {
            self.0
        }

        fn on_event(
            &mut self,
            _cx: &mut Context<'_, TestSurface>,
            _row: u8,
            _index: u8,
            _event: ButtonEvent,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Elements(Vec<String>);

    impl GraphicDisplay for Elements {
        fn clear(&mut self) {
            self.0.clear();
        }

        fn add_option(&mut self, element: OptionElement) {
            self.0.push(element.header);
        }

        fn add_parameter(&mut self, element: ParameterElement) {
            self.0.push(format!("{}={}", element.name, element.displayed_value));
        }

        fn add_empty(&mut self) {
            self.0.push(String::new());
        }

        fn set_message(&mut self, _column: usize, text: &str) {
            self.0 = vec![text.to_string()];
        }
    }

    fn surface() -> ControlSurface<TestSurface> {
        let mut surface = ControlSurface::new(0);
        surface.register_mode(Modes::Main, Box::new(Main)).unwrap();
        surface.register_mode(Modes::Fail, Box::new(Fail)).unwrap();
        surface
            .register_mode(Modes::PingA, Box::new(Ping(Modes::PingB)))
            .unwrap();
        surface
            .register_mode(Modes::PingB, Box::new(Ping(Modes::PingA)))
            .unwrap();
        surface
            .register_view(Views::Play, Box::new(Plain("Play")))
            .unwrap();
        surface
            .register_view(Views::Color, Box::new(Plain("Color")))
            .unwrap();
        surface
    }

    #[test]
    fn test_dispatch_requires_start() {
        let mut surface = surface();
        let result = surface.handle_event(Category::Mode, 0, 0, ButtonEvent::Up);
        assert!(matches!(result, Err(Error::NotStarted)));

        let result = surface.start(Modes::Main, Views::Play);
        assert!(result.is_ok());
        assert!(surface.is_started());
        assert_eq!(surface.modes().active_id(), Some(Modes::Main));
        assert_eq!(surface.views().active_id(), Some(Views::Play));
    }

    #[test]
    fn test_start_with_unknown_default_fails() {
        let mut surface = ControlSurface::<TestSurface>::new(0);
        surface.register_mode(Modes::Main, Box::new(Main)).unwrap();
        assert!(matches!(
            surface.start(Modes::Main, Views::Play),
            Err(Error::NotFound {
                category: Category::View,
                ..
            })
        ));
        assert!(!surface.is_started());
        assert_eq!(surface.modes().active_id(), None);
    }

    #[test]
    fn test_handler_requests_are_applied_after_return() {
        let mut surface = surface();
        surface.start(Modes::Main, Views::Play).unwrap();

        surface
            .handle_event(Category::Mode, 1, 0, ButtonEvent::Up)
            .unwrap();
        assert_eq!(*surface.model(), 1);
        assert_eq!(surface.views().active_id(), Some(Views::Color));
    }

    #[test]
    fn test_failing_handler_leaves_state_untouched() {
        let mut surface = surface();
        surface.start(Modes::Fail, Views::Play).unwrap();

        surface
            .handle_event(Category::Mode, 0, 0, ButtonEvent::Down)
            .unwrap();
        assert_eq!(surface.modes().active_id(), Some(Modes::Fail));

        // Later input is still dispatched
        surface.set_active_mode(Modes::Main).unwrap();
        surface
            .handle_event(Category::Mode, 0, 0, ButtonEvent::Up)
            .unwrap();
        assert_eq!(*surface.model(), 1);
    }

    #[test]
    fn test_activation_cascade_is_bounded() {
        let mut surface = surface();
        surface.start(Modes::Main, Views::Play).unwrap();

        surface.set_active_mode(Modes::PingA).unwrap();
        // One activation from the call itself plus MAX_CASCADE from hooks
        assert_eq!(*surface.model(), 1 + MAX_CASCADE as u32);
        let active = surface.modes().active_id();
        assert!(active == Some(Modes::PingA) || active == Some(Modes::PingB));
    }

    #[test]
    fn test_button_color_follows_active_mode() {
        let mut surface = surface();
        surface.colors_mut().set_default(
            Category::Mode,
            ButtonId::row(0, 0),
            ColorIndex(42),
        );
        // Not started, defaults only
        assert_eq!(
            surface.button_color(Category::Mode, ButtonId::row(0, 0)),
            ColorIndex(42)
        );

        surface.start(Modes::Main, Views::Play).unwrap();
        *surface.model_mut() = 7;
        assert_eq!(
            surface.button_color(Category::Mode, ButtonId::row(0, 0)),
            ColorIndex(7)
        );

        surface.set_active_mode(Modes::Fail).unwrap();
        assert_eq!(
            surface.button_color(Category::Mode, ButtonId::row(0, 0)),
            ColorIndex(42)
        );
        assert_eq!(
            surface.button_color(Category::View, ButtonId::pad(3, 3)),
            ColorIndex::OFF
        );
    }

    #[test]
    fn test_update_display_paints_active_mode() {
        let mut surface = surface();
        surface.start(Modes::Main, Views::Play).unwrap();
        *surface.model_mut() = 3;

        let mut elements = Elements::default();
        surface.update_display(Display::Graphic(&mut elements));
        assert_eq!(elements.0, vec!["Count=3"]);
    }

    #[test]
    fn test_listeners_see_surface_transitions() {
        let mut surface = surface();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = seen.clone();
        surface.add_view_listener(move |prev, active| recorder.borrow_mut().push((prev, active)));

        surface.start(Modes::Main, Views::Play).unwrap();
        surface.set_active_view_temporarily(Views::Color).unwrap();
        surface.restore_view().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (None, Views::Play),
                (Some(Views::Play), Views::Color),
                (Some(Views::Color), Views::Play),
            ]
        );
    }
}
