//! Per-category registry of feature groups with a single active slot.

use std::collections::HashMap;

use crate::event::Category;
use crate::feature_group::{Context, FeatureGroup, FeatureGroupId, Surface};
use crate::{Error, Result};

/// Handle returned when registering a change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeListener<Id> = Box<dyn FnMut(Option<Id>, Id)>;

/// Owns the feature groups of one category and tracks which one is active.
///
/// Besides the active id it remembers at most one previous id, recorded by
/// [`set_active_temporarily`](Self::set_active_temporarily) and consumed by
/// [`restore`](Self::restore). Nested temporary activations keep the first
/// recorded id, so a restore always returns to the group that was active
/// before the temporary switch began. A plain [`set_active`](Self::set_active)
/// discards any pending restore.
///
/// Activating the id that is already active does not run any hooks, but the
/// listeners are still called with `previous == active`.
pub struct FeatureGroupManager<S: Surface, Id: FeatureGroupId> {
    category: Category,
    groups: HashMap<Id, Box<dyn FeatureGroup<S>>>,
    order: Vec<Id>,
    active: Option<Id>,
    previous: Option<Id>,
    listeners: Vec<(ListenerId, ChangeListener<Id>)>,
    next_listener: u64,
}

impl<S: Surface, Id: FeatureGroupId> FeatureGroupManager<S, Id> {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            groups: HashMap::new(),
            order: Vec::new(),
            active: None,
            previous: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Bind `id` to `group`. Fails if the id is already taken.
    pub fn register(&mut self, id: Id, group: Box<dyn FeatureGroup<S>>) -> Result<()> {
        if self.groups.contains_key(&id) {
            return Err(Error::AlreadyRegistered {
                category: self.category,
                id: format!("{:?}", id),
            });
        }
        log::debug!("Registered {} {:?} ({})", self.category, id, group.name());
        self.groups.insert(id, group);
        self.order.push(id);
        Ok(())
    }

    pub fn contains(&self, id: Id) -> bool {
        self.groups.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.order.iter().copied()
    }

    pub fn get(&self, id: Id) -> Option<&dyn FeatureGroup<S>> {
        self.groups.get(&id).map(|g| g.as_ref())
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut (dyn FeatureGroup<S> + 'static)> {
        self.groups.get_mut(&id).map(|g| g.as_mut())
    }

    pub fn active_id(&self) -> Option<Id> {
        self.active
    }

    pub fn is_active(&self, id: Id) -> bool {
        self.active == Some(id)
    }

    /// Id that a [`restore`](Self::restore) would return to
    pub fn previous_id(&self) -> Option<Id> {
        self.previous
    }

    pub fn active(&self) -> Result<&dyn FeatureGroup<S>> {
        self.active
            .and_then(|id| self.get(id))
            .ok_or(Error::NoActive(self.category))
    }

    pub fn active_mut(&mut self) -> Result<&mut (dyn FeatureGroup<S> + 'static)> {
        let category = self.category;
        match self.active {
            Some(id) => self.get_mut(id).ok_or(Error::NoActive(category)),
            None => Err(Error::NoActive(category)),
        }
    }

    pub fn add_change_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Option<Id>, Id) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Make `id` the active group and drop any pending restore.
    pub fn set_active(&mut self, id: Id, cx: &mut Context<'_, S>) -> Result<()> {
        self.ensure_registered(id)?;
        self.previous = None;
        self.switch_to(id, cx);
        Ok(())
    }

    /// Make `id` the active group, remembering the current one for
    /// [`restore`](Self::restore).
    pub fn set_active_temporarily(&mut self, id: Id, cx: &mut Context<'_, S>) -> Result<()> {
        self.ensure_registered(id)?;
        if self.active != Some(id) && self.previous.is_none() {
            self.previous = self.active;
        }
        self.switch_to(id, cx);
        Ok(())
    }

    /// Return to the group active before the pending temporary activation.
    /// Returns false, doing nothing, when no temporary activation is pending.
    pub fn restore(&mut self, cx: &mut Context<'_, S>) -> bool {
        match self.previous.take() {
            Some(id) => {
                self.switch_to(id, cx);
                true
            }
            None => false,
        }
    }

    fn ensure_registered(&self, id: Id) -> Result<()> {
        if self.groups.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::NotFound {
                category: self.category,
                id: format!("{:?}", id),
            })
        }
    }

    fn switch_to(&mut self, id: Id, cx: &mut Context<'_, S>) {
        let previous = self.active;
        if previous == Some(id) {
            self.notify(previous, id);
            return;
        }

        if let Some(group) = previous.and_then(|prev| self.groups.get_mut(&prev)) {
            group.on_deactivate(cx);
        }

        self.active = Some(id);
        log::debug!("Active {} changed: {:?} -> {:?}", self.category, previous, id);
        self.notify(previous, id);

        if let Some(group) = self.groups.get_mut(&id) {
            group.on_activate(cx);
        }
    }

    fn notify(&mut self, previous: Option<Id>, active: Id) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(previous, active);
        }
    }
}
