//! Window registry
//!
//! Owns every window instance for its whole lifetime. Instances are created
//! lazily on first show and survive being hidden; only a full teardown
//! destroys them. The registry also records which instances are currently
//! shown.

use super::descriptor::{WindowDescriptor, WindowGroup, WindowKey};
use super::lifecycle::{Lifecycle, Phase};
use crate::collaborators::{LayeringBackend, ViewFactory, ViewHandle, WindowBehavior};
use crate::error::{NavError, NavResult};
use crate::navigation::ShownSet;
use log::{debug, info};
use std::collections::HashMap;
use std::fmt;

/// A live window bound to one identifier.
pub struct WindowInstance<Id: WindowKey> {
    id: Id,
    view: ViewHandle,
    group: WindowGroup,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) min_depth: Option<i32>,
    pub(crate) behavior: Box<dyn WindowBehavior<Id>>,
}

impl<Id: WindowKey> WindowInstance<Id> {
    fn new(id: Id, view: ViewHandle, group: WindowGroup, behavior: Box<dyn WindowBehavior<Id>>) -> Self {
        Self {
            id,
            view,
            group,
            lifecycle: Lifecycle::new(),
            min_depth: None,
            behavior,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn view(&self) -> ViewHandle {
        self.view
    }

    pub fn group(&self) -> WindowGroup {
        self.group
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn is_locked(&self) -> bool {
        self.lifecycle.is_locked()
    }

    /// Lowest depth of the window's layers, once it has been placed.
    pub fn min_depth(&self) -> Option<i32> {
        self.min_depth
    }

    pub fn behavior_mut(&mut self) -> &mut dyn WindowBehavior<Id> {
        self.behavior.as_mut()
    }
}

impl<Id: WindowKey> fmt::Debug for WindowInstance<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowInstance")
            .field("id", &self.id)
            .field("view", &self.view)
            .field("group", &self.group)
            .field("phase", &self.lifecycle.phase())
            .field("min_depth", &self.min_depth)
            .finish()
    }
}

pub struct WindowRegistry<Id: WindowKey> {
    instances: HashMap<Id, WindowInstance<Id>>,
    shown: ShownSet<Id>,
}

impl<Id: WindowKey> WindowRegistry<Id> {
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            shown: ShownSet::new(),
        }
    }

    /// Returns the instance for `descriptor.id`, creating it on first use.
    ///
    /// The flag is `true` when the instance was created by this call. At
    /// most one instance ever exists per identifier.
    pub fn resolve_or_create(
        &mut self,
        descriptor: &WindowDescriptor<Id>,
        views: &mut dyn ViewFactory<Id>,
        layering: &mut dyn LayeringBackend,
    ) -> NavResult<(&mut WindowInstance<Id>, bool), Id> {
        let id = descriptor.id;
        let created = if self.instances.contains_key(&id) {
            false
        } else {
            let view = views
                .instantiate(id)
                .ok_or(NavError::NotInstantiable(id))?;
            views.attach(view, descriptor.group);
            layering.adopt(view, descriptor.group);
            let behavior = views.behavior(id);

            self.instances
                .insert(id, WindowInstance::new(id, view, descriptor.group, behavior));
            info!("🪟 Instantiated window {:?} as {:?} in {:?} group", id, view, descriptor.group);
            true
        };

        let instance = self
            .instances
            .get_mut(&id)
            .ok_or(NavError::NotInstantiable(id))?;
        Ok((instance, created))
    }

    pub fn get(&self, id: Id) -> Option<&WindowInstance<Id>> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut WindowInstance<Id>> {
        self.instances.get_mut(&id)
    }

    pub fn is_shown(&self, id: Id) -> bool {
        self.shown.contains(id)
    }

    pub(crate) fn mark_shown(&mut self, id: Id) -> bool {
        self.shown.push(id)
    }

    pub(crate) fn mark_hidden(&mut self, id: Id) -> bool {
        self.shown.remove(id).is_some()
    }

    pub fn shown(&self) -> &ShownSet<Id> {
        &self.shown
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Destroys every instance. Returns how many were destroyed.
    pub(crate) fn teardown(
        &mut self,
        views: &mut dyn ViewFactory<Id>,
        layering: &mut dyn LayeringBackend,
    ) -> usize {
        let count = self.instances.len();
        for (id, instance) in self.instances.drain() {
            debug!("Destroying window {:?}", id);
            layering.release(instance.view);
            views.destroy(instance.view);
        }
        self.shown.clear();
        count
    }
}

impl<Id: WindowKey> Default for WindowRegistry<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::HeadlessViews;
    use crate::depth::PanelStack;

    #[test]
    fn test_resolve_or_create_is_idempotent() {
        let mut registry = WindowRegistry::new();
        let mut views = HeadlessViews::new();
        let log = views.instantiation_log();
        let mut layering = PanelStack::new();
        let desc = WindowDescriptor::new(1u8).group(WindowGroup::PopUp);

        let (first, created) = registry
            .resolve_or_create(&desc, &mut views, &mut layering)
            .unwrap();
        assert!(created);
        let view = first.view();
        assert_eq!(first.group(), WindowGroup::PopUp);
        assert_eq!(first.phase(), Phase::Hidden);

        let (second, created) = registry
            .resolve_or_create(&desc, &mut views, &mut layering)
            .unwrap();
        assert!(!created);
        assert_eq!(second.view(), view);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(registry.instance_count(), 1);
    }

    #[test]
    fn test_missing_recipe_is_not_instantiable() {
        let mut registry = WindowRegistry::new();
        let mut views = HeadlessViews::new().without(9u8);
        let mut layering = PanelStack::new();

        let err = registry
            .resolve_or_create(&WindowDescriptor::new(9u8), &mut views, &mut layering)
            .unwrap_err();
        assert_eq!(err, NavError::NotInstantiable(9));
        assert_eq!(registry.instance_count(), 0);
    }

    #[test]
    fn test_shown_tracking() {
        let mut registry: WindowRegistry<u8> = WindowRegistry::new();
        assert!(registry.mark_shown(1));
        assert!(!registry.mark_shown(1));
        assert!(registry.is_shown(1));
        assert!(registry.mark_hidden(1));
        assert!(!registry.mark_hidden(1));
        assert!(!registry.is_shown(1));
    }

    #[test]
    fn test_teardown_releases_views() {
        let mut registry = WindowRegistry::new();
        let mut views = HeadlessViews::new();
        let mut layering = PanelStack::new();
        let (instance, _) = registry
            .resolve_or_create(&WindowDescriptor::new(1u8), &mut views, &mut layering)
            .unwrap();
        let view = instance.view();
        registry.mark_shown(1);

        assert_eq!(registry.teardown(&mut views, &mut layering), 1);
        assert_eq!(registry.instance_count(), 0);
        assert!(registry.shown().is_empty());
        assert!(layering.panels(view).is_none());
    }
}
