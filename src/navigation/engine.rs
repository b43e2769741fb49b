//! Navigation stack engine
//!
//! Show requests hide the windows they replace and record them in a
//! [`NavigationFrame`]; pop requests undo the top frame. All bookkeeping is
//! applied before any animation starts.

use super::{Continuation, NavigationFrame, PopOutcome, ShowOptions, WindowNavigator};
use crate::error::{NavError, NavResult};
use crate::logging::format_back_stack;
use crate::message_box::MessagePayload;
use crate::window::{NavigationMode, ShowMode, WindowGroup, WindowKey};
use log::{debug, error, info, warn};

impl<Id: WindowKey> WindowNavigator<Id> {
    pub(super) fn show_internal(
        &mut self,
        id: Id,
        options: ShowOptions,
        payload: Option<MessagePayload<Id>>,
    ) -> NavResult<(), Id> {
        self.show_with_deferral(id, options, payload, Deferral::Now)
    }

    /// Show bookkeeping always runs now. With [`Deferral::UntilFlush`] the
    /// window joins the shown-set at once but is placed and animated by
    /// the next [`flush_deferred_shows`](Self::flush_deferred_shows).
    fn show_with_deferral(
        &mut self,
        id: Id,
        options: ShowOptions,
        payload: Option<MessagePayload<Id>>,
        defer: Deferral,
    ) -> NavResult<(), Id> {
        let descriptor = match self.catalog.get(id) {
            Some(descriptor) => descriptor.clone(),
            None => {
                error!("Show of unmanaged window {:?}", id);
                return Err(NavError::NotManaged(id));
            }
        };

        if self.registry.is_shown(id) {
            debug!("{:?} is already shown", id);
            return Err(NavError::AlreadyShown(id));
        }

        let (instance, created) = self
            .registry
            .resolve_or_create(&descriptor, self.views.as_mut(), self.layering.as_mut())
            .map_err(|err| {
                error!("Cannot show {:?}: {}", id, err);
                err
            })?;

        if instance.is_locked() {
            let phase = instance.phase();
            warn!("Show of {:?} rejected while {:?}", id, phase);
            return Err(NavError::LockedInstance { id, phase });
        }

        if payload.is_some() && instance.behavior.message_payload().is_none() {
            error!("{:?} cannot display a message payload", id);
            return Err(NavError::MissingCapability {
                id,
                capability: "SupportsMessagePayload",
            });
        }

        if created || options.force_reset || payload.is_some() {
            instance.behavior.on_reset();
            self.animator.reset_to_hidden(instance.view());
        }
        if let Some(payload) = payload {
            if let Some(target) = instance.behavior.message_payload() {
                target.set_payload(payload);
            }
        }

        if options.execute_nav_logic {
            self.execute_navigation(id, &options);
        }

        match defer {
            Deferral::Now => self.begin_show(&descriptor, options.context.as_deref()),
            Deferral::UntilFlush => {
                self.registry.mark_shown(id);
                if descriptor.tracks_history() {
                    self.current = Some(id);
                }
                debug!("{:?} restored, animation waits for the previous screen", id);
                self.deferred_shows.push((id, options.context));
                Ok(())
            }
        }
    }

    fn execute_navigation(&mut self, id: Id, options: &ShowOptions) {
        let Some(descriptor) = self.catalog.get(id) else {
            return;
        };
        let (navigation_mode, show_mode) = (descriptor.navigation_mode, descriptor.show_mode);
        let navigation_root = descriptor.force_clear_navigation;

        match (navigation_mode, show_mode) {
            (NavigationMode::NormalNavigation, ShowMode::HideOtherWindows) => {
                self.refresh_back_stack(id, options)
            }
            (NavigationMode::NoHistory, ShowMode::HideOtherWindows) => {
                let hidden = self.hide_navigable_windows();
                debug!("{:?} replaced {:?} without history", id, hidden);
            }
            (_, ShowMode::DoNothing) => {}
        }

        if navigation_root || options.force_clear_back_stack {
            info!("Entering navigation root {:?}", id);
            self.clear_back_stack("navigation root");
        } else if options.check_navigation && navigation_mode == NavigationMode::NormalNavigation {
            if let Some(owner) = self.back_stack.top_owner().filter(|&owner| owner != id) {
                info!(
                    "{:?} was reached without the back-stack (top is {:?}), dropping history",
                    id, owner
                );
                self.clear_back_stack("sideways navigation");
            }
        }
    }

    /// Hides the current screen and records it as the frame of `id`.
    fn refresh_back_stack(&mut self, id: Id, options: &ShowOptions) {
        if self.registry.shown().is_empty() {
            return;
        }

        let hidden = self.hide_navigable_windows();
        if options.add_to_back_stack {
            debug!("Pushing frame {:?} <- {:?}", id, hidden);
            self.back_stack.push(NavigationFrame::new(id, hidden));
            self.log_back_stack("push");
        }
    }

    /// Hides every shown window outside the Fixed group, without
    /// animation. Returns them in restore order.
    fn hide_navigable_windows(&mut self) -> Vec<Id> {
        let mut targets: Vec<Id> = self
            .registry
            .shown()
            .iter()
            .copied()
            .filter(|&w| self.group_of(w) != Some(WindowGroup::Fixed))
            .collect();
        targets.sort_by_key(|&w| self.restore_key(w));

        for &target in &targets {
            self.hide_directly(target);
        }
        targets
    }

    /// Restore order: layering group, then depth, then show order.
    ///
    /// Re-showing in this order gives every window a depth above the
    /// windows restored before it, which reproduces the recorded stacking.
    fn restore_key(&self, id: Id) -> (WindowGroup, Option<i32>, usize) {
        let instance = self.registry.get(id);
        (
            instance.map_or(WindowGroup::Normal, |w| w.group()),
            instance.and_then(|w| w.min_depth()),
            self.registry.shown().position(id).unwrap_or(usize::MAX),
        )
    }

    fn group_of(&self, id: Id) -> Option<WindowGroup> {
        self.registry.get(id).map(|w| w.group())
    }

    fn clear_back_stack(&mut self, reason: &str) {
        let dropped = self.back_stack.clear();
        if dropped > 0 {
            debug!("Back-stack cleared ({}), {} frames dropped", reason, dropped);
            self.log_back_stack(reason);
        }
    }

    fn log_back_stack(&self, operation: &str) {
        if self.config.log_navigation {
            debug!(
                "Back-stack after {}: {}",
                operation,
                format_back_stack(&self.back_stack)
            );
        }
    }

    /// Back request with the detailed outcome.
    pub fn pop_navigation(&mut self) -> NavResult<PopOutcome<Id>, Id> {
        if !self.deferred_shows.is_empty() {
            debug!("Back request ignored, previous restore still pending");
            return Ok(PopOutcome::RestorePending);
        }

        if let Some(active) = self.current.filter(|&w| self.registry.is_shown(w)) {
            let handle = self.handle.clone();
            if let Some(instance) = self.registry.get_mut(active) {
                if instance.behavior.on_back_requested(&handle) {
                    info!("Back request taken over by {:?}", active);
                    return Ok(PopOutcome::Interrupted);
                }
            }
        }

        self.real_pop()
    }

    fn real_pop(&mut self) -> NavResult<PopOutcome<Id>, Id> {
        let Some(owner) = self.back_stack.top_owner() else {
            return self.pop_to_predecessor();
        };

        if self.current != Some(owner) {
            warn!(
                "Back-stack top {:?} is not the active window {:?}, clearing",
                owner, self.current
            );
            self.clear_back_stack("owner mismatch");
            return Ok(PopOutcome::OwnerMismatch {
                owner,
                active: self.current,
            });
        }

        self.ensure_unlocked(owner)?;

        let Some(frame) = self.back_stack.pop() else {
            return Ok(PopOutcome::EmptyStack);
        };
        self.log_back_stack("pop");

        let restored = frame.into_targets();
        info!("⬅️ Back from {:?} to {:?}", owner, restored);
        let options = ShowOptions::default().without_navigation();
        self.hide_then_show(owner, restored.clone(), options);

        Ok(PopOutcome::Popped { owner, restored })
    }

    fn pop_to_predecessor(&mut self) -> NavResult<PopOutcome<Id>, Id> {
        let active = self.current.filter(|&w| self.registry.is_shown(w));
        let Some((from, to)) = active.and_then(|from| {
            self.catalog
                .get(from)
                .and_then(|d| d.predecessor)
                .map(|to| (from, to))
        }) else {
            debug!("Back request with an empty back-stack");
            return Ok(PopOutcome::EmptyStack);
        };

        self.ensure_unlocked(from)?;

        info!("⬅️ Back from {:?} to its predecessor {:?}", from, to);
        let options = ShowOptions::from_config(&self.config);
        self.hide_then_show(from, vec![to], options);

        Ok(PopOutcome::Predecessor { from, to })
    }

    fn ensure_unlocked(&self, id: Id) -> NavResult<(), Id> {
        match self.registry.get(id) {
            Some(instance) if instance.is_locked() => Err(NavError::LockedInstance {
                id,
                phase: instance.phase(),
            }),
            _ => Ok(()),
        }
    }

    /// Hides `owner`, then shows `targets` in order. With `wait_for_hide`
    /// the targets join the shown-set now and start animating once the
    /// owner's hide completes, so the owner's layers no longer count for
    /// their depth.
    fn hide_then_show(&mut self, owner: Id, targets: Vec<Id>, options: ShowOptions) {
        if !self.registry.is_shown(owner) {
            self.show_all(targets, options, Deferral::Now);
            return;
        }

        let then: Option<Continuation<Id>> = if self.config.wait_for_hide {
            Some(Box::new(|nav: &mut WindowNavigator<Id>| {
                nav.flush_deferred_shows()
            }))
        } else {
            None
        };
        let defer = if then.is_some() {
            Deferral::UntilFlush
        } else {
            Deferral::Now
        };

        if let Err(err) = self.hide_internal(owner, then) {
            warn!("Failed to hide {:?}, restoring at once: {}", owner, err);
            self.show_all(targets, options, Deferral::Now);
            return;
        }
        self.show_all(targets, options, defer);
    }

    fn show_all(&mut self, targets: Vec<Id>, options: ShowOptions, defer: Deferral) {
        for id in targets {
            match self.show_with_deferral(id, options.clone(), None, defer) {
                Ok(()) => {}
                Err(err) if err.is_benign() => debug!("Restore of {:?} skipped: {}", id, err),
                Err(err) => warn!("Failed to restore {:?}: {}", id, err),
            }
        }
    }

    /// Places and animates every window whose show was deferred.
    fn flush_deferred_shows(&mut self) {
        for (id, context) in std::mem::take(&mut self.deferred_shows) {
            let Some(descriptor) = self.catalog.get(id).cloned() else {
                continue;
            };
            if let Err(err) = self.begin_show(&descriptor, context.as_deref()) {
                warn!("Deferred show of {:?} failed: {}", id, err);
                self.registry.mark_hidden(id);
            }
        }
    }

    /// Drops a deferred show that has not started yet. The window leaves
    /// the shown-set without ever having been visible.
    pub(super) fn cancel_deferred_show(&mut self, id: Id) -> bool {
        let Some(index) = self.deferred_shows.iter().position(|(w, _)| *w == id) else {
            return false;
        };
        self.deferred_shows.remove(index);
        self.registry.mark_hidden(id);
        debug!("Deferred show of {:?} cancelled", id);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferral {
    Now,
    UntilFlush,
}
