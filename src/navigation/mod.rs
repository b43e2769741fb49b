//! Window Navigation
//!
//! [`WindowNavigator`] is the single owned service that decides which
//! windows are shown, assigns their layering depth, and keeps the
//! back-stack that "back" pops to restore an earlier screen.
//!
//! All work happens on one thread. Every request applies its bookkeeping
//! (shown-set, back-stack, depth) synchronously before any animation
//! starts. Animations finish later: the animator completes a
//! [`TransitionDone`](crate::TransitionDone) token and the navigator
//! advances the window's lifecycle on its next
//! [`dispatch_pending`](WindowNavigator::dispatch_pending) or
//! [`next_event`](WindowNavigator::next_event).
//!
//! ```text
//! show_window(W) ──► registry (resolve/create) ──► hide siblings, push frame
//!                                                        │
//!            animator.play_show ◄── depth allocator ◄────┘
//!
//! pop ──► modal gate? ──► pop frame ──► hide owner ──► restore hidden windows
//! ```

mod engine;
mod gate;
mod options;
mod shown;
mod snapshot;
mod stack;
mod transitions;

#[cfg(test)]
mod property_tests;

pub use gate::ConfirmOnBack;
pub use options::{PopOutcome, ShowOptions};
pub use shown::ShownSet;
pub use snapshot::NavigationSnapshot;
pub use stack::{BackStack, NavigationFrame};

use crate::collaborators::{
    Animator, BackgroundDecorator, Collaborators, LayeringBackend, ViewFactory, ViewHandle,
    WindowBehavior,
};
use crate::config::NavigatorConfig;
use crate::depth::DepthAllocator;
use crate::error::{NavError, NavResult};
use crate::events::{NavCommand, NavigatorHandle};
use crate::message_box::{MessagePayload, SupportsMessagePayload};
use crate::window::{Phase, Ticket, WindowCatalog, WindowKey, WindowRegistry};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Work resumed when a transition completes.
pub type Continuation<Id> = Box<dyn FnOnce(&mut WindowNavigator<Id>)>;

struct PendingTransition<Id: WindowKey> {
    id: Id,
    then: Option<Continuation<Id>>,
}

/// The window navigation service.
pub struct WindowNavigator<Id: WindowKey> {
    config: NavigatorConfig,
    catalog: WindowCatalog<Id>,
    registry: WindowRegistry<Id>,
    back_stack: BackStack<Id>,
    depth: DepthAllocator,

    views: Box<dyn ViewFactory<Id>>,
    animator: Box<dyn Animator>,
    layering: Box<dyn LayeringBackend>,
    background: Box<dyn BackgroundDecorator>,

    /// Most recently shown window that takes part in back-stack bookkeeping
    current: Option<Id>,

    /// Window used by `show_message_box`
    message_box: Option<Id>,

    next_ticket: Ticket,
    pending: HashMap<Ticket, PendingTransition<Id>>,

    /// Restored windows already in the shown-set, waiting for the
    /// previous screen's hide to finish before they animate in
    deferred_shows: Vec<(Id, Option<String>)>,

    handle: NavigatorHandle<Id>,
    commands_rx: UnboundedReceiver<NavCommand<Id>>,
    completions_tx: UnboundedSender<Ticket>,
    completions_rx: UnboundedReceiver<Ticket>,
}

impl<Id: WindowKey> WindowNavigator<Id> {
    /// Create a navigator over `catalog`, driving `collaborators`.
    pub fn new(
        config: NavigatorConfig,
        catalog: WindowCatalog<Id>,
        collaborators: Collaborators<Id>,
    ) -> Result<Self> {
        config
            .validate()
            .context("Invalid navigator configuration")?;

        let (commands_tx, commands_rx) = unbounded_channel();
        let (completions_tx, completions_rx) = unbounded_channel();

        info!(
            "🧭 Initializing window navigator ({} managed windows)",
            catalog.len()
        );

        Ok(Self {
            depth: DepthAllocator::new(config.depth.clone()),
            config,
            catalog,
            registry: WindowRegistry::new(),
            back_stack: BackStack::new(),
            views: collaborators.views,
            animator: collaborators.animator,
            layering: collaborators.layering,
            background: collaborators.background,
            current: None,
            message_box: None,
            next_ticket: 0,
            pending: HashMap::new(),
            deferred_shows: Vec::new(),
            handle: NavigatorHandle::new(commands_tx),
            commands_rx,
            completions_tx,
            completions_rx,
        })
    }

    /// Names the window that `show_message_box` uses. Its behavior must
    /// support [`SupportsMessagePayload`].
    pub fn with_message_box(mut self, id: Id) -> Self {
        if !self.catalog.contains(id) {
            warn!("Message box window {:?} is not in the catalog", id);
        }
        self.message_box = Some(id);
        self
    }

    /// Sender for deferred commands, for hooks and callbacks.
    pub fn handle(&self) -> NavigatorHandle<Id> {
        self.handle.clone()
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &WindowCatalog<Id> {
        &self.catalog
    }

    pub fn back_stack(&self) -> &BackStack<Id> {
        &self.back_stack
    }

    pub fn is_window_shown(&self, id: Id) -> bool {
        self.registry.is_shown(id)
    }

    /// Shown windows, in show order.
    pub fn shown_windows(&self) -> &[Id] {
        self.registry.shown().as_slice()
    }

    /// The window a back request is addressed to.
    pub fn current_window(&self) -> Option<Id> {
        self.current
    }

    pub fn window_phase(&self, id: Id) -> Option<Phase> {
        self.registry.get(id).map(|w| w.phase())
    }

    pub fn window_depth(&self, id: Id) -> Option<i32> {
        self.registry.get(id).and_then(|w| w.min_depth())
    }

    pub fn window_view(&self, id: Id) -> Option<ViewHandle> {
        self.registry.get(id).map(|w| w.view())
    }

    pub fn instance_count(&self) -> usize {
        self.registry.instance_count()
    }

    pub fn behavior_mut(&mut self, id: Id) -> Option<&mut dyn WindowBehavior<Id>> {
        self.registry.get_mut(id).map(|w| w.behavior_mut())
    }

    /// Whether restored windows are still waiting for their animation.
    pub fn has_pending_restore(&self) -> bool {
        !self.deferred_shows.is_empty()
    }

    /// Show `id` with default options.
    pub fn show_window(&mut self, id: Id) -> NavResult<(), Id> {
        let options = ShowOptions::from_config(&self.config);
        self.show_window_with(id, options)
    }

    pub fn show_window_with(&mut self, id: Id, options: ShowOptions) -> NavResult<(), Id> {
        self.show_internal(id, options, None)
    }

    /// Animate `id` out. Does not touch the back-stack.
    pub fn hide_window(&mut self, id: Id) -> NavResult<(), Id> {
        self.hide_internal(id, None)
    }

    /// Animate `id` out and run `on_complete` once it is hidden.
    pub fn hide_window_then<F>(&mut self, id: Id, on_complete: F) -> NavResult<(), Id>
    where
        F: FnOnce(&mut WindowNavigator<Id>) + 'static,
    {
        self.hide_internal(id, Some(Box::new(on_complete)))
    }

    /// Close `id`, keeping the back-stack consistent: closing the owner of
    /// the top frame is a back request, anything else is a plain hide.
    /// A back request that leaves `id` on screen (a stale frame) also ends
    /// in a plain hide.
    pub fn close_window(&mut self, id: Id) -> NavResult<(), Id> {
        if !self.catalog.contains(id) {
            error!("Close of unmanaged window {:?}", id);
            return Err(NavError::NotManaged(id));
        }
        if !self.registry.is_shown(id) {
            return Ok(());
        }

        if self.back_stack.top_owner() == Some(id) {
            info!("Closing {:?} through the back-stack", id);
            match self.pop_navigation()? {
                PopOutcome::OwnerMismatch { .. } | PopOutcome::EmptyStack => {
                    debug!("Back-stack did not close {:?}, hiding it", id);
                }
                _ => return Ok(()),
            }
        } else {
            info!("Closing {:?} without navigation", id);
        }
        self.hide_window(id)
    }

    /// Back request. Returns `true` when the active window's gate took it
    /// over; the gate is then responsible for popping again.
    pub fn pop_navigation_window(&mut self) -> bool {
        match self.pop_navigation() {
            Ok(outcome) => outcome.handled_by_interrupt(),
            Err(err) => {
                warn!("Back request rejected: {}", err);
                false
            }
        }
    }

    /// Show the message box with `payload`.
    pub fn show_message_box(&mut self, payload: MessagePayload<Id>) -> NavResult<(), Id> {
        let id = self.message_box.ok_or(NavError::NoMessageBox)?;
        let options = ShowOptions::from_config(&self.config);
        self.show_internal(id, options, Some(payload))
    }

    pub fn close_message_box(&mut self) -> NavResult<(), Id> {
        let id = self.message_box.ok_or(NavError::NoMessageBox)?;
        self.hide_window(id)
    }

    /// Run `f` against the message box's payload capability.
    pub fn with_message_payload<R>(
        &mut self,
        f: impl FnOnce(&mut dyn SupportsMessagePayload<Id>) -> R,
    ) -> Option<R> {
        let id = self.message_box?;
        let instance = self.registry.get_mut(id)?;
        instance.behavior.message_payload().map(f)
    }

    /// Runs the action of message-box button `index`, as a host does when
    /// the user taps it. Returns `false` if there is no such action.
    pub fn press_message_button(&mut self, index: usize) -> bool {
        let action = self
            .with_message_payload(|m| m.payload_mut().and_then(|p| p.take_action(index)))
            .flatten();

        match action {
            Some(action) => {
                action(&self.handle);
                true
            }
            None => false,
        }
    }

    /// Lift a shown window above everything else in its group.
    pub fn raise_to_top(&mut self, id: Id) -> NavResult<(), Id> {
        let instance = match self.registry.get(id) {
            Some(instance) if self.registry.is_shown(id) => instance,
            _ => return Err(NavError::NotShown(id)),
        };
        let group = instance.group();
        let current = instance.min_depth();

        let already_top = self
            .registry
            .shown()
            .iter()
            .filter(|&&other| other != id)
            .filter_map(|&other| self.registry.get(other))
            .filter(|other| other.group() == group)
            .all(|other| other.min_depth() < current);
        if already_top {
            return Ok(());
        }

        let depth = self.depth.next_depth(group, self.layering.as_ref());
        if let Some(instance) = self.registry.get_mut(id) {
            let view = instance.view();
            instance.min_depth = Some(self.depth.apply(
                view,
                instance.min_depth,
                depth,
                self.layering.as_mut(),
            ));
            info!("Raised {:?} to depth {}", id, depth);
        }
        Ok(())
    }

    /// Full teardown: hides everything, forgets all history and destroys
    /// every instance.
    pub fn clear_all_windows(&mut self) {
        let shown: Vec<Id> = self.registry.shown().as_slice().to_vec();
        for id in shown {
            self.hide_directly(id);
        }

        let frames = self.back_stack.clear();
        self.pending.clear();
        self.deferred_shows.clear();
        self.current = None;

        let destroyed = self
            .registry
            .teardown(self.views.as_mut(), self.layering.as_mut());
        info!(
            "🧹 Cleared all windows ({} destroyed, {} frames dropped)",
            destroyed, frames
        );
    }

    pub fn snapshot(&self) -> NavigationSnapshot<Id> {
        NavigationSnapshot {
            shown: self.registry.shown().as_slice().to_vec(),
            back_stack: self.back_stack.frames().to_vec(),
            current: self.current,
        }
    }
}
