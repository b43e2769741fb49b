//! Window lifecycle transitions and event dispatch

use super::{Continuation, PendingTransition, WindowNavigator};
use crate::collaborators::TransitionDone;
use crate::error::{NavError, NavResult};
use crate::events::NavCommand;
use crate::window::{ColliderMode, Phase, Ticket, WindowDescriptor, WindowKey};
use log::{debug, info, trace, warn};

enum Event<Id: WindowKey> {
    Transition(Ticket),
    Command(NavCommand<Id>),
}

impl<Id: WindowKey> WindowNavigator<Id> {
    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    /// Places the window, records it as shown and starts its animation.
    pub(super) fn begin_show(
        &mut self,
        descriptor: &WindowDescriptor<Id>,
        context: Option<&str>,
    ) -> NavResult<(), Id> {
        let id = descriptor.id;
        let depth = self.depth.next_depth(descriptor.group, self.layering.as_ref());
        let ticket = self.issue_ticket();

        let instance = self
            .registry
            .get_mut(id)
            .ok_or(NavError::NotInstantiable(id))?;
        instance
            .lifecycle
            .begin_show(ticket)
            .map_err(|phase| NavError::LockedInstance { id, phase })?;

        let view = instance.view();
        instance.min_depth = Some(self.depth.apply(
            view,
            instance.min_depth,
            depth,
            self.layering.as_mut(),
        ));
        self.layering.set_visible(view, true);
        instance.behavior.on_show(context);
        self.depth.exceeds_ceiling(descriptor.group, self.layering.as_ref());

        self.registry.mark_shown(id);
        self.pending.insert(ticket, PendingTransition { id, then: None });
        if descriptor.tracks_history() {
            self.current = Some(id);
        }

        info!("🪟 Showing {:?} at depth {}", id, depth);
        self.animator
            .play_show(view, TransitionDone::new(ticket, self.completions_tx.clone()));

        let collider = descriptor.collider_mode;
        if collider != ColliderMode::None {
            self.background.attach_blocking_background(view, collider);
            if let Some(instance) = self.registry.get_mut(id) {
                instance.behavior.on_background_attached(collider);
            }
        }
        Ok(())
    }

    /// Starts the hide animation of a shown window.
    ///
    /// The window leaves the shown-set immediately; `then` runs once the
    /// animation completes.
    pub(super) fn hide_internal(
        &mut self,
        id: Id,
        then: Option<Continuation<Id>>,
    ) -> NavResult<(), Id> {
        if !self.registry.is_shown(id) {
            debug!("Hide of {:?} ignored, not shown", id);
            return Err(NavError::NotShown(id));
        }
        if self.cancel_deferred_show(id) {
            if let Some(then) = then {
                then(self);
            }
            return Ok(());
        }

        let ticket = self.issue_ticket();
        let instance = self
            .registry
            .get_mut(id)
            .ok_or(NavError::NotShown(id))?;
        if let Err(phase) = instance.lifecycle.begin_hide(ticket) {
            warn!("Hide of {:?} rejected while {:?}, retry once it settles", id, phase);
            return Err(NavError::LockedInstance { id, phase });
        }
        let view = instance.view();

        self.registry.mark_hidden(id);
        self.pending.insert(ticket, PendingTransition { id, then });

        debug!("Hiding {:?}", id);
        self.animator
            .play_hide(view, TransitionDone::new(ticket, self.completions_tx.clone()));
        Ok(())
    }

    /// Takes a window off screen at once, without animation.
    pub(super) fn hide_directly(&mut self, id: Id) {
        if self.cancel_deferred_show(id) {
            return;
        }
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };

        let previous = instance.lifecycle.force_hidden();
        let view = instance.view();
        instance.behavior.on_hidden();
        self.layering.set_visible(view, false);
        self.animator.reset_to_hidden(view);

        self.registry.mark_hidden(id);
        self.pending.retain(|_, pending| pending.id != id);
        debug!("Hid {:?} directly (was {:?})", id, previous);
    }

    fn finish_transition(&mut self, ticket: Ticket) {
        let Some(pending) = self.pending.remove(&ticket) else {
            trace!("Ignoring stale transition {}", ticket);
            return;
        };
        let id = pending.id;
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };

        match instance.lifecycle.finish(ticket) {
            Some(Phase::Hidden) => {
                let view = instance.view();
                instance.behavior.on_hidden();
                self.layering.set_visible(view, false);
                debug!("{:?} hidden", id);
            }
            Some(phase) => debug!("{:?} {:?}", id, phase),
            None => {
                trace!("Ignoring stale transition {} of {:?}", ticket, id);
                return;
            }
        }

        if let Some(then) = pending.then {
            then(self);
        }
    }

    fn run_command(&mut self, command: NavCommand<Id>) {
        debug!("Running deferred {:?}", command);
        let result = match command {
            NavCommand::Show(id, options) => self.show_window_with(id, options),
            NavCommand::Hide(id) => self.hide_window(id),
            NavCommand::Close(id) => self.close_window(id),
            NavCommand::Pop => self
                .pop_navigation()
                .map(|outcome| debug!("Deferred pop: {:?}", outcome)),
            NavCommand::ShowMessageBox(payload) => self.show_message_box(payload),
            NavCommand::CloseMessageBox => self.close_message_box(),
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_benign() => debug!("Deferred command skipped: {}", err),
            Err(err) => warn!("Deferred command failed: {}", err),
        }
    }

    /// Processes queued completions and commands until the queue is empty,
    /// including events they produce. Returns how many were processed.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut processed = 0;
        loop {
            if let Ok(ticket) = self.completions_rx.try_recv() {
                self.finish_transition(ticket);
            } else if let Ok(command) = self.commands_rx.try_recv() {
                self.run_command(command);
            } else {
                break;
            }
            processed += 1;
        }
        processed
    }

    /// Waits for and processes one event. Completions are served before
    /// commands. Returns `false` if both queues are closed.
    pub async fn next_event(&mut self) -> bool {
        let event = tokio::select! {
            biased;
            Some(ticket) = self.completions_rx.recv() => Event::Transition(ticket),
            Some(command) = self.commands_rx.recv() => Event::Command(command),
            else => return false,
        };

        match event {
            Event::Transition(ticket) => self.finish_transition(ticket),
            Event::Command(command) => self.run_command(command),
        }
        true
    }
}
