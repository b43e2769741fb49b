//! External collaborators
//!
//! The navigator never renders, animates or instantiates anything itself.
//! It drives these narrow interfaces instead, and ships headless
//! implementations that are enough for tests and for hosts that only need
//! the bookkeeping.

use crate::depth::PanelStack;
use crate::events::NavigatorHandle;
use crate::message_box::SupportsMessagePayload;
use crate::window::{ColliderMode, Ticket, WindowGroup, WindowKey};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedSender;

/// Opaque handle to an instantiated view, issued by a [`ViewFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewHandle(pub u64);

/// Completion token handed to an [`Animator`].
///
/// Call [`complete`](Self::complete) once the animation has finished. The
/// token is `Send`, so it can be completed from a timer task. Dropping it
/// without completing leaves the window locked.
#[derive(Debug)]
#[must_use = "a transition stays locked until its token is completed"]
pub struct TransitionDone {
    ticket: Ticket,
    tx: UnboundedSender<Ticket>,
}

impl TransitionDone {
    pub(crate) fn new(ticket: Ticket, tx: UnboundedSender<Ticket>) -> Self {
        Self { ticket, tx }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn complete(self) {
        if self.tx.send(self.ticket).is_err() {
            debug!("Navigator gone before transition {} completed", self.ticket);
        }
    }
}

/// Creates views for window identifiers.
pub trait ViewFactory<Id: WindowKey> {
    /// Returns `None` when there is no recipe for `id`.
    fn instantiate(&mut self, id: Id) -> Option<ViewHandle>;

    /// Parents a freshly created view under its layering group's root.
    fn attach(&mut self, view: ViewHandle, group: WindowGroup);

    /// Per-instance hooks for the window. Plain windows need none.
    fn behavior(&mut self, _id: Id) -> Box<dyn WindowBehavior<Id>> {
        Box::new(PlainWindow)
    }

    /// Called on full teardown.
    fn destroy(&mut self, _view: ViewHandle) {}
}

/// Plays show/hide transitions.
pub trait Animator {
    fn play_show(&mut self, view: ViewHandle, done: TransitionDone);
    fn play_hide(&mut self, view: ViewHandle, done: TransitionDone);

    /// Snaps a view to its hidden pose without animating.
    fn reset_to_hidden(&mut self, view: ViewHandle);
}

/// Scene-graph depth operations.
pub trait LayeringBackend {
    /// Starts tracking a newly created view in `group`.
    fn adopt(&mut self, view: ViewHandle, group: WindowGroup);

    /// Stops tracking a destroyed view.
    fn release(&mut self, _view: ViewHandle) {}

    /// Highest depth used by any visible view in `group`.
    fn max_depth_in_group(&self, group: WindowGroup) -> Option<i32>;

    /// Moves the view so its lowest layer sits at `depth`, keeping the
    /// relative order of the view's own layers.
    fn set_min_depth(&mut self, view: ViewHandle, depth: i32);

    fn set_visible(&mut self, view: ViewHandle, visible: bool);
}

/// Adds input-blocking backgrounds behind modal-style windows.
pub trait BackgroundDecorator {
    fn attach_blocking_background(&mut self, view: ViewHandle, mode: ColliderMode);
}

/// Hooks a window instance may implement.
///
/// Every method has a default, so a window only overrides what it needs.
pub trait WindowBehavior<Id: WindowKey> {
    /// Clears per-show state. Runs on first creation and on forced resets.
    fn on_reset(&mut self) {}

    /// The show transition has started.
    fn on_show(&mut self, _context: Option<&str>) {}

    /// The window left the screen, animated or not.
    fn on_hidden(&mut self) {}

    fn on_background_attached(&mut self, _mode: ColliderMode) {}

    /// Modal interrupt gate: return `true` to take over a back request,
    /// for instance by opening a confirmation prompt. The window is then
    /// responsible for issuing the pop again through `nav`.
    fn on_back_requested(&mut self, _nav: &NavigatorHandle<Id>) -> bool {
        false
    }

    /// Capability query for message-box style windows.
    fn message_payload(&mut self) -> Option<&mut dyn SupportsMessagePayload<Id>> {
        None
    }
}

/// Window with no hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainWindow;

impl<Id: WindowKey> WindowBehavior<Id> for PlainWindow {}

type BehaviorRecipe<Id> = Box<dyn FnMut() -> Box<dyn WindowBehavior<Id>>>;

/// View factory that hands out sequential handles without a scene.
pub struct HeadlessViews<Id> {
    next_view: u64,
    missing: HashSet<Id>,
    behaviors: HashMap<Id, BehaviorRecipe<Id>>,
    instantiated: Rc<RefCell<Vec<Id>>>,
}

impl<Id: WindowKey> HeadlessViews<Id> {
    pub fn new() -> Self {
        Self {
            next_view: 1,
            missing: HashSet::new(),
            behaviors: HashMap::new(),
            instantiated: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Makes `instantiate(id)` fail.
    pub fn without(mut self, id: Id) -> Self {
        self.missing.insert(id);
        self
    }

    pub fn with_behavior<F>(mut self, id: Id, recipe: F) -> Self
    where
        F: FnMut() -> Box<dyn WindowBehavior<Id>> + 'static,
    {
        self.behaviors.insert(id, Box::new(recipe));
        self
    }

    /// Shared log of every successful instantiation, in order.
    pub fn instantiation_log(&self) -> Rc<RefCell<Vec<Id>>> {
        Rc::clone(&self.instantiated)
    }
}

impl<Id: WindowKey> Default for HeadlessViews<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: WindowKey> ViewFactory<Id> for HeadlessViews<Id> {
    fn instantiate(&mut self, id: Id) -> Option<ViewHandle> {
        if self.missing.contains(&id) {
            return None;
        }
        let view = ViewHandle(self.next_view);
        self.next_view += 1;
        self.instantiated.borrow_mut().push(id);
        Some(view)
    }

    fn attach(&mut self, _view: ViewHandle, _group: WindowGroup) {}

    fn behavior(&mut self, id: Id) -> Box<dyn WindowBehavior<Id>> {
        match self.behaviors.get_mut(&id) {
            Some(recipe) => recipe(),
            None => Box::new(PlainWindow),
        }
    }
}

/// Animator whose transitions finish immediately. Completions are still
/// delivered through the navigator's event queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn play_show(&mut self, _view: ViewHandle, done: TransitionDone) {
        done.complete();
    }

    fn play_hide(&mut self, _view: ViewHandle, done: TransitionDone) {
        done.complete();
    }

    fn reset_to_hidden(&mut self, _view: ViewHandle) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoBackground;

impl BackgroundDecorator for NoBackground {
    fn attach_blocking_background(&mut self, _view: ViewHandle, _mode: ColliderMode) {}
}

/// Everything a navigator drives.
pub struct Collaborators<Id: WindowKey> {
    pub views: Box<dyn ViewFactory<Id>>,
    pub animator: Box<dyn Animator>,
    pub layering: Box<dyn LayeringBackend>,
    pub background: Box<dyn BackgroundDecorator>,
}

impl<Id: WindowKey> Collaborators<Id> {
    pub fn new(
        views: impl ViewFactory<Id> + 'static,
        animator: impl Animator + 'static,
        layering: impl LayeringBackend + 'static,
        background: impl BackgroundDecorator + 'static,
    ) -> Self {
        Self {
            views: Box::new(views),
            animator: Box::new(animator),
            layering: Box::new(layering),
            background: Box::new(background),
        }
    }

    /// Headless views, instant animations and an in-memory panel stack.
    pub fn headless() -> Self {
        Self::new(
            HeadlessViews::new(),
            InstantAnimator,
            PanelStack::new(),
            NoBackground,
        )
    }

    pub fn with_views(mut self, views: impl ViewFactory<Id> + 'static) -> Self {
        self.views = Box::new(views);
        self
    }

    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    pub fn with_layering(mut self, layering: impl LayeringBackend + 'static) -> Self {
        self.layering = Box::new(layering);
        self
    }

    pub fn with_background(mut self, background: impl BackgroundDecorator + 'static) -> Self {
        self.background = Box::new(background);
        self
    }
}
