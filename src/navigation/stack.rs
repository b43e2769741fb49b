//! Back-stack of navigation frames

use serde::Serialize;

/// One back-stack entry: the window that was shown, and the windows that
/// were hidden to show it, in the order they are to be restored.
///
/// Frames are never modified after they are pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationFrame<Id> {
    owner: Id,
    back_show_targets: Vec<Id>,
}

impl<Id: Copy + PartialEq> NavigationFrame<Id> {
    pub fn new(owner: Id, back_show_targets: Vec<Id>) -> Self {
        Self {
            owner,
            back_show_targets,
        }
    }

    pub fn owner(&self) -> Id {
        self.owner
    }

    pub fn back_show_targets(&self) -> &[Id] {
        &self.back_show_targets
    }

    pub(crate) fn into_targets(self) -> Vec<Id> {
        self.back_show_targets
    }
}

/// Last-in-first-out sequence of [`NavigationFrame`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStack<Id> {
    frames: Vec<NavigationFrame<Id>>,
}

impl<Id: Copy + PartialEq> BackStack<Id> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, frame: NavigationFrame<Id>) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<NavigationFrame<Id>> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&NavigationFrame<Id>> {
        self.frames.last()
    }

    pub fn top_owner(&self) -> Option<Id> {
        self.peek().map(NavigationFrame::owner)
    }

    /// Drops every frame, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.frames.len();
        self.frames.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from bottom (oldest) to top.
    pub fn frames(&self) -> &[NavigationFrame<Id>] {
        &self.frames
    }
}

impl<Id: Copy + PartialEq> Default for BackStack<Id> {
    fn default() -> Self {
        Self::new()
    }
}
