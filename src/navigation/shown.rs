//! Shown-set: the windows currently on screen
//!
//! This module provides the `ShownSet` data structure, which records the
//! windows that are visible in the order they were shown. Windows are kept
//! from bottom to top, with the last entry being the most recently shown.

use std::collections::HashMap;
use std::hash::Hash;

/// Visible windows in show order, with O(1) membership.
///
/// A window appears at most once.
///
/// # Examples
///
/// ```
/// use panelnav::navigation::ShownSet;
///
/// let mut shown = ShownSet::new();
/// shown.push("menu");
/// shown.push("top_bar");
///
/// assert_eq!(shown.top(), Some("top_bar"));
/// ```
#[derive(Debug, Clone)]
pub struct ShownSet<Id> {
    /// Windows ordered from first shown to last shown
    order: Vec<Id>,

    /// Fast lookup: window → position in `order`
    positions: HashMap<Id, usize>,
}

impl<Id: Copy + Eq + Hash> ShownSet<Id> {
    /// Creates a new empty shown-set.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Adds a window on top.
    ///
    /// Returns `false` if the window was already present.
    pub fn push(&mut self, id: Id) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }

        let position = self.order.len();
        self.order.push(id);
        self.positions.insert(id, position);
        true
    }

    /// Removes a window.
    ///
    /// Returns its previous position, or `None` if it was not shown.
    pub fn remove(&mut self, id: Id) -> Option<usize> {
        let pos = self.positions.remove(&id)?;
        self.order.remove(pos);
        self.rebuild_positions();
        Some(pos)
    }

    /// Windows from first shown to last shown.
    pub fn as_slice(&self) -> &[Id] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.order.iter()
    }

    /// Most recently shown window.
    pub fn top(&self) -> Option<Id> {
        self.order.last().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.positions.contains_key(&id)
    }

    /// Show-order index; 0 is the earliest shown.
    pub fn position(&self, id: Id) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.positions.clear();
    }

    fn rebuild_positions(&mut self) {
        self.positions.clear();
        for (i, &id) in self.order.iter().enumerate() {
            self.positions.insert(id, i);
        }
    }
}

impl<Id: Copy + Eq + Hash> Default for ShownSet<Id> {
    fn default() -> Self {
        Self::new()
    }
}
