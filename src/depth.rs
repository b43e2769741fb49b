//! Layering depth allocation
//!
//! Each [`WindowGroup`] starts at its own base depth. A newly shown window
//! goes one above the highest visible depth in its group, but never below
//! the group's base:
//!
//! ```text
//! depth = max(max_visible_depth(group) + 1, base(group))
//! ```
//!
//! A window is made of several layered panels. Only the window's minimum
//! depth is recomputed; its panels keep their relative order, so panel `i`
//! (by original rank) lands on `min_depth + i`.
//!
//! Depths are not capped at the next group's base. A group whose windows
//! stack enough panels climbs into the range of the group above it; the
//! navigator logs a warning when that happens. Leave bases far enough
//! apart for the panel counts in use.

use crate::collaborators::{LayeringBackend, ViewHandle};
use crate::config::DepthConfig;
use crate::window::WindowGroup;
use log::{debug, trace, warn};
use std::collections::HashMap;

/// Computes window depths from group bases and the layering backend.
#[derive(Debug, Clone)]
pub struct DepthAllocator {
    bases: DepthConfig,
}

impl DepthAllocator {
    pub fn new(bases: DepthConfig) -> Self {
        Self { bases }
    }

    pub fn base(&self, group: WindowGroup) -> i32 {
        match group {
            WindowGroup::Normal => self.bases.normal_base,
            WindowGroup::Fixed => self.bases.fixed_base,
            WindowGroup::PopUp => self.bases.popup_base,
        }
    }

    /// Depth for the next window shown in `group`.
    pub fn next_depth(&self, group: WindowGroup, layering: &dyn LayeringBackend) -> i32 {
        let base = self.base(group);
        let depth = match layering.max_depth_in_group(group) {
            Some(max) => max.saturating_add(1).max(base),
            None => base,
        };
        debug!("{:?} group next depth is {}", group, depth);
        depth
    }

    /// Base of the next group up, which `group`'s panels should stay below.
    pub fn ceiling(&self, group: WindowGroup) -> Option<i32> {
        match group {
            WindowGroup::Normal => Some(self.bases.fixed_base),
            WindowGroup::Fixed => Some(self.bases.popup_base),
            WindowGroup::PopUp => None,
        }
    }

    /// Whether visible panels of `group` reach its ceiling. Logs a warning
    /// when they do.
    pub fn exceeds_ceiling(&self, group: WindowGroup, layering: &dyn LayeringBackend) -> bool {
        let (Some(ceiling), Some(top)) = (self.ceiling(group), layering.max_depth_in_group(group))
        else {
            return false;
        };
        if top < ceiling {
            return false;
        }
        warn!(
            "{:?} group panels reach depth {}, at or above the next base {}",
            group, top, ceiling
        );
        true
    }

    /// Moves `view` to `depth` unless it already sits there.
    ///
    /// Returns the depth now recorded for the view.
    pub fn apply(
        &self,
        view: ViewHandle,
        current: Option<i32>,
        depth: i32,
        layering: &mut dyn LayeringBackend,
    ) -> i32 {
        if current != Some(depth) {
            layering.set_min_depth(view, depth);
        }
        depth
    }
}

impl Default for DepthAllocator {
    fn default() -> Self {
        Self::new(DepthConfig::default())
    }
}

/// Panel depths of one view.
#[derive(Debug, Clone)]
struct PanelView {
    group: WindowGroup,
    /// Current depth of each panel, in the view's declaration order
    panels: Vec<i32>,
    visible: bool,
}

impl PanelView {
    fn max_depth(&self) -> Option<i32> {
        self.panels.iter().copied().max()
    }

    /// Re-bases the panels on `depth`, preserving their relative rank.
    /// Ties keep declaration order.
    fn rebase(&mut self, depth: i32) {
        let mut ranked: Vec<usize> = (0..self.panels.len()).collect();
        ranked.sort_by_key(|&i| (self.panels[i], i));
        for (rank, index) in ranked.into_iter().enumerate() {
            self.panels[index] = depth + rank as i32;
        }
    }
}

/// In-memory layering backend modelling views made of nested panels.
#[derive(Debug, Default, Clone)]
pub struct PanelStack {
    views: HashMap<ViewHandle, PanelView>,
    /// Panel layouts declared ahead of adoption
    layouts: HashMap<ViewHandle, Vec<i32>>,
}

impl PanelStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the panel depths a view will have once adopted. Views with
    /// no declared layout get a single panel.
    pub fn with_layout(mut self, view: ViewHandle, panels: Vec<i32>) -> Self {
        self.layouts.insert(view, panels);
        self
    }

    pub fn panels(&self, view: ViewHandle) -> Option<&[i32]> {
        self.views.get(&view).map(|v| v.panels.as_slice())
    }

    pub fn min_depth(&self, view: ViewHandle) -> Option<i32> {
        self.views.get(&view).and_then(|v| v.panels.iter().copied().min())
    }

    pub fn is_visible(&self, view: ViewHandle) -> bool {
        self.views.get(&view).map_or(false, |v| v.visible)
    }
}

impl LayeringBackend for PanelStack {
    fn adopt(&mut self, view: ViewHandle, group: WindowGroup) {
        let panels = self.layouts.remove(&view).unwrap_or_else(|| vec![0]);
        self.views.insert(
            view,
            PanelView {
                group,
                panels,
                visible: false,
            },
        );
    }

    fn release(&mut self, view: ViewHandle) {
        self.views.remove(&view);
    }

    fn max_depth_in_group(&self, group: WindowGroup) -> Option<i32> {
        self.views
            .values()
            .filter(|v| v.visible && v.group == group)
            .filter_map(PanelView::max_depth)
            .max()
    }

    fn set_min_depth(&mut self, view: ViewHandle, depth: i32) {
        if let Some(v) = self.views.get_mut(&view) {
            v.rebase(depth);
            trace!("View {:?} panels now {:?}", view, v.panels);
        }
    }

    fn set_visible(&mut self, view: ViewHandle, visible: bool) {
        if let Some(v) = self.views.get_mut(&view) {
            v.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(stack: &mut PanelStack, view: ViewHandle, group: WindowGroup) {
        stack.adopt(view, group);
        stack.set_visible(view, true);
    }

    #[test]
    fn test_empty_group_starts_at_base() {
        let alloc = DepthAllocator::default();
        let stack = PanelStack::new();
        assert_eq!(alloc.next_depth(WindowGroup::Normal, &stack), 2);
        assert_eq!(alloc.next_depth(WindowGroup::Fixed, &stack), 100);
        assert_eq!(alloc.next_depth(WindowGroup::PopUp, &stack), 150);
    }

    #[test]
    fn test_next_depth_goes_above_visible_panels() {
        let alloc = DepthAllocator::default();
        let mut stack = PanelStack::new().with_layout(ViewHandle(1), vec![0, 1, 2]);
        shown(&mut stack, ViewHandle(1), WindowGroup::Normal);
        stack.set_min_depth(ViewHandle(1), 2);

        // Panels occupy 2..=4
        assert_eq!(alloc.next_depth(WindowGroup::Normal, &stack), 5);
        // Other groups are unaffected
        assert_eq!(alloc.next_depth(WindowGroup::PopUp, &stack), 150);
    }

    #[test]
    fn test_hidden_views_do_not_raise_depth() {
        let alloc = DepthAllocator::default();
        let mut stack = PanelStack::new();
        shown(&mut stack, ViewHandle(1), WindowGroup::Normal);
        stack.set_min_depth(ViewHandle(1), 40);
        stack.set_visible(ViewHandle(1), false);

        assert_eq!(alloc.next_depth(WindowGroup::Normal, &stack), 2);
    }

    #[test]
    fn test_depth_never_below_base() {
        let alloc = DepthAllocator::default();
        let mut stack = PanelStack::new();
        shown(&mut stack, ViewHandle(1), WindowGroup::PopUp);
        stack.set_min_depth(ViewHandle(1), -20);

        assert_eq!(alloc.next_depth(WindowGroup::PopUp, &stack), 150);
    }

    #[test]
    fn test_tall_views_reach_next_group() {
        let alloc = DepthAllocator::default();
        let mut stack = PanelStack::new()
            .with_layout(ViewHandle(1), (0..60).collect())
            .with_layout(ViewHandle(2), (0..60).collect());

        let place = |stack: &mut PanelStack, view: ViewHandle| {
            stack.adopt(view, WindowGroup::Normal);
            let depth = alloc.next_depth(WindowGroup::Normal, &*stack);
            stack.set_min_depth(view, depth);
            stack.set_visible(view, true);
            depth
        };

        let first = place(&mut stack, ViewHandle(1));
        assert!(!alloc.exceeds_ceiling(WindowGroup::Normal, &stack));
        let second = place(&mut stack, ViewHandle(2));
        assert_eq!((first, second), (2, 62));
        assert_eq!(stack.max_depth_in_group(WindowGroup::Normal), Some(121));
        assert!(alloc.exceeds_ceiling(WindowGroup::Normal, &stack));
        assert_eq!(alloc.ceiling(WindowGroup::PopUp), None);
    }

    #[test]
    fn test_rebase_preserves_relative_order() {
        let mut stack = PanelStack::new().with_layout(ViewHandle(7), vec![10, -3, 4, 4]);
        stack.adopt(ViewHandle(7), WindowGroup::Normal);
        stack.set_min_depth(ViewHandle(7), 20);

        // -3 → 20, the two 4s → 21 and 22 in declaration order, 10 → 23
        assert_eq!(stack.panels(ViewHandle(7)), Some(&[23, 20, 21, 22][..]));
        assert_eq!(stack.min_depth(ViewHandle(7)), Some(20));
    }

    #[test]
    fn test_rebase_is_idempotent() {
        let mut stack = PanelStack::new().with_layout(ViewHandle(1), vec![5, 0, 2]);
        stack.adopt(ViewHandle(1), WindowGroup::Normal);
        stack.set_min_depth(ViewHandle(1), 8);
        let once = stack.panels(ViewHandle(1)).map(<[i32]>::to_vec);
        stack.set_min_depth(ViewHandle(1), 8);
        assert_eq!(stack.panels(ViewHandle(1)).map(<[i32]>::to_vec), once);
    }

    #[test]
    fn test_apply_skips_unchanged_depth() {
        struct Counting {
            calls: usize,
        }
        impl LayeringBackend for Counting {
            fn adopt(&mut self, _view: ViewHandle, _group: WindowGroup) {}
            fn max_depth_in_group(&self, _group: WindowGroup) -> Option<i32> {
                None
            }
            fn set_min_depth(&mut self, _view: ViewHandle, _depth: i32) {
                self.calls += 1;
            }
            fn set_visible(&mut self, _view: ViewHandle, _visible: bool) {}
        }

        let alloc = DepthAllocator::default();
        let mut backend = Counting { calls: 0 };
        assert_eq!(alloc.apply(ViewHandle(1), None, 2, &mut backend), 2);
        assert_eq!(alloc.apply(ViewHandle(1), Some(2), 2, &mut backend), 2);
        assert_eq!(backend.calls, 1);
    }
}
