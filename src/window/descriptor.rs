//! Static per-window configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Identifier of a window type.
///
/// Any small copyable key works; an application usually declares a plain
/// `enum` of its screens.
pub trait WindowKey: Copy + Eq + Hash + Ord + fmt::Debug + 'static {}

impl<T> WindowKey for T where T: Copy + Eq + Hash + Ord + fmt::Debug + 'static {}

/// Layering group. Each group owns a disjoint depth range, so windows of
/// different groups never interleave visually.
///
/// Variants are ordered by their default base depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowGroup {
    /// Full-screen panels (main menu, level select, shop)
    Normal,
    /// Persistent chrome such as a top bar; never hidden by navigation
    Fixed,
    /// Overlays and dialogs
    PopUp,
}

impl Default for WindowGroup {
    fn default() -> Self {
        WindowGroup::Normal
    }
}

/// What showing a window does to its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowMode {
    HideOtherWindows,
    DoNothing,
}

impl Default for ShowMode {
    fn default() -> Self {
        ShowMode::DoNothing
    }
}

/// Whether showing a window records back-stack history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    NormalNavigation,
    NoHistory,
}

impl Default for NavigationMode {
    fn default() -> Self {
        NavigationMode::NoHistory
    }
}

/// Input-blocking background placed behind a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderMode {
    None,
    /// Transparent blocker
    Plain,
    /// Blocker with a dimmed backdrop
    WithBackground,
}

impl Default for ColliderMode {
    fn default() -> Self {
        ColliderMode::None
    }
}

/// Immutable configuration of one window type, defined at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor<Id> {
    pub id: Id,

    #[serde(default)]
    pub group: WindowGroup,

    #[serde(default)]
    pub show_mode: ShowMode,

    #[serde(default)]
    pub navigation_mode: NavigationMode,

    #[serde(default)]
    pub collider_mode: ColliderMode,

    /// Entry point: showing this window discards all back-stack history
    #[serde(default)]
    pub force_clear_navigation: bool,

    /// Where "back" goes when the back-stack has nothing recorded
    pub predecessor: Option<Id>,
}

impl<Id: WindowKey> WindowDescriptor<Id> {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            group: WindowGroup::default(),
            show_mode: ShowMode::default(),
            navigation_mode: NavigationMode::default(),
            collider_mode: ColliderMode::default(),
            force_clear_navigation: false,
            predecessor: None,
        }
    }

    pub fn group(mut self, group: WindowGroup) -> Self {
        self.group = group;
        self
    }

    pub fn show_mode(mut self, mode: ShowMode) -> Self {
        self.show_mode = mode;
        self
    }

    pub fn navigation(mut self, mode: NavigationMode) -> Self {
        self.navigation_mode = mode;
        self
    }

    pub fn collider(mut self, mode: ColliderMode) -> Self {
        self.collider_mode = mode;
        self
    }

    /// Marks the window as an entry point that clears navigation history.
    pub fn navigation_root(mut self) -> Self {
        self.force_clear_navigation = true;
        self
    }

    pub fn predecessor(mut self, id: Id) -> Self {
        self.predecessor = Some(id);
        self
    }

    /// A window takes part in back-stack bookkeeping when it records history
    /// and replaces what is on screen.
    pub fn tracks_history(&self) -> bool {
        self.navigation_mode == NavigationMode::NormalNavigation
            && self.show_mode != ShowMode::DoNothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults_match_plain_overlay() {
        let desc = WindowDescriptor::new(1u8);
        assert_eq!(desc.group, WindowGroup::Normal);
        assert_eq!(desc.show_mode, ShowMode::DoNothing);
        assert_eq!(desc.navigation_mode, NavigationMode::NoHistory);
        assert_eq!(desc.collider_mode, ColliderMode::None);
        assert!(!desc.force_clear_navigation);
        assert!(!desc.tracks_history());
    }

    #[test]
    fn test_tracks_history_requires_both_modes() {
        let hide_others = WindowDescriptor::new(1u8).show_mode(ShowMode::HideOtherWindows);
        assert!(!hide_others.tracks_history());

        let full = hide_others.navigation(NavigationMode::NormalNavigation);
        assert!(full.tracks_history());

        let overlay = WindowDescriptor::new(2u8).navigation(NavigationMode::NormalNavigation);
        assert!(!overlay.tracks_history());
    }

    #[test]
    fn test_group_order_follows_base_depths() {
        assert!(WindowGroup::Normal < WindowGroup::Fixed);
        assert!(WindowGroup::Fixed < WindowGroup::PopUp);
    }
}
