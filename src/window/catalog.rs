//! The set of windows a navigator is in control of

use super::descriptor::{WindowDescriptor, WindowKey};
use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Descriptors keyed by identifier. A navigator refuses to show any window
/// that is not in its catalog.
#[derive(Debug, Clone)]
pub struct WindowCatalog<Id> {
    descriptors: HashMap<Id, WindowDescriptor<Id>>,
}

#[derive(Deserialize)]
struct CatalogFile<Id> {
    #[serde(rename = "window", default = "Vec::new")]
    windows: Vec<WindowDescriptor<Id>>,
}

impl<Id: WindowKey> WindowCatalog<Id> {
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, descriptor: WindowDescriptor<Id>) -> Self {
        self.register(descriptor);
        self
    }

    /// Adds a descriptor, returning the one it replaced.
    pub fn register(&mut self, descriptor: WindowDescriptor<Id>) -> Option<WindowDescriptor<Id>> {
        let previous = self.descriptors.insert(descriptor.id, descriptor);
        if let Some(prev) = &previous {
            warn!("Window {:?} registered twice; keeping the later descriptor", prev.id);
        }
        previous
    }

    pub fn get(&self, id: Id) -> Option<&WindowDescriptor<Id>> {
        self.descriptors.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.descriptors.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowDescriptor<Id>> {
        self.descriptors.values()
    }
}

impl<Id: WindowKey + DeserializeOwned> WindowCatalog<Id> {
    /// Parses `[[window]]` tables.
    ///
    /// ```toml
    /// [[window]]
    /// id = "main_menu"
    /// show_mode = "hide_other_windows"
    /// navigation_mode = "normal_navigation"
    /// force_clear_navigation = true
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile<Id> =
            toml::from_str(contents).context("Failed to parse window catalog")?;

        let mut catalog = Self::new();
        for descriptor in file.windows {
            if catalog.contains(descriptor.id) {
                anyhow::bail!("Duplicate window descriptor: {:?}", descriptor.id);
            }
            catalog.register(descriptor);
        }
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read window catalog: {}", path.display()))?;
        Self::from_toml_str(&contents)
    }
}

impl<Id: WindowKey> Default for WindowCatalog<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{ColliderMode, NavigationMode, ShowMode, WindowGroup};
    use serde::Deserialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Screen {
        MainMenu,
        Level,
        TopBar,
    }

    #[test]
    fn test_catalog_from_toml() -> Result<()> {
        let catalog: WindowCatalog<Screen> = WindowCatalog::from_toml_str(
            r#"
[[window]]
id = "main_menu"
show_mode = "hide_other_windows"
navigation_mode = "normal_navigation"
force_clear_navigation = true

[[window]]
id = "level"
show_mode = "hide_other_windows"
navigation_mode = "normal_navigation"
collider_mode = "plain"
predecessor = "main_menu"

[[window]]
id = "top_bar"
group = "fixed"
"#,
        )?;

        assert_eq!(catalog.len(), 3);
        let level = catalog.get(Screen::Level).expect("level registered");
        assert_eq!(level.predecessor, Some(Screen::MainMenu));
        assert_eq!(level.collider_mode, ColliderMode::Plain);
        assert_eq!(level.navigation_mode, NavigationMode::NormalNavigation);

        let top_bar = catalog.get(Screen::TopBar).expect("top bar registered");
        assert_eq!(top_bar.group, WindowGroup::Fixed);
        assert_eq!(top_bar.show_mode, ShowMode::DoNothing);
        assert!(catalog.get(Screen::MainMenu).unwrap().force_clear_navigation);
        Ok(())
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result: Result<WindowCatalog<Screen>> = WindowCatalog::from_toml_str(
            r#"
[[window]]
id = "level"

[[window]]
id = "level"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_catalog_file() -> Result<()> {
        let catalog: WindowCatalog<Screen> = WindowCatalog::from_toml_str("")?;
        assert!(catalog.is_empty());
        Ok(())
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = WindowCatalog::new();
        assert!(catalog.register(WindowDescriptor::new(1u8)).is_none());
        let prev = catalog.register(WindowDescriptor::new(1u8).group(WindowGroup::PopUp));
        assert_eq!(prev.map(|d| d.group), Some(WindowGroup::Normal));
        assert_eq!(catalog.get(1).map(|d| d.group), Some(WindowGroup::PopUp));
    }
}
