//! Serializable navigation state

use super::NavigationFrame;
use anyhow::{Context, Result};
use serde::Serialize;

/// Point-in-time view of what is shown and what "back" would restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationSnapshot<Id> {
    /// Shown windows, in show order
    pub shown: Vec<Id>,

    /// Back-stack frames, bottom first
    pub back_stack: Vec<NavigationFrame<Id>>,

    pub current: Option<Id>,
}

impl<Id: Serialize> NavigationSnapshot<Id> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize navigation snapshot")
    }
}
