//! Per-call show options and pop outcomes

use crate::config::NavigatorConfig;

/// Overrides for a single show request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowOptions {
    /// Reset the window's per-show state even if it already exists
    pub force_reset: bool,

    /// Run navigation bookkeeping (sibling hiding, back-stack) at all
    pub execute_nav_logic: bool,

    /// Record a back-stack frame for this show
    pub add_to_back_stack: bool,

    /// Discard all back-stack history; the window becomes an entry point
    pub force_clear_back_stack: bool,

    /// Clear the back-stack if its top frame belongs to another window
    pub check_navigation: bool,

    /// Opaque payload forwarded to the window's `on_show` hook
    pub context: Option<String>,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            force_reset: false,
            execute_nav_logic: true,
            add_to_back_stack: true,
            force_clear_back_stack: false,
            check_navigation: false,
            context: None,
        }
    }
}

impl ShowOptions {
    /// Defaults, with `check_navigation` taken from the configuration.
    pub fn from_config(config: &NavigatorConfig) -> Self {
        Self {
            check_navigation: config.check_navigation_by_default,
            ..Self::default()
        }
    }

    pub fn reset(mut self) -> Self {
        self.force_reset = true;
        self
    }

    /// Skip all navigation bookkeeping.
    pub fn without_navigation(mut self) -> Self {
        self.execute_nav_logic = false;
        self
    }

    /// Hide siblings as usual, but record no frame.
    pub fn without_history(mut self) -> Self {
        self.add_to_back_stack = false;
        self
    }

    pub fn clear_back_stack(mut self) -> Self {
        self.force_clear_back_stack = true;
        self
    }

    pub fn check_navigation(mut self, check: bool) -> Self {
        self.check_navigation = check;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Result of a back request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome<Id> {
    /// The active window's back hook took over the request.
    Interrupted,

    /// The top frame was popped: `owner` is hiding and `restored` are back
    /// in the shown-set. With `wait_for_hide` they animate in once the
    /// owner's hide completes.
    Popped { owner: Id, restored: Vec<Id> },

    /// The back-stack was empty and the active window named a predecessor.
    Predecessor { from: Id, to: Id },

    /// Nothing to go back to.
    EmptyStack,

    /// The top frame did not belong to the active window; the back-stack
    /// was cleared instead of popped.
    OwnerMismatch { owner: Id, active: Option<Id> },

    /// Windows restored by a previous pop are still waiting for its owner
    /// to finish hiding.
    RestorePending,
}

impl<Id> PopOutcome<Id> {
    pub fn handled_by_interrupt(&self) -> bool {
        matches!(self, PopOutcome::Interrupted)
    }

    /// Whether the request changed what is on screen.
    pub fn navigated(&self) -> bool {
        matches!(self, PopOutcome::Popped { .. } | PopOutcome::Predecessor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ShowOptions::default();
        assert!(options.execute_nav_logic);
        assert!(options.add_to_back_stack);
        assert!(!options.force_reset);
        assert!(!options.force_clear_back_stack);
        assert!(!options.check_navigation);
    }

    #[test]
    fn test_from_config_pins_check_navigation() {
        let mut config = NavigatorConfig::default();
        assert!(!ShowOptions::from_config(&config).check_navigation);
        config.check_navigation_by_default = true;
        assert!(ShowOptions::from_config(&config).check_navigation);
    }

    #[test]
    fn test_builder_chain() {
        let options = ShowOptions::default()
            .reset()
            .without_history()
            .clear_back_stack()
            .with_context("level=3");
        assert!(options.force_reset);
        assert!(!options.add_to_back_stack);
        assert!(options.force_clear_back_stack);
        assert_eq!(options.context.as_deref(), Some("level=3"));
    }

    #[test]
    fn test_outcome_predicates() {
        assert!(PopOutcome::<u8>::Interrupted.handled_by_interrupt());
        assert!(!PopOutcome::<u8>::EmptyStack.handled_by_interrupt());
        assert!(PopOutcome::Popped { owner: 1u8, restored: vec![] }.navigated());
        assert!(!PopOutcome::<u8>::RestorePending.navigated());
    }
}
