//! # Panelnav Window Navigation Library
//!
//! Manages which UI windows (full-screen panels and overlays) are shown,
//! the layering depth they render at, and a back-stack that restores the
//! previous visual state when the user navigates back.
//!
//! ## Architecture
//!
//! Panelnav is built on a modular architecture:
//! - `window`: descriptors, the window catalog, the registry and the
//!   per-instance lifecycle state machine
//! - `depth`: layering-group depth allocation and an in-memory panel backend
//! - `navigation`: the navigator service, back-stack engine and modal gates
//! - `collaborators`: the view, animation, layering and background interfaces
//! - `message_box`: the message payload capability
//! - `events`: the event queue that carries animation completions and
//!   deferred navigation commands
//! - `config`: configuration parsing and validation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use panelnav::{
//!     Collaborators, NavigatorConfig, NavigationMode, ShowMode, ShowOptions, WindowCatalog,
//!     WindowDescriptor, WindowNavigator,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
//! enum Screen {
//!     MainMenu,
//!     Level,
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = WindowCatalog::new()
//!         .with(WindowDescriptor::new(Screen::MainMenu).navigation_root())
//!         .with(
//!             WindowDescriptor::new(Screen::Level)
//!                 .show_mode(ShowMode::HideOtherWindows)
//!                 .navigation(NavigationMode::NormalNavigation),
//!         );
//!     let mut nav = WindowNavigator::new(
//!         NavigatorConfig::default(),
//!         catalog,
//!         Collaborators::headless(),
//!     )?;
//!
//!     nav.show_window_with(Screen::MainMenu, ShowOptions::default().clear_back_stack())?;
//!     nav.show_window(Screen::Level)?;
//!     nav.dispatch_pending();
//!     nav.pop_navigation_window();
//!     Ok(())
//! }
//! ```

pub mod collaborators;
pub mod config;
pub mod depth;
pub mod error;
pub mod events;
pub mod logging;
pub mod message_box;
pub mod navigation;
pub mod window;

// Re-export main types for easy access
pub use collaborators::{
    Animator, BackgroundDecorator, Collaborators, LayeringBackend, TransitionDone, ViewFactory,
    ViewHandle, WindowBehavior,
};
pub use config::NavigatorConfig;
pub use depth::{DepthAllocator, PanelStack};
pub use error::{NavError, NavResult};
pub use events::NavigatorHandle;
pub use message_box::{MessageBoxWindow, MessagePayload, SupportsMessagePayload};
pub use navigation::{
    BackStack, ConfirmOnBack, NavigationFrame, NavigationSnapshot, PopOutcome, ShowOptions,
    WindowNavigator,
};
pub use window::{
    ColliderMode, NavigationMode, Phase, ShowMode, WindowCatalog, WindowDescriptor, WindowGroup,
    WindowKey,
};

/// Version information for Panelnav
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
