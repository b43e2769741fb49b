//! Window types, catalog, registry and lifecycle
//!
//! A window identifier names a window type. Its [`WindowDescriptor`] is
//! fixed at startup and lives in a [`WindowCatalog`]; the live
//! [`WindowInstance`] is created lazily and owned by the
//! [`WindowRegistry`] until teardown.

pub mod catalog;
pub mod descriptor;
pub mod lifecycle;
pub mod registry;

pub use catalog::WindowCatalog;
pub use descriptor::{
    ColliderMode, NavigationMode, ShowMode, WindowDescriptor, WindowGroup, WindowKey,
};
pub use lifecycle::{Lifecycle, Phase, Ticket};
pub use registry::{WindowInstance, WindowRegistry};
