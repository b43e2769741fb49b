//! Navigation error taxonomy
//!
//! Expected conditions are reported as values so callers can branch without
//! unwinding. An empty back-stack and a back-stack whose top frame no longer
//! matches the active window are not errors at all; they surface as
//! [`PopOutcome`](crate::navigation::PopOutcome) variants.

use crate::window::Phase;
use thiserror::Error;

/// Reasons a navigation request was rejected.
///
/// Every rejection leaves the shown-set and the back-stack untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError<Id> {
    /// The identifier has no descriptor in the navigator's catalog.
    #[error("window {0:?} is not managed by this navigator")]
    NotManaged(Id),

    /// The view factory has no recipe for the identifier.
    #[error("window {0:?} could not be instantiated")]
    NotInstantiable(Id),

    /// The window is already in the shown-set.
    #[error("window {0:?} is already shown")]
    AlreadyShown(Id),

    /// The window is not in the shown-set.
    #[error("window {0:?} is not shown")]
    NotShown(Id),

    /// The instance is mid-transition; retry once the animation completes.
    #[error("window {id:?} is locked while {phase:?}")]
    LockedInstance { id: Id, phase: Phase },

    /// The window's behavior does not opt into a required capability.
    #[error("window {id:?} does not support {capability}")]
    MissingCapability { id: Id, capability: &'static str },

    /// No message-box window was configured on the navigator.
    #[error("no message box window is configured")]
    NoMessageBox,
}

impl<Id> NavError<Id> {
    /// Benign rejections are no-ops the caller may ignore.
    pub fn is_benign(&self) -> bool {
        matches!(self, NavError::AlreadyShown(_) | NavError::NotShown(_))
    }
}

pub type NavResult<T, Id> = std::result::Result<T, NavError<Id>>;
