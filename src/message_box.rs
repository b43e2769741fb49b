//! Message payload capability
//!
//! A message box is an ordinary window whose behavior opts into
//! [`SupportsMessagePayload`]. The navigator finds the capability through
//! [`WindowBehavior::message_payload`] instead of assuming a concrete type.

use crate::collaborators::WindowBehavior;
use crate::events::NavigatorHandle;
use crate::window::WindowKey;
use log::debug;

/// Action bound to a message-box button.
pub type ButtonAction<Id> = Box<dyn FnOnce(&NavigatorHandle<Id>)>;

pub struct MessageButton<Id: WindowKey> {
    pub label: String,
    action: Option<ButtonAction<Id>>,
}

/// Text and buttons shown by a message box.
pub struct MessagePayload<Id: WindowKey> {
    pub text: String,
    pub buttons: Vec<MessageButton<Id>>,
}

impl<Id: WindowKey> MessagePayload<Id> {
    /// A message with no buttons.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn button<F>(mut self, label: impl Into<String>, action: F) -> Self
    where
        F: FnOnce(&NavigatorHandle<Id>) + 'static,
    {
        self.buttons.push(MessageButton {
            label: label.into(),
            action: Some(Box::new(action)),
        });
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.label.as_str()).collect()
    }

    /// Takes the action of button `index`; each action runs at most once.
    pub fn take_action(&mut self, index: usize) -> Option<ButtonAction<Id>> {
        self.buttons.get_mut(index).and_then(|b| b.action.take())
    }
}

/// Capability of windows that display a [`MessagePayload`].
pub trait SupportsMessagePayload<Id: WindowKey> {
    fn set_payload(&mut self, payload: MessagePayload<Id>);

    fn payload(&self) -> Option<&MessagePayload<Id>>;

    fn payload_mut(&mut self) -> Option<&mut MessagePayload<Id>>;
}

/// Stock message-box behavior.
pub struct MessageBoxWindow<Id: WindowKey> {
    payload: Option<MessagePayload<Id>>,
}

impl<Id: WindowKey> MessageBoxWindow<Id> {
    pub fn new() -> Self {
        Self { payload: None }
    }
}

impl<Id: WindowKey> Default for MessageBoxWindow<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: WindowKey> SupportsMessagePayload<Id> for MessageBoxWindow<Id> {
    fn set_payload(&mut self, payload: MessagePayload<Id>) {
        debug!("Message box text: {:?}", payload.text);
        self.payload = Some(payload);
    }

    fn payload(&self) -> Option<&MessagePayload<Id>> {
        self.payload.as_ref()
    }

    fn payload_mut(&mut self) -> Option<&mut MessagePayload<Id>> {
        self.payload.as_mut()
    }
}

impl<Id: WindowKey> WindowBehavior<Id> for MessageBoxWindow<Id> {
    fn on_hidden(&mut self) {
        self.payload = None;
    }

    fn message_payload(&mut self) -> Option<&mut dyn SupportsMessagePayload<Id>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_button_action_runs_once() {
        let (tx, _rx) = unbounded_channel();
        let nav = NavigatorHandle::<u8>::new(tx);
        let pressed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pressed);

        let mut payload =
            MessagePayload::new("Leave?").button("Yes", move |_| counter.set(counter.get() + 1));
        assert_eq!(payload.labels(), vec!["Yes"]);

        let action = payload.take_action(0).unwrap();
        action(&nav);
        assert!(payload.take_action(0).is_none());
        assert!(payload.take_action(5).is_none());
        assert_eq!(pressed.get(), 1);
    }

    #[test]
    fn test_capability_query_and_clear_on_hide() {
        let mut window = MessageBoxWindow::<u8>::new();
        window
            .message_payload()
            .expect("message box exposes payload capability")
            .set_payload(MessagePayload::new("Saved"));
        assert_eq!(window.payload().map(|p| p.text.as_str()), Some("Saved"));

        window.on_hidden();
        assert!(window.payload().is_none());
    }
}
