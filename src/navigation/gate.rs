//! Modal interrupt gates
//!
//! A window can intercept "back" through
//! [`WindowBehavior::on_back_requested`](crate::WindowBehavior::on_back_requested).
//! [`ConfirmOnBack`] packages the common case: ask "are you sure?" in the
//! message box, and let the pop through once the user confirms.

use crate::events::NavigatorHandle;
use crate::message_box::MessagePayload;
use crate::window::WindowKey;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// One-shot confirmation gate.
///
/// The first back request opens a Yes/No prompt and is reported handled.
/// "Yes" closes the prompt, opens the gate and re-issues the pop, which
/// the gate then lets through. "No" only closes the prompt. The gate stays
/// open until [`rearm`](Self::rearm), which a window calls when it is shown
/// again.
#[derive(Debug, Clone)]
pub struct ConfirmOnBack {
    prompt: String,
    confirm_label: String,
    cancel_label: String,
    confirmed: Rc<Cell<bool>>,
}

impl ConfirmOnBack {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
            confirmed: Rc::new(Cell::new(false)),
        }
    }

    pub fn labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.get()
    }

    /// Closes the gate again.
    pub fn rearm(&self) {
        self.confirmed.set(false);
    }

    /// Returns `true` when the back request was taken over by the prompt.
    pub fn intercept<Id: WindowKey>(&self, nav: &NavigatorHandle<Id>) -> bool {
        if self.confirmed.get() {
            return false;
        }

        debug!("Back request held for confirmation: {:?}", self.prompt);
        let confirmed = Rc::clone(&self.confirmed);
        let payload = MessagePayload::new(self.prompt.clone())
            .button(self.confirm_label.clone(), move |nav: &NavigatorHandle<Id>| {
                nav.close_message_box();
                confirmed.set(true);
                nav.pop();
            })
            .button(self.cancel_label.clone(), |nav: &NavigatorHandle<Id>| {
                nav.close_message_box();
            });
        nav.show_message_box(payload);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NavCommand;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_first_request_opens_prompt() {
        let (tx, mut rx) = unbounded_channel();
        let nav = NavigatorHandle::<u8>::new(tx);
        let gate = ConfirmOnBack::new("Leave level?");

        assert!(gate.intercept(&nav));
        match rx.try_recv() {
            Ok(NavCommand::ShowMessageBox(payload)) => {
                assert_eq!(payload.text, "Leave level?");
                assert_eq!(payload.labels(), vec!["Yes", "No"]);
            }
            other => panic!("expected a message box, got {:?}", other),
        }
    }

    #[test]
    fn test_confirm_opens_gate_and_pops() {
        let (tx, mut rx) = unbounded_channel();
        let nav = NavigatorHandle::<u8>::new(tx);
        let gate = ConfirmOnBack::new("Leave?");
        gate.intercept(&nav);

        let mut payload = match rx.try_recv() {
            Ok(NavCommand::ShowMessageBox(payload)) => payload,
            other => panic!("expected a message box, got {:?}", other),
        };
        let yes = payload.take_action(0).unwrap();
        yes(&nav);

        assert!(gate.is_confirmed());
        assert!(matches!(rx.try_recv(), Ok(NavCommand::CloseMessageBox)));
        assert!(matches!(rx.try_recv(), Ok(NavCommand::Pop)));

        // Open gate lets the next request through without a prompt
        assert!(!gate.intercept(&nav));
        assert!(rx.try_recv().is_err());

        gate.rearm();
        assert!(gate.intercept(&nav));
    }

    #[test]
    fn test_cancel_keeps_gate_closed() {
        let (tx, mut rx) = unbounded_channel();
        let nav = NavigatorHandle::<u8>::new(tx);
        let gate = ConfirmOnBack::new("Leave?").labels("Leave", "Stay");
        gate.intercept(&nav);

        let mut payload = match rx.try_recv() {
            Ok(NavCommand::ShowMessageBox(payload)) => payload,
            other => panic!("expected a message box, got {:?}", other),
        };
        assert_eq!(payload.labels(), vec!["Leave", "Stay"]);
        let stay = payload.take_action(1).unwrap();
        stay(&nav);

        assert!(!gate.is_confirmed());
        assert!(matches!(rx.try_recv(), Ok(NavCommand::CloseMessageBox)));
        assert!(rx.try_recv().is_err());
    }
}
