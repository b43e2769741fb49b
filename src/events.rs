//! Navigator event queue
//!
//! Two things reach the navigator from outside a direct call: animation
//! completions and navigation commands issued from inside window hooks
//! (a confirmation button that pops, a back handler that opens a prompt).
//! Hooks run while the navigator is mid-operation, so they cannot call it
//! directly; they enqueue a [`NavCommand`] through a [`NavigatorHandle`]
//! and the navigator runs it on its next dispatch.

use crate::message_box::MessagePayload;
use crate::navigation::ShowOptions;
use crate::window::WindowKey;
use log::debug;
use tokio::sync::mpsc::UnboundedSender;

/// Deferred navigation request.
pub enum NavCommand<Id: WindowKey> {
    Show(Id, ShowOptions),
    Hide(Id),
    Close(Id),
    Pop,
    ShowMessageBox(MessagePayload<Id>),
    CloseMessageBox,
}

impl<Id: WindowKey> std::fmt::Debug for NavCommand<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavCommand::Show(id, options) => f.debug_tuple("Show").field(id).field(options).finish(),
            NavCommand::Hide(id) => f.debug_tuple("Hide").field(id).finish(),
            NavCommand::Close(id) => f.debug_tuple("Close").field(id).finish(),
            NavCommand::Pop => f.write_str("Pop"),
            NavCommand::ShowMessageBox(payload) => {
                f.debug_tuple("ShowMessageBox").field(&payload.text).finish()
            }
            NavCommand::CloseMessageBox => f.write_str("CloseMessageBox"),
        }
    }
}

/// Cloneable sender for deferred navigation commands.
pub struct NavigatorHandle<Id: WindowKey> {
    tx: UnboundedSender<NavCommand<Id>>,
}

impl<Id: WindowKey> Clone for NavigatorHandle<Id> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<Id: WindowKey> NavigatorHandle<Id> {
    pub(crate) fn new(tx: UnboundedSender<NavCommand<Id>>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: NavCommand<Id>) {
        if let Err(err) = self.tx.send(command) {
            debug!("Navigator gone, dropping {:?}", err.0);
        }
    }

    pub fn show(&self, id: Id) {
        self.send(NavCommand::Show(id, ShowOptions::default()));
    }

    pub fn show_with(&self, id: Id, options: ShowOptions) {
        self.send(NavCommand::Show(id, options));
    }

    pub fn hide(&self, id: Id) {
        self.send(NavCommand::Hide(id));
    }

    pub fn close(&self, id: Id) {
        self.send(NavCommand::Close(id));
    }

    pub fn pop(&self) {
        self.send(NavCommand::Pop);
    }

    pub fn show_message_box(&self, payload: MessagePayload<Id>) {
        self.send(NavCommand::ShowMessageBox(payload));
    }

    pub fn close_message_box(&self) {
        self.send(NavCommand::CloseMessageBox);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_handle_enqueues_in_order() {
        let (tx, mut rx) = unbounded_channel();
        let handle = NavigatorHandle::<u8>::new(tx);
        let other = handle.clone();

        handle.close_message_box();
        other.pop();
        handle.show(4);

        assert!(matches!(rx.try_recv(), Ok(NavCommand::CloseMessageBox)));
        assert!(matches!(rx.try_recv(), Ok(NavCommand::Pop)));
        assert!(matches!(rx.try_recv(), Ok(NavCommand::Show(4, _))));
        assert!(rx.try_recv().is_err());
    }
}
