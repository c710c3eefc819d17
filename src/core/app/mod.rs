//! Application state shared by every flow.
//!
//! [`App`] is the single UI context: it is built once at startup and every
//! reducer in [`actions`] receives it explicitly. Nothing in the crate looks
//! up UI state through globals.

use std::time::Instant;

use tracing::warn;

use crate::core::message::Message;
use crate::core::notifications::NotificationId;

pub mod actions;
pub mod session;
pub mod ui_state;

#[cfg(test)]
mod tests;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use session::{ServerStatus, SessionContext};
pub use ui_state::{ScrollState, UiState};

pub struct App {
    pub session: SessionContext,
    pub ui: UiState,
}

impl App {
    pub fn new(session: SessionContext, ui: UiState) -> Self {
        Self { session, ui }
    }

    /// Append to the transcript and mirror the entry into the transcript log.
    pub fn append_message(&mut self, message: Message) {
        if let Err(err) = self.session.logging.log_message(&message) {
            warn!(error = %err, "failed to write transcript log");
            self.notify_error(format!("Failed to write transcript log: {err}"));
        }
        self.ui.messages.push_back(message);
        self.ui.chat_scroll.follow_tail = true;
    }

    /// Raise an error banner on whichever tab is active right now.
    pub fn notify_error(&mut self, message: impl Into<String>) -> NotificationId {
        let tab = self.ui.tabs.active();
        self.ui
            .notifications
            .show_error(message, tab, Instant::now())
    }

    pub fn is_busy(&self) -> bool {
        self.ui.loading.is_visible()
    }
}
