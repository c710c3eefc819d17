mod chat;
mod health;
mod navigation;
mod probe;

use std::time::Instant;

use tokio::sync::mpsc;

use super::App;
use crate::api::{ChatReply, ChatRequest, HealthCheckReport, HealthReply, HealthSubmission};
use crate::core::backend::RequestError;
use crate::core::tabs::Tab;

pub enum AppAction {
    SelectTab {
        tab: Tab,
    },
    CycleTab {
        forward: bool,
    },
    SubmitChat,
    ChatSucceeded {
        reply: ChatReply,
    },
    ChatFailed {
        error: RequestError,
    },
    SubmitHealthForm,
    HealthSucceeded {
        reply: HealthReply,
    },
    HealthFailed {
        error: RequestError,
    },
    ProbeRequested,
    ProbeSucceeded {
        report: HealthCheckReport,
    },
    ProbeFailed {
        error: RequestError,
    },
    DismissLatestNotification,
    ExpireNotifications {
        now: Instant,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Side effects requested by reducers, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SendChat(ChatRequest),
    SendHealth(HealthSubmission),
    ProbeBackend,
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::SubmitChat | AppAction::ChatSucceeded { .. } | AppAction::ChatFailed { .. } => {
            chat::handle_chat_action(app, action, ctx)
        }

        AppAction::SubmitHealthForm
        | AppAction::HealthSucceeded { .. }
        | AppAction::HealthFailed { .. } => health::handle_health_action(app, action, ctx),

        AppAction::SelectTab { .. }
        | AppAction::CycleTab { .. }
        | AppAction::DismissLatestNotification
        | AppAction::ExpireNotifications { .. } => {
            navigation::handle_navigation_action(app, action, ctx)
        }

        AppAction::ProbeRequested
        | AppAction::ProbeSucceeded { .. }
        | AppAction::ProbeFailed { .. } => probe::handle_probe_action(app, action, ctx),
    }
}
