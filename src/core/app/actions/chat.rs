use tracing::{debug, warn};

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::api::{ChatReply, ChatRequest};
use crate::core::constants::CHAT_FAILED_MESSAGE;
use crate::core::message::Message;

pub(super) fn handle_chat_action(
    app: &mut App,
    action: AppAction,
    _ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SubmitChat => submit_chat(app),
        AppAction::ChatSucceeded { reply } => {
            complete_chat(app, reply);
            None
        }
        AppAction::ChatFailed { error } => {
            warn!(%error, "chat request failed");
            app.notify_error(CHAT_FAILED_MESSAGE);
            app.ui.loading.end();
            None
        }
        _ => None,
    }
}

fn submit_chat(app: &mut App) -> Option<AppCommand> {
    let raw = app.ui.composer_text();
    let message = raw.trim();
    if message.is_empty() {
        return None;
    }
    let message = message.to_string();

    app.ui.clear_composer();
    app.append_message(Message::user(message.clone()));
    app.ui.loading.begin();
    debug!(chars = message.len(), "sending chat message");

    Some(AppCommand::SendChat(ChatRequest::new(message)))
}

fn complete_chat(app: &mut App, reply: ChatReply) {
    let ChatReply {
        response,
        model_used,
        error,
    } = reply;

    if let Some(error) = error {
        warn!(%error, "chat reply carried an error field");
    }
    if let Some(model) = model_used.filter(|model| !model.is_empty()) {
        app.session.last_model_used = Some(model);
    }
    if let Some(text) = response.filter(|text| !text.is_empty()) {
        app.append_message(Message::system(text));
    }
    app.ui.loading.end();
}
