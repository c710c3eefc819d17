//! Background tasks that carry out [`AppCommand`]s against the backend.
//!
//! Each command gets its own task; the outcome comes back to the event loop as
//! an action. Nothing here touches [`App`](crate::core::app::App) directly.

use crate::core::app::{AppAction, AppActionContext, AppActionDispatcher, AppCommand};
use crate::core::backend::BackendClient;

pub fn spawn_command(
    backend: BackendClient,
    dispatcher: AppActionDispatcher,
    command: AppCommand,
    ctx: AppActionContext,
) {
    tokio::spawn(async move {
        let action = execute_command(&backend, command).await;
        dispatcher.dispatch_many([action], ctx);
    });
}

pub async fn execute_command(backend: &BackendClient, command: AppCommand) -> AppAction {
    match command {
        AppCommand::SendChat(request) => match backend.send_chat(&request).await {
            Ok(reply) => AppAction::ChatSucceeded { reply },
            Err(error) => AppAction::ChatFailed { error },
        },
        AppCommand::SendHealth(submission) => match backend.predict_health(&submission).await {
            Ok(reply) => AppAction::HealthSucceeded { reply },
            Err(error) => AppAction::HealthFailed { error },
        },
        AppCommand::ProbeBackend => match backend.check_health().await {
            Ok(report) => AppAction::ProbeSucceeded { report },
            Err(error) => AppAction::ProbeFailed { error },
        },
    }
}
