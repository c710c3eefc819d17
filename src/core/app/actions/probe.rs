use tracing::{info, warn};

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::app::ServerStatus;
use crate::core::constants::SERVER_UNREACHABLE_MESSAGE;

pub(super) fn handle_probe_action(
    app: &mut App,
    action: AppAction,
    _ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::ProbeRequested => {
            app.session.server_status = ServerStatus::Checking;
            Some(AppCommand::ProbeBackend)
        }
        AppAction::ProbeSucceeded { report } => {
            let status = ServerStatus::from_report(&report);
            if let ServerStatus::Degraded(summary) = &status {
                warn!(%summary, "backend reports degraded components");
                app.notify_error(format!("Server reported a problem: {summary}"));
            } else {
                info!(base_url = app.session.backend.base_url(), "backend reachable");
            }
            app.session.server_status = status;
            None
        }
        AppAction::ProbeFailed { error } => {
            warn!(%error, "backend connectivity probe failed");
            app.session.server_status = ServerStatus::Unreachable;
            app.notify_error(SERVER_UNREACHABLE_MESSAGE);
            None
        }
        _ => None,
    }
}
