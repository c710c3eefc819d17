use tracing::{debug, warn};

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::api::HealthReply;
use crate::core::constants::HEALTH_FAILED_MESSAGE;

pub(super) fn handle_health_action(
    app: &mut App,
    action: AppAction,
    _ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SubmitHealthForm => {
            let submission = app.ui.health_form.to_submission();
            app.ui.loading.begin();
            debug!(
                history_items = submission.medical_history.len(),
                "submitting health data"
            );
            Some(AppCommand::SendHealth(submission))
        }
        AppAction::HealthSucceeded { reply } => {
            show_predictions(app, reply);
            None
        }
        AppAction::HealthFailed { error } => {
            warn!(%error, "health prediction request failed");
            app.notify_error(HEALTH_FAILED_MESSAGE);
            app.ui.loading.end();
            None
        }
        _ => None,
    }
}

fn show_predictions(app: &mut App, reply: HealthReply) {
    if let Some(error) = reply.error.as_deref() {
        warn!(%error, "health reply carried an error field");
    }
    app.ui.results.replace(&reply.predictions);
    app.ui.loading.end();
}
