use tracing::debug;

use super::{App, AppAction, AppActionContext, AppCommand};

pub(super) fn handle_navigation_action(
    app: &mut App,
    action: AppAction,
    _ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SelectTab { tab } => {
            if app.ui.tabs.select(tab) {
                debug!(tab = tab.title(), "switched tab");
            }
            None
        }
        AppAction::CycleTab { forward } => {
            if forward {
                app.ui.tabs.select_next();
            } else {
                app.ui.tabs.select_previous();
            }
            None
        }
        AppAction::DismissLatestNotification => {
            let tab = app.ui.tabs.active();
            app.ui.notifications.dismiss_latest(tab);
            None
        }
        AppAction::ExpireNotifications { now } => {
            app.ui.notifications.expire(now);
            None
        }
        _ => None,
    }
}
