use std::error::Error;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::AppHandle;
use crate::core::app::{App, SessionContext, UiState};
use crate::core::backend::BackendClient;
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

/// Build the application state for an interactive session.
///
/// Fails before the terminal is touched when the transcript log cannot be
/// opened, so the error prints on a normal screen.
pub fn bootstrap_app(base_url: &str, log: Option<String>) -> Result<AppHandle, Box<dyn Error>> {
    let logging = LoggingState::new(log)?;
    let backend = BackendClient::new(base_url);
    info!(base_url = backend.base_url(), "starting session");

    let session = SessionContext::new(backend, logging);
    let app = App::new(session, UiState::new(Theme::dark_default()));
    Ok(AppHandle::new(Arc::new(Mutex::new(app))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn bootstrap_normalizes_base_url_and_opens_log() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("transcript.log");

        let handle = bootstrap_app(
            "http://localhost:8000/",
            Some(log_path.to_string_lossy().into_owned()),
        )
        .unwrap();

        let (base_url, logging_active) = handle
            .read(|app| {
                (
                    app.session.backend.base_url().to_string(),
                    app.session.logging.is_active(),
                )
            })
            .await;
        assert_eq!(base_url, "http://localhost:8000");
        assert!(logging_active);
        assert!(log_path.exists());
    }

    #[test]
    fn bootstrap_fails_for_unwritable_log() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("missing").join("transcript.log");
        assert!(bootstrap_app("http://localhost:8000", Some(bad.to_string_lossy().into_owned())).is_err());
    }
}
