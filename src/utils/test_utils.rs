#[cfg(test)]
use crate::core::app::{App, SessionContext, UiState};
#[cfg(test)]
use crate::core::backend::{BackendClient, RequestError};
#[cfg(test)]
use crate::ui::theme::Theme;
#[cfg(test)]
use crate::utils::logging::LoggingState;

#[cfg(test)]
pub fn create_test_app() -> App {
    let session = SessionContext::new(
        BackendClient::new("http://backend.test"),
        LoggingState::new(None).unwrap(),
    );
    App::new(session, UiState::new(Theme::dark_default()))
}

#[cfg(test)]
pub fn create_test_error(path: &str) -> RequestError {
    RequestError::new(path, "HTTP 500 Internal Server Error")
}

#[cfg(test)]
#[derive(Clone, Default)]
struct SharedLogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for SharedLogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber installed and return what it logged.
#[cfg(test)]
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = SharedLogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
