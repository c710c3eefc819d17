//! Shared constants used across the application

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// How long an error banner stays up unless dismissed first.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

pub const CHAT_FAILED_MESSAGE: &str = "Failed to get response from chatbot. Please try again.";
pub const HEALTH_FAILED_MESSAGE: &str =
    "Failed to get health risk prediction. Please try again.";
pub const SERVER_UNREACHABLE_MESSAGE: &str =
    "Unable to connect to the server. Please try again later.";
