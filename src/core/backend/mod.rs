//! Thin JSON client for the chatbot backend.
//!
//! Every failure mode (connection refused, timeout, non-2xx status, body that
//! does not decode) collapses into a single [`RequestError`]. The detail string
//! exists for diagnostics only; callers never branch on it.

use std::error::Error as StdError;
use std::fmt;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{
    ChatReply, ChatRequest, HealthCheckReport, HealthReply, HealthSubmission, CHAT_PATH,
    HEALTH_CHECK_PATH, HEALTH_PATH,
};
use crate::utils::url::{construct_endpoint_url, normalize_base_url};


/// A request to the backend did not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    path: String,
    detail: String,
}

impl RequestError {
    pub(crate) fn new(path: &str, detail: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            detail: detail.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request to {} failed: {}", self.path, self.detail)
    }
}

impl StdError for RequestError {}

#[derive(Clone, Debug)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        construct_endpoint_url(&self.base_url, path)
    }

    /// POST `body` as JSON to `path` and decode the JSON answer.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| RequestError::new(path, err.to_string()))?;
        let response = ensure_success(path, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| RequestError::new(path, format!("invalid response body: {err}")))
    }

    /// GET `path`, discarding the body. Only the status matters.
    pub async fn get(&self, path: &str) -> Result<(), RequestError> {
        self.get_response(path).await.map(|_| ())
    }

    async fn get_response(&self, path: &str) -> Result<Response, RequestError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| RequestError::new(path, err.to_string()))?;
        ensure_success(path, response).await
    }

    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, RequestError> {
        self.post(CHAT_PATH, request).await
    }

    pub async fn predict_health(
        &self,
        submission: &HealthSubmission,
    ) -> Result<HealthReply, RequestError> {
        self.post(HEALTH_PATH, submission).await
    }

    /// Connectivity probe. A reachable backend whose body cannot be decoded
    /// still counts as reachable and yields an empty report.
    pub async fn check_health(&self) -> Result<HealthCheckReport, RequestError> {
        let response = self.get_response(HEALTH_CHECK_PATH).await?;
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<HealthCheckReport>(&body) {
            Ok(report) => Ok(report),
            Err(err) => {
                debug!(error = %err, "health-check body did not decode");
                Ok(HealthCheckReport::default())
            }
        }
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match extract_error_summary(&body) {
        Some(summary) => format!("HTTP {status}: {summary}"),
        None => format!("HTTP {status}"),
    };
    warn!(path, %detail, "backend returned an error status");
    Err(RequestError::new(path, detail))
}

/// Pull a short message out of an error body (`{"detail": ...}` from the
/// server framework, or `{"error": ...}` / `{"message": ...}`).
fn extract_error_summary(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let summary = ["detail", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key))
        .and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })?;
    let collapsed = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}
