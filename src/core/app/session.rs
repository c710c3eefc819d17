use crate::api::HealthCheckReport;
use crate::core::backend::BackendClient;
use crate::utils::logging::LoggingState;

/// What the startup probe learned about the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Checking,
    Online,
    Degraded(String),
    Unreachable,
}

impl ServerStatus {
    pub fn from_report(report: &HealthCheckReport) -> Self {
        if report.is_degraded() {
            ServerStatus::Degraded(report.problem_summary())
        } else {
            ServerStatus::Online
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Checking => "checking",
            ServerStatus::Online => "online",
            ServerStatus::Degraded(_) => "degraded",
            ServerStatus::Unreachable => "unreachable",
        }
    }
}

pub struct SessionContext {
    pub backend: BackendClient,
    pub logging: LoggingState,
    pub server_status: ServerStatus,
    /// Model the backend reported for its most recent chat answer.
    pub last_model_used: Option<String>,
}

impl SessionContext {
    pub fn new(backend: BackendClient, logging: LoggingState) -> Self {
        Self {
            backend,
            logging,
            server_status: ServerStatus::default(),
            last_model_used: None,
        }
    }
}
