//! Wire payloads exchanged with the medical chatbot backend.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const CHAT_PATH: &str = "/chat";
pub const HEALTH_PATH: &str = "/health";
pub const HEALTH_CHECK_PATH: &str = "/health-check";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub context: Map<String, Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Map::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Structured vitals sent for risk prediction.
///
/// Every numeric field is optional and is serialized as `null` when absent;
/// the backend treats a missing key and `null` differently, so nothing is skipped.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct HealthSubmission {
    pub blood_glucose: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub heart_rate: Option<f64>,
    pub age: Option<i64>,
    pub bmi: Option<f64>,
    pub medical_history: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RiskPrediction {
    pub risk_score: f64,
    #[serde(default)]
    pub recommendation: String,
}

/// Per-condition predictions in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionSet(pub Vec<(String, RiskPrediction)>);

impl PredictionSet {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RiskPrediction)> {
        self.0.iter().map(|(name, prediction)| (name.as_str(), prediction))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for PredictionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PredictionSetVisitor;

        impl<'de> Visitor<'de> for PredictionSetVisitor {
            type Value = PredictionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of condition names to risk predictions")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, prediction)) =
                    access.next_entry::<String, RiskPrediction>()?
                {
                    entries.push((name, prediction));
                }
                Ok(PredictionSet(entries))
            }
        }

        deserializer.deserialize_map(PredictionSetVisitor)
    }
}

/// `predictions` is required; a 2xx body without it is a failed prediction.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HealthReply {
    pub predictions: PredictionSet,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HealthCheckReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chatbot: Option<String>,
    #[serde(default)]
    pub ml_model: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthCheckReport {
    pub fn is_degraded(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("error"))
    }

    /// One-line description of what the backend reported as broken.
    pub fn problem_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(chatbot) = self.chatbot.as_deref() {
            parts.push(format!("chatbot {chatbot}"));
        }
        if let Some(model) = self.ml_model.as_deref() {
            parts.push(format!("risk model {model}"));
        }
        if let Some(error) = self.error.as_deref() {
            parts.push(error.to_string());
        }
        if parts.is_empty() {
            "status error".to_string()
        } else {
            parts.join(", ")
        }
    }
}
