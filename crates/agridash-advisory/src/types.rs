//! Advisory backend payloads.

use serde::{Deserialize, Serialize};

/// Soil moisture percentage below which the field is considered dry.
pub const DRY_SOIL_THRESHOLD: f64 = 40.0;

/// Reply substituted when the chat backend returns an empty answer.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm having trouble analyzing that right now. Please try again.";

/// Latest sensor readings. Any value may be missing when a sensor is offline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensors {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub soil_moisture: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub forecast: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub reason: String,
}

/// Response of `GET agri-advisory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub timestamp: String,
    pub location: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub sensors: Sensors,
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub llm_advisory: String,
}

impl AdvisoryReport {
    #[must_use]
    pub fn is_rain_forecast(&self) -> bool {
        self.analysis.forecast.contains("RAIN")
    }

    /// `true` when the recommended action is to hold off field work.
    #[must_use]
    pub fn is_hold_action(&self) -> bool {
        let action = &self.analysis.action;
        ["STOP", "DELAY", "NO ACTION"]
            .iter()
            .any(|marker| action.contains(marker))
    }

    #[must_use]
    pub fn soil_is_dry(&self) -> bool {
        self.sensors
            .soil_moisture
            .is_some_and(|m| m < DRY_SOIL_THRESHOLD)
    }

    /// The model's advisory text with stray backslash escapes removed.
    #[must_use]
    pub fn cleaned_advisory(&self) -> String {
        self.llm_advisory.replace('\\', "")
    }

    /// Time-of-day part of `timestamp` (`"2024-06-01 14:30:00"` -> `"14:30:00"`).
    #[must_use]
    pub fn updated_at(&self) -> &str {
        self.timestamp
            .split_once(' ')
            .map_or(self.timestamp.as_str(), |(_, time)| time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    System,
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}

/// Body of `POST chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub district: String,
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
