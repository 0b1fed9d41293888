//! Conversation state for the agronomist chat.

use crate::client::ChatBackend;
use crate::types::{AdvisoryReport, ChatMessage, ChatRequest, Sender};

/// Ordered chat messages for one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    district: String,
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Opens a transcript with a monitoring greeting and the report's
    /// advisory as the first answer.
    #[must_use]
    pub fn from_report(report: &AdvisoryReport) -> Self {
        let soil = report
            .sensors
            .soil_moisture
            .map_or_else(|| "unknown".to_string(), |m| m.to_string());
        let greeting = format!(
            "Hello! I am monitoring {}. Soil moisture is {soil}%.",
            report.location
        );
        Self {
            district: report.location.clone(),
            messages: vec![
                ChatMessage::new(Sender::System, greeting),
                ChatMessage::new(Sender::Ai, report.cleaned_advisory()),
            ],
        }
    }

    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// User and AI messages, without system notices.
    #[must_use]
    pub fn history_for_backend(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|m| m.sender != Sender::System)
            .cloned()
            .collect()
    }

    /// Sends `text` and appends the exchange.
    ///
    /// Blank input is ignored and returns `None`. Otherwise returns the
    /// message appended after the user's: the AI reply, or a system
    /// `"Error: ..."` notice when the backend failed.
    pub async fn send<B>(&mut self, backend: &B, text: &str) -> Option<&ChatMessage>
    where
        B: ChatBackend + ?Sized,
    {
        if text.trim().is_empty() {
            return None;
        }

        let request = ChatRequest {
            message: text.to_string(),
            district: self.district.clone(),
            history: self.history_for_backend(),
        };
        self.messages.push(ChatMessage::new(Sender::User, text));

        let answer = match backend.send_chat(&request).await {
            Ok(reply) => ChatMessage::new(Sender::Ai, reply),
            Err(err) => {
                tracing::warn!(error = %err, district = %self.district, "chat request failed");
                ChatMessage::new(Sender::System, format!("Error: {err}"))
            }
        };
        self.messages.push(answer);
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AdvisoryError;
    use crate::types::{Analysis, Sensors};

    struct ScriptedBackend {
        reply: Result<String, String>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send_chat(&self, request: &ChatRequest) -> Result<String, AdvisoryError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(AdvisoryError::Backend)
        }
    }

    fn report() -> AdvisoryReport {
        AdvisoryReport {
            timestamp: "2024-06-01 09:00:00".to_string(),
            location: "Chennai".to_string(),
            season: "Summer".to_string(),
            sensors: Sensors {
                soil_moisture: Some(37.5),
                ..Sensors::default()
            },
            analysis: Analysis::default(),
            llm_advisory: r"Irrigate \early\ tomorrow.".to_string(),
        }
    }

    #[test]
    fn transcript_opens_with_greeting_and_advisory() {
        let t = ChatTranscript::from_report(&report());
        assert_eq!(t.messages().len(), 2);
        assert_eq!(
            t.messages()[0],
            ChatMessage::new(
                Sender::System,
                "Hello! I am monitoring Chennai. Soil moisture is 37.5%."
            )
        );
        assert_eq!(
            t.messages()[1],
            ChatMessage::new(Sender::Ai, "Irrigate early tomorrow.")
        );
    }

    #[tokio::test]
    async fn send_excludes_system_messages_and_new_text_from_history() {
        let backend = ScriptedBackend::new(Ok("Soil is fine."));
        let mut t = ChatTranscript::from_report(&report());

        let answer = t.send(&backend, "How is my field?").await.cloned();
        assert_eq!(answer, Some(ChatMessage::new(Sender::Ai, "Soil is fine.")));

        let requests = backend.requests.lock().unwrap().clone();
        assert_eq!(requests[0].message, "How is my field?");
        assert_eq!(requests[0].district, "Chennai");
        assert_eq!(
            requests[0].history,
            vec![ChatMessage::new(Sender::Ai, "Irrigate early tomorrow.")]
        );
        assert_eq!(t.messages().len(), 4);
        assert_eq!(t.messages()[2].sender, Sender::User);
    }

    #[tokio::test]
    async fn backend_error_appends_system_notice() {
        let backend = ScriptedBackend::new(Err("model overloaded"));
        let mut t = ChatTranscript::from_report(&report());

        let answer = t.send(&backend, "Hello").await.cloned();
        assert_eq!(
            answer,
            Some(ChatMessage::new(Sender::System, "Error: model overloaded"))
        );
        assert!(t
            .history_for_backend()
            .iter()
            .all(|m| m.sender != Sender::System));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let backend = ScriptedBackend::new(Ok("unused"));
        let mut t = ChatTranscript::from_report(&report());
        assert!(t.send(&backend, "   ").await.is_none());
        assert_eq!(t.messages().len(), 2);
        assert!(backend.requests.lock().unwrap().is_empty());
    }
}
