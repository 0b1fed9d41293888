//! Client for the farm advisory backend and the chat transcript built on it.

pub mod chat;
pub mod client;
pub mod error;
pub mod types;

pub use chat::ChatTranscript;
pub use client::{AdvisoryClient, ChatBackend};
pub use error::AdvisoryError;
pub use types::{
    AdvisoryReport, Analysis, ChatMessage, ChatRequest, Sender, Sensors, EMPTY_REPLY_FALLBACK,
};
