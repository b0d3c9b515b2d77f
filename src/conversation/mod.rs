//! Conversation types and the interview transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id carried by the interviewer's opening message
pub const INITIAL_MESSAGE_ID: &str = "init";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Interviewer,
    Candidate,
}

impl Message {
    /// The interviewer's opening message, always stamped with [`INITIAL_MESSAGE_ID`]
    pub fn opening(content: impl Into<String>) -> Self {
        Self {
            id: INITIAL_MESSAGE_ID.to_string(),
            role: Role::Interviewer,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn interviewer(content: impl Into<String>) -> Self {
        Self::new(Role::Interviewer, content)
    }

    pub fn candidate(content: impl Into<String>) -> Self {
        Self::new(Role::Candidate, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only, ordered record of one interview.
///
/// Messages are never edited or removed once pushed; insertion order is
/// display order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its position
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
