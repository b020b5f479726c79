//! Chat history between the user and the study assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str =
    "Hi there! I'm your StudyBuddy AI assistant. How can I help you with your studies today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// In-memory chat history, always opening with the assistant's welcome
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 0,
        };
        log.push(WELCOME_MESSAGE.to_string(), Sender::Bot);
        log
    }

    fn push(&mut self, text: String, sender: Sender) -> ChatMessage {
        self.next_id += 1;
        let message = ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: Utc::now(),
        };
        self.messages.push(message.clone());
        message
    }

    pub fn add_user_message(&mut self, text: String) -> ChatMessage {
        self.push(text, Sender::User)
    }

    pub fn add_bot_message(&mut self, text: String) -> ChatMessage {
        self.push(text, Sender::Bot)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Drop everything but a fresh welcome message
    pub fn clear(&mut self) {
        self.messages.clear();
        self.push(WELCOME_MESSAGE.to_string(), Sender::Bot);
        tracing::info!("Chat history cleared");
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}
