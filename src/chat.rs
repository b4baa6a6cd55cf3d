//! Chat widget transcript.
//!
//! The transcript is local state only; each turn sends the whole
//! conversation to the chatbot endpoint and appends the reply.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use api::types::{ChatRequest, ChatRole};

pub const GREETING: &str = "How can I help you?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self { messages: vec![ChatMessage { sender: Sender::Bot, text: GREETING.to_owned() }] }
    }
}

impl ChatTranscript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append user input. Blank input is ignored and returns `false`.
    pub fn push_user(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(ChatMessage { sender: Sender::User, text: text.to_owned() });
        true
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage { sender: Sender::Bot, text: text.into() });
    }

    /// Conversation in chatbot request form, without the canned greeting.
    pub fn as_requests(&self) -> Vec<ChatRequest> {
        self.messages
            .iter()
            .skip(1)
            .map(|message| ChatRequest {
                role: match message.sender {
                    Sender::User => ChatRole::User,
                    Sender::Bot => ChatRole::Assistant,
                },
                content: message.text.clone(),
            })
            .collect()
    }
}
