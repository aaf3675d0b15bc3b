//! IRC Message Model
//!
//! One line of chat from the online service. Messages are immutable once
//! built; the chat history that keeps them belongs to the UI layer.

use chrono::{DateTime, Local};

use super::color::Color;

/// A chat message with its sender, display color and receive time
#[derive(Debug, Clone, PartialEq)]
pub struct IrcMessage {
    sender: Option<String>,
    color: Color,
    timestamp: DateTime<Local>,
    text: String,
}

impl IrcMessage {
    /// Create a new message
    ///
    /// Use `None` as the sender for system messages.
    pub fn new(
        sender: Option<String>,
        color: Color,
        timestamp: DateTime<Local>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            color,
            timestamp,
            text: text.into(),
        }
    }

    /// Create a sender-less system message stamped with the current time
    pub fn system(color: Color, text: impl Into<String>) -> Self {
        Self::new(None, color, Local::now(), text)
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_system(&self) -> bool {
        self.sender.is_none()
    }
}

impl std::fmt::Display for IrcMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let time = self.timestamp.format("%H:%M");
        match &self.sender {
            Some(sender) => write!(f, "[{}] {}: {}", time, sender, self.text),
            None => write!(f, "[{}] {}", time, self.text),
        }
    }
}
