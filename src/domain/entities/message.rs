use chrono::{DateTime, Utc};

/// A raw text message as received from the transport
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub chat_id: String,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    /// Short prefix of the text for log lines
    pub fn preview(&self) -> String {
        self.text.chars().take(50).collect()
    }
}
