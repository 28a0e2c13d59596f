//! Console adapter for development/testing

use async_trait::async_trait;
use std::io::{BufRead, Write};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.into(),
                username: "console".to_string(),
            },
        }
    }

    /// Prompt and read one line; `None` once stdin is closed
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();

        tokio::task::spawn_blocking(|| {
            let mut input = String::new();
            match std::io::stdin().lock().read_line(&mut input) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
            }
        })
        .await
        .ok()
        .flatten()
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new("ticker-bot")
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_message_acknowledges() {
        let bot = ConsoleAdapter::new("desk");
        assert!(bot.start().await.is_ok());
        assert_eq!(bot.send_message("console", "123.45").await.unwrap(), "console_msg");
        assert_eq!(bot.bot_info().name, "desk");
    }
}
