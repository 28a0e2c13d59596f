use std::fmt;

/// One unit of text delivered back to the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    text: String,
}

impl TextResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<String> for TextResponse {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for TextResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
