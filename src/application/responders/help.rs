//! Help responder - Answers `$help` with the registry's aggregate help

use crate::application::errors::PatternError;
use crate::domain::entities::{CommandTable, TextResponse};
use crate::domain::traits::Responder;

const NAME: &str = "HelpResponder";

pub struct HelpResponder {
    commands: CommandTable<()>,
    pages: Vec<String>,
}

impl HelpResponder {
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            commands: CommandTable::new().with((), r"^\$help$")?,
            pages: Vec::new(),
        })
    }

    /// Pre-chunked help text delivered on `$help`
    pub fn with_pages(mut self, pages: Vec<String>) -> Self {
        self.pages = pages;
        self
    }
}

impl Responder<TextResponse> for HelpResponder {
    fn name(&self) -> &str {
        NAME
    }

    fn matches(&self, message: &str) -> bool {
        self.commands.matches(message)
    }

    fn compute(&self, message: &str, sink: &mut dyn FnMut(TextResponse)) {
        if self.commands.classify(message).is_none() {
            sink(TextResponse::new(format!("couldn't compute message {}", message)));
            return;
        }
        for page in &self.pages {
            sink(TextResponse::new(page.clone()));
        }
    }

    fn help(&self) -> String {
        let lines: Vec<String> = self.commands.sources().map(|s| format!("    {}", s)).collect();
        format!("Available commands for {}\n{}", NAME, lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivers_every_page_in_order() {
        let help = HelpResponder::new()
            .unwrap()
            .with_pages(vec!["one".to_string(), "two".to_string()]);

        assert!(help.matches("$help"));
        assert!(!help.matches("$help me"));

        let mut out = Vec::new();
        help.compute("$help", &mut |f| out.push(f.into_text()));
        assert_eq!(out, vec!["one", "two"]);
    }

    #[test]
    fn test_help_describes_itself() {
        let help = HelpResponder::new().unwrap();
        assert_eq!(help.help(), "Available commands for HelpResponder\n    ^\\$help$");
    }
}
