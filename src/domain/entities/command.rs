use regex_lite::Regex;
use crate::application::errors::PatternError;

/// A whole-message command pattern tagged with the command it selects
#[derive(Debug, Clone)]
pub struct CommandPattern<K> {
    pub kind: K,
    source: String,
    regex: Regex,
}

impl<K> CommandPattern<K> {
    /// Compile `pattern`, which must be written with `^` and `$`.
    ///
    /// The whole pattern is wrapped in one more anchored group, so a
    /// top-level alternation such as `^a|b$` still only matches whole messages.
    pub fn new(kind: K, pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('^') || !pattern.ends_with('$') {
            return Err(PatternError::Unanchored(pattern.to_string()));
        }
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| PatternError::Invalid(format!("{}: {}", pattern, e)))?;
        Ok(Self {
            kind,
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, message: &str) -> bool {
        self.regex.is_match(message)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Ordered, fixed set of command patterns owned by one responder.
///
/// `matches` and `classify` both read this table, so a message a responder
/// claims is always one it knows how to compute.
#[derive(Debug, Clone)]
pub struct CommandTable<K> {
    patterns: Vec<CommandPattern<K>>,
}

impl<K: Copy> CommandTable<K> {
    pub fn new() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn with(mut self, kind: K, pattern: &str) -> Result<Self, PatternError> {
        self.patterns.push(CommandPattern::new(kind, pattern)?);
        Ok(self)
    }

    /// First declared command whose pattern matches the whole message
    pub fn classify(&self, message: &str) -> Option<K> {
        self.patterns
            .iter()
            .find(|p| p.is_match(message))
            .map(|p| p.kind)
    }

    pub fn matches(&self, message: &str) -> bool {
        self.classify(message).is_some()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source())
    }

}

impl<K: Copy> Default for CommandTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
