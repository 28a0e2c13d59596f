//! Ticker responder - Price lookups against the configured price source

use std::sync::Arc;
use crate::application::errors::PatternError;
use crate::application::messaging::split_into_chunks;
use crate::domain::entities::{CommandTable, TextResponse};
use crate::domain::traits::{PriceSource, Responder};

const NAME: &str = "TickerResponder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickerCommand {
    AveragePrice,
    Price,
    AllTokens,
    AllPrices,
}

/// Answers `$avgPrice`, `$price`, `$allTokens` and `$allPrices`
pub struct TickerResponder {
    commands: CommandTable<TickerCommand>,
    source: Arc<dyn PriceSource>,
    max_fragment_len: usize,
}

impl TickerResponder {
    pub fn new(source: Arc<dyn PriceSource>, max_fragment_len: usize) -> Result<Self, PatternError> {
        let commands = CommandTable::new()
            .with(TickerCommand::AveragePrice, r"^\$avgPrice [A-Z0-9_.-]{1,20}$")?
            .with(TickerCommand::Price, r"^\$price [A-Z0-9_.-]{1,20}$")?
            .with(TickerCommand::AllTokens, r"^\$allTokens$")?
            .with(TickerCommand::AllPrices, r"^\$allPrices$")?;

        Ok(Self {
            commands,
            source,
            max_fragment_len,
        })
    }

    fn average_price_of(&self, message: &str) -> TextResponse {
        let Some(symbol) = symbol_of(message) else {
            return TextResponse::new("missing symbol parameter: $avgPrice <SYMBOL>");
        };

        match self.source.average_price(symbol) {
            Ok(price) => TextResponse::new(price),
            Err(e) => self.failure(&format!("average price of {}", symbol), e),
        }
    }

    fn price_of(&self, message: &str) -> TextResponse {
        let Some(symbol) = symbol_of(message) else {
            return TextResponse::new("missing symbol parameter: $price <SYMBOL>");
        };

        match self.source.price(symbol) {
            Ok(price) => TextResponse::new(price.to_string()),
            Err(e) => self.failure(&format!("price of {}", symbol), e),
        }
    }

    fn all_tokens(&self) -> Vec<TextResponse> {
        match self.source.all_tokens() {
            Ok(tokens) => self.chunked(&tokens.join(", ")),
            Err(e) => vec![self.failure("token list", e)],
        }
    }

    fn all_prices(&self) -> Vec<TextResponse> {
        match self.source.all_prices() {
            Ok(prices) => {
                let listing: String = prices.iter().map(|p| p.to_string()).collect();
                self.chunked(&listing)
            }
            Err(e) => vec![self.failure("price list", e)],
        }
    }

    fn chunked(&self, text: &str) -> Vec<TextResponse> {
        split_into_chunks(text, self.max_fragment_len)
            .into_iter()
            .map(TextResponse::new)
            .collect()
    }

    fn failure(&self, what: &str, error: impl std::fmt::Display) -> TextResponse {
        tracing::warn!("Failed to fetch {}: {}", what, error);
        TextResponse::new(format!("couldn't fetch {}: {}", what, error))
    }
}

fn symbol_of(message: &str) -> Option<&str> {
    message.split(' ').nth(1).filter(|s| !s.is_empty())
}

impl Responder<TextResponse> for TickerResponder {
    fn name(&self) -> &str {
        NAME
    }

    fn matches(&self, message: &str) -> bool {
        self.commands.matches(message)
    }

    fn compute(&self, message: &str, sink: &mut dyn FnMut(TextResponse)) {
        match self.commands.classify(message) {
            Some(TickerCommand::AveragePrice) => sink(self.average_price_of(message)),
            Some(TickerCommand::Price) => sink(self.price_of(message)),
            Some(TickerCommand::AllTokens) => {
                for fragment in self.all_tokens() {
                    sink(fragment);
                }
            }
            Some(TickerCommand::AllPrices) => {
                for fragment in self.all_prices() {
                    sink(fragment);
                }
            }
            None => sink(TextResponse::new(format!("couldn't compute message {}", message))),
        }
    }

    fn help(&self) -> String {
        let lines: Vec<String> = self.commands.sources().map(|s| format!("    {}", s)).collect();
        format!("Available commands for {}\n{}", NAME, lines.join("\n"))
    }
}
