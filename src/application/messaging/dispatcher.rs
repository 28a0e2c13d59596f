//! Responder registry - Routes messages to every responder that claims them

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use crate::domain::entities::TextResponse;
use crate::domain::traits::Responder;
use crate::application::errors::BotError;
use crate::application::responders::HelpResponder;
use super::chunker::split_into_chunks;

/// A fragment tagged with the responder that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery<'a, T> {
    pub responder: &'a str,
    /// Position within this responder's output for the message
    pub sequence: usize,
    pub fragment: T,
}

/// Outcome of dispatching one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub matched: Vec<String>,
    pub failed: Vec<String>,
    pub fragments: usize,
}

impl DispatchReport {
    /// No responder claimed the message
    pub fn is_unhandled(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Ordered set of responders, built once at startup
pub struct ResponderRegistry<T> {
    responders: Vec<Arc<dyn Responder<T>>>,
    max_fragment_len: usize,
}

impl<T> ResponderRegistry<T> {
    pub fn new(max_fragment_len: usize) -> Self {
        Self {
            responders: Vec::new(),
            max_fragment_len,
        }
    }

    /// Append a responder; registration order is dispatch order
    pub fn register<R: Responder<T> + 'static>(&mut self, responder: R) {
        tracing::info!("Registering responder: {}", responder.name());
        self.responders.push(Arc::new(responder));
    }

    pub fn with_responder<R: Responder<T> + 'static>(mut self, responder: R) -> Self {
        self.register(responder);
        self
    }

    /// Responders whose matcher accepts the message, in registration order
    pub fn matching(&self, message: &str) -> Vec<&dyn Responder<T>> {
        self.responders
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| probe(*r, message))
            .collect()
    }

    /// Run every matching responder and forward its fragments to `sink`.
    ///
    /// A responder that panics is logged and skipped; fragments it delivered
    /// before failing are kept and later responders still run. A panic in
    /// `sink` itself is not a responder failure: the panic is re-raised to
    /// the caller once the current responder returns.
    pub fn dispatch(&self, message: &str, sink: &mut dyn FnMut(Delivery<'_, T>)) -> DispatchReport {
        let mut report = DispatchReport::default();

        for responder in &self.responders {
            if !probe(responder.as_ref(), message) {
                continue;
            }

            let name = responder.name();
            report.matched.push(name.to_string());
            tracing::debug!("Dispatching to {}", name);

            let mut sequence = 0;
            let mut sink_panic: Option<Box<dyn Any + Send>> = None;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                responder.compute(message, &mut |fragment| {
                    if sink_panic.is_some() {
                        return;
                    }
                    let delivery = Delivery {
                        responder: name,
                        sequence,
                        fragment,
                    };
                    match panic::catch_unwind(AssertUnwindSafe(|| sink(delivery))) {
                        Ok(()) => sequence += 1,
                        Err(cause) => sink_panic = Some(cause),
                    }
                });
            }));

            report.fragments += sequence;
            if let Some(cause) = sink_panic {
                tracing::error!("Sink failed on output of {}: {}", name, panic_message(&*cause));
                panic::resume_unwind(cause);
            }
            if let Err(cause) = outcome {
                tracing::error!("Responder {} failed: {}", name, panic_message(&*cause));
                report.failed.push(name.to_string());
            }
        }

        if report.is_unhandled() {
            tracing::debug!("No responder for message");
        }

        report
    }

    /// Dispatch and gather the fragments in delivery order
    pub fn collect(&self, message: &str) -> (Vec<T>, DispatchReport) {
        let mut fragments = Vec::new();
        let report = self.dispatch(message, &mut |delivery| fragments.push(delivery.fragment));
        (fragments, report)
    }

    /// Aggregate help of every responder, chunked to the fragment ceiling
    pub fn help(&self) -> Vec<String> {
        let sections: Vec<String> = self.responders.iter().map(|r| r.help()).collect();
        split_into_chunks(&sections.join("\n\n"), self.max_fragment_len)
    }

    pub fn names(&self) -> Vec<&str> {
        self.responders.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.responders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }
}

impl ResponderRegistry<TextResponse> {
    /// Register a help command answering with the help of everything
    /// registered so far, itself included.
    pub fn with_help(mut self) -> Result<Self, BotError> {
        let help = HelpResponder::new()?;
        let mut sections: Vec<String> = self.responders.iter().map(|r| r.help()).collect();
        sections.push(help.help());
        let pages = split_into_chunks(&sections.join("\n\n"), self.max_fragment_len);

        self.register(help.with_pages(pages));
        Ok(self)
    }
}

fn probe<T>(responder: &dyn Responder<T>, message: &str) -> bool {
    panic::catch_unwind(AssertUnwindSafe(|| responder.matches(message))).unwrap_or_else(|cause| {
        tracing::error!("Matcher of {} failed: {}", responder.name(), panic_message(&*cause));
        false
    })
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes any message starting with its prefix
    struct Echo {
        name: &'static str,
        prefix: &'static str,
    }

    impl Responder<TextResponse> for Echo {
        fn name(&self) -> &str {
            self.name
        }

        fn matches(&self, message: &str) -> bool {
            message.starts_with(self.prefix)
        }

        fn compute(&self, message: &str, sink: &mut dyn FnMut(TextResponse)) {
            sink(TextResponse::new(format!("{}:{}", self.name, message)));
        }

        fn help(&self) -> String {
            format!("Available commands for {}\n    {}", self.name, self.prefix)
        }
    }

    /// Delivers one fragment, then panics
    struct Faulty;

    impl Responder<TextResponse> for Faulty {
        fn name(&self) -> &str {
            "Faulty"
        }

        fn matches(&self, _message: &str) -> bool {
            true
        }

        fn compute(&self, _message: &str, sink: &mut dyn FnMut(TextResponse)) {
            sink(TextResponse::new("partial"));
            panic!("price feed exploded");
        }

        fn help(&self) -> String {
            "Available commands for Faulty".to_string()
        }
    }

    fn echo(name: &'static str, prefix: &'static str) -> Echo {
        Echo { name, prefix }
    }

    #[test]
    fn test_empty_registry_leaves_message_unhandled() {
        let registry: ResponderRegistry<TextResponse> = ResponderRegistry::new(2000);
        let (fragments, report) = registry.collect("$price BTC");
        assert!(fragments.is_empty());
        assert!(report.is_unhandled());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_every_matching_responder_runs_in_order() {
        let registry = ResponderRegistry::new(2000)
            .with_responder(echo("a", "$"))
            .with_responder(echo("b", "!"))
            .with_responder(echo("c", "$p"));

        let mut seen = Vec::new();
        let report = registry.dispatch("$price BTC", &mut |d| {
            seen.push((d.responder.to_string(), d.sequence, d.fragment.into_text()));
        });

        assert_eq!(report.matched, vec!["a", "c"]);
        assert_eq!(report.fragments, 2);
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), 0, "a:$price BTC".to_string()),
                ("c".to_string(), 0, "c:$price BTC".to_string()),
            ]
        );
    }

    #[test]
    fn test_matching_probes_without_computing() {
        let registry = ResponderRegistry::new(2000)
            .with_responder(echo("a", "$"))
            .with_responder(echo("b", "!"));

        let names: Vec<&str> = registry.matching("!help").iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["b"]);
        assert!(registry.matching("plain text").is_empty());
    }

    #[test]
    fn test_panicking_responder_does_not_stop_later_ones() {
        let registry = ResponderRegistry::new(2000)
            .with_responder(echo("before", "$"))
            .with_responder(Faulty)
            .with_responder(echo("after", "$"));

        let mut batch = Vec::new();
        let mut reports = Vec::new();
        for message in ["$price BTC", "$allTokens"] {
            let (fragments, report) = registry.collect(message);
            batch.extend(fragments.into_iter().map(TextResponse::into_text));
            reports.push(report);
        }

        assert_eq!(
            batch,
            vec![
                "before:$price BTC",
                "partial",
                "after:$price BTC",
                "before:$allTokens",
                "partial",
                "after:$allTokens",
            ]
        );
        for report in reports {
            assert_eq!(report.failed, vec!["Faulty"]);
            assert_eq!(report.matched.len(), 3);
            assert_eq!(report.fragments, 3);
        }
    }

    #[test]
    fn test_sink_panic_reaches_caller_not_responder() {
        let registry = ResponderRegistry::new(2000)
            .with_responder(echo("first", "$"))
            .with_responder(echo("second", "$"));

        let mut calls = 0;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            registry.dispatch("$price BTC", &mut |_d| {
                calls += 1;
                panic!("transport down");
            })
        }));

        let cause = outcome.unwrap_err();
        assert_eq!(panic_message(&*cause), "transport down");
        assert_eq!(calls, 1, "later responders must not feed a failed sink");
    }

    #[test]
    fn test_sink_panic_skips_remaining_fragments() {
        let registry = ResponderRegistry::new(2000).with_responder(Faulty);

        let mut seen = Vec::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            registry.dispatch("$x", &mut |d| {
                seen.push(d.fragment.into_text());
                panic!("socket closed");
            })
        }));

        let cause = outcome.unwrap_err();
        assert_eq!(panic_message(&*cause), "socket closed");
        assert_eq!(seen, vec!["partial"]);
    }

    #[test]
    fn test_help_concatenates_and_chunks() {
        let registry = ResponderRegistry::new(20)
            .with_responder(echo("a", "$"))
            .with_responder(echo("b", "!"));

        let pages = registry.help();
        let joined = pages.concat();
        assert_eq!(
            joined,
            "Available commands for a\n    $\n\nAvailable commands for b\n    !"
        );
        assert!(pages.iter().all(|p| p.chars().count() <= 20));
    }

    #[test]
    fn test_with_help_registers_help_command() {
        let registry = ResponderRegistry::new(2000)
            .with_responder(echo("a", "$a"))
            .with_help()
            .unwrap();

        assert_eq!(registry.names(), vec!["a", "HelpResponder"]);
        let (fragments, report) = registry.collect("$help");
        assert_eq!(report.matched, vec!["HelpResponder"]);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].text().contains("Available commands for a"));
        assert!(fragments[0].text().contains(r"^\$help$"));
        assert_eq!(registry.help().concat(), fragments[0].text());
    }
}
