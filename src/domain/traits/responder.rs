/// A unit that recognises one category of chat command and answers it.
///
/// `T` is the fragment type pushed to the sink. Implementations must keep
/// `matches` free of side effects so a registry can probe every responder
/// before committing to any I/O.
pub trait Responder<T>: Send + Sync {
    /// Display name used in help headers and delivery tags
    fn name(&self) -> &str;

    /// Whether this responder claims the whole message
    fn matches(&self, message: &str) -> bool;

    /// Push reply fragments to `sink`, in display order.
    ///
    /// Failures are reported as fragments, never returned.
    fn compute(&self, message: &str, sink: &mut dyn FnMut(T));

    /// Multi-line description of the recognised command syntaxes
    fn help(&self) -> String;
}
