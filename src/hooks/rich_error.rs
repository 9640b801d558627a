//! Rich error values and the hook that expands them
//!
//! A [`RichError`] carries a message, key/value context, an optional cause
//! and a backtrace. Logged as an attribute value, it is turned by
//! [`rich_error`] into a group of its context values, with either the
//! message folded in or a full diagnostic dump deferred to the end of the
//! line.

use crate::core::{attr_hook, Attr, AttrHook, DeferredAction, HandleAttr, Value};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::{self, Write};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Error with structured context for logging
///
/// # Example
///
/// ```
/// use rust_attr_logger::hooks::RichError;
///
/// let err = RichError::new("something wrong").with("foo", "bar");
/// assert_eq!(err.to_string(), "something wrong");
/// assert_eq!(err.values()[0].key, "foo");
/// ```
pub struct RichError {
    message: String,
    values: Vec<Attr>,
    source: Option<BoxError>,
    backtrace: Backtrace,
}

impl RichError {
    /// Create an error, capturing a backtrace when `RUST_BACKTRACE` allows it
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            values: Vec::new(),
            source: None,
            backtrace: Backtrace::capture(),
        }
    }

    /// Wrap `source` with an additional message
    pub fn wrap<E>(source: E, message: impl Into<String>) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(message)
        }
    }

    /// Attach a context value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push(Attr::new(key, value));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context values attached to this error only
    pub fn values(&self) -> &[Attr] {
        &self.values
    }

    /// Context values of this error and every wrapped `RichError`
    ///
    /// Outer errors come first; a key already set by an outer error hides
    /// the same key further down the chain.
    pub fn all_values(&self) -> Vec<Attr> {
        let mut values: Vec<Attr> = Vec::new();
        let mut current = Some(self);
        while let Some(err) = current {
            for attr in &err.values {
                if !values.iter().any(|v| v.key == attr.key) {
                    values.push(attr.clone());
                }
            }
            current = err
                .source
                .as_deref()
                .and_then(|source| source.downcast_ref::<RichError>());
        }
        values
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Message, causal chain, and backtrace if one was captured
    pub fn write_report(&self, w: &mut dyn Write) -> fmt::Result {
        write!(w, "Error: {}", self.message)?;
        let mut cause = self.source.as_deref().map(|e| e as &(dyn Error + 'static));
        while let Some(err) = cause {
            match err.downcast_ref::<RichError>() {
                Some(rich) => write!(w, "\n  caused by: {}", rich.message)?,
                None => write!(w, "\n  caused by: {}", err)?,
            }
            cause = err.source();
        }
        if self.backtrace.status() == BacktraceStatus::Captured {
            let trace = self.backtrace.to_string();
            write!(w, "\n{}", trace.trim_end())?;
        }
        Ok(())
    }

    pub fn report(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_report(&mut out);
        out
    }
}

impl fmt::Display for RichError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RichError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichError")
            .field("message", &self.message)
            .field("values", &self.values)
            .field("source", &self.source)
            .finish()
    }
}

impl Error for RichError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RichErrorHookOptions {
    /// Defer the full report instead of folding the message into the group
    pub with_trace: bool,
}

impl RichErrorHookOptions {
    #[must_use]
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.with_trace = enabled;
        self
    }
}

/// Hook expanding [`RichError`] values
///
/// Any other attribute is left alone.
pub fn rich_error(options: RichErrorHookOptions) -> AttrHook {
    attr_hook(move |_, attr| {
        let err = attr.value.downcast_ref::<RichError>()?;
        let mut values = err.all_values();

        if options.with_trace {
            let report = format!("\n{}", err.report());
            let group = Attr::group(attr.key.clone(), values);
            return Some(HandleAttr::replace(group).with_deferred(DeferredAction::text(report)));
        }

        values.push(Attr::string("message", err.to_string()));
        Some(HandleAttr::replace(Attr::group(attr.key.clone(), values)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Handler, LogLevel, Record, ScopedHandler};
    use crate::sinks::MemorySink;
    use std::io;

    fn handler_with(options: RichErrorHookOptions) -> (ScopedHandler, MemorySink) {
        let sink = MemorySink::new();
        let handler = ScopedHandler::builder()
            .color(false)
            .template("{level} {message}")
            .expect("valid template")
            .attr_hook(rich_error(options))
            .sink(sink.clone())
            .build();
        (handler, sink)
    }

    fn log_error(handler: &ScopedHandler, err: RichError) {
        handler
            .handle(Record::new(LogLevel::Error, "hello, world!").with_attr(Attr::any("err", err)))
            .expect("handle");
    }

    #[test]
    fn test_message_folded_without_trace() {
        let (handler, sink) = handler_with(RichErrorHookOptions::default());
        log_error(&handler, RichError::new("something wrong").with("foo", "bar"));

        let out = sink.contents();
        assert_eq!(out, "ERROR hello, world! err.foo=\"bar\" err.message=\"something wrong\"\n");
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn test_report_deferred_with_trace() {
        let (handler, sink) = handler_with(RichErrorHookOptions::default().with_trace(true));
        log_error(&handler, RichError::new("something wrong").with("foo", "bar"));

        let out = sink.contents();
        assert!(out.starts_with("ERROR hello, world! err.foo=\"bar\"\nError: something wrong"));
        assert!(!out.contains("message="));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_other_values_untouched() {
        let (handler, sink) = handler_with(RichErrorHookOptions::default());
        handler
            .handle(Record::new(LogLevel::Error, "hello, world!").with_attr(("err", "just a string")))
            .expect("handle");
        assert_eq!(sink.contents(), "ERROR hello, world! err=\"just a string\"\n");
    }

    #[test]
    fn test_wrapped_chain() {
        let inner = RichError::new("disk full").with("path", "/tmp").with("attempt", 1);
        let outer = RichError::wrap(inner, "save failed").with("attempt", 3);

        let keys: Vec<String> = outer.all_values().into_iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!["attempt", "path"]);
        assert_eq!(outer.all_values()[0].value, Value::from(3));
        assert_eq!(outer.to_string(), "save failed: disk full");

        let report = outer.report();
        assert!(report.starts_with("Error: save failed\n  caused by: disk full"));
    }

    #[test]
    fn test_report_has_no_trailing_newline() {
        let mut err = RichError::new("boom");
        err.backtrace = Backtrace::force_capture();

        let report = err.report();
        assert!(report.starts_with("Error: boom"));
        assert!(!report.ends_with('\n'), "report ends with a blank line: {:?}", report);
    }

    #[test]
    fn test_foreign_source() {
        let err = RichError::wrap(io::Error::new(io::ErrorKind::NotFound, "no such file"), "open config");
        assert!(err.source().is_some());
        assert!(err.report().contains("caused by: no such file"));
        assert!(err.all_values().is_empty());
    }
}
