//! Logger front end
//!
//! [`Logger`] is the call-site API over any [`Handler`]. It checks the level,
//! builds a [`Record`], and reports handler failures on stderr instead of
//! returning them, so logging calls never need error handling of their own.

use super::attr::Attr;
use super::error::Result;
use super::handler::{Handler, ScopedHandler};
use super::log_level::LogLevel;
use super::record::{Record, Source};
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.handler.enabled(level)
    }

    /// Log `message` with `attrs`, stamped with the current time
    pub fn log<I>(&self, level: LogLevel, message: impl AsRef<str>, attrs: I)
    where
        I: IntoIterator<Item = Attr>,
    {
        self.log_at(level, message, attrs, None);
    }

    /// Like [`Logger::log`], with an optional call site
    pub fn log_at<I>(&self, level: LogLevel, message: impl AsRef<str>, attrs: I, source: Option<Source>)
    where
        I: IntoIterator<Item = Attr>,
    {
        if !self.enabled(level) {
            return;
        }

        let mut record = Record::new(level, message).with_attrs(attrs);
        record.source = source;
        self.log_record(record);
    }

    /// Hand a prepared record to the handler
    pub fn log_record(&self, record: Record) {
        if let Err(e) = self.handler.handle(record) {
            eprintln!("[LOGGER ERROR] Handler failed: {}", e);
        }
    }

    pub fn trace<I: IntoIterator<Item = Attr>>(&self, message: impl AsRef<str>, attrs: I) {
        self.log(LogLevel::Trace, message, attrs);
    }

    pub fn debug<I: IntoIterator<Item = Attr>>(&self, message: impl AsRef<str>, attrs: I) {
        self.log(LogLevel::Debug, message, attrs);
    }

    pub fn info<I: IntoIterator<Item = Attr>>(&self, message: impl AsRef<str>, attrs: I) {
        self.log(LogLevel::Info, message, attrs);
    }

    pub fn warn<I: IntoIterator<Item = Attr>>(&self, message: impl AsRef<str>, attrs: I) {
        self.log(LogLevel::Warn, message, attrs);
    }

    pub fn error<I: IntoIterator<Item = Attr>>(&self, message: impl AsRef<str>, attrs: I) {
        self.log(LogLevel::Error, message, attrs);
    }

    pub fn fatal<I: IntoIterator<Item = Attr>>(&self, message: impl AsRef<str>, attrs: I) {
        self.log(LogLevel::Fatal, message, attrs);
    }

    /// Derive a logger whose records also carry `attrs`
    #[must_use]
    pub fn with<I: IntoIterator<Item = Attr>>(&self, attrs: I) -> Logger {
        Self::from_handler(self.handler.with_attrs(attrs.into_iter().collect()))
    }

    /// Derive a logger nesting subsequent attributes under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        Self::from_handler(self.handler.with_group(name))
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.flush()
    }
}

impl Default for Logger {
    /// Logger over a default [`ScopedHandler`] writing to stdout
    fn default() -> Self {
        Self::new(ScopedHandler::new())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
