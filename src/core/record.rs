//! Log record structure

use super::attr::Attr;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Call site of a log statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub file_path: String,
    pub line: u32,
    pub function: String,
}

impl Source {
    pub fn new(file_path: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            function: function.into(),
        }
    }

    /// Last path component of `file_path`
    pub fn file_name(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file_path)
    }
}

/// One log event, consumed by a handler
#[derive(Debug, Clone)]
pub struct Record {
    pub level: LogLevel,
    pub message: String,
    /// `None` renders as `(no time)`
    pub time: Option<DateTime<Utc>>,
    pub source: Option<Source>,
    pub attrs: Vec<Attr>,
}

/// Sanitize text to prevent log injection attacks
///
/// Replaces newlines, carriage returns, and tabs with escape sequences
/// so one record always starts on its own line. Applied to messages and to
/// attribute keys and group names.
pub(crate) fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl Record {
    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: sanitize(message.as_ref()),
            time: Some(Utc::now()),
            source: None,
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_attr(mut self, attr: impl Into<Attr>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    #[must_use]
    pub fn with_attrs<I>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = Attr>,
    {
        self.attrs.extend(attrs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let record = Record::new(LogLevel::Info, "line one\nline two\tend");
        assert_eq!(record.message, "line one\\nline two\\tend");
    }

    #[test]
    fn test_attrs_keep_order() {
        let record = Record::new(LogLevel::Info, "msg")
            .with_attr(("a", 1))
            .with_attrs(vec![Attr::new("b", 2), Attr::new("c", 3)]);
        let keys: Vec<&str> = record.attrs.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_source_file_name() {
        let source = Source::new("/path/to/foo.rs", 10, "app::main");
        assert_eq!(source.file_name(), "foo.rs");
        assert_eq!(Source::new("bar.rs", 1, "m").file_name(), "bar.rs");
    }
}
