//! Logging macros for ergonomic log calls.
//!
//! The message takes `format!` arguments; attributes follow a `;` as
//! `"key" => value` pairs. The call site is captured as the record source.
//!
//! # Examples
//!
//! ```
//! use rust_attr_logger::prelude::*;
//! use rust_attr_logger::info;
//!
//! let logger = Logger::default();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With attributes
//! info!(logger, "User {} logged in", 42; "method" => "password", "attempts" => 1);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_attr_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_attr_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500; "retry" => false);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(; $($key:literal => $value:expr),+ $(,)?)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_at(
                level,
                format!($fmt $(, $arg)*),
                vec![$($($crate::Attr::new($key, $value)),+)?],
                Some($crate::Source::new(file!(), line!(), module_path!())),
            );
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_attr_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_attr_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100; "batch" => 3);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_attr_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_attr_logger::error;
/// error!(logger, "Failed to connect to database"; "host" => "db1", "port" => 5432);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, ScopedHandler};
    use crate::sinks::MemorySink;

    fn memory_logger(template: &str) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let handler = ScopedHandler::builder()
            .color(false)
            .source(true)
            .template(template)
            .expect("valid template")
            .sink(sink.clone())
            .build();
        (Logger::new(handler), sink)
    }

    #[test]
    fn test_message_and_attrs() {
        let (logger, sink) = memory_logger("{level} {message}");
        let user = "alice";
        info!(logger, "hello {}", user; "n" => 5, "ok" => true);
        warn!(logger, "no attrs");
        error!(logger, "trailing comma"; "k" => "v",);

        assert_eq!(
            sink.lines(),
            vec!["INFO  hello alice n=5 ok=true", "WARN  no attrs", "ERROR trailing comma k=\"v\""]
        );
    }

    #[test]
    fn test_level_filtered() {
        let (logger, sink) = memory_logger("{message}");
        debug!(logger, "hidden");
        trace!(logger, "hidden {}", 1; "k" => 1);
        log!(logger, LogLevel::Fatal, "shown");
        assert_eq!(sink.lines(), vec!["shown"]);
    }

    #[test]
    fn test_source_captured() {
        let (logger, sink) = memory_logger("{file_name}:{func_name} {message}");
        info!(logger, "here");
        assert_eq!(sink.contents(), "macros.rs:rust_attr_logger::macros::tests here\n");
    }
}
