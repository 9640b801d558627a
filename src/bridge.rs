//! `log` facade bridge
//!
//! Routes records emitted through the `log` crate macros into a [`Logger`].
//! Key/value pairs attached with the `kv` syntax become attributes.
//!
//! ```no_run
//! use rust_attr_logger::{bridge, LogLevel, Logger};
//!
//! bridge::install(Logger::default(), LogLevel::Debug).expect("no other logger installed");
//! log::info!(user = "alice"; "signed in");
//! ```

use crate::core::{Attr, LogLevel, Logger, LoggerError, Record, Result, Source, Value};
use log::kv::{self, VisitSource};

pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.enabled(LogLevel::from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from_log(record.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut collector = AttrCollector::default();
        if let Err(e) = record.key_values().visit(&mut collector) {
            eprintln!("[LOGGER ERROR] Failed to collect key/value pairs: {}", e);
        }

        let mut out = Record::new(level, record.args().to_string()).with_attrs(collector.attrs);
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            let function = record.module_path().unwrap_or_else(|| record.target());
            out = out.with_source(Source::new(file, line, function));
        }
        self.logger.log_record(out);
    }

    fn flush(&self) {
        if let Err(e) = self.logger.flush() {
            eprintln!("[LOGGER ERROR] Flush failed: {}", e);
        }
    }
}

/// Install a [`LogBridge`] as the global `log` logger
///
/// Fails if another logger was installed first.
pub fn install(logger: Logger, max_level: LogLevel) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))
        .map_err(|e| LoggerError::other(format!("log bridge: {}", e)))?;
    log::set_max_level(max_level.to_log_filter());
    Ok(())
}

#[derive(Default)]
struct AttrCollector {
    attrs: Vec<Attr>,
}

impl<'kvs> VisitSource<'kvs> for AttrCollector {
    fn visit_pair(&mut self, key: kv::Key<'kvs>, value: kv::Value<'kvs>) -> std::result::Result<(), kv::Error> {
        self.attrs.push(Attr::new(key.as_str(), convert(&value)));
        Ok(())
    }
}

fn convert(value: &kv::Value<'_>) -> Value {
    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(i) = value.to_i64() {
        Value::Int(i)
    } else if let Some(u) = value.to_u64() {
        Value::Uint(u)
    } else if let Some(f) = value.to_f64() {
        Value::Float(f)
    } else if let Some(s) = value.to_borrowed_str() {
        Value::String(s.to_string())
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScopedHandler;
    use crate::sinks::MemorySink;
    use log::Log;

    fn bridge(template: &str) -> (LogBridge, MemorySink) {
        let sink = MemorySink::new();
        let handler = ScopedHandler::builder()
            .color(false)
            .source(true)
            .template(template)
            .expect("valid template")
            .sink(sink.clone())
            .build();
        (LogBridge::new(Logger::new(handler)), sink)
    }

    #[test]
    fn test_forwards_message_and_kvs() {
        let (bridge, sink) = bridge("{level} {message}");
        let kvs: &[(&str, kv::Value<'_>)] = &[
            ("user", kv::Value::from("bob")),
            ("id", kv::Value::from(42i64)),
            ("big", kv::Value::from(u64::MAX)),
            ("ok", kv::Value::from(true)),
            ("ratio", kv::Value::from(0.5f64)),
        ];

        bridge.log(
            &log::Record::builder()
                .args(format_args!("hello {}", "world"))
                .level(log::Level::Warn)
                .key_values(&kvs)
                .build(),
        );

        assert_eq!(
            sink.contents(),
            "WARN  hello world user=\"bob\" id=42 big=18446744073709551615 ok=true ratio=0.5\n"
        );
    }

    #[test]
    fn test_level_and_source() {
        let (bridge, sink) = bridge("{if file_name}[{file_name}:{file_line}] {end}{message}");

        assert!(!bridge.enabled(&log::Metadata::builder().level(log::Level::Debug).build()));
        bridge.log(&log::Record::builder().args(format_args!("dropped")).level(log::Level::Debug).build());

        bridge.log(
            &log::Record::builder()
                .args(format_args!("kept"))
                .level(log::Level::Error)
                .file(Some("src/server.rs"))
                .line(Some(12))
                .module_path(Some("app::server"))
                .build(),
        );

        assert_eq!(sink.contents(), "[server.rs:12] kept\n");
    }
}
