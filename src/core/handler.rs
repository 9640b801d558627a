//! Scoped handler implementation
//!
//! A [`ScopedHandler`] is a cheap, cloneable view onto shared state (the
//! configuration, the sink, and the metrics) plus the [`ScopeNode`] it was
//! derived at. Deriving a scope never touches the shared state, and handling
//! a record only takes the sink lock for the final write of one complete line.

use super::attr::Attr;
use super::config::{HandlerConfig, HandlerOptions};
use super::color::ColorMap;
use super::error::{LoggerError, Result};
use super::hook::{attr_hook, AttrHook, HandleAttr};
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use super::preamble::{Preamble, Template};
use super::printer::PrinterKind;
use super::record::Record;
use super::scope::ScopeNode;
use super::sink::Sink;
use super::timestamp::TimestampFormat;
use super::traversal::Traversal;
use crate::sinks::{ConsoleSink, WriterSink};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// Structured-log handler interface
///
/// Implementations must be safe to share between threads; derived handlers
/// are independent values that leave the receiver unchanged.
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be written
    fn enabled(&self, level: LogLevel) -> bool;

    /// Format and write one record
    fn handle(&self, record: Record) -> Result<()>;

    /// Derive a handler whose records also carry `attrs`
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Derive a handler that nests subsequent attributes under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

struct Shared {
    config: HandlerConfig,
    sink: Mutex<Box<dyn Sink>>,
    metrics: LoggerMetrics,
}

#[derive(Clone)]
pub struct ScopedHandler {
    shared: Arc<Shared>,
    node: Arc<ScopeNode>,
}

impl ScopedHandler {
    /// Handler writing to stdout with default settings
    #[must_use]
    pub fn new() -> Self {
        HandlerBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> HandlerBuilder {
        HandlerBuilder::new()
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.shared.config
    }

    /// Metrics shared with every handler derived from the same builder
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Group names opened on this scope, outermost first
    pub fn group_path(&self) -> Vec<String> {
        self.node.group_path()
    }

    /// Derive a scope carrying `attrs`
    ///
    /// An empty list returns an equivalent handler.
    #[must_use]
    pub fn derive_attrs(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        Self {
            shared: Arc::clone(&self.shared),
            node: Arc::new(ScopeNode::with_attrs(&self.node, attrs)),
        }
    }

    /// Derive a scope opening group `name`
    ///
    /// An empty name returns an equivalent handler.
    #[must_use]
    pub fn derive_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self {
            shared: Arc::clone(&self.shared),
            node: Arc::new(ScopeNode::with_group(&self.node, name)),
        }
    }

    /// Render `record` into a complete, newline-terminated line
    ///
    /// Nothing is written and no lock is taken.
    pub fn format_record(&self, record: Record) -> Result<String> {
        let config = &self.shared.config;

        let mut out = String::with_capacity(256);
        self.render_preamble(&record, &mut out)?;

        let working = ScopeNode::with_attrs(&self.node, record.attrs);
        let chain = working.chain();
        let colors = config.enable_color.then_some(&config.colors);

        let mut traversal = Traversal::new(
            out,
            &config.hooks,
            config.replace_attr.as_ref(),
            config.printer.build(colors),
        );
        traversal.walk(&chain);
        let (mut out, stats) = traversal.finish();
        out.push('\n');

        self.shared.metrics.add_suppressed(stats.suppressed);
        self.shared.metrics.add_deferred(stats.deferred_run);
        Ok(out)
    }

    fn render_preamble(&self, record: &Record, out: &mut String) -> Result<()> {
        let config = &self.shared.config;

        let timestamp = config
            .timestamp_format
            .try_format_opt(record.time.as_ref())
            .map_err(|_| {
                LoggerError::template(format!(
                    "failed to format timestamp with {:?}",
                    config.timestamp_format
                ))
            })?;

        let mut preamble = Preamble {
            timestamp,
            elapsed: config.start.elapsed().as_secs_f64(),
            level: config.level_label(record.level),
            message: record.message.clone(),
            ..Preamble::default()
        };

        if config.add_source {
            if let Some(source) = &record.source {
                preamble.file_name = source.file_name().to_string();
                preamble.file_path = source.file_path.clone();
                preamble.func_name = source.function.clone();
                preamble.file_line = source.line;
            }
        }

        if config.enable_color {
            preamble = preamble.colorize(&config.colors, record.level);
        }

        config.template.render(&preamble, out)
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut sink = self.shared.sink.lock();
        sink.write_record(line.as_bytes())
            .map_err(|e| LoggerError::sink(sink.name(), e))
    }
}

impl Default for ScopedHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ScopedHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.shared.config.min_level
    }

    fn handle(&self, record: Record) -> Result<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let result = self
            .format_record(record)
            .and_then(|line| self.write_line(&line));

        match &result {
            Ok(()) => self.shared.metrics.record_written(),
            Err(_) => self.shared.metrics.record_failed(),
        };
        result
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(self.derive_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive_group(name))
    }

    fn flush(&self) -> Result<()> {
        let mut sink = self.shared.sink.lock();
        sink.flush().map_err(|e| LoggerError::sink(sink.name(), e))
    }
}

impl std::fmt::Debug for ScopedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedHandler")
            .field("config", &self.shared.config)
            .field("groups", &self.group_path())
            .finish()
    }
}

/// Builder for [`ScopedHandler`]
///
/// # Example
///
/// ```
/// use rust_attr_logger::core::{Handler, LogLevel, PrinterKind, Record, ScopedHandler};
/// use rust_attr_logger::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let handler = ScopedHandler::builder()
///     .sink(sink.clone())
///     .color(false)
///     .printer(PrinterKind::Linear)
///     .template("{level} {message}")
///     .unwrap()
///     .build();
///
/// handler.handle(Record::new(LogLevel::Info, "hello").with_attr(("n", 5))).unwrap();
/// assert_eq!(sink.contents(), "INFO  hello n=5\n");
/// ```
pub struct HandlerBuilder {
    config: HandlerConfig,
    sink: Option<Box<dyn Sink>>,
}

impl std::fmt::Debug for HandlerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerBuilder")
            .field("config", &self.config)
            .field("sink", &self.sink.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}

impl HandlerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HandlerConfig::default(),
            sink: None,
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Write to any [`Write`] implementation
    #[must_use]
    pub fn writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.sink(WriterSink::new(writer))
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Use a strftime-compatible timestamp format
    ///
    /// Invalid items are reported when a record is handled.
    #[must_use]
    pub fn custom_timestamp(mut self, format_str: &str) -> Self {
        self.config.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    /// Fill the source fields of the preamble from each record
    #[must_use]
    pub fn source(mut self, enabled: bool) -> Self {
        self.config.add_source = enabled;
        self
    }

    #[must_use]
    pub fn color(mut self, enabled: bool) -> Self {
        self.config.enable_color = enabled;
        self
    }

    #[must_use]
    pub fn color_map(mut self, colors: ColorMap) -> Self {
        self.config.colors = colors;
        self
    }

    /// Set the preamble template
    ///
    /// The template is parsed and dry-run against sample values; any failure
    /// is returned here rather than on the first record.
    pub fn template(mut self, source: &str) -> Result<Self> {
        self.config.template = Template::parse_validated(source)?;
        Ok(self)
    }

    #[must_use]
    pub fn level_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(LogLevel) -> String + Send + Sync + 'static,
    {
        self.config.level_formatter = Some(Arc::new(formatter));
        self
    }

    /// Append a hook to the chain
    #[must_use]
    pub fn attr_hook(mut self, hook: AttrHook) -> Self {
        self.config.hooks.push(hook);
        self
    }

    /// Append a closure hook to the chain
    #[must_use]
    pub fn hook<F>(self, f: F) -> Self
    where
        F: Fn(&[String], &Attr) -> Option<HandleAttr> + Send + Sync + 'static,
    {
        self.attr_hook(attr_hook(f))
    }

    /// Final rewrite of every resolved non-group attribute
    #[must_use]
    pub fn replace_attr<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], Attr) -> Attr + Send + Sync + 'static,
    {
        self.config.replace_attr = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn printer(mut self, printer: PrinterKind) -> Self {
        self.config.printer = printer;
        self
    }

    /// Reference point for the `elapsed` template field
    #[must_use]
    pub fn start_time(mut self, start: Instant) -> Self {
        self.config.start = start;
        self
    }

    /// Apply every option that is set
    pub fn options(mut self, options: &HandlerOptions) -> Result<Self> {
        if let Some(level) = options.level {
            self.config.min_level = level;
        }
        if let Some(format) = &options.timestamp_format {
            self.config.timestamp_format = format.clone();
        }
        if let Some(printer) = options.printer {
            self.config.printer = printer;
        }
        if let Some(color) = options.color {
            self.config.enable_color = color;
        }
        if let Some(source) = options.source {
            self.config.add_source = source;
        }
        if let Some(template) = &options.template {
            self = self.template(template)?;
        }
        Ok(self)
    }

    pub fn build(self) -> ScopedHandler {
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));

        ScopedHandler {
            shared: Arc::new(Shared {
                config: self.config,
                sink: Mutex::new(sink),
                metrics: LoggerMetrics::new(),
            }),
            node: ScopeNode::root(),
        }
    }
}

impl Default for HandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
