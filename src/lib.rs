//! # Rust Attr Logger
//!
//! A structured-log handler that renders records as human-readable lines,
//! with hierarchical scopes, attribute hooks, and pluggable printers.
//!
//! ## Features
//!
//! - **Scoped Handlers**: derive handlers with extra attributes or nested
//!   groups; derived scopes share the sink but never affect each other
//! - **Attribute Hooks**: inspect, replace or suppress attributes and defer
//!   extra output to the end of the line
//! - **Printers**: linear `key=value`, pretty per-line dumps, or an indented
//!   tree
//! - **Templates**: configurable preamble with time, elapsed time, level,
//!   message and call site
//!
//! ## Example
//!
//! ```
//! use rust_attr_logger::prelude::*;
//! use rust_attr_logger::sinks::MemorySink;
//!
//! let sink = MemorySink::new();
//! let handler = ScopedHandler::builder()
//!     .color(false)
//!     .template(TEMPLATE_STANDARD)
//!     .unwrap()
//!     .sink(sink.clone())
//!     .build();
//!
//! let logger = Logger::new(handler).with([Attr::new("color", "blue")]);
//! logger.info("hello", [Attr::new("number", 5)]);
//!
//! assert_eq!(sink.contents(), "INFO  hello color=\"blue\" number=5\n");
//! ```

pub mod bridge;
pub mod core;
pub mod hooks;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        attr_hook, Attr, AttrAction, AttrHook, DeferredAction, HandleAttr, Handler, HandlerBuilder,
        HandlerOptions, LogLevel, Logger, LoggerError, LoggerMetrics, PrinterKind, Record, Result,
        ScopedHandler, Sink, Source, TimestampFormat, Value, TEMPLATE_STANDARD,
        TEMPLATE_STANDARD_WITH_ELAPSED, TEMPLATE_STANDARD_WITH_TIME,
    };
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    attr_hook, Attr, AttrAction, AttrHook, ColorMap, DeferredAction, HandleAttr, Handler,
    HandlerBuilder, HandlerOptions, LogLevel, Logger, LoggerError, LoggerMetrics, PrinterKind,
    Record, Result, ScopedHandler, Sink, Source, TimestampFormat, Value,
};
pub use hooks::{RichError, RichErrorHookOptions};
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
