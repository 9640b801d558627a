//! Core handler types and traits

pub mod attr;
pub mod color;
pub mod config;
pub mod error;
pub mod handler;
pub mod hook;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod preamble;
pub mod printer;
pub mod record;
pub mod scope;
pub mod sink;
pub mod timestamp;
pub mod value;

mod traversal;

pub use attr::Attr;
pub use color::{colors_enabled_by_default, ColorMap, Paint};
pub use config::{HandlerConfig, HandlerOptions, LevelFormatter, ReplaceAttr};
pub use error::{LoggerError, Result};
pub use handler::{Handler, HandlerBuilder, ScopedHandler};
pub use hook::{attr_hook, AttrAction, AttrHook, DeferredAction, HandleAttr};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use preamble::{
    Preamble, Template, DEFAULT_TEMPLATE, TEMPLATE_STANDARD, TEMPLATE_STANDARD_WITH_ELAPSED,
    TEMPLATE_STANDARD_WITH_TIME,
};
pub use printer::{AttrPrinter, IndentPrinter, LinearPrinter, PrettyPrinter, PrinterKind};
pub use record::{Record, Source};
pub use scope::ScopeNode;
pub use sink::Sink;
pub use timestamp::{TimestampFormat, NO_TIME};
pub use value::{AnyValue, LazyValue, Value, ValueKind};
