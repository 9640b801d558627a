//! Handler configuration
//!
//! [`HandlerConfig`] is the resolved, immutable configuration shared by a
//! handler and all of its derived scopes. [`HandlerOptions`] is the
//! serializable subset that can be loaded from JSON and applied to a
//! [`HandlerBuilder`](crate::core::HandlerBuilder).

use super::attr::Attr;
use super::color::{colors_enabled_by_default, ColorMap};
use super::error::Result;
use super::hook::AttrHook;
use super::log_level::LogLevel;
use super::preamble::Template;
use super::printer::PrinterKind;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Final rewrite applied to each resolved, non-group attribute
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Attr + Send + Sync>;

/// Custom rendering of the level label in the preamble
pub type LevelFormatter = Arc<dyn Fn(LogLevel) -> String + Send + Sync>;

pub struct HandlerConfig {
    pub min_level: LogLevel,
    pub timestamp_format: TimestampFormat,
    pub add_source: bool,
    pub enable_color: bool,
    pub colors: ColorMap,
    pub template: Template,
    pub level_formatter: Option<LevelFormatter>,
    pub hooks: Vec<AttrHook>,
    pub replace_attr: Option<ReplaceAttr>,
    pub printer: PrinterKind,
    /// Reference point for the `elapsed` template field
    pub start: Instant,
}

impl HandlerConfig {
    /// Level label before coloring
    pub fn level_label(&self, level: LogLevel) -> String {
        match &self.level_formatter {
            Some(formatter) => formatter(level),
            None => level.padded_label(),
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            timestamp_format: TimestampFormat::default(),
            add_source: false,
            enable_color: colors_enabled_by_default(),
            colors: ColorMap::default(),
            template: Template::default(),
            level_formatter: None,
            hooks: Vec::new(),
            replace_attr: None,
            printer: PrinterKind::default(),
            start: Instant::now(),
        }
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("min_level", &self.min_level)
            .field("timestamp_format", &self.timestamp_format)
            .field("add_source", &self.add_source)
            .field("enable_color", &self.enable_color)
            .field("template", &self.template.source())
            .field("level_formatter", &self.level_formatter.is_some())
            .field("hooks", &self.hooks.len())
            .field("replace_attr", &self.replace_attr.is_some())
            .field("printer", &self.printer)
            .finish()
    }
}

/// Serializable handler options
///
/// Every field is optional; unset fields leave the builder untouched.
///
/// # Example
///
/// ```
/// use rust_attr_logger::core::{HandlerOptions, PrinterKind};
///
/// let options = HandlerOptions::from_json(r#"{"level": "debug", "printer": "indent"}"#).unwrap();
/// assert_eq!(options.printer, Some(PrinterKind::Indent));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerOptions {
    #[serde(deserialize_with = "deserialize_level")]
    pub level: Option<LogLevel>,
    pub timestamp_format: Option<TimestampFormat>,
    pub printer: Option<PrinterKind>,
    pub color: Option<bool>,
    pub source: Option<bool>,
    pub template: Option<String>,
}

impl HandlerOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<Option<LogLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| s.parse::<LogLevel>().map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        let config = HandlerConfig::default();
        assert_eq!(config.level_label(LogLevel::Info), "INFO ");
        assert_eq!(config.level_label(LogLevel::Error), "ERROR");
    }

    #[test]
    fn test_level_formatter() {
        let config = HandlerConfig {
            level_formatter: Some(Arc::new(|level: LogLevel| format!("<{}>", level.to_str().to_lowercase()))),
            ..HandlerConfig::default()
        };
        assert_eq!(config.level_label(LogLevel::Warn), "<warn>");
    }

    #[test]
    fn test_options_from_json() {
        let options = HandlerOptions::from_json(
            r#"{
                "level": "warning",
                "timestamp_format": "Rfc3339",
                "printer": "pretty",
                "color": false,
                "source": true,
                "template": "{level} {message}"
            }"#,
        )
        .expect("parse options");

        assert_eq!(options.level, Some(LogLevel::Warn));
        assert_eq!(options.timestamp_format, Some(TimestampFormat::Rfc3339));
        assert_eq!(options.printer, Some(PrinterKind::Pretty));
        assert_eq!(options.color, Some(false));
        assert_eq!(options.source, Some(true));
        assert_eq!(options.template.as_deref(), Some("{level} {message}"));
    }

    #[test]
    fn test_options_empty_and_roundtrip() {
        let options = HandlerOptions::from_json("{}").expect("empty options");
        assert_eq!(options, HandlerOptions::default());

        let options = HandlerOptions {
            level: Some(LogLevel::Debug),
            printer: Some(PrinterKind::Indent),
            ..HandlerOptions::default()
        };
        let json = options.to_json().expect("serialize");
        assert_eq!(HandlerOptions::from_json(&json).expect("deserialize"), options);
    }

    #[test]
    fn test_options_reject_bad_input() {
        assert!(HandlerOptions::from_json(r#"{"level": "loud"}"#).is_err());
        assert!(HandlerOptions::from_json(r#"{"colour": true}"#).is_err());
        assert!(HandlerOptions::from_json("not json").is_err());
    }
}
