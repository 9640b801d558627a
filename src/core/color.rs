//! Color palette for preamble fields and attributes
//!
//! Colors are applied with the `colored` crate, which also honours the
//! `CLICOLOR`/`CLICOLOR_FORCE`/`NO_COLOR` conventions on its own.

use super::log_level::LogLevel;
use colored::{Color, Colorize};
use std::collections::HashMap;

/// Terminals known to understand ANSI colors
const COLOR_TERMINALS: [&str; 4] = ["xterm", "vt100", "rxvt", "screen"];

/// Whether colors should be on when the configuration does not say
///
/// True when `TERM` names a color-capable terminal and `NO_COLOR` is unset.
pub fn colors_enabled_by_default() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => COLOR_TERMINALS.iter().any(|t| term.contains(t)),
        Err(_) => false,
    }
}

/// A foreground color with optional bold weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: Color,
    pub bold: bool,
}

impl Paint {
    pub const fn new(color: Color) -> Self {
        Self { color, bold: false }
    }

    pub const fn bold(color: Color) -> Self {
        Self { color, bold: true }
    }

    /// Wrap `text` in the escape codes for this paint
    pub fn apply(&self, text: &str) -> String {
        let colored = text.color(self.color);
        if self.bold {
            colored.bold().to_string()
        } else {
            colored.to_string()
        }
    }
}

/// Palette used when colors are enabled
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    levels: HashMap<LogLevel, Paint>,
    /// Used for levels without an explicit entry
    pub level_default: Paint,
    pub time: Paint,
    pub message: Paint,
    /// Attribute keys are left uncolored when `None`
    pub key: Option<Paint>,
    pub value: Paint,
}

impl ColorMap {
    /// Palette without any per-level entries
    pub fn new(level_default: Paint) -> Self {
        Self {
            levels: HashMap::new(),
            level_default,
            time: Paint::new(Color::White),
            message: Paint::new(Color::BrightWhite),
            key: None,
            value: Paint::new(Color::BrightWhite),
        }
    }

    /// Set the paint used for one level
    #[must_use]
    pub fn with_level(mut self, level: LogLevel, paint: Paint) -> Self {
        self.levels.insert(level, paint);
        self
    }

    /// Set the paint used for attribute keys
    #[must_use]
    pub fn with_key(mut self, paint: Paint) -> Self {
        self.key = Some(paint);
        self
    }

    pub fn level(&self, level: LogLevel) -> Paint {
        self.levels.get(&level).copied().unwrap_or(self.level_default)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap::new(Paint::bold(Color::Blue))
            .with_level(LogLevel::Trace, Paint::bold(Color::BrightBlack))
            .with_level(LogLevel::Debug, Paint::bold(Color::White))
            .with_level(LogLevel::Info, Paint::bold(Color::Cyan))
            .with_level(LogLevel::Warn, Paint::bold(Color::Yellow))
            .with_level(LogLevel::Error, Paint::bold(Color::Red))
            .with_level(LogLevel::Fatal, Paint::bold(Color::BrightRed))
    }
}
