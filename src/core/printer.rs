//! Attribute printers
//!
//! The traversal engine expands groups itself and hands printers one resolved
//! leaf at a time, together with the group path it lives under. Printers only
//! decide presentation: separators, indentation, and colors.
//!
//! - [`LinearPrinter`]: `group.key=value` tokens on the preamble line
//! - [`PrettyPrinter`]: one `group.key => dump` entry per line, with a deep
//!   structural dump of objects
//! - [`IndentPrinter`]: a YAML-like tree with a header line per group

use super::attr::Attr;
use super::color::{ColorMap, Paint};
use super::record::sanitize;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const INDENT: &str = "  ";

/// Rendering strategy for resolved attributes
pub trait AttrPrinter: Send {
    /// Called after `groups` gained a new innermost group
    fn enter_group(&mut self, _out: &mut String, _groups: &[String]) {}

    /// Called before the innermost group of `groups` is left
    fn exit_group(&mut self, _out: &mut String, _groups: &[String]) {}

    /// Print one leaf attribute
    fn print(&mut self, out: &mut String, groups: &[String], attr: &Attr);
}

/// Built-in printer selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterKind {
    #[default]
    Linear,
    Pretty,
    Indent,
}

impl PrinterKind {
    /// Create a printer for one record
    pub fn build<'a>(&self, colors: Option<&'a ColorMap>) -> Box<dyn AttrPrinter + 'a> {
        match self {
            PrinterKind::Linear => Box::new(LinearPrinter::new(colors)),
            PrinterKind::Pretty => Box::new(PrettyPrinter::new(colors)),
            PrinterKind::Indent => Box::new(IndentPrinter::new(colors)),
        }
    }
}

impl FromStr for PrinterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(PrinterKind::Linear),
            "pretty" => Ok(PrinterKind::Pretty),
            "indent" | "indented" => Ok(PrinterKind::Indent),
            _ => Err(format!("Invalid printer: '{}'", s)),
        }
    }
}

fn dotted_key(groups: &[String], key: &str) -> String {
    if groups.is_empty() {
        sanitize(key)
    } else {
        sanitize(&format!("{}.{}", groups.join("."), key))
    }
}

fn paint(paint: Option<Paint>, text: &str) -> String {
    match paint {
        Some(p) => p.apply(text),
        None => text.to_string(),
    }
}

/// Single-line `key=value` printer
pub struct LinearPrinter<'a> {
    colors: Option<&'a ColorMap>,
}

impl<'a> LinearPrinter<'a> {
    pub fn new(colors: Option<&'a ColorMap>) -> Self {
        Self { colors }
    }
}

impl AttrPrinter for LinearPrinter<'_> {
    fn print(&mut self, out: &mut String, groups: &[String], attr: &Attr) {
        let key = dotted_key(groups, &attr.key);
        out.push(' ');
        out.push_str(&paint(self.colors.and_then(|c| c.key), &key));
        out.push('=');
        out.push_str(&paint(self.colors.map(|c| c.value), &attr.value.to_string()));
    }
}

/// One attribute per line with a deep dump of the value
pub struct PrettyPrinter<'a> {
    colors: Option<&'a ColorMap>,
}

impl<'a> PrettyPrinter<'a> {
    pub fn new(colors: Option<&'a ColorMap>) -> Self {
        Self { colors }
    }
}

impl AttrPrinter for PrettyPrinter<'_> {
    fn print(&mut self, out: &mut String, groups: &[String], attr: &Attr) {
        let key = dotted_key(groups, &attr.key);
        let dump = attr.value.pretty().replace('\n', &format!("\n{}", INDENT));

        out.push('\n');
        out.push_str(INDENT);
        out.push_str(&paint(self.colors.and_then(|c| c.key), &key));
        out.push_str(" => ");
        out.push_str(&paint(self.colors.map(|c| c.value), &dump));
    }
}

/// Tree printer with one header line per group
pub struct IndentPrinter<'a> {
    colors: Option<&'a ColorMap>,
}

impl<'a> IndentPrinter<'a> {
    pub fn new(colors: Option<&'a ColorMap>) -> Self {
        Self { colors }
    }
}

impl AttrPrinter for IndentPrinter<'_> {
    fn enter_group(&mut self, out: &mut String, groups: &[String]) {
        let Some(name) = groups.last() else {
            return;
        };
        out.push('\n');
        out.push_str(&INDENT.repeat(groups.len()));
        out.push_str(&paint(self.colors.and_then(|c| c.key), &sanitize(name)));
        out.push(':');
    }

    fn print(&mut self, out: &mut String, groups: &[String], attr: &Attr) {
        out.push('\n');
        out.push_str(&INDENT.repeat(groups.len() + 1));
        out.push_str(&paint(self.colors.and_then(|c| c.key), &sanitize(&attr.key)));
        out.push_str(": ");
        out.push_str(&paint(self.colors.map(|c| c.value), &attr.value.to_string()));
    }
}
