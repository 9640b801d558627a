//! Preamble fields and the template that renders them
//!
//! The preamble is the fixed prefix of every line: timestamp, elapsed time,
//! level, message, and optionally the call site. Templates use `{field}`
//! placeholders with an optional `:width.precision` spec, `{if field}...{end}`
//! sections that render only when the field is set, and `{{`/`}}` escapes.
//!
//! ```
//! use rust_attr_logger::core::preamble::{Preamble, Template};
//!
//! let template = Template::parse("{level} {if file_name}[{file_name}:{file_line}] {end}{message}")
//!     .expect("valid template");
//! let mut out = String::new();
//! template.render(&Preamble::sample(), &mut out).expect("render");
//! assert_eq!(out, "INFO [foo.rs:10] hello, world!");
//! ```

use super::color::ColorMap;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

pub const TEMPLATE_STANDARD_WITH_ELAPSED: &str =
    "{elapsed:8.3} {level} {if file_name}[{file_name}:{file_line}] {end}{message}";
pub const TEMPLATE_STANDARD_WITH_TIME: &str =
    "{timestamp} {level} {if file_name}[{file_name}:{file_line}] {end}{message}";
pub const TEMPLATE_STANDARD: &str = "{level} {if file_name}[{file_name}:{file_line}] {end}{message}";
pub const DEFAULT_TEMPLATE: &str = TEMPLATE_STANDARD_WITH_TIME;

/// Values available to a preamble template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preamble {
    pub timestamp: String,
    /// Seconds since the handler's start instant
    pub elapsed: f64,
    pub level: String,
    pub message: String,
    /// Empty unless source capture is enabled
    pub file_name: String,
    pub file_path: String,
    pub func_name: String,
    /// Zero unless source capture is enabled
    pub file_line: u32,
}

impl Preamble {
    /// Representative values used to dry-run templates at configuration time
    pub fn sample() -> Self {
        Self {
            timestamp: "2006-01-02 15:04:05".to_string(),
            elapsed: 1.234_567_89,
            level: "INFO".to_string(),
            message: "hello, world!".to_string(),
            file_name: "foo.rs".to_string(),
            file_path: "/path/to/foo.rs".to_string(),
            func_name: "main".to_string(),
            file_line: 10,
        }
    }

    /// Apply the palette to level, timestamp and message
    #[must_use]
    pub fn colorize(mut self, colors: &ColorMap, level: LogLevel) -> Self {
        self.level = colors.level(level).apply(&self.level);
        self.timestamp = colors.time.apply(&self.timestamp);
        self.message = colors.message.apply(&self.message);
        self
    }

    fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Timestamp => !self.timestamp.is_empty(),
            Field::Elapsed => self.elapsed != 0.0,
            Field::Level => !self.level.is_empty(),
            Field::Message => !self.message.is_empty(),
            Field::FileName => !self.file_name.is_empty(),
            Field::FilePath => !self.file_path.is_empty(),
            Field::FuncName => !self.func_name.is_empty(),
            Field::FileLine => self.file_line != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Elapsed,
    Level,
    Message,
    FileName,
    FilePath,
    FuncName,
    FileLine,
}

impl FromStr for Field {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "timestamp" => Ok(Field::Timestamp),
            "elapsed" => Ok(Field::Elapsed),
            "level" => Ok(Field::Level),
            "message" => Ok(Field::Message),
            "file_name" => Ok(Field::FileName),
            "file_path" => Ok(Field::FilePath),
            "func_name" => Ok(Field::FuncName),
            "file_line" => Ok(Field::FileLine),
            other => Err(LoggerError::config(
                "template",
                format!("unknown field '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FormatSpec {
    width: Option<usize>,
    precision: Option<usize>,
}

impl FormatSpec {
    fn parse(spec: &str) -> Result<Self> {
        let invalid = || LoggerError::config("template", format!("invalid format spec '{}'", spec));
        let (width, precision) = match spec.split_once('.') {
            Some((w, p)) => (w, Some(p)),
            None => (spec, None),
        };
        let width = if width.is_empty() {
            None
        } else {
            Some(width.parse().map_err(|_| invalid())?)
        };
        let precision = match precision {
            Some(p) => Some(p.parse().map_err(|_| invalid())?),
            None => None,
        };
        Ok(Self { width, precision })
    }

    fn write<T: Display>(&self, out: &mut String, value: T) -> fmt::Result {
        match (self.width, self.precision) {
            (Some(w), Some(p)) => write!(out, "{:w$.p$}", value, w = w, p = p),
            (Some(w), None) => write!(out, "{:w$}", value, w = w),
            (None, Some(p)) => write!(out, "{:.p$}", value, p = p),
            (None, None) => write!(out, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field(Field, FormatSpec),
    Section(Field, Vec<Segment>),
}

/// A parsed preamble template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template, reporting unknown fields and unbalanced braces or sections
    pub fn parse(source: &str) -> Result<Self> {
        // Each frame collects the segments of one `{if}` section; the bottom
        // frame is the template body.
        let mut frames: Vec<(Option<Field>, Vec<Segment>)> = vec![(None, Vec::new())];
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(LoggerError::config("template", "unmatched '}'"));
                }
                '{' => {
                    let mut tag = String::new();
                    let mut closed = false;
                    for t in chars.by_ref() {
                        if t == '}' {
                            closed = true;
                            break;
                        }
                        tag.push(t);
                    }
                    if !closed {
                        return Err(LoggerError::config("template", "unclosed '{'"));
                    }

                    let current = &mut frames.last_mut().ok_or_else(unbalanced)?.1;
                    if !literal.is_empty() {
                        current.push(Segment::Literal(std::mem::take(&mut literal)));
                    }

                    let tag = tag.trim();
                    if let Some(field) = tag.strip_prefix("if ") {
                        frames.push((Some(field.trim().parse()?), Vec::new()));
                    } else if tag == "end" {
                        if frames.len() < 2 {
                            return Err(LoggerError::config("template", "'{end}' without '{if}'"));
                        }
                        let (field, body) = frames.pop().ok_or_else(unbalanced)?;
                        let field = field.ok_or_else(unbalanced)?;
                        frames
                            .last_mut()
                            .ok_or_else(unbalanced)?
                            .1
                            .push(Segment::Section(field, body));
                    } else {
                        let (name, spec) = match tag.split_once(':') {
                            Some((name, spec)) => (name.trim(), FormatSpec::parse(spec.trim())?),
                            None => (tag, FormatSpec::default()),
                        };
                        current.push(Segment::Field(name.parse()?, spec));
                    }
                }
                other => literal.push(other),
            }
        }

        if frames.len() != 1 {
            return Err(LoggerError::config("template", "'{if}' without '{end}'"));
        }
        let (_, mut segments) = frames.pop().ok_or_else(unbalanced)?;
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Parse and dry-run a template against [`Preamble::sample`]
    pub fn parse_validated(source: &str) -> Result<Self> {
        let template = Self::parse(source)?;
        let mut out = String::new();
        template
            .render(&Preamble::sample(), &mut out)
            .map_err(|e| LoggerError::config("template", e.to_string()))?;
        Ok(template)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Append the rendered preamble to `out`
    pub fn render(&self, preamble: &Preamble, out: &mut String) -> Result<()> {
        render_segments(&self.segments, preamble, out)
            .map_err(|_| LoggerError::template(format!("failed to execute template '{}'", self.source)))
    }
}

impl Default for Template {
    fn default() -> Self {
        Template::parse(DEFAULT_TEMPLATE).unwrap_or_else(|_| Template {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: Vec::new(),
        })
    }
}

fn unbalanced() -> LoggerError {
    LoggerError::config("template", "unbalanced sections")
}

fn render_segments(segments: &[Segment], preamble: &Preamble, out: &mut String) -> fmt::Result {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Field(field, spec) => match field {
                Field::Timestamp => spec.write(out, &preamble.timestamp)?,
                Field::Elapsed => spec.write(out, preamble.elapsed)?,
                Field::Level => spec.write(out, &preamble.level)?,
                Field::Message => spec.write(out, &preamble.message)?,
                Field::FileName => spec.write(out, &preamble.file_name)?,
                Field::FilePath => spec.write(out, &preamble.file_path)?,
                Field::FuncName => spec.write(out, &preamble.func_name)?,
                Field::FileLine => spec.write(out, preamble.file_line)?,
            },
            Segment::Section(field, body) => {
                if preamble.is_set(*field) {
                    render_segments(body, preamble, out)?;
                }
            }
        }
    }
    Ok(())
}
