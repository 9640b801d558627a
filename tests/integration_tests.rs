//! Integration tests for the scoped handler
//!
//! These tests verify:
//! - Attribute ordering across scope derivations
//! - Group nesting from scopes, records, or both
//! - Hook suppression and deferred output
//! - Printers and templates end to end
//! - Error reporting for sinks and templates
//! - File sink output

use rust_attr_logger::core::color::Paint;
use rust_attr_logger::hooks::{rich_error, RichError, RichErrorHookOptions};
use rust_attr_logger::prelude::*;
use rust_attr_logger::sinks::MemorySink;
use rust_attr_logger::ColorMap;
use std::fs;
use std::io;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn builder() -> HandlerBuilder {
    ScopedHandler::builder()
        .color(false)
        .min_level(LogLevel::Trace)
        .template(TEMPLATE_STANDARD)
        .expect("valid template")
}

fn memory_logger() -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let handler = builder().sink(sink.clone()).build();
    (Logger::new(handler), sink)
}

#[test]
fn test_basic_attributes() {
    let (logger, sink) = memory_logger();
    logger.info("hello, world!", [Attr::new("color", "blue"), Attr::new("number", 5)]);

    let out = sink.contents();
    assert!(out.contains("hello, world!"));
    assert!(out.contains("color=\"blue\""));
    assert!(out.contains("number=5"));
    assert_eq!(out, "INFO  hello, world! color=\"blue\" number=5\n");
}

#[test]
fn test_scope_group() {
    let (logger, sink) = memory_logger();
    logger.with_group("group1").info("msg", [Attr::new("foo", "bar")]);
    assert_eq!(sink.contents(), "INFO  msg group1.foo=\"bar\"\n");
}

#[test]
fn test_nested_groups_are_equivalent() {
    let (logger, sink) = memory_logger();

    logger
        .with_group("group1")
        .with_group("group2")
        .info("chained", [Attr::new("foo", "bar")]);
    logger.info(
        "record",
        [Attr::group("group1", vec![Attr::group("group2", vec![Attr::new("foo", "bar")])])],
    );
    logger
        .with_group("group1")
        .info("mixed", [Attr::group("group2", vec![Attr::new("foo", "bar")])]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    for (line, message) in lines.iter().zip(["chained", "record", "mixed"]) {
        assert_eq!(line, &format!("INFO  {} group1.group2.foo=\"bar\"", message));
    }
}

#[test]
fn test_attribute_order_across_derivations() {
    let (logger, sink) = memory_logger();
    let derived = logger
        .with([Attr::new("a", 1)])
        .with([Attr::new("b", 2)])
        .with_group("g")
        .with([Attr::new("c", 3)]);

    derived.info(
        "ordered",
        [
            Attr::new("d", 4),
            Attr::group("h", vec![Attr::new("e", 5), Attr::group("i", vec![Attr::new("f", 6)])]),
            Attr::new("j", 7),
        ],
    );

    assert_eq!(
        sink.contents(),
        "INFO  ordered a=1 b=2 g.c=3 g.d=4 g.h.e=5 g.h.i.f=6 g.j=7\n"
    );
}

#[test]
fn test_sibling_isolation() {
    let (logger, sink) = memory_logger();
    let parent = logger.with([Attr::new("parent", true)]);
    let child = parent.with([Attr::new("child", 2)]);
    let sibling = parent.with_group("other");

    child.info("child", []);
    sibling.info("sibling", [Attr::new("x", 1)]);
    parent.info("parent", []);

    assert_eq!(
        sink.lines(),
        vec![
            "INFO  child parent=true child=2",
            "INFO  sibling parent=true other.x=1",
            "INFO  parent parent=true",
        ]
    );
}

#[test]
fn test_empty_group_name_is_noop() {
    let (logger, sink) = memory_logger();
    logger.with_group("").info("same", [Attr::new("k", "v")]);
    logger.info("same", [Attr::new("k", "v")]);

    let lines = sink.lines();
    assert_eq!(lines[0], lines[1]);
}

#[test]
fn test_zero_attr_never_rendered() {
    let (logger, sink) = memory_logger();
    logger
        .with([Attr::default()])
        .info("zero", [Attr::default(), Attr::new("", Value::Null), Attr::new("k", 1)]);
    assert_eq!(sink.contents(), "INFO  zero k=1\n");
}

#[test]
fn test_suppression_hides_groups_and_leaves() {
    let sink = MemorySink::new();
    let handler = builder()
        .hook(|_, attr| {
            (attr.key == "password" || attr.key == "secret").then(HandleAttr::suppress)
        })
        .sink(sink.clone())
        .build();
    let logger = Logger::new(handler.clone());

    logger.with([Attr::new("password", "hunter2")]).info(
        "login",
        [
            Attr::new("user", "alice"),
            Attr::group("secret", vec![Attr::new("token", "abc")]),
            Attr::group("meta", vec![Attr::new("password", "x"), Attr::new("ip", "10.0.0.1")]),
        ],
    );

    let out = sink.contents();
    assert_eq!(out, "INFO  login user=\"alice\" meta.ip=\"10.0.0.1\"\n");
    assert!(!out.contains("hunter2"));
    assert!(!out.contains("token"));
    assert_eq!(handler.metrics().attrs_suppressed(), 3);
}

#[test]
fn test_deferred_actions_reverse_order() {
    let sink = MemorySink::new();
    let handler = builder()
        .hook(|_, attr| {
            (attr.key == "first").then(|| HandleAttr::defer(DeferredAction::text(" [first]")))
        })
        .hook(|_, attr| {
            (attr.key == "second").then(|| HandleAttr::defer(DeferredAction::text(" [second]")))
        })
        .sink(sink.clone())
        .build();

    Logger::new(handler).info("deferred", [Attr::new("first", 1), Attr::new("second", 2)]);
    assert_eq!(sink.contents(), "INFO  deferred first=1 second=2 [second] [first]\n");
}

#[test]
fn test_replace_attr_rewrites_leaves() {
    let sink = MemorySink::new();
    let handler = builder()
        .replace_attr(|groups, attr| {
            if attr.key == "token" {
                Attr::new(format!("{}_redacted", attr.key), format!("<{} chars>", attr.value.to_string().len() - 2))
            } else if groups.first().map(String::as_str) == Some("drop") {
                Attr::default()
            } else {
                attr
            }
        })
        .sink(sink.clone())
        .build();

    Logger::new(handler).info(
        "rewrite",
        [
            Attr::new("token", "abcdef"),
            Attr::group("drop", vec![Attr::new("a", 1)]),
            Attr::lazy("lazy", || Value::from("forced")),
        ],
    );
    assert_eq!(
        sink.contents(),
        "INFO  rewrite token_redacted=\"<6 chars>\" lazy=\"forced\"\n"
    );
}

#[test]
fn test_rich_error_hook() {
    let sink = MemorySink::new();
    let handler = builder()
        .attr_hook(rich_error(RichErrorHookOptions::default()))
        .sink(sink.clone())
        .build();

    let err = RichError::new("something wrong").with("foo", "bar");
    Logger::new(handler).error("hello, world!", [Attr::any("err", err)]);

    assert_eq!(
        sink.contents(),
        "ERROR hello, world! err.foo=\"bar\" err.message=\"something wrong\"\n"
    );
}

#[test]
fn test_indent_printer() {
    let sink = MemorySink::new();
    let handler = builder().printer(PrinterKind::Indent).sink(sink.clone()).build();

    Logger::new(handler).with_group("req").info(
        "indented",
        [Attr::new("id", 7), Attr::group("user", vec![Attr::new("name", "alice")])],
    );

    assert_eq!(
        sink.contents(),
        "INFO  indented\n  req:\n    id: 7\n    user:\n      name: \"alice\"\n"
    );
}

#[test]
fn test_indent_printer_omits_groups_without_leaves() {
    let sink = MemorySink::new();
    let handler = builder()
        .printer(PrinterKind::Indent)
        .hook(|_, attr| (attr.key == "x").then(HandleAttr::suppress))
        .sink(sink.clone())
        .build();
    let logger = Logger::new(handler);

    logger.info("m", [Attr::group("g", vec![Attr::new("x", 1)])]);
    logger.with_group("req").info("m", []);

    assert_eq!(sink.contents(), "INFO  m\nINFO  m\n");
}

#[test]
fn test_pretty_printer() {
    #[derive(Debug)]
    struct Store {
        name: &'static str,
        items: Vec<u32>,
    }

    let sink = MemorySink::new();
    let handler = builder().printer(PrinterKind::Pretty).sink(sink.clone()).build();

    Logger::new(handler).info(
        "pretty",
        [Attr::new("n", 1), Attr::any("store", Store { name: "Jiro", items: vec![1] })],
    );

    let out = sink.contents();
    assert!(out.starts_with("INFO  pretty\n  n => 1\n  store => Store {\n"));
    assert!(out.contains("name: \"Jiro\""));
    assert!(out.ends_with("}\n"));
}

#[test]
fn test_value_rendering() {
    let (logger, sink) = memory_logger();
    logger.info(
        "values",
        [
            Attr::new("b", false),
            Attr::new("s", "quote\"d"),
            Attr::new("f", 1.5),
            Attr::new("u", 7u64),
            Attr::new("d", Duration::from_millis(1500)),
            Attr::new("none", Value::Null),
        ],
    );
    assert_eq!(
        sink.contents(),
        "INFO  values b=false s=\"quote\\\"d\" f=1.5 u=7 d=1.5s none=<nil>\n"
    );
}

#[test]
fn test_log_injection_prevention() {
    let (logger, sink) = memory_logger();
    logger.info("User login\nERROR Fake error injected", []);

    let out = sink.contents();
    assert_eq!(out.lines().count(), 1, "Log should be a single line");
    assert!(out.contains("\\n"));
}

#[test]
fn test_key_injection_prevention() {
    let (logger, sink) = memory_logger();
    logger.info("m", [Attr::new("a\nERROR fake", 1)]);

    assert_eq!(sink.contents(), "INFO  m a\\nERROR fake=1\n");
}

#[test]
fn test_level_formatter_and_template() {
    let sink = MemorySink::new();
    let handler = ScopedHandler::builder()
        .color(false)
        .level_formatter(|level| format!("[{}]", level.to_str().to_lowercase()))
        .template("{level} :: {message}")
        .expect("valid template")
        .sink(sink.clone())
        .build();

    Logger::new(handler).warn("custom", []);
    assert_eq!(sink.contents(), "[warn] :: custom\n");
}

#[test]
fn test_elapsed_template() {
    let sink = MemorySink::new();
    let start = Instant::now() - Duration::from_secs(2);
    let handler = ScopedHandler::builder()
        .color(false)
        .start_time(start)
        .template(TEMPLATE_STANDARD_WITH_ELAPSED)
        .expect("valid template")
        .sink(sink.clone())
        .build();

    Logger::new(handler).info("elapsed", []);
    let out = sink.contents();
    let elapsed: f64 = out[..8].trim().parse().expect("elapsed seconds");
    assert!(elapsed >= 2.0, "elapsed was {}", elapsed);
    assert_eq!(&out[8..], " INFO  elapsed\n");
}

#[test]
fn test_missing_time_placeholder() {
    let sink = MemorySink::new();
    let handler = ScopedHandler::builder()
        .color(false)
        .template("{timestamp} {message}")
        .expect("valid template")
        .sink(sink.clone())
        .build();

    handler
        .handle(Record::new(LogLevel::Info, "untimed").with_time(None))
        .expect("handle");
    assert_eq!(sink.contents(), "(no time) untimed\n");
}

#[test]
fn test_colors_applied() {
    let sink = MemorySink::new();
    let colors = ColorMap::default().with_key(Paint::new(colored::Color::Green));
    let handler = ScopedHandler::builder()
        .color(true)
        .color_map(colors)
        .template("{message}")
        .expect("valid template")
        .sink(sink.clone())
        .build();

    colored::control::set_override(true);
    Logger::new(handler).info("colored", [Attr::new("k", 1)]);

    let out = sink.contents();
    assert!(out.contains("\u{1b}["), "expected ANSI escapes in {:?}", out);
    assert!(out.ends_with('\n'));
}

#[test]
fn test_template_validation() {
    let err = ScopedHandler::builder().template("{level").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

    let err = ScopedHandler::builder().template("{if level}unterminated").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}

struct ClosedSink;

impl Sink for ClosedSink {
    fn write_record(&mut self, _line: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn name(&self) -> &str {
        "closed"
    }
}

#[test]
fn test_sink_errors() {
    let handler = builder().sink(ClosedSink).build();

    let err = handler.handle(Record::new(LogLevel::Info, "lost")).unwrap_err();
    assert!(matches!(err, LoggerError::Sink { .. }));
    assert!(err.to_string().contains("closed"));
    assert!(handler.flush().is_err());

    // The front end reports instead of propagating
    Logger::new(handler.clone()).info("also lost", []);
    assert_eq!(handler.metrics().records_failed(), 2);
    assert_eq!(handler.metrics().records_written(), 0);
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("handler.log");

    let handler = builder()
        .sink(FileSink::new(&log_file).expect("Failed to create sink"))
        .build();
    let logger = Logger::new(handler);

    logger.with_group("db").info("connected", [Attr::new("pool", 4)]);
    logger.error("query failed", [Attr::new("retry", true)]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content,
        "INFO  connected db.pool=4\nERROR query failed retry=true\n"
    );
}

#[test]
fn test_options_from_json() {
    let options = HandlerOptions::from_json(
        r#"{"level": "warn", "color": false, "printer": "indent", "template": "{level}|{message}"}"#,
    )
    .expect("valid options");

    let sink = MemorySink::new();
    let handler = ScopedHandler::builder()
        .options(&options)
        .expect("apply options")
        .sink(sink.clone())
        .build();
    let logger = Logger::new(handler);

    logger.info("filtered", [Attr::new("k", 1)]);
    logger.warn("kept", [Attr::new("k", 1)]);
    assert_eq!(sink.contents(), "WARN |kept\n  k: 1\n");
}
