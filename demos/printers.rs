//! Printer comparison example
//!
//! Logs the same nested record with each built-in printer, then shows the
//! logging macros with source locations and a custom level formatter.
//!
//! Run with: cargo run --example printers

use rust_attr_logger::prelude::*;
use rust_attr_logger::{error, info, warn};

#[derive(Debug)]
#[allow(dead_code)]
struct User {
    name: &'static str,
    email: &'static str,
}

#[derive(Debug)]
#[allow(dead_code)]
struct Store {
    name: &'static str,
    address: &'static str,
    phone: &'static str,
}

fn info_group() -> Attr {
    Attr::group(
        "info",
        vec![
            Attr::any("user", User {
                name: "mizutani",
                email: "mizutani@hey.com",
            }),
            Attr::any("store", Store {
                name: "Jiro",
                address: "Tokyo",
                phone: "123-456-7890",
            }),
        ],
    )
}

fn main() -> Result<()> {
    println!("=== Rust Attr Logger - Printers Example ===\n");

    for (label, printer) in [
        ("LinearPrinter", PrinterKind::Linear),
        ("PrettyPrinter", PrinterKind::Pretty),
        ("IndentPrinter", PrinterKind::Indent),
    ] {
        let logger = Logger::new(ScopedHandler::builder().printer(printer).build());
        logger.info(format!("by {}", label), [info_group()]);
        println!();
    }

    println!("=== Macros with source locations ===\n");

    let logger = Logger::new(
        ScopedHandler::builder()
            .source(true)
            .min_level(LogLevel::Debug)
            .level_formatter(|level| format!("{:<5}", level.to_str()))
            .build(),
    );

    info!(logger, "hello, world!"; "foo" => "bar");
    warn!(logger, "What?"; "group1" => vec![Attr::new("foo", "bar")]);
    error!(logger.with_group("hex"), "Ouch!"; "num" => 123);

    println!("\n=== Elapsed-time preamble ===\n");

    let logger = Logger::new(
        ScopedHandler::builder()
            .template(TEMPLATE_STANDARD_WITH_ELAPSED)?
            .build(),
    );
    logger.info("started", [Attr::new("port", 8080)]);
    logger.with_group("db").warn("slow query", [Attr::new("ms", 350)]);

    logger.flush()?;
    Ok(())
}
