//! Attribute hook example
//!
//! Shows the rich-error hook, a redacting hook, and a hook that defers a
//! footer to the end of the line.
//!
//! Run with: cargo run --example attr_hooks
//! Set `WITH_TRACE=1` to get the full error report instead of the message.

use rust_attr_logger::hooks::{rich_error, RichError, RichErrorHookOptions};
use rust_attr_logger::prelude::*;

fn some_action(args: &str) -> std::result::Result<(), RichError> {
    let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    Err(RichError::wrap(cause, "something wrong").with("args", args))
}

fn main() -> Result<()> {
    println!("=== Rust Attr Logger - Attribute Hooks Example ===\n");

    let with_trace = std::env::var_os("WITH_TRACE").is_some();

    let handler = ScopedHandler::builder()
        .color(false)
        .attr_hook(rich_error(RichErrorHookOptions::default().with_trace(with_trace)))
        .hook(|_, attr| (attr.key == "password").then(HandleAttr::suppress))
        .hook(|groups, attr| {
            (attr.key == "request_id").then(|| {
                let footer = format!(" (request {} in {})", attr.value, groups.join("."));
                HandleAttr::defer(DeferredAction::text(footer))
            })
        })
        .build();
    let logger = Logger::new(handler.clone());

    println!("1. Rich error values:");
    if let Err(err) = some_action("foo") {
        logger.error("oops", [Attr::any("error", err)]);
    }

    println!("\n2. Suppressed and deferred attributes:");
    logger.with_group("http").info(
        "login",
        [
            Attr::new("user", "alice"),
            Attr::new("password", "hunter2"),
            Attr::new("request_id", "r-42"),
        ],
    );

    println!("\nMetrics:");
    println!("   records written:   {}", handler.metrics().records_written());
    println!("   attrs suppressed:  {}", handler.metrics().attrs_suppressed());
    println!("   deferred actions:  {}", handler.metrics().deferred_run());

    logger.flush()?;
    Ok(())
}
