//! Built-in attribute hooks

pub mod rich_error;

pub use rich_error::{rich_error, RichError, RichErrorHookOptions};
