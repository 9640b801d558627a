//! Sink trait for log output destinations

use std::io;

/// Destination for finished log lines
///
/// A handler hands each record to its sink as one complete, newline
/// terminated buffer while holding the sink lock, so implementations only
/// need to write the bytes they are given in a single call.
pub trait Sink: Send {
    fn write_record(&mut self, line: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    fn name(&self) -> &str;
}

impl Sink for Box<dyn Sink> {
    fn write_record(&mut self, line: &[u8]) -> io::Result<()> {
        (**self).write_record(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
