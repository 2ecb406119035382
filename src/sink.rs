//! Diagnostic sinks for failures that cannot be sent to the client.

use std::io::Write;
use std::sync::Mutex;

use tracing::error;

/// Somewhere to report failures while writing a problem response.
///
/// A sink is shared by every request answered by a responder, so it must be
/// safe to use concurrently.
pub trait Sink: Send + Sync {
    fn report(&self, message: &str);
}

/// Reports failures as `tracing` error events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn report(&self, message: &str) {
        error!("{}", message);
    }
}

/// Writes one line per failure to an [`io::Write`](std::io::Write).
///
/// ```
/// # use problem::{LineSink, Sink};
/// let sink = LineSink::new(Vec::new());
/// sink.report("broken");
///
/// assert_eq!(sink.into_inner(), b"broken\n");
/// ```
#[derive(Debug)]
pub struct LineSink<W>(Mutex<W>);

impl<W> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self(Mutex::new(writer))
    }

    /// Get the underlying writer back.
    pub fn into_inner(self) -> W {
        self.0.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Sink for LineSink<W> {
    fn report(&self, message: &str) {
        let mut writer = self.0.lock().unwrap_or_else(|e| e.into_inner());

        // nowhere left to report a failing sink
        let _ = writeln!(writer, "{}", message);
        let _ = writer.flush();
    }
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    #[test]
    fn line_sink() {
        let sink = LineSink::new(Vec::new());
        sink.report("first");
        sink.report("second");

        assert_eq!(sink.into_inner(), b"first\nsecond\n");
    }

    #[derive(Default)]
    struct Buffered {
        pending: Vec<u8>,
        flushed: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for Buffered {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.lock().unwrap().append(&mut self.pending);
            Ok(())
        }
    }

    #[test]
    fn line_sink_flushes() {
        let writer = Buffered::default();
        let flushed = writer.flushed.clone();

        let sink = LineSink::new(writer);
        sink.report("broken");

        assert_eq!(*flushed.lock().unwrap(), b"broken\n");
    }

    #[test]
    fn closure_sink() {
        let messages = Arc::new(Mutex::new(Vec::new()));

        let captured = messages.clone();
        let sink = move |message: &str| captured.lock().unwrap().push(message.to_string());
        sink.report("hello");

        assert_eq!(*messages.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[test]
    fn tracing_sink() {
        // only checks that reporting without a subscriber is harmless
        TracingSink.report("nobody is listening");
    }
}
