use std::io::Write;
use std::sync::Mutex;

use fibstep_core::ipc::format_trace;
use fibstep_core::trace::TraceEvent;

/// A trait for receiving trace events.
pub trait Subscriber: Send + Sync {
    fn on_trace(&self, event: TraceEvent);

    fn on_complete(&self);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSubscriber;

impl Subscriber for NoOpSubscriber {
    fn on_trace(&self, _event: TraceEvent) {}

    fn on_complete(&self) {}
}

/// A JSON-formatting subscriber that writes to a writer.
pub struct JsonSubscriber<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSubscriber<W> {
    /// Creates a new JSON subscriber that writes to the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Subscriber for JsonSubscriber<W> {
    fn on_trace(&self, event: TraceEvent) {
        let line = match format_trace(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("failed to encode trace event: {}", e);
                return;
            }
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line) {
                tracing::warn!("failed to write trace event: {}", e);
            }
        }
    }

    fn on_complete(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writer.flush() {
                tracing::warn!("failed to flush trace output: {}", e);
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingSubscriber {
    events: Mutex<Vec<TraceEvent>>,
    completed: Mutex<bool>,
}

impl CollectingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn is_complete(&self) -> bool {
        self.completed.lock().map(|done| *done).unwrap_or(false)
    }
}

impl Subscriber for CollectingSubscriber {
    fn on_trace(&self, event: TraceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn on_complete(&self) {
        if let Ok(mut done) = self.completed.lock() {
            *done = true;
        }
    }
}

impl<S: Subscriber + ?Sized> Subscriber for std::sync::Arc<S> {
    fn on_trace(&self, event: TraceEvent) {
        (**self).on_trace(event)
    }

    fn on_complete(&self) {
        (**self).on_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibstep_core::ipc::{parse_line, TraceLine};
    use std::sync::Arc;

    #[test]
    fn test_json_subscriber_writes_prefixed_lines() {
        let subscriber = JsonSubscriber::new(Vec::new());
        subscriber.on_trace(TraceEvent::TermStart { term_index: 0, n: 0 });
        subscriber.on_trace(TraceEvent::TermEnd { term_index: 0, value: 0 });
        subscriber.on_complete();

        let output = String::from_utf8(subscriber.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(matches!(parse_line(line), TraceLine::Trace(_)));
        }
    }

    struct UnflushableWriter;

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }
    }

    #[derive(Clone, Default)]
    struct SharedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_subscriber_warns_on_flush_failure() {
        let log = SharedLog::default();
        let make_writer = {
            let log = log.clone();
            move || log.clone()
        };
        let logger = tracing_subscriber::fmt()
            .with_writer(make_writer)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(logger, || {
            let subscriber = JsonSubscriber::new(UnflushableWriter);
            subscriber.on_trace(TraceEvent::TermEnd { term_index: 0, value: 0 });
            subscriber.on_complete();
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("failed to flush trace output: no space left"));
    }

    #[test]
    fn test_collecting_subscriber() {
        let subscriber = CollectingSubscriber::new();
        assert!(!subscriber.is_complete());
        subscriber.on_trace(TraceEvent::TermEnd { term_index: 1, value: 1 });
        subscriber.on_complete();

        assert!(subscriber.is_complete());
        assert_eq!(
            subscriber.events(),
            vec![TraceEvent::TermEnd { term_index: 1, value: 1 }]
        );
    }
}
