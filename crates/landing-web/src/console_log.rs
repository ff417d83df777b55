//! `tracing` output and panics routed to the browser console.

use std::io;
use std::sync::Once;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Buffers one formatted event and emits it on drop at the matching
/// console level.
pub(crate) struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => gloo::console::error!(line),
            Level::WARN => gloo::console::warn!(line),
            Level::INFO => gloo::console::info!(line),
            _ => gloo::console::debug!(line),
        }
    }
}

pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub(crate) fn install(level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub(crate) fn install_panic_hook() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            gloo::console::error!(info.to_string());
        }));
    });
}
