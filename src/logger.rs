//! `log` backend that writes `[LEVEL] target: message` lines to a serial
//! sink registered at bring-up.

use alloc::boxed::Box;
use conquer_once::spin::OnceCell;
use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

/// Anything a log line can be written to: a UART in firmware, a string in
/// tests.
pub type Sink = Box<dyn Write + Send>;

pub struct SerialLogger {
    sink: Mutex<Option<Sink>>,
}

impl SerialLogger {
    pub const fn new() -> Self {
        Self {
            sink: Mutex::new(None),
        }
    }

    /// Replace the sink, returning the previous one.
    pub fn attach(&self, sink: Sink) -> Option<Sink> {
        self.sink.lock().replace(sink)
    }

    pub fn detach(&self) -> Option<Sink> {
        self.sink.lock().take()
    }
}

impl Default for SerialLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // An interrupt handler may log while the sink is held; drop the line.
        if let Some(mut guard) = self.sink.try_lock() {
            if let Some(sink) = guard.as_mut() {
                let _ = writeln!(
                    sink,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger::new();
static INSTALLED: OnceCell<()> = OnceCell::uninit();

/// Route the `log` facade to `sink` at `level`. Calling again swaps the
/// sink and level.
pub fn init(sink: Sink, level: LevelFilter) {
    LOGGER.attach(sink);
    if INSTALLED.try_init_once(|| ()).is_ok() && log::set_logger(&LOGGER).is_err() {
        // Some other logger got there first; keep it.
        return;
    }
    log::set_max_level(level);
    log::debug!("Logger ready at {}", level);
}
