use crate::qemu_trace;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// A [`log::Log`] backend that routes log records to QEMU's debug port.
///
/// The logger itself is stateless; the level threshold handed to
/// [`init`](Self::init) lives in the `log` facade (`log::set_max_level`),
/// which also lets the kernel raise or lower it later without touching this
/// crate.
pub struct QemuLogger;

static LOGGER: QemuLogger = QemuLogger;

impl QemuLogger {
    /// Register the debug-port logger with the `log` facade.
    ///
    /// Call once during early init, before the first `log` macro fires.
    ///
    /// # Errors
    /// Returns [`SetLoggerError`] if another logger was installed first.
    pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for QemuLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Format: "[LEVEL] target: message\n" — streamed, never allocated.
        qemu_trace!(
            "[{}] {}: {}\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        // no-op for qemu debug port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn init_threshold_drives_filtering() {
        QemuLogger::init(LevelFilter::Info).unwrap();
        assert_eq!(log::max_level(), LevelFilter::Info);

        let warn = Metadata::builder().level(Level::Warn).target("t").build();
        let debug = Metadata::builder().level(Level::Debug).target("t").build();
        assert!(LOGGER.enabled(&warn));
        assert!(!LOGGER.enabled(&debug));

        // The facade refuses a second registration.
        assert!(QemuLogger::init(LevelFilter::Trace).is_err());
    }
}
