use evlog::{meta, Logger};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<Logger> = OnceCell::new();

/// Installs the process-wide logger. Returns false, keeping the logger already
/// in place, when one was installed (or defaulted by `get_logger`) earlier.
pub fn set_logger(logger: Logger) -> bool {
    match LOGGER.set(logger) {
        Ok(()) => true,
        Err(_) => {
            get_logger().debug("Logger already installed; ignoring replacement.", meta![
                "Installed" => true,
            ]);
            false
        }
    }
}

/// Returns the installed logger, or a printer-less default when `set_logger`
/// was never called (as in tests).
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::default)
}
