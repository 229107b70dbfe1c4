use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use cpl_core::{Level, LogHub};

/// Forwards `log` crate records to a hub.
struct HubLogger {
    hub: &'static LogHub,
}

impl Log for HubLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.hub.enable(metadata.level().into())
    }

    fn log(&self, record: &Record) {
        let level = Level::from(record.level());
        if self.hub.enable(level) {
            self.hub.write(level, &record.args().to_string());
        }
    }

    fn flush(&self) {
        self.hub.flush();
    }
}

/// Routes `log::error!` ... `log::trace!` into `hub`.
///
/// `log` levels map as Error→Error, Warn→Warning, Info→Info, Debug→Verbose
/// and Trace→Debug. Fails if another logger is already installed.
pub fn install_log_bridge(hub: &'static LogHub) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(HubLogger { hub }))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
