//! # cpl
//! Common purpose library: a process-wide multi-writer logger and small string helpers.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! cpl = "0.1.0"
//! ```
//!
//! ```rust
//! use cpl::{cpl_log, hub_config};
//!
//! let _guard = hub_config().init_global();
//! cpl_log!(Info, "Hello, {}!", "world");
//! log::warn!("the log crate macros work too");
//! // writers registered by the guard are removed when it is dropped
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//! Every line is flushed as soon as it is written.
//!
//! ```rust
//! use cpl::{Flags, Level, hub_config};
//!
//! let path = std::env::temp_dir().join("cpl_doc_app.log");
//! std::fs::remove_file(&path).ok();
//! let guard = hub_config()
//!     .with_log_file(&path)
//!     .expect("Unable to create log file")
//!     .no_stdout()
//!     .with_flags(Flags::WRITE_PREFIX)
//!     .init_global();
//!
//! cpl::global().write(Level::Error, "Hello, world!");
//! drop(guard);
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with("Error: Hello, world!\n"));
//! ```
//!
//! ## Explicit hubs
//! [`LogHub`] does not need to be global; hubs can be created and passed around.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use cpl::{Level, LogHub, hub_config};
//!
//! let hub = LogHub::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! hub.add_raw_writer(Level::Debug, move |level: Level, message: &str| {
//!     sink.lock().unwrap().push(format!("{level} {message}"));
//! });
//! let _guard = hub_config().no_stdout().init(&hub);
//! hub.write(Level::Verbose, "details");
//! assert_eq!(*seen.lock().unwrap(), ["Verbose details"]);
//! ```

mod bridge;
mod macros;
mod string;

pub use bridge::install_log_bridge;
pub use cpl_core::{
    CPL_LOG_CONFIG, Flags, Level, LogFile, LogHub, LogStdout, LogWriter, RawLogWriter, WriterId,
};
pub use string::{UriParts, parse_uri};

use std::{path::Path, sync::LazyLock};

/// Hub shared by the whole process, created on first use.
static GLOBAL_HUB: LazyLock<LogHub> = LazyLock::new(LogHub::from_env);

/// Returns the process-wide hub.
///
/// It starts without writers and with the flags from `CPL_LOG_FLAGS`, and
/// lives until the process exits.
pub fn global() -> &'static LogHub {
    &GLOBAL_HUB
}

/// Guard that removes the writers registered by a [`ConfigBuilder`] when dropped.
/// Removing a file writer flushes and closes its file.
pub struct LoggerGuard<'a> {
    hub: &'a LogHub,
    writers: Vec<WriterId>,
}

impl LoggerGuard<'_> {
    /// Writers registered by this guard.
    pub fn writers(&self) -> &[WriterId] {
        &self.writers
    }
}

impl Drop for LoggerGuard<'_> {
    fn drop(&mut self) {
        for id in self.writers.drain(..) {
            self.hub.remove_writer(id);
        }
    }
}

/// Builder for configuring the writers of a hub.
pub struct ConfigBuilder {
    log_file: Option<LogFile>,
    stdout: bool,
    level: Level,
    flags: Flags,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            log_file: None,
            stdout: true,
            level: CPL_LOG_CONFIG.LEVEL,
            flags: CPL_LOG_CONFIG.FLAGS,
        }
    }
}

impl ConfigBuilder {
    /// Also writes to the file at `path`, opened for appending.
    ///
    /// Fails right away if the file cannot be opened, before any writer is
    /// registered.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, std::io::Error> {
        self.log_file = Some(LogFile::new(path)?);
        Ok(self)
    }
    /// [`with_log_file`](ConfigBuilder::with_log_file) when `path` is `Some`,
    /// otherwise leaves the builder without a file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => self.with_log_file(path),
            None => Ok(Self {
                log_file: None,
                ..self
            }),
        }
    }
    /// Skips the stdout writer.
    pub fn no_stdout(self) -> Self {
        self.with_stdout(false)
    }
    /// Whether a stdout writer is registered on init.
    pub fn with_stdout(mut self, enabled: bool) -> Self {
        self.stdout = enabled;
        self
    }
    /// Maximum level of the registered writers.
    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }
    /// Formatting flags applied to the hub.
    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }

    /// Applies the configuration to `hub`.
    #[must_use = "LoggerGuard removes its writers when dropped. Do \"let _guard = hub_config().init(&hub);\""]
    pub fn init(self, hub: &LogHub) -> LoggerGuard<'_> {
        let Self {
            log_file,
            stdout,
            level,
            flags,
        } = self;
        hub.set_flags(flags);
        let mut writers = Vec::new();
        if stdout {
            writers.push(hub.add_std_writer(level));
        }
        if let Some(log_file) = log_file {
            writers.push(hub.add_writer(level, log_file));
        }
        LoggerGuard { hub, writers }
    }

    /// Applies the configuration to the global hub and routes the `log`
    /// crate's macros into it.
    #[must_use = "LoggerGuard removes its writers when dropped. Do \"let _guard = hub_config().init_global();\""]
    pub fn init_global(self) -> LoggerGuard<'static> {
        // another logger may own the `log` facade already
        install_log_bridge(global()).ok();
        self.init(global())
    }
}

/// Returns a default ConfigBuilder for configuring a hub.
pub fn hub_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_registers_requested_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("builder.log");
        let hub = LogHub::new();

        let guard = hub_config().with_stdout(false).init(&hub);
        assert!(guard.writers().is_empty());
        drop(guard);

        let guard = hub_config()
            .with_level(Level::Error)
            .maybe_with_log_file(Some(&path))
            .unwrap()
            .no_stdout()
            .init(&hub);
        assert_eq!(guard.writers().len(), 1);
        assert_eq!(hub.level_max(), Level::Error);
        drop(guard);
        assert_eq!(hub.writer_count(), 0);

        let guard = hub_config()
            .with_log_file(&path)
            .unwrap()
            .maybe_with_log_file(None::<&Path>)
            .unwrap()
            .with_stdout(true)
            .init(&hub);
        // `None` drops the file set before, leaving only stdout
        assert_eq!(guard.writers().len(), 1);
    }

    #[test]
    fn test_builder_sets_flags() {
        let hub = LogHub::new();
        let _guard = hub_config()
            .no_stdout()
            .with_flags(Flags::BASH)
            .init(&hub);
        assert_eq!(hub.flags(), Flags::BASH);
    }
}
