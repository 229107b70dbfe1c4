//! # cpl-core
//! Core of the cpl logger: a thread-safe hub fanning messages out to
//! console, file and user-supplied writers.

mod config;
mod flags;
mod hub;
mod level;
mod log_writer;

pub use config::{CPL_LOG_CONFIG, CplLogConfig};
pub use flags::{Flags, ParseFlagsError};
pub use hub::{LogHub, WriterId};
pub use level::{Level, ParseLevelError};
pub use log_writer::{LogFile, LogStdout, LogWriter, RawLogWriter};
