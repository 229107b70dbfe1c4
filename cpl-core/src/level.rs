use std::{fmt, str::FromStr};

use colored::Color;

/// Severity of a log message, and the ceiling a writer accepts.
///
/// Levels are ordered from least to most verbose. A writer registered at
/// level `L` receives every message whose level is in `Error..=L`.
/// [`Level::None`] is a sentinel: messages written at `None` are never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    #[default]
    None = 0,
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
}

impl Level {
    /// All levels, from `None` to `Debug`.
    pub const ALL: [Level; 6] = [
        Level::None,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Verbose,
        Level::Debug,
    ];

    /// Converts a raw value, clamping anything above `Debug` to `Debug`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::None,
            1 => Level::Error,
            2 => Level::Warning,
            3 => Level::Info,
            4 => Level::Verbose,
            _ => Level::Debug,
        }
    }

    /// Name written in front of a formatted line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::None => "None",
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Info => "Info",
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
        }
    }

    /// Terminal color of the prefix when colorized output is enabled.
    pub const fn color(self) -> Color {
        match self {
            Level::None => Color::Black,
            Level::Error => Color::BrightRed,
            Level::Warning => Color::Yellow,
            Level::Info => Color::Green,
            Level::Verbose => Color::BrightWhite,
            Level::Debug => Color::White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<u8> for Level {
    fn from(value: u8) -> Self {
        Level::from_u8(value)
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Verbose,
            log::Level::Trace => Level::Debug,
        }
    }
}

impl From<log::LevelFilter> for Level {
    fn from(filter: log::LevelFilter) -> Self {
        match filter.to_level() {
            Some(level) => level.into(),
            None => Level::None,
        }
    }
}

/// Returned when a string names no known level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level {:?}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Ok(Level::from_u8(value));
        }
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}
