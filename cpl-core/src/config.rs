use std::{convert::Infallible, str::FromStr, sync::LazyLock};

use derive_from_env::FromEnv;

use crate::{Flags, Level};

/// Parsed value, or `None` when the variable held garbage.
struct Lenient<T>(Option<T>);

impl<T: FromStr> FromStr for Lenient<T> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Lenient(s.parse().ok()))
    }
}

// Aliases: the derive emits `Type::from_str`, which cannot parse generic paths.
type LenientFlags = Lenient<Flags>;
type LenientLevel = Lenient<Level>;

#[derive(FromEnv)]
#[from_env(prefix = "CPL_LOG")]
#[allow(non_snake_case)]
struct EnvValues {
    #[from_env(default = "default")]
    FLAGS: LenientFlags,
    #[from_env(default = "Info")]
    LEVEL: LenientLevel,
}

/// Settings read from `CPL_LOG_*` environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_snake_case)]
pub struct CplLogConfig {
    /// Formatting flags of hubs built with `LogHub::from_env`.
    pub FLAGS: Flags,
    /// Default level of writers registered through a config builder.
    pub LEVEL: Level,
}

impl Default for CplLogConfig {
    fn default() -> Self {
        Self {
            FLAGS: Flags::DEFAULT,
            LEVEL: Level::Info,
        }
    }
}

impl CplLogConfig {
    /// Reads `CPL_LOG_FLAGS` and `CPL_LOG_LEVEL`.
    ///
    /// A missing or unparseable variable keeps its default without
    /// affecting the other one.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let Ok(values) = EnvValues::from_env() else {
            return defaults;
        };
        Self {
            FLAGS: values.FLAGS.0.unwrap_or(defaults.FLAGS),
            LEVEL: values.LEVEL.0.unwrap_or(defaults.LEVEL),
        }
    }
}

pub static CPL_LOG_CONFIG: LazyLock<CplLogConfig> = LazyLock::new(CplLogConfig::from_env);
