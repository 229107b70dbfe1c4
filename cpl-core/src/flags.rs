use std::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign},
    str::FromStr,
};

/// Controls what a [`LogHub`](crate::LogHub) puts in front of each formatted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    /// Prepend a `[thread]` tag.
    pub const WRITE_THREAD_ID: Flags = Flags(1 << 0);
    /// Prepend the severity name.
    pub const WRITE_PREFIX: Flags = Flags(1 << 1);
    /// Use short first-seen thread tags (`000`, `001`, ...) instead of platform ids.
    pub const PRETTY_THREAD_ID: Flags = Flags(1 << 2);
    /// Color the severity name.
    pub const COLORIZED_PREFIX: Flags = Flags(1 << 3);

    pub const EMPTY: Flags = Flags(0);
    pub const DEFAULT: Flags = Flags(
        Self::WRITE_THREAD_ID.0 | Self::WRITE_PREFIX.0 | Self::PRETTY_THREAD_ID.0,
    );
    /// Defaults plus colors, for terminals.
    pub const BASH: Flags = Flags(Self::DEFAULT.0 | Self::COLORIZED_PREFIX.0);

    const MASK: u8 = Self::BASH.0;

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds flags from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Flags(bits & Self::MASK)
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::DEFAULT
    }
}

impl BitOr for Flags {
    type Output = Flags;
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.insert(rhs);
    }
}

impl BitAnd for Flags {
    type Output = Flags;
    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

/// Returned when a flag name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlagsError(String);

impl fmt::Display for ParseFlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log flag {:?}", self.0)
    }
}

impl std::error::Error for ParseFlagsError {}

/// Parses either a number or names joined by `|`,
/// e.g. `thread_id|prefix|pretty|color`.
impl FromStr for Flags {
    type Err = ParseFlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(bits) = s.parse::<u8>() {
            return Ok(Flags::from_bits_truncate(bits));
        }
        let mut flags = Flags::EMPTY;
        for name in s.split('|').map(str::trim).filter(|name| !name.is_empty()) {
            flags |= match name.to_ascii_lowercase().as_str() {
                "thread_id" => Flags::WRITE_THREAD_ID,
                "prefix" => Flags::WRITE_PREFIX,
                "pretty" => Flags::PRETTY_THREAD_ID,
                "color" => Flags::COLORIZED_PREFIX,
                "default" => Flags::DEFAULT,
                "bash" => Flags::BASH,
                "none" => Flags::EMPTY,
                _ => return Err(ParseFlagsError(name.to_owned())),
            };
        }
        Ok(flags)
    }
}
