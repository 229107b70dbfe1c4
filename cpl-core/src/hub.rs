use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Write as _},
    path::Path,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU8, Ordering},
    },
    thread::{self, ThreadId},
};

use crate::{
    Flags, Level,
    config::CPL_LOG_CONFIG,
    log_writer::{LogFile, LogStdout, LogWriter, RawLogWriter},
};

/// Handle of a writer registered on a [`LogHub`].
///
/// Ids are assigned in increasing order and never reused by the same hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WriterId(u64);

impl WriterId {
    /// Returned when a writer could not be registered.
    pub const INVALID: WriterId = WriterId(0);

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for WriterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum WriterKind {
    Formatted(Box<dyn LogWriter>),
    Raw(Box<dyn RawLogWriter>),
}

struct Writer {
    level: Level,
    kind: WriterKind,
}

struct HubState {
    writers: BTreeMap<WriterId, Writer>,
    last_id: u64,
    /// Cleared by the first formatted writer and never set again.
    raw_only: bool,
    pretty_thread_names: HashMap<ThreadId, String>,
}

impl HubState {
    fn thread_tag(&mut self, flags: Flags) -> String {
        let id = thread::current().id();
        if flags.contains(Flags::PRETTY_THREAD_ID) {
            let next = self.pretty_thread_names.len();
            self.pretty_thread_names
                .entry(id)
                .or_insert_with(|| format!("{next:03}"))
                .clone()
        } else {
            format!("{id:?}")
        }
    }

    fn format_log(&mut self, level: Level, message: &str, flags: Flags) -> String {
        let mut line = String::with_capacity(message.len() + 24);
        let mut prefixed = false;
        if flags.contains(Flags::WRITE_THREAD_ID) {
            let tag = self.thread_tag(flags);
            line.push('[');
            line.push_str(&tag);
            line.push(']');
            prefixed = true;
        }
        if flags.contains(Flags::WRITE_PREFIX) {
            if prefixed {
                line.push(' ');
            }
            if flags.contains(Flags::COLORIZED_PREFIX) {
                // styled regardless of whether stdout is a terminal
                write!(
                    line,
                    "\x1b[{}m{}\x1b[0m",
                    level.color().to_fg_str(),
                    level.as_str()
                )
                .ok();
            } else {
                line.push_str(level.as_str());
            }
            prefixed = true;
        }
        if prefixed {
            line.push_str(": ");
        }
        line.push_str(message);
        line.push('\n');
        line
    }
}

/// Thread-safe registry that fans log messages out to registered writers.
///
/// Every writer has a maximum level; a message is delivered to the writers
/// whose level is at least the message's level. Writers either receive a
/// formatted line ([`LogWriter`]) or the raw level and message
/// ([`RawLogWriter`]).
///
/// Two non-obvious behaviors:
/// - [`level_max`](LogHub::level_max) is a high-water mark. Removing a writer
///   does not lower it, so [`enable`](LogHub::enable) may keep answering `true`
///   after the only interested writer is gone.
/// - Once a formatted writer has been registered, every [`write`](LogHub::write)
///   formats the line, even after that writer is removed.
///
/// Writers run on the calling thread while the hub's lock is held, in
/// increasing id order. A slow writer therefore stalls every other caller.
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use cpl_core::{Flags, Level, LogHub};
///
/// let hub = LogHub::with_flags(Flags::WRITE_PREFIX);
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&lines);
/// hub.add_writer(Level::Warning, move |line: &str| sink.lock().unwrap().push(line.to_owned()));
///
/// hub.write(Level::Error, "disk full");
/// hub.write(Level::Debug, "trace");
/// assert_eq!(*lines.lock().unwrap(), ["Error: disk full\n"]);
/// ```
pub struct LogHub {
    state: Mutex<HubState>,
    level_max: AtomicU8,
    flags: AtomicU8,
}

impl Default for LogHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHub")
            .field("level_max", &self.level_max())
            .field("flags", &self.flags())
            .field("writers", &self.writer_count())
            .finish()
    }
}

impl LogHub {
    /// Creates an empty hub with [`Flags::DEFAULT`].
    pub fn new() -> Self {
        Self::with_flags(Flags::DEFAULT)
    }

    pub fn with_flags(flags: Flags) -> Self {
        Self {
            state: Mutex::new(HubState {
                writers: BTreeMap::new(),
                last_id: 0,
                raw_only: true,
                pretty_thread_names: HashMap::new(),
            }),
            level_max: AtomicU8::new(Level::None as u8),
            flags: AtomicU8::new(flags.bits()),
        }
    }

    /// Creates an empty hub with the flags from `CPL_LOG_FLAGS`.
    pub fn from_env() -> Self {
        Self::with_flags(CPL_LOG_CONFIG.FLAGS)
    }

    // A panicking writer poisons the mutex; the state itself stays consistent.
    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, level: Level, kind: WriterKind) -> WriterId {
        let mut state = self.lock();
        state.last_id += 1;
        let id = WriterId(state.last_id);
        if matches!(kind, WriterKind::Formatted(_)) {
            state.raw_only = false;
        }
        state.writers.insert(id, Writer { level, kind });
        self.level_max.fetch_max(level as u8, Ordering::AcqRel);
        id
    }

    /// Registers a writer receiving formatted lines.
    pub fn add_writer<W: LogWriter + 'static>(&self, level: Level, writer: W) -> WriterId {
        self.register(level, WriterKind::Formatted(Box::new(writer)))
    }

    /// Registers a writer receiving the level and the unformatted message.
    pub fn add_raw_writer<W: RawLogWriter + 'static>(&self, level: Level, writer: W) -> WriterId {
        self.register(level, WriterKind::Raw(Box::new(writer)))
    }

    /// Registers a writer printing formatted lines to stdout.
    pub fn add_std_writer(&self, level: Level) -> WriterId {
        self.add_writer(level, LogStdout)
    }

    /// Opens `path` for appending and registers a writer on it.
    ///
    /// The hub owns the file until the writer is removed.
    pub fn try_add_file_writer<P: AsRef<Path>>(
        &self,
        level: Level,
        path: P,
    ) -> Result<WriterId, std::io::Error> {
        let file = LogFile::new(path)?;
        Ok(self.add_writer(level, file))
    }

    /// Like [`try_add_file_writer`](LogHub::try_add_file_writer), but returns
    /// [`WriterId::INVALID`] and registers nothing when the file cannot be opened.
    pub fn add_file_writer<P: AsRef<Path>>(&self, level: Level, path: P) -> WriterId {
        self.try_add_file_writer(level, path)
            .unwrap_or(WriterId::INVALID)
    }

    /// Unregisters a writer, dropping it. Returns whether it was registered.
    pub fn remove_writer(&self, id: WriterId) -> bool {
        self.lock().writers.remove(&id).is_some()
    }

    pub fn set_flags(&self, flags: Flags) {
        self.flags.store(flags.bits(), Ordering::Release);
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    /// Highest level any writer was ever registered with.
    pub fn level_max(&self) -> Level {
        Level::from_u8(self.level_max.load(Ordering::Acquire))
    }

    /// Whether a message at `level` could reach a writer.
    ///
    /// Call sites use this to skip building messages nobody would receive.
    #[inline]
    pub fn enable(&self, level: Level) -> bool {
        level != Level::None && self.level_max() >= level
    }

    /// Whether [`write`](LogHub::write) renders lines.
    pub fn formats_lines(&self) -> bool {
        !self.lock().raw_only
    }

    pub fn writer_count(&self) -> usize {
        self.lock().writers.len()
    }

    /// Delivers `message` to every writer accepting `level`.
    ///
    /// A panic raised by a writer propagates to the caller and skips the
    /// remaining writers.
    pub fn write(&self, level: Level, message: &str) {
        if !self.enable(level) {
            return;
        }
        let flags = self.flags();
        let mut state = self.lock();
        let line = (!state.raw_only).then(|| state.format_log(level, message, flags));
        for writer in state.writers.values_mut() {
            if level > writer.level {
                continue;
            }
            match &mut writer.kind {
                WriterKind::Formatted(w) => {
                    debug_assert!(line.is_some(), "formatted writer registered while raw-only");
                    if let Some(line) = &line {
                        w.regular(line);
                    }
                }
                WriterKind::Raw(w) => w.raw(level, message),
            }
        }
    }

    /// Flushes every formatted writer.
    pub fn flush(&self) {
        for writer in self.lock().writers.values_mut() {
            if let WriterKind::Formatted(w) = &mut writer.kind {
                w.flush();
            }
        }
    }
}
