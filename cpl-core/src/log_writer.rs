use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::Level;

/// A destination that receives fully formatted lines.
///
/// Lines handed to [`regular`](LogWriter::regular) already end with `\n`.
/// Closures taking `&str` implement this trait.
pub trait LogWriter: Send {
    fn regular(&mut self, line: &str);
    fn flush(&mut self) {}
}

impl<F: FnMut(&str) + Send> LogWriter for F {
    fn regular(&mut self, line: &str) {
        self(line)
    }
}

/// A destination that receives the level and the unformatted message.
///
/// Closures taking `(Level, &str)` implement this trait.
pub trait RawLogWriter: Send {
    fn raw(&mut self, level: Level, message: &str);
}

impl<F: FnMut(Level, &str) + Send> RawLogWriter for F {
    fn raw(&mut self, level: Level, message: &str) {
        self(level, message)
    }
}

/// Appends lines to a file, flushing after each one.
pub struct LogFile {
    file: BufWriter<File>,
    path: PathBuf,
}

impl LogFile {
    /// Opens `path` for appending, creating the file if needed.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self {
            file: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for LogFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFile").field("path", &self.path).finish()
    }
}

impl LogWriter for LogFile {
    fn regular(&mut self, line: &str) {
        self.file.write_all(line.as_bytes()).ok();
        self.flush();
    }

    fn flush(&mut self) {
        self.file.flush().ok();
    }
}

#[test]
fn test_log_file_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_log_file.log");
    std::fs::write(&path, "existing\n").unwrap();
    let mut log_file = LogFile::new(&path).unwrap();
    log_file.regular("Hello, world!\n");
    // flushed without an explicit flush or drop
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "existing\nHello, world!\n"
    );
    log_file.regular("rust is awesome !\n");
    drop(log_file);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "existing\nHello, world!\nrust is awesome !\n"
    );
}

#[test]
fn test_log_file_unopenable_path() {
    let dir = tempfile::tempdir().unwrap();
    assert!(LogFile::new(dir.path().join("missing").join("app.log")).is_err());
}

/// Writes lines to the standard output, flushing after each one.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn regular(&mut self, line: &str) {
        print!("{line}");
        self.flush();
    }

    fn flush(&mut self) {
        std::io::stdout().flush().ok();
    }
}

#[test]
fn test_log_stdout() {
    let mut log_stdout = LogStdout;
    log_stdout.regular("Hello, world!\n");
    log_stdout.flush();
}

#[test]
fn test_closures_are_writers() {
    let mut lines = Vec::new();
    {
        let mut writer = |line: &str| lines.push(line.to_owned());
        writer.regular("a\n");
        writer.regular("b\n");
    }
    assert_eq!(lines, ["a\n", "b\n"]);

    let mut seen = Vec::new();
    {
        let mut writer = |level: Level, message: &str| seen.push((level, message.to_owned()));
        writer.raw(Level::Info, "c");
    }
    assert_eq!(seen, [(Level::Info, "c".to_owned())]);
}
