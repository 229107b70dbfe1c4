use std::sync::{Arc, Mutex};

use cpl::{Flags, Level, cpl_log, cpl_log_if, global, hub_config};
use serial_test::serial;

fn capture_global(level: Level) -> (cpl::WriterId, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let id = global().add_writer(level, move |line: &str| {
        sink.lock().unwrap().push(line.to_owned())
    });
    (id, lines)
}

#[test]
#[serial]
fn test_global_is_a_single_instance() {
    assert!(std::ptr::eq(global(), global()));
    let other = std::thread::spawn(|| global() as *const _ as usize)
        .join()
        .unwrap();
    assert_eq!(other, global() as *const _ as usize);
}

#[test]
#[serial]
fn test_macros_write_to_global() {
    global().set_flags(Flags::WRITE_PREFIX);
    let (id, lines) = capture_global(Level::Info);
    cpl_log!(Warning, "{} files left", 2);
    cpl_log!(Debug, "too verbose");
    cpl_log_if!(false, Error, "skipped");
    cpl_log_if!(true, Error, "kept");
    assert!(global().remove_writer(id));
    assert_eq!(
        *lines.lock().unwrap(),
        ["Warning: 2 files left\n", "Error: kept\n"]
    );
}

#[test]
#[serial]
fn test_config_builder_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("global.log");
    let guard = hub_config()
        .with_log_file(&path)
        .unwrap()
        .no_stdout()
        .with_level(Level::Warning)
        .with_flags(Flags::WRITE_PREFIX)
        .init_global();
    assert_eq!(guard.writers().len(), 1);
    assert_eq!(global().flags(), Flags::WRITE_PREFIX);

    log::error!("from the log crate");
    log::info!("filtered by the file writer");
    cpl_log!(Warning, "from the macro");
    drop(guard);
    cpl_log!(Error, "after the guard");

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Error: from the log crate\nWarning: from the macro\n"
    );
}

#[test]
#[serial]
fn test_log_bridge_level_mapping() {
    let _guard = hub_config().no_stdout().init_global();
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let id = global().add_raw_writer(Level::Debug, move |level: Level, message: &str| {
        sink.lock().unwrap().push((level, message.to_owned()))
    });
    log::debug!("debug");
    log::trace!("trace");
    assert!(global().remove_writer(id));
    assert_eq!(
        *lines.lock().unwrap(),
        [
            (Level::Verbose, "debug".to_owned()),
            (Level::Debug, "trace".to_owned())
        ]
    );
}

#[test]
#[serial]
fn test_unopenable_log_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing").join("app.log");
    assert!(hub_config().with_log_file(&missing).is_err());
    assert!(
        hub_config()
            .maybe_with_log_file(None::<&std::path::Path>)
            .is_ok()
    );
    let before = global().level_max();
    assert!(!global().add_file_writer(Level::Debug, &missing).is_valid());
    assert_eq!(global().level_max(), before);
}
