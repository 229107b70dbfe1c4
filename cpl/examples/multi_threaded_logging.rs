use cpl::{Flags, Level, cpl_log, global, hub_config};

fn main() {
    let log_path = std::env::temp_dir().join("cpl_multi_threaded.log");
    let _guard = hub_config()
        .with_level(Level::Verbose)
        .with_flags(Flags::BASH)
        .with_log_file(&log_path)
        .unwrap()
        .init_global();
    cpl_log!(Info, "Hello, world!");

    let handles: Vec<_> = (0..5)
        .map(|i| {
            std::thread::spawn(move || {
                cpl_log!(Warning, "Hello, world from thread {i}!");
                log::debug!("thread {i} done");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let id = global().add_raw_writer(Level::Error, |level: Level, message: &str| {
        eprintln!("raw {level}: {message}");
    });
    cpl_log!(Error, "reaches every writer");
    global().remove_writer(id);

    cpl_log!(
        Info,
        "last line of {} is:\n\t{}",
        log_path.display(),
        std::fs::read_to_string(&log_path)
            .unwrap()
            .lines()
            .last()
            .unwrap_or_default()
    );
}
