/// Writes a `format!`-style message to a hub.
///
/// The message is only formatted when some writer would receive it.
///
/// ```
/// use cpl::{Level, LogHub, cpl_log};
///
/// fn expensive() -> String {
///     panic!("never formatted")
/// }
///
/// let hub = LogHub::new();
/// hub.add_raw_writer(Level::Info, |level: Level, message: &str| {
///     assert_eq!((level, message), (Level::Warning, "3 retries left"));
/// });
/// cpl_log!(&hub => Warning, "{} retries left", 3);
/// cpl_log!(&hub => Debug, "{}", expensive());
///
/// // without a hub, the global one is used
/// cpl_log!(Info, "started");
/// ```
#[macro_export]
macro_rules! cpl_log {
    ($level:ident, $($arg:tt)+) => {
        $crate::cpl_log!($crate::global() => $level, $($arg)+)
    };
    ($hub:expr => $level:ident, $($arg:tt)+) => {{
        let hub: &$crate::LogHub = $hub;
        if hub.enable($crate::Level::$level) {
            hub.write($crate::Level::$level, &::std::format!($($arg)+));
        }
    }};
}

/// Like [`cpl_log!`], but only when `cond` holds.
///
/// ```
/// use cpl::{Level, LogHub, cpl_log_if};
///
/// let hub = LogHub::new();
/// hub.add_raw_writer(Level::Debug, |_: Level, message: &str| assert_eq!(message, "odd 3"));
/// for i in [2, 3] {
///     cpl_log_if!(i % 2 == 1, &hub => Info, "odd {i}");
/// }
/// ```
#[macro_export]
macro_rules! cpl_log_if {
    ($cond:expr, $($rest:tt)+) => {
        if $cond {
            $crate::cpl_log!($($rest)+)
        }
    };
}
