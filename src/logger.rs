use std::sync::atomic::{AtomicBool, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

/// Configure console logging from the command-line flags
///
/// # Arguments
/// * `quiet` - Suppress everything except errors
/// * `verbose` - Also print detailed progress; ignored when `quiet` is set
pub fn init(quiet: bool, verbose: bool) {
    set_quiet_mode(quiet);
    set_verbose_mode(verbose && !quiet);
}

pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose_mode(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

/// Run status line on stdout, hidden in quiet mode.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() && !$crate::logger::is_quiet() {
            println!("{} {}", $crate::constants::VERBOSE_PREFIX, format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            eprintln!("{}  {}", $crate::constants::WARNING_PREFIX, format!($($arg)*));
        }
    };
}

/// Always printed, to stderr.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("{} {}", $crate::constants::ERROR_PREFIX, format!($($arg)*));
    };
}
