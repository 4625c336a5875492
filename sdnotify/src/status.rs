//! Well-known notification lines
//!
//! Each helper yields a single `KEY=VALUE` line suitable for one entry of a
//! [`Notifier::notify`](crate::Notifier::notify) batch.

use std::fmt::Display;

/// Service startup is finished
pub const READY: &str = "READY=1";

/// Service is beginning its shutdown
pub const STOPPING: &str = "STOPPING=1";

/// Service is reloading its configuration
pub const RELOADING: &str = "RELOADING=1";

/// Watchdog keep-alive ping
pub const WATCHDOG: &str = "WATCHDOG=1";

/// Build a `STATUS=` line
///
/// Embedded newlines are replaced with spaces; a newline would split the line
/// into two assignments on the receiving side.
pub fn status(text: impl Display) -> String {
    let text = text.to_string();
    let mut line = String::with_capacity("STATUS=".len() + text.len());
    line.push_str("STATUS=");
    line.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
    line
}

/// Build a `STATUS=` line from `format!`-style arguments
///
/// ```
/// let line = sdnotify::statusf!("waiting {}", 0);
/// assert_eq!(line, "STATUS=waiting 0");
/// ```
#[macro_export]
macro_rules! statusf {
    ($($arg:tt)*) => {
        $crate::status::status(::std::format_args!($($arg)*))
    };
}
