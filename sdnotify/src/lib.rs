//! sdnotify - service supervisor notifications over NOTIFY_SOCKET
//!
//! Lets a process tell its supervisor (systemd with `Type=notify`, or anything
//! speaking the same protocol) that it is ready, what it is doing, and that it
//! is stopping. Notifications are `KEY=VALUE` lines sent as datagrams to the
//! socket named by `NOTIFY_SOCKET`.
//!
//! # Modules
//!
//! - [`notifier`] - the [`Notifier`] handle
//! - [`status`] - well-known notification lines
//! - [`config`] - socket resolution from the environment or a config file
//! - [`address`] - filesystem and abstract-namespace socket addresses
//! - [`cli`] - command-line interface of the `sdnotifytest` binary
//!
//! # Example
//!
//! ```no_run
//! use sdnotify::{Notifier, status, statusf};
//!
//! # fn main() -> sdnotify::Result<()> {
//! // Inert when not running under a supervisor
//! let notifier = Notifier::new_or_inert()?;
//!
//! notifier.notify(&[statusf!("started in {}ms", 42), status::READY.to_string()])?;
//! // ... serve ...
//! notifier.notify(&[status::status("shutting down"), status::STOPPING.to_string()])?;
//! notifier.close()
//! # }
//! ```

pub mod address;
pub mod cli;
pub mod config;
mod error;
pub mod notifier;
pub mod status;

pub use address::NotifyAddress;
pub use config::Config;
pub use error::{NotifyError, Result};
pub use notifier::Notifier;
pub use status::{READY, RELOADING, STOPPING, WATCHDOG, status};

/// Environment variable naming the supervisor's notification socket
pub const SOCKET: &str = "NOTIFY_SOCKET";
