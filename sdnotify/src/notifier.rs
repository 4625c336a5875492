//! Notifier - sends status batches to the supervisor
//!
//! A Notifier is either active, holding a datagram socket connected to the
//! supervisor, or inert. Inert notifiers accept every call and do nothing, so
//! code running outside a supervisor can notify unconditionally.

use std::ffi::OsStr;
use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::Path;

use log::debug;

use crate::address::NotifyAddress;
use crate::config::Config;
use crate::error::{NotifyError, Result};
use crate::status;

#[derive(Debug, Default)]
enum Connection {
    Active {
        socket: UnixDatagram,
        address: NotifyAddress,
    },
    #[default]
    Inert,
}

/// Handle for sending notifications to a service supervisor
///
/// `Notifier::default()` is inert: `notify` and `close` on it always succeed.
/// Dropping an active Notifier releases its socket; use [`Notifier::close`]
/// to observe errors from the release.
#[derive(Debug, Default)]
pub struct Notifier {
    connection: Connection,
}

impl Notifier {
    /// Open the socket named by `NOTIFY_SOCKET`
    ///
    /// Fails with [`NotifyError::NotConfigured`] when the variable is unset or
    /// empty, and with [`NotifyError::OpenFailed`] when the socket cannot be
    /// reached. Either way the caller can fall back to [`Notifier::inert`].
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::from_env())
    }

    /// Like [`Notifier::new`], but a missing `NOTIFY_SOCKET` yields an inert Notifier
    pub fn new_or_inert() -> Result<Self> {
        match Self::new() {
            Err(e) if e.is_not_configured() => Ok(Self::inert()),
            other => other,
        }
    }

    /// Open the socket named by an already resolved config
    pub fn from_config(config: &Config) -> Result<Self> {
        let address = config.address()?;
        Self::connect(address)
    }

    /// Open an explicit socket address, bypassing the environment
    pub fn open(address: impl AsRef<OsStr>) -> Result<Self> {
        Self::from_config(&Config::with_socket(Path::new(address.as_ref())))
    }

    /// A Notifier with no socket
    pub fn inert() -> Self {
        Self::default()
    }

    fn connect(address: NotifyAddress) -> Result<Self> {
        let socket = address.connect().map_err(|source| NotifyError::OpenFailed {
            address: address.to_string(),
            source,
        })?;
        debug!("Notifier::connect: opened notification socket {}", address);

        Ok(Self {
            connection: Connection::Active { socket, address },
        })
    }

    /// Whether notifications are actually delivered
    pub fn is_active(&self) -> bool {
        matches!(self.connection, Connection::Active { .. })
    }

    /// The connected address, `None` when inert
    pub fn address(&self) -> Option<&NotifyAddress> {
        match &self.connection {
            Connection::Active { address, .. } => Some(address),
            Connection::Inert => None,
        }
    }

    /// Send a batch of lines as a single datagram
    ///
    /// Lines are joined with `\n` without a trailing newline. The supervisor
    /// applies one datagram as one batch of assignments, so separate calls
    /// produce separate batches. An empty batch sends nothing.
    pub fn notify<S: AsRef<str>>(&self, messages: &[S]) -> Result<()> {
        let Connection::Active { socket, .. } = &self.connection else {
            return Ok(());
        };
        if messages.is_empty() {
            return Ok(());
        }

        let batch = join_batch(messages);
        let sent = socket.send(batch.as_bytes()).map_err(NotifyError::SendFailed)?;
        if sent != batch.len() {
            return Err(NotifyError::SendFailed(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("incomplete datagram write: {} of {} bytes", sent, batch.len()),
            )));
        }

        debug!("Notifier::notify: sent {} lines ({} bytes)", messages.len(), sent);
        Ok(())
    }

    /// Send `READY=1`
    pub fn ready(&self) -> Result<()> {
        self.notify(&[status::READY])
    }

    /// Send `STOPPING=1`
    pub fn stopping(&self) -> Result<()> {
        self.notify(&[status::STOPPING])
    }

    /// Release the socket
    ///
    /// Reports an error still pending on the socket (`SO_ERROR`) as
    /// [`NotifyError::CloseFailed`]. A connected `AF_UNIX` datagram socket
    /// reports delivery failures from `send` itself and the kernel's own
    /// release cannot fail, so in practice this returns `Ok`; losing the
    /// supervisor does not make close fail. Always succeeds for an inert
    /// Notifier.
    pub fn close(self) -> Result<()> {
        let Connection::Active { socket, address } = self.connection else {
            return Ok(());
        };

        let pending = socket.take_error().map_err(NotifyError::CloseFailed)?;
        drop(socket);
        if let Some(e) = pending {
            return Err(NotifyError::CloseFailed(e));
        }

        debug!("Notifier::close: released notification socket {}", address);
        Ok(())
    }
}

fn join_batch<S: AsRef<str>>(messages: &[S]) -> String {
    let len = messages.iter().map(|m| m.as_ref().len() + 1).sum::<usize>();
    let mut batch = String::with_capacity(len);
    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            batch.push('\n');
        }
        batch.push_str(message.as_ref());
    }
    batch
}
