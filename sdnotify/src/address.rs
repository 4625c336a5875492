//! Notification socket addresses
//!
//! The supervisor hands out either a filesystem path or, on Linux, an
//! abstract-namespace name written with a leading `@`.

use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::net::UnixDatagram;
use std::path::PathBuf;

use log::debug;

/// Where notifications are delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyAddress {
    /// Socket file on disk
    Path(PathBuf),
    /// Linux abstract-namespace socket, name stored without the `@`
    Abstract(Vec<u8>),
}

impl NotifyAddress {
    /// Parse a configured address, `None` if it is empty
    ///
    /// The value is taken as raw bytes; it need not be valid UTF-8.
    pub fn parse(value: impl AsRef<OsStr>) -> Option<Self> {
        let value = value.as_ref();
        match value.as_bytes() {
            [] => None,
            [b'@', name @ ..] => Some(NotifyAddress::Abstract(name.to_vec())),
            _ => Some(NotifyAddress::Path(PathBuf::from(value))),
        }
    }

    /// Open an unbound datagram socket connected to this address
    pub(crate) fn connect(&self) -> io::Result<UnixDatagram> {
        let socket = UnixDatagram::unbound()?;
        match self {
            NotifyAddress::Path(path) => socket.connect(path)?,
            NotifyAddress::Abstract(name) => connect_abstract(&socket, name)?,
        }
        debug!("NotifyAddress::connect: connected to {}", self);
        Ok(socket)
    }
}

#[cfg(target_os = "linux")]
fn connect_abstract(socket: &UnixDatagram, name: &[u8]) -> io::Result<()> {
    use std::os::linux::net::SocketAddrExt;
    use std::os::unix::net::SocketAddr;

    let addr = SocketAddr::from_abstract_name(name)?;
    socket.connect_addr(&addr)
}

#[cfg(not(target_os = "linux"))]
fn connect_abstract(_socket: &UnixDatagram, _name: &[u8]) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "abstract socket addresses are only supported on Linux",
    ))
}

impl fmt::Display for NotifyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyAddress::Path(path) => write!(f, "{}", path.display()),
            NotifyAddress::Abstract(name) => write!(f, "@{}", String::from_utf8_lossy(name)),
        }
    }
}
