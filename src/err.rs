use std::fmt::{self, Debug, Display};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct DisplayError(Error);

impl Debug for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Into<Error>> From<T> for DisplayError {
    fn from(display: T) -> Self {
        DisplayError(display.into())
    }
}

/// Conditions that abort a hosting attempt before any request is served.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("file does not exist: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("folder does not exist: {}", .0.display())]
    FolderMissing(PathBuf),

    #[error("no local IPv4 address found")]
    NoLocalAddr,

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
}

pub trait IoErrorExt {
    fn applies_to(&self) -> AppliesTo;
}

impl IoErrorExt for io::Error {
    fn applies_to(&self) -> AppliesTo {
        match self.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => AppliesTo::Connection,
            _ => AppliesTo::Listener,
        }
    }
}

pub enum AppliesTo {
    Connection,
    Listener,
}
