//! Error types, one enum per failure stage.

use crate::session::AddressFamily;
use std::time::Duration;
use thiserror::Error;

/// Target validation failures. Each aborts the session before any I/O.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    #[error("Stratum server cannot be empty")]
    EmptyTarget,

    #[error("Invalid host/port specified")]
    MalformedTarget,

    #[error("Invalid count specified")]
    InvalidCount,

    #[error("Invalid port specified")]
    InvalidPort,

    #[error("Invalid stratum type specified")]
    InvalidProtocol,
}

/// Host name resolution failures.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to resolve host name: {0}")]
    Lookup(#[source] std::io::Error),

    #[error("Failed to resolve host name: no suitable {family} address found for {host}")]
    NoSuitableAddress { host: String, family: AddressFamily },
}

/// Failure of a single attempt. Reported on the attempt's line; the loop goes on.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("connect: {0}")]
    Connect(#[source] std::io::Error),

    #[error("connect: timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("tls: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("write: {0}")]
    Write(#[source] std::io::Error),

    #[error("write: i/o timeout after {0:?}")]
    WriteTimeout(Duration),

    #[error("read: {0}")]
    Read(#[source] std::io::Error),

    #[error("read: i/o timeout after {0:?}")]
    ReadTimeout(Duration),

    #[error("read: EOF")]
    Closed,
}

#[derive(Error, Debug)]
pub enum PingError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("TLS setup failed: {0}")]
    TlsSetup(#[from] native_tls::Error),

    #[error("Read file error! {0}")]
    ReadInput(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Handy alias.
pub type Result<T> = std::result::Result<T, PingError>;
