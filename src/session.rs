//! Probe session: validated input, then a resolve step.
//!
//! [`ProbeSession::new`] is pure validation. [`ProbeSession::resolve`]
//! consumes the session and yields a [`ResolvedSession`], the only type
//! that carries an IP address, so the address is set exactly once.

use crate::{
    error::{ResolveError, TargetError},
    resolver,
};
use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    str::FromStr,
    time::Duration,
};

/// Upper bound for `-c`.
pub const MAX_COUNT: i64 = 20_000;

/// Stratum dialect spoken during the handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// `stratum1`: Ethereum-style `eth_submitLogin` with credentials.
    Legacy,
    /// `stratum2`: `mining.subscribe`.
    Modern,
}

impl FromStr for Protocol {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stratum1" => Ok(Self::Legacy),
            "stratum2" => Ok(Self::Modern),
            _ => Err(TargetError::InvalidProtocol),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Legacy => "stratum1",
            Self::Modern => "stratum2",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressFamily {
    #[default]
    V4,
    V6,
}

impl AddressFamily {
    pub fn matches(self, ip: &IpAddr) -> bool {
        match self {
            Self::V4 => ip.is_ipv4(),
            Self::V6 => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V4 => "IPv4",
            Self::V6 => "IPv6",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Tcp,
    /// TLS over TCP, certificate verification disabled.
    Tls,
}

impl From<bool> for Transport {
    fn from(tls: bool) -> Self {
        if tls { Self::Tls } else { Self::Tcp }
    }
}

/// Login and password, sent only by [`Protocol::Legacy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Deadlines and pacing for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub connect: Duration,
    pub write: Duration,
    pub read: Duration,
    /// Delay after every attempt, the last one included.
    pub interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            write: Duration::from_secs(10),
            read: Duration::from_secs(10),
            interval: Duration::from_secs(1),
        }
    }
}

/// Everything a session needs apart from the target and the transport.
///
/// `count` and `protocol` are kept raw so that validation reports them.
#[derive(Clone, Debug)]
pub struct Settings {
    pub credentials: Credentials,
    pub count: i64,
    pub family: AddressFamily,
    pub protocol: String,
    pub timings: Timings,
}

#[derive(Clone, Debug)]
pub struct ProbeSession {
    credentials: Credentials,
    count: u32,
    family: AddressFamily,
    host: String,
    port: u16,
    protocol: Protocol,
    transport: Transport,
    timings: Timings,
}

impl ProbeSession {
    /// Validate `target` (`host:port`) together with `settings`.
    ///
    /// Checks run in a fixed order and stop at the first failure: empty
    /// target, host/port split, count, port, protocol.
    pub fn new(
        target: &str,
        settings: &Settings,
        transport: Transport,
    ) -> Result<Self, TargetError> {
        if target.is_empty() {
            return Err(TargetError::EmptyTarget);
        }

        // single-colon split; bracketed IPv6 literals are rejected here
        let parts: Vec<&str> = target.split(':').collect();
        let [host, port] = parts.as_slice() else {
            return Err(TargetError::MalformedTarget);
        };

        if settings.count <= 0 || settings.count > MAX_COUNT {
            return Err(TargetError::InvalidCount);
        }

        let port = port
            .parse::<i64>()
            .ok()
            .and_then(|p| u16::try_from(p).ok())
            .filter(|p| *p != 0)
            .ok_or(TargetError::InvalidPort)?;

        let protocol = settings.protocol.parse::<Protocol>()?;

        Ok(Self {
            credentials: settings.credentials.clone(),
            count: settings.count as u32,
            family: settings.family,
            host: (*host).to_owned(),
            port,
            protocol,
            transport,
            timings: settings.timings,
        })
    }

    /// Resolve the host within the session's address family.
    pub async fn resolve(self) -> Result<ResolvedSession, ResolveError> {
        let ip = resolver::resolve(&self.host, self.family).await?;
        Ok(ResolvedSession { session: self, ip })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }
}

/// A session whose host has been resolved to one address.
#[derive(Clone, Debug)]
pub struct ResolvedSession {
    session: ProbeSession,
    ip: IpAddr,
}

impl ResolvedSession {
    pub fn session(&self) -> &ProbeSession {
        &self.session
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.session.port)
    }
}
