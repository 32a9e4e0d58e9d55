//! Low-level connect-handshake-measure cycle.
//!
//! [`probe_once`] opens a fresh TCP (or TLS) connection, sends one stratum
//! request and waits for the first response line. The measured interval
//! starts right before the request is serialized and ends when the line is
//! available, so it covers encoding, the round trip and the server's reply.
//! The connection is dropped on every path.

use crate::{error::AttemptError, session::Timings, stratum::Request};
use std::net::SocketAddr;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpStream,
    time::{timeout, Duration, Instant},
};
use tokio_native_tls::TlsConnector;
use tracing::{debug, trace};

/// Read buffer size; a reply longer than this without a newline still counts.
const MAX_LINE: u64 = 1024;

/// TLS connector that accepts any certificate and host name.
pub fn tls_connector() -> Result<TlsConnector, native_tls::Error> {
    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()?;
    Ok(TlsConnector::from(connector))
}

/// Run one attempt against `addr` and return the handshake latency.
///
/// * `tls` – wrap the connection when present; the server name is the IP
///   literal, so no SNI is sent
/// * `timings` – connect (including the TLS handshake), write and read deadlines
pub async fn probe_once(
    addr: SocketAddr,
    tls: Option<&TlsConnector>,
    request: &Request<'_>,
    timings: &Timings,
) -> Result<Duration, AttemptError> {
    let stream = timeout(timings.connect, TcpStream::connect(addr))
        .await
        .map_err(|_| AttemptError::ConnectTimeout(timings.connect))?
        .map_err(AttemptError::Connect)?;
    debug!(%addr, "connected");

    match tls {
        None => exchange(stream, request, timings).await,
        Some(connector) => {
            let domain = addr.ip().to_string();
            let stream = timeout(timings.connect, connector.connect(&domain, stream))
                .await
                .map_err(|_| AttemptError::ConnectTimeout(timings.connect))??;
            debug!(%addr, "tls handshake done");
            exchange(stream, request, timings).await
        }
    }
}

/// Send `request` over an established stream and time the first reply line.
pub async fn exchange<S>(
    stream: S,
    request: &Request<'_>,
    timings: &Timings,
) -> Result<Duration, AttemptError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(stream);

    let start = Instant::now();
    let line = request.encode_line()?;
    let writer = reader.get_mut();
    timeout(timings.write, async {
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok::<_, std::io::Error>(())
    })
    .await
    .map_err(|_| AttemptError::WriteTimeout(timings.write))?
    .map_err(AttemptError::Write)?;

    let mut reply = Vec::with_capacity(MAX_LINE as usize);
    let mut limited = reader.take(MAX_LINE);
    let n = timeout(timings.read, limited.read_until(b'\n', &mut reply))
        .await
        .map_err(|_| AttemptError::ReadTimeout(timings.read))?
        .map_err(AttemptError::Read)?;
    let elapsed = start.elapsed();

    if n == 0 {
        return Err(AttemptError::Closed);
    }
    trace!(rx = %String::from_utf8_lossy(&reply).trim_end(), "reply");

    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, Protocol};
    use tokio::io::duplex;

    fn timings(read_ms: u64) -> Timings {
        Timings {
            connect: Duration::from_secs(1),
            write: Duration::from_secs(1),
            read: Duration::from_millis(read_ms),
            interval: Duration::ZERO,
        }
    }

    fn creds() -> Credentials {
        Credentials {
            login: "wallet".into(),
            password: "x".into(),
        }
    }

    #[tokio::test]
    async fn measures_until_first_line() {
        let (client, server) = duplex(4096);
        let pool = tokio::spawn(async move {
            let mut server = BufReader::new(server);
            let mut line = String::new();
            server.read_line(&mut line).await.unwrap();
            server
                .get_mut()
                .write_all(b"{\"id\":1,\"result\":true}\n")
                .await
                .unwrap();
            line
        });

        let creds = creds();
        let req = Request::new(Protocol::Legacy, &creds);
        let elapsed = exchange(client, &req, &timings(1_000)).await.unwrap();
        assert!(elapsed > Duration::ZERO);
        assert!(elapsed < Duration::from_secs(1));

        let sent = pool.await.unwrap();
        assert!(sent.ends_with('\n'));
        assert!(sent.contains("eth_submitLogin"));
    }

    #[tokio::test]
    async fn long_reply_without_newline_counts() {
        let (client, mut server) = duplex(8192);
        server.write_all(&[b'a'; 2048]).await.unwrap();

        let creds = creds();
        let req = Request::new(Protocol::Modern, &creds);
        assert!(exchange(client, &req, &timings(1_000)).await.is_ok());
        drop(server);
    }

    #[tokio::test]
    async fn silent_server_hits_read_deadline() {
        let (client, _server) = duplex(4096);
        let creds = creds();
        let req = Request::new(Protocol::Modern, &creds);

        let started = std::time::Instant::now();
        let err = exchange(client, &req, &timings(200)).await.unwrap_err();
        assert!(matches!(err, AttemptError::ReadTimeout(_)));
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn closed_connection_is_an_error() {
        let (client, server) = duplex(4096);
        let pool = tokio::spawn(async move {
            let mut server = BufReader::new(server);
            let mut line = String::new();
            server.read_line(&mut line).await.unwrap();
        });

        let creds = creds();
        let req = Request::new(Protocol::Modern, &creds);
        let err = exchange(client, &req, &timings(1_000)).await.unwrap_err();
        assert!(matches!(err, AttemptError::Closed));
        pool.await.unwrap();
    }

    #[test]
    fn builds_insecure_connector() {
        assert!(tls_connector().is_ok());
    }
}
