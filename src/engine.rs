//! High-level orchestrator: validate → resolve → probe loop → output.

use crate::{
    cli::Args,
    error::{PingError, Result},
    formatter::{Formatter, Normal},
    probe::{probe_once, tls_connector},
    session::{ProbeSession, ResolvedSession, Settings, Transport},
    stats::{Stats, Summary},
    stratum::Request,
};
use anyhow::Context;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    time::{sleep, Instant},
};
use tracing::{debug, info, warn};

/// Transports run for every line of a batch file, in order.
/// The `--tls` flag does not apply in batch mode.
pub const BATCH_PLAN: [Transport; 2] = [Transport::Tcp, Transport::Tls];

pub fn run(args: Args) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run_async(args))
}

async fn run_async(args: Args) -> Result<()> {
    let settings = args.settings();
    let fmt = Normal;

    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .await
                .with_context(|| format!("cannot open input file {}", path.display()))?;
            run_batch(BufReader::new(file), &settings, &fmt).await;
        }
        None => {
            let target = args.target.as_deref().unwrap_or_default();
            if let Err(err) = ping(target, &settings, Transport::from(args.tls), &fmt).await {
                fmt.error(&err);
            }
        }
    }
    Ok(())
}

/// Probe every target line of `input` with each transport of [BATCH_PLAN].
///
/// Lines are trimmed; blank ones are not skipped. The text after the last
/// line terminator is a target too, so a newline-terminated (or empty) input
/// ends with an empty target. The first validation or read error is reported
/// and stops the batch. Returns the number of sessions that reached the
/// probe loop.
pub async fn run_batch<R>(mut input: R, settings: &Settings, fmt: &dyn Formatter) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let mut completed = 0;

    loop {
        line.clear();
        let at_eof = match input.read_line(&mut line).await {
            Ok(_) => !line.ends_with('\n'),
            Err(err) => {
                fmt.error(&PingError::ReadInput(err));
                break;
            }
        };
        let target = line.trim();

        for transport in BATCH_PLAN {
            match ping(target, settings, transport, fmt).await {
                Ok(Some(_)) => completed += 1,
                Ok(None) => {}
                Err(err) => {
                    warn!(%target, "stopping batch: {err}");
                    fmt.error(&err);
                    return completed;
                }
            }
        }

        if at_eof {
            break;
        }
    }
    completed
}

/// Run one session against `target`.
///
/// Validation errors are returned. Resolution and TLS setup errors are
/// reported through `fmt` and end the session with `Ok(None)`.
pub async fn ping(
    target: &str,
    settings: &Settings,
    transport: Transport,
    fmt: &dyn Formatter,
) -> Result<Option<Summary>> {
    let session = ProbeSession::new(target, settings, transport)?;

    let resolved = match session.resolve().await {
        Ok(resolved) => resolved,
        Err(err) => {
            fmt.error(&PingError::from(err));
            return Ok(None);
        }
    };

    match probe_session(&resolved, fmt).await {
        Ok(summary) => Ok(Some(summary)),
        Err(err) => {
            fmt.error(&err);
            Ok(None)
        }
    }
}

/// Run the attempt loop of a resolved session.
///
/// Every attempt is followed by the pacing delay, the last one included.
pub async fn probe_session(target: &ResolvedSession, fmt: &dyn Formatter) -> Result<Summary> {
    let session = target.session();
    let connector = match session.transport() {
        Transport::Tls => Some(tls_connector()?),
        Transport::Tcp => None,
    };
    let request = Request::new(session.protocol(), session.credentials());
    let addr = target.socket_addr();
    let timings = session.timings();

    info!(
        %addr,
        protocol = %session.protocol(),
        transport = ?session.transport(),
        count = session.count(),
        "probing"
    );
    fmt.banner(target);

    let mut stats = Stats::new(session.host(), target.ip());
    let start = Instant::now();

    for _ in 0..session.count() {
        let outcome = probe_once(addr, connector.as_ref(), &request, timings).await;
        if let Err(err) = &outcome {
            debug!(%addr, "attempt failed: {err}");
        }
        fmt.probe(&stats.feed(outcome));
        sleep(timings.interval).await;
    }

    let summary = stats.summary(start.elapsed());
    fmt.summary(&summary);
    Ok(summary)
}
