//! Runtime statistics and data structures.
//!
//! [Stats] accumulates per-attempt outcomes and emits a final [Summary].

use crate::error::AttemptError;
use std::{net::IpAddr, time::Duration};

/// Sentinel the running minimum starts from.
const MIN_SENTINEL: Duration = Duration::from_secs(3600);

/// Result of a single attempt.
#[derive(Debug)]
pub struct PingResult {
    pub host: String,
    pub ip: IpAddr,
    /// 0-based sequence number.
    pub seq: u32,
    pub outcome: Result<Duration, AttemptError>,
}

/// Min/avg/max over successful attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rtt {
    pub min: Duration,
    pub avg: Duration,
    pub max: Duration,
}

/// Roll-up of an entire session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub host: String,
    pub transmitted: u32,
    pub received: u32,
    pub loss_percent: i64,
    /// `None` when nothing was received.
    pub rtt: Option<Rtt>,
    /// Wall clock from the first attempt to the summary.
    pub elapsed: Duration,
}

/// Mutable accumulator used during a session.
pub struct Stats {
    host: String,
    ip: IpAddr,
    sent: u32,
    ok: u32,
    total_rtt: Duration,
    min_rtt: Duration,
    max_rtt: Duration,
}

impl Stats {
    pub fn new(host: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            host: host.into(),
            ip,
            sent: 0,
            ok: 0,
            total_rtt: Duration::ZERO,
            min_rtt: MIN_SENTINEL,
            max_rtt: Duration::ZERO,
        }
    }

    /// Feed one attempt outcome and obtain a [PingResult] to hand to the formatter.
    pub fn feed(&mut self, outcome: Result<Duration, AttemptError>) -> PingResult {
        let seq = self.sent;
        self.sent += 1;

        if let Ok(&rtt) = outcome.as_ref() {
            self.ok += 1;
            self.total_rtt += rtt;
            self.min_rtt = self.min_rtt.min(rtt);
            self.max_rtt = self.max_rtt.max(rtt);
        }

        PingResult {
            host: self.host.clone(),
            ip: self.ip,
            seq,
            outcome,
        }
    }

    /// Produce the final [Summary].
    pub fn summary(&self, elapsed: Duration) -> Summary {
        let rtt = (self.ok > 0).then(|| Rtt {
            min: self.min_rtt,
            avg: self.total_rtt / self.ok,
            max: self.max_rtt,
        });

        Summary {
            host: self.host.clone(),
            transmitted: self.sent,
            received: self.ok,
            loss_percent: loss_percent(self.ok, self.sent),
            rtt,
            elapsed,
        }
    }
}

/// `100 - trunc(received / transmitted * 100)`.
///
/// The truncation applies to the percentage, not the ratio, so float error
/// shows through: 29 of 100 received is 72% loss.
pub fn loss_percent(received: u32, transmitted: u32) -> i64 {
    if transmitted == 0 {
        return 0;
    }
    100 - (f64::from(received) / f64::from(transmitted) * 100.0) as i64
}
