//! Output layer.
//!
//! Rendering is kept in pure `render_*` functions; [Normal] prints them.

use crate::{
    error::PingError,
    session::{Protocol, ResolvedSession, Transport},
    stats::{PingResult, Summary},
};
use std::time::Duration;

/// Print behaviour contract.
pub trait Formatter {
    /// Announce a session once its host is resolved.
    fn banner(&self, target: &ResolvedSession);
    fn probe(&self, res: &PingResult);
    fn summary(&self, sum: &Summary);
    /// Report an error that ended a session or a batch.
    fn error(&self, err: &PingError);
}

/* ---------- Normal text ---------- */

pub struct Normal;
impl Formatter for Normal {
    fn banner(&self, target: &ResolvedSession) {
        println!("{}", render_banner(target));
    }

    fn probe(&self, res: &PingResult) {
        println!("{}", render_probe(res));
    }

    fn summary(&self, s: &Summary) {
        print!("{}", render_summary(s));
    }

    fn error(&self, err: &PingError) {
        println!("{err}\n");
    }
}

/// `PING stratum <host> (<ip>)[ TLS] port <port>[ with credentials: <login>:<pass>]`
pub fn render_banner(target: &ResolvedSession) -> String {
    let s = target.session();
    let tls = match s.transport() {
        Transport::Tls => " TLS",
        Transport::Tcp => "",
    };
    let creds = match s.protocol() {
        Protocol::Legacy => format!(
            " with credentials: {}:{}",
            s.credentials().login,
            s.credentials().password
        ),
        Protocol::Modern => String::new(),
    };
    format!(
        "PING stratum {} ({}){tls} port {}{creds}",
        s.host(),
        target.ip(),
        s.port()
    )
}

pub fn render_probe(res: &PingResult) -> String {
    match &res.outcome {
        Ok(rtt) => format!(
            "{} ({}): seq={}, time={}",
            res.host,
            res.ip,
            res.seq,
            go_duration(*rtt)
        ),
        Err(err) => format!("{} ({}): seq={}, {err}", res.host, res.ip, res.seq),
    }
}

/// Statistics block, trailing blank lines included.
pub fn render_summary(s: &Summary) -> String {
    let mut out = format!("--- {} ping statistics ---\n", s.host);
    if let Some(rtt) = &s.rtt {
        out.push_str(&format!(
            "min/avg/max = {}, {}, {}\n",
            go_duration(rtt.min),
            go_duration(rtt.avg),
            go_duration(rtt.max)
        ));
    }
    out.push_str(&format!(
        "{} packets transmitted, {} received, {}% packet loss, time {}\n\n\n",
        s.transmitted,
        s.received,
        s.loss_percent,
        go_duration(s.elapsed)
    ));
    out
}

/// Duration in Go `time.Duration` notation: `0s`, `420ns`, `1.5µs`,
/// `12.345678ms`, `2.5s`, `1m0.5s`, `1h2m3s`.
pub fn go_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    match nanos {
        0 => "0s".to_owned(),
        1..1_000 => format!("{nanos}ns"),
        1_000..1_000_000 => format!("{}µs", decimal(nanos, 1_000)),
        1_000_000..1_000_000_000 => format!("{}ms", decimal(nanos, 1_000_000)),
        _ => {
            let secs = d.as_secs();
            let (h, m) = (secs / 3600, secs / 60 % 60);
            let s = decimal(
                u128::from(secs % 60) * 1_000_000_000 + u128::from(d.subsec_nanos()),
                1_000_000_000,
            );
            match (h, m) {
                (0, 0) => format!("{s}s"),
                (0, m) => format!("{m}m{s}s"),
                (h, m) => format!("{h}h{m}m{s}s"),
            }
        }
    }
}

/// `value / unit` with the fraction's trailing zeros dropped.
fn decimal(value: u128, unit: u128) -> String {
    let (whole, frac) = (value / unit, value % unit);
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
