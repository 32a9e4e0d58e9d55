//! Argument parsing layer (clap).

use crate::session::{AddressFamily, Credentials, Settings, Timings};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Sample wallet used as the default stratum1 login.
pub const DEFAULT_LOGIN: &str = "0x63a14c53f676f34847b5e6179c4f5f5a07f0b1ed";

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "TLS is enabled with `--tls` (two dashes); `-tls` parses as `-t ls`."
)]
pub struct Args {
    /// Stratum server in the form `<host:port>` (ignored with `-i`)
    pub target: Option<String>,

    /// Login sent by stratum1 (`-u`)
    #[arg(short = 'u', long, default_value = DEFAULT_LOGIN)]
    pub login: String,

    /// Password sent by stratum1 (`-p`)
    #[arg(short = 'p', long = "pass", default_value = "x")]
    pub pass: String,

    /// Stop after <count> attempts, 1..=20000 (`-c`)
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    pub count: i64,

    /// Resolve and connect over IPv6 (`-6`)
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Stratum type (`-t`)
    #[arg(
        short = 't',
        long = "type",
        default_value = "stratum2",
        help = "stratum1 | stratum2"
    )]
    pub stratum_type: String,

    /// Use TLS, certificates are not verified
    #[arg(long)]
    pub tls: bool,

    /// Read targets from a file, one `<host:port>` per line (`-i`).
    /// Each line is probed once without and once with TLS.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Connect, write and read deadline per attempt (ms)
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Delay after each attempt (ms)
    #[arg(long, default_value_t = 1_000)]
    pub interval_ms: u64,

    /// Log debug details to stderr (`-v`)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Session settings shared by every target of this invocation.
    pub fn settings(&self) -> Settings {
        let deadline = Duration::from_millis(self.timeout_ms);
        Settings {
            credentials: Credentials {
                login: self.login.clone(),
                password: self.pass.clone(),
            },
            count: self.count,
            family: if self.ipv6 {
                AddressFamily::V6
            } else {
                AddressFamily::V4
            },
            protocol: self.stratum_type.clone(),
            timings: Timings {
                connect: deadline,
                write: deadline,
                read: deadline,
                interval: Duration::from_millis(self.interval_ms),
            },
        }
    }
}
