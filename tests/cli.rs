//! Basic flag parsing tests.

use clap::{CommandFactory, Parser, error::ErrorKind};
use std::{path::PathBuf, process::Command, time::Duration};
use stratum_ping::{
    cli::{Args, DEFAULT_LOGIN},
    error::TargetError,
    session::{AddressFamily, ProbeSession, Transport},
};

#[test]
fn parse_defaults() {
    let a = Args::parse_from(["stratum-ping", "eth.2miners.com:2020"]);
    assert_eq!(a.target.as_deref(), Some("eth.2miners.com:2020"));
    assert_eq!(a.login, DEFAULT_LOGIN);
    assert_eq!(a.pass, "x");
    assert_eq!(a.count, 5);
    assert!(!a.ipv6);
    assert_eq!(a.stratum_type, "stratum2");
    assert!(!a.tls);
    assert_eq!(a.input, None);

    let s = a.settings();
    assert_eq!(s.family, AddressFamily::V4);
    assert_eq!(s.timings.read, Duration::from_secs(10));
    assert_eq!(s.timings.write, Duration::from_secs(10));
    assert_eq!(s.timings.interval, Duration::from_secs(1));
}

#[test]
fn short_flags() {
    let a = Args::parse_from([
        "stratum-ping", "-u", "wallet.rig", "-p", "secret", "-c", "3", "-6", "-t", "stratum1",
        "pool:4444",
    ]);
    assert_eq!(a.login, "wallet.rig");
    assert_eq!(a.pass, "secret");
    assert_eq!(a.count, 3);
    assert!(a.ipv6);
    assert_eq!(a.stratum_type, "stratum1");
    assert_eq!(a.settings().family, AddressFamily::V6);
}

#[test]
fn tls_flag() {
    let a = Args::parse_from(["stratum-ping", "pool:443", "--tls"]);
    assert!(a.tls);
}

#[test]
fn input_file_without_target() {
    let a = Args::parse_from(["stratum-ping", "-i", "pools.txt"]);
    assert_eq!(a.input, Some(PathBuf::from("pools.txt")));
    assert_eq!(a.target, None);
}

#[test]
fn bad_count_reaches_session_validation() {
    for count in ["0", "-1", "20001"] {
        let a = Args::parse_from(["stratum-ping", "pool:4444", "-c", count]);
        let err = ProbeSession::new("pool:4444", &a.settings(), Transport::Tcp).unwrap_err();
        assert_eq!(err, TargetError::InvalidCount, "{count}");
    }
}

#[test]
fn unknown_type_reaches_session_validation() {
    let a = Args::parse_from(["stratum-ping", "pool:4444", "-t", "ftp"]);
    let err = ProbeSession::new("pool:4444", &a.settings(), Transport::Tcp).unwrap_err();
    assert_eq!(err, TargetError::InvalidProtocol);
}

#[test]
fn timeout_applies_to_every_deadline() {
    let a = Args::parse_from(["stratum-ping", "pool:4444", "--timeout-ms", "250"]);
    let t = a.settings().timings;
    assert_eq!(t.connect, Duration::from_millis(250));
    assert_eq!(t.write, Duration::from_millis(250));
    assert_eq!(t.read, Duration::from_millis(250));
}

#[test]
fn reject_zero_timeout() {
    let err = Args::try_parse_from(["stratum-ping", "pool:4444", "--timeout-ms", "0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn help_points_single_dash_tls_to_long_flag() {
    let help = Args::command().render_long_help().to_string();
    assert!(help.contains("`--tls`"));
}

#[test]
fn unreadable_input_file_fails_with_readable_error() {
    let out = Command::new(env!("CARGO_BIN_EXE_stratum-ping"))
        .args(["-i", "/nonexistent/stratum-ping-pools.txt"])
        .output()
        .unwrap();
    assert!(!out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot open input file"), "{stderr}");
    assert!(!stderr.contains("Other("), "{stderr}");
}
