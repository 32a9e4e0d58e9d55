//! Library facade - re-export internal modules so integration
//! tests or external code can use `stratum_ping::...`.

pub mod cli;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod probe;
pub mod resolver;
pub mod session;
pub mod stats;
pub mod stratum;
