#![forbid(unsafe_code)]

mod config;
mod error;
mod executor;
mod outcome;
mod report;
mod result_log;
mod run;
mod sink;

pub mod runner;
pub mod stats;

pub use config::{
    Config, DEFAULT_CONNECTIONS, DEFAULT_DURATION, DEFAULT_PORT, DEFAULT_REQUEST_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT, interval_from_secs,
};
pub use error::{Error, Result};
pub use executor::{HttpExecutor, RequestExecutor};
pub use outcome::{FailureKind, Outcome, SUCCESS_STATUS};
pub use report::Report;
pub use result_log::ResultLog;
pub use run::run;
pub use runner::{BatchOrchestrator, RunOutcome};
pub use sink::{LogSink, MemorySink, TracingSink};
