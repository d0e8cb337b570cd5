use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::outcome::{FailureKind, Outcome};
use crate::sink::LogSink;
use crate::stats::LatencyStats;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub elapsed_secs: f64,
    pub total_samples: u64,
    pub success_count: u64,
    pub failure_count: u64,
    pub requests_per_sec: f64,
    pub avg_latency: f64,
    pub median_latency: f64,
    pub p95_latency: f64,
    /// Responses by HTTP status.
    pub status_counts: BTreeMap<u16, u64>,
    /// Requests that got no response, by cause.
    pub failure_counts: BTreeMap<FailureKind, u64>,
}

impl Report {
    pub fn from_outcomes(outcomes: &[Outcome], elapsed: Duration) -> Result<Self> {
        let elapsed_secs = elapsed.as_secs_f64();
        if !(elapsed_secs > 0.0 && elapsed_secs.is_finite()) {
            return Err(Error::ZeroElapsed);
        }

        let total_samples = outcomes.len() as u64;
        let success_count = outcomes.iter().filter(|o| o.is_success()).count() as u64;

        let mut status_counts: BTreeMap<u16, u64> = BTreeMap::new();
        let mut failure_counts: BTreeMap<FailureKind, u64> = BTreeMap::new();
        for o in outcomes {
            match o {
                Outcome::Response { status, .. } => {
                    *status_counts.entry(*status).or_insert(0) += 1;
                }
                Outcome::Failure { kind } => {
                    *failure_counts.entry(*kind).or_insert(0) += 1;
                }
            }
        }

        let latencies: Vec<f64> = outcomes
            .iter()
            .map(Outcome::latency_secs)
            .filter(|l| *l > 0.0)
            .collect();
        let latency = LatencyStats::from_samples(latencies);

        Ok(Self {
            elapsed_secs,
            total_samples,
            success_count,
            failure_count: total_samples - success_count,
            requests_per_sec: total_samples as f64 / elapsed_secs,
            avg_latency: latency.avg,
            median_latency: latency.median,
            p95_latency: latency.p95,
            status_counts,
            failure_counts,
        })
    }

    /// The fixed result block, one entry per output line.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            "Load Test Results:".to_string(),
            format!("Duration: {:.2} seconds", self.elapsed_secs),
            format!("Total Requests: {}", self.total_samples),
            format!("Successful Requests: {}", self.success_count),
            format!("Failed Requests: {}", self.failure_count),
            format!("Requests/second: {:.2}", self.requests_per_sec),
            format!("Average Response Time: {:.3}s", self.avg_latency),
            format!("Median Response Time: {:.3}s", self.median_latency),
            format!("95th Percentile Response Time: {:.3}s", self.p95_latency),
        ]
    }

    /// Status and failure breakdowns, e.g. `Status 200: 96` / `Failure timeout: 4`.
    pub fn breakdown_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.status_counts.len() + self.failure_counts.len());
        for (status, count) in &self.status_counts {
            out.push(format!("Status {status}: {count}"));
        }
        for (kind, count) in &self.failure_counts {
            out.push(format!("Failure {kind}: {count}"));
        }
        out
    }

    /// Writes the summary at info level; breakdowns go to debug when `verbose`.
    pub fn emit(&self, sink: &dyn LogSink, verbose: bool) {
        sink.info("");
        for line in self.summary_lines() {
            sink.info(&line);
        }
        if verbose {
            for line in self.breakdown_lines() {
                sink.debug(&line);
            }
        }
    }
}
