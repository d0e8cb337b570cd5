use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::outcome::Outcome;
use crate::result_log::ResultLog;
use crate::sink::LogSink;

use super::gate::DurationGate;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Every recorded outcome, in append order.
    pub outcomes: Vec<Outcome>,
    /// Wall time from run start until the loop stopped, including the last pause.
    pub elapsed: Duration,
    pub batches: u64,
    pub requests: u64,
}

/// Launches `connections` requests at a time until the run duration has elapsed.
///
/// Each batch is fully joined before the interval pause and the next duration check, so a
/// single slow request holds back the next batch (up to the request timeout).
pub struct BatchOrchestrator<E> {
    cfg: Arc<Config>,
    executor: Arc<E>,
    sink: Arc<dyn LogSink>,
    log: Arc<ResultLog>,
    next_request_id: u64,
}

impl<E: RequestExecutor> BatchOrchestrator<E> {
    pub fn new(cfg: Arc<Config>, executor: Arc<E>, sink: Arc<dyn LogSink>) -> Self {
        let capacity = usize::try_from(cfg.connections).unwrap_or(0);
        Self {
            cfg,
            executor,
            sink,
            log: Arc::new(ResultLog::with_capacity(capacity)),
            next_request_id: 0,
        }
    }

    pub async fn run(mut self) -> Result<RunOutcome> {
        let gate = DurationGate::new(self.cfg.duration);

        let mut batches: u64 = 0;
        while gate.next() {
            let batch_started = Instant::now();
            let launched = self.run_batch().await?;
            batches = batches.saturating_add(1);

            if self.cfg.verbose {
                self.sink.debug(&format!(
                    "Batch {batches}: {launched} requests in {:.3}s",
                    batch_started.elapsed().as_secs_f64()
                ));
            }

            if !self.cfg.request_interval.is_zero() {
                tokio::time::sleep(self.cfg.request_interval).await;
            }
        }

        let elapsed = gate.elapsed();

        Ok(RunOutcome {
            outcomes: self.log.read_all(),
            elapsed,
            batches,
            requests: self.next_request_id,
        })
    }

    async fn run_batch(&mut self) -> Result<u64> {
        let mut tasks = JoinSet::new();
        for _ in 0..self.cfg.connections {
            let request_id = self.next_request_id;
            self.next_request_id = self.next_request_id.saturating_add(1);

            let executor = self.executor.clone();
            let log = self.log.clone();
            tasks.spawn(async move {
                let outcome = executor.execute(request_id).await;
                log.append(outcome);
            });
        }

        // A task that died outside the executor's own failure handling ends the run;
        // dropping the set aborts whatever is left of the batch.
        while let Some(joined) = tasks.join_next().await {
            joined?;
        }

        Ok(self.cfg.connections)
    }
}
