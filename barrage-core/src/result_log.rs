use std::sync::Mutex;

use crate::outcome::Outcome;

/// Append-only log of request outcomes, shared by every in-flight request of a run.
#[derive(Debug, Default)]
pub struct ResultLog {
    outcomes: Mutex<Vec<Outcome>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn append(&self, outcome: Outcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(outcome);
    }

    /// Copy of every outcome in append order.
    pub fn read_all(&self) -> Vec<Outcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::outcome::FailureKind;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn preserves_append_order() {
        let log = ResultLog::new();
        log.append(Outcome::response(200, Duration::from_millis(1)));
        log.append(Outcome::failure(FailureKind::Timeout));
        log.append(Outcome::response(404, Duration::from_millis(2)));

        let all = log.read_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].status_code(), 200);
        assert_eq!(all[1].status_code(), 0);
        assert_eq!(all[2].status_code(), 404);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_are_never_lost() {
        const TASKS: u64 = 64;
        const PER_TASK: u64 = 250;

        let log = Arc::new(ResultLog::new());
        let mut handles = Vec::new();
        for t in 0..TASKS {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..PER_TASK {
                    let status = 200 + ((t * PER_TASK + i) % 3) as u16;
                    log.append(Outcome::response(status, Duration::from_micros(i + 1)));
                    if i % 16 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let all = log.read_all();
        assert_eq!(all.len() as u64, TASKS * PER_TASK);

        let ok = all.iter().filter(|o| o.status_code() == 200).count() as u64;
        let expected_ok = (0..TASKS * PER_TASK).filter(|n| n % 3 == 0).count() as u64;
        assert_eq!(ok, expected_ok);
    }
}
