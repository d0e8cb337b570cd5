use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use barrage_http::{HttpClient, HttpRequest};

use crate::config::Config;
use crate::outcome::Outcome;
use crate::sink::LogSink;

/// Issues one request and classifies what happened.
///
/// Implementations must not panic on transport problems: every failure mode is an
/// [`Outcome::Failure`].
pub trait RequestExecutor: Send + Sync + 'static {
    fn execute(&self, request_id: u64) -> impl Future<Output = Outcome> + Send;
}

/// GETs the configured target over a pooled client shared by the whole run.
pub struct HttpExecutor {
    client: HttpClient,
    url: Arc<str>,
    timeout: Duration,
    verbose: bool,
    sink: Arc<dyn LogSink>,
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl HttpExecutor {
    pub fn new(cfg: &Config, sink: Arc<dyn LogSink>) -> Self {
        let pool_size = usize::try_from(cfg.connections).unwrap_or(usize::MAX);
        Self {
            client: HttpClient::new(Some(cfg.request_timeout), pool_size),
            url: Arc::from(cfg.target_url()),
            timeout: cfg.request_timeout,
            verbose: cfg.verbose,
            sink,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request_id: u64) -> Outcome {
        let req = HttpRequest::get(&self.url).with_timeout(self.timeout);

        match self.client.request(req).await {
            Ok(res) => {
                let latency = res.latency;
                if self.verbose {
                    self.sink.debug(&format!(
                        "Request {request_id}: Status {}, Time {:.3}s",
                        res.status,
                        latency.as_secs_f64()
                    ));
                }
                Outcome::response(res.status, latency)
            }
            Err(err) => {
                if self.verbose {
                    self.sink
                        .debug(&format!("Request {request_id} failed: {err}"));
                }
                Outcome::failure(err.transport_error_kind())
            }
        }
    }
}
