use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::time::{Duration, sleep};

/// How the test target answers every request, regardless of method or path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBehavior {
    pub status: u16,
    pub delay: Duration,
}

impl Default for TargetBehavior {
    fn default() -> Self {
        Self {
            status: 200,
            delay: Duration::ZERO,
        }
    }
}

impl TargetBehavior {
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestServerStats {
    requests_total: Arc<AtomicU64>,
}

impl TestServerStats {
    fn inc_requests_total(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
struct AppState {
    stats: TestServerStats,
    status: StatusCode,
    delay: Duration,
}

async fn handle_any(State(state): State<AppState>) -> (StatusCode, &'static str) {
    state.stats.inc_requests_total();
    if !state.delay.is_zero() {
        sleep(state.delay).await;
    }
    (state.status, "Hello World!")
}

pub fn router(stats: TestServerStats, behavior: TargetBehavior) -> std::io::Result<Router> {
    let status = StatusCode::from_u16(behavior.status).map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid status {}: {err}", behavior.status),
        )
    })?;

    let state = AppState {
        stats,
        status,
        delay: behavior.delay,
    };

    Ok(Router::new().fallback(handle_any).with_state(state))
}

/// Returns a loopback address with nothing listening on it.
pub async fn closed_addr() -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

/// Serves `200 OK` with a five byte body, sending the head at once and the body after `body_delay`.
///
/// Speaks just enough HTTP/1.1 for one request per connection. The accept loop lives until the
/// runtime shuts down.
pub async fn slow_body_target(body_delay: Duration) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = answer_with_slow_body(stream, body_delay).await;
            });
        }
    });

    Ok(addr)
}

async fn answer_with_slow_body(mut stream: TcpStream, body_delay: Duration) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        head.extend_from_slice(&buf[..n]);
    }

    stream
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\n")
        .await?;
    stream.flush().await?;
    sleep(body_delay).await;
    stream.write_all(b"hello").await?;
    stream.shutdown().await
}

pub struct TestServer {
    addr: SocketAddr,
    base_url: String,
    stats: TestServerStats,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with(TargetBehavior::default()).await
    }

    pub async fn start_with(behavior: TargetBehavior) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let stats = TestServerStats::default();

        let app = router(stats.clone(), behavior)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = serve.await;
        });

        let base_url = format!("http://{addr}");

        Ok(Self {
            addr,
            base_url,
            stats,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    pub fn stats(&self) -> &TestServerStats {
        &self.stats
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(mut task) = self.task.take() {
            // Slow handlers may still be sleeping on their delay.
            if tokio::time::timeout(Duration::from_secs(1), &mut task)
                .await
                .is_err()
            {
                task.abort();
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if self.shutdown_tx.is_some()
            && let Some(task) = self.task.take()
        {
            task.abort();
        }
    }
}
