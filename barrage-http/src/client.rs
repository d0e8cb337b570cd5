use bytes::Bytes;
use http_body_util::{BodyExt as _, Empty};
use hyper::Request;
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::{Duration, Instant};

use super::{Error, HttpRequest, HttpResponse, Result};

const USER_AGENT: &str = concat!("barrage/", env!("CARGO_PKG_VERSION"));

/// Pooled HTTP/1.1 client shared by every request of a run.
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
}

impl HttpClient {
    /// `max_idle_per_host` caps how many connections the pool keeps around for reuse.
    #[must_use]
    pub fn new(connect_timeout: Option<Duration>, max_idle_per_host: usize) -> Self {
        let mut http_connector = HttpConnector::new();
        http_connector.enforce_http(false);
        http_connector.set_connect_timeout(connect_timeout);
        http_connector.set_nodelay(true);

        let https_connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(http_connector);

        let inner = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(max_idle_per_host)
            .build(https_connector);

        Self { inner }
    }

    pub async fn request(&self, req: HttpRequest) -> Result<HttpResponse> {
        let parsed = url::Url::parse(&req.url).map_err(|_| Error::InvalidUrl(req.url.clone()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::UnsupportedScheme(req.url));
        }

        let uri: hyper::Uri = req
            .url
            .parse()
            .map_err(|_| Error::InvalidUrl(req.url.clone()))?;

        let request = Request::builder()
            .method(req.method)
            .uri(uri)
            .header(http::header::USER_AGENT, USER_AGENT)
            .body(Empty::new())?;

        match req.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.exchange(request)).await {
                Ok(res) => res,
                Err(_) => Err(Error::Timeout(timeout)),
            },
            None => self.exchange(request).await,
        }
    }

    async fn exchange(&self, request: Request<Empty<Bytes>>) -> Result<HttpResponse> {
        let started = Instant::now();
        let res: hyper::Response<Incoming> = self.inner.request(request).await?;
        let latency = started.elapsed();
        let (parts, mut body) = res.into_parts();

        // Drain without buffering so the connection goes back to the pool.
        while let Some(frame) = body.frame().await {
            frame?;
        }

        Ok(HttpResponse {
            status: parts.status.as_u16(),
            latency,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::HttpTransportErrorKind;
    use barrage_testserver::{TargetBehavior, TestServer, slow_body_target};

    // The OS-level TCP connect timeout can be tens of seconds; keep failures fast.
    fn client() -> HttpClient {
        HttpClient::new(Some(Duration::from_secs(3)), usize::MAX)
    }

    #[tokio::test]
    async fn unreachable_host_fails_fast_with_connect_timeout() {
        // Use a small timeout to keep the test fast and deterministic.
        let client = HttpClient::new(Some(Duration::from_millis(200)), 1);
        let req = HttpRequest::get("http://192.0.2.1:81/");

        let started = Instant::now();
        let _err = client.request(req).await.unwrap_err();
        let elapsed = started.elapsed();

        // Assert we didn't block for an OS-level TCP connect timeout.
        assert!(
            elapsed < Duration::from_secs(2),
            "expected fast failure, elapsed={elapsed:?}"
        );
    }

    #[tokio::test]
    async fn get_returns_status_and_latency() {
        let server = TestServer::start().await.unwrap();

        let res = client()
            .request(HttpRequest::get(&server.root_url()))
            .await
            .unwrap();
        server.shutdown().await;

        assert_eq!(res.status, 200);
        assert!(res.latency > Duration::ZERO);
    }

    #[tokio::test]
    async fn latency_stops_at_the_response_head() {
        let addr = slow_body_target(Duration::from_millis(600)).await.unwrap();

        let started = Instant::now();
        let res = client()
            .request(HttpRequest::get(&format!("http://{addr}/")))
            .await
            .unwrap();
        let total = started.elapsed();

        assert_eq!(res.status, 200);
        assert!(res.latency < Duration::from_millis(300), "latency={:?}", res.latency);
        // The body is still drained before the call returns.
        assert!(total >= Duration::from_millis(600), "total={total:?}");
    }

    #[tokio::test]
    async fn error_statuses_are_responses_not_errors() {
        let server = TestServer::start_with(TargetBehavior::default().with_status(503))
            .await
            .unwrap();
        let res = client()
            .request(HttpRequest::get(&server.root_url()))
            .await
            .unwrap();
        server.shutdown().await;

        assert_eq!(res.status, 503);
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = TestServer::start_with(
            TargetBehavior::default().with_delay(Duration::from_secs(5)),
        )
        .await
        .unwrap();
        let req = HttpRequest::get(&server.root_url()).with_timeout(Duration::from_millis(150));
        let err = client().request(req).await.unwrap_err();
        server.shutdown().await;

        assert_eq!(err.transport_error_kind(), HttpTransportErrorKind::Timeout);
    }

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let client = client();

        let err = client
            .request(HttpRequest::get("ftp://localhost/"))
            .await
            .unwrap_err();
        assert_eq!(
            err.transport_error_kind(),
            HttpTransportErrorKind::UnsupportedScheme
        );

        let err = client
            .request(HttpRequest::get("not a url"))
            .await
            .unwrap_err();
        assert_eq!(err.transport_error_kind(), HttpTransportErrorKind::InvalidUrl);
    }
}
