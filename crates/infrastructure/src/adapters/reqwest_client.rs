//! `HttpClient` port backed by reqwest.

use std::error::Error as _;
use std::time::{Duration, Instant};

use mailprobe_application::ports::{HttpClient, HttpClientError, HttpFuture};
use mailprobe_domain::{HttpMethod, RequestSpec, ResponseSpec};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

const MAX_REDIRECTS: usize = 10;

/// Sends check requests over one pooled `reqwest::Client`.
///
/// Timeouts are per request, taken from `RequestSpec::timeout_ms`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds the client with the runner's user agent and redirect limit.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::Other` if the TLS backend cannot be set up.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("mailprobe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(error_chain(&e)))?;

        Ok(Self { client })
    }

    async fn send(&self, request: RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        let timeout_ms = request.timeout_ms;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        }
        .timeout(Duration::from_millis(timeout_ms));

        for header in &request.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }
        if let Some(json) = request.json_body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(json);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| classify(&e, timeout_ms))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| classify(&e, timeout_ms))?;

        Ok(ResponseSpec::new(status, &bytes, started.elapsed()))
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        Box::pin(self.send(request.clone()))
    }
}

/// Joins an error's message with all of its sources.
fn error_chain(error: &reqwest::Error) -> String {
    std::iter::successors(error.source(), |e| (*e).source())
        .fold(error.to_string(), |acc, cause| format!("{acc}: {cause}"))
}

fn classify(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
    if error.is_timeout() {
        return HttpClientError::Timeout { timeout_ms };
    }

    let message = error_chain(error);
    if !error.is_connect() {
        return HttpClientError::Other(message);
    }

    // hyper only exposes the refusal through the io error text.
    if message.to_lowercase().contains("refused") {
        let url = error.url();
        return HttpClientError::ConnectionRefused {
            host: url.and_then(Url::host_str).unwrap_or("unknown").to_string(),
            port: url.and_then(Url::port_or_known_default).unwrap_or(80),
        };
    }
    HttpClientError::ConnectionFailed(message)
}
