//! Completion service for bearer-authenticated text completion endpoints.
//!
//! Minimal, non-streaming client. Every call is exactly one
//! `POST {endpoint}` with the JSON body `{ model, prompt, temperature, top_p }`.
//! The generated text is read from the top-level `text` field of the answer.
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.api_key` must be representable as a header value
//!
//! No retries are attempted. Failures are returned as-is and left to the
//! caller to log.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    config::completion_config::{CompletionConfig, SamplingParams},
    error_handler::{
        CompletionError, ConfigError, HttpError, Result, validate_http_endpoint,
    },
};

/// Thin client for a completion backend.
///
/// Constructed from a complete [`CompletionConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` with the bearer header installed, so it is
/// cheap to share behind an `Arc` across concurrent requests.
///
/// High-level operations:
/// - [`CompletionClient::generate`]      — completion with default sampling (0.7 / 0.9)
/// - [`CompletionClient::generate_with`] — completion with explicit sampling
#[derive(Debug)]
pub struct CompletionClient {
    client: reqwest::Client,
    cfg: CompletionConfig,
}

impl CompletionClient {
    /// Creates a new [`CompletionClient`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not an http(s) URL
    /// - [`ConfigError::InvalidCredential`] if `cfg.api_key` is not a valid header value
    /// - [`CompletionError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: CompletionConfig) -> Result<Self> {
        validate_http_endpoint("endpoint", &cfg.endpoint)?;

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
            .map_err(|_| ConfigError::InvalidCredential)?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            "CompletionClient initialized"
        );

        Ok(Self { client, cfg })
    }

    /// Returns the config this client was built with.
    pub fn config(&self) -> &CompletionConfig {
        &self.cfg
    }

    /// Runs a completion with [`SamplingParams::default`].
    ///
    /// # Errors
    /// See [`CompletionClient::generate_with`].
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with(prompt, SamplingParams::default()).await
    }

    /// Runs a **non-streaming** completion with explicit sampling parameters.
    ///
    /// Returns the trimmed `text` field of the response, or an empty string if
    /// the field is absent or `null`.
    ///
    /// # Errors
    /// - [`CompletionError::Http`] for non-2xx responses (status and full body)
    /// - [`CompletionError::HttpTransport`] for client/network failures
    /// - [`CompletionError::MalformedResponse`] if the body is not a JSON object
    ///   or `text` is neither a string nor `null`
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate_with(&self, prompt: &str, params: SamplingParams) -> Result<String> {
        let started = Instant::now();
        let body = CompletionRequest {
            model: &self.cfg.model,
            prompt,
            temperature: params.temperature,
            top_p: params.top_p,
        };

        debug!(
            prompt_len = prompt.len(),
            temperature = params.temperature,
            top_p = params.top_p,
            "POST {}", self.cfg.endpoint
        );

        let resp = self
            .client
            .post(&self.cfg.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = match resp.text().await {
                Ok(t) => t,
                Err(e) => {
                    debug!(%status, error = %e, "could not read error body");
                    String::new()
                }
            };

            return Err(HttpError {
                status,
                url: self.cfg.endpoint.clone(),
                body: text,
            }
            .into());
        }

        let bytes = resp.bytes().await?;
        let text = extract_text(&bytes)?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            output_len = text.len(),
            "completion finished"
        );

        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for the completion endpoint.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    top_p: f32,
}

/// Pulls the trimmed `text` field out of a raw completion body.
///
/// A missing or `null` field yields an empty string. Anything that is not a
/// JSON object, or a non-string `text`, is a [`CompletionError::MalformedResponse`].
///
/// `null` counts as "no usable text", not as a shape error: backends that
/// emit `"text": null` on an empty generation get `""` rather than a 502.
fn extract_text(body: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        CompletionError::MalformedResponse(format!("serde error: {e}; expected a JSON object"))
    })?;

    let Value::Object(map) = value else {
        return Err(CompletionError::MalformedResponse(
            "expected a JSON object at the top level".into(),
        ));
    };

    match map.get("text") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(CompletionError::MalformedResponse(format!(
            "expected `text` to be a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use reqwest::StatusCode;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> CompletionConfig {
        CompletionConfig {
            endpoint: format!("{}/v1/completions", server.uri()),
            api_key: "test-key".into(),
            model: "llama3-8b-8192".into(),
            timeout_secs: Some(5),
        }
    }

    /// In-memory sink for a test-local `fmt` subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Installs a DEBUG-level subscriber for the current thread.
    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    async fn mount_reply(server: &MockServer, reply: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(reply)
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn extract_text_handles_shapes() {
        assert_eq!(extract_text(br#"{"text":"  hi \n"}"#).unwrap(), "hi");
        assert_eq!(extract_text(br#"{"other":1}"#).unwrap(), "");
        assert_eq!(extract_text(br#"{"text":null}"#).unwrap(), "");
        assert!(matches!(
            extract_text(br#"{"text":42}"#),
            Err(CompletionError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text(b"[1,2]"),
            Err(CompletionError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text(b"not json"),
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let cfg = CompletionConfig {
            endpoint: "api.groq.com/v1/completions".into(),
            api_key: "k".into(),
            model: "m".into(),
            timeout_secs: None,
        };
        assert!(matches!(
            CompletionClient::new(cfg),
            Err(CompletionError::Config(ConfigError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn rejects_credential_with_newline() {
        let cfg = CompletionConfig {
            endpoint: "https://api.groq.com/v1/completions".into(),
            api_key: "bad\nkey".into(),
            model: "m".into(),
            timeout_secs: None,
        };
        assert!(matches!(
            CompletionClient::new(cfg),
            Err(CompletionError::Config(ConfigError::InvalidCredential))
        ));
    }

    #[tokio::test]
    async fn sends_bearer_and_body_and_trims_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(json!({
                "model": "llama3-8b-8192",
                "prompt": "Say hello",
                "temperature": 0.7,
                "top_p": 0.9,
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "text": "  hello world  \n" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        let out = client.generate("Say hello").await.unwrap();
        assert_eq!(out, "hello world");
    }

    #[tokio::test]
    async fn explicit_sampling_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "model": "llama3-8b-8192",
                "prompt": "p",
                "temperature": 0.25,
                "top_p": 0.5,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        let params = SamplingParams {
            temperature: 0.25,
            top_p: 0.5,
        };
        assert_eq!(client.generate_with("p", params).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn missing_text_yields_empty_string() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "id": "cmpl-1", "choices": [] })),
        )
        .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        assert_eq!(client.generate("anything").await.unwrap(), "");
    }

    #[tokio::test]
    async fn null_text_yields_empty_string() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "text": null })),
        )
        .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        assert_eq!(client.generate("anything").await.unwrap(), "");
    }

    #[tokio::test]
    async fn server_error_is_surfaced_with_body() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            ResponseTemplate::new(500).set_body_string("upstream exploded"),
        )
        .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        let err = client.generate("anything").await.unwrap_err();
        match err {
            CompletionError::Http(HttpError { status, body, url }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "upstream exploded");
                assert!(url.ends_with("/v1/completions"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_malformed_response() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
        )
        .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        let err = client.generate("anything").await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn configured_timeout_is_reported() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "text": "late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let mut cfg = config_for(&server);
        cfg.timeout_secs = Some(1);
        let client = CompletionClient::new(cfg).unwrap();
        let err = client.generate("anything").await.unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[tokio::test]
    async fn upstream_failure_is_not_logged_by_client() {
        let (logs, _guard) = capture_logs();
        let server = MockServer::start().await;
        mount_reply(
            &server,
            ResponseTemplate::new(500).set_body_string("upstream exploded"),
        )
        .await;

        let client = CompletionClient::new(config_for(&server)).unwrap();
        let err = client.generate("anything").await.unwrap_err();
        assert!(matches!(err, CompletionError::Http(_)));

        let out = logs.contents();
        assert!(out.contains("POST "), "capture not active: {out}");
        assert!(!out.contains("ERROR"), "client logged an error: {out}");
        assert!(!out.contains("WARN"), "client logged a warning: {out}");
    }

    #[tokio::test]
    async fn unreadable_error_body_is_noted_and_left_empty() {
        let (logs, _guard) = capture_logs();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Promises 100 body bytes, sends 7, then hangs up.
        let upstream = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !req.ends_with(b"}") {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                req.extend_from_slice(&buf[..n]);
            }
            sock.write_all(
                b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\npartial",
            )
            .await
            .unwrap();
            sock.shutdown().await.unwrap();
        });

        let cfg = CompletionConfig {
            endpoint: format!("http://{addr}/v1/completions"),
            api_key: "test-key".into(),
            model: "llama3-8b-8192".into(),
            timeout_secs: Some(5),
        };
        let client = CompletionClient::new(cfg).unwrap();
        let err = client.generate("anything").await.unwrap_err();
        upstream.await.unwrap();

        match err {
            CompletionError::Http(HttpError { status, body, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
        assert!(logs.contents().contains("could not read error body"));
    }
}
