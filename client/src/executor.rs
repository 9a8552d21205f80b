//! Retrying request executor shared by both services.
//!
//! # Design
//! The executor owns the retry loop and the single point where a failure is
//! logged. A non-2xx status is a failure here, so both failure classes go
//! through the same immediate-retry path. Parsing happens after the loop:
//! a body that fails to decode is reported once and never re-requested.

use std::sync::Arc;

use hero_geo_core::{ApiError, HttpRequest, HttpResponse, RetryPolicy};

use crate::transport::Transport;

#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Send `request`, retrying per policy, then hand the 2xx response to
    /// `parse`. Exactly one error is logged and returned on failure.
    pub async fn call<T>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(HttpResponse) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let result = match self.send(&request).await {
            Ok(response) => parse(response),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            report(&request, e);
        }
        result
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let attempts = self.policy.attempts_for(request.method);
        let mut attempt = 1;
        loop {
            let outcome = match self.transport.send(request).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => ApiError::Http {
                    status: response.status,
                    body: response.body,
                },
                Err(e) => e,
            };

            if !self.policy.should_retry(request.method, attempt, &outcome) {
                return Err(outcome);
            }
            tracing::debug!(
                method = request.method.as_str(),
                url = %request.path,
                attempt,
                attempts,
                error = %outcome,
                "request failed, retrying"
            );
            attempt += 1;
        }
    }
}

fn report(request: &HttpRequest, error: &ApiError) {
    let method = request.method.as_str();
    match error {
        ApiError::Connectivity(message) => tracing::error!(
            method,
            url = %request.path,
            "request never reached the server, check the network connection: {message}"
        ),
        ApiError::Http { status, body } => tracing::error!(
            method,
            url = %request.path,
            status,
            "backend returned an error: {body}"
        ),
        other => tracing::error!(method, url = %request.path, "{other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use super::*;
    use crate::testing::ScriptedTransport;
    use hero_geo_core::HttpMethod;

    fn executor(transport: &Arc<ScriptedTransport>, policy: RetryPolicy) -> Executor {
        Executor::new(transport.clone(), policy)
    }

    fn as_text(response: HttpResponse) -> Result<String, ApiError> {
        Ok(response.body)
    }

    fn delete() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: "http://localhost/heroes/10".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let transport = Arc::new(ScriptedTransport::new().reply(200, "[]"));
        let exec = executor(&transport, RetryPolicy::default());

        let body = exec
            .call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap();
        assert_eq!(body, "[]");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn read_recovers_after_two_failures() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .unreachable("connection refused")
                .reply(503, "busy")
                .reply(200, "ok"),
        );
        let exec = executor(&transport, RetryPolicy::default());

        let body = exec
            .call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap();
        assert_eq!(body, "ok");
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn three_failures_surface_one_error() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(500, "first")
                .reply(500, "second")
                .reply(404, "deliberate 404 error")
                .reply(200, "never reached"),
        );
        let exec = executor(&transport, RetryPolicy::default());

        let err = exec
            .call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                body: "deliberate 404 error".to_string()
            }
        );
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn writes_are_not_repeated_by_default() {
        let transport = Arc::new(ScriptedTransport::new().unreachable("reset").reply(200, "{}"));
        let exec = executor(&transport, RetryPolicy::default());

        let err = exec.call(delete(), as_text).await.unwrap_err();
        assert!(err.is_connectivity());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn writes_are_repeated_when_opted_in() {
        let transport = Arc::new(ScriptedTransport::new().unreachable("reset").reply(200, "{}"));
        let policy = RetryPolicy {
            retry_non_idempotent: true,
            ..RetryPolicy::default()
        };
        let exec = executor(&transport, policy);

        exec.call(delete(), as_text).await.unwrap();
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn opted_in_write_stops_after_three_attempts() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(502, "bad gateway")
                .reply(502, "bad gateway")
                .reply(502, "bad gateway")
                .reply(200, "{}"),
        );
        let policy = RetryPolicy {
            retry_non_idempotent: true,
            ..RetryPolicy::default()
        };
        let exec = executor(&transport, policy);

        let err = exec.call(delete(), as_text).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn huge_retry_count_still_retries() {
        let transport = Arc::new(ScriptedTransport::new().reply(500, "boom").reply(200, "ok"));
        let policy = RetryPolicy {
            max_retries: u32::MAX,
            retry_non_idempotent: false,
        };
        let exec = executor(&transport, policy);

        let body = exec
            .call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap();
        assert_eq!(body, "ok");
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn exhausted_backend_failure_logs_one_error() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(500, "first")
                .reply(503, "second")
                .reply(404, "deliberate 404 error"),
        );
        let exec = executor(&transport, RetryPolicy::default());

        exec.call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap_err();

        let errors = logs.lines_at("ERROR");
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains("backend returned an error: deliberate 404 error"));
        assert!(errors[0].contains("status=404"));
        assert_eq!(logs.lines_at("DEBUG").len(), 2);
    }

    #[tokio::test]
    async fn exhausted_connectivity_failure_logs_one_error() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let transport = Arc::new(
            ScriptedTransport::new()
                .unreachable("connection refused")
                .unreachable("connection refused")
                .unreachable("connection refused"),
        );
        let exec = executor(&transport, RetryPolicy::default());

        exec.call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap_err();

        let errors = logs.lines_at("ERROR");
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains("request never reached the server"));
        assert!(errors[0].contains("connection refused"));
        assert!(!errors[0].contains("backend returned"));
    }

    #[tokio::test]
    async fn recovered_call_logs_no_error() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let transport = Arc::new(ScriptedTransport::new().reply(500, "boom").reply(200, "ok"));
        let exec = executor(&transport, RetryPolicy::default());

        exec.call(HttpRequest::get("http://localhost/heroes".into()), as_text)
            .await
            .unwrap();

        assert!(logs.lines_at("ERROR").is_empty());
        assert_eq!(logs.lines_at("DEBUG").len(), 1);
    }

    #[tokio::test]
    async fn parse_failure_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new().reply(200, "not json").reply(200, "[]"));
        let exec = executor(&transport, RetryPolicy::default());

        let err = exec
            .call(HttpRequest::get("http://localhost/heroes".into()), |r| {
                parse_array(&r.body)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
        assert_eq!(transport.request_count(), 1);
    }

    /// Formatted events written by a thread-local subscriber.
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
        fn install(&self) -> tracing::subscriber::DefaultGuard {
            let writer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .without_time()
                .with_writer(move || writer.clone())
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn lines_at(&self, level: &str) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| line.trim_start().starts_with(level))
                .map(str::to_string)
                .collect()
        }
    }

    fn parse_array(body: &str) -> Result<(), ApiError> {
        if body.starts_with('[') {
            Ok(())
        } else {
            Err(ApiError::Deserialization(format!("unexpected body {body:?}")))
        }
    }
}
