use hiring_core::config::FetchConfig;
use hiring_core::domain::RawJobPosting;
use hiring_core::ports::{JobSource, Result};
use hiring_core::FetchError;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde_json::Value;

mod normalize;

pub use normalize::normalize_records;

/// RemoteOK implementation of the JobSource trait
pub struct RemoteOkJobSource {
    config: FetchConfig,
}

impl RemoteOkJobSource {
    /// Creates a new RemoteOkJobSource for the given endpoint settings
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    fn download(&self) -> std::result::Result<String, FetchError> {
        let client = reqwest::blocking::Client::new();
        let response = client
            .get(&self.config.url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url = %self.config.url, status = status.as_u16(), "listing request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .map_err(|e| FetchError::Transport(format!("failed to read response: {}", e)))
    }
}

impl JobSource for RemoteOkJobSource {
    fn fetch_jobs(&self) -> Result<Vec<RawJobPosting>> {
        tracing::info!(url = %self.config.url, "requesting job listing");
        let body = self.download()?;
        let values = parse_listing(&body)?;
        Ok(normalize_records(values))
    }
}

/// Parses a response body that must be a JSON array.
fn parse_listing(body: &str) -> std::result::Result<Vec<Value>, FetchError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    match payload {
        Value::Array(items) => Ok(items),
        other => Err(FetchError::Decode(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::get;
    use axum::Router;
    use hiring_core::domain::RawTags;
    use hiring_core::Error;
    use std::net::SocketAddr;

    /// Fake RemoteOK API on a random local port. Answers 403 unless the
    /// expected User-Agent is sent.
    struct FakeRemoteOk {
        _runtime: tokio::runtime::Runtime,
        addr: SocketAddr,
    }

    impl FakeRemoteOk {
        fn start(status: AxumStatus, body: &'static str) -> Self {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            let listener = runtime
                .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
                .unwrap();
            let addr = listener.local_addr().unwrap();

            let app = Router::new().route(
                "/api",
                get(move |headers: HeaderMap| async move {
                    let spoofed = headers
                        .get("user-agent")
                        .map(|v| v.as_bytes() == b"Mozilla/5.0")
                        .unwrap_or(false);
                    if spoofed {
                        (status, body)
                    } else {
                        (AxumStatus::FORBIDDEN, "")
                    }
                }),
            );
            runtime.spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                _runtime: runtime,
                addr,
            }
        }

        fn source(&self) -> RemoteOkJobSource {
            RemoteOkJobSource::new(FetchConfig {
                url: format!("http://{}/api", self.addr),
                ..FetchConfig::default()
            })
        }
    }

    const LISTING: &str = r#"[
        {"last_updated": 1710460800, "legal": "API terms of service"},
        {"company":"Acme","position":"Engineer","tags":["go","sql"],"location":"Remote","date":"2024-03-15T00:00:00"}
    ]"#;

    #[test]
    fn test_fetch_jobs_skips_metadata_and_projects() {
        let api = FakeRemoteOk::start(AxumStatus::OK, LISTING);

        let rows = api.source().fetch_jobs().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company.as_deref(), Some("Acme"));
        assert_eq!(rows[0].tags, RawTags::List(vec!["go".into(), "sql".into()]));
        assert_eq!(rows[0].date.as_deref(), Some("2024-03-15T00:00:00"));
    }

    #[test]
    fn test_fetch_jobs_non_200_carries_status() {
        let api = FakeRemoteOk::start(AxumStatus::SERVICE_UNAVAILABLE, "down for maintenance");

        let err = api.source().fetch_jobs().unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::Status(503))));
        assert_eq!(err.to_string(), "Failed to fetch jobs: 503");
    }

    #[test]
    fn test_fetch_jobs_other_success_codes_fail_too() {
        let api = FakeRemoteOk::start(AxumStatus::NO_CONTENT, "");

        let err = api.source().fetch_jobs().unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::Status(204))));
    }

    #[test]
    fn test_fetch_jobs_malformed_json_is_decode_error() {
        let api = FakeRemoteOk::start(AxumStatus::OK, "<html>rate limited</html>");

        let err = api.source().fetch_jobs().unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::Decode(_))));
    }

    #[test]
    fn test_fetch_jobs_single_element_is_empty() {
        let api = FakeRemoteOk::start(AxumStatus::OK, r#"[{"legal": "terms"}]"#);

        assert!(api.source().fetch_jobs().unwrap().is_empty());
    }

    #[test]
    fn test_fetch_jobs_connection_refused_is_transport_error() {
        let source = RemoteOkJobSource::new(FetchConfig {
            url: "http://127.0.0.1:1/api".into(),
            ..FetchConfig::default()
        });

        let err = source.fetch_jobs().unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::Transport(_))));
    }

    #[test]
    fn test_parse_listing_rejects_objects() {
        let err = parse_listing(r#"{"jobs": []}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to decode job listing: expected a JSON array, found an object"
        );
    }
}
