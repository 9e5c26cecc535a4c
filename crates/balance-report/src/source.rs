//! Client list loading from the HTTP endpoint or a local JSON file
//!
//! The endpoint returns a JSON array of loosely typed client objects. A failed
//! load is reported as a [`LoadError`]; callers keep whatever state they had.
//! There is no automatic retry.

use balance_core::RawRecord;
use reqwest::StatusCode;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Where client records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http { url: String, timeout: Duration },
    File(PathBuf),
}

/// Why a load failed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of clients, got {0}")]
    NotAnArray(&'static str),
}

impl DataSource {
    /// Short description for log lines and prompts
    pub fn describe(&self) -> String {
        match self {
            DataSource::Http { url, .. } => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the full client list once
    pub async fn fetch(&self) -> Result<Vec<RawRecord>, LoadError> {
        let body = match self {
            DataSource::Http { url, timeout } => fetch_http(url, *timeout).await?,
            DataSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::File {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        let records = parse_records(&body)?;
        info!(source = %self.describe(), entries = records.len(), "fetched client list");
        Ok(records)
    }
}

/// GET the client list as text
async fn fetch_http(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let request_error = |source| LoadError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(request_error)?;

    debug!(url, "requesting client list");
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(request_error)
}

/// Parse a response body into raw entries
pub fn parse_records(body: &str) -> Result<Vec<RawRecord>, LoadError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(entries) => Ok(entries),
        Value::Null => Err(LoadError::NotAnArray("null")),
        Value::Bool(_) => Err(LoadError::NotAnArray("a boolean")),
        Value::Number(_) => Err(LoadError::NotAnArray("a number")),
        Value::String(_) => Err(LoadError::NotAnArray("a string")),
        Value::Object(_) => Err(LoadError::NotAnArray("an object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(url: String) -> DataSource {
        DataSource::Http {
            url,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_parse_records_array() {
        let records = parse_records(r#"[{"id": 1}, {"id": null}, 3]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], json!({"id": 1}));
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        assert!(matches!(
            parse_records(r#"{"clients": []}"#),
            Err(LoadError::NotAnArray("an object"))
        ));
        assert!(matches!(parse_records("not json"), Err(LoadError::Json(_))));
    }

    #[tokio::test]
    async fn test_fetch_http_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/clients")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "Name": "Dan", "balance": 100}]"#)
            .create_async()
            .await;

        let source = http(format!("{}/api/clients", server.url()));
        let records = source.fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Name"], json!("Dan"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/clients")
            .with_status(503)
            .create_async()
            .await;

        let source = http(format!("{}/api/clients", server.url()));
        match source.fetch().await {
            Err(LoadError::Status { status, .. }) => assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/clients")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let source = http(format!("{}/api/clients", server.url()));
        assert!(matches!(source.fetch().await, Err(LoadError::Json(_))));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        std::fs::write(&path, r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();

        let records = DataSource::File(path).fetch().await.unwrap();
        assert_eq!(records.len(), 2);

        let missing = DataSource::File(dir.path().join("missing.json"));
        assert!(matches!(missing.fetch().await, Err(LoadError::File { .. })));
    }
}
