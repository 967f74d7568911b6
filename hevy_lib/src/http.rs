//! `reqwest`-backed [`Transport`].

use crate::error::TransportError;
use crate::transport::{RequestConfig, Transport};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Network transport. Cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: HttpClient,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self::with_client(http))
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom timeouts).
    pub fn with_client(http: HttpClient) -> Self {
        Self {
            http,
            user_agent: format!("hevy-cli/{}", crate::VERSION),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        config: RequestConfig,
    ) -> Result<Value, TransportError> {
        let url = build_url(path, &config.params)?;
        tracing::debug!(%method, %url, "sending request");

        let mut req = self
            .http
            .request(method.clone(), url.clone())
            .header(USER_AGENT, &self.user_agent);
        for (name, value) in &config.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(ref b) = body {
            req = req.json(b);
        }

        let res = req
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        tracing::debug!(%method, %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: decode_body(&text),
            });
        }
        Ok(decode_body(&text))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, path: &str, config: RequestConfig) -> Result<Value, TransportError> {
        self.send(Method::GET, path, None, config).await
    }

    async fn submit(
        &self,
        path: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Value, TransportError> {
        self.send(Method::POST, path, Some(body), config).await
    }

    async fn replace(
        &self,
        path: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Value, TransportError> {
        self.send(Method::PUT, path, Some(body), config).await
    }

    async fn remove(&self, path: &str, config: RequestConfig) -> Result<Value, TransportError> {
        self.send(Method::DELETE, path, None, config).await
    }
}

fn build_url(path: &str, params: &[(String, String)]) -> Result<Url, TransportError> {
    let mut url = Url::parse(path).map_err(|e| TransportError::InvalidUrl {
        url: path.to_string(),
        reason: e.to_string(),
    })?;
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Ok(url)
}

/// Bodies that are not JSON are kept as a JSON string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_url_appends_params_in_order() {
        let params = vec![
            ("page".to_string(), "2".to_string()),
            ("since".to_string(), "1970-01-01T00:00:00Z".to_string()),
        ];
        let url = build_url("https://api.hevyapp.com/v1/workouts/events", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hevyapp.com/v1/workouts/events?page=2&since=1970-01-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn build_url_without_params_has_no_query() {
        let url = build_url("https://api.hevyapp.com/v1/workouts/count", &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn relative_path_is_invalid_url() {
        let err = build_url("/workouts", &[]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[test]
    fn empty_body_decodes_to_null() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("  \n"), Value::Null);
    }

    #[test]
    fn json_body_is_decoded() {
        assert_eq!(decode_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(decode_body("{\"error\":\"nope\"}"), json!({"error": "nope"}));
    }

    #[test]
    fn non_json_body_becomes_string() {
        assert_eq!(decode_body("error"), json!("error"));
        assert_eq!(decode_body("Created"), json!("Created"));
    }
}
