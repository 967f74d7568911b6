//! Transport abstraction used by [`crate::HevyClient`].
//!
//! A transport performs one HTTP request per call and returns the decoded
//! JSON body. [`crate::ReqwestTransport`] is the network implementation; tests
//! substitute their own.

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Per-request query parameters and headers, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Header lookup; names compare case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP capability with GET/POST/PUT/DELETE semantics over a resource path.
///
/// Implementations return the decoded payload directly; an empty body is
/// `Value::Null`. Non-2xx responses must be reported as
/// [`TransportError::Status`] so the client can normalize them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path`.
    async fn fetch(&self, path: &str, config: RequestConfig) -> Result<Value, TransportError>;

    /// POST `body` as JSON to `path`.
    async fn submit(
        &self,
        path: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Value, TransportError>;

    /// PUT `body` as JSON to `path`.
    async fn replace(
        &self,
        path: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Value, TransportError>;

    /// DELETE `path`.
    async fn remove(&self, path: &str, config: RequestConfig) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch(&self, path: &str, config: RequestConfig) -> Result<Value, TransportError> {
        (**self).fetch(path, config).await
    }

    async fn submit(
        &self,
        path: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Value, TransportError> {
        (**self).submit(path, body, config).await
    }

    async fn replace(
        &self,
        path: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Value, TransportError> {
        (**self).replace(path, body, config).await
    }

    async fn remove(&self, path: &str, config: RequestConfig) -> Result<Value, TransportError> {
        (**self).remove(path, config).await
    }
}
