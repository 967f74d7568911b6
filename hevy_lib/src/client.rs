//! Hevy API client: one method per REST endpoint.

use crate::error::{ApiError, ConfigError, Error, TransportError};
use crate::helpers::format_time;
use crate::models::{
    CreateRoutineFolderRequest, CreateRoutineFolderResponse, ExerciseTemplate,
    ExerciseTemplatesPage, RoutineFolder, RoutineFoldersPage, WebhookSubscription, Workout,
};
use crate::transport::{RequestConfig, Transport};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub const API_BASE: &str = "https://api.hevyapp.com/v1";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 5;

const JSON: &str = "application/json";
const ANY: &str = "*/*";

/// Hevy API client over any [`Transport`].
#[derive(Clone)]
pub struct HevyClient<T> {
    transport: T,
    api_key: String,
    api_base: String,
}

impl<T: Transport> HevyClient<T> {
    /// Create a client against the production API root.
    pub fn new(transport: T, api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_path(transport, api_key, API_BASE)
    }

    /// Create a client against another API root (staging, mock servers).
    pub fn with_base_path(
        transport: T,
        api_key: impl Into<String>,
        base_path: &str,
    ) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::new("API key is required").into());
        }
        Ok(Self {
            transport,
            api_key,
            api_base: base_path.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &str {
        &self.api_base
    }

    // Workouts

    /// List workouts, newest first. Returns the `{page, page_count, workouts}` envelope.
    pub async fn get_workouts(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Value, Error> {
        let config = self.paged(page, page_size);
        self.fetch("/workouts", config).await
    }

    pub async fn get_workout(&self, workout_id: &str) -> Result<Value, Error> {
        let path = format!("/workouts/{}", workout_id);
        self.fetch(&path, self.read()).await
    }

    pub async fn create_workout(&self, workout: &Workout) -> Result<Value, Error> {
        let body = json!({ "workout": workout });
        self.submit("/workouts", body, self.write(JSON)).await
    }

    pub async fn update_workout(&self, workout_id: &str, workout: &Workout) -> Result<Value, Error> {
        let path = format!("/workouts/{}", workout_id);
        let body = json!({ "workout": workout });
        self.replace(&path, body, self.write(JSON)).await
    }

    /// Total number of workouts on the account.
    pub async fn get_workout_count(&self) -> Result<u64, Error> {
        let res = self.fetch("/workouts/count", self.read()).await?;
        res.get("workout_count")
            .and_then(as_count)
            .ok_or_else(|| Error::Other(format!("Missing workout_count in response: {}", res)))
    }

    /// Workout updates and deletions since `since` (Unix epoch when `None`).
    pub async fn get_workout_events(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Value, Error> {
        let since = since.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let config = self.paged(page, page_size).param("since", format_time(since));
        self.fetch("/workouts/events", config).await
    }

    // Routine folders

    pub async fn get_routine_folders(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<RoutineFoldersPage, Error> {
        let res = self.fetch("/routine_folders", self.paged(page, page_size)).await?;
        decode(res)
    }

    pub async fn get_routine_folder(&self, folder_id: u64) -> Result<RoutineFolder, Error> {
        let path = format!("/routine_folders/{}", folder_id);
        decode(self.fetch(&path, self.read()).await?)
    }

    pub async fn create_routine_folder(
        &self,
        folder: &CreateRoutineFolderRequest,
    ) -> Result<CreateRoutineFolderResponse, Error> {
        let body = json!({ "routine_folder": folder });
        decode(self.submit("/routine_folders", body, self.write(JSON)).await?)
    }

    // Exercise templates

    pub async fn get_exercise_templates(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ExerciseTemplatesPage, Error> {
        let res = self
            .fetch("/exercise_templates", self.paged(page, page_size))
            .await?;
        decode(res)
    }

    pub async fn get_exercise_template(
        &self,
        exercise_template_id: &str,
    ) -> Result<ExerciseTemplate, Error> {
        let path = format!("/exercise_templates/{}", exercise_template_id);
        decode(self.fetch(&path, self.read()).await?)
    }

    // Webhook subscription

    /// Current webhook subscription, or `None` when none is configured (404).
    pub async fn get_webhook_subscription(&self) -> Result<Option<Value>, Error> {
        let path = self.url("/webhook-subscription");
        match self.transport.fetch(&path, self.read()).await {
            Ok(v) => Ok(Some(v)),
            Err(TransportError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(normalize(e)),
        }
    }

    pub async fn create_webhook_subscription(
        &self,
        subscription: &WebhookSubscription,
    ) -> Result<(), Error> {
        let body = json!(subscription);
        self.submit("/webhook-subscription", body, self.write(ANY)).await?;
        Ok(())
    }

    pub async fn delete_webhook_subscription(&self) -> Result<(), Error> {
        let config = self.auth(RequestConfig::new().header("accept", ANY));
        self.remove("/webhook-subscription", config).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn auth(&self, config: RequestConfig) -> RequestConfig {
        config.header("api-key", self.api_key.as_str())
    }

    fn read(&self) -> RequestConfig {
        self.auth(RequestConfig::new().header("accept", JSON))
    }

    fn write(&self, accept: &str) -> RequestConfig {
        self.auth(RequestConfig::new().header("accept", accept))
            .header("Content-Type", JSON)
    }

    fn paged(&self, page: Option<u32>, page_size: Option<u32>) -> RequestConfig {
        self.read()
            .param("page", page.unwrap_or(DEFAULT_PAGE))
            .param("pageSize", page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    async fn fetch(&self, path: &str, config: RequestConfig) -> Result<Value, Error> {
        self.transport
            .fetch(&self.url(path), config)
            .await
            .map_err(normalize)
    }

    async fn submit(&self, path: &str, body: Value, config: RequestConfig) -> Result<Value, Error> {
        self.transport
            .submit(&self.url(path), body, config)
            .await
            .map_err(normalize)
    }

    async fn replace(&self, path: &str, body: Value, config: RequestConfig) -> Result<Value, Error> {
        self.transport
            .replace(&self.url(path), body, config)
            .await
            .map_err(normalize)
    }

    async fn remove(&self, path: &str, config: RequestConfig) -> Result<Value, Error> {
        self.transport
            .remove(&self.url(path), config)
            .await
            .map_err(normalize)
    }
}

impl<T> std::fmt::Debug for HevyClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HevyClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Responses with a status become `Error::Api`; anything else passes through.
fn normalize(err: TransportError) -> Error {
    match err {
        TransportError::Status { status, body } => ApiError::from_response(status, body).into(),
        other => Error::Transport(other),
    }
}

/// Non-negative integral JSON number, whether sent as `42` or `42.0`.
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, Error> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn fetch(&self, _: &str, _: RequestConfig) -> Result<Value, TransportError> {
            unreachable!()
        }
        async fn submit(&self, _: &str, _: Value, _: RequestConfig) -> Result<Value, TransportError> {
            unreachable!()
        }
        async fn replace(&self, _: &str, _: Value, _: RequestConfig) -> Result<Value, TransportError> {
            unreachable!()
        }
        async fn remove(&self, _: &str, _: RequestConfig) -> Result<Value, TransportError> {
            unreachable!()
        }
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(
            HevyClient::new(Unreachable, ""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HevyClient::new(Unreachable, "   "),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn base_path_trailing_slash_is_trimmed() {
        let client = HevyClient::with_base_path(Unreachable, "key", "http://localhost:8080/v1/").unwrap();
        assert_eq!(client.base_path(), "http://localhost:8080/v1");
        assert_eq!(client.url("/workouts"), "http://localhost:8080/v1/workouts");
    }

    #[test]
    fn write_config_carries_content_type_and_key() {
        let client = HevyClient::new(Unreachable, "key").unwrap();
        let config = client.write(ANY);
        assert_eq!(config.get_header("accept"), Some("*/*"));
        assert_eq!(config.get_header("api-key"), Some("key"));
        assert_eq!(config.get_header("content-type"), Some("application/json"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = HevyClient::new(Unreachable, "super-secret").unwrap();
        assert!(!format!("{:?}", client).contains("super-secret"));
    }

    #[test]
    fn count_accepts_whole_numbers_only() {
        assert_eq!(as_count(&json!(7)), Some(7));
        assert_eq!(as_count(&json!(7.0)), Some(7));
        assert_eq!(as_count(&json!(7.25)), None);
        assert_eq!(as_count(&json!(-3.0)), None);
        assert_eq!(as_count(&json!("7")), None);
    }

    #[test]
    fn normalize_keeps_network_errors() {
        let err = normalize(TransportError::Network("timed out".into()));
        assert!(matches!(err, Error::Transport(TransportError::Network(_))));
    }
}
