//! Request and response records for the Hevy API.
//!
//! Field names match the wire format; the client never renames or reshapes them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workout as sent to `POST /workouts` and `PUT /workouts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub title: String,
    pub description: String,
    /// ISO 8601 timestamp.
    pub start_time: String,
    /// ISO 8601 timestamp.
    pub end_time: String,
    pub is_private: bool,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub exercise_template_id: String,
    pub superset_id: Option<i64>,
    pub notes: String,
    pub sets: Vec<WorkoutSet>,
}

/// One set within an exercise. Numeric fields are independently nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Set type tag, e.g. `normal`, `warmup`, `dropset`, `failure`.
    #[serde(rename = "type")]
    pub set_type: String,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub custom_metric: Value,
    pub rpe: Option<f64>,
}

/// Response records keep fields this crate does not model in `extra`, so
/// re-serializing one yields everything the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineFolder {
    pub id: u64,
    pub index: Option<i64>,
    pub title: String,
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineFoldersPage {
    pub page: u32,
    pub page_count: u32,
    pub routine_folders: Vec<RoutineFolder>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoutineFolderRequest {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoutineFolderResponse {
    pub routine_folder: RoutineFolder,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Built-in and custom templates differ in which descriptive fields they
/// carry, so everything past `id`, `title` and `type` may be null or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub primary_muscle_group: Option<String>,
    pub secondary_muscle_groups: Option<Vec<String>>,
    pub equipment: Option<String>,
    pub is_custom: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplatesPage {
    pub page: u32,
    pub page_count: u32,
    pub exercise_templates: Vec<ExerciseTemplate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /webhook-subscription`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    pub url: String,
    #[serde(rename = "authToken")]
    pub auth_token: String,
}
