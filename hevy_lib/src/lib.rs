//! Hevy API client library.
//!
//! Provides a typed client for the Hevy fitness REST API: workouts, routine
//! folders, exercise templates, and the webhook subscription. The client talks
//! to the network through the [`Transport`] trait; [`ReqwestTransport`] is the
//! default implementation.

pub mod client;
pub mod error;
pub mod helpers;
pub mod http;
pub mod models;
pub mod transport;

pub use client::{HevyClient, API_BASE, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use error::{ApiError, ConfigError, Error, TransportError};
pub use helpers::{get_api_key, ApiKeySource};
pub use http::ReqwestTransport;
pub use models::{
    CreateRoutineFolderRequest, CreateRoutineFolderResponse, ExerciseTemplate,
    ExerciseTemplatesPage, RoutineFolder, RoutineFoldersPage, WebhookSubscription, Workout,
    WorkoutExercise, WorkoutSet,
};
pub use transport::{RequestConfig, Transport};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
