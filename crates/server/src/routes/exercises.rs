//! Exercise route handlers.
//!
//! Both endpoints are keyed by the user's `_id` path segment, and both echo
//! the user's ID (not the exercise's) back as `_id`.

use axum::{
    Form, Json,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use exercise_tracker_core::UserId;

use crate::error::{AppError, Result};
use crate::models::Exercise;
use crate::services::ExerciseInput;
use crate::state::AppState;

/// Log exercise form data.
///
/// Everything arrives as text; the tracker service does the parsing so that
/// bad values produce the same error body as any other validation failure.
#[derive(Debug, Deserialize)]
pub struct CreateExerciseForm {
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

/// Exercise log query parameters.
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Response to a logged exercise: the user plus the new entry.
#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub user_id: UserId,
    pub username: String,
    pub date: String,
    pub duration: i32,
    pub description: String,
}

/// One entry of a user's log.
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i32,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description.into_inner(),
            duration: exercise.duration.minutes(),
            date: exercise.date.to_date_string(),
        }
    }
}

/// A user's filtered exercise log.
#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub user_id: UserId,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

/// Log an exercise for a user.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    form: std::result::Result<Form<CreateExerciseForm>, FormRejection>,
) -> Result<Json<ExerciseResponse>> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            // an unknown user outranks a malformed body
            state.tracker().get_user(&user_id).await?;
            return Err(AppError::BadRequest(rejection.body_text()));
        }
    };

    let input = ExerciseInput {
        description: form.description.as_deref(),
        duration: form.duration.as_deref(),
        date: form.date.as_deref(),
    };
    let (user, exercise) = state.tracker().log_exercise(&user_id, input).await?;

    Ok(Json(ExerciseResponse {
        user_id: user.id,
        username: user.username.into_inner(),
        date: exercise.date.to_date_string(),
        duration: exercise.duration.minutes(),
        description: exercise.description.into_inner(),
    }))
}

/// Fetch a user's exercise log.
#[instrument(skip(state, query))]
pub async fn log(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: std::result::Result<Query<LogQuery>, QueryRejection>,
) -> Result<Json<LogResponse>> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            state.tracker().get_user(&user_id).await?;
            return Err(AppError::BadRequest(rejection.body_text()));
        }
    };

    let (user, exercises) = state
        .tracker()
        .exercise_log(
            &user_id,
            query.from.as_deref(),
            query.to.as_deref(),
            query.limit.as_deref(),
        )
        .await?;

    let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();

    Ok(Json(LogResponse {
        user_id: user.id,
        username: user.username.into_inner(),
        count: log.len(),
        log,
    }))
}
