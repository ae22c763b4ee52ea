//! User route handlers.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use exercise_tracker_core::UserId;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::state::AppState;

/// Create user form data.
#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub username: Option<String>,
}

/// A user as rendered by the API.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.into_inner(),
        }
    }
}

/// Register a new user.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    form: std::result::Result<Form<CreateUserForm>, FormRejection>,
) -> Result<Json<UserResponse>> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let user = state
        .tracker()
        .register_user(form.username.as_deref())
        .await?;

    Ok(Json(user.into()))
}

/// List all users in registration order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.tracker().list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
