use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub uid: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

/// POST /api/auth/sign-up
///
/// Creates the profile record for an account the identity provider already
/// registered. Refuses to overwrite an existing profile.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthOutcome>), AppError> {
    let uid = request.uid.trim();
    let name = request.name.trim();
    let email = request.email.trim();

    if uid.is_empty() || name.is_empty() {
        return Err(AppError::Validation(
            "uid and name cannot be empty".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(format!("'{email}' is not an email address")));
    }

    let user = User {
        id: uid.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    };

    if !state.users.create(&user).await? {
        return Ok((
            StatusCode::CONFLICT,
            Json(AuthOutcome {
                success: false,
                message: "User already exists. Please sign in instead.".to_string(),
            }),
        ));
    }

    info!("Created profile for user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(AuthOutcome {
            success: true,
            message: "Account created successfully. Please sign in.".to_string(),
        }),
    ))
}

/// GET /api/auth/me
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
