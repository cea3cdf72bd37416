use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::AuthServiceError;
use crate::identity::TokenHeader;
use crate::state::AppState;
use crate::usecase::profile::{
    DeleteAccountUseCase, GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
}

// ── GET /profile ──────────────────────────────────────────────────────────────

pub async fn get_profile(
    TokenHeader(token): TokenHeader,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AuthServiceError> {
    let usecase = GetProfileUseCase {
        tokens: state.token_repo(),
        users: state.user_repo(),
    };
    let user = usecase.execute(&token).await?;
    Ok(Json(ProfileResponse {
        username: user.username,
        email: user.email,
    }))
}

// ── PATCH /profile ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn update_profile(
    TokenHeader(token): TokenHeader,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AuthServiceError> {
    let usecase = UpdateProfileUseCase {
        tokens: state.token_repo(),
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            &token,
            UpdateProfileInput {
                username: body.username,
                email: body.email,
                password: body.password,
            },
        )
        .await?;
    Ok(Json(ProfileResponse {
        username: user.username,
        email: user.email,
    }))
}

// ── DELETE /profile ───────────────────────────────────────────────────────────

pub async fn delete_account(
    TokenHeader(token): TokenHeader,
    State(state): State<AppState>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = DeleteAccountUseCase {
        tokens: state.token_repo(),
        users: state.user_repo(),
    };
    usecase.execute(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
