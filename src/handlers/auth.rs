use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::cookie::{PENDING_LOGIN, clear_pending_login_cookie, set_pending_login_cookie};
use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::register::{RegisterInput, RegisterUseCase};
use crate::usecase::verify::{VerifyOtpInput, VerifyOtpUseCase};

// ── POST /register ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}

// ── POST /login ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        otp_cache: state.otp_cache(),
        sessions: state.session_store(),
        notifier: state.notifier(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_pending_login_cookie(jar, out.session_id, state.cookie_domain.clone());
    Ok((
        StatusCode::OK,
        jar,
        Json(MessageResponse {
            message: "OTP sent successfully",
        }),
    ))
}

// ── POST /verify ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub otp: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub token: String,
}

pub async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let session_id = jar
        .get(PENDING_LOGIN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::SessionMissing)?;

    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otp_cache: state.otp_cache(),
        sessions: state.session_store(),
        tokens: state.token_repo(),
    };
    let out = usecase
        .execute(VerifyOtpInput {
            session_id,
            otp: body.otp,
        })
        .await?;

    let jar = clear_pending_login_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::OK, jar, Json(VerifyResponse { token: out.token })))
}
