use chrono::Utc;

use crate::domain::repository::{NotificationPort, OtpCache, SessionStore, UserRepository};
use crate::domain::types::{PendingLoginSession, generate_session_id};
use crate::error::AuthServiceError;
use crate::password::verify_password;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    /// Opaque id for the pending-login session, to be set as a cookie.
    pub session_id: String,
}

pub struct LoginUseCase<U, O, S, N>
where
    U: UserRepository,
    O: OtpCache,
    S: SessionStore,
    N: NotificationPort,
{
    pub users: U,
    pub otp_cache: O,
    pub sessions: S,
    pub notifier: N,
}

impl<U, O, S, N> LoginUseCase<U, O, S, N>
where
    U: UserRepository,
    O: OtpCache,
    S: SessionStore,
    N: NotificationPort,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AuthServiceError> {
        // Unknown email and wrong password collapse into one error so the
        // endpoint cannot be used to enumerate accounts.
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let code = self.otp_cache.issue(&user.email, now).await?;

        // The session must be durable before the response carries its id;
        // delivery is queued afterwards and never blocks the login path.
        let session_id = generate_session_id();
        let session = PendingLoginSession {
            user_id: user.id,
            otp: code.clone(),
        };
        self.sessions.put(&session_id, &session).await?;

        self.notifier.send_otp(&user.email, &code).await?;

        tracing::info!(user_id = %user.id, "otp issued, login pending verification");
        Ok(LoginOutput { session_id })
    }
}
