use chrono::Utc;

use crate::domain::repository::{OtpCache, SessionStore, TokenRepository, UserRepository};
use crate::domain::types::{OtpCheck, generate_token};
use crate::error::AuthServiceError;

pub struct VerifyOtpInput {
    pub session_id: String,
    pub otp: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub token: String,
}

pub struct VerifyOtpUseCase<U, O, S, T>
where
    U: UserRepository,
    O: OtpCache,
    S: SessionStore,
    T: TokenRepository,
{
    pub users: U,
    pub otp_cache: O,
    pub sessions: S,
    pub tokens: T,
}

impl<U, O, S, T> VerifyOtpUseCase<U, O, S, T>
where
    U: UserRepository,
    O: OtpCache,
    S: SessionStore,
    T: TokenRepository,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, AuthServiceError> {
        let session = self
            .sessions
            .get(&input.session_id)
            .await?
            .ok_or(AuthServiceError::SessionMissing)?;

        // The account may have been deleted between login and verification.
        let user = self
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let now = Utc::now().timestamp();
        match self.otp_cache.verify(&user.email, &input.otp, now).await? {
            OtpCheck::NotFound => return Err(AuthServiceError::OtpNotGenerated),
            OtpCheck::Expired => return Err(AuthServiceError::OtpExpired),
            OtpCheck::Mismatch => return Err(AuthServiceError::InvalidOtp),
            OtpCheck::Ok => {}
        }

        // Idempotent issuance: if a token already exists for this user the
        // candidate is discarded and the stored one is returned.
        let token = self.tokens.issue_or_get(user.id, &generate_token()).await?;
        self.sessions.remove(&input.session_id).await?;

        tracing::info!(user_id = %user.id, "otp verified, token issued");
        Ok(VerifyOtpOutput { token })
    }
}
