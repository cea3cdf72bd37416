use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::{OtpCache, SessionStore};
use crate::domain::types::{
    OTP_TTL_SECS, OtpCheck, OtpRecord, PendingLoginSession, SESSION_TTL_SECS, generate_otp,
};
use crate::error::AuthServiceError;

fn otp_key(email: &str) -> String {
    format!("otp:{}", email)
}

fn session_key(session_id: &str) -> String {
    format!("pending_login:{}", session_id)
}

// ── OTP cache ─────────────────────────────────────────────────────────────────

/// Per-email OTP store. The Redis TTL mirrors the validity window as memory
/// hygiene; correctness comes from the `issued_at` comparison in `verify`.
#[derive(Clone)]
pub struct RedisOtpCache {
    pub pool: Pool,
}

impl OtpCache for RedisOtpCache {
    async fn issue(&self, email: &str, now: i64) -> Result<String, AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let code = generate_otp();
        let record = OtpRecord {
            code: code.clone(),
            issued_at: now,
        };
        let payload = serde_json::to_string(&record)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        // SET overwrites any prior record: last-write-wins, at most one live
        // code per email.
        let (): () = conn
            .set_ex(otp_key(email), payload, OTP_TTL_SECS as u64)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AuthServiceError::Internal(e.into()))?;
        Ok(code)
    }

    async fn verify(
        &self,
        email: &str,
        candidate: &str,
        now: i64,
    ) -> Result<OtpCheck, AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let key = otp_key(email);
        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let Some(payload) = payload else {
            return Ok(OtpCheck::NotFound);
        };
        let record: OtpRecord = serde_json::from_str(&payload)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;

        let outcome = record.check(candidate, now);
        // Consume on Ok and Expired — a code can never be replayed once a
        // matching check reaches this path. A mismatch keeps the record so
        // the user may retry within the window.
        if matches!(outcome, OtpCheck::Ok | OtpCheck::Expired) {
            let (): () = conn
                .del(&key)
                .await
                .map_err(|e| AuthServiceError::Internal(e.into()))?;
        }
        Ok(outcome)
    }
}

// ── Pending-login session store ───────────────────────────────────────────────

#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
}

impl SessionStore for RedisSessionStore {
    async fn put(
        &self,
        session_id: &str,
        session: &PendingLoginSession,
    ) -> Result<(), AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let payload = serde_json::to_string(session)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(session_key(session_id), payload, SESSION_TTL_SECS)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AuthServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn get(
        &self,
        session_id: &str,
    ) -> Result<Option<PendingLoginSession>, AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let payload: Option<String> = conn
            .get(session_key(session_id))
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        match payload {
            Some(p) => Ok(Some(
                serde_json::from_str(&p).map_err(|e| AuthServiceError::Internal(e.into()))?,
            )),
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> Result<(), AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let (): () = conn
            .del(session_key(session_id))
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        Ok(())
    }
}
