use chrono::{DateTime, Utc};
use rand::RngExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identity with salted password hash (Argon2id PHC string).
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to a user record. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// One-time passcode record cached per email. `issued_at` is seconds since
/// epoch; validity is decided by timestamp comparison, never by cache
/// eviction timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    pub code: String,
    pub issued_at: i64,
}

/// Outcome of checking a candidate code against the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    Ok,
    Expired,
    Mismatch,
    NotFound,
}

impl OtpRecord {
    /// Check a candidate code at time `now`. Exact string comparison —
    /// leading zeros are significant. A record older than [`OTP_TTL_SECS`]
    /// is expired even if the store has not evicted it yet.
    pub fn check(&self, candidate: &str, now: i64) -> OtpCheck {
        if candidate != self.code {
            return OtpCheck::Mismatch;
        }
        if now - self.issued_at > OTP_TTL_SECS {
            return OtpCheck::Expired;
        }
        OtpCheck::Ok
    }
}

/// Server-side state binding a password-verified login flow to an identity.
/// Addressed by an opaque session id handed to the client as a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLoginSession {
    pub user_id: Uuid,
    /// The code issued for this flow. The cache stays authoritative at
    /// verify time; this copy is the session-to-code binding of record.
    pub otp: String,
}

/// OTP length in digits.
pub const OTP_LEN: usize = 6;

/// OTP validity window in seconds.
pub const OTP_TTL_SECS: i64 = 120;

/// Pending-login session TTL in seconds. Longer than the OTP window so an
/// aged code reports `OTP_EXPIRED` instead of `SESSION_MISSING`.
pub const SESSION_TTL_SECS: u64 = 300;

/// Bearer token length in hex characters.
pub const TOKEN_LEN: usize = 40;

/// Pending-login session id length in hex characters.
pub const SESSION_ID_LEN: usize = 32;

const HEX_CHARSET: &[u8] = b"0123456789abcdef";

fn random_hex(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| HEX_CHARSET[rng.random_range(0..HEX_CHARSET.len())] as char)
        .collect()
}

/// Generate a uniformly random 6-digit code, leading zeros preserved.
pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..1_000_000u32))
}

/// Generate an opaque bearer token.
pub fn generate_token() -> String {
    random_hex(TOKEN_LEN)
}

/// Generate an opaque pending-login session id.
pub fn generate_session_id() -> String {
    random_hex(SESSION_ID_LEN)
}

/// Minimal email shape check: non-empty local part and a dot-bearing domain.
pub fn validate_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

pub fn validate_username(username: &str) -> bool {
    !username.is_empty() && username.len() <= 150
}

pub fn validate_password(password: &str) -> bool {
    password.len() >= 8
}
