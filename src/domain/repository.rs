#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{OtpCheck, PendingLoginSession, User, UserChanges};
use crate::error::AuthServiceError;

/// Repository for user identity and credentials.
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, user: &User) -> Result<(), AuthServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError>;

    /// Apply only the supplied fields. Returns the updated user, or `None`
    /// if the user no longer exists. A conflicting email change fails with
    /// `DuplicateEmail`.
    async fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, AuthServiceError>;

    /// Remove the user. Returns `false` if already absent.
    async fn delete(&self, id: Uuid) -> Result<bool, AuthServiceError>;
}

/// Short-lived keyed store for one-time passcodes, one live record per email.
pub trait OtpCache: Send + Sync {
    /// Generate and store a fresh code for `email`, overwriting any prior
    /// record (last-write-wins — only the most recent code is valid).
    /// Returns the code for delivery and session binding.
    async fn issue(&self, email: &str, now: i64) -> Result<String, AuthServiceError>;

    /// Check `candidate` against the stored record. The record is consumed
    /// on `Ok` and `Expired` (single-use); a `Mismatch` leaves it in place
    /// so the caller may retry within the window.
    async fn verify(
        &self,
        email: &str,
        candidate: &str,
        now: i64,
    ) -> Result<OtpCheck, AuthServiceError>;
}

/// Store for pending-login sessions keyed by opaque session id.
pub trait SessionStore: Send + Sync {
    async fn put(
        &self,
        session_id: &str,
        session: &PendingLoginSession,
    ) -> Result<(), AuthServiceError>;

    async fn get(&self, session_id: &str)
    -> Result<Option<PendingLoginSession>, AuthServiceError>;

    async fn remove(&self, session_id: &str) -> Result<(), AuthServiceError>;
}

/// Durable one-token-per-user issuer.
pub trait TokenRepository: Send + Sync {
    /// Atomic get-or-create: persist `candidate` for `user_id` unless a
    /// token already exists, and return whichever token is now durable.
    /// Racing calls for the same user must converge on one token.
    async fn issue_or_get(
        &self,
        user_id: Uuid,
        candidate: &str,
    ) -> Result<String, AuthServiceError>;

    /// Reverse lookup for authenticating subsequent requests.
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AuthServiceError>;

    /// Drop any token held by `user_id` (account deletion cascade).
    async fn revoke_for_user(&self, user_id: Uuid) -> Result<(), AuthServiceError>;
}

/// Out-of-band delivery collaborator. Implementations must not block the
/// login path on delivery latency.
pub trait NotificationPort: Send + Sync {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), AuthServiceError>;
}
