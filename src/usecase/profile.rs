use uuid::Uuid;

use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::types::{User, UserChanges, validate_email, validate_password, validate_username};
use crate::error::AuthServiceError;
use crate::password::hash_password;

async fn authenticate<T: TokenRepository>(
    tokens: &T,
    token: &str,
) -> Result<Uuid, AuthServiceError> {
    tokens
        .resolve(token)
        .await?
        .ok_or(AuthServiceError::Unauthenticated)
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<T: TokenRepository, U: UserRepository> {
    pub tokens: T,
    pub users: U,
}

impl<T: TokenRepository, U: UserRepository> GetProfileUseCase<T, U> {
    pub async fn execute(&self, token: &str) -> Result<User, AuthServiceError> {
        let user_id = authenticate(&self.tokens, token).await?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateProfileUseCase<T: TokenRepository, U: UserRepository> {
    pub tokens: T,
    pub users: U,
}

impl<T: TokenRepository, U: UserRepository> UpdateProfileUseCase<T, U> {
    pub async fn execute(
        &self,
        token: &str,
        input: UpdateProfileInput,
    ) -> Result<User, AuthServiceError> {
        let user_id = authenticate(&self.tokens, token).await?;

        if let Some(ref username) = input.username {
            if !validate_username(username) {
                return Err(AuthServiceError::Validation(
                    "username must be 1 to 150 characters",
                ));
            }
        }
        if let Some(ref email) = input.email {
            if !validate_email(email) {
                return Err(AuthServiceError::Validation("invalid email address"));
            }
        }
        let password_hash = match input.password {
            Some(ref password) => {
                if !validate_password(password) {
                    return Err(AuthServiceError::Validation(
                        "password must be at least 8 characters",
                    ));
                }
                Some(hash_password(password)?)
            }
            None => None,
        };

        let changes = UserChanges {
            username: input.username,
            email: input.email,
            password_hash,
        };
        if changes.is_empty() {
            return Err(AuthServiceError::Validation("no fields to update"));
        }

        self.users
            .update(user_id, &changes)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<T: TokenRepository, U: UserRepository> {
    pub tokens: T,
    pub users: U,
}

impl<T: TokenRepository, U: UserRepository> DeleteAccountUseCase<T, U> {
    pub async fn execute(&self, token: &str) -> Result<(), AuthServiceError> {
        let user_id = authenticate(&self.tokens, token).await?;
        if !self.users.delete(user_id).await? {
            return Err(AuthServiceError::UserNotFound);
        }
        // The FK cascade drops the row too; revoking explicitly keeps
        // non-SQL token stores correct as well.
        self.tokens.revoke_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, "account deleted");
        Ok(())
    }
}
