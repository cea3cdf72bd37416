use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_email, validate_password, validate_username};
use crate::error::AuthServiceError;
use crate::password::hash_password;

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<Uuid, AuthServiceError> {
        if !validate_username(&input.username) {
            return Err(AuthServiceError::Validation(
                "username must be 1 to 150 characters",
            ));
        }
        if !validate_email(&input.email) {
            return Err(AuthServiceError::Validation("invalid email address"));
        }
        if !validate_password(&input.password) {
            return Err(AuthServiceError::Validation(
                "password must be at least 8 characters",
            ));
        }

        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            created_at: Utc::now(),
        };
        // The unique constraint on email is the authority; the repo maps a
        // violation to DuplicateEmail so racing registrations stay correct.
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user.id)
    }
}
