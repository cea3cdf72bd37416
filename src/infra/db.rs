use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    SqlErr, sea_query::OnConflict,
};
use uuid::Uuid;

use gatekey_schema::{auth_tokens, users};

use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::types::{User, UserChanges};
use crate::error::AuthServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &User) -> Result<(), AuthServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(map_unique_violation(e, "create user")),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, AuthServiceError> {
        let Some(model) = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("load user for update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = model.into();
        if let Some(ref username) = changes.username {
            active.username = Set(username.clone());
        }
        if let Some(ref email) = changes.email {
            active.email = Set(email.clone());
        }
        if let Some(ref password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash.clone());
        }

        match active.update(&self.db).await {
            Ok(updated) => Ok(Some(user_from_model(updated))),
            Err(e) => Err(map_unique_violation(e, "update user")),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AuthServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn map_unique_violation(e: sea_orm::DbErr, op: &'static str) -> AuthServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthServiceError::DuplicateEmail,
        _ => AuthServiceError::Internal(anyhow::Error::new(e).context(op)),
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Token repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTokenRepository {
    pub db: DatabaseConnection,
}

impl TokenRepository for DbTokenRepository {
    async fn issue_or_get(
        &self,
        user_id: Uuid,
        candidate: &str,
    ) -> Result<String, AuthServiceError> {
        // Insert-or-ignore against the unique user_id constraint, then read
        // back whichever row won. Racing verifications for the same user
        // both land on the single durable token.
        let active = auth_tokens::ActiveModel {
            token: Set(candidate.to_owned()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        };
        auth_tokens::Entity::insert(active)
            .on_conflict(
                OnConflict::column(auth_tokens::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert auth token")?;

        let model = auth_tokens::Entity::find()
            .filter(auth_tokens::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("load auth token")?;
        match model {
            Some(m) => Ok(m.token),
            None => Err(AuthServiceError::Internal(anyhow::anyhow!(
                "auth token row missing after upsert"
            ))),
        }
    }

    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AuthServiceError> {
        let model = auth_tokens::Entity::find_by_id(token.to_owned())
            .one(&self.db)
            .await
            .context("resolve auth token")?;
        Ok(model.map(|m| m.user_id))
    }

    async fn revoke_for_user(&self, user_id: Uuid) -> Result<(), AuthServiceError> {
        auth_tokens::Entity::delete_many()
            .filter(auth_tokens::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("revoke auth token")?;
        Ok(())
    }
}
