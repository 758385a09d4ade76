use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    SqlErr, sea_query::Expr,
};

use shutterbox_identity_schema::{sessions, users};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::{NewUser, Session, User};
use crate::error::IdentityError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, IdentityError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, IdentityError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, IdentityError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_verified: Set(false),
            verification_code: Set(Some(user.verification_code.clone())),
            verification_expiry: Set(Some(user.verification_expiry)),
            reset_token: Set(None),
            reset_expiry: Set(None),
            receive_notifications: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // The unique constraints are the arbiter when two registrations race.
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                IdentityError::Conflict("username or email already registered")
            }
            _ => IdentityError::Internal(anyhow::Error::new(e).context("create user")),
        })?;
        Ok(user_from_model(model))
    }

    async fn consume_verification(&self, email: &str, code: &str) -> Result<bool, IdentityError> {
        let now = Utc::now();
        let result = users::Entity::update_many()
            .col_expr(users::Column::IsVerified, Expr::value(true))
            .col_expr(
                users::Column::VerificationCode,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                users::Column::VerificationExpiry,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::IsVerified.eq(false))
            .filter(users::Column::VerificationCode.eq(code))
            .filter(users::Column::VerificationExpiry.gt(now))
            .exec(&self.db)
            .await
            .context("consume verification code")?;
        Ok(result.rows_affected == 1)
    }

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), IdentityError> {
        let now = Utc::now();
        users::Entity::update_many()
            .col_expr(users::Column::ResetToken, Expr::value(Some(token.to_owned())))
            .col_expr(users::Column::ResetExpiry, Expr::value(Some(expiry)))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("set reset token")?;
        Ok(())
    }

    async fn consume_reset(&self, token: &str, new_hash: &str) -> Result<bool, IdentityError> {
        let now = Utc::now();
        let result = users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(new_hash))
            .col_expr(users::Column::ResetToken, Expr::value(Option::<String>::None))
            .col_expr(
                users::Column::ResetExpiry,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::ResetToken.eq(token))
            .filter(users::Column::ResetExpiry.gt(now))
            .exec(&self.db)
            .await
            .context("consume reset token")?;
        Ok(result.rows_affected == 1)
    }

    async fn update_password_hash(&self, id: i32, new_hash: &str) -> Result<(), IdentityError> {
        let now = Utc::now();
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(new_hash.to_owned()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, IdentityError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        is_verified: model.is_verified,
        verification_code: model.verification_code,
        verification_expiry: model.verification_expiry,
        reset_token: model.reset_token,
        reset_expiry: model.reset_expiry,
        receive_notifications: model.receive_notifications,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Session repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), IdentityError> {
        sessions::ActiveModel {
            id: Set(session.id.clone()),
            user_id: Set(session.user_id),
            csrf_token: Set(session.csrf_token.clone()),
            created_at: Set(session.created_at),
            last_accessed: Set(session.last_accessed),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, IdentityError> {
        let model = sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find session by id")?;
        Ok(model.map(session_from_model))
    }

    async fn touch(&self, id: &str) -> Result<(), IdentityError> {
        // update_many so a concurrent logout between find and touch is a
        // no-op instead of an error.
        let now = Utc::now();
        sessions::Entity::update_many()
            .col_expr(sessions::Column::LastAccessed, Expr::value(now))
            .filter(sessions::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("touch session")?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, IdentityError> {
        let result = sessions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_idle_since(&self, cutoff: DateTime<Utc>) -> Result<u64, IdentityError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::LastAccessed.lt(cutoff))
            .exec(&self.db)
            .await
            .context("sweep idle sessions")?;
        Ok(result.rows_affected)
    }
}

fn session_from_model(model: sessions::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        csrf_token: model.csrf_token,
        created_at: model.created_at,
        last_accessed: model.last_accessed,
    }
}
