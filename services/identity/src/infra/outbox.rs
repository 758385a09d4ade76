use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::json;
use uuid::Uuid;

use shutterbox_identity_schema::outbox_events;

use crate::domain::repository::Notifier;
use crate::error::IdentityError;

/// Outbox-backed notifier: appends an event row for the mail relay
/// instead of talking to a mail server inline. Delivery retries, backoff
/// and failure tracking belong to the relay, not this service.
#[derive(Clone)]
pub struct OutboxNotifier {
    pub db: DatabaseConnection,
}

impl OutboxNotifier {
    async fn enqueue(
        &self,
        kind: &str,
        idempotency_key: String,
        payload: serde_json::Value,
    ) -> Result<(), IdentityError> {
        let now = Utc::now();
        outbox_events::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind.to_owned()),
            payload: Set(payload),
            idempotency_key: Set(idempotency_key),
            attempts: Set(0),
            last_error: Set(None),
            created_at: Set(now),
            next_attempt_at: Set(now),
            processed_at: Set(None),
            failed_at: Set(None),
        }
        .insert(&self.db)
        .await
        .context("enqueue outbox event")?;
        Ok(())
    }
}

impl Notifier for OutboxNotifier {
    async fn send_verification_code(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), IdentityError> {
        self.enqueue(
            "verification_code_issued",
            format!("verification_code_issued:{email}:{code}"),
            json!({ "email": email, "username": username, "code": code }),
        )
        .await
    }

    async fn send_reset_link(
        &self,
        email: &str,
        username: &str,
        token: &str,
    ) -> Result<(), IdentityError> {
        self.enqueue(
            "password_reset_requested",
            format!("password_reset_requested:{email}:{token}"),
            json!({ "email": email, "username": username, "token": token }),
        )
        .await
    }
}
