//! Asynchronous OTP delivery.
//!
//! The login path only enqueues; a background worker drains the queue and
//! hands each message to the external notification collaborator over HTTP.
//! Delivery failures are logged and dropped — the core never retries, the
//! user restarts from login instead.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::domain::repository::NotificationPort;
use crate::error::AuthServiceError;

#[derive(Debug)]
pub struct OtpMessage {
    pub email: String,
    pub code: String,
}

/// `NotificationPort` implementation backed by the delivery queue. Sending
/// is a non-blocking channel push.
#[derive(Clone)]
pub struct QueueNotifier {
    pub tx: UnboundedSender<OtpMessage>,
}

impl NotificationPort for QueueNotifier {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), AuthServiceError> {
        self.tx
            .send(OtpMessage {
                email: email.to_owned(),
                code: code.to_owned(),
            })
            .map_err(|_| {
                AuthServiceError::Internal(anyhow::anyhow!("notification worker unavailable"))
            })
    }
}

/// Client for the notification collaborator's send endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    async fn deliver(&self, msg: &OtpMessage) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "to": msg.email,
            "subject": "OTP for your login",
            "body": format!(
                "OTP for your login is: {}. This OTP is valid only for 2 minutes.",
                msg.code
            ),
        });
        self.client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Drain the delivery queue until every sender is dropped.
pub async fn run_worker(mut rx: UnboundedReceiver<OtpMessage>, mailer: HttpMailer) {
    while let Some(msg) = rx.recv().await {
        if let Err(e) = mailer.deliver(&msg).await {
            tracing::warn!(error = %e, email = %msg.email, "failed to deliver otp");
        }
    }
}
