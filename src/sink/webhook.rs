//! Fire-and-forget webhook forwarding.
//!
//! After an order is persisted, its payload can be forwarded to an external
//! automation endpoint (e.g. an n8n workflow that notifies the caterer).
//! Forwarding is best-effort: the database sink logs a failure and moves on.

use crate::core::order::Order;
use crate::sink::SinkError;
use serde_json::{json, Value};
use std::time::Duration;

/// Builds the JSON body posted to the webhook: the full order snapshot plus
/// the sink-assigned order id and the submitting session.
///
/// # Errors
///
/// [`SinkError::Permanent`] if the order fails to serialize, which indicates
/// a bug rather than a delivery problem.
pub fn webhook_payload(
    order: &Order,
    order_id: &str,
    session_id: &str,
) -> Result<Value, SinkError> {
    let mut body = serde_json::to_value(order).map_err(|e| SinkError::Permanent {
        message: format!("order payload failed to serialize: {e}"),
    })?;
    if let Value::Object(map) = &mut body {
        map.insert("order_id".to_string(), json!(order_id));
        map.insert("session_id".to_string(), json!(session_id));
    }
    Ok(body)
}

/// Posts order payloads to a configured webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Creates a notifier for the given endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Creates a notifier from the `WEBHOOK_URL` environment variable, when
    /// set and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
    }

    /// Endpoint this notifier posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts an order to the webhook.
    ///
    /// # Errors
    ///
    /// Connection-level failures and timeouts come back as
    /// [`SinkError::Transient`], non-success HTTP statuses as
    /// [`SinkError::Permanent`]. Callers treat both as log-and-continue.
    pub async fn notify(
        &self,
        order: &Order,
        order_id: &str,
        session_id: &str,
    ) -> Result<(), SinkError> {
        let body = webhook_payload(order, order_id, session_id)?;

        let response = self
            .client
            .post(&self.url)
            .timeout(Duration::from_secs(10))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SinkError::Transient {
                        message: format!("webhook unreachable: {e}"),
                    }
                } else {
                    SinkError::Permanent {
                        message: format!("webhook request failed: {e}"),
                    }
                }
            })?;

        response
            .error_for_status()
            .map_err(|e| SinkError::Permanent {
                message: format!("webhook rejected payload: {e}"),
            })?;

        Ok(())
    }
}
