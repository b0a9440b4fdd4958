//! Order sink boundary - where a finished [`Order`](crate::core::order::Order)
//! leaves the engine.
//!
//! The engine builds orders; a sink delivers them. Failures are reported as
//! transient or permanent so the caller can decide whether to offer a retry.
//! The engine itself never retries and never interprets sink failures.

/// `SeaORM`-backed persistence sink
pub mod database;
/// Fire-and-forget webhook forwarding
pub mod webhook;

pub use database::DatabaseSink;
pub use webhook::WebhookNotifier;

use crate::core::order::Order;
use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure, classified for the caller's retry decision.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Delivery failed for a reason that may clear up on its own
    /// (connection loss, timeout). Worth offering the user a retry.
    #[error("transient delivery failure: {message}")]
    Transient {
        /// Underlying cause
        message: String,
    },

    /// Delivery failed for a reason a retry will not fix.
    #[error("permanent delivery failure: {message}")]
    Permanent {
        /// Underlying cause
        message: String,
    },
}

impl SinkError {
    /// Whether resubmitting the same order may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Confirmation that an order was accepted by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Sink-assigned order identifier
    pub order_id: String,
}

/// Destination for built orders.
///
/// Implementations persist the order exactly once per call; any secondary
/// delivery channel (notification webhook) is best-effort and must not fail
/// the primary persistence.
#[async_trait]
pub trait OrderSink {
    /// Delivers an order under a caller-supplied session identifier.
    async fn submit(
        &self,
        order: &Order,
        session_id: &str,
    ) -> std::result::Result<OrderReceipt, SinkError>;
}
