//! `SeaORM`-backed order sink.
//!
//! Persists each submitted order as one row in the `orders` table: the
//! commonly queried fields as columns, the complete snapshot as JSON. When a
//! webhook notifier is configured, the persisted order is forwarded
//! best-effort after the insert; a forwarding failure never fails the
//! submission.

use crate::core::order::Order;
use crate::entities::{order, OrderColumn, OrderRecord, OrderRecordModel};
use crate::sink::{OrderReceipt, OrderSink, SinkError, WebhookNotifier};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};

fn classify_db_error(err: &DbErr) -> SinkError {
    match err {
        // Connection-level problems may clear up; the caller can offer a
        // retry. Everything else (constraint, query, type errors) will not.
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => SinkError::Transient {
            message: err.to_string(),
        },
        _ => SinkError::Permanent {
            message: err.to_string(),
        },
    }
}

/// Order sink writing to the `orders` table, with optional webhook
/// forwarding.
pub struct DatabaseSink {
    db: DatabaseConnection,
    notifier: Option<WebhookNotifier>,
}

impl DatabaseSink {
    /// Creates a sink without webhook forwarding.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db, notifier: None }
    }

    /// Creates a sink that forwards persisted orders to a webhook.
    #[must_use]
    pub const fn with_notifier(db: DatabaseConnection, notifier: WebhookNotifier) -> Self {
        Self {
            db,
            notifier: Some(notifier),
        }
    }
}

#[async_trait]
impl OrderSink for DatabaseSink {
    async fn submit(
        &self,
        order: &Order,
        session_id: &str,
    ) -> std::result::Result<OrderReceipt, SinkError> {
        let payload = serde_json::to_string(order).map_err(|e| SinkError::Permanent {
            message: format!("order payload failed to serialize: {e}"),
        })?;

        let record = order::ActiveModel {
            session_id: Set(session_id.to_string()),
            customer_name: Set(order.contact.name.clone()),
            email: Set(order.contact.email.clone()),
            package_id: Set(order.package_id.clone()),
            package_name: Set(order.package_name.clone()),
            attendee_count: Set(i32::try_from(order.attendee_count).unwrap_or(i32::MAX)),
            total_price: Set(order.total_price),
            status: Set(order.status.as_str().to_string()),
            payload: Set(payload),
            created_at: Set(order.created_at),
            ..Default::default()
        };

        let inserted = record
            .insert(&self.db)
            .await
            .map_err(|e| classify_db_error(&e))?;
        let order_id = inserted.id.to_string();
        info!(order_id = %order_id, session_id = %session_id, "order persisted");

        // Secondary channel is fire-and-forget: log and move on.
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.notify(order, &order_id, session_id).await {
                warn!(order_id = %order_id, error = %e, "webhook forwarding failed");
            }
        }

        Ok(OrderReceipt { order_id })
    }
}

/// Retrieves all orders submitted under a session, newest first.
///
/// # Errors
///
/// Returns [`Error::Database`](crate::errors::Error::Database) when the
/// query fails.
pub async fn orders_for_session(
    db: &DatabaseConnection,
    session_id: &str,
) -> crate::errors::Result<Vec<OrderRecordModel>> {
    OrderRecord::find()
        .filter(OrderColumn::SessionId.eq(session_id))
        .order_by_desc(OrderColumn::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
