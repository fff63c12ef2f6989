use async_trait::async_trait;
use orderwatch_core::{Order, OrderDetails, OrderSnapshot};

use crate::ApiError;

/// Where orders and their task details come from.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    async fn fetch_order_details(&self, reference: &str) -> Result<OrderDetails, ApiError>;

    /// Every order paired with its details.
    ///
    /// A details failure for one order is logged and that order gets empty
    /// details; only a failed listing or lost authorization fails the call.
    async fn fetch_all(&self) -> Result<Vec<OrderSnapshot>, ApiError> {
        let orders = self.list_orders().await?;
        let mut snapshots = Vec::with_capacity(orders.len());
        for order in orders {
            let details = match self.fetch_order_details(&order.reference_number).await {
                Ok(details) => details,
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                Err(e) => {
                    tracing::warn!(
                        reference = %order.reference_number,
                        error = %e,
                        "failed to fetch order details"
                    );
                    OrderDetails::default()
                }
            };
            snapshots.push(OrderSnapshot::new(order, details));
        }
        Ok(snapshots)
    }
}
