use super::{order::Order, result::ActionResult};
use async_trait::async_trait;

/// Brokerage operations the key dispatcher relies on.
///
/// Neither method returns an error: failed submissions are reported through
/// the [`ActionResult`], and an unavailable price is simply `None`.
#[async_trait]
pub trait TradingClient: Send + Sync {
    /// Exactly one request, no retries. Submitting twice places two orders.
    async fn submit_order(&self, order: &Order) -> ActionResult;
    async fn fetch_latest_price(&self, symbol: &str) -> Option<f64>;
}
