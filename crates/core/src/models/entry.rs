use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The membership relation between a user and a catalog stock.
///
/// Composite identity = `(user_id, stock_id)`; no quantity, no
/// timestamp — this records that a user holds a symbol, nothing more.
/// Explicit foreign keys only: joins back to `StockRecord` happen at
/// the point of use, never through embedded object references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Opaque user identifier, owned by the external identity subsystem
    pub user_id: String,

    /// Surrogate id of the held `StockRecord`
    pub stock_id: Uuid,
}

impl PortfolioEntry {
    pub fn new(user_id: impl Into<String>, stock_id: Uuid) -> Self {
        Self {
            user_id: user_id.into(),
            stock_id,
        }
    }
}
