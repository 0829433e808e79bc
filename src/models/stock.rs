use serde::{Deserialize, Serialize};

/// Inventory record as the backend reports it.
///
/// The client never mutates these fields directly; a new `Stock` arrives with
/// every read, increase and decrease response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "productID")]
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "reorderLevel")]
    pub reorder_level: i64,
}

impl Stock {
    /// True when the quantity has fallen to or below the reorder threshold.
    pub fn is_low(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Row key for the low-stock table.
pub fn track_by_product_id(_index: usize, item: &Stock) -> i64 {
    item.product_id
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDto {
    #[serde(rename = "productID")]
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
}

/// Body of the increase / decrease calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: i64,
}
