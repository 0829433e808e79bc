pub mod stock;

pub use stock::{track_by_product_id, AmountRequest, Stock, StockDto};
