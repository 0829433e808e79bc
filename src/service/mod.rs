use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::{AmountRequest, Stock, StockDto};

/// The five calls the console makes against the inventory backend.
///
/// Every method issues exactly one request and reports failures as a
/// normalized [`ApiError`]. Nothing is retried.
#[async_trait]
pub trait StockApi: Send + Sync {
    async fn get_stock_by_product_id(&self, product_id: i64) -> Result<Stock, ApiError>;

    async fn increase_stock(&self, product_id: i64, amount: i64) -> Result<Stock, ApiError>;

    async fn decrease_stock(&self, product_id: i64, amount: i64) -> Result<Stock, ApiError>;

    async fn get_low_stock_report(&self) -> Result<Vec<Stock>, ApiError>;

    /// Returns the backend's confirmation text.
    async fn save_stock(&self, dto: &StockDto) -> Result<String, ApiError>;
}

/// `reqwest`-backed client for the `/api/stock` endpoints.
#[derive(Clone)]
pub struct StockService {
    client: Client,
    base_url: String,
}

impl StockService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send the request and return the status plus raw body, or a normalized
    /// error for transport failures and non-success statuses.
    async fn execute(&self, req: RequestBuilder) -> Result<(u16, String), ApiError> {
        let resp = req.send().await.map_err(|e| {
            warn!(error = %e, "Inventory service unreachable");
            ApiError::transport(&e)
        })?;

        let status_code = resp.status();
        let status = status_code.as_u16();
        let body = resp.text().await.map_err(|e| {
            ApiError::normalize(Some(status), Value::Null, Some(&e.to_string()))
        })?;

        if !(200..300).contains(&status) {
            let err = ApiError::from_response(status, status_code.canonical_reason(), &body);
            debug!(status, message = %err.message, "Inventory service returned an error");
            return Err(err);
        }

        Ok((status, body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.execute(req).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(status, &e))
    }
}

#[async_trait]
impl StockApi for StockService {
    async fn get_stock_by_product_id(&self, product_id: i64) -> Result<Stock, ApiError> {
        let url = self.url(&product_id.to_string());
        debug!(url = %url, "Calling API");
        self.fetch_json(self.client.get(&url)).await
    }

    async fn increase_stock(&self, product_id: i64, amount: i64) -> Result<Stock, ApiError> {
        let url = self.url(&format!("{}/increase", product_id));
        debug!(url = %url, amount, "Calling API");
        self.fetch_json(self.client.put(&url).json(&AmountRequest { amount }))
            .await
    }

    async fn decrease_stock(&self, product_id: i64, amount: i64) -> Result<Stock, ApiError> {
        let url = self.url(&format!("{}/decrease", product_id));
        debug!(url = %url, amount, "Calling API");
        self.fetch_json(self.client.put(&url).json(&AmountRequest { amount }))
            .await
    }

    async fn get_low_stock_report(&self) -> Result<Vec<Stock>, ApiError> {
        let url = self.url("low-stock-report");
        debug!(url = %url, "Calling API");
        self.fetch_json(self.client.get(&url)).await
    }

    async fn save_stock(&self, dto: &StockDto) -> Result<String, ApiError> {
        let url = self.url("save");
        debug!(url = %url, product_id = dto.product_id, "Calling API");
        let (_, body) = self.execute(self.client.post(&url).json(dto)).await?;

        // Backends answer either a JSON string or plain text.
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }
}
