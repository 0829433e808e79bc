//! In-process stand-in for the inventory backend, bound to an ephemeral port.

use std::collections::{BTreeMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::models::{AmountRequest, Stock, StockDto};
use crate::service::StockService;

#[derive(Default)]
struct Inner {
    stocks: BTreeMap<i64, Stock>,
    requests: Vec<String>,
    last_body: Option<Value>,
    scripted: VecDeque<(StatusCode, Value)>,
}

type Shared = Arc<Mutex<Inner>>;

pub struct FakeBackend {
    addr: SocketAddr,
    inner: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let inner = Shared::default();
        let app = Router::new()
            .route("/api/stock/low-stock-report", get(low_stock_report))
            .route("/api/stock/save", post(save))
            .route("/api/stock/:id", get(get_stock))
            .route("/api/stock/:id/increase", put(increase))
            .route("/api/stock/:id/decrease", put(decrease))
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, inner }
    }

    /// A base URL nothing is listening on.
    pub async fn unreachable_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/api/stock", addr)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/stock", self.addr)
    }

    pub async fn put_stock(&self, stock: Stock) {
        self.inner.lock().await.stocks.insert(stock.product_id, stock);
    }

    pub async fn stock(&self, product_id: i64) -> Option<Stock> {
        self.inner.lock().await.stocks.get(&product_id).cloned()
    }

    /// Answer the next request with `status` and a JSON `body`, whatever it asks for.
    pub async fn reply_next(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        self.inner.lock().await.scripted.push_back((status, body));
    }

    /// `"METHOD /path"` for every request received so far.
    pub async fn requests(&self) -> Vec<String> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn last_body(&self) -> Option<Value> {
        self.inner.lock().await.last_body.clone()
    }
}

/// Client for `base_url` that ignores proxy settings from the environment.
pub fn direct_service(base_url: impl Into<String>) -> StockService {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    StockService::with_client(client, base_url)
}

async fn record(inner: &Shared, method: &Method, uri: &Uri, body: &[u8]) -> Option<Response> {
    let mut inner = inner.lock().await;
    inner.requests.push(format!("{} {}", method, uri.path()));
    if !body.is_empty() {
        inner.last_body = serde_json::from_slice(body).ok();
    }
    inner
        .scripted
        .pop_front()
        .map(|(status, body)| (status, Json(body)).into_response())
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Product not found").into_response()
}

async fn get_stock(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    Path(id): Path<i64>,
) -> Response {
    if let Some(scripted) = record(&inner, &method, &uri, &[]).await {
        return scripted;
    }
    match inner.lock().await.stocks.get(&id) {
        Some(stock) => Json(stock.clone()).into_response(),
        None => not_found(),
    }
}

async fn adjust(inner: Shared, id: i64, body: Bytes, sign: i64) -> Response {
    let Ok(AmountRequest { amount }) = serde_json::from_slice::<AmountRequest>(&body) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Malformed body" }))).into_response();
    };
    if amount <= 0 {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Amount must be positive" })))
            .into_response();
    }

    let mut inner = inner.lock().await;
    let Some(stock) = inner.stocks.get_mut(&id) else {
        return not_found();
    };
    let next = stock.quantity + sign * amount;
    if next < 0 {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Insufficient stock" })))
            .into_response();
    }
    stock.quantity = next;
    Json(stock.clone()).into_response()
}

async fn increase(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    if let Some(scripted) = record(&inner, &method, &uri, &body).await {
        return scripted;
    }
    adjust(inner, id, body, 1).await
}

async fn decrease(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    if let Some(scripted) = record(&inner, &method, &uri, &body).await {
        return scripted;
    }
    adjust(inner, id, body, -1).await
}

async fn low_stock_report(State(inner): State<Shared>, method: Method, uri: Uri) -> Response {
    if let Some(scripted) = record(&inner, &method, &uri, &[]).await {
        return scripted;
    }
    let items: Vec<Stock> = inner
        .lock()
        .await
        .stocks
        .values()
        .filter(|s| s.is_low())
        .cloned()
        .collect();
    Json(items).into_response()
}

async fn save(State(inner): State<Shared>, method: Method, uri: Uri, body: Bytes) -> Response {
    if let Some(scripted) = record(&inner, &method, &uri, &body).await {
        return scripted;
    }
    let Ok(dto) = serde_json::from_slice::<StockDto>(&body) else {
        return (StatusCode::BAD_REQUEST, "Malformed body").into_response();
    };

    let mut inner = inner.lock().await;
    let reorder_level = inner
        .stocks
        .get(&dto.product_id)
        .map(|s| s.reorder_level)
        .unwrap_or(10);
    inner.stocks.insert(
        dto.product_id,
        Stock {
            product_id: dto.product_id,
            name: dto.name,
            quantity: dto.quantity,
            reorder_level,
        },
    );
    (StatusCode::OK, "Stock saved successfully").into_response()
}
