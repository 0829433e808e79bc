use axum::{
    extract::{rejection::FormRejection, rejection::PathRejection, Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    view::{page, Phase, ViewState},
    AppState, VIEW_PATH,
};

// ── Forms ─────────────────────────────────────────────────────────────────────

/// Number inputs arrive as text; blank or unparsable input reads as 0, which
/// the view rejects with its own validation message.
fn parse_number(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AmountForm {
    #[serde(default)]
    pub amount: String,
}

fn form<T>(payload: Result<Form<T>, FormRejection>) -> AppResult<T> {
    payload
        .map(|Form(inner)| inner)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

// ── Page ──────────────────────────────────────────────────────────────────────

pub async fn index() -> Redirect {
    Redirect::to(VIEW_PATH)
}

pub async fn show(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&state.view.snapshot().await))
}

/// `/state` body: the view state plus its derived phase.
#[derive(Debug, Serialize)]
pub struct StateBody {
    pub phase: Phase,
    #[serde(flatten)]
    pub state: ViewState,
}

pub async fn view_state(State(state): State<AppState>) -> Json<StateBody> {
    let snapshot = state.view.snapshot().await;
    Json(StateBody {
        phase: snapshot.phase(),
        state: snapshot,
    })
}

// ── Actions ───────────────────────────────────────────────────────────────────

pub async fn search(
    State(state): State<AppState>,
    payload: Result<Form<SearchForm>, FormRejection>,
) -> AppResult<Redirect> {
    let product_id = parse_number(&form(payload)?.product_id);
    info!(product_id, "Search requested");

    state.view.set_product_id(product_id).await;
    state.view.search_stock().await;
    Ok(Redirect::to(VIEW_PATH))
}

pub async fn increase(
    State(state): State<AppState>,
    payload: Result<Form<AmountForm>, FormRejection>,
) -> AppResult<Redirect> {
    let amount = parse_number(&form(payload)?.amount);

    state.view.set_amount(amount).await;
    state.view.increase_stock().await;
    Ok(Redirect::to(VIEW_PATH))
}

pub async fn decrease(
    State(state): State<AppState>,
    payload: Result<Form<AmountForm>, FormRejection>,
) -> AppResult<Redirect> {
    let amount = parse_number(&form(payload)?.amount);

    state.view.set_amount(amount).await;
    state.view.decrease_stock().await;
    Ok(Redirect::to(VIEW_PATH))
}

pub async fn select(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Redirect> {
    let Path(product_id) = id.map_err(|e| AppError::BadRequest(e.body_text()))?;

    state.view.select_product(product_id).await;
    Ok(Redirect::to(VIEW_PATH))
}

pub async fn refresh_low_stock(State(state): State<AppState>) -> Redirect {
    state.view.load_low_stock_items().await;
    Redirect::to(VIEW_PATH)
}
