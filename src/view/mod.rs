pub mod page;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::display_message;
use crate::service::StockApi;

pub use state::{Message, MessageKind, Phase, ViewState};

pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_millis(3000);

/// Direction of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Increase,
    Decrease,
}

impl Adjustment {
    fn verb(self) -> &'static str {
        match self {
            Adjustment::Increase => "increase",
            Adjustment::Decrease => "decrease",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Adjustment::Increase => "increased",
            Adjustment::Decrease => "decreased",
        }
    }
}

/// The stock management view: owns its [`ViewState`] and drives the
/// [`StockApi`] in response to operator actions.
///
/// The state lock is never held across a backend call. Every action issues at
/// most one request for its own work; increase/decrease follow up with a
/// low-stock reload on success.
pub struct StockView {
    api: Arc<dyn StockApi>,
    state: Arc<RwLock<ViewState>>,
    pending_dismissal: Mutex<Option<JoinHandle<()>>>,
    message_ttl: Duration,
}

impl StockView {
    pub fn new(api: Arc<dyn StockApi>, message_ttl: Duration) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ViewState::default())),
            pending_dismissal: Mutex::new(None),
            message_ttl,
        }
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Initial load when the view is first shown.
    pub async fn init(&self) {
        self.load_low_stock_items().await;
    }

    pub async fn set_product_id(&self, product_id: i64) {
        self.state.write().await.product_id = product_id;
    }

    pub async fn set_amount(&self, amount: i64) {
        self.state.write().await.amount = amount;
    }

    pub async fn search_stock(&self) {
        let product_id = {
            let mut state = self.state.write().await;
            if state.product_id == 0 {
                self.show_message(&mut state, "Please enter a valid Product ID", MessageKind::Error)
                    .await;
                return;
            }
            state.loading = true;
            state.product_id
        };

        let result = self.api.get_stock_by_product_id(product_id).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(stock) => {
                info!(product_id, quantity = stock.quantity, "Loaded stock");
                state.current_stock = Some(stock);
                self.show_message(
                    &mut state,
                    "Stock information loaded successfully",
                    MessageKind::Success,
                )
                .await;
            }
            Err(err) => {
                warn!(
                    product_id,
                    status = ?err.status,
                    class = ?err.class(),
                    error = %err.message,
                    "Stock lookup failed"
                );
                self.show_message(&mut state, display_message(&err), MessageKind::Error)
                    .await;
            }
        }
    }

    pub async fn increase_stock(&self) {
        self.adjust_stock(Adjustment::Increase).await;
    }

    pub async fn decrease_stock(&self) {
        self.adjust_stock(Adjustment::Decrease).await;
    }

    async fn adjust_stock(&self, adjustment: Adjustment) {
        let (product_id, amount) = {
            let mut state = self.state.write().await;
            let target = state.current_stock.as_ref().map(|s| s.product_id);
            match target {
                Some(product_id) if state.amount > 0 => {
                    state.loading = true;
                    (product_id, state.amount)
                }
                _ => {
                    let text = format!("Please enter a valid amount to {}", adjustment.verb());
                    self.show_message(&mut state, text, MessageKind::Error).await;
                    return;
                }
            }
        };

        let result = match adjustment {
            Adjustment::Increase => self.api.increase_stock(product_id, amount).await,
            Adjustment::Decrease => self.api.decrease_stock(product_id, amount).await,
        };

        {
            let mut state = self.state.write().await;
            state.loading = false;
            match result {
                Ok(updated) => {
                    info!(
                        product_id,
                        amount,
                        quantity = updated.quantity,
                        "Stock {}",
                        adjustment.past()
                    );
                    state.current_stock = Some(updated);
                    state.amount = 0;
                    let text = format!("Stock {} successfully", adjustment.past());
                    self.show_message(&mut state, text, MessageKind::Success).await;
                }
                Err(err) => {
                    warn!(
                        product_id,
                        amount,
                        status = ?err.status,
                        class = ?err.class(),
                        error = %err.message,
                        "Stock {} failed",
                        adjustment.verb()
                    );
                    self.show_message(&mut state, display_message(&err), MessageKind::Error)
                        .await;
                    return;
                }
            }
        }

        self.load_low_stock_items().await;
    }

    /// Refresh the low-stock list. On failure the previous list is kept.
    pub async fn load_low_stock_items(&self) {
        match self.api.get_low_stock_report().await {
            Ok(items) => {
                debug!(count = items.len(), "Loaded low-stock report");
                self.state.write().await.low_stock_items = items;
            }
            Err(err) => {
                warn!(
                    status = ?err.status,
                    class = ?err.class(),
                    error = %err.message,
                    "Low-stock report failed"
                );
                let mut state = self.state.write().await;
                self.show_message(&mut state, display_message(&err), MessageKind::Error)
                    .await;
            }
        }
    }

    /// Pick a product from the low-stock list and look it up.
    pub async fn select_product(&self, product_id: i64) {
        self.set_product_id(product_id).await;
        self.search_stock().await;
    }

    /// Show `text` and schedule its dismissal, cancelling any dismissal still
    /// pending for an earlier message.
    async fn show_message(&self, state: &mut ViewState, text: impl Into<String>, kind: MessageKind) {
        let id = state.set_message(text, kind);

        let shared = Arc::clone(&self.state);
        let ttl = self.message_ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            shared.write().await.dismiss(id);
        });

        if let Some(previous) = self.pending_dismissal.lock().await.replace(handle) {
            previous.abort();
        }
    }
}
