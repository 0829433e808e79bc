use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Stock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Transient banner shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Monotonic per view; a dismissal only clears the message it was scheduled for.
    #[serde(skip)]
    pub id: u64,
    pub text: String,
    pub kind: MessageKind,
    pub shown_at: DateTime<Utc>,
}

/// Everything the page shows. Owned by [`super::StockView`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub product_id: i64,
    pub amount: i64,
    pub current_stock: Option<Stock>,
    pub low_stock_items: Vec<Stock>,
    pub loading: bool,
    pub message: Option<Message>,
    #[serde(skip)]
    pub(super) last_message_id: u64,
}

/// Coarse phase of the view, derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    SuccessShown,
    ErrorShown,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            return Phase::Loading;
        }
        match self.message.as_ref().map(|m| m.kind) {
            Some(MessageKind::Success) => Phase::SuccessShown,
            Some(MessageKind::Error) => Phase::ErrorShown,
            None => Phase::Idle,
        }
    }

    /// Replace the current message and return its id.
    pub(super) fn set_message(&mut self, text: impl Into<String>, kind: MessageKind) -> u64 {
        self.last_message_id += 1;
        self.message = Some(Message {
            id: self.last_message_id,
            text: text.into(),
            kind,
            shown_at: Utc::now(),
        });
        self.last_message_id
    }

    /// Clear the message only if it is still the one identified by `id`.
    pub(super) fn dismiss(&mut self, id: u64) -> bool {
        if self.message.as_ref().is_some_and(|m| m.id == id) {
            self.message = None;
            return true;
        }
        false
    }
}
