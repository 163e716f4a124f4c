use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Why a purchase did not go through. Rejections are ordinary outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    UnknownItem,
    AlreadyOwned,
    InsufficientFunds { needed: u64, available: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased { item: ItemId, cost: u64, balance: u64 },
    Rejected { item: ItemId, rejection: Rejection },
}

impl PurchaseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            PurchaseOutcome::Purchased { .. } => None,
            PurchaseOutcome::Rejected { rejection, .. } => Some(*rejection),
        }
    }
}
