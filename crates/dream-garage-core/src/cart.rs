//! Shopping cart of cars waiting to be bought.

use crate::catalog::{Category, ItemId};
use crate::error::ValidationError;
use crate::ledger::{PurchaseOutcome, RewardLedger};

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<ItemId>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an unowned car. Adding a car that is already queued is a no-op.
    pub fn add(&mut self, ledger: &RewardLedger, item_id: &str) -> Result<(), ValidationError> {
        let item = ledger
            .catalog()
            .get(item_id)
            .ok_or_else(|| ValidationError::UnknownItem(item_id.to_string()))?;
        if item.category() != Category::Car {
            return Err(ValidationError::WrongCategory {
                id: item_id.to_string(),
                expected: Category::Car.to_string(),
            });
        }
        if ledger.is_owned(item_id) {
            return Err(ValidationError::AlreadyOwned(item_id.to_string()));
        }
        if !self.items.iter().any(|i| i.as_str() == item_id) {
            self.items.push(item.id.clone());
        }
        Ok(())
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.as_str() != item_id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of catalog prices of queued items, saturating at `u64::MAX`.
    pub fn total(&self, ledger: &RewardLedger) -> u64 {
        self.items
            .iter()
            .filter_map(|id| ledger.catalog().get(id.as_str()))
            .fold(0u64, |total, item| total.saturating_add(item.price))
    }

    /// Try each queued item in order and empty the cart. Each purchase
    /// stands alone: a failed one does not stop later, cheaper ones.
    pub fn checkout(&mut self, ledger: &mut RewardLedger) -> Vec<PurchaseOutcome> {
        std::mem::take(&mut self.items)
            .into_iter()
            .map(|id| ledger.attempt_purchase(id.as_str()))
            .collect()
    }
}
