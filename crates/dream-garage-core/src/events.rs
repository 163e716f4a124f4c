use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::catalog::ItemId;

/// Every ledger mutation produces an Event, journalled in the order applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PointsAwarded {
        account: AccountId,
        /// Amount requested by the caller.
        amount: i64,
        /// Change actually made to the balance; differs from `amount`
        /// when the balance clamps.
        applied: i64,
        balance: u64,
        at: DateTime<Utc>,
    },
    ItemPurchased {
        item: ItemId,
        cost: u64,
        balance: u64,
        at: DateTime<Utc>,
    },
    ActivityRecorded {
        account: AccountId,
        calls_today: u32,
        appointments_today: u32,
        at: DateTime<Utc>,
    },
    CallStarted {
        at: DateTime<Utc>,
    },
    CallEnded {
        duration_secs: i64,
        at: DateTime<Utc>,
    },
    CarSelected {
        item: ItemId,
        at: DateTime<Utc>,
    },
    ThemeSelected {
        item: ItemId,
        at: DateTime<Utc>,
    },
    UnderglowChanged {
        color: String,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let ev = Event::CallStarted { at: Utc::now() };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "CallStarted");
    }
}
