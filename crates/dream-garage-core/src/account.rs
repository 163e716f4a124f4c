//! Team member accounts and the seed-ordered roster.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::SeedError;

/// Unique account slug (e.g. `"sarah"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tracked team member's balance and activity counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub calls_today: u32,
    #[serde(default)]
    pub appointments_today: u32,
    /// Consecutive qualifying days.
    #[serde(default)]
    pub streak: u32,
}

impl Account {
    pub fn new(id: &str, name: &str, points: u64) -> Self {
        Self {
            id: AccountId::from(id),
            name: name.to_string(),
            points,
            calls_today: 0,
            appointments_today: 0,
            streak: 0,
        }
    }

    pub fn with_activity(mut self, calls: u32, appointments: u32, streak: u32) -> Self {
        self.calls_today = calls;
        self.appointments_today = appointments;
        self.streak = streak;
        self
    }

    /// Apply a signed delta, clamping at zero. Returns true if clamped.
    pub(crate) fn apply_points(&mut self, amount: i64) -> bool {
        match self.points.checked_add_signed(amount) {
            Some(p) => {
                self.points = p;
                false
            }
            None if amount < 0 => {
                self.points = 0;
                true
            }
            None => {
                self.points = u64::MAX;
                true
            }
        }
    }
}

/// All accounts of a session, in seed order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Roster {
    accounts: IndexMap<AccountId, Account>,
}

impl Roster {
    /// Build from a list, rejecting duplicate ids.
    pub fn from_accounts(accounts: Vec<Account>) -> Result<Self, SeedError> {
        if accounts.is_empty() {
            return Err(SeedError::EmptyRoster);
        }
        let mut map = IndexMap::with_capacity(accounts.len());
        for account in accounts {
            if map.contains_key(&account.id) {
                return Err(SeedError::DuplicateAccount(account.id.to_string()));
            }
            map.insert(account.id.clone(), account);
        }
        Ok(Self { accounts: map })
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
