//! Reward ledger implementation.
//!
//! The ledger is the single source of truth for points, ownership, the
//! active call and the garage selection. It is an owned value: callers hold
//! it and pass `&mut` to whatever needs to mutate it. There is no interior
//! mutability and no locking; operations apply in the order they are called.
//!
//! ## Usage
//!
//! ```ignore
//! let mut ledger = RewardLedger::from_seed(Seed::builtin())?;
//! ledger.award_points(1000);
//! if ledger.purchase_item("lexus-lc") {
//!     ledger.select_car("lexus-lc")?;
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexSet;

use super::call::CallSession;
use super::purchase::{PurchaseOutcome, Rejection};
use super::selection::{Selection, Underglow};
use crate::account::{Account, AccountId, Roster};
use crate::catalog::{Catalog, CatalogItem, Category, ItemId};
use crate::error::{SeedError, ValidationError};
use crate::events::Event;
use crate::storage::Seed;

#[derive(Debug, Clone)]
pub struct RewardLedger {
    roster: Roster,
    active: AccountId,
    catalog: Catalog,
    /// Session-global, in order of acquisition. Never shrinks.
    owned: IndexSet<ItemId>,
    call: Option<CallSession>,
    selection: Selection,
    journal: Vec<Event>,
}

impl RewardLedger {
    /// Build a ledger. Every free item is owned from the start, and the
    /// first owned car and theme become the initial selection.
    pub fn new(roster: Roster, catalog: Catalog, active: AccountId) -> Result<Self, SeedError> {
        if !roster.contains(active.as_str()) {
            return Err(SeedError::UnknownActiveAccount(active.to_string()));
        }
        let owned: IndexSet<ItemId> = catalog.free_items().map(|i| i.id.clone()).collect();
        let first_owned = |category: Category| {
            catalog
                .by_category(category)
                .find(|i| owned.contains(&i.id))
                .map(|i| i.id.clone())
        };
        let selection = Selection {
            car: first_owned(Category::Car),
            theme: first_owned(Category::Theme),
            underglow: Underglow::default(),
        };
        Ok(Self {
            roster,
            active,
            catalog,
            owned,
            call: None,
            selection,
            journal: Vec::new(),
        })
    }

    pub fn from_seed(seed: Seed) -> Result<Self, SeedError> {
        let roster = Roster::from_accounts(seed.accounts)?;
        let catalog = Catalog::new(seed.catalog)?;
        Self::new(roster, catalog, seed.active_account)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Id of the account purchases are charged to.
    pub fn active_id(&self) -> &AccountId {
        &self.active
    }

    /// The account purchases are charged to.
    pub fn active_account(&self) -> &Account {
        self.expect_account(self.active.as_str())
    }

    /// Non-panicking lookup for ids that come from user input.
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.roster.get(id)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// False for unknown ids.
    pub fn is_owned(&self, item_id: &str) -> bool {
        self.owned.contains(item_id)
    }

    /// Owned items in order of acquisition, free items first.
    pub fn owned(&self) -> impl Iterator<Item = &ItemId> {
        self.owned.iter()
    }

    pub fn owned_count(&self, category: Category) -> usize {
        self.owned
            .iter()
            .filter_map(|id| self.catalog.get(id.as_str()))
            .filter(|i| i.category() == category)
            .count()
    }

    pub fn call(&self) -> Option<&CallSession> {
        self.call.as_ref()
    }

    pub fn is_on_call(&self) -> bool {
        self.call.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Applied mutations, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.journal
    }

    // ── Points ───────────────────────────────────────────────────────

    /// Add `amount` (any sign) to the active account.
    pub fn award_points(&mut self, amount: i64) {
        let active = self.active.clone();
        self.award_points_to(active.as_str(), amount);
    }

    /// Add `amount` (any sign) to `account_id`. Balances clamp at zero.
    ///
    /// # Panics
    /// If `account_id` is not in the roster. Check with [`Self::account`]
    /// first when the id comes from user input.
    pub fn award_points_to(&mut self, account_id: &str, amount: i64) {
        let account = self.expect_account_mut(account_id);
        let before = account.points;
        if account.apply_points(amount) {
            tracing::warn!(
                "award of {} to {} clamped, balance now {}",
                amount, account_id, account.points
            );
        }
        let balance = account.points;
        // Never larger in magnitude than `amount`, so it fits.
        let applied = (i128::from(balance) - i128::from(before)) as i64;
        let id = account.id.clone();
        tracing::info!("awarded {} points to {}, balance {}", applied, id, balance);
        self.journal.push(Event::PointsAwarded {
            account: id,
            amount,
            applied,
            balance,
            at: Utc::now(),
        });
    }

    // ── Activity ─────────────────────────────────────────────────────

    /// Count a completed call for the active account.
    pub fn record_call(&mut self) {
        self.record_activity(|a| a.calls_today = a.calls_today.saturating_add(1));
    }

    /// Count a booked appointment for the active account.
    pub fn record_appointment(&mut self) {
        self.record_activity(|a| a.appointments_today = a.appointments_today.saturating_add(1));
    }

    fn record_activity(&mut self, bump: impl FnOnce(&mut Account)) {
        let active = self.active.clone();
        let account = self.expect_account_mut(active.as_str());
        bump(account);
        let event = Event::ActivityRecorded {
            account: account.id.clone(),
            calls_today: account.calls_today,
            appointments_today: account.appointments_today,
            at: Utc::now(),
        };
        self.journal.push(event);
    }

    // ── Purchases ────────────────────────────────────────────────────

    /// Buy `item_id` at its catalog price. Returns false, with no state
    /// change, if the item is unknown, already owned or unaffordable.
    pub fn purchase_item(&mut self, item_id: &str) -> bool {
        self.attempt_purchase(item_id).is_success()
    }

    /// Buy `item_id` charging `cost` instead of the catalog price.
    pub fn purchase_item_at(&mut self, item_id: &str, cost: u64) -> bool {
        self.attempt_purchase_at(item_id, cost).is_success()
    }

    /// Buy `item_id` at its catalog price, reporting why it failed if it did.
    pub fn attempt_purchase(&mut self, item_id: &str) -> PurchaseOutcome {
        match self.catalog.get(item_id).map(|i| i.price) {
            Some(price) => self.attempt_purchase_at(item_id, price),
            None => self.reject(item_id, Rejection::UnknownItem),
        }
    }

    /// Buy `item_id` for `cost`. Checks run in order: unknown item, already
    /// owned, insufficient funds. Nothing changes unless all pass.
    pub fn attempt_purchase_at(&mut self, item_id: &str, cost: u64) -> PurchaseOutcome {
        let item = match self.catalog.get(item_id) {
            Some(item) => item.id.clone(),
            None => return self.reject(item_id, Rejection::UnknownItem),
        };
        if self.owned.contains(item_id) {
            return self.reject(item_id, Rejection::AlreadyOwned);
        }
        let available = self.active_account().points;
        if available < cost {
            return self.reject(
                item_id,
                Rejection::InsufficientFunds {
                    needed: cost,
                    available,
                },
            );
        }

        // Both mutations happen here, after every check has passed.
        let active = self.active.clone();
        let account = self.expect_account_mut(active.as_str());
        account.points -= cost;
        let balance = account.points;
        self.owned.insert(item.clone());

        tracing::info!("{} bought {} for {}, balance {}", active, item, cost, balance);
        self.journal.push(Event::ItemPurchased {
            item: item.clone(),
            cost,
            balance,
            at: Utc::now(),
        });
        PurchaseOutcome::Purchased {
            item,
            cost,
            balance,
        }
    }

    fn reject(&self, item_id: &str, rejection: Rejection) -> PurchaseOutcome {
        tracing::debug!("purchase of {} rejected: {:?}", item_id, rejection);
        PurchaseOutcome::Rejected {
            item: ItemId::from(item_id),
            rejection,
        }
    }

    // ── Calls ────────────────────────────────────────────────────────

    /// Start (or restart) the call clock now.
    pub fn start_call(&mut self) {
        self.start_call_at(Utc::now());
    }

    /// Start (or restart) the call clock at `at`.
    pub fn start_call_at(&mut self, at: DateTime<Utc>) {
        if self.call.is_some() {
            tracing::debug!("call already active, restarting clock");
        }
        self.call = Some(CallSession::new(at));
        tracing::info!("call started");
        self.journal.push(Event::CallStarted { at });
    }

    /// End the active call now. See [`Self::end_call_at`].
    pub fn end_call(&mut self) -> Option<Duration> {
        self.end_call_at(Utc::now())
    }

    /// Clear the active call. Returns its duration, or None if no call was
    /// active (a no-op).
    pub fn end_call_at(&mut self, at: DateTime<Utc>) -> Option<Duration> {
        let call = self.call.take()?;
        let duration = call.elapsed(at);
        tracing::info!("call ended after {}s", duration.num_seconds());
        self.journal.push(Event::CallEnded {
            duration_secs: duration.num_seconds(),
            at,
        });
        Some(duration)
    }

    /// Elapsed time of the active call at `now`.
    pub fn call_elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.call.as_ref().map(|c| c.elapsed(now))
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Display an owned car.
    pub fn select_car(&mut self, item_id: &str) -> Result<(), ValidationError> {
        let id = self.selectable(item_id, Category::Car)?;
        self.selection.car = Some(id.clone());
        self.journal.push(Event::CarSelected {
            item: id,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Display an owned garage theme.
    pub fn select_theme(&mut self, item_id: &str) -> Result<(), ValidationError> {
        let id = self.selectable(item_id, Category::Theme)?;
        self.selection.theme = Some(id.clone());
        self.journal.push(Event::ThemeSelected {
            item: id,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Change the underglow colour. Always allowed.
    pub fn set_underglow(&mut self, underglow: Underglow) {
        self.journal.push(Event::UnderglowChanged {
            color: underglow.to_string(),
            at: Utc::now(),
        });
        self.selection.underglow = underglow;
    }

    fn selectable(&self, item_id: &str, category: Category) -> Result<ItemId, ValidationError> {
        let item: &CatalogItem = self
            .catalog
            .get(item_id)
            .ok_or_else(|| ValidationError::UnknownItem(item_id.to_string()))?;
        if item.category() != category {
            return Err(ValidationError::WrongCategory {
                id: item_id.to_string(),
                expected: category.to_string(),
            });
        }
        if !self.owned.contains(item_id) {
            return Err(ValidationError::NotOwned(item_id.to_string()));
        }
        Ok(item.id.clone())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expect_account(&self, id: &str) -> &Account {
        match self.roster.get(id) {
            Some(account) => account,
            None => panic!("unknown account '{id}': accounts are fixed at session start"),
        }
    }

    fn expect_account_mut(&mut self, id: &str) -> &mut Account {
        match self.roster.get_mut(id) {
            Some(account) => account,
            None => panic!("unknown account '{id}': accounts are fixed at session start"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rarity;

    fn ledger() -> RewardLedger {
        let roster = Roster::from_accounts(vec![
            Account::new("sarah", "Sarah", 12345),
            Account::new("mike", "Mike", 9000),
        ])
        .unwrap();
        let catalog = Catalog::new(vec![
            CatalogItem::car("civic", "Civic", "Honda", Rarity::Common, 0),
            CatalogItem::car("lexus-lc", "LC 500", "Lexus", Rarity::Rare, 8000),
            CatalogItem::car("lamborghini", "Huracan", "Lamborghini", Rarity::Legendary, 10000),
            CatalogItem::theme("showroom", "Showroom", "#e5e7eb", 0),
            CatalogItem::theme("cyber", "Cyber", "#00ffff", 50000),
        ])
        .unwrap();
        RewardLedger::new(roster, catalog, AccountId::from("sarah")).unwrap()
    }

    #[test]
    fn free_items_owned_and_selected_at_start() {
        let l = ledger();
        assert!(l.is_owned("civic"));
        assert!(l.is_owned("showroom"));
        assert!(!l.is_owned("lexus-lc"));
        assert_eq!(l.selection().car.as_ref().map(ItemId::as_str), Some("civic"));
        assert_eq!(l.selection().theme.as_ref().map(ItemId::as_str), Some("showroom"));
        assert!(l.events().is_empty());
    }

    #[test]
    fn unknown_active_account_is_rejected() {
        let roster = Roster::from_accounts(vec![Account::new("sarah", "Sarah", 1)]).unwrap();
        let err = RewardLedger::new(roster, Catalog::default(), AccountId::from("nobody")).unwrap_err();
        assert!(matches!(err, SeedError::UnknownActiveAccount(_)));
    }

    #[test]
    fn purchase_then_insufficient_funds() {
        let mut l = ledger();
        assert!(l.purchase_item("lexus-lc"));
        assert_eq!(l.active_account().points, 4345);

        let outcome = l.attempt_purchase("lamborghini");
        assert_eq!(
            outcome.rejection(),
            Some(Rejection::InsufficientFunds {
                needed: 10000,
                available: 4345
            })
        );
        assert_eq!(l.active_account().points, 4345);
        assert!(!l.is_owned("lamborghini"));
    }

    #[test]
    fn already_owned_is_checked_before_funds() {
        let mut l = ledger();
        assert_eq!(
            l.attempt_purchase_at("civic", 1_000_000).rejection(),
            Some(Rejection::AlreadyOwned)
        );
    }

    #[test]
    fn unknown_item_is_a_normal_failure() {
        let mut l = ledger();
        assert!(!l.purchase_item("delorean"));
        assert!(!l.purchase_item_at("delorean", 0));
        assert!(!l.is_owned("delorean"));
        assert_eq!(l.active_account().points, 12345);
    }

    #[test]
    fn caller_priced_purchase_charges_given_cost() {
        let mut l = ledger();
        assert!(l.purchase_item_at("cyber", 100));
        assert_eq!(l.active_account().points, 12245);
        assert!(l.is_owned("cyber"));
    }

    #[test]
    fn award_to_other_account_leaves_active_alone() {
        let mut l = ledger();
        l.award_points_to("mike", 500);
        assert_eq!(l.account("mike").unwrap().points, 9500);
        assert_eq!(l.active_account().points, 12345);
    }

    #[test]
    fn clamped_award_journals_the_applied_change() {
        let mut l = ledger();
        l.award_points(-20_000);
        assert_eq!(l.active_account().points, 0);
        match &l.events()[0] {
            Event::PointsAwarded {
                amount,
                applied,
                balance,
                ..
            } => assert_eq!((*amount, *applied, *balance), (-20_000, -12_345, 0)),
            other => panic!("unexpected event {other:?}"),
        }

        l.award_points(40);
        let replayed = l.events().iter().fold(12_345i64, |total, e| match e {
            Event::PointsAwarded { applied, .. } => total + applied,
            _ => total,
        });
        assert_eq!(replayed, 40);
    }

    #[test]
    #[should_panic(expected = "unknown account 'ghost'")]
    fn award_to_unknown_account_panics() {
        let mut l = ledger();
        l.award_points_to("ghost", 1);
    }

    #[test]
    fn call_start_restart_and_end() {
        let mut l = ledger();
        let t0 = Utc::now();
        assert_eq!(l.end_call_at(t0), None);

        l.start_call_at(t0);
        l.start_call_at(t0 + Duration::seconds(30));
        assert_eq!(l.call_elapsed(t0 + Duration::seconds(90)), Some(Duration::seconds(60)));

        assert_eq!(l.end_call_at(t0 + Duration::seconds(90)), Some(Duration::seconds(60)));
        assert!(!l.is_on_call());
        assert_eq!(l.active_account().points, 12345);
    }

    #[test]
    fn selection_requires_owned_item_of_right_category() {
        let mut l = ledger();
        assert_eq!(l.select_car("lexus-lc"), Err(ValidationError::NotOwned("lexus-lc".into())));
        assert!(matches!(l.select_car("showroom"), Err(ValidationError::WrongCategory { .. })));
        assert!(matches!(l.select_theme("nope"), Err(ValidationError::UnknownItem(_))));

        assert!(l.purchase_item("lexus-lc"));
        l.select_car("lexus-lc").unwrap();
        assert_eq!(l.selection().car.as_ref().map(ItemId::as_str), Some("lexus-lc"));
    }

    #[test]
    fn activity_counters_do_not_award_points() {
        let mut l = ledger();
        l.record_call();
        l.record_call();
        l.record_appointment();
        let a = l.active_account();
        assert_eq!((a.calls_today, a.appointments_today, a.points), (2, 1, 12345));
    }

    #[test]
    fn journal_is_in_application_order() {
        let mut l = ledger();
        l.award_points(10);
        l.purchase_item("lexus-lc");
        l.purchase_item("lamborghini");
        l.set_underglow("magenta".parse().unwrap());
        let kinds: Vec<_> = l
            .events()
            .iter()
            .map(|e| serde_json::to_value(e).unwrap()["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, ["PointsAwarded", "ItemPurchased", "UnderglowChanged"]);
    }
}
