//! Property tests for the reward ledger invariants.

use dream_garage_core::{
    Account, AccountId, Catalog, CatalogItem, Rarity, Rejection, RewardLedger, Roster,
};
use proptest::prelude::*;

const ITEMS: [&str; 4] = ["starter", "coupe", "roadster", "hypercar"];

fn ledger(balances: &[u64]) -> RewardLedger {
    let accounts = balances
        .iter()
        .enumerate()
        .map(|(i, &p)| Account::new(&format!("rep-{i}"), &format!("Rep {i}"), p))
        .collect();
    let catalog = Catalog::new(vec![
        CatalogItem::car(ITEMS[0], "Starter", "Acme", Rarity::Common, 0),
        CatalogItem::car(ITEMS[1], "Coupe", "Acme", Rarity::Common, 500),
        CatalogItem::car(ITEMS[2], "Roadster", "Acme", Rarity::Rare, 5_000),
        CatalogItem::theme(ITEMS[3], "Hyper", "#ffffff", 50_000),
    ])
    .unwrap();
    RewardLedger::new(
        Roster::from_accounts(accounts).unwrap(),
        catalog,
        AccountId::from("rep-0"),
    )
    .unwrap()
}

fn snapshot(l: &RewardLedger) -> (Vec<u64>, Vec<String>) {
    (
        l.roster().iter().map(|a| a.points).collect(),
        l.owned().map(|i| i.to_string()).collect(),
    )
}

proptest! {
    #[test]
    fn prop_award_changes_only_target(
        balances in prop::collection::vec(0u64..1_000_000, 1..6),
        target_seed in any::<prop::sample::Index>(),
        amount in 1i64..100_000,
    ) {
        let mut l = ledger(&balances);
        let target = target_seed.index(balances.len());
        l.award_points_to(&format!("rep-{target}"), amount);
        for (i, a) in l.roster().iter().enumerate() {
            let expected = if i == target { balances[i] + amount as u64 } else { balances[i] };
            prop_assert_eq!(a.points, expected);
        }
    }

    #[test]
    fn prop_unaffordable_purchase_changes_nothing(
        balance in 0u64..1_000_000,
        cost_gap in 1u64..1_000_000,
        item in prop::sample::select(ITEMS.to_vec()),
    ) {
        let mut l = ledger(&[balance]);
        let before = snapshot(&l);
        let outcome = l.attempt_purchase_at(item, balance + cost_gap);
        prop_assert!(!outcome.is_success());
        prop_assert_eq!(snapshot(&l), before);
    }

    #[test]
    fn prop_owned_purchase_changes_nothing(balance in 0u64..1_000_000, cost in 0u64..1_000) {
        let mut l = ledger(&[balance]);
        let before = snapshot(&l);
        prop_assert_eq!(
            l.attempt_purchase_at("starter", cost).rejection(),
            Some(Rejection::AlreadyOwned)
        );
        prop_assert_eq!(snapshot(&l), before);
    }

    #[test]
    fn prop_successful_purchase_charges_exactly_once(
        balance in 0u64..1_000_000,
        cost in 0u64..1_000_000,
    ) {
        let mut l = ledger(&[balance]);
        let bought = l.purchase_item_at("roadster", cost);
        prop_assert_eq!(bought, balance >= cost);
        if bought {
            prop_assert_eq!(l.active_account().points, balance - cost);
            prop_assert!(!l.purchase_item_at("roadster", cost));
            prop_assert_eq!(l.active_account().points, balance - cost);
            prop_assert_eq!(l.owned().filter(|i| i.as_str() == "roadster").count(), 1);
        } else {
            prop_assert_eq!(l.active_account().points, balance);
        }
    }

    #[test]
    fn prop_is_owned_tracks_every_purchase(
        balance in 0u64..60_000,
        attempts in prop::collection::vec(prop::sample::select(ITEMS.to_vec()), 0..12),
    ) {
        let mut l = ledger(&[balance]);
        let mut expected: Vec<&str> = vec!["starter"];
        for item in attempts {
            let was_owned = l.is_owned(item);
            prop_assert_eq!(was_owned, expected.contains(&item));
            if l.purchase_item(item) {
                prop_assert!(!was_owned);
                expected.push(item);
            }
            for id in ITEMS {
                prop_assert_eq!(l.is_owned(id), expected.contains(&id));
            }
        }
        prop_assert!(!l.is_owned("not-in-catalog"));
    }
}
