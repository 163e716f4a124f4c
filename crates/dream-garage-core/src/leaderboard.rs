//! Team standings by point balance.

use serde::Serialize;

use crate::account::AccountId;
use crate::ledger::RewardLedger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based.
    pub rank: usize,
    pub account: AccountId,
    pub name: String,
    pub points: u64,
    pub is_active: bool,
}

/// All accounts, highest balance first. Equal balances keep seed order.
pub fn standings(ledger: &RewardLedger) -> Vec<Standing> {
    let mut accounts: Vec<_> = ledger.roster().iter().collect();
    accounts.sort_by(|a, b| b.points.cmp(&a.points));
    accounts
        .into_iter()
        .enumerate()
        .map(|(i, a)| Standing {
            rank: i + 1,
            account: a.id.clone(),
            name: a.name.clone(),
            points: a.points,
            is_active: &a.id == ledger.active_id(),
        })
        .collect()
}

pub fn top(ledger: &RewardLedger, n: usize) -> Vec<Standing> {
    let mut all = standings(ledger);
    all.truncate(n);
    all
}

pub fn rank_of(ledger: &RewardLedger, account_id: &str) -> Option<usize> {
    standings(ledger)
        .into_iter()
        .find(|s| s.account.as_str() == account_id)
        .map(|s| s.rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, Roster};
    use crate::catalog::Catalog;

    fn ledger() -> RewardLedger {
        let roster = Roster::from_accounts(vec![
            Account::new("sarah", "Sarah", 100),
            Account::new("mike", "Mike", 300),
            Account::new("jo", "Jo", 100),
        ])
        .unwrap();
        RewardLedger::new(roster, Catalog::default(), AccountId::from("sarah")).unwrap()
    }

    #[test]
    fn ranks_descend_and_ties_keep_seed_order() {
        let l = ledger();
        let order: Vec<_> = standings(&l).iter().map(|s| (s.rank, s.account.to_string())).collect();
        assert_eq!(
            order,
            [(1, "mike".to_string()), (2, "sarah".to_string()), (3, "jo".to_string())]
        );
        assert!(standings(&l)[1].is_active);
    }

    #[test]
    fn awarding_points_moves_the_active_account_up() {
        let mut l = ledger();
        assert_eq!(rank_of(&l, "sarah"), Some(2));
        l.award_points(250);
        assert_eq!(rank_of(&l, "sarah"), Some(1));
        assert_eq!(top(&l, 1)[0].account.as_str(), "sarah");
        assert_eq!(rank_of(&l, "ghost"), None);
    }
}
