//! Integration tests for the reward ledger against the built-in seed.

use chrono::{Duration, Utc};
use dream_garage_core::{leaderboard, Config, GarageSession, RewardLedger, Seed};

fn fresh() -> RewardLedger {
    RewardLedger::from_seed(Seed::builtin()).unwrap()
}

#[test]
fn test_buy_lexus_then_lamborghini_is_declined() {
    let mut ledger = fresh();
    assert_eq!(ledger.active_account().points, 12345);

    assert!(ledger.purchase_item_at("lexus-lc", 8000));
    assert_eq!(ledger.active_account().points, 4345);
    assert!(ledger.is_owned("lexus-lc"));

    assert!(!ledger.purchase_item_at("lamborghini", 10000));
    assert_eq!(ledger.active_account().points, 4345);
    assert!(!ledger.is_owned("lamborghini"));
}

#[test]
fn test_award_to_sarah_touches_nobody_else() {
    let mut ledger = fresh();
    let others: Vec<_> = ledger
        .roster()
        .iter()
        .filter(|a| a.id.as_str() != "sarah")
        .cloned()
        .collect();

    ledger.award_points_to("sarah", 1000);
    assert_eq!(ledger.account("sarah").unwrap().points, 13345);
    for before in others {
        assert_eq!(ledger.account(before.id.as_str()), Some(&before));
    }
}

#[test]
fn test_second_purchase_of_owned_item_never_double_charges() {
    let mut ledger = fresh();
    assert!(ledger.purchase_item("lexus-lc"));
    assert!(!ledger.purchase_item("lexus-lc"));
    assert_eq!(ledger.active_account().points, 4345);
    assert_eq!(ledger.owned().filter(|id| id.as_str() == "lexus-lc").count(), 1);
}

#[test]
fn test_start_then_end_call_mutates_no_account() {
    let mut ledger = fresh();
    let roster_before: Vec<_> = ledger.roster().iter().cloned().collect();
    ledger.start_call();
    assert!(ledger.is_on_call());
    ledger.end_call();
    assert!(!ledger.is_on_call());
    let roster_after: Vec<_> = ledger.roster().iter().cloned().collect();
    assert_eq!(roster_before, roster_after);
    assert!(ledger.end_call().is_none());
}

#[test]
fn test_call_clock_reads_back_elapsed() {
    let mut ledger = fresh();
    let start = Utc::now() - Duration::seconds(125);
    ledger.start_call_at(start);
    let elapsed = ledger.call_elapsed(start + Duration::seconds(125)).unwrap();
    assert_eq!(elapsed.num_seconds(), 125);
}

#[test]
fn test_session_day_moves_leaderboard() {
    let mut config = Config::default();
    config.points.per_appointment = 1500;
    let mut session = GarageSession::from_config(&config).unwrap();
    assert_eq!(leaderboard::rank_of(session.ledger(), "sarah"), Some(3));

    session.log_appointment();
    session.log_appointment();
    assert_eq!(session.ledger().active_account().points, 15345);
    assert_eq!(leaderboard::rank_of(session.ledger(), "sarah"), Some(2));

    session.add_to_cart("neon-racer").unwrap();
    let outcomes = session.checkout();
    assert!(!outcomes[0].is_success());
    assert_eq!(leaderboard::rank_of(session.ledger(), "sarah"), Some(2));
}

#[test]
fn test_purchased_theme_becomes_selectable() {
    let mut config = Config::default();
    config.admin.enabled = true;
    let mut session = GarageSession::from_config(&config).unwrap();
    assert!(session.ledger_mut().select_theme("penthouse").is_err());

    session.admin_award("sarah", 30000).unwrap();
    assert!(session.ledger_mut().purchase_item("penthouse"));
    session.ledger_mut().select_theme("penthouse").unwrap();
    assert_eq!(
        session.ledger().selection().theme.as_ref().map(|t| t.as_str()),
        Some("penthouse")
    );
}
