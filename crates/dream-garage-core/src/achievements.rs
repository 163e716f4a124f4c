//! Achievement badges
//!
//! Badges are evaluated on demand from the ledger; nothing about them is
//! stored. A badge is unlocked once its metric reaches the target.

use serde::Serialize;

use crate::catalog::{Category, Rarity};
use crate::ledger::RewardLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Daily,
    Speed,
    Team,
}

/// What a badge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CallsToday,
    AppointmentsToday,
    StreakDays,
    CarsOwned,
    LegendaryCarsOwned,
    ThemesOwned,
    Points,
}

impl Metric {
    pub fn measure(&self, ledger: &RewardLedger) -> u64 {
        let active = ledger.active_account();
        match self {
            Metric::CallsToday => active.calls_today as u64,
            Metric::AppointmentsToday => active.appointments_today as u64,
            Metric::StreakDays => active.streak as u64,
            Metric::CarsOwned => ledger.owned_count(Category::Car) as u64,
            Metric::LegendaryCarsOwned => ledger
                .owned()
                .filter_map(|id| ledger.catalog().get(id.as_str()))
                .filter(|item| item.rarity() == Some(Rarity::Legendary))
                .count() as u64,
            Metric::ThemesOwned => ledger.owned_count(Category::Theme) as u64,
            Metric::Points => active.points,
        }
    }
}

/// How far a badge's metric has to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Fixed(u64),
    /// Every theme in the catalog, so seed files can add or drop themes.
    AllThemes,
}

impl Target {
    pub fn resolve(&self, ledger: &RewardLedger) -> u64 {
        match self {
            Target::Fixed(n) => *n,
            Target::AllThemes => ledger.catalog().themes().count() as u64,
        }
    }
}

/// Achievement definition
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub metric: Metric,
    pub target: Target,
}

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "daily_warrior",
        title: "Daily Warrior",
        description: "Make 50 calls in a day",
        category: AchievementCategory::Daily,
        metric: Metric::CallsToday,
        target: Target::Fixed(50),
    },
    Achievement {
        id: "speed_demon",
        title: "Speed Demon",
        description: "Book 10 appointments in a day",
        category: AchievementCategory::Speed,
        metric: Metric::AppointmentsToday,
        target: Target::Fixed(10),
    },
    Achievement {
        id: "team_player",
        title: "Team Player",
        description: "Keep a 7-day streak",
        category: AchievementCategory::Team,
        metric: Metric::StreakDays,
        target: Target::Fixed(7),
    },
    Achievement {
        id: "collector",
        title: "Collector",
        description: "Own 3 legendary cars",
        category: AchievementCategory::Daily,
        metric: Metric::LegendaryCarsOwned,
        target: Target::Fixed(3),
    },
    Achievement {
        id: "perfectionist",
        title: "Perfectionist",
        description: "Keep a 30-day streak",
        category: AchievementCategory::Speed,
        metric: Metric::StreakDays,
        target: Target::Fixed(30),
    },
    Achievement {
        id: "interior_designer",
        title: "Interior Designer",
        description: "Unlock every garage environment",
        category: AchievementCategory::Team,
        metric: Metric::ThemesOwned,
        target: Target::AllThemes,
    },
    Achievement {
        id: "high_roller",
        title: "High Roller",
        description: "Hold 20,000 points",
        category: AchievementCategory::Daily,
        metric: Metric::Points,
        target: Target::Fixed(20_000),
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    /// Metric value, capped at `target`.
    pub progress: u64,
    pub target: u64,
    /// 0..=100
    pub percent: u8,
    pub unlocked: bool,
}

impl Achievement {
    pub fn evaluate(&self, ledger: &RewardLedger) -> AchievementProgress {
        let value = self.metric.measure(ledger);
        let target = self.target.resolve(ledger);
        let progress = value.min(target);
        let percent = if target == 0 {
            100
        } else {
            (progress.saturating_mul(100) / target) as u8
        };
        AchievementProgress {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            progress,
            target,
            percent,
            unlocked: value >= target,
        }
    }
}

/// Every badge for the active account, in definition order.
pub fn evaluate_all(ledger: &RewardLedger) -> Vec<AchievementProgress> {
    ACHIEVEMENTS.iter().map(|a| a.evaluate(ledger)).collect()
}
