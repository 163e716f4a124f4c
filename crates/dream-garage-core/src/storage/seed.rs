//! Session seed data: the team roster and the item catalog.
//!
//! Every session starts from a seed. The built-in seed mirrors the demo
//! dealership; a TOML file with the same shape can replace it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Config;
use crate::account::{Account, AccountId};
use crate::catalog::{CatalogItem, Rarity};
use crate::error::{CoreError, SeedError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub active_account: AccountId,
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub catalog: Vec<CatalogItem>,
}

impl Seed {
    pub fn builtin() -> Self {
        let accounts = vec![
            Account::new("sarah", "Sarah Mitchell", 12345).with_activity(47, 12, 5),
            Account::new("race-king", "RaceKing", 15420).with_activity(61, 15, 9),
            Account::new("speed-queen", "SpeedQueen", 14210).with_activity(55, 14, 7),
            Account::new("night-rider", "NightRider", 9875).with_activity(38, 9, 2),
        ];

        let car = |id: &str, name: &str, brand: &str, rarity: Rarity, price: u64| {
            CatalogItem::car(id, name, brand, rarity, price).with_asset(&format!("cars/{id}.png"))
        };
        let theme = |id: &str, name: &str, accent: &str, price: u64, description: &str| {
            CatalogItem::theme(id, name, accent, price)
                .with_description(description)
                .with_asset(&format!("themes/{id}.png"))
        };

        let catalog = vec![
            car("honda-civic", "Civic Type R", "Honda", Rarity::Common, 0),
            car("city-cruiser", "City Cruiser", "Metro Motors", Rarity::Common, 8000),
            car("lexus-lc", "LC 500", "Lexus", Rarity::Rare, 8000),
            car("lamborghini", "Huracan EVO", "Lamborghini", Rarity::Legendary, 10000),
            car("street-king", "Street King", "Urban Auto", Rarity::Common, 10000),
            car("neon-racer", "Neon Racer", "Speed Co", Rarity::Rare, 25000),
            car("drift-master", "Drift Master", "Slide Tech", Rarity::Rare, 30000),
            car("phantom-gt", "Phantom GT", "Luxe Motors", Rarity::Legendary, 50000),
            car("chrome-beast", "Chrome Beast", "Metal Works", Rarity::Legendary, 75000),
            theme(
                "showroom",
                "Showroom",
                "#e5e7eb",
                0,
                "Clean white infinity room with spot lighting",
            ),
            theme(
                "underground",
                "Underground",
                "#ff00ff",
                25000,
                "Tokyo drift style with neon strips and wet concrete",
            ),
            theme(
                "penthouse",
                "Penthouse",
                "#3b82f6",
                35000,
                "Glass walls overlooking city at night, modern luxury",
            ),
            theme(
                "cyber",
                "Cyber",
                "#00ffff",
                50000,
                "Tron-like grid floor with holographic effects",
            ),
        ];

        Self {
            active_account: AccountId::from("sarah"),
            accounts,
            catalog,
        }
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| SeedError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Seed for a session under `config`: the configured file (or the
    /// built-in data), with the configured active account applied.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let mut seed = match &config.seed.path {
            Some(path) => {
                tracing::debug!("loading seed from {}", path.display());
                Self::load(path)?
            }
            None => Self::builtin(),
        };
        if let Some(active) = &config.session.active_account {
            seed.active_account = AccountId::from(active.as_str());
        }
        Ok(seed)
    }
}
