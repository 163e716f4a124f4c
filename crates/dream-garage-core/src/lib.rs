//! # Dream Garage Core Library
//!
//! Business logic for the Dream Garage rewards app used by automotive BDC
//! teams: call and appointment activity earns points, points unlock cars and
//! garage environments, and badges track progress. The CLI and any other
//! front end are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Reward Ledger**: owned, in-memory state machine for points,
//!   ownership, the active call and the garage selection
//! - **Catalog / Roster**: immutable items and seed-ordered accounts
//! - **Leaderboard / Achievements**: read-only views derived from the ledger
//! - **Storage**: TOML configuration and seed files (ledger state itself is
//!   never persisted)
//!
//! ## Key Components
//!
//! - [`RewardLedger`]: the ledger
//! - [`GarageSession`]: ledger plus cart, current view and config
//! - [`Config`]: application configuration management
//! - [`Seed`]: roster and catalog a session starts from

pub mod account;
pub mod achievements;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod ledger;
pub mod session;
pub mod storage;
pub mod view;

pub use account::{Account, AccountId, Roster};
pub use achievements::{AchievementCategory, AchievementProgress};
pub use cart::Cart;
pub use catalog::{Catalog, CatalogItem, Category, ItemId, ItemKind, Rarity};
pub use error::{ConfigError, CoreError, SeedError, ValidationError};
pub use events::Event;
pub use leaderboard::Standing;
pub use ledger::{CallSession, PurchaseOutcome, Rejection, RewardLedger, Selection, Underglow};
pub use session::GarageSession;
pub use storage::{Config, Seed};
pub use view::View;
