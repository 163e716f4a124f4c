//! A user session: the ledger plus the state of the front end driving it.
//!
//! The session owns its [`RewardLedger`]; views borrow it through
//! [`GarageSession::ledger`] and mutate only through the methods here or
//! through [`GarageSession::ledger_mut`].

use crate::cart::Cart;
use crate::error::{CoreError, Result, ValidationError};
use crate::ledger::{PurchaseOutcome, RewardLedger, Underglow};
use crate::storage::{Config, PointsConfig, Seed};
use crate::view::View;

pub struct GarageSession {
    ledger: RewardLedger,
    cart: Cart,
    view: View,
    admin_enabled: bool,
    points: PointsConfig,
}

impl GarageSession {
    /// Wrap an existing ledger, applying the config's defaults.
    pub fn new(mut ledger: RewardLedger, config: &Config) -> Result<Self> {
        config.validate()?;
        let underglow: Underglow = config.garage.default_underglow.parse()?;
        if underglow != ledger.selection().underglow {
            ledger.set_underglow(underglow);
        }
        Ok(Self {
            ledger,
            cart: Cart::new(),
            view: View::default(),
            admin_enabled: config.admin.enabled,
            points: config.points.clone(),
        })
    }

    /// Fresh session from the configured seed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let seed = Seed::from_config(config)?;
        let ledger = RewardLedger::from_seed(seed)?;
        Self::new(ledger, config)
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut RewardLedger {
        &mut self.ledger
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) {
        tracing::debug!("view {} -> {}", self.view, view);
        self.view = view;
    }

    pub fn admin_enabled(&self) -> bool {
        self.admin_enabled
    }

    /// Count a call and pay the configured points for it.
    pub fn log_call(&mut self) -> i64 {
        self.ledger.record_call();
        self.ledger.award_points(self.points.per_call);
        self.points.per_call
    }

    /// Count an appointment and pay the configured points for it.
    pub fn log_appointment(&mut self) -> i64 {
        self.ledger.record_appointment();
        self.ledger.award_points(self.points.per_appointment);
        self.points.per_appointment
    }

    pub fn add_to_cart(&mut self, item_id: &str) -> Result<(), ValidationError> {
        self.cart.add(&self.ledger, item_id)
    }

    pub fn remove_from_cart(&mut self, item_id: &str) -> bool {
        self.cart.remove(item_id)
    }

    pub fn checkout(&mut self) -> Vec<PurchaseOutcome> {
        self.cart.checkout(&mut self.ledger)
    }

    /// Award points to any account. Only available with `admin.enabled`.
    pub fn admin_award(&mut self, account_id: &str, amount: i64) -> Result<()> {
        if !self.admin_enabled {
            return Err(CoreError::AdminDisabled);
        }
        if self.ledger.account(account_id).is_none() {
            return Err(ValidationError::UnknownAccount(account_id.to_string()).into());
        }
        tracing::info!("admin award of {} to {}", amount, account_id);
        self.ledger.award_points_to(account_id, amount);
        Ok(())
    }
}
