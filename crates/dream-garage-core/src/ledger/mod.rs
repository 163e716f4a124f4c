mod call;
mod engine;
mod purchase;
mod selection;

pub use call::CallSession;
pub use engine::RewardLedger;
pub use purchase::{PurchaseOutcome, Rejection};
pub use selection::{Selection, Underglow};
