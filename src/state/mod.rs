pub mod fund_state;

pub use fund_state::{FundPhase, FundState, FundStatus, StateAccount, VaultAccount};
