use solana_program::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::instructions::open::lifecycle_request;
use crate::instructions::{FundInstruction, OperationRequest};

/// Builds the request that closes `administrator`'s fund. Account shape is
/// identical to `open`; only the method tag differs.
pub fn close(config: &ProgramConfig, administrator: &Pubkey) -> OperationRequest {
    lifecycle_request(config, administrator, FundInstruction::Close)
}
