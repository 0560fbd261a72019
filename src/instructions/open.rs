use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::instructions::{FundInstruction, OperationRequest};
use crate::pda::{derive_state_address, derive_vault_address};

/// Builds the request that opens `administrator`'s fund for deposits.
///
/// The program checks the claimed administrator against the one recorded at
/// creation; the builder passes the identity through unchanged and does not
/// re-validate it locally.
pub fn open(config: &ProgramConfig, administrator: &Pubkey) -> OperationRequest {
    lifecycle_request(config, administrator, FundInstruction::Open)
}

pub(super) fn lifecycle_request(
    config: &ProgramConfig,
    administrator: &Pubkey,
    instruction: FundInstruction,
) -> OperationRequest {
    let (vault, _) = derive_vault_address(administrator, &config.program_id);
    let (state, _) = derive_state_address(administrator, &config.program_id);

    OperationRequest {
        program_id: config.program_id,
        instruction,
        accounts: vec![
            AccountMeta::new(vault, false),
            AccountMeta::new(state, false),
            AccountMeta::new(*administrator, true),
        ],
        vault,
        state,
        signer: *administrator,
    }
}
