use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;
use solana_program::system_program;

use crate::config::ProgramConfig;
use crate::instructions::{FundInstruction, OperationRequest};
use crate::pda::{derive_state_address, derive_vault_address};

/// Builds the request that creates `administrator`'s fund. Both program
/// accounts are allocated by this operation, so the system program rides
/// along and the administrator pays rent.
pub fn create(config: &ProgramConfig, administrator: &Pubkey, name: &str) -> OperationRequest {
    let (vault, _) = derive_vault_address(administrator, &config.program_id);
    let (state, _) = derive_state_address(administrator, &config.program_id);

    OperationRequest {
        program_id: config.program_id,
        instruction: FundInstruction::Create { name: name.to_string() },
        accounts: vec![
            AccountMeta::new(vault, false),
            AccountMeta::new(*administrator, true),
            AccountMeta::new(state, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        vault,
        state,
        signer: *administrator,
    }
}
