use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::error::FundError;
use crate::instructions::{check_amount, FundInstruction, OperationRequest};
use crate::pda::{derive_state_address, derive_vault_address};

/// Builds the request that moves `amount` token units from the depositor's
/// token account into the fund's custody account. The fund is addressed by
/// its owner (`fund_owner`), not by the depositor: derivation always runs
/// against the administrator who created it.
pub fn deposit(
    config: &ProgramConfig,
    fund_owner: &Pubkey,
    depositor: &Pubkey,
    depositor_token_account: &Pubkey,
    vault_token_account: &Pubkey,
    amount: u64,
) -> Result<OperationRequest, FundError> {
    let amount = check_amount(amount)?;
    let (vault, _) = derive_vault_address(fund_owner, &config.program_id);
    let (state, _) = derive_state_address(fund_owner, &config.program_id);

    Ok(OperationRequest {
        program_id: config.program_id,
        instruction: FundInstruction::Deposit { amount },
        accounts: vec![
            AccountMeta::new(vault, false),
            AccountMeta::new(*depositor, true),
            AccountMeta::new(state, false),
            AccountMeta::new(*depositor_token_account, false),
            AccountMeta::new_readonly(config.token_mint, false),
            AccountMeta::new(*vault_token_account, false),
            AccountMeta::new_readonly(config.token_program, false),
        ],
        vault,
        state,
        signer: *depositor,
    })
}
