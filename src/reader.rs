use log::warn;
use solana_program::pubkey::Pubkey;

use crate::client::AccountSource;
use crate::config::ProgramConfig;
use crate::error::FundError;
use crate::pda::{derive_state_address, derive_vault_address};
use crate::state::{FundState, FundStatus, StateAccount, VaultAccount};

/// Answers "does this administrator have a fund, and in which phase".
///
/// Addresses are re-derived on every call; nothing is cached between reads,
/// so a status is always computed against the owner identity handed in.
pub struct FundStatusReader<'a> {
    config: &'a ProgramConfig,
    source: &'a dyn AccountSource,
}

impl<'a> FundStatusReader<'a> {
    pub fn new(config: &'a ProgramConfig, source: &'a dyn AccountSource) -> Self {
        FundStatusReader { config, source }
    }

    pub fn status(&self, owner: &Pubkey) -> Result<FundStatus, FundError> {
        let (vault_address, _) = derive_vault_address(owner, &self.config.program_id);
        let (state_address, _) = derive_state_address(owner, &self.config.program_id);

        let vault_data = self.source.account_data(&vault_address)?;
        let state_data = self.source.account_data(&state_address)?;

        match (vault_data, state_data) {
            (Some(vault_bytes), Some(state_bytes)) => {
                let vault = VaultAccount::unpack(&vault_bytes)?;
                let state = StateAccount::unpack(&state_bytes)?;
                Ok(FundStatus::Found(FundState {
                    phase: state.phase(),
                    administrator: vault.owner,
                    name: vault.name,
                    total_deposited: vault.token_balance,
                }))
            }
            (None, None) => Ok(FundStatus::NotFound),
            // Both accounts are created in one instruction; seeing only one
            // means something touched them out of band.
            _ => {
                warn!("fund accounts for {owner} are partially initialized");
                Ok(FundStatus::NotFound)
            }
        }
    }
}
