pub mod close;
pub mod create;
pub mod deposit;
pub mod open;
pub mod withdraw;

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::config::discriminator;
use crate::error::FundError;

/// Argument payload of each program operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundInstruction {
    /// Create a fund for the administrator.
    /// Accounts expected:
    /// 0. [writable] Fund vault (PDA, created)
    /// 1. [writable, signer] Administrator
    /// 2. [writable] Fund state (PDA, created)
    /// 3. [] System program
    Create { name: String },

    /// Open the fund for deposits. Wire name `start_sale`.
    /// Accounts expected:
    /// 0. [writable] Fund vault (PDA)
    /// 1. [writable] Fund state (PDA)
    /// 2. [writable, signer] Administrator (must match the recorded one)
    Open,

    /// Close the fund. Wire name `end_sale`. Same accounts as `Open`.
    Close,

    /// Move `amount` token units from the depositor into custody.
    /// Accounts expected:
    /// 0. [writable] Fund vault (PDA)
    /// 1. [writable, signer] Depositor
    /// 2. [writable] Fund state (PDA)
    /// 3. [writable] Depositor token account (source)
    /// 4. [] Token mint
    /// 5. [writable] Vault token account (destination)
    /// 6. [] Token program
    Deposit { amount: u64 },

    /// Move `amount` token units out of custody back to the depositor.
    /// Same shape as `Deposit` with the source/destination token accounts
    /// swapped (positions 3 and 5).
    Withdraw { amount: u64 },
}

impl FundInstruction {
    /// Operation name as the deployed program exports it.
    pub fn method_name(&self) -> &'static str {
        match self {
            FundInstruction::Create { .. } => "create",
            FundInstruction::Open => "start_sale",
            FundInstruction::Close => "end_sale",
            FundInstruction::Deposit { .. } => "deposit",
            FundInstruction::Withdraw { .. } => "withdraw",
        }
    }

    /// Serializes into the program's wire encoding: 8-byte method tag
    /// followed by borsh-encoded arguments.
    pub fn pack(&self) -> Vec<u8> {
        let mut data = discriminator("global", self.method_name()).to_vec();
        match self {
            FundInstruction::Create { name } => {
                data.extend_from_slice(&(name.len() as u32).to_le_bytes());
                data.extend_from_slice(name.as_bytes());
            }
            FundInstruction::Deposit { amount } | FundInstruction::Withdraw { amount } => {
                data.extend_from_slice(&amount.to_le_bytes());
            }
            FundInstruction::Open | FundInstruction::Close => {}
        }
        data
    }
}

/// A fully resolved operation: argument payload plus the ordered account
/// list the program expects, with the derived addresses it touches.
///
/// Immutable by construction; building one has no side effects and network
/// submission is [`crate::client::ProgramClient`]'s job. Rebuilding from the
/// same inputs yields a byte-identical request, which is what makes
/// resubmission after a transport failure safe.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub program_id: Pubkey,
    pub instruction: FundInstruction,
    pub accounts: Vec<AccountMeta>,
    /// Derived custody vault this operation touches.
    pub vault: Pubkey,
    /// Derived state account this operation touches.
    pub state: Pubkey,
    /// Identity that must sign the transaction and pays the fee.
    pub signer: Pubkey,
}

impl OperationRequest {
    pub fn to_instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts.clone(),
            data: self.instruction.pack(),
        }
    }
}

/// Deposits and withdrawals must move at least one token unit; the upper
/// bound is the token's maximum representable unit count, `u64::MAX`.
pub(crate) fn check_amount(amount: u64) -> Result<u64, FundError> {
    if amount == 0 {
        return Err(FundError::InvalidAmount(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramConfig;

    fn test_config() -> ProgramConfig {
        ProgramConfig::new(
            "EYChmD6FbmkkAw84tHpeSAwTn75Uqht6YJQd9Ra7Lpkf",
            "DDfaVKveDiXYcezeLQa2aZZyJRSd92MZBPRBLbweBbby",
        )
        .unwrap()
    }

    #[test]
    fn create_packs_tag_and_name() {
        let data = FundInstruction::Create { name: "CrowdFunding".to_string() }.pack();
        assert_eq!(&data[..8], &[24, 30, 200, 40, 5, 28, 7, 119]);
        assert_eq!(&data[8..12], &12u32.to_le_bytes());
        assert_eq!(&data[12..], b"CrowdFunding");
    }

    #[test]
    fn deposit_packs_tag_and_amount() {
        let data = FundInstruction::Deposit { amount: 1000 }.pack();
        assert_eq!(&data[..8], &[242, 35, 198, 137, 82, 225, 242, 182]);
        assert_eq!(&data[8..], &1000u64.to_le_bytes());
    }

    #[test]
    fn open_and_close_carry_no_arguments() {
        assert_eq!(FundInstruction::Open.pack().len(), 8);
        assert_eq!(FundInstruction::Close.pack().len(), 8);
    }

    #[test]
    fn zero_amount_fails_before_building_accounts() {
        let config = test_config();
        let owner = Pubkey::new_unique();
        let depositor = Pubkey::new_unique();
        let source = Pubkey::new_unique();
        let custody = Pubkey::new_unique();

        let err = deposit::deposit(&config, &owner, &depositor, &source, &custody, 0).unwrap_err();
        assert!(matches!(err, FundError::InvalidAmount(0)));

        let err = withdraw::withdraw(&config, &owner, &depositor, &source, &custody, 0).unwrap_err();
        assert!(matches!(err, FundError::InvalidAmount(0)));
    }

    #[test]
    fn deposit_and_withdraw_swap_token_roles_position_for_position() {
        let config = test_config();
        let owner = Pubkey::new_unique();
        let depositor = Pubkey::new_unique();
        let depositor_tokens = Pubkey::new_unique();
        let vault_tokens = Pubkey::new_unique();

        let dep = deposit::deposit(&config, &owner, &depositor, &depositor_tokens, &vault_tokens, 7)
            .unwrap();
        let wit = withdraw::withdraw(&config, &owner, &depositor, &depositor_tokens, &vault_tokens, 7)
            .unwrap();

        assert_eq!(dep.accounts.len(), wit.accounts.len());
        assert_eq!(dep.accounts[3].pubkey, depositor_tokens);
        assert_eq!(dep.accounts[5].pubkey, vault_tokens);
        assert_eq!(wit.accounts[3].pubkey, vault_tokens);
        assert_eq!(wit.accounts[5].pubkey, depositor_tokens);
        for position in [0, 1, 2, 4, 6] {
            assert_eq!(dep.accounts[position].pubkey, wit.accounts[position].pubkey);
        }
    }

    #[test]
    fn create_orders_accounts_for_allocation() {
        let config = test_config();
        let admin = Pubkey::new_unique();
        let request = create::create(&config, &admin, "fund");

        assert_eq!(request.accounts.len(), 4);
        assert_eq!(request.accounts[0].pubkey, request.vault);
        assert_eq!(request.accounts[1].pubkey, admin);
        assert!(request.accounts[1].is_signer);
        assert_eq!(request.accounts[2].pubkey, request.state);
        assert_eq!(
            request.accounts[3].pubkey,
            solana_program::system_program::id()
        );
        assert_eq!(request.signer, admin);
    }

    #[test]
    fn open_and_close_share_account_shape() {
        let config = test_config();
        let admin = Pubkey::new_unique();
        let open = open::open(&config, &admin);
        let close = close::close(&config, &admin);

        assert_eq!(open.accounts.len(), 3);
        for position in 0..3 {
            assert_eq!(open.accounts[position].pubkey, close.accounts[position].pubkey);
        }
        assert_eq!(open.accounts[2].pubkey, admin);
        assert!(open.accounts[2].is_signer);
        assert_eq!(open.instruction.method_name(), "start_sale");
        assert_eq!(close.instruction.method_name(), "end_sale");
    }
}
