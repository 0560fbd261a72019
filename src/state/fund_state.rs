use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::config::discriminator;
use crate::error::FundError;

/// Lifecycle phase of a fund, as recorded on chain. A fund with no state
/// account is uninitialized and reported as [`FundStatus::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundPhase {
    Created,
    Open,
    Closed,
}

/// Payload of the program's vault account, after the 8-byte tag.
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub struct VaultAccount {
    pub name: String,
    pub balance: u64,
    pub token_balance: u64, // running total of deposits minus withdrawals
    pub owner: Pubkey,
}

/// Payload of the program's state account, after the 8-byte tag.
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub struct StateAccount {
    pub started: bool,
    pub ended: bool,
}

impl StateAccount {
    pub fn phase(&self) -> FundPhase {
        if self.ended {
            FundPhase::Closed
        } else if self.started {
            FundPhase::Open
        } else {
            FundPhase::Created
        }
    }
}

impl VaultAccount {
    pub fn unpack(data: &[u8]) -> Result<Self, FundError> {
        unpack_account("Vault", data)
    }
}

impl StateAccount {
    pub fn unpack(data: &[u8]) -> Result<Self, FundError> {
        unpack_account("State", data)
    }
}

/// Checks the account tag, then decodes a borsh prefix of the remainder.
/// The program allocates both accounts with fixed space, so the payload is
/// followed by zero padding that must not fail the decode.
fn unpack_account<T: BorshDeserialize>(name: &str, data: &[u8]) -> Result<T, FundError> {
    let tag = discriminator("account", name);
    let payload = data
        .strip_prefix(tag.as_slice())
        .ok_or_else(|| FundError::Configuration(format!("account is not a {name} account")))?;
    let mut rest = payload;
    T::deserialize(&mut rest)
        .map_err(|e| FundError::Configuration(format!("undecodable {name} account: {e}")))
}

/// Read-only projection of a fund, assembled from both program accounts.
/// The client never authors this; the program creates and mutates it.
#[derive(Debug, Clone)]
pub struct FundState {
    pub phase: FundPhase,
    pub administrator: Pubkey,
    pub name: String,
    pub total_deposited: u64,
}

/// Outcome of a status read. Absence is a normal outcome, not an error: it
/// is how "this administrator has never created a fund" is reported.
#[derive(Debug, Clone)]
pub enum FundStatus {
    NotFound,
    Found(FundState),
}

impl FundStatus {
    pub fn phase(&self) -> Option<FundPhase> {
        match self {
            FundStatus::NotFound => None,
            FundStatus::Found(state) => Some(state.phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(name: &str, payload: &[u8], space: usize) -> Vec<u8> {
        let mut data = discriminator("account", name).to_vec();
        data.extend_from_slice(payload);
        data.resize(space, 0);
        data
    }

    #[test]
    fn phase_mapping_follows_lifecycle() {
        let created = StateAccount { started: false, ended: false };
        let open = StateAccount { started: true, ended: false };
        let closed = StateAccount { started: true, ended: true };
        assert_eq!(created.phase(), FundPhase::Created);
        assert_eq!(open.phase(), FundPhase::Open);
        assert_eq!(closed.phase(), FundPhase::Closed);
    }

    #[test]
    fn unpacks_vault_with_trailing_padding() {
        let owner = Pubkey::new_unique();
        let vault = VaultAccount {
            name: "CrowdFunding".to_string(),
            balance: 0,
            token_balance: 1000,
            owner,
        };
        let data = packed("Vault", &borsh::to_vec(&vault).unwrap(), 1024);
        let decoded = VaultAccount::unpack(&data).unwrap();
        assert_eq!(decoded.name, "CrowdFunding");
        assert_eq!(decoded.token_balance, 1000);
        assert_eq!(decoded.owner, owner);
    }

    #[test]
    fn unpacks_state_with_trailing_padding() {
        let data = packed("State", &[1, 0], 1024);
        let decoded = StateAccount::unpack(&data).unwrap();
        assert_eq!(decoded.phase(), FundPhase::Open);
    }

    #[test]
    fn rejects_wrong_account_tag() {
        let data = packed("State", &[0, 0], 1024);
        let err = VaultAccount::unpack(&data).unwrap_err();
        assert!(matches!(err, FundError::Configuration(_)));
    }

    #[test]
    fn rejects_truncated_payload() {
        let data = discriminator("account", "State").to_vec();
        let err = StateAccount::unpack(&data).unwrap_err();
        assert!(matches!(err, FundError::Configuration(_)));
    }
}
