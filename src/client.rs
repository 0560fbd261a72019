use log::debug;
use solana_program::pubkey::Pubkey;
use solana_sdk::hash::Hash;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::error::FundError;
use crate::instructions::OperationRequest;

/// Failure surfaced by an execution endpoint, before classification.
#[derive(Debug, Clone)]
pub enum SendFailure {
    /// The cluster executed the transaction and the program rejected it.
    Rejected(String),
    /// The transaction could not reach the cluster.
    Unavailable(String),
}

/// Execution collaborator: accepts a signed transaction and returns its
/// identifier, or a structured failure. Implementations own transport and
/// timeouts; they must not retry and must not sign.
pub trait ExecutionNode {
    fn latest_blockhash(&self) -> Result<Hash, SendFailure>;
    fn send_transaction(&self, transaction: Transaction) -> Result<Signature, SendFailure>;
}

/// Read collaborator: raw account bytes, or `None` for an address that was
/// never initialized. Absence is not an error; transport failures are
/// reported as [`FundError::NetworkUnavailable`].
pub trait AccountSource {
    fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, FundError>;
}

/// Confirmation artifact for an accepted operation.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub signature: Signature,
    /// Custody vault the operation touched.
    pub vault: Pubkey,
    /// State account the operation touched.
    pub state: Pubkey,
}

/// Serializes, signs, and submits one [`OperationRequest`].
///
/// Exactly one submission attempt per call; retry policy belongs to the
/// orchestrator. All failures are classified into the [`FundError`]
/// taxonomy rather than leaking transport errors upward.
pub struct ProgramClient<'a> {
    execution: &'a dyn ExecutionNode,
    signer: &'a dyn Signer,
}

impl<'a> ProgramClient<'a> {
    pub fn new(execution: &'a dyn ExecutionNode, signer: &'a dyn Signer) -> Self {
        ProgramClient { execution, signer }
    }

    pub fn submit(&self, request: &OperationRequest) -> Result<Receipt, FundError> {
        let blockhash = self.execution.latest_blockhash().map_err(classify)?;

        let mut transaction =
            Transaction::new_with_payer(&[request.to_instruction()], Some(&request.signer));
        let signers: Vec<&dyn Signer> = vec![self.signer];
        transaction
            .try_sign(&signers, blockhash)
            .map_err(|e| FundError::SignerDeclined(e.to_string()))?;

        debug!(
            "submitting {} for vault {}",
            request.instruction.method_name(),
            request.vault
        );
        let signature = self.execution.send_transaction(transaction).map_err(classify)?;

        Ok(Receipt {
            signature,
            vault: request.vault,
            state: request.state,
        })
    }
}

fn classify(failure: SendFailure) -> FundError {
    match failure {
        SendFailure::Rejected(reason) => FundError::RejectedByProgram(reason),
        SendFailure::Unavailable(reason) => FundError::NetworkUnavailable(reason),
    }
}
