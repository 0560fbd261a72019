use log::warn;
use solana_program::pubkey::Pubkey;
use solana_sdk::signer::Signer;
use spl_associated_token_account::get_associated_token_address;

use crate::client::{AccountSource, ExecutionNode, ProgramClient, Receipt};
use crate::config::ProgramConfig;
use crate::error::FundError;
use crate::instructions::{self, OperationRequest};
use crate::pda::derive_vault_address;
use crate::reader::FundStatusReader;
use crate::state::FundStatus;

/// Result of one facade operation: what the submission produced, and the
/// authoritative fund status read back afterwards. The status is refreshed
/// on failure paths too, so callers never render an optimistic local guess.
#[derive(Debug)]
pub struct OperationOutcome {
    pub receipt: Result<Receipt, FundError>,
    pub status: Result<FundStatus, FundError>,
}

impl OperationOutcome {
    pub fn is_ok(&self) -> bool {
        self.receipt.is_ok()
    }
}

/// The five user-facing operations over one signing identity.
///
/// `create`/`open`/`close` act on the signer's own fund; `deposit` and
/// `withdraw` target any administrator's fund with the signer as the
/// depositor. The facade holds no mutable state: every call re-derives
/// addresses and rebuilds its request, so overlapping in-flight operations
/// for the same owner cannot observe stale values. Submitted transactions
/// cannot be cancelled; a caller can only stop awaiting the result.
pub struct FundOrchestrator<'a> {
    config: ProgramConfig,
    execution: &'a dyn ExecutionNode,
    source: &'a dyn AccountSource,
    signer: &'a dyn Signer,
    resubmit_attempts: u8,
}

impl<'a> FundOrchestrator<'a> {
    pub fn new(
        config: ProgramConfig,
        execution: &'a dyn ExecutionNode,
        source: &'a dyn AccountSource,
        signer: &'a dyn Signer,
    ) -> Self {
        FundOrchestrator {
            config,
            execution,
            source,
            signer,
            resubmit_attempts: 1,
        }
    }

    /// Extra submissions allowed after a transport failure. Only
    /// `NetworkUnavailable` is ever retried; program rejections and signer
    /// refusals surface immediately.
    pub fn with_resubmit_attempts(mut self, attempts: u8) -> Self {
        self.resubmit_attempts = attempts;
        self
    }

    /// Creates a fund administered by the signer.
    pub fn create(&self, name: &str) -> OperationOutcome {
        let administrator = self.signer.pubkey();
        let request = instructions::create::create(&self.config, &administrator, name);
        self.execute(request, &administrator)
    }

    /// Opens the signer's fund for deposits.
    pub fn open(&self) -> OperationOutcome {
        let administrator = self.signer.pubkey();
        let request = instructions::open::open(&self.config, &administrator);
        self.execute(request, &administrator)
    }

    /// Closes the signer's fund.
    pub fn close(&self) -> OperationOutcome {
        let administrator = self.signer.pubkey();
        let request = instructions::close::close(&self.config, &administrator);
        self.execute(request, &administrator)
    }

    /// Deposits `amount` token units into `fund_owner`'s fund, drawing from
    /// the signer's associated token account for the configured mint.
    pub fn deposit(&self, fund_owner: &Pubkey, amount: u64) -> OperationOutcome {
        let depositor = self.signer.pubkey();
        let depositor_tokens = get_associated_token_address(&depositor, &self.config.token_mint);
        let custody = self.vault_token_account(fund_owner);
        match instructions::deposit::deposit(
            &self.config,
            fund_owner,
            &depositor,
            &depositor_tokens,
            &custody,
            amount,
        ) {
            Ok(request) => self.execute(request, fund_owner),
            Err(error) => self.local_failure(error, fund_owner),
        }
    }

    /// Withdraws `amount` token units from `fund_owner`'s fund into the
    /// signer's associated token account.
    pub fn withdraw(&self, fund_owner: &Pubkey, amount: u64) -> OperationOutcome {
        let depositor = self.signer.pubkey();
        let depositor_tokens = get_associated_token_address(&depositor, &self.config.token_mint);
        let custody = self.vault_token_account(fund_owner);
        match instructions::withdraw::withdraw(
            &self.config,
            fund_owner,
            &depositor,
            &depositor_tokens,
            &custody,
            amount,
        ) {
            Ok(request) => self.execute(request, fund_owner),
            Err(error) => self.local_failure(error, fund_owner),
        }
    }

    /// Authoritative fund status for `owner`, straight from the chain.
    pub fn status(&self, owner: &Pubkey) -> Result<FundStatus, FundError> {
        FundStatusReader::new(&self.config, self.source).status(owner)
    }

    // The program custodies tokens in the vault account itself.
    fn vault_token_account(&self, fund_owner: &Pubkey) -> Pubkey {
        derive_vault_address(fund_owner, &self.config.program_id).0
    }

    fn execute(&self, request: OperationRequest, fund_owner: &Pubkey) -> OperationOutcome {
        let client = ProgramClient::new(self.execution, self.signer);
        let mut receipt = client.submit(&request);

        let mut remaining = self.resubmit_attempts;
        while remaining > 0 && receipt.as_ref().is_err_and(|e| e.is_retryable()) {
            // Rebuilding would yield a byte-identical request, so the same
            // one is resubmitted as-is.
            receipt = client.submit(&request);
            remaining -= 1;
        }

        if let Err(error) = &receipt {
            warn!(
                "{} on fund of {fund_owner} failed: {error}",
                request.instruction.method_name()
            );
        }

        OperationOutcome {
            receipt,
            status: self.status(fund_owner),
        }
    }

    fn local_failure(&self, error: FundError, fund_owner: &Pubkey) -> OperationOutcome {
        warn!("operation on fund of {fund_owner} not submitted: {error}");
        OperationOutcome {
            receipt: Err(error),
            status: self.status(fund_owner),
        }
    }
}
