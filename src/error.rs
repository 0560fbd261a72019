use thiserror::Error;

/// Every failure a caller can observe from this crate.
///
/// The kinds are disjoint on purpose: only [`FundError::NetworkUnavailable`]
/// is safe to retry, because address derivation and request building are
/// deterministic and resubmitting reproduces a byte-identical transaction.
/// Program rejections repeat on retry and signer refusals are the user's
/// decision, so both are surfaced verbatim.
#[derive(Debug, Error)]
pub enum FundError {
    /// Malformed program, mint, or interface description. Fatal; detected at
    /// configuration load, never mid-operation.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Local amount validation failed before any network call.
    #[error("amount must be a positive token unit count, got {0}")]
    InvalidAmount(u64),

    /// The program executed the transaction and rejected it.
    #[error("rejected by program: {0}")]
    RejectedByProgram(String),

    /// Transient transport failure; the request never reached the program.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The signing collaborator refused to sign.
    #[error("signer declined: {0}")]
    SignerDeclined(String),
}

impl FundError {
    /// True only for failures where resubmitting the same request can help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FundError::NetworkUnavailable(_))
    }
}
