//! Client-side orchestration for the crowdfund token-custody program.
//!
//! The deployed program owns two accounts per fund administrator, both
//! derived from fixed seed tags and the administrator's key: a vault that
//! custodies pooled tokens and a state account that records the fund's
//! lifecycle phase. This crate recomputes those addresses, assembles each
//! operation's ordered account list and argument bytes, submits signed
//! transactions through pluggable collaborators, and reads the resulting
//! fund state back.
//!
//! Nothing here talks to a network directly: signing, execution, and
//! account reads go through the [`client::ExecutionNode`],
//! [`client::AccountSource`], and `solana_sdk::signer::Signer` seams, so the
//! same orchestration drives an RPC node, a wallet adapter, or an in-memory
//! chain in tests.

pub mod client;
pub mod config;
pub mod error;
pub mod instructions;
pub mod orchestrator;
pub mod pda;
pub mod reader;
pub mod state;

pub use client::{AccountSource, ExecutionNode, ProgramClient, Receipt, SendFailure};
pub use config::ProgramConfig;
pub use error::FundError;
pub use instructions::{FundInstruction, OperationRequest};
pub use orchestrator::{FundOrchestrator, OperationOutcome};
pub use reader::FundStatusReader;
pub use state::{FundPhase, FundState, FundStatus};
