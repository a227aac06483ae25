//! Contract execution engine
//!
//! Per-contract state isolated by address, with two built-in variants:
//!
//! - [`token`] - fungible token with balances and delegated allowances
//! - [`sale`] - timed sale of a fixed unit inventory
//! - [`manager`] - deploys contracts and routes calls by address
//!
//! ## Contract model
//! Contracts are stateful values addressed by a sequentially allocated
//! identifier. Actions are closed enums dispatched by exhaustive matching,
//! and every call is a single deterministic attempt: rejections surface as
//! [`ContractError`], never as silent absorption. Contract balances are a
//! namespace of their own; nothing settles them against ledger balances.

pub mod manager;
pub mod sale;
pub mod token;

pub use manager::{Contract, ContractCall, ContractManager, ContractState, DeployParams};
pub use sale::{SaleAction, SaleState};
pub use token::{TokenAction, TokenState};

use crate::transaction::Amount;

/// Contract execution result
pub type ContractResult<T> = Result<T, ContractError>;

/// Contract rejections
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractError {
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Allowance must be non-negative")]
    NegativeAllowance,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },
    #[error("Not enough allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },
    #[error("Sale has not started yet")]
    SaleNotStarted,
    #[error("Sale has ended")]
    SaleEnded,
    #[error("Not enough units available")]
    NotEnoughUnits,
    #[error("Sale window ends before it starts")]
    InvalidSaleWindow,
    #[error("Contract not found: {0}")]
    UnknownContract(String),
    #[error("Invalid action for contract {0}")]
    InvalidAction(String),
}

/// Typed receipt for a successful contract call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Transfer {
        from: String,
        to: String,
        amount: Amount,
        /// Set when the transfer was spent out of an allowance.
        spender: Option<String>,
    },
    Approval {
        owner: String,
        spender: String,
        amount: Amount,
    },
    Purchase {
        buyer: String,
        units: Amount,
        amount_paid: Amount,
    },
}

/// Milliseconds since the Unix epoch.
pub fn current_timestamp() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
