//! Contract deployment and call routing.
//!
//! The manager carries no business logic: it allocates sequential addresses
//! at deploy time and dispatches calls to the addressed contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use super::sale::{SaleAction, SaleState};
use super::token::{TokenAction, TokenState};
use super::{current_timestamp, CallOutcome, ContractError, ContractResult};
use crate::transaction::Amount;

/// Deploy-time parameters, one variant per contract kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployParams {
    Token {
        total_supply: Amount,
    },
    TimedSale {
        unit_price: Amount,
        total_units: Amount,
        start_time: u64,
        end_time: u64,
    },
}

/// A call addressed to a deployed contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractCall {
    Token(TokenAction),
    Sale(SaleAction),
}

/// Per-kind contract state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContractState {
    Token(TokenState),
    Sale(SaleState),
}

/// A deployed contract: routing metadata plus its isolated state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub address: String,
    pub creator: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    pub state: ContractState,
}

pub struct ContractManager {
    prefix: String,
    contracts: HashMap<String, Contract>,
    next_index: u64,
}

impl ContractManager {
    pub fn new(prefix: impl Into<String>) -> Self {
        ContractManager {
            prefix: prefix.into(),
            contracts: HashMap::new(),
            next_index: 0,
        }
    }

    /// Deploy a contract and return its freshly allocated address.
    /// Non-positive supplies, prices or inventories are rejected up front,
    /// as is a sale window that ends before it starts.
    pub fn deploy(&mut self, creator: &str, params: DeployParams) -> ContractResult<String> {
        let state = match params {
            DeployParams::Token { total_supply } => {
                if total_supply <= Amount::ZERO {
                    return Err(ContractError::InvalidAmount);
                }
                ContractState::Token(TokenState::new(creator, total_supply))
            }
            DeployParams::TimedSale { unit_price, total_units, start_time, end_time } => {
                if unit_price <= Amount::ZERO || total_units <= Amount::ZERO {
                    return Err(ContractError::InvalidAmount);
                }
                if end_time < start_time {
                    return Err(ContractError::InvalidSaleWindow);
                }
                ContractState::Sale(SaleState::new(unit_price, total_units, start_time, end_time))
            }
        };

        let address = format!("{}_contract_{}", self.prefix, self.next_index);
        self.next_index += 1;

        self.contracts.insert(
            address.clone(),
            Contract {
                address: address.clone(),
                creator: creator.to_string(),
                created_at: current_timestamp(),
                state,
            },
        );

        info!(address = %address, creator, "deployed contract");
        Ok(address)
    }

    /// Route a call to the addressed contract using the wall clock.
    pub fn execute(
        &mut self,
        address: &str,
        sender: &str,
        call: ContractCall,
    ) -> ContractResult<CallOutcome> {
        self.execute_at(current_timestamp(), address, sender, call)
    }

    /// Route a call with an explicit timestamp (the sale window check is
    /// the only time-dependent rule).
    pub fn execute_at(
        &mut self,
        now: u64,
        address: &str,
        sender: &str,
        call: ContractCall,
    ) -> ContractResult<CallOutcome> {
        let contract = self
            .contracts
            .get_mut(address)
            .ok_or_else(|| ContractError::UnknownContract(address.to_string()))?;

        match (&mut contract.state, call) {
            (ContractState::Token(token), ContractCall::Token(action)) => {
                token.execute(sender, action)
            }
            (ContractState::Sale(sale), ContractCall::Sale(action)) => {
                sale.execute_at(now, sender, action)
            }
            _ => Err(ContractError::InvalidAction(address.to_string())),
        }
    }

    pub fn contract(&self, address: &str) -> Option<&Contract> {
        self.contracts.get(address)
    }

    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }
}
