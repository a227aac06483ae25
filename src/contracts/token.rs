//! Fungible token contract: fixed supply, balances and delegated allowances.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CallOutcome, ContractError, ContractResult};
use crate::transaction::Amount;

/// Actions a token contract accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenAction {
    Transfer { to: String, amount: Amount },
    Approve { spender: String, amount: Amount },
    TransferFrom { from: String, to: String, amount: Amount },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenState {
    pub total_supply: Amount,
    pub balances: HashMap<String, Amount>,
    /// owner -> spender -> remaining delegated allowance
    pub allowances: HashMap<String, HashMap<String, Amount>>,
}

impl TokenState {
    /// The whole supply starts in the creator's balance.
    pub fn new(creator: &str, total_supply: Amount) -> Self {
        let mut balances = HashMap::new();
        balances.insert(creator.to_string(), total_supply);
        TokenState {
            total_supply,
            balances,
            allowances: HashMap::new(),
        }
    }

    pub fn balance_of(&self, address: &str) -> Amount {
        *self.balances.get(address).unwrap_or(&Amount::ZERO)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn execute(&mut self, sender: &str, action: TokenAction) -> ContractResult<CallOutcome> {
        match action {
            TokenAction::Transfer { to, amount } => self.transfer(sender, &to, amount),
            TokenAction::Approve { spender, amount } => self.approve(sender, &spender, amount),
            TokenAction::TransferFrom { from, to, amount } => {
                self.transfer_from(sender, &from, &to, amount)
            }
        }
    }

    fn transfer(&mut self, sender: &str, to: &str, amount: Amount) -> ContractResult<CallOutcome> {
        if amount <= Amount::ZERO {
            return Err(ContractError::InvalidAmount);
        }
        let have = self.balance_of(sender);
        if have < amount {
            return Err(ContractError::InsufficientBalance { have, need: amount });
        }

        self.balances.insert(sender.to_string(), have - amount);
        *self.balances.entry(to.to_string()).or_insert(Amount::ZERO) += amount;

        Ok(CallOutcome::Transfer {
            from: sender.to_string(),
            to: to.to_string(),
            amount,
            spender: None,
        })
    }

    /// Overwrites (never accumulates) the allowance `sender -> spender`.
    fn approve(&mut self, sender: &str, spender: &str, amount: Amount) -> ContractResult<CallOutcome> {
        if amount < Amount::ZERO {
            return Err(ContractError::NegativeAllowance);
        }

        self.allowances
            .entry(sender.to_string())
            .or_default()
            .insert(spender.to_string(), amount);

        Ok(CallOutcome::Approval {
            owner: sender.to_string(),
            spender: spender.to_string(),
            amount,
        })
    }

    fn transfer_from(
        &mut self,
        sender: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> ContractResult<CallOutcome> {
        if amount <= Amount::ZERO {
            return Err(ContractError::InvalidAmount);
        }
        let allowed = self.allowance(from, sender);
        if allowed < amount {
            return Err(ContractError::InsufficientAllowance { have: allowed, need: amount });
        }
        let have = self.balance_of(from);
        if have < amount {
            return Err(ContractError::InsufficientBalance { have, need: amount });
        }

        self.balances.insert(from.to_string(), have - amount);
        *self.balances.entry(to.to_string()).or_insert(Amount::ZERO) += amount;
        self.allowances
            .entry(from.to_string())
            .or_default()
            .insert(sender.to_string(), allowed - amount);

        Ok(CallOutcome::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            spender: Some(sender.to_string()),
        })
    }
}
