//! Timed sale contract: a fixed unit inventory sold at a fixed price inside
//! a time window.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CallOutcome, ContractError, ContractResult};
use crate::transaction::Amount;

/// Actions a sale contract accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleAction {
    /// Spend `amount` at the unit price; the units bought are
    /// `amount / unit_price` and may be fractional.
    Purchase { amount: Amount },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleState {
    pub unit_price: Amount,
    pub total_units: Amount,
    pub units_sold: Amount,
    /// Window bounds in epoch milliseconds, both inclusive.
    pub start_time: u64,
    pub end_time: u64,
    /// Per-buyer purchase tally in units.
    pub purchases: HashMap<String, Amount>,
}

impl SaleState {
    pub fn new(unit_price: Amount, total_units: Amount, start_time: u64, end_time: u64) -> Self {
        SaleState {
            unit_price,
            total_units,
            units_sold: Amount::ZERO,
            start_time,
            end_time,
            purchases: HashMap::new(),
        }
    }

    pub fn units_bought_by(&self, buyer: &str) -> Amount {
        *self.purchases.get(buyer).unwrap_or(&Amount::ZERO)
    }

    pub fn remaining_units(&self) -> Amount {
        self.total_units - self.units_sold
    }

    /// Attempt a purchase at time `now`. A rejection leaves `units_sold`
    /// and the buyer tally untouched.
    pub fn execute_at(
        &mut self,
        now: u64,
        sender: &str,
        action: SaleAction,
    ) -> ContractResult<CallOutcome> {
        let SaleAction::Purchase { amount } = action;

        if now < self.start_time {
            return Err(ContractError::SaleNotStarted);
        }
        if now > self.end_time {
            return Err(ContractError::SaleEnded);
        }
        if amount <= Amount::ZERO {
            return Err(ContractError::InvalidAmount);
        }

        let units = amount / self.unit_price;
        if self.units_sold + units > self.total_units {
            return Err(ContractError::NotEnoughUnits);
        }

        self.units_sold += units;
        *self.purchases.entry(sender.to_string()).or_insert(Amount::ZERO) += units;

        Ok(CallOutcome::Purchase {
            buyer: sender.to_string(),
            units,
            amount_paid: amount,
        })
    }
}
