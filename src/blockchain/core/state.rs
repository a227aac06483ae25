use crate::transaction::{Amount, TxRecord};
use std::collections::HashMap;

/// The account balance table.
///
/// Entries are created lazily on first touch and never removed; an absent
/// address simply reads as zero.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BalanceState {
    pub balances: HashMap<String, Amount>,
}

impl BalanceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_balance(&self, address: &str) -> Amount {
        *self.balances.get(address).unwrap_or(&Amount::ZERO)
    }

    pub fn credit(&mut self, address: &str, amount: Amount) {
        *self.balances.entry(address.to_string()).or_insert(Amount::ZERO) += amount;
    }

    /// Settle one record: debit the sender unless it is the null-sender
    /// mint sentinel, credit the recipient.
    pub fn apply_transaction(&mut self, tx: &TxRecord) {
        if !tx.is_mint() {
            *self.balances.entry(tx.sender.clone()).or_insert(Amount::ZERO) -= tx.amount;
        }
        *self.balances.entry(tx.recipient.clone()).or_insert(Amount::ZERO) += tx.amount;
    }
}
