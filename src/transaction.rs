//! Ledger transaction records
//!
//! Transactions here are plain data: they are never independently signed
//! inside the core. Address validation and key handling belong to the
//! surrounding services that feed this ledger.

use fixed::types::I64F64;
use serde::{Deserialize, Serialize};

/// Deterministic fixed-point amount type.
///
/// Signed on purpose: admission checks balances, but sealing applies the
/// whole pending queue unconditionally, so several admitted transactions
/// from one sender can jointly overdraw and the table must represent that.
pub type Amount = I64F64;

/// Reserved sender value meaning "minted by the system", exempt from debit.
pub const NULL_SENDER: &str = "0x0";

/// Classification tag carried by every ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Genesis,
    Transfer,
    Mint,
}

impl TxKind {
    fn digest_tag(&self) -> u8 {
        match self {
            TxKind::Genesis => 0,
            TxKind::Transfer => 1,
            TxKind::Mint => 2,
        }
    }
}

/// A single ledger record as it appears in the pending queue and in blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxRecord {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub kind: TxKind,
    pub network: String,
}

impl TxRecord {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: Amount,
        timestamp: u64,
        kind: TxKind,
        network: impl Into<String>,
    ) -> Self {
        TxRecord {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            timestamp,
            kind,
            network: network.into(),
        }
    }

    /// True when this record is a system mint rather than a user transfer.
    pub fn is_mint(&self) -> bool {
        self.sender == NULL_SENDER
    }

    /// Canonical byte form fed into the block hash.
    pub fn digest_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(self.sender.as_bytes());
        bytes.extend_from_slice(self.recipient.as_bytes());
        bytes.extend_from_slice(&self.amount.to_le_bytes());
        bytes.extend_from_slice(&self.timestamp.to_le_bytes());
        bytes.push(self.kind.digest_tag());
        bytes.extend_from_slice(self.network.as_bytes());
        bytes
    }

    /// True when the record touches the given address on either side.
    pub fn involves(&self, address: &str) -> bool {
        self.sender == address || self.recipient == address
    }
}
