use crate::blockchain::core::state::BalanceState;
use crate::blockchain::core::validation::verify_blocks;
use crate::config::{NetworkInfo, NetworkParams};
use crate::transaction::{Amount, TxKind, TxRecord, NULL_SENDER};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub type Sha256Hash = [u8; 32];

/// Network tag a block falls back to when its batch is empty.
pub const DEFAULT_NETWORK: &str = "mainnet";

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: Sha256Hash = [0u8; 32];

/// Milliseconds since the Unix epoch.
fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

/// An immutable sealed batch of transactions.
///
/// The only mutation a block ever sees is the pre-publication nonce search
/// in [`Block::seal`]; after that its stored hash must always equal
/// [`Block::compute_hash`] over the current field values.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub index: u64,
    pub transactions: Vec<TxRecord>,
    pub timestamp: u64,
    pub previous_hash: Sha256Hash,
    pub nonce: u64,
    pub network: String,
    pub hash: Sha256Hash,
}

impl Block {
    /// Build a block with nonce 0 and its initial hash. The network tag is
    /// taken from the first transaction of the batch, or [`DEFAULT_NETWORK`]
    /// for an empty batch.
    pub fn new(
        index: u64,
        transactions: Vec<TxRecord>,
        timestamp: u64,
        previous_hash: Sha256Hash,
    ) -> Self {
        let network = transactions
            .first()
            .map(|tx| tx.network.clone())
            .unwrap_or_else(|| DEFAULT_NETWORK.to_string());

        let mut block = Block {
            index,
            transactions,
            timestamp,
            previous_hash,
            nonce: 0,
            network,
            hash: [0u8; 32],
        };
        block.hash = block.compute_hash();
        block
    }

    /// Deterministic, order-sensitive digest over the canonical
    /// concatenation of every header field and transaction.
    pub fn compute_hash(&self) -> Sha256Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_le_bytes());
        for tx in &self.transactions {
            hasher.update(tx.digest_bytes());
        }
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update(self.previous_hash);
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(self.network.as_bytes());
        hasher.finalize().into()
    }

    /// True when the first `difficulty` hex digits of `hash` are zero.
    pub fn meets_difficulty(hash: &Sha256Hash, difficulty: u32) -> bool {
        (0..difficulty as usize).all(|i| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            nibble == 0
        })
    }

    /// Proof-of-work nonce search: increment the nonce and rehash until the
    /// hash carries `difficulty` leading hex zeros. Expected work grows as
    /// 16^difficulty; the loop runs to completion with no suspension points.
    pub fn seal(&mut self, difficulty: u32) {
        while !Self::meets_difficulty(&self.hash, difficulty) {
            self.nonce += 1;
            self.hash = self.compute_hash();
        }
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Plain-data snapshot for external consumers, with hex-encoded hashes
    /// and floating-point amounts at the boundary.
    pub fn to_json(&self) -> serde_json::Value {
        let transactions: Vec<serde_json::Value> = self
            .transactions
            .iter()
            .map(|tx| {
                serde_json::json!({
                    "sender": tx.sender,
                    "recipient": tx.recipient,
                    "amount": tx.amount.to_num::<f64>(),
                    "timestamp": tx.timestamp,
                    "kind": tx.kind,
                    "network": tx.network,
                })
            })
            .collect();

        serde_json::json!({
            "index": self.index,
            "transactions": transactions,
            "timestamp": self.timestamp,
            "previous_hash": hex::encode(self.previous_hash),
            "nonce": self.nonce,
            "hash": self.hash_hex(),
            "network": self.network,
        })
    }
}

/// Append-only ledger: sealed blocks, the pending queue awaiting the next
/// seal, and the account balance table.
///
/// Admission and sealing are two distinct phases. `admit_transaction`
/// checks the sender's balance at admission time but does not move funds;
/// `seal` applies the whole queue in order without re-checking. See
/// [`Blockchain::seal`] for the consequences.
pub struct Blockchain {
    pub blocks: Vec<Block>,
    pub pending: Vec<TxRecord>,
    pub state: BalanceState,
    pub params: NetworkParams,
}

impl Blockchain {
    /// Create a chain for one network instance, seeding a genesis block
    /// whose sole transaction mints the total supply into the treasury.
    pub fn new(params: NetworkParams) -> crate::error::Result<Self> {
        params.validate()?;

        let treasury = params.treasury_address();
        let supply = Amount::from_num(params.total_supply);
        let genesis_tx = TxRecord::new(
            NULL_SENDER,
            treasury.clone(),
            supply,
            now_millis(),
            TxKind::Genesis,
            params.network.clone(),
        );
        let genesis = Block::new(0, vec![genesis_tx], now_millis(), GENESIS_PREVIOUS_HASH);

        let mut state = BalanceState::new();
        state.credit(&treasury, supply);

        info!(
            network = %params.network,
            symbol = %params.symbol,
            supply = params.total_supply,
            "chain initialized with genesis block"
        );

        Ok(Blockchain {
            blocks: vec![genesis],
            pending: Vec::new(),
            state,
            params,
        })
    }

    pub fn latest_block(&self) -> &Block {
        // The chain is never empty: the constructor seeds genesis.
        self.blocks.last().expect("chain holds at least genesis")
    }

    /// Queue a transfer for the next seal. Returns `false` (never an error)
    /// when either address lacks the instance prefix (the null-sender mint
    /// sentinel is exempt on the sender side), the amount is negative, or a
    /// non-null sender's current balance cannot cover the amount.
    ///
    /// Balances move only at seal time. Two admitted transactions from the
    /// same sender can therefore jointly overdraw a balance each passed
    /// individually; see [`Blockchain::seal`].
    pub fn admit_transaction(&mut self, sender: &str, recipient: &str, amount: Amount) -> bool {
        if sender != NULL_SENDER && !sender.starts_with(&self.params.prefix) {
            debug!(sender, "rejected transaction: sender prefix mismatch");
            return false;
        }
        if !recipient.starts_with(&self.params.prefix) {
            debug!(recipient, "rejected transaction: recipient prefix mismatch");
            return false;
        }
        if amount < Amount::ZERO {
            debug!(%amount, "rejected transaction: negative amount");
            return false;
        }
        if sender != NULL_SENDER && self.balance_of(sender) < amount {
            debug!(sender, %amount, "rejected transaction: insufficient balance");
            return false;
        }

        self.pending.push(TxRecord::new(
            sender,
            recipient,
            amount,
            now_millis(),
            TxKind::Transfer,
            self.params.network.clone(),
        ));
        true
    }

    /// Seal the pending queue into a new block: append the fixed mining
    /// reward for `miner_address`, run the proof-of-work search, commit the
    /// block, and apply every transaction in order to the balance table.
    ///
    /// Application is unconditional. Queued transactions were balance-checked
    /// at admission and are never dropped here, so several same-sender
    /// transfers admitted against the same balance can drive it negative.
    /// That admission-time check is the only guard.
    pub fn seal(&mut self, miner_address: &str) -> Block {
        self.pending.push(TxRecord::new(
            NULL_SENDER,
            miner_address,
            Amount::from_num(self.params.mining_reward),
            now_millis(),
            TxKind::Mint,
            self.params.network.clone(),
        ));

        let mut block = Block::new(
            self.blocks.len() as u64,
            std::mem::take(&mut self.pending),
            now_millis(),
            self.latest_block().hash,
        );
        block.seal(self.params.difficulty);

        for tx in &block.transactions {
            self.state.apply_transaction(tx);
        }

        info!(
            height = block.index,
            hash = %block.hash_hex(),
            transactions = block.transactions.len(),
            "sealed block"
        );

        self.blocks.push(block.clone());
        block
    }

    /// Current balance; zero for never-credited addresses and for addresses
    /// outside the instance prefix.
    pub fn balance_of(&self, address: &str) -> Amount {
        if !address.starts_with(&self.params.prefix) {
            return Amount::ZERO;
        }
        self.state.get_balance(address)
    }

    /// Full integrity scan, reporting the first failing block height.
    pub fn verify(&self) -> crate::error::Result<()> {
        verify_blocks(&self.blocks)
    }

    /// Boolean integrity surface over [`Blockchain::verify`].
    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    pub fn block_by_hash(&self, hash: &Sha256Hash) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.hash == hash)
    }

    /// Every sealed transaction touching `address`, in chain order.
    pub fn transactions_for(&self, address: &str) -> Vec<TxRecord> {
        self.blocks
            .iter()
            .flat_map(|block| block.transactions.iter())
            .filter(|tx| tx.involves(address))
            .cloned()
            .collect()
    }

    pub fn network_info(&self) -> NetworkInfo {
        NetworkInfo {
            network: self.params.network.clone(),
            difficulty: self.params.difficulty,
            mining_reward: self.params.mining_reward,
            block_time_secs: self.params.block_time_secs,
            total_supply: self.params.total_supply,
            symbol: self.params.symbol.clone(),
            prefix: self.params.prefix.clone(),
            block_count: self.blocks.len(),
            pending_count: self.pending.len(),
        }
    }
}
