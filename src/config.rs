//! Network parameter management for RootChain
//!
//! Every chain instance is constructed from an explicit [`NetworkParams`]
//! value; nothing in the crate relies on process-wide network globals.
//! Parallel networks are parallel instances with different parameters.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::ChainError;

/// Fixed per-instance network parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkParams {
    /// Network tag stamped onto every transaction and block.
    #[serde(default = "default_network")]
    pub network: String,
    /// Required count of leading hexadecimal zero digits in a sealed hash.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Whole-coin reward minted to the miner at each seal.
    #[serde(default = "default_mining_reward")]
    pub mining_reward: u64,
    /// Target interval between blocks, in seconds. Informational only:
    /// this core does no difficulty retargeting.
    #[serde(default = "default_block_time")]
    pub block_time_secs: u64,
    /// Whole-coin supply minted to the treasury at genesis.
    #[serde(default = "default_total_supply")]
    pub total_supply: u64,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Address prefix every participating address must carry.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl NetworkParams {
    /// Production network parameters.
    pub fn mainnet() -> Self {
        Self::default()
    }

    /// Test network parameters: distinct tag and symbol, lighter mining.
    pub fn testnet() -> Self {
        NetworkParams {
            network: "testnet".to_string(),
            difficulty: 2,
            symbol: "tROOT".to_string(),
            prefix: "trtc".to_string(),
            ..Self::default()
        }
    }

    /// Address the entire initial supply is minted into at genesis.
    pub fn treasury_address(&self) -> String {
        format!("{}_treasury", self.prefix)
    }

    /// Validate critical values before a chain is built from these params.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.prefix.is_empty() {
            return Err(ChainError::ConfigError("prefix must not be empty".to_string()));
        }
        if self.symbol.is_empty() {
            return Err(ChainError::ConfigError("symbol must not be empty".to_string()));
        }
        if self.difficulty == 0 || self.difficulty > 64 {
            return Err(ChainError::ConfigError(
                "difficulty must be between 1 and 64 hex digits".to_string(),
            ));
        }
        if self.total_supply == 0 {
            return Err(ChainError::ConfigError("total_supply must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        NetworkParams {
            network: default_network(),
            difficulty: default_difficulty(),
            mining_reward: default_mining_reward(),
            block_time_secs: default_block_time(),
            total_supply: default_total_supply(),
            symbol: default_symbol(),
            prefix: default_prefix(),
        }
    }
}

/// Read-only snapshot of a running chain for external consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub network: String,
    pub difficulty: u32,
    pub mining_reward: u64,
    pub block_time_secs: u64,
    pub total_supply: u64,
    pub symbol: String,
    pub prefix: String,
    pub block_count: usize,
    pub pending_count: usize,
}

/// Load network parameters from a TOML file, falling back to mainnet
/// defaults when the file is absent. Missing fields take their defaults.
pub fn load_params(path: &str) -> crate::error::Result<NetworkParams> {
    let params_str = fs::read_to_string(path).unwrap_or_default();
    let params: NetworkParams = if params_str.is_empty() {
        NetworkParams::default()
    } else {
        toml::from_str(&params_str)
            .map_err(|e| ChainError::ConfigError(e.to_string()))?
    };

    params.validate()?;
    Ok(params)
}

fn default_network() -> String {
    "mainnet".to_string()
}

fn default_difficulty() -> u32 {
    4
}

fn default_mining_reward() -> u64 {
    50
}

fn default_block_time() -> u64 {
    600
}

fn default_total_supply() -> u64 {
    1_000_000
}

fn default_symbol() -> String {
    "ROOT".to_string()
}

fn default_prefix() -> String {
    "rtc".to_string()
}
