//! Error types for RootChain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A block's stored hash no longer matches its recomputed hash.
    HashMismatch { height: u64 },
    /// A block's previous-hash does not match the prior block's hash.
    BrokenLinkage { height: u64 },
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::HashMismatch { height } => {
                write!(f, "Block {} hash does not match its contents", height)
            }
            ChainError::BrokenLinkage { height } => {
                write!(f, "Block {} is not linked to its predecessor", height)
            }
            ChainError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            ChainError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
