//! RootChain - a single-process proof-of-work ledger
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Chain state, block sealing and integrity validation
//! - [`transaction`] - Ledger transaction records
//!
//! ## Contract Engine
//! - [`contracts`] - Fungible token and timed sale contracts plus the
//!   manager that deploys and routes calls to them
//!
//! ## Configuration & Utilities
//! - [`config`] - Network parameters and presets
//! - [`error`] - Error types
//!
//! # Concurrency
//!
//! Every type here is designed for single-actor use and carries no internal
//! locking. [`blockchain::Blockchain::seal`] is the only long-running
//! operation (a proof-of-work nonce search that runs to completion). A host
//! exposing the ledger over a concurrent boundary must serialize `seal` and
//! `admit_transaction` per chain instance, and contract execution per
//! contract address; one mutual-exclusion domain per instance suffices.

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod transaction;

// ============================================================================
// Contract Engine
// ============================================================================
pub mod contracts;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
