// Thin re-export module: implementation lives in `blockchain/core.rs` so the
// ledger responsibilities (chain management, balance state, validation) can
// be decomposed without moving the public path.

pub mod core;
pub use core::*;
