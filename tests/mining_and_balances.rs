//! Integration tests for block sealing, balance settlement and chain
//! integrity.

use rootchain::blockchain::{Block, Blockchain};
use rootchain::config::NetworkParams;
use rootchain::error::ChainError;
use rootchain::transaction::{Amount, TxKind};

/// Helper: a small network so proof-of-work stays fast in tests.
fn test_params() -> NetworkParams {
    NetworkParams {
        difficulty: 2,
        total_supply: 1_000,
        prefix: "pfx".to_string(),
        ..NetworkParams::mainnet()
    }
}

fn amt(n: i64) -> Amount {
    Amount::from_num(n)
}

fn total_held(chain: &Blockchain) -> Amount {
    chain.state.balances.values().copied().sum()
}

#[test]
fn test_treasury_transfer_and_reward_settlement() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;
    assert_eq!(chain.balance_of("pfx_treasury"), amt(1_000));

    assert!(chain.admit_transaction("pfx_treasury", "pfx_alice", amt(100)));
    let block = chain.seal("pfx_miner");

    assert_eq!(block.index, 1);
    assert_eq!(block.transactions.len(), 2);
    assert_eq!(block.transactions[0].kind, TxKind::Transfer);
    assert_eq!(block.transactions[1].kind, TxKind::Mint);
    assert_eq!(block.transactions[1].recipient, "pfx_miner");

    assert_eq!(chain.balance_of("pfx_alice"), amt(100));
    assert_eq!(chain.balance_of("pfx_treasury"), amt(900));
    assert_eq!(chain.balance_of("pfx_miner"), amt(50));

    Ok(())
}

#[test]
fn test_balance_conservation_per_seal() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;
    assert_eq!(total_held(&chain), amt(1_000));

    chain.admit_transaction("pfx_treasury", "pfx_a", amt(300));
    chain.admit_transaction("pfx_treasury", "pfx_b", amt(200));
    chain.seal("pfx_miner");

    // Transfers net to zero; only the reward mint adds supply.
    assert_eq!(total_held(&chain), amt(1_050));

    chain.seal("pfx_miner");
    assert_eq!(total_held(&chain), amt(1_100));

    Ok(())
}

#[test]
fn test_sealed_chain_verifies_across_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;

    for i in 0..3 {
        chain.admit_transaction("pfx_treasury", "pfx_alice", amt(10 + i));
        let block = chain.seal("pfx_miner");
        assert!(Block::meets_difficulty(&block.hash, chain.params.difficulty));
        assert_eq!(block.hash, block.compute_hash());
    }

    assert_eq!(chain.blocks.len(), 4);
    for pair in chain.blocks.windows(2) {
        assert_eq!(pair[1].previous_hash, pair[0].hash);
    }
    assert!(chain.is_valid());
    assert!(chain.verify().is_ok());

    Ok(())
}

#[test]
fn test_tampered_amount_invalidates_chain() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;
    chain.admit_transaction("pfx_treasury", "pfx_alice", amt(100));
    chain.seal("pfx_miner");
    chain.seal("pfx_miner");
    assert!(chain.is_valid());

    chain.blocks[1].transactions[0].amount = amt(999);

    assert!(!chain.is_valid());
    assert_eq!(chain.verify(), Err(ChainError::HashMismatch { height: 1 }));

    Ok(())
}

#[test]
fn test_relinked_block_invalidates_chain() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;
    chain.seal("pfx_miner");
    chain.seal("pfx_miner");

    chain.blocks[2].previous_hash = [3u8; 32];
    chain.blocks[2].hash = chain.blocks[2].compute_hash();

    assert_eq!(chain.verify(), Err(ChainError::BrokenLinkage { height: 2 }));

    Ok(())
}

#[test]
fn test_lookup_and_history_scans() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;
    chain.admit_transaction("pfx_treasury", "pfx_alice", amt(40));
    let first = chain.seal("pfx_miner");
    chain.admit_transaction("pfx_alice", "pfx_bob", amt(15));
    let second = chain.seal("pfx_miner");

    assert_eq!(chain.block_by_hash(&first.hash).map(|b| b.index), Some(1));
    assert_eq!(chain.block_by_hash(&second.hash).map(|b| b.index), Some(2));
    assert!(chain.block_by_hash(&[0xAB; 32]).is_none());

    let alice_history = chain.transactions_for("pfx_alice");
    assert_eq!(alice_history.len(), 2);
    assert_eq!(alice_history[0].recipient, "pfx_alice");
    assert_eq!(alice_history[1].sender, "pfx_alice");

    let miner_history = chain.transactions_for("pfx_miner");
    assert!(miner_history.iter().all(|tx| tx.kind == TxKind::Mint));
    assert_eq!(miner_history.len(), 2);

    Ok(())
}

#[test]
fn test_rejected_admissions_do_not_reach_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(test_params())?;
    assert!(!chain.admit_transaction("pfx_alice", "pfx_bob", amt(5)));
    assert!(!chain.admit_transaction("other_addr", "pfx_bob", amt(5)));

    let block = chain.seal("pfx_miner");

    // Only the reward mint made it in.
    assert_eq!(block.transactions.len(), 1);
    assert_eq!(block.transactions[0].kind, TxKind::Mint);
    assert_eq!(chain.balance_of("pfx_bob"), Amount::ZERO);

    Ok(())
}

#[test]
fn test_balance_of_ignores_foreign_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let chain = Blockchain::new(test_params())?;
    assert_eq!(chain.balance_of("rtc_treasury"), Amount::ZERO);
    assert_eq!(chain.balance_of("pfx_never_seen"), Amount::ZERO);
    Ok(())
}
