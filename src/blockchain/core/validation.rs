use crate::blockchain::core::chain::Block;
use crate::error::ChainError;

/// Integrity scan over a sealed block sequence.
///
/// For every block after genesis, the stored hash must equal a fresh
/// recomputation over the block's fields, and the previous-hash must equal
/// the prior block's stored hash. The first failing height is reported;
/// any mismatch invalidates the whole chain.
pub fn verify_blocks(blocks: &[Block]) -> Result<(), ChainError> {
    for pair in blocks.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if current.hash != current.compute_hash() {
            return Err(ChainError::HashMismatch { height: current.index });
        }
        if current.previous_hash != previous.hash {
            return Err(ChainError::BrokenLinkage { height: current.index });
        }
    }
    Ok(())
}
