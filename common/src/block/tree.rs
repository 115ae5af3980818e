//! Types and functions relating to block trees.
#![warn(missing_docs)]
use thiserror::Error;

use crate::block::iter::Ancestors;
use crate::block::{Bits, BlockKind, BlockSummary, Height};

/// An error related to the block tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The block's proof-of-work is invalid.
    #[error("invalid block proof-of-work")]
    InvalidBlockPoW,

    /// The block's difficulty target is invalid.
    #[error("invalid block difficulty target: {0:#010x}, expected {1:#010x}")]
    InvalidBlockTarget(Bits, Bits),

    /// The block doesn't extend the chain it is imported into.
    #[error("invalid block height {0}, expected {1}")]
    InvalidBlockHeight(Height, Height),

    /// A chain was constructed without a genesis block.
    #[error("chain is empty")]
    EmptyChain,
}

/// Read block summaries of a single chain, indexed by height.
///
/// Every summary handed to the provided methods must belong to this chain:
/// predecessors are looked up by height.
pub trait BlockReader {
    /// Get a block by height.
    fn get_block_by_height(&self, height: Height) -> Option<&BlockSummary>;
    /// Return the height of the chain.
    fn height(&self) -> Height;
    /// Get the last block of the chain.
    fn tip(&self) -> &BlockSummary {
        self.get_block_by_height(self.height())
            .expect("the tip is always present")
    }
    /// Return the genesis block.
    fn genesis(&self) -> &BlockSummary {
        self.get_block_by_height(0)
            .expect("the genesis block is always present")
    }
    /// Get the parent of a block, or `None` for genesis.
    fn predecessor(&self, block: &BlockSummary) -> Option<&BlockSummary> {
        let height = block.height.checked_sub(1)?;
        self.get_block_by_height(height)
    }
    /// Get the ancestor `n` blocks behind the given block, or `None` if the
    /// chain doesn't go back that far.
    fn walk_back(&self, block: &BlockSummary, n: Height) -> Option<&BlockSummary> {
        let height = block.height.checked_sub(n)?;
        self.get_block_by_height(height)
    }
    /// Get the closest ancestor of the given kind, skipping blocks of the
    /// other kind. Returns `None` when no such ancestor exists at or above
    /// `min_height`.
    ///
    /// In the hybrid era this separates the work and stake sub-chains that
    /// share the same physical chain.
    fn hybrid_predecessor(
        &self,
        block: &BlockSummary,
        kind: BlockKind,
        min_height: Height,
    ) -> Option<&BlockSummary> {
        let mut current = block;

        loop {
            let prev = self.predecessor(current)?;

            if prev.height < min_height {
                return None;
            }
            if prev.kind == kind {
                return Some(prev);
            }
            current = prev;
        }
    }
    /// Iterate over a block and its ancestors, down to genesis.
    fn ancestors<'a>(&'a self, block: &'a BlockSummary) -> Ancestors<'a, Self> {
        Ancestors::new(self, block)
    }
}
