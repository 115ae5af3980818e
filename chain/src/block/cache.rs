//! In-memory block cache.
//!
//! *Holds the active chain as block summaries indexed by height, and validates
//! the difficulty target of new blocks.*
//!
#![warn(missing_docs)]


use ion_common::block::tree::{BlockReader, Error};
use ion_common::block::{BlockHash, BlockKind, BlockSummary, Bits, Height};
use ion_common::nonempty::NonEmpty;
use ion_common::params::Params;

use crate::pow;

/// A single chain of block summaries, starting at genesis.
///
/// Implements [`BlockReader`], so every retargeting function can read from it.
#[derive(Debug, Clone)]
pub struct BlockCache {
    chain: NonEmpty<BlockSummary>,
    params: Params,
}

impl BlockCache {
    /// Create a new `BlockCache` holding only the genesis block.
    pub fn new(genesis: BlockSummary, params: Params) -> Result<Self, Error> {
        if genesis.height != 0 {
            return Err(Error::InvalidBlockHeight(genesis.height, 0));
        }
        Ok(Self {
            chain: NonEmpty::new(genesis),
            params,
        })
    }

    /// Create a new `BlockCache` from a chain of summaries, starting at genesis.
    /// Heights must be contiguous. Targets are not checked.
    pub fn from(
        blocks: impl IntoIterator<Item = BlockSummary>,
        params: Params,
    ) -> Result<Self, Error> {
        let mut blocks = blocks.into_iter();
        let genesis = blocks.next().ok_or(Error::EmptyChain)?;
        let mut cache = Self::new(genesis, params)?;

        for blk in blocks {
            cache.import(blk)?;
        }
        Ok(cache)
    }

    /// Append a block to the chain without validating its target.
    pub fn import(&mut self, block: BlockSummary) -> Result<Height, Error> {
        let expected = self.height() + 1;

        if block.height != expected {
            return Err(Error::InvalidBlockHeight(block.height, expected));
        }
        self.chain.push(block);

        Ok(expected)
    }

    /// Extend the chain with a block. This performs header validation: the
    /// block must carry the expected target and, for work blocks, its hash
    /// must satisfy that target.
    pub fn extend_tip(&mut self, block: BlockSummary, hash: &BlockHash) -> Result<Height, Error> {
        let result = self.validate(&block, hash);

        match result {
            Ok(()) => {
                self.chain.push(block);
                log::debug!(
                    "Block #{} ({:?}) extends the chain with bits {:#010x}",
                    block.height,
                    block.kind,
                    block.bits
                );
                Ok(block.height)
            }
            Err(err) => {
                log::debug!("Block #{} rejected: {}", block.height, err);
                Err(err)
            }
        }
    }

    /// Validate a block as a potential new tip.
    pub fn validate(&self, block: &BlockSummary, hash: &BlockHash) -> Result<(), Error> {
        let tip = self.tip();

        if block.height != tip.height + 1 {
            return Err(Error::InvalidBlockHeight(block.height, tip.height + 1));
        }

        let is_work = !block.is_stake();
        let expected = pow::next_work_required(self, tip, &self.params, is_work);

        if block.bits != expected {
            return Err(Error::InvalidBlockTarget(block.bits, expected));
        }
        // Stake blocks are checked against their kernel, not their hash.
        if is_work && !pow::check_proof_of_work(hash, block.bits, &self.params) {
            return Err(Error::InvalidBlockPoW);
        }
        Ok(())
    }

    /// Get the target required of the next block of the given kind.
    ///
    /// Outside the hybrid era the kind of the next block is fixed by its
    /// height, and `kind` has no effect.
    pub fn next_work_required(&self, kind: BlockKind) -> Bits {
        pow::next_work_required(self, self.tip(), &self.params, kind == BlockKind::Work)
    }

    /// Rollback the chain to the given height. Returns the rolled-back blocks.
    pub fn rollback(&mut self, height: Height) -> Vec<BlockSummary> {
        if height >= self.height() {
            return Vec::new();
        }
        self.chain.tail.drain(height as usize..).collect()
    }

    /// Iterate over the chain, starting from genesis.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BlockSummary> + '_ {
        std::iter::once(&self.chain.head).chain(self.chain.tail.iter())
    }
}

impl BlockReader for BlockCache {
    /// Get a block by height.
    fn get_block_by_height(&self, height: Height) -> Option<&BlockSummary> {
        self.chain.get(height as usize)
    }

    /// Get the best block.
    fn tip(&self) -> &BlockSummary {
        self.chain.last()
    }

    /// Get the genesis block.
    fn genesis(&self) -> &BlockSummary {
        self.chain.first()
    }

    /// Return the height of the longest chain.
    fn height(&self) -> Height {
        self.chain.tail.len() as Height
    }
}
