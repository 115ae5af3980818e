//! Block-related types and functions.
pub mod compact;
pub mod iter;
pub mod kind;
pub mod tree;

pub use kind::{is_proof_of_stake, BlockKind};

#[allow(missing_docs)]
#[allow(clippy::assign_op_pattern)]
#[allow(clippy::ptr_offset_with_cast)]
mod u256 {
    ::uint::construct_uint! {
        /// Unsigned 256-bit integer, as four 64-bit words.
        pub struct U256(4);
    }
}

pub use self::u256::U256;

/// Difficulty target of a block.
pub type Target = U256;

/// Compact difficulty bits (target) of a block.
pub type Bits = u32;

/// Height of a block.
pub type Height = u64;

/// Block time (seconds since Epoch).
pub type BlockTime = u32;

/// A signed difference between two block times, in seconds.
pub type TimeOffset = i64;

/// Block hash, as little-endian bytes.
pub type BlockHash = [u8; 32];

/// The part of a block header needed to retarget and validate difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSummary {
    /// Height of the block. Genesis is at height zero.
    pub height: Height,
    /// Block timestamp. Not guaranteed to increase along the chain.
    pub time: BlockTime,
    /// Compact difficulty target claimed by the block.
    pub bits: Bits,
    /// Whether the block claims to be a stake or a work block.
    pub kind: BlockKind,
}

impl BlockSummary {
    /// Create a new block summary.
    pub fn new(height: Height, time: BlockTime, bits: Bits, kind: BlockKind) -> Self {
        Self {
            height,
            time,
            bits,
            kind,
        }
    }

    /// Block time as a signed offset, for computing spacings.
    pub fn time(&self) -> TimeOffset {
        TimeOffset::from(self.time)
    }

    /// Decode the block's compact target, ignoring the sign and overflow flags.
    pub fn target(&self) -> Target {
        compact::decode(self.bits).target
    }

    /// Whether this is a stake block.
    pub fn is_stake(&self) -> bool {
        self.kind == BlockKind::Stake
    }
}
