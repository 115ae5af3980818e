//! Difficulty retargeting and proof-of-work checks.
//!
//! The chain went through several retargeting eras. Each era has its own
//! algorithm, and their rounding orders and clamps differ: they are kept as
//! separate functions and selected by [`Era::select`].
//!
//! All functions here are pure: the result only depends on the chain, the
//! previous block and the consensus parameters.
pub mod dgw;
pub mod hybrid;
pub mod legacy;
pub mod midas;


use ion_common::block::tree::BlockReader;
use ion_common::block::{compact, Bits, BlockHash, BlockKind, BlockSummary, Height};
use ion_common::block::{Target, TimeOffset};
use ion_common::params::Params;

/// The retargeting rule in force for the block following a given block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// Leading blocks of development networks, always at the work limit.
    MinimumDifficulty,
    /// Hybrid era, work track.
    HybridWork,
    /// Hybrid era, stake track.
    HybridStake,
    /// Dark Gravity Wave averaged retarget.
    Averaged(BlockKind),
    /// Midas adaptive retarget.
    Midas(BlockKind),
    /// Exponential retarget, before Midas.
    Legacy(BlockKind),
}

impl Era {
    /// Select the era of the block following the block at `last_height`.
    ///
    /// Era thresholds are compared against the previous block's height,
    /// except for the hybrid era, which starts at the new block's height.
    pub fn select(last_height: Height, params: &Params, hybrid_pow: bool) -> Self {
        let height = last_height.saturating_add(1);
        let kind = BlockKind::at_height(height, params);

        if last_height < params.minimum_difficulty_blocks {
            Self::MinimumDifficulty
        } else if height >= params.pos_pow_start_height {
            if hybrid_pow {
                Self::HybridWork
            } else {
                Self::HybridStake
            }
        } else if last_height >= params.dgw_start_height {
            Self::Averaged(kind)
        } else if last_height >= params.midas_start_height {
            Self::Midas(kind)
        } else {
            Self::Legacy(kind)
        }
    }
}

/// Get the compact target required of the block following `last`.
///
/// In the hybrid era, `hybrid_pow` selects the work or the stake track. Before
/// it, the kind of the new block is given by its height.
pub fn next_work_required<R: BlockReader + ?Sized>(
    chain: &R,
    last: &BlockSummary,
    params: &Params,
    hybrid_pow: bool,
) -> Bits {
    let era = Era::select(last.height, params, hybrid_pow);

    log::trace!(
        "Retargeting block #{} with {:?} (previous bits {:#010x})",
        last.height.saturating_add(1),
        era,
        last.bits
    );

    match era {
        Era::MinimumDifficulty => compact::encode(&params.pow_limit),
        Era::HybridWork => hybrid::next_work_target(chain, last, params),
        Era::HybridStake => hybrid::next_stake_target(chain, last, params),
        Era::Averaged(kind) => dgw::next_target(chain, last, params, kind),
        Era::Midas(kind) => midas::next_target(chain, last, params, kind),
        Era::Legacy(kind) => legacy::next_target(chain, last, params, kind),
    }
}

/// Check that a block hash satisfies the claimed compact target.
///
/// The target must be positive, must not overflow and must not be easier
/// than the network's work limit. The hash is read as a little-endian
/// 256-bit integer.
pub fn check_proof_of_work(hash: &BlockHash, bits: Bits, params: &Params) -> bool {
    let target = match compact::decode(bits).into_valid() {
        Some(target) => target,
        None => return false,
    };
    if target > params.pow_limit {
        return false;
    }
    Target::from_little_endian(hash) <= target
}

/// Multiply a target by a 32-bit factor, wrapping at 256 bits. Wider factors
/// are truncated to their low 32 bits.
pub(crate) fn mul(target: Target, factor: TimeOffset) -> Target {
    target
        .overflowing_mul(Target::from(u64::from(factor as u32)))
        .0
}

/// Divide a target by a positive divisor.
pub(crate) fn div(target: Target, divisor: TimeOffset) -> Target {
    debug_assert!(divisor > 0);
    target / Target::from(divisor as u64)
}

/// Fold the `count`-th target into the running average of the previous ones.
///
/// This is not an arithmetic mean: the previous average is weighted by
/// `count` and the sum divided by `count + 1`.
pub(crate) fn running_average(average: Target, count: Height, target: Target) -> Target {
    if count == 1 {
        return target;
    }
    let count = count as TimeOffset;
    let sum = mul(average, count).overflowing_add(target).0;

    div(sum, count + 1)
}

/// The easiest target allowed for a kind of block, outside the hybrid era.
pub(crate) fn limit(kind: BlockKind, params: &Params) -> &Target {
    match kind {
        BlockKind::Work => &params.pow_limit,
        BlockKind::Stake => &params.pos_limit,
    }
}
