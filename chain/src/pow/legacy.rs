//! Exponential retarget, used from genesis until Midas.
//!
//! Work and stake blocks are retargeted on separate tracks. Each track moves
//! the target of its last block towards the nominal spacing, by an
//! exponential moving average over the last two blocks of the track.
use ion_common::block::tree::BlockReader;
use ion_common::block::{compact, Bits, BlockKind, BlockSummary, Target, TimeOffset, U256};
use ion_common::params::Params;

use crate::pow;

/// Nominal block spacing, in seconds.
pub const TARGET_SPACING: TimeOffset = 64;
/// Smoothing interval, in blocks.
pub const INTERVAL: TimeOffset = 10;

/// `0x00000fff...`: easiest stake target on mainnet, stricter than the work limit.
pub const MAINNET_POS_LIMIT: Target = U256([
    u64::MAX,
    u64::MAX,
    u64::MAX,
    0x0000_0fff_ffff_ffff,
]);

/// Get the compact target of the block following `last`, of the given kind.
pub fn next_target<R: BlockReader + ?Sized>(
    chain: &R,
    last: &BlockSummary,
    params: &Params,
    kind: BlockKind,
) -> Bits {
    if params.no_pow_retargeting {
        return last.bits;
    }
    let limit = if kind == BlockKind::Stake && params.is_mainnet() {
        MAINNET_POS_LIMIT
    } else {
        params.pow_limit
    };

    let prev = same_kind(chain, last, kind, params);
    let prev_prev = match chain.predecessor(prev) {
        Some(blk) => same_kind(chain, blk, kind, params),
        None => {
            log::debug!("No second {:?} block before #{}", kind, last.height);
            return compact::encode(&limit);
        }
    };

    let mut spacing = prev.time() - prev_prev.time();
    if spacing < 0 {
        spacing = TARGET_SPACING;
    } else if kind == BlockKind::Stake && spacing > TARGET_SPACING * 10 {
        spacing = TARGET_SPACING * 10;
    }

    let mut target = prev.target();
    target = pow::mul(target, (INTERVAL - 1) * TARGET_SPACING + spacing + spacing);
    target = pow::div(target, (INTERVAL + 1) * TARGET_SPACING);

    if target.is_zero() || target > limit {
        target = limit;
    }
    compact::encode(&target)
}

/// Scan back from `block` to the closest block whose height is classified
/// as `kind`. Stops at genesis, whatever its kind.
fn same_kind<'a, R: BlockReader + ?Sized>(
    chain: &'a R,
    block: &'a BlockSummary,
    kind: BlockKind,
    params: &Params,
) -> &'a BlockSummary {
    let mut current = block;

    while BlockKind::at_height(current.height, params) != kind {
        match chain.predecessor(current) {
            Some(prev) => current = prev,
            None => break,
        }
    }
    current
}
