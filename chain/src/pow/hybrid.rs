//! Retargeting of the hybrid era.
//!
//! Work and stake blocks interleave freely, so each track only looks at
//! blocks of its own kind, found with [`BlockReader::hybrid_predecessor`].
//! Blocks from before the hybrid era are never looked at.
use ion_common::block::tree::BlockReader;
use ion_common::block::{compact, Bits, BlockKind, BlockSummary, Target, TimeOffset};
use ion_common::params::Params;

use crate::pow;

/// Number of work blocks averaged.
pub const PAST_BLOCKS: u64 = 24;
/// Smoothing interval of the stake track, in blocks.
pub const STAKE_INTERVAL: TimeOffset = 40;
/// A work block this much older than its predecessor may be mined at the
/// work limit, on networks allowing it.
pub const MAX_WORK_GAP: TimeOffset = 2 * 60 * 60;

/// The last block of the given kind, up to and including `last`.
fn last_of_kind<'a, R: BlockReader + ?Sized>(
    chain: &'a R,
    last: &'a BlockSummary,
    kind: BlockKind,
    params: &Params,
) -> Option<&'a BlockSummary> {
    if last.kind == kind {
        Some(last)
    } else {
        chain.hybrid_predecessor(last, kind, params.pos_pow_start_height)
    }
}

/// Get the compact target of the next stake block after `last`.
pub fn next_stake_target<R: BlockReader + ?Sized>(
    chain: &R,
    last: &BlockSummary,
    params: &Params,
) -> Bits {
    let limit = &params.pos_limit;
    let last = match last_of_kind(chain, last, BlockKind::Stake, params) {
        Some(blk) if blk.height > params.pos_pow_start_height => blk,
        _ => {
            log::debug!("No hybrid stake block yet, using the stake limit");
            return compact::encode(limit);
        }
    };
    if params.no_pow_retargeting {
        return last.bits;
    }
    if last.height <= params.pos_start_height {
        return compact::encode(limit);
    }

    let target_spacing = params.hybrid_pos_target_spacing;
    let mut spacing = chain
        .hybrid_predecessor(last, BlockKind::Stake, params.pos_pow_start_height)
        .map(|prev| last.time() - prev.time())
        .unwrap_or(0);
    if spacing < 0 {
        spacing = 1;
    }

    let mut new = last.target();
    new = pow::mul(new, (STAKE_INTERVAL - 1) * target_spacing + spacing + spacing);
    new = pow::div(new, (STAKE_INTERVAL + 1) * target_spacing);

    if new.is_zero() || new > *limit {
        compact::encode(limit)
    } else {
        compact::encode(&new)
    }
}

/// Get the compact target of the next work block after `last`.
pub fn next_work_target<R: BlockReader + ?Sized>(
    chain: &R,
    last: &BlockSummary,
    params: &Params,
) -> Bits {
    let limit = &params.hybrid_pow_limit;
    let start = params.pos_pow_start_height;
    let last = match last_of_kind(chain, last, BlockKind::Work, params) {
        Some(blk) if blk.height >= start + PAST_BLOCKS => blk,
        _ => {
            log::debug!("Not enough hybrid work blocks, using the work limit");
            return compact::encode(limit);
        }
    };

    if params.allow_min_difficulty_blocks {
        let prev = match chain.hybrid_predecessor(last, BlockKind::Work, start) {
            Some(prev) => prev,
            None => return compact::encode(limit),
        };
        if last.time() > prev.time() + MAX_WORK_GAP {
            log::debug!("Work block #{} is stale, using the work limit", last.height);
            return compact::encode(limit);
        }
        if last.time() > prev.time() + 4 * params.pow_target_spacing {
            let new = pow::mul(last.target(), 10);

            return compact::encode(if new > *limit { limit } else { &new });
        }
    }

    let mut oldest = last;
    let mut average = Target::zero();

    for count in 1..=PAST_BLOCKS {
        average = pow::running_average(average, count, oldest.target());

        if count != PAST_BLOCKS {
            match chain.hybrid_predecessor(oldest, BlockKind::Work, start) {
                Some(blk) if blk.height > start => oldest = blk,
                _ => {
                    log::debug!("Not enough hybrid work blocks, using the work limit");
                    return compact::encode(limit);
                }
            }
        }
    }

    let target_timespan = PAST_BLOCKS as TimeOffset * params.hybrid_pow_target_spacing;
    let actual_timespan =
        (last.time() - oldest.time()).clamp(target_timespan / 4, target_timespan * 4);

    log::trace!(
        "Averaged work blocks #{}..=#{}: actual={}s nominal={}s",
        oldest.height,
        last.height,
        actual_timespan,
        target_timespan
    );

    let new = pow::div(pow::mul(average, actual_timespan), target_timespan);

    if new > *limit {
        compact::encode(limit)
    } else {
        compact::encode(&new)
    }
}
