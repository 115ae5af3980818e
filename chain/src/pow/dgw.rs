//! Dark Gravity Wave averaged retarget.
//!
//! Averages the targets of the last blocks and rescales the average by the
//! ratio of their actual to nominal timespan. Once proof-of-stake takes over,
//! switches to a per-block exponential step.
use ion_common::block::tree::BlockReader;
use ion_common::block::{compact, Bits, BlockKind, BlockSummary, Target, TimeOffset};
use ion_common::network::Network;
use ion_common::params::Params;

use crate::pow;

/// Number of blocks averaged.
pub const PAST_BLOCKS: u64 = 24;
/// Nominal spacing of the per-block step, in seconds.
pub const STEP_SPACING: TimeOffset = 60;
/// Smoothing interval of the per-block step, in blocks.
pub const STEP_INTERVAL: TimeOffset = 40;

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
    if last.height == 0 || last.height < params.dgw_start_height + PAST_BLOCKS {
        log::debug!("Not enough history to average at #{}", last.height);
        return compact::encode(&params.pow_limit);
    }

    if last.height > params.pos_start_height {
        return step(chain, last, pow::limit(kind, params));
    }
    if params.network == Network::Testnet && last.height + 3 > params.pos_start_height {
        return step(chain, last, &params.pos_limit);
    }

    let mut count = 0;
    let mut average = Target::zero();
    let mut actual_timespan: TimeOffset = 0;
    let mut last_time: TimeOffset = 0;

    for blk in chain
        .ancestors(last)
        .take_while(|b| b.height > 0)
        .take(PAST_BLOCKS as usize)
    {
        count += 1;
        average = pow::running_average(average, count, blk.target());

        if last_time > 0 {
            actual_timespan += last_time - blk.time();
        }
        last_time = blk.time();
    }

    let target_timespan = count as TimeOffset * params.pos_target_spacing;
    let actual_timespan = actual_timespan.clamp(target_timespan / 3, target_timespan * 3);

    log::trace!(
        "Averaged {} blocks before #{}: actual={}s nominal={}s",
        count,
        last.height + 1,
        actual_timespan,
        target_timespan
    );

    let new = pow::div(pow::mul(average, actual_timespan), target_timespan);
    let limit = pow::limit(kind, params);

    if new > *limit {
        compact::encode(limit)
    } else {
        compact::encode(&new)
    }
}

/// Exponential moving step towards the nominal spacing, from the last block
/// and its direct predecessor.
fn step<R: BlockReader + ?Sized>(chain: &R, last: &BlockSummary, limit: &Target) -> Bits {
    let mut spacing = chain
        .predecessor(last)
        .map(|prev| last.time() - prev.time())
        .unwrap_or(0);
    if spacing < 0 {
        spacing = 1;
    }

    let mut new = last.target();
    new = pow::mul(new, (STEP_INTERVAL - 1) * STEP_SPACING + spacing + spacing);
    new = pow::div(new, (STEP_INTERVAL + 1) * STEP_SPACING);

    if new.is_zero() || new > *limit {
        compact::encode(limit)
    } else {
        compact::encode(&new)
    }
}
