//! Midas adaptive retarget.
//!
//! Keeps block production synchronized with a schedule projected from the
//! genesis time. The desired interval is nudged towards a fast or a slow
//! interval depending on how far the chain is from that schedule, and the
//! target is then scaled by a factor derived from several rolling averages
//! of recent block intervals.
use ion_common::block::tree::BlockReader;
use ion_common::block::{compact, Bits, BlockKind, BlockSummary, TimeOffset};
use ion_common::params::Params;

use crate::pow;

/// Neutral difficulty factor, in ten-thousandths.
const NEUTRAL: TimeOffset = 10_000;
/// Lowest difficulty factor: at most a doubling of the target.
const MIN_FACTOR: TimeOffset = 5_000;
/// Highest difficulty factor: at most a halving of the target.
const MAX_FACTOR: TimeOffset = 20_000;

/// Rolling averages of the last 5, 7, 9 and 17 block intervals, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Averages {
    /// Average of the last 5 intervals.
    pub of5: TimeOffset,
    /// Average of the last 7 intervals.
    pub of7: TimeOffset,
    /// Average of the last 9 intervals.
    pub of9: TimeOffset,
    /// Average of the last 17 intervals.
    pub of17: TimeOffset,
}

impl Averages {
    /// Compute the rolling averages ending at `last`.
    ///
    /// When the chain runs out, every missing block is assumed to be
    /// `pos_target_spacing` seconds older than the one after it.
    pub fn compute<R: BlockReader + ?Sized>(
        chain: &R,
        last: &BlockSummary,
        params: &Params,
    ) -> Self {
        let mut sums = [0; 4];
        let mut current = Some(last);
        let mut time = last.time();

        for offset in 0..17 {
            let newer = time;

            current = current.and_then(|blk| chain.predecessor(blk));
            time = match current {
                Some(blk) => blk.time(),
                None => time - params.pos_target_spacing,
            };
            let interval = newer - time;

            for (sum, window) in sums.iter_mut().zip([5, 7, 9, 17]) {
                if offset < window {
                    *sum += interval;
                }
            }
        }

        Self {
            of5: sums[0] / 5,
            of7: sums[1] / 7,
            of9: sums[2] / 9,
            of17: sums[3] / 17,
        }
    }
}

/// The block interval the chain should aim for after `last`, given how far
/// ahead or behind schedule it is.
pub fn desired_interval(last: &BlockSummary, params: &Params) -> TimeOffset {
    let spacing = params.pos_target_spacing_midas;
    let timespan = params.pos_target_timespan_midas;
    let fast = spacing * 9 / 10;
    let slow = spacing * 11 / 10;

    let now = last.time();
    let scheduled = params.genesis_time as TimeOffset + last.height as TimeOffset * spacing;

    if now > scheduled && now < scheduled + timespan {
        let drift = now - scheduled;
        // Divided by the spacing, not the timespan.
        ((timespan - drift) * spacing + drift * fast) / spacing
    } else if now < scheduled && now + timespan > scheduled {
        let drift = scheduled - now;
        ((timespan - drift) * spacing + drift * slow) / timespan
    } else if now < scheduled {
        slow
    } else {
        fast
    }
}

/// Difficulty factor, in ten-thousandths, for the given averages and desired
/// interval. Clamped to `[5000, 20000]`.
pub fn difficulty_factor(avg: &Averages, desired: TimeOffset) -> TimeOffset {
    let too_fast = desired * 2 / 3;
    let too_slow = desired * 3 / 2;

    let factor = if avg.of5 < too_fast && avg.of9 < too_fast && avg.of17 < too_fast {
        NEUTRAL * 8 / 5
    } else if avg.of5 > too_slow && avg.of7 > too_slow && avg.of9 > too_slow {
        NEUTRAL * 5 / 8
    } else if ((avg.of5 > desired || avg.of7 > desired) && avg.of9 > desired && avg.of17 > desired)
        || ((avg.of5 < desired || avg.of7 < desired) && avg.of9 < desired && avg.of17 < desired)
    {
        (NEUTRAL * 6 * desired)
            .checked_div(avg.of17 + 5 * desired)
            .unwrap_or(MAX_FACTOR)
    } else {
        NEUTRAL
    };
    factor.clamp(MIN_FACTOR, MAX_FACTOR)
}

/// Get the compact target of the block following `last`, of the given kind.
pub fn next_target<R: BlockReader + ?Sized>(
    chain: &R,
    last: &BlockSummary,
    params: &Params,
    kind: BlockKind,
) -> Bits {
    let limit = pow::limit(kind, params);
    let desired = desired_interval(last, params);
    let averages = Averages::compute(chain, last, params);
    let factor = difficulty_factor(&averages, desired);

    log::trace!(
        "Midas retarget after #{}: desired={}s averages={:?} factor={}",
        last.height,
        desired,
        averages,
        factor
    );

    let old = last.target();
    if factor == NEUTRAL {
        return compact::encode(&old);
    }
    let new = pow::mul(pow::div(old, factor), NEUTRAL);

    if new > *limit {
        compact::encode(limit)
    } else {
        compact::encode(&new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::cache::BlockCache;
    use ion_common::block::Target;
    use ion_common::network::Network;
    use ion_test::block::gen;

    fn averages(of: TimeOffset) -> Averages {
        Averages {
            of5: of,
            of7: of,
            of9: of,
            of17: of,
        }
    }

    #[test]
    fn test_desired_interval() {
        let params = Network::Testnet.params();
        let genesis = params.genesis_time as TimeOffset;
        let at = |height: u64, offset: TimeOffset| {
            let time = genesis + height as TimeOffset * 64 + offset;
            BlockSummary::new(height, time as u32, 0x1d00ffff, BlockKind::Work)
        };

        // On schedule: fast.
        assert_eq!(desired_interval(&at(100, 0), &params), 57);
        // Far ahead or behind.
        assert_eq!(desired_interval(&at(100, 5_000), &params), 57);
        assert_eq!(desired_interval(&at(100, -5_000), &params), 70);
        // Late by 96s: ((960 - 96) * 64 + 96 * 57) / 64.
        assert_eq!(
            desired_interval(&at(100, 96), &params),
            (864 * 64 + 96 * 57) / 64
        );
        // Early by 96s: ((960 - 96) * 64 + 96 * 70) / 960.
        assert_eq!(
            desired_interval(&at(100, -96), &params),
            (864 * 64 + 96 * 70) / 960
        );
    }

    #[test]
    fn test_averages_pad_short_chains() {
        let params = Network::Testnet.params();
        let chain = gen::steady(&params, 3, 10, 0x1d00ffff, |_| BlockKind::Work);
        let cache = BlockCache::from(chain, params.clone()).unwrap();
        let avg = Averages::compute(&cache, cache.tip(), &params);

        // 3 intervals of 10s, then padding of 64s.
        assert_eq!(avg.of5, (30 + 2 * 64) / 5);
        assert_eq!(avg.of7, (30 + 4 * 64) / 7);
        assert_eq!(avg.of9, (30 + 6 * 64) / 9);
        assert_eq!(avg.of17, (30 + 14 * 64) / 17);
    }

    #[test]
    fn test_difficulty_factor() {
        assert_eq!(difficulty_factor(&averages(57), 57), NEUTRAL);
        // Emergency adjustments.
        assert_eq!(difficulty_factor(&averages(10), 57), 16_000);
        assert_eq!(difficulty_factor(&averages(200), 57), 6_250);
        // Normal adjustment.
        assert_eq!(
            difficulty_factor(&averages(60), 57),
            NEUTRAL * 6 * 57 / (60 + 5 * 57)
        );
        // Zero denominator.
        assert_eq!(
            difficulty_factor(
                &Averages {
                    of5: 57,
                    of7: 50,
                    of9: 50,
                    of17: -285,
                },
                57
            ),
            MAX_FACTOR
        );
    }

    #[test]
    fn test_neutral_factor_keeps_bits() {
        let params = Network::Testnet.params();
        let bits = 0x1d00ffff;
        // Far behind schedule: the desired interval is the fast one.
        let mut late = params.clone();
        late.genesis_time += 10_000;

        let chain = gen::steady(&late, 120, 57, bits, |_| BlockKind::Work);
        let cache = BlockCache::from(chain, params.clone()).unwrap();

        assert_eq!(
            next_target(&cache, cache.tip(), &params, BlockKind::Work),
            bits
        );
    }

    #[test]
    fn test_fast_blocks_harden_target() {
        let params = Network::Testnet.params();
        let bits = 0x1d00ffff;
        let chain = gen::steady(&params, 120, 5, bits, |_| BlockKind::Work);
        let cache = BlockCache::from(chain, params.clone()).unwrap();

        let next = next_target(&cache, cache.tip(), &params, BlockKind::Work);
        let expected = compact::decode(bits).target / Target::from(16_000u64)
            * Target::from(NEUTRAL as u64);

        assert_eq!(next, compact::encode(&expected));
    }

    #[test]
    fn test_slow_blocks_ease_target() {
        let params = Network::Testnet.params();
        let bits = 0x1d00ffff;
        let chain = gen::steady(&params, 120, 200, bits, |_| BlockKind::Work);
        let cache = BlockCache::from(chain, params.clone()).unwrap();

        // Every average is above 3/2 of the fast interval of 57s.
        let next = next_target(&cache, cache.tip(), &params, BlockKind::Work);
        let expected = compact::decode(bits).target / Target::from(6_250u64)
            * Target::from(NEUTRAL as u64);

        assert_eq!(next, compact::encode(&expected));
    }

    #[test]
    fn test_capped_at_limit() {
        let params = Network::Testnet.params();
        let bits = compact::encode(&params.pos_limit);
        let chain = gen::steady(&params, 120, 500, bits, |_| BlockKind::Stake);
        let cache = BlockCache::from(chain, params.clone()).unwrap();

        assert_eq!(
            next_target(&cache, cache.tip(), &params, BlockKind::Stake),
            compact::encode(&params.pos_limit)
        );
    }
}
