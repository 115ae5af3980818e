pub use ion_common::block::*;

pub mod tree {
    pub mod model;
}

pub mod gen {
    use ion_common::block::*;
    use ion_common::nonempty::NonEmpty;
    use ion_common::params::Params;

    /// Generate the genesis block summary of a network.
    pub fn genesis(params: &Params) -> BlockSummary {
        BlockSummary::new(
            0,
            params.genesis_time,
            compact::encode(&params.pow_limit),
            BlockKind::Work,
        )
    }

    /// The kind of block a naive chain would have at the given height: the
    /// classifier's before the hybrid era, random after.
    pub fn kind(height: Height, params: &Params, rng: &mut fastrand::Rng) -> BlockKind {
        if height >= params.pos_pow_start_height {
            if rng.bool() {
                BlockKind::Stake
            } else {
                BlockKind::Work
            }
        } else {
            BlockKind::at_height(height, params)
        }
    }

    /// Generate random valid bits, somewhat harder than the given limit.
    pub fn bits(limit: &Target, rng: &mut fastrand::Rng) -> Bits {
        compact::encode(&(*limit >> rng.usize(0..12)))
    }

    /// Generate a block following the given parent. Block times are random and
    /// occasionally go backwards.
    pub fn block(parent: &BlockSummary, params: &Params, rng: &mut fastrand::Rng) -> BlockSummary {
        let height = parent.height + 1;
        let kind = kind(height, params, rng);
        let spacing = rng.i64(-30..=params.pos_target_spacing * 3);
        let time = (parent.time() + spacing).max(0) as BlockTime;
        let limit = match kind {
            BlockKind::Work => &params.pow_limit,
            BlockKind::Stake => &params.pos_limit,
        };

        BlockSummary::new(height, time, bits(limit, rng), kind)
    }

    /// Generate a random chain of the given height, starting at genesis.
    pub fn chain(params: &Params, height: Height, rng: &mut fastrand::Rng) -> NonEmpty<BlockSummary> {
        let mut chain = NonEmpty::new(genesis(params));

        for _ in 0..height {
            let blk = block(chain.last(), params, rng);
            chain.push(blk);
        }
        chain
    }

    /// Generate a chain of the given height, with blocks exactly `spacing`
    /// seconds apart, all carrying the same bits. Kinds are given by `kind`.
    pub fn steady(
        params: &Params,
        height: Height,
        spacing: TimeOffset,
        bits: Bits,
        kind: impl Fn(Height) -> BlockKind,
    ) -> NonEmpty<BlockSummary> {
        let mut chain = NonEmpty::new(genesis(params));

        for h in 1..=height {
            let time = params.genesis_time as TimeOffset + h as TimeOffset * spacing;
            chain.push(BlockSummary::new(h, time as BlockTime, bits, kind(h)));
        }
        chain
    }
}

pub mod arbitrary {
    use std::fmt;

    use quickcheck::{Arbitrary, Gen};

    use ion_common::block::*;
    use ion_common::nonempty::NonEmpty;

    /// A short chain with arbitrary kinds, times and bits.
    #[derive(Clone)]
    pub struct ArbitraryChain {
        pub blocks: NonEmpty<BlockSummary>,
    }

    impl ArbitraryChain {
        pub fn tip(&self) -> &BlockSummary {
            self.blocks.last()
        }
    }

    impl Arbitrary for ArbitraryChain {
        fn arbitrary(g: &mut Gen) -> Self {
            let height = u16::arbitrary(g) as Height % (g.size() as Height + 1);
            let mut time = u32::arbitrary(g) / 2;
            let mut blocks = NonEmpty::new(BlockSummary::new(
                0,
                time,
                u32::arbitrary(g),
                BlockKind::Work,
            ));

            for h in 1..=height {
                let delta = i16::arbitrary(g) as TimeOffset;
                time = (time as TimeOffset + delta).max(0) as BlockTime;

                blocks.push(BlockSummary::new(
                    h,
                    time,
                    u32::arbitrary(g),
                    BlockKind::arbitrary(g),
                ));
            }
            Self { blocks }
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let len = self.blocks.len();
            let blocks = self.blocks.clone();

            Box::new((1..len).rev().filter_map(move |n| {
                NonEmpty::from_slice(&blocks.iter().take(n).cloned().collect::<Vec<_>>())
                    .map(|blocks| ArbitraryChain { blocks })
            }))
        }
    }

    impl fmt::Debug for ArbitraryChain {
        fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
            writeln!(fmt)?;

            for blk in self.blocks.iter() {
                writeln!(
                    fmt,
                    "{:>4} {:?} time={} bits={:#010x}",
                    blk.height, blk.kind, blk.time, blk.bits
                )?;
            }
            Ok(())
        }
    }
}
