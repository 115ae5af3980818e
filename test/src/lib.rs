//! Testing utilities for ion crates.
pub mod block;
pub mod logger;

use once_cell::sync::Lazy;

use ion_common::block::BlockSummary;
use ion_common::network::Network;
use ion_common::nonempty::NonEmpty;

/// Seed of the fixture chains, so that failures are reproducible.
pub const SEED: u64 = 0x1011_2017;

/// A testnet chain going through every retargeting era, with random block
/// times, kinds and bits.
pub static TESTNET_CHAIN: Lazy<NonEmpty<BlockSummary>> = Lazy::new(|| {
    let params = Network::Testnet.params();
    let mut rng = fastrand::Rng::with_seed(SEED);

    block::gen::chain(&params, params.pos_pow_start_height + 200, &mut rng)
});
