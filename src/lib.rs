//! Ion is a library for computing and validating the difficulty targets of
//! the Ion hybrid proof-of-work/proof-of-stake chain.
//!
//! The project is broken down into the following crates:
//!
//! * [`chain`]: the block cache, the retargeting algorithms and header validation
//! * [`common`]: common functionality used by all crates
//!
//! ```
//! use ion::chain::block::cache::BlockCache;
//! use ion::chain::block::{BlockKind, BlockSummary};
//! use ion::common::network::Network;
//!
//! let params = Network::Testnet.params();
//! let genesis = BlockSummary::new(0, params.genesis_time, 0x1e0fffff, BlockKind::Work);
//! let mut cache = BlockCache::new(genesis, params.clone()).unwrap();
//!
//! let bits = cache.next_work_required(BlockKind::Work);
//! let block = BlockSummary::new(1, params.genesis_time + 64, bits, BlockKind::Work);
//!
//! assert_eq!(cache.extend_tip(block, &[0; 32]), Ok(1));
//! ```

#[cfg(feature = "ion-chain")]
pub use ion_chain as chain;
#[cfg(feature = "ion-common")]
pub use ion_common as common;
