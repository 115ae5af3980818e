//! Block and blockchain related functionality.
pub mod cache;

pub use ion_common::block::tree::*;
pub use ion_common::block::*;
