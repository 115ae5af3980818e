//! Library of common Ion functionality shared by all crates.
#![allow(clippy::type_complexity)]
#![warn(missing_docs)]
pub mod block;
pub mod network;
pub mod params;

pub use nonempty;
