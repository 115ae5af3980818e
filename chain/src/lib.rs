//! Difficulty retargeting and header validation for the Ion chain.
#![allow(clippy::len_without_is_empty)]
#![deny(unsafe_code, missing_debug_implementations)]
pub mod block;
pub mod pow;
