#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// histogram equalization module.
pub mod histogram;

/// operations to normalize images.
pub mod normalize;

/// module containing parallelization utilities.
pub mod parallel;
