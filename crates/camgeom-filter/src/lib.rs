#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the filter module.
pub mod error;

/// 2D kernel container.
pub mod kernel;

/// Rank-1 separability test and decomposition.
pub mod separable;

pub use error::FilterError;
pub use kernel::Kernel2D;
pub use separable::{decompose_separable, is_separable, SeparableKernels, SvdScalar};
