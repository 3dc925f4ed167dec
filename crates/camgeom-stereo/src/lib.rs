#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Disparity map and point cloud containers.
pub mod disparity;

/// Error types for the stereo module.
pub mod error;

/// Dense 3D reconstruction from disparity.
pub mod reconstruct;

pub use disparity::{DisparityMap, PointCloud, StereoParams};
pub use error::StereoError;
pub use reconstruct::{disparity_to_depth, reconstruct_scene};
