#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Camera projection matrix construction and point projection.
pub mod camera;

/// Reference checkerboard corner geometry.
pub mod checkerboard;

/// Error types for the calib3d module.
pub mod error;

/// Conversions between camera pose and extrinsics.
pub mod pose;

/// Rotation matrix and rotation vector conversions.
pub mod rotation;

/// Value types shared across the calibration geometry.
pub mod types;

pub use error::CalibError;
pub use types::{
    CameraIntrinsics, CameraPose, CameraProjectionMatrix, Extrinsics, RotationMatrix,
};
