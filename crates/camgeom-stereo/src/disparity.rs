use num_traits::Float;
use serde::{Deserialize, Serialize};

use camgeom_calib3d::{CameraIntrinsics, Extrinsics};

use crate::error::StereoError;

/// A dense per-pixel disparity map in row-major order.
///
/// The sentinel value `-T::MAX` marks pixels the matcher could not
/// resolve; a disparity of exactly zero marks a point at infinity. Both
/// are valid inputs to reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct DisparityMap<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> DisparityMap<T> {
    /// The sentinel marking an unreliable/unmatched pixel, the negative
    /// of the largest finite value of the scalar type.
    pub fn unreliable() -> T {
        -T::max_value()
    }

    /// Creates a disparity map from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns an error when the map is empty or the buffer length does
    /// not match `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, StereoError> {
        if rows == 0 || cols == 0 {
            return Err(StereoError::EmptyDisparityMap);
        }
        if data.len() != rows * cols {
            return Err(StereoError::DataLengthMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a disparity map by evaluating `f(row, col)` per pixel.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        f: impl Fn(usize, usize) -> T,
    ) -> Result<Self, StereoError> {
        if rows == 0 || cols == 0 {
            return Err(StereoError::EmptyDisparityMap);
        }
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The disparity at pixel `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// The row-major disparity buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// Calibrated parameters of a rectified stereo pair.
///
/// `extrinsics` maps camera-1 coordinates into camera-2 coordinates; for
/// a rectified pair the rotation is (close to) identity and the
/// translation lies along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de> + num_traits::Float"
))]
pub struct StereoParams<T> {
    /// Intrinsic parameters of camera 1 after rectification.
    pub intrinsics1: CameraIntrinsics<T>,
    /// Transform from camera-1 coordinates to camera-2 coordinates.
    pub extrinsics: Extrinsics<T>,
}

impl<T: Float> StereoParams<T> {
    /// Creates stereo parameters, validating the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::InvalidBaseline`] when the x component of
    /// the between-camera translation is zero or non-finite.
    pub fn new(
        intrinsics1: CameraIntrinsics<T>,
        extrinsics: Extrinsics<T>,
    ) -> Result<Self, StereoError> {
        let params = Self {
            intrinsics1,
            extrinsics,
        };
        let b = params.baseline();
        if !b.is_finite() || b == T::zero() {
            return Err(StereoError::InvalidBaseline);
        }
        Ok(params)
    }

    /// The signed stereo baseline.
    ///
    /// Camera 2 displaced along +x in camera 1's frame gives a negative
    /// translation x component, so the sign is flipped here; positive
    /// disparity then reconstructs to positive depth.
    pub fn baseline(&self) -> T {
        -self.extrinsics.translation[0]
    }
}

/// A dense per-pixel 3D point cloud with the shape of the disparity map
/// it was reconstructed from.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud<T> {
    rows: usize,
    cols: usize,
    points: Vec<[T; 3]>,
}

impl<T: Float> PointCloud<T> {
    pub(crate) fn from_parts(rows: usize, cols: usize, points: Vec<[T; 3]>) -> Self {
        debug_assert_eq!(points.len(), rows * cols);
        Self { rows, cols, points }
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The 3D point at pixel `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [T; 3] {
        self.points[row * self.cols + col]
    }

    /// The row-major point buffer.
    pub fn points(&self) -> &[[T; 3]] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camgeom_calib3d::RotationMatrix;

    #[test]
    fn disparity_map_shape_checks() {
        assert_eq!(
            DisparityMap::<f64>::new(0, 4, vec![]),
            Err(StereoError::EmptyDisparityMap)
        );
        assert_eq!(
            DisparityMap::new(2, 2, vec![1.0f64; 3]),
            Err(StereoError::DataLengthMismatch {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
        let map = DisparityMap::new(2, 3, vec![0.5f64; 6]).unwrap();
        assert_eq!(map.get(1, 2), 0.5);
    }

    #[test]
    fn unreliable_sentinel_is_most_negative_finite() {
        assert_eq!(DisparityMap::<f32>::unreliable(), -f32::MAX);
        assert_eq!(DisparityMap::<f64>::unreliable(), -f64::MAX);
    }

    #[test]
    fn baseline_sign_convention() {
        let intrinsics = CameraIntrinsics::new(100.0f64, 100.0, 50.0, 50.0);
        let extrinsics =
            Extrinsics::new(RotationMatrix::identity(), [-0.12, 0.0, 0.0]).unwrap();
        let params = StereoParams::new(intrinsics, extrinsics).unwrap();
        assert_eq!(params.baseline(), 0.12);
    }

    #[test]
    fn zero_baseline_is_rejected() {
        let intrinsics = CameraIntrinsics::new(100.0f64, 100.0, 50.0, 50.0);
        let extrinsics = Extrinsics::new(RotationMatrix::identity(), [0.0; 3]).unwrap();
        assert_eq!(
            StereoParams::new(intrinsics, extrinsics),
            Err(StereoError::InvalidBaseline)
        );
    }
}
