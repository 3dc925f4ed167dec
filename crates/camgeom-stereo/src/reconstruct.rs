use num_traits::Float;
use rayon::prelude::*;

use crate::disparity::{DisparityMap, PointCloud, StereoParams};
use crate::error::StereoError;

fn validate_params<T: Float>(stereo: &StereoParams<T>) -> Result<(), StereoError> {
    let k = &stereo.intrinsics1;
    if !k.fx.is_finite() || !k.fy.is_finite() || k.fx == T::zero() || k.fy == T::zero() {
        return Err(StereoError::InvalidFocalLength);
    }
    let b = stereo.baseline();
    if !b.is_finite() || b == T::zero() {
        return Err(StereoError::InvalidBaseline);
    }
    Ok(())
}

/// Pixel coordinates `0, 1, 2, ...` in the scalar type, built by
/// accumulation so no integer-to-float conversion can fail.
fn pixel_coordinates<T: Float>(n: usize) -> Vec<T> {
    let mut coords = Vec::with_capacity(n);
    let mut x = T::zero();
    for _ in 0..n {
        coords.push(x);
        x = x + T::one();
    }
    coords
}

/// Reconstruct a 3D scene from a disparity map of a rectified stereo
/// pair.
///
/// For each pixel `(u, v)` with disparity `d`, depth is
/// `Z = fx * b / d` with `b` the signed baseline, and `(X, Y)` follow by
/// back-projecting `(u, v)` through camera 1's intrinsics. Points are
/// expressed in camera 1's coordinate frame and the output has exactly
/// the shape of the disparity map.
///
/// Degenerate disparities are valid inputs:
/// * the unreliable sentinel ([`DisparityMap::unreliable`]) yields
///   `(NaN, NaN, NaN)`;
/// * exactly zero yields a point at infinity, each axis signed by its
///   numerator.
///
/// The per-pixel loop is parallelized over rows.
///
/// # Arguments
///
/// * `disparity` - The dense disparity map.
/// * `stereo` - The rectified stereo pair parameters.
///
/// # Returns
///
/// A point cloud with one 3D point per disparity pixel.
///
/// Example:
///
/// ```
/// use camgeom_calib3d::{CameraIntrinsics, Extrinsics, RotationMatrix};
/// use camgeom_stereo::{reconstruct_scene, DisparityMap, StereoParams};
///
/// let intrinsics = CameraIntrinsics::new(400.0, 400.0, 320.0, 240.0);
/// let extrinsics = Extrinsics::new(RotationMatrix::identity(), [-0.1, 0.0, 0.0]).unwrap();
/// let stereo = StereoParams::new(intrinsics, extrinsics).unwrap();
/// let disparity = DisparityMap::new(2, 2, vec![8.0; 4]).unwrap();
///
/// let cloud = reconstruct_scene(&disparity, &stereo).unwrap();
/// assert_eq!(cloud.get(0, 0)[2], 400.0 * 0.1 / 8.0);
/// ```
pub fn reconstruct_scene<T: Float + Send + Sync>(
    disparity: &DisparityMap<T>,
    stereo: &StereoParams<T>,
) -> Result<PointCloud<T>, StereoError> {
    validate_params(stereo)?;

    let (rows, cols) = (disparity.rows(), disparity.cols());
    let k = &stereo.intrinsics1;
    let (fx, fy, cx, cy, skew) = (k.fx, k.fy, k.cx, k.cy, k.skew);
    let b = stereo.baseline();
    let depth_num = fx * b;
    let sentinel = DisparityMap::<T>::unreliable();

    let us = pixel_coordinates::<T>(cols);
    let vs = pixel_coordinates::<T>(rows);

    let mut points = vec![[T::zero(); 3]; rows * cols];
    points
        .par_chunks_mut(cols)
        .zip(disparity.as_slice().par_chunks(cols))
        .zip(vs.par_iter())
        .for_each(|((out_row, disp_row), &v)| {
            let yn = (v - cy) / fy;
            for ((out, &d), &u) in out_row.iter_mut().zip(disp_row).zip(us.iter()) {
                *out = if d == sentinel {
                    [T::nan(); 3]
                } else {
                    let xn = (u - cx - skew * yn) / fx;
                    if d == T::zero() {
                        [
                            T::infinity().copysign(xn * depth_num),
                            T::infinity().copysign(yn * depth_num),
                            T::infinity().copysign(depth_num),
                        ]
                    } else {
                        let z = depth_num / d;
                        [xn * z, yn * z, z]
                    }
                };
            }
        });

    if log::log_enabled!(log::Level::Debug) {
        let unreliable = points.iter().filter(|p| p[0].is_nan()).count();
        let at_infinity = points.iter().filter(|p| p[2].is_infinite()).count();
        log::debug!(
            "reconstructed {rows}x{cols} disparity map: {unreliable} unreliable, {at_infinity} at infinity"
        );
    }

    Ok(PointCloud::from_parts(rows, cols, points))
}

/// Per-pixel metric depth `Z = fx * b / d` from a disparity map.
///
/// Applies the same degenerate-disparity policy as
/// [`reconstruct_scene`]: the unreliable sentinel yields NaN and zero
/// disparity yields a signed infinity.
///
/// # Arguments
///
/// * `disparity` - The dense disparity map.
/// * `stereo` - The rectified stereo pair parameters.
///
/// # Returns
///
/// A row-major buffer of depths, one per disparity pixel.
pub fn disparity_to_depth<T: Float>(
    disparity: &DisparityMap<T>,
    stereo: &StereoParams<T>,
) -> Result<Vec<T>, StereoError> {
    validate_params(stereo)?;

    let depth_num = stereo.intrinsics1.fx * stereo.baseline();
    let sentinel = DisparityMap::<T>::unreliable();

    Ok(disparity
        .as_slice()
        .iter()
        .map(|&d| {
            if d == sentinel {
                T::nan()
            } else if d == T::zero() {
                T::infinity().copysign(depth_num)
            } else {
                depth_num / d
            }
        })
        .collect())
}
