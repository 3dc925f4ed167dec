use num_traits::Float;

use crate::types::{CameraIntrinsics, CameraProjectionMatrix, Extrinsics};

/// Build the 4x3 camera projection matrix `P = [R; t] * K`.
///
/// Row-vector convention: a homogeneous world point `[X Y Z 1]` maps to
/// homogeneous image coordinates via `[x y w] = [X Y Z 1] * P`. The first
/// three rows carry the rotation projected through the intrinsics, the
/// fourth row the translation.
///
/// # Arguments
///
/// * `intrinsics` - The camera intrinsic parameters.
/// * `extrinsics` - The world-to-camera rotation and translation.
///
/// # Returns
///
/// The 4x3 camera projection matrix.
///
/// Example:
///
/// ```
/// use camgeom_calib3d::camera::build_camera_matrix;
/// use camgeom_calib3d::{CameraIntrinsics, Extrinsics};
///
/// let intrinsics = CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0);
/// let p = build_camera_matrix(&intrinsics, &Extrinsics::identity());
/// assert_eq!(p.as_array()[0][0], 800.0);
/// assert_eq!(p.as_array()[3], [0.0, 0.0, 0.0]);
/// ```
pub fn build_camera_matrix<T: Float>(
    intrinsics: &CameraIntrinsics<T>,
    extrinsics: &Extrinsics<T>,
) -> CameraProjectionMatrix<T> {
    // post-multiply form of K: X_cam * K' gives pixel coordinates for a
    // row-vector camera point
    let k = intrinsics.matrix();
    let kt = [
        [k[0][0], k[1][0], k[2][0]],
        [k[0][1], k[1][1], k[2][1]],
        [k[0][2], k[1][2], k[2][2]],
    ];

    let r = extrinsics.rotation.as_array();
    let t = &extrinsics.translation;

    let mut p = [[T::zero(); 3]; 4];
    for i in 0..3 {
        for j in 0..3 {
            p[i][j] = r[i][0] * kt[0][j] + r[i][1] * kt[1][j] + r[i][2] * kt[2][j];
        }
    }
    for j in 0..3 {
        p[3][j] = t[0] * kt[0][j] + t[1] * kt[1][j] + t[2] * kt[2][j];
    }

    CameraProjectionMatrix::from_array(p)
}

/// Project 3D world points to image coordinates through a camera matrix.
///
/// Applies `[x y w] = [X Y Z 1] * P` and divides by the homogeneous
/// coordinate. Points on the camera's principal plane (`w ~ 0`) yield
/// non-finite pixel coordinates rather than an error.
///
/// # Arguments
///
/// * `camera_matrix` - The 4x3 camera projection matrix.
/// * `points` - The 3D world points to project.
///
/// # Returns
///
/// A vector of `[u, v]` pixel coordinates, one per input point.
pub fn project_points<T: Float>(
    camera_matrix: &CameraProjectionMatrix<T>,
    points: &[[T; 3]],
) -> Vec<[T; 2]> {
    let p = camera_matrix.as_array();
    points
        .iter()
        .map(|pt| {
            let x = pt[0] * p[0][0] + pt[1] * p[1][0] + pt[2] * p[2][0] + p[3][0];
            let y = pt[0] * p[0][1] + pt[1] * p[1][1] + pt[2] * p[2][1] + p[3][1];
            let w = pt[0] * p[0][2] + pt[1] * p[1][2] + pt[2] * p[2][2] + p[3][2];
            [x / w, y / w]
        })
        .collect()
}
