use num_traits::Float;

use crate::types::{CameraPose, Extrinsics, RotationMatrix};

/// `v * M` for a row vector and a row-major 3x3 matrix.
fn row_times_mat<T: Float>(v: &[T; 3], m: &[[T; 3]; 3]) -> [T; 3] {
    [
        v[0] * m[0][0] + v[1] * m[1][0] + v[2] * m[2][0],
        v[0] * m[0][1] + v[1] * m[1][1] + v[2] * m[2][1],
        v[0] * m[0][2] + v[1] * m[1][2] + v[2] * m[2][2],
    ]
}

/// Convert a camera pose in world coordinates to world-to-camera
/// extrinsics.
///
/// `R = O'` and `t = -L * R`, so that `X_cam = X_world * R + t`.
///
/// # Arguments
///
/// * `pose` - The camera orientation and location in the world frame.
///
/// # Returns
///
/// The world-to-camera extrinsics.
///
/// Example:
///
/// ```
/// use camgeom_calib3d::pose::pose_to_extrinsics;
/// use camgeom_calib3d::{CameraPose, RotationMatrix};
///
/// let pose = CameraPose::new(RotationMatrix::identity(), [1.0, 2.0, 3.0]).unwrap();
/// let extrinsics = pose_to_extrinsics(&pose);
/// assert_eq!(extrinsics.translation, [-1.0, -2.0, -3.0]);
/// ```
pub fn pose_to_extrinsics<T: Float>(pose: &CameraPose<T>) -> Extrinsics<T> {
    let rotation = pose.orientation.transpose();
    let lr = row_times_mat(&pose.location, rotation.as_array());
    Extrinsics {
        rotation,
        translation: [-lr[0], -lr[1], -lr[2]],
    }
}

/// Convert world-to-camera extrinsics to the camera's pose in world
/// coordinates.
///
/// `O = R'` and `L = -t * O`. Exact inverse of [`pose_to_extrinsics`].
pub fn extrinsics_to_pose<T: Float>(extrinsics: &Extrinsics<T>) -> CameraPose<T> {
    let orientation = extrinsics.rotation.transpose();
    let to = row_times_mat(&extrinsics.translation, orientation.as_array());
    CameraPose {
        orientation,
        location: [-to[0], -to[1], -to[2]],
    }
}

/// The world-to-camera transform of a point, `X_cam = X_world * R + t`.
pub fn transform_point<T: Float>(extrinsics: &Extrinsics<T>, point: &[T; 3]) -> [T; 3] {
    let xr = row_times_mat(point, extrinsics.rotation.as_array());
    let t = &extrinsics.translation;
    [xr[0] + t[0], xr[1] + t[1], xr[2] + t[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::rotation_vector_to_matrix;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn identity_pose_maps_to_identity_extrinsics() {
        let pose = CameraPose::new(RotationMatrix::<f64>::identity(), [0.0; 3]).unwrap();
        let e = pose_to_extrinsics(&pose);
        assert_eq!(e.rotation, RotationMatrix::identity());
        assert_eq!(e.translation, [0.0; 3]);
    }

    #[test]
    fn pose_extrinsics_roundtrip_random() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let v = [
                rng.random::<f64>() - 0.5,
                rng.random::<f64>() - 0.5,
                rng.random::<f64>() - 0.5,
            ];
            let orientation = rotation_vector_to_matrix(&v).unwrap();
            let location = [
                10.0 * rng.random::<f64>(),
                10.0 * rng.random::<f64>(),
                10.0 * rng.random::<f64>(),
            ];
            let pose = CameraPose::new(orientation, location).unwrap();

            let back = extrinsics_to_pose(&pose_to_extrinsics(&pose));
            let (o, bo) = (pose.orientation.as_array(), back.orientation.as_array());
            for i in 0..3 {
                assert_relative_eq!(back.location[i], pose.location[i], epsilon = 1e-12);
                for j in 0..3 {
                    assert_relative_eq!(bo[i][j], o[i][j], epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn camera_location_maps_to_camera_origin() {
        // the camera's own location must land at the origin of the
        // camera frame
        let v = [0.2, 0.4, -0.3];
        let orientation = rotation_vector_to_matrix(&v).unwrap();
        let location = [1.5, -2.0, 0.7];
        let pose = CameraPose::new(orientation, location).unwrap();
        let e = pose_to_extrinsics(&pose);

        let origin = transform_point(&e, &location);
        for c in origin {
            assert_relative_eq!(c, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_precision_roundtrip() {
        let orientation = rotation_vector_to_matrix(&[0.1f32, 0.0, 0.0]).unwrap();
        let pose = CameraPose::new(orientation, [1.0f32, 2.0, 3.0]).unwrap();
        let back = extrinsics_to_pose(&pose_to_extrinsics(&pose));
        for i in 0..3 {
            assert_relative_eq!(back.location[i], pose.location[i], epsilon = 1e-5);
        }
    }
}
