use num_traits::Float;

use crate::error::CalibError;
use crate::types::RotationMatrix;

/// Threshold below which a rotation angle is treated as degenerate,
/// derived from the scalar's machine epsilon.
fn degenerate_angle_threshold<T: Float>() -> T {
    T::epsilon().sqrt()
}

/// Convert an axis-angle rotation vector to a rotation matrix.
///
/// The vector's direction is the rotation axis and its magnitude the
/// rotation angle in radians (Rodrigues formula). A zero vector maps to
/// the identity rotation.
///
/// # Arguments
///
/// * `vector` - The axis-angle rotation vector.
///
/// # Returns
///
/// The rotation matrix.
///
/// Example:
///
/// ```
/// use camgeom_calib3d::rotation::rotation_vector_to_matrix;
///
/// let v = [0.0, 0.0, std::f64::consts::FRAC_PI_2];
/// let r = rotation_vector_to_matrix(&v).unwrap();
/// assert!((r.as_array()[0][1] + 1.0).abs() < 1e-12);
/// ```
pub fn rotation_vector_to_matrix<T: Float>(
    vector: &[T; 3],
) -> Result<RotationMatrix<T>, CalibError> {
    if vector.iter().any(|v| !v.is_finite()) {
        return Err(CalibError::NonFiniteInput("rotation vector"));
    }

    let theta = (vector[0].powi(2) + vector[1].powi(2) + vector[2].powi(2)).sqrt();
    if theta < degenerate_angle_threshold::<T>() {
        return Ok(RotationMatrix::identity());
    }

    let x = vector[0] / theta;
    let y = vector[1] / theta;
    let z = vector[2] / theta;

    let c = theta.cos();
    let s = theta.sin();
    let t = T::one() - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    Ok(RotationMatrix::from_array_unchecked([
        [m00, m01, m02],
        [m10, m11, m12],
        [m20, m21, m22],
    ]))
}

/// Convert a rotation matrix to its axis-angle rotation vector.
///
/// The returned vector's magnitude is the rotation angle, canonicalized
/// to `[0, pi]`. The identity rotation maps to the zero vector. Near a
/// half-turn the generic formula divides by `sin(theta) ~ 0`, so the
/// axis is recovered from the symmetric part of the matrix instead,
/// sign-resolved against the skew part.
///
/// # Arguments
///
/// * `rotation` - An orthonormal rotation matrix.
///
/// # Returns
///
/// The axis-angle rotation vector.
///
/// Example:
///
/// ```
/// use camgeom_calib3d::rotation::{rotation_matrix_to_vector, rotation_vector_to_matrix};
///
/// let v = [0.1f64, -0.2, 0.3];
/// let r = rotation_vector_to_matrix(&v).unwrap();
/// let back = rotation_matrix_to_vector(&r);
/// assert!((back[0] - v[0]).abs() < 1e-12);
/// ```
pub fn rotation_matrix_to_vector<T: Float>(rotation: &RotationMatrix<T>) -> [T; 3] {
    let m = rotation.as_array();
    let one = T::one();
    let half = one / (one + one);

    let trace = m[0][0] + m[1][1] + m[2][2];
    let cos_theta = ((trace - one) * half).min(one).max(-one);
    let theta = cos_theta.acos();

    let tol = degenerate_angle_threshold::<T>();
    if theta < tol {
        return [T::zero(); 3];
    }

    // twice the skew-symmetric part, `2 sin(theta) * axis`
    let skew = [
        m[2][1] - m[1][2],
        m[0][2] - m[2][0],
        m[1][0] - m[0][1],
    ];

    // The half-turn gate must be on the cosine, not the angle: acos
    // resolves theta near pi only to ~sqrt(2*eps), so an exact
    // half-turn can land outside any theta window of that width while
    // `1 + cos_theta` is still at rounding level.
    if one + cos_theta < tol {
        let axis = axis_near_half_turn(m, &skew);
        return [axis[0] * theta, axis[1] * theta, axis[2] * theta];
    }

    let scale = half * theta / theta.sin();
    [skew[0] * scale, skew[1] * scale, skew[2] * scale]
}

/// Axis extraction for `theta ~ pi`, where `R ~ 2*a*a' - I`.
///
/// Builds `a*a' = (S + I) / 2` from the symmetric part `S` of the
/// rotation, reads the axis out of the strongest column, and resolves
/// the overall sign against the skew part when it is non-negligible. At
/// the exact singularity both signs represent the same rotation; the
/// strongest component is kept positive.
fn axis_near_half_turn<T: Float>(m: &[[T; 3]; 3], skew: &[T; 3]) -> [T; 3] {
    let one = T::one();
    let half = one / (one + one);
    let quarter = half * half;

    let mut outer = [[T::zero(); 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            outer[i][j] = if i == j {
                (m[i][i] + one) * half
            } else {
                (m[i][j] + m[j][i]) * quarter
            };
        }
    }

    let mut k = 0;
    for i in 1..3 {
        if outer[i][i] > outer[k][k] {
            k = i;
        }
    }

    let mut axis = [T::zero(); 3];
    let pivot = outer[k][k].max(T::zero()).sqrt();
    if pivot == T::zero() {
        // not reachable for an orthonormal input; fall back to x
        return [one, T::zero(), T::zero()];
    }
    for i in 0..3 {
        axis[i] = if i == k { pivot } else { outer[i][k] / pivot };
    }

    let norm = (axis[0].powi(2) + axis[1].powi(2) + axis[2].powi(2)).sqrt();
    for a in axis.iter_mut() {
        *a = *a / norm;
    }

    let dot = axis[0] * skew[0] + axis[1] * skew[1] + axis[2] * skew[2];
    if dot < T::zero() {
        for a in axis.iter_mut() {
            *a = -*a;
        }
    }
    axis
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn assert_mat_close(a: &RotationMatrix<f64>, b: &RotationMatrix<f64>, eps: f64) {
        let (a, b) = (a.as_array(), b.as_array());
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[i][j], b[i][j], epsilon = eps);
            }
        }
    }

    #[test]
    fn zero_vector_maps_to_identity() {
        let r = rotation_vector_to_matrix(&[0.0f64; 3]).unwrap();
        assert_eq!(r, RotationMatrix::identity());
    }

    #[test]
    fn identity_maps_to_zero_vector() {
        let v = rotation_matrix_to_vector(&RotationMatrix::<f64>::identity());
        assert_eq!(v, [0.0; 3]);
    }

    #[test]
    fn rejects_non_finite_vector() {
        assert_eq!(
            rotation_vector_to_matrix(&[0.0, f64::NAN, 0.0]),
            Err(CalibError::NonFiniteInput("rotation vector"))
        );
    }

    #[test]
    fn quarter_turn_about_x() {
        let v = [std::f64::consts::FRAC_PI_2, 0.0, 0.0];
        let r = rotation_vector_to_matrix(&v).unwrap();
        let expected =
            RotationMatrix::new([[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]]).unwrap();
        assert_mat_close(&r, &expected, 1e-12);
    }

    #[test]
    fn vector_roundtrip_random() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            // magnitude kept inside (0, pi) where the representation is unique
            let v = [
                rng.random::<f64>() - 0.5,
                rng.random::<f64>() - 0.5,
                rng.random::<f64>() - 0.5,
            ];
            let r = rotation_vector_to_matrix(&v).unwrap();
            let back = rotation_matrix_to_vector(&r);
            for i in 0..3 {
                assert_relative_eq!(back[i], v[i], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn matrix_roundtrip_random() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let v = [
                2.0 * (rng.random::<f64>() - 0.5),
                2.0 * (rng.random::<f64>() - 0.5),
                2.0 * (rng.random::<f64>() - 0.5),
            ];
            let r = rotation_vector_to_matrix(&v).unwrap();
            let r2 = rotation_vector_to_matrix(&rotation_matrix_to_vector(&r)).unwrap();
            assert_mat_close(&r, &r2, 1e-9);
        }
    }

    #[test]
    fn angle_beyond_pi_is_canonicalized() {
        // 3*pi/2 about z is the same rotation as -pi/2 about z
        let v = [0.0, 0.0, 3.0 * std::f64::consts::FRAC_PI_2];
        let r = rotation_vector_to_matrix(&v).unwrap();
        let back = rotation_matrix_to_vector(&r);
        assert_relative_eq!(back[2], -std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn half_turn_recovers_angle_and_rotation() {
        for axis in [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0 / 3.0f64.sqrt(), 1.0 / 3.0f64.sqrt(), 1.0 / 3.0f64.sqrt()],
            [-0.6, 0.8, 0.0],
        ] {
            let v = [
                axis[0] * std::f64::consts::PI,
                axis[1] * std::f64::consts::PI,
                axis[2] * std::f64::consts::PI,
            ];
            let r = rotation_vector_to_matrix(&v).unwrap();
            let back = rotation_matrix_to_vector(&r);
            let angle = (back[0].powi(2) + back[1].powi(2) + back[2].powi(2)).sqrt();
            // the axis sign is an implementation choice at exactly pi,
            // but the angle and the rotation itself must round-trip
            assert_relative_eq!(angle, std::f64::consts::PI, epsilon = 1e-6);
            let r2 = rotation_vector_to_matrix(&back).unwrap();
            assert_mat_close(&r, &r2, 1e-6);
        }
    }

    #[test]
    fn exact_half_turn_matrix_about_diagonal_axis() {
        // R = 2*a*a' - I built directly, so the trace rounds to just
        // above -1 and the conversion must still take the half-turn
        // path instead of scaling rounding noise in the skew part
        let a = 1.0 / 3.0f64.sqrt();
        let axis = [a, a, a];
        let mut m = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                m[i][j] = 2.0 * axis[i] * axis[j] - if i == j { 1.0 } else { 0.0 };
            }
        }
        let r = RotationMatrix::new(m).unwrap();

        let back = rotation_matrix_to_vector(&r);
        let angle = (back[0].powi(2) + back[1].powi(2) + back[2].powi(2)).sqrt();
        assert_relative_eq!(angle, std::f64::consts::PI, epsilon = 1e-7);

        let r2 = rotation_vector_to_matrix(&back).unwrap();
        assert_mat_close(&r, &r2, 1e-7);
    }

    #[test]
    fn near_half_turn_roundtrip() {
        let axis = [0.48, -0.6, 0.64];
        let angle = std::f64::consts::PI - 1e-10;
        let v = [axis[0] * angle, axis[1] * angle, axis[2] * angle];
        let r = rotation_vector_to_matrix(&v).unwrap();
        let back = rotation_matrix_to_vector(&r);
        let r2 = rotation_vector_to_matrix(&back).unwrap();
        assert_mat_close(&r, &r2, 1e-6);
    }

    #[test]
    fn single_precision_roundtrip() {
        let v = [0.3f32, -0.1, 0.2];
        let r = rotation_vector_to_matrix(&v).unwrap();
        let back: [f32; 3] = rotation_matrix_to_vector(&r);
        for i in 0..3 {
            assert_relative_eq!(back[i], v[i], epsilon = 1e-4);
        }
    }
}
