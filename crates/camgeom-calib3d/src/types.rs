use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::CalibError;

/// A 3x3 rotation matrix stored in row-major order.
///
/// The constructor rejects non-finite entries; orthonormality (and
/// determinant +1) is the caller's contract and is not re-verified on
/// every call. The same scalar type is threaded through all paired
/// operands, so single/double precision can never be mixed within one
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "[[T; 3]; 3]",
    try_from = "[[T; 3]; 3]",
    bound(
        serialize = "T: serde::Serialize + Clone",
        deserialize = "T: serde::Deserialize<'de> + num_traits::Float"
    )
)]
pub struct RotationMatrix<T> {
    m: [[T; 3]; 3],
}

impl<T: Float> RotationMatrix<T> {
    /// Creates a rotation matrix from a row-major 3x3 array.
    ///
    /// # Errors
    ///
    /// Returns [`CalibError::NonFiniteInput`] if any entry is NaN or infinite.
    pub fn new(m: [[T; 3]; 3]) -> Result<Self, CalibError> {
        if m.iter().flatten().any(|v| !v.is_finite()) {
            return Err(CalibError::NonFiniteInput("rotation matrix"));
        }
        Ok(Self { m })
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        let o = T::one();
        let z = T::zero();
        Self {
            m: [[o, z, z], [z, o, z], [z, z, o]],
        }
    }

    /// Returns the transposed rotation, which is also its inverse.
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self {
            m: [
                [m[0][0], m[1][0], m[2][0]],
                [m[0][1], m[1][1], m[2][1]],
                [m[0][2], m[1][2], m[2][2]],
            ],
        }
    }

    /// Returns the row-major 3x3 array.
    pub fn as_array(&self) -> &[[T; 3]; 3] {
        &self.m
    }

    /// Consumes the matrix, returning the row-major 3x3 array.
    pub fn into_array(self) -> [[T; 3]; 3] {
        self.m
    }

    pub(crate) fn from_array_unchecked(m: [[T; 3]; 3]) -> Self {
        Self { m }
    }
}

impl<T> From<RotationMatrix<T>> for [[T; 3]; 3] {
    fn from(rotation: RotationMatrix<T>) -> Self {
        rotation.m
    }
}

/// Deserialization goes through this conversion, so a serialized matrix
/// is re-validated on the way back in.
impl<T: Float> TryFrom<[[T; 3]; 3]> for RotationMatrix<T> {
    type Error = CalibError;

    fn try_from(m: [[T; 3]; 3]) -> Result<Self, Self::Error> {
        Self::new(m)
    }
}

/// World-to-camera transform, row-vector convention:
/// `X_cam = X_world * R + t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de> + num_traits::Float"
))]
pub struct Extrinsics<T> {
    /// The world-to-camera rotation matrix.
    pub rotation: RotationMatrix<T>,
    /// The world-to-camera translation vector.
    pub translation: [T; 3],
}

impl<T: Float> Extrinsics<T> {
    /// Creates extrinsics from a rotation and a translation.
    ///
    /// # Errors
    ///
    /// Returns [`CalibError::NonFiniteInput`] if the translation contains
    /// a NaN or infinite value.
    pub fn new(rotation: RotationMatrix<T>, translation: [T; 3]) -> Result<Self, CalibError> {
        if translation.iter().any(|v| !v.is_finite()) {
            return Err(CalibError::NonFiniteInput("translation vector"));
        }
        Ok(Self {
            rotation,
            translation,
        })
    }

    /// The identity transform (camera at the world origin).
    pub fn identity() -> Self {
        Self {
            rotation: RotationMatrix::identity(),
            translation: [T::zero(); 3],
        }
    }
}

/// A camera's own orientation and location in world coordinates, the
/// inverse sense of [`Extrinsics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de> + num_traits::Float"
))]
pub struct CameraPose<T> {
    /// The camera orientation in the world frame.
    pub orientation: RotationMatrix<T>,
    /// The camera location in the world frame.
    pub location: [T; 3],
}

impl<T: Float> CameraPose<T> {
    /// Creates a camera pose from an orientation and a location.
    ///
    /// # Errors
    ///
    /// Returns [`CalibError::NonFiniteInput`] if the location contains a
    /// NaN or infinite value.
    pub fn new(orientation: RotationMatrix<T>, location: [T; 3]) -> Result<Self, CalibError> {
        if location.iter().any(|v| !v.is_finite()) {
            return Err(CalibError::NonFiniteInput("location vector"));
        }
        Ok(Self {
            orientation,
            location,
        })
    }
}

/// Pinhole camera intrinsic parameters.
///
/// Owned by an external calibration step and consumed read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics<T> {
    /// The focal length in the x direction, in pixels.
    pub fx: T,
    /// The focal length in the y direction, in pixels.
    pub fy: T,
    /// The x coordinate of the principal point.
    pub cx: T,
    /// The y coordinate of the principal point.
    pub cy: T,
    /// The axis skew coefficient.
    pub skew: T,
}

impl<T: Float> CameraIntrinsics<T> {
    /// Creates intrinsics from focal lengths and principal point, with
    /// zero skew.
    pub fn new(fx: T, fy: T, cx: T, cy: T) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            skew: T::zero(),
        }
    }

    /// Creates intrinsics from a 3x3 upper-triangular matrix.
    ///
    /// # Errors
    ///
    /// Returns an error when the matrix is not finite, not of the form
    /// `[[fx, s, cx], [0, fy, cy], [0, 0, 1]]`, or has a zero focal length.
    pub fn from_matrix(k: &[[T; 3]; 3]) -> Result<Self, CalibError> {
        if k.iter().flatten().any(|v| !v.is_finite()) {
            return Err(CalibError::NonFiniteInput("intrinsic matrix"));
        }
        let z = T::zero();
        if k[1][0] != z || k[2][0] != z || k[2][1] != z || k[2][2] != T::one() {
            return Err(CalibError::InvalidIntrinsicMatrix);
        }
        if k[0][0] == z || k[1][1] == z {
            return Err(CalibError::ZeroFocalLength);
        }
        Ok(Self {
            fx: k[0][0],
            fy: k[1][1],
            cx: k[0][2],
            cy: k[1][2],
            skew: k[0][1],
        })
    }

    /// Returns the conventional upper-triangular 3x3 intrinsic matrix.
    pub fn matrix(&self) -> [[T; 3]; 3] {
        let z = T::zero();
        [
            [self.fx, self.skew, self.cx],
            [z, self.fy, self.cy],
            [z, z, T::one()],
        ]
    }
}

/// A 4x3 camera projection matrix `P = [R; t] * K`, row-vector
/// convention: `[x y w] = [X Y Z 1] * P`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraProjectionMatrix<T> {
    p: [[T; 3]; 4],
}

impl<T: Float> CameraProjectionMatrix<T> {
    pub(crate) fn from_array(p: [[T; 3]; 4]) -> Self {
        Self { p }
    }

    /// Returns the row-major 4x3 array.
    pub fn as_array(&self) -> &[[T; 3]; 4] {
        &self.p
    }
}
