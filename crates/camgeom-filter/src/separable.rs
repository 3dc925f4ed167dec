use num_traits::Float;

use crate::error::FilterError;
use crate::kernel::Kernel2D;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// First singular vectors and singular values of a 2D kernel, as
/// produced by [`SvdScalar::svd_factors`].
#[derive(Debug, Clone)]
pub struct SvdFactors<T> {
    /// First left singular vector, one entry per kernel row.
    pub u0: Vec<T>,
    /// First right singular vector, one entry per kernel column.
    pub v0: Vec<T>,
    /// All singular values in descending order.
    pub singular_values: Vec<T>,
}

/// Scalar types backed by a dense SVD routine.
///
/// Implemented for `f32` and `f64`; the faer solver is called
/// monomorphically per width.
pub trait SvdScalar: Float + sealed::Sealed {
    /// Thin SVD factors of a row-major `rows x cols` matrix.
    fn svd_factors(rows: usize, cols: usize, data: &[Self]) -> SvdFactors<Self>;
}

macro_rules! impl_svd_scalar {
    ($t:ty) => {
        impl SvdScalar for $t {
            fn svd_factors(rows: usize, cols: usize, data: &[Self]) -> SvdFactors<Self> {
                let mat = faer::Mat::<$t>::from_fn(rows, cols, |i, j| data[i * cols + j]);
                let svd = mat.svd();

                let s = svd.s_diagonal();
                let singular_values = (0..rows.min(cols)).map(|i| s.read(i)).collect();

                let u = svd.u();
                let v = svd.v();
                SvdFactors {
                    u0: (0..rows).map(|i| u.read(i, 0)).collect(),
                    v0: (0..cols).map(|i| v.read(i, 0)).collect(),
                    singular_values,
                }
            }
        }
    };
}

impl_svd_scalar!(f32);
impl_svd_scalar!(f64);

/// The 1D factors of a separable 2D kernel.
///
/// Filtering with `col` down the columns and `row` along the rows is
/// equivalent to filtering with the original 2D kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableKernels<T> {
    /// The column (vertical) kernel.
    pub col: Vec<T>,
    /// The row (horizontal) kernel.
    pub row: Vec<T>,
}

impl<T: Float> SeparableKernels<T> {
    /// Rebuilds the 2D kernel as the outer product of the two factors.
    pub fn reconstruct(&self) -> Result<Kernel2D<T>, FilterError> {
        Kernel2D::from_outer_product(&self.col, &self.row)
    }
}

/// Floating-point spacing at `x`: the gap to the next representable
/// value of the scalar type.
fn spacing<T: Float>(x: T) -> T {
    let (_, exponent, _) = x.integer_decode();
    let two = T::one() + T::one();
    two.powi(exponent as i32)
}

/// Numeric rank of the kernel from its singular values, using the
/// tolerance `max(rows, cols) * spacing(sigma_1)`.
fn numeric_rank<T: Float>(kernel: &Kernel2D<T>, singular_values: &[T]) -> usize {
    let sigma1 = singular_values[0];
    if sigma1 <= T::zero() {
        return 0;
    }
    let max_dim = T::from(kernel.rows().max(kernel.cols())).unwrap_or_else(T::max_value);
    let tol = max_dim * spacing(sigma1);
    singular_values.iter().filter(|&&s| s > tol).count()
}

/// Test a 2D kernel for rank-1 separability and factor it.
///
/// Computes the SVD of the kernel and counts singular values above
/// `max(rows, cols) * spacing(sigma_1)`. When the numeric rank is
/// exactly 1 the kernel factors into a column and a row kernel, each
/// scaled by `sqrt(sigma_1)` so the energy splits evenly and their
/// outer product reproduces the input up to floating-point error.
///
/// Kernels containing NaN or infinite values are reported as not
/// separable rather than rejected.
///
/// # Arguments
///
/// * `kernel` - The 2D kernel to test.
///
/// # Returns
///
/// The 1D factors, or `None` when the kernel is not separable.
///
/// Example:
///
/// ```
/// use camgeom_filter::{decompose_separable, Kernel2D};
///
/// // vertical Sobel kernel: outer product of [1 2 1]' and [-1 0 1]
/// let sobel = Kernel2D::new(3, 3, vec![
///     -1.0f64, 0.0, 1.0,
///     -2.0, 0.0, 2.0,
///     -1.0, 0.0, 1.0,
/// ]).unwrap();
///
/// let factors = decompose_separable(&sobel).unwrap();
/// let rebuilt = factors.reconstruct().unwrap();
/// assert!((rebuilt.get(1, 0) - sobel.get(1, 0)).abs() < 1e-12);
/// ```
pub fn decompose_separable<T: SvdScalar>(kernel: &Kernel2D<T>) -> Option<SeparableKernels<T>> {
    if !kernel.is_finite() {
        return None;
    }

    let factors = T::svd_factors(kernel.rows(), kernel.cols(), kernel.as_slice());
    if numeric_rank(kernel, &factors.singular_values) != 1 {
        return None;
    }

    let scale = factors.singular_values[0].sqrt();
    Some(SeparableKernels {
        col: factors.u0.iter().map(|&u| u * scale).collect(),
        row: factors.v0.iter().map(|&v| v * scale).collect(),
    })
}

/// True when the kernel has numeric rank 1.
///
/// Convenience wrapper over [`decompose_separable`].
pub fn is_separable<T: SvdScalar>(kernel: &Kernel2D<T>) -> bool {
    decompose_separable(kernel).is_some()
}
