/// An error type for the filter module.
///
/// Kernels containing NaN or infinite values are not an error; the
/// separability test reports them as not separable instead.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    /// Error when the kernel has no elements.
    #[error("kernel must have at least one element")]
    EmptyKernel,

    /// Error when the data length does not match the kernel dimensions.
    #[error("kernel data length ({len}) does not match {rows}x{cols}")]
    DataLengthMismatch {
        /// The number of rows of the kernel.
        rows: usize,
        /// The number of columns of the kernel.
        cols: usize,
        /// The length of the data buffer.
        len: usize,
    },
}
