/// An error type for the stereo module.
///
/// Every variant is an input-contract violation; degenerate disparity
/// values (sentinel, zero) are valid inputs with well-defined outputs
/// and never produce an error.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StereoError {
    /// Error when the disparity map has no pixels.
    #[error("disparity map must have at least one pixel")]
    EmptyDisparityMap,

    /// Error when the data length does not match the map dimensions.
    #[error("disparity data length ({len}) does not match {rows}x{cols}")]
    DataLengthMismatch {
        /// The number of rows of the map.
        rows: usize,
        /// The number of columns of the map.
        cols: usize,
        /// The length of the data buffer.
        len: usize,
    },

    /// Error when the stereo baseline is zero or non-finite.
    #[error("stereo baseline must be a non-zero finite value")]
    InvalidBaseline,

    /// Error when a camera-1 focal length is zero or non-finite.
    #[error("camera 1 focal lengths must be non-zero finite values")]
    InvalidFocalLength,
}
