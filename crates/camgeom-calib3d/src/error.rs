/// An error type for the calib3d module.
///
/// Every variant is an input-contract violation detected before any
/// computation starts; the geometric routines never fail mid-way.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CalibError {
    /// Error when an input array contains a NaN or infinite value.
    #[error("{0} contains a non-finite value")]
    NonFiniteInput(&'static str),

    /// Error when the intrinsic matrix does not have the expected
    /// upper-triangular pinhole form.
    #[error("intrinsic matrix must have form [[fx, s, cx], [0, fy, cy], [0, 0, 1]]")]
    InvalidIntrinsicMatrix,

    /// Error when a focal length is zero.
    #[error("focal lengths must be non-zero")]
    ZeroFocalLength,

    /// Error when the checkerboard dimensions are too small.
    #[error("board size must be at least 3x3 squares, got {rows}x{cols}")]
    InvalidBoardSize {
        /// Number of squares along the board's first dimension.
        rows: usize,
        /// Number of squares along the board's second dimension.
        cols: usize,
    },

    /// Error when the checkerboard square size is not a positive finite value.
    #[error("square size must be a positive finite value")]
    InvalidSquareSize,
}
