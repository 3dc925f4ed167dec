use num_traits::Float;

use crate::error::CalibError;

/// Number of interior corners for a board of `[rows, cols]` squares.
///
/// # Errors
///
/// Returns [`CalibError::InvalidBoardSize`] unless both dimensions are
/// at least 3 squares (the smallest board with a 2x2 interior grid).
pub fn interior_corner_count(board_size: [usize; 2]) -> Result<usize, CalibError> {
    let [rows, cols] = board_size;
    if rows < 3 || cols < 3 {
        return Err(CalibError::InvalidBoardSize { rows, cols });
    }
    Ok((rows - 1) * (cols - 1))
}

/// Generate the canonical world coordinates of a checkerboard's interior
/// corners.
///
/// The corner nearest the pattern's reference square is the origin; the
/// point for interior grid cell `(i, j)` is `(j * square_size,
/// i * square_size)`. Points are emitted column-major: all rows of
/// column 0 first, then column 1, and so on.
///
/// # Arguments
///
/// * `board_size` - The board dimensions as `[rows, cols]` in squares.
/// * `square_size` - The side length of one square, in world units.
///
/// # Returns
///
/// The `(rows - 1) * (cols - 1)` interior corner positions.
///
/// Example:
///
/// ```
/// use camgeom_calib3d::checkerboard::generate_checkerboard_points;
///
/// let points = generate_checkerboard_points([4, 5], 10.0).unwrap();
/// assert_eq!(points.len(), 12);
/// assert_eq!(points[0], [0.0, 0.0]);
/// assert_eq!(points[1], [0.0, 10.0]);
/// assert_eq!(points[3], [10.0, 0.0]);
/// ```
pub fn generate_checkerboard_points<T: Float>(
    board_size: [usize; 2],
    square_size: T,
) -> Result<Vec<[T; 2]>, CalibError> {
    let count = interior_corner_count(board_size)?;
    if !square_size.is_finite() || square_size <= T::zero() {
        return Err(CalibError::InvalidSquareSize);
    }

    let [rows, cols] = board_size;
    let mut points = Vec::with_capacity(count);
    let mut x = T::zero();
    for _ in 0..cols - 1 {
        let mut y = T::zero();
        for _ in 0..rows - 1 {
            points.push([x, y]);
            y = y + square_size;
        }
        x = x + square_size;
    }
    Ok(points)
}
