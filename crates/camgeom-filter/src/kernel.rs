use num_traits::Float;

use crate::error::FilterError;

/// A dense 2D convolution kernel in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Kernel2D<T> {
    /// Creates a kernel from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns an error when the kernel is empty or the buffer length
    /// does not match `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, FilterError> {
        if rows == 0 || cols == 0 {
            return Err(FilterError::EmptyKernel);
        }
        if data.len() != rows * cols {
            return Err(FilterError::DataLengthMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a kernel as the outer product of a column and a row
    /// vector, which is separable by construction.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyKernel`] if either vector is empty.
    pub fn from_outer_product(col: &[T], row: &[T]) -> Result<Self, FilterError> {
        if col.is_empty() || row.is_empty() {
            return Err(FilterError::EmptyKernel);
        }
        let mut data = Vec::with_capacity(col.len() * row.len());
        for &c in col {
            for &r in row {
                data.push(c * r);
            }
        }
        Ok(Self {
            rows: col.len(),
            cols: row.len(),
            data,
        })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// The row-major element buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// True when every element is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_checks() {
        assert_eq!(
            Kernel2D::<f64>::new(0, 3, vec![]),
            Err(FilterError::EmptyKernel)
        );
        assert_eq!(
            Kernel2D::new(2, 2, vec![1.0f64; 5]),
            Err(FilterError::DataLengthMismatch {
                rows: 2,
                cols: 2,
                len: 5
            })
        );
    }

    #[test]
    fn outer_product_layout() {
        let k = Kernel2D::from_outer_product(&[1.0, 2.0], &[3.0, 4.0, 5.0]).unwrap();
        assert_eq!(k.rows(), 2);
        assert_eq!(k.cols(), 3);
        assert_eq!(k.get(1, 2), 10.0);
    }

    #[test]
    fn finiteness() {
        let k = Kernel2D::new(1, 2, vec![1.0, f64::NAN]).unwrap();
        assert!(!k.is_finite());
    }
}
