//! Matrix values and their pooled element storage
//!
//! Element buffers are taken from a process-wide [`Pool`] and handed back
//! when the matrix is dropped. Operations that transform a matrix reuse its
//! buffer in place instead of building a new one.

use crate::{NumberValue, ValueError};
use numtower_pool::{Pool, PoolConfig, PoolError, PoolStatsSnapshot};
use once_cell::sync::Lazy;
use std::ops::{Index, IndexMut};

/// Largest supported row or column count
pub const MAX_DIMENSION: usize = 127;

/// Global pool of matrix element buffers
static ELEMENT_POOL: Lazy<Pool<Vec<NumberValue>>> =
    Lazy::new(|| Pool::with_defaults("matrix element"));

pub fn configure_element_pool(config: PoolConfig) -> Result<(), PoolError> {
    ELEMENT_POOL.configure(config)
}

pub fn element_pool_config() -> PoolConfig {
    ELEMENT_POOL.config()
}

pub fn element_pool_stats() -> PoolStatsSnapshot {
    ELEMENT_POOL.stats()
}

/// Verify the element pool's free list
pub fn check_element_pool() -> Result<(), PoolError> {
    ELEMENT_POOL.check_consistency()
}

/// Run `test_fn` while holding the element pool test lock.
///
/// Tests that assert on global pool counters must all run inside this
/// context so that they observe each other's effects sequentially.
pub fn pool_test_context<F, R>(test_fn: F) -> R
where
    F: FnOnce() -> R,
{
    static TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    let _guard = match TEST_MUTEX.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    ELEMENT_POOL.reset_stats();
    test_fn()
}

/// Pool-backed element vector; returns itself to the pool on drop
#[derive(Debug)]
struct ElementBuffer {
    items: Vec<NumberValue>,
}

impl ElementBuffer {
    fn acquire() -> Self {
        match ELEMENT_POOL.acquire() {
            Ok(items) => ElementBuffer { items },
            Err(err) => {
                // Exhaustion is a resource failure the tower cannot recover from.
                log::error!("matrix allocation failed: {err}");
                panic!("{err}");
            }
        }
    }
}

impl Drop for ElementBuffer {
    fn drop(&mut self) {
        let items = std::mem::take(&mut self.items);
        if let Err(err) = ELEMENT_POOL.release(items) {
            log::error!("discarding matrix storage: {err}");
        }
    }
}

impl Clone for ElementBuffer {
    fn clone(&self) -> Self {
        let mut buffer = ElementBuffer::acquire();
        buffer.items.extend(self.items.iter().cloned());
        buffer
    }
}

/// Row-major matrix of numeric values with at most 127 rows and columns
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    elements: ElementBuffer,
}

fn check_dimension(dim: usize) -> Result<u8, ValueError> {
    if dim > MAX_DIMENSION {
        return Err(ValueError::DimensionOutOfRange(dim));
    }
    Ok(dim as u8)
}

impl Matrix {
    /// Build a matrix from row-major elements
    pub fn new(rows: usize, cols: usize, elements: Vec<NumberValue>) -> Result<Self, ValueError> {
        let r = check_dimension(rows)?;
        let c = check_dimension(cols)?;
        if elements.len() != rows * cols {
            return Err(ValueError::ElementCount {
                rows,
                cols,
                expected: rows * cols,
                actual: elements.len(),
            });
        }

        let mut buffer = ElementBuffer::acquire();
        buffer.items.extend(elements);
        Ok(Matrix {
            rows: r,
            cols: c,
            elements: buffer,
        })
    }

    /// Build a matrix by evaluating `f(row, col)` in row-major order
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, ValueError>
    where
        F: FnMut(usize, usize) -> NumberValue,
    {
        let r = check_dimension(rows)?;
        let c = check_dimension(cols)?;

        let mut buffer = ElementBuffer::acquire();
        buffer.items.reserve(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                buffer.items.push(f(row, col));
            }
        }
        Ok(Matrix {
            rows: r,
            cols: c,
            elements: buffer,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn len(&self) -> usize {
        self.elements.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.items.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn elements(&self) -> &[NumberValue] {
        &self.elements.items
    }

    pub fn elements_mut(&mut self) -> &mut [NumberValue] {
        &mut self.elements.items
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows() && col < self.cols(),
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols() + col
    }

    pub fn get(&self, row: usize, col: usize) -> &NumberValue {
        &self.elements.items[self.offset(row, col)]
    }

    /// Move an element out, leaving `Invalid` in its slot
    pub fn take(&mut self, row: usize, col: usize) -> NumberValue {
        let at = self.offset(row, col);
        std::mem::take(&mut self.elements.items[at])
    }

    pub fn set(&mut self, row: usize, col: usize, value: NumberValue) {
        let at = self.offset(row, col);
        self.elements.items[at] = value;
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols();
        for col in 0..cols {
            self.elements.items.swap(a * cols + col, b * cols + col);
        }
    }

    /// Transform every element in place, reusing this matrix's storage
    pub fn map<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(NumberValue) -> NumberValue,
    {
        for slot in self.elements.items.iter_mut() {
            let value = std::mem::take(slot);
            *slot = f(value);
        }
        self
    }

    /// Combine with a matrix of the same length element by element.
    ///
    /// The result reuses this matrix's storage; `other` is released.
    pub fn zip_with<F>(mut self, mut other: Matrix, mut f: F) -> Self
    where
        F: FnMut(NumberValue, NumberValue) -> NumberValue,
    {
        debug_assert_eq!(self.len(), other.len());
        for (slot, rhs) in self
            .elements
            .items
            .iter_mut()
            .zip(other.elements.items.iter_mut())
        {
            let lhs = std::mem::take(slot);
            *slot = f(lhs, std::mem::take(rhs));
        }
        self
    }

    /// Same elements reinterpreted with new dimensions of equal area
    pub fn reshaped(mut self, rows: usize, cols: usize) -> Result<Self, ValueError> {
        let r = check_dimension(rows)?;
        let c = check_dimension(cols)?;
        if rows * cols != self.len() {
            return Err(ValueError::ElementCount {
                rows,
                cols,
                expected: rows * cols,
                actual: self.len(),
            });
        }
        self.rows = r;
        self.cols = c;
        Ok(self)
    }

    /// The sole element of a 1x1 matrix
    pub fn into_single(mut self) -> Result<NumberValue, Self> {
        if self.len() == 1 {
            Ok(std::mem::take(&mut self.elements.items[0]))
        } else {
            Err(self)
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = NumberValue;

    fn index(&self, (row, col): (usize, usize)) -> &NumberValue {
        self.get(row, col)
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut NumberValue {
        let at = self.offset(row, col);
        &mut self.elements.items[at]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<NumberValue> {
        values.iter().copied().map(NumberValue::Integer).collect()
    }

    #[test]
    fn new_validates_shape() {
        assert!(Matrix::new(2, 2, ints(&[1, 2, 3, 4])).is_ok());
        assert_eq!(
            Matrix::new(2, 3, ints(&[1, 2])).unwrap_err(),
            ValueError::ElementCount {
                rows: 2,
                cols: 3,
                expected: 6,
                actual: 2
            }
        );
        assert_eq!(
            Matrix::new(0, 200, Vec::new()).unwrap_err(),
            ValueError::DimensionOutOfRange(200)
        );
    }

    #[test]
    fn indexing_is_row_major() {
        let m = Matrix::new(2, 3, ints(&[1, 2, 3, 4, 5, 6])).unwrap();
        assert_eq!(m[(0, 2)].integer_value(), 3);
        assert_eq!(m[(1, 0)].integer_value(), 4);
    }

    #[test]
    fn swap_rows_moves_whole_rows() {
        let mut m = Matrix::new(2, 2, ints(&[1, 2, 3, 4])).unwrap();
        m.swap_rows(0, 1);
        let values: Vec<i64> = m.elements().iter().map(|v| v.integer_value()).collect();
        assert_eq!(values, vec![3, 4, 1, 2]);
    }

    #[test]
    fn take_leaves_invalid() {
        let mut m = Matrix::new(1, 2, ints(&[7, 8])).unwrap();
        assert_eq!(m.take(0, 1).integer_value(), 8);
        assert!(m[(0, 1)].is_invalid());
    }

    #[test]
    fn map_and_zip_reuse_storage() {
        let m = Matrix::new(1, 3, ints(&[1, 2, 3])).unwrap();
        let ptr = m.elements().as_ptr();
        let doubled = m.map(|v| NumberValue::Integer(v.integer_value() * 2));
        assert_eq!(doubled.elements().as_ptr(), ptr);

        let other = Matrix::new(1, 3, ints(&[10, 20, 30])).unwrap();
        let summed = doubled.zip_with(other, |a, b| {
            NumberValue::Integer(a.integer_value() + b.integer_value())
        });
        let values: Vec<i64> = summed.elements().iter().map(|v| v.integer_value()).collect();
        assert_eq!(values, vec![12, 24, 36]);
    }

    #[test]
    fn into_single_only_for_one_element() {
        let m = Matrix::new(1, 1, ints(&[5])).unwrap();
        assert_eq!(m.into_single().unwrap().integer_value(), 5);

        let m = Matrix::new(1, 2, ints(&[5, 6])).unwrap();
        assert!(m.into_single().is_err());
    }

    #[test]
    fn clone_uses_separate_storage() {
        let m = Matrix::new(1, 2, ints(&[1, 2])).unwrap();
        let copy = m.clone();
        assert_ne!(m.elements().as_ptr(), copy.elements().as_ptr());
        assert_eq!(copy[(0, 1)].integer_value(), 2);
    }
}
