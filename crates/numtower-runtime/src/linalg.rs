//! Matrix algebra: transpose, trace, determinant, adjugate, inverse, rank
//! and Gauss–Jordan reduction.
//!
//! Scalars are treated as 1x1 matrices. Every routine combines elements
//! through the dispatch functions, so mixed-kind matrices promote exactly
//! like scalar expressions do.
//!
//! The determinant is a plain cofactor expansion with `O(n!)` cost above
//! 3x3. Pivoting during reduction treats only `Integer(0)` as zero.

use crate::arithmetic::{add, div, mul, neg, sub};
use crate::broadcast::{finish, matrix_value};
use numtower_macros::tower_builtin;
use numtower_value::{Matrix, NumberValue};

/// Copy of `m` without `skip_row` and `skip_col`
fn minor(m: &Matrix, skip_row: usize, skip_col: usize) -> Option<Matrix> {
    let size = m.rows().checked_sub(1)?;
    Matrix::from_fn(size, size, |r, c| {
        let row = if r >= skip_row { r + 1 } else { r };
        let col = if c >= skip_col { c + 1 } else { c };
        m[(row, col)].clone()
    })
    .ok()
}

fn product(m: &Matrix, indices: [usize; 3]) -> NumberValue {
    let elements = m.elements();
    let [a, b, c] = indices;
    mul(mul(elements[a].clone(), elements[b].clone()), elements[c].clone())
}

/// Determinant of a square matrix
fn determinant(m: &Matrix) -> NumberValue {
    let n = m.rows();
    match n {
        0 => NumberValue::Integer(1),
        1 => m[(0, 0)].clone(),
        2 => sub(
            mul(m[(0, 0)].clone(), m[(1, 1)].clone()),
            mul(m[(0, 1)].clone(), m[(1, 0)].clone()),
        ),
        3 => {
            // Rule of Sarrus: aei + bfg + cdh - ceg - bdi - afh
            let mut det = product(m, [0, 4, 8]);
            det = add(det, product(m, [1, 5, 6]));
            det = add(det, product(m, [2, 3, 7]));
            det = sub(det, product(m, [2, 4, 6]));
            det = sub(det, product(m, [1, 3, 8]));
            sub(det, product(m, [0, 5, 7]))
        }
        _ => {
            let mut det = NumberValue::Integer(0);
            for i in 0..n {
                let Some(sub_matrix) = minor(m, 0, i) else {
                    return NumberValue::Invalid;
                };
                let term = mul(m[(0, i)].clone(), determinant(&sub_matrix));
                det = if i % 2 == 0 { add(det, term) } else { sub(det, term) };
            }
            det
        }
    }
}

/// Transpose of the cofactor matrix.
///
/// Entry `(i, j)` is the signed determinant of the minor that drops row `j`
/// and column `i`.
fn adjugate_matrix(m: &Matrix) -> NumberValue {
    let n = m.rows();
    matrix_value(Matrix::from_fn(n, n, |i, j| {
        let cofactor = match minor(m, j, i) {
            Some(sub_matrix) => determinant(&sub_matrix),
            None => NumberValue::Invalid,
        };
        if (i + j) % 2 == 0 {
            cofactor
        } else {
            neg(cofactor)
        }
    }))
}

fn square(value: NumberValue, op: &str) -> Result<Matrix, NumberValue> {
    match value {
        NumberValue::Matrix(m) if m.is_square() => Ok(m),
        NumberValue::Matrix(m) => {
            log::debug!("{op} needs a square matrix, got {}x{}", m.rows(), m.cols());
            Err(NumberValue::Invalid)
        }
        other => Err(other),
    }
}

#[tower_builtin(name = "transpose")]
pub fn transpose(value: NumberValue) -> NumberValue {
    match value {
        NumberValue::Matrix(mut m) => {
            let (rows, cols) = m.dimensions();
            matrix_value(Matrix::from_fn(cols, rows, |i, j| m.take(j, i)))
        }
        other => other,
    }
}

/// Sum of the diagonal of a square matrix
#[tower_builtin(name = "trace")]
pub fn trace(value: NumberValue) -> NumberValue {
    match square(value, "trace") {
        Ok(mut m) => (0..m.rows()).fold(NumberValue::Integer(0), |acc, i| add(acc, m.take(i, i))),
        Err(scalar) => scalar,
    }
}

#[tower_builtin(name = "det")]
pub fn det(value: NumberValue) -> NumberValue {
    match square(value, "determinant") {
        Ok(m) => determinant(&m),
        Err(scalar) => scalar,
    }
}

#[tower_builtin(name = "adj")]
pub fn adjugate(value: NumberValue) -> NumberValue {
    match square(value, "adjugate") {
        Ok(m) if m.len() == 1 => NumberValue::Integer(1),
        Ok(m) => adjugate_matrix(&m),
        Err(NumberValue::Invalid) => NumberValue::Invalid,
        Err(_) => NumberValue::Integer(1),
    }
}

/// Inverse as `adjugate(M) * (1 / det(M))`; singular matrices give `Invalid`
#[tower_builtin(name = "inv")]
pub fn inverse(value: NumberValue) -> NumberValue {
    match square(value, "inverse") {
        Ok(m) => match m.into_single() {
            Ok(element) => div(NumberValue::Integer(1), element),
            Err(m) => {
                let scale = div(NumberValue::Integer(1), determinant(&m));
                mul(adjugate_matrix(&m), scale)
            }
        },
        Err(scalar) => div(NumberValue::Integer(1), scalar),
    }
}

/// Gauss–Jordan reduction to reduced row-echelon form.
///
/// The forward pass walks a column cursor: a zero entry at the cursor is
/// replaced by swapping in the first lower row with a non-zero entry in that
/// column, and a column that is zero from the current row down is skipped.
/// Each pivot row is divided by its pivot and cleared from the rows below.
/// The backward pass then clears every pivot column in the rows above.
pub fn gauss(mut m: Matrix) -> Matrix {
    let (rows, cols) = m.dimensions();
    let mut pivots = Vec::with_capacity(rows.min(cols));
    let mut col = 0;

    for row in 0..rows {
        let mut found = false;
        while col < cols {
            if !m[(row, col)].is_integer_zero() {
                found = true;
                break;
            }
            if let Some(lower) = (row + 1..rows).find(|&r| !m[(r, col)].is_integer_zero()) {
                m.swap_rows(row, lower);
                found = true;
                break;
            }
            col += 1;
        }
        if !found {
            break;
        }

        let pivot = m[(row, col)].clone();
        for c in 0..cols {
            let entry = m.take(row, c);
            m.set(row, c, div(entry, pivot.clone()));
        }

        for r in row + 1..rows {
            eliminate(&mut m, r, row, col);
        }

        pivots.push((row, col));
        col += 1;
    }

    for &(pivot_row, pivot_col) in &pivots {
        for r in 0..pivot_row {
            eliminate(&mut m, r, pivot_row, pivot_col);
        }
    }
    m
}

/// `row[target] -= row[target][col] * row[source]`
fn eliminate(m: &mut Matrix, target: usize, source: usize, col: usize) {
    let factor = m[(target, col)].clone();
    if factor.is_integer_zero() {
        return;
    }
    for c in 0..m.cols() {
        let scaled = mul(factor.clone(), m[(source, c)].clone());
        let entry = m.take(target, c);
        m.set(target, c, sub(entry, scaled));
    }
}

#[tower_builtin(name = "rref")]
pub fn rref(value: NumberValue) -> NumberValue {
    match value {
        NumberValue::Matrix(m) => finish(gauss(m)),
        NumberValue::Invalid => NumberValue::Invalid,
        scalar if scalar.is_integer_zero() => scalar,
        scalar => div(scalar.clone(), scalar),
    }
}

fn diagonal_rank(reduced: &Matrix) -> i64 {
    let diagonal = reduced.rows().min(reduced.cols());
    (0..diagonal)
        .filter(|&i| !reduced[(i, i)].is_integer_zero())
        .count() as i64
}

/// Number of non-zero diagonal entries after Gauss–Jordan reduction
#[tower_builtin(name = "rank")]
pub fn rank(value: NumberValue) -> NumberValue {
    let single = match value {
        NumberValue::Invalid => return NumberValue::Invalid,
        NumberValue::Matrix(m) => match m.into_single() {
            Ok(single) => single,
            Err(m) => return NumberValue::Integer(diagonal_rank(&gauss(m))),
        },
        scalar => scalar,
    };
    NumberValue::Integer(if single.is_integer_zero() { 0 } else { 1 })
}
