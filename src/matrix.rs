//! Owned dense matrices and the validated, dispatched operations on them.
//!
//! This is the layer a tensor library calls into: shapes are checked once and
//! reported as [`LanekitError`](crate::error::LanekitError) values, then the work
//! is handed to the process-wide [`Kernel`](crate::simd::Kernel).

use std::fmt;

use ndarray::Array2;
use rand::Rng;
use rayon::prelude::*;

use crate::{
    dispatch::kernel,
    error::{incompatible_error, shape_error, zero_length_error, Result},
    view::{add_with, axpy_with, gemm_with, mul_with, MatrixMut, MatrixRef},
    PARALLEL_MATMUL_THRESHOLD,
};

/// A dense, row-major `f32` matrix.
///
/// Row `i` occupies `data[i * cols..(i + 1) * cols]`. Both dimensions are
/// always non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a `rows × cols` matrix.
    ///
    /// With `data = None` the matrix is zero-filled; otherwise `data` must hold
    /// exactly `rows * cols` values in row-major order.
    ///
    /// # Errors
    ///
    /// - [`LanekitError::ZeroLength`](crate::LanekitError::ZeroLength) if either
    ///   dimension is zero.
    /// - [`LanekitError::Shape`](crate::LanekitError::Shape) if `data` has the
    ///   wrong length.
    pub fn new(rows: usize, cols: usize, data: Option<Vec<f32>>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(zero_length_error(rows, cols));
        }

        let size = rows
            .checked_mul(cols)
            .ok_or_else(|| shape_error((rows, cols), (rows, cols), "element count overflows usize"))?;

        let data = match data {
            Some(data) if data.len() != size => {
                return Err(shape_error(
                    (rows, cols),
                    (1, data.len()),
                    format!("expected {size} values, got {}", data.len()),
                ))
            }
            Some(data) => data,
            None => vec![0.0; size],
        };

        Ok(Self { data, rows, cols })
    }

    /// A zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, None)
    }

    /// A `rows × cols` matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Result<Self> {
        let mut matrix = Self::zeros(rows, cols)?;
        matrix.data.fill(value);
        Ok(matrix)
    }

    /// A `rows × cols` matrix of ones, the usual starting point for bias terms.
    pub fn bias(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 1.0)
    }

    /// A `rows × cols` matrix drawn uniformly from `[-1/sqrt(cols), 1/sqrt(cols))`.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut matrix = Self::zeros(rows, cols)?;
        let bound = 1.0 / (cols as f32).sqrt();

        matrix
            .data
            .iter_mut()
            .for_each(|v| *v = rng.random_range(-bound..bound));

        Ok(matrix)
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline(always)]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Row `i` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Element at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Borrowed read-only view.
    #[inline]
    pub fn view(&self) -> MatrixRef<'_> {
        MatrixRef::new(&self.data, self.rows, self.cols)
    }

    /// Borrowed mutable view.
    #[inline]
    pub fn view_mut(&mut self) -> MatrixMut<'_> {
        MatrixMut::new(&mut self.data, self.rows, self.cols)
    }

    /// Reshapes to `rows × cols` and zero-fills, reusing the allocation when
    /// it is large enough.
    pub fn reset(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(zero_length_error(rows, cols));
        }

        let size = rows
            .checked_mul(cols)
            .ok_or_else(|| shape_error((rows, cols), (rows, cols), "element count overflows usize"))?;

        self.rows = rows;
        self.cols = cols;
        self.data.clear();
        self.data.resize(size, 0.0);

        Ok(())
    }

    /// Sets every element to zero without changing the shape.
    pub fn zero(&mut self) {
        clear(&mut self.data);
    }

    /// Allocates `self · other` as a fresh matrix.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.rows, other.cols)?;
        matmul(&mut out, self, other)?;
        Ok(out)
    }

    /// Copies into an [`ndarray::Array2`].
    pub fn to_array(&self) -> Array2<f32> {
        Array2::from_shape_fn((self.rows, self.cols), |(i, j)| self.data[i * self.cols + j])
    }
}

impl TryFrom<Array2<f32>> for Matrix {
    type Error = crate::LanekitError;

    fn try_from(array: Array2<f32>) -> Result<Self> {
        let (rows, cols) = array.dim();
        Matrix::new(rows, cols, Some(array.iter().copied().collect()))
    }
}

impl TryFrom<&Array2<f32>> for Matrix {
    type Error = crate::LanekitError;

    fn try_from(array: &Array2<f32>) -> Result<Self> {
        let (rows, cols) = array.dim();
        Matrix::new(rows, cols, Some(array.iter().copied().collect()))
    }
}

impl From<&Matrix> for Array2<f32> {
    fn from(matrix: &Matrix) -> Self {
        matrix.to_array()
    }
}

impl fmt::Display for Matrix {
    /// Renders each row as `[a, b, ...]`, rows back to back: `[1, 2][3, 4]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks_exact(self.cols) {
            f.write_str("[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

// ================================================================================================
// OPERATIONS
// ================================================================================================

fn check_matmul(dst: &Matrix, m: &Matrix, n: &Matrix) -> Result<()> {
    if m.cols != n.rows {
        return Err(incompatible_error(
            m.shape(),
            n.shape(),
            "left column count must equal right row count",
        ));
    }

    if dst.shape() != (m.rows, n.cols) {
        return Err(shape_error(
            (m.rows, n.cols),
            dst.shape(),
            "destination must have the left row count and right column count",
        ));
    }

    Ok(())
}

/// Accumulates `m · n` into `dst` (`dst += m · n`).
///
/// `dst` is not cleared first; call [`Matrix::zero`] (or use [`Matrix::dot`])
/// for a fresh product.
///
/// # Errors
///
/// - [`LanekitError::Incompatible`](crate::LanekitError::Incompatible) if
///   `m.cols() != n.rows()`.
/// - [`LanekitError::Shape`](crate::LanekitError::Shape) if `dst` is not
///   `m.rows() × n.cols()`.
pub fn matmul(dst: &mut Matrix, m: &Matrix, n: &Matrix) -> Result<()> {
    check_matmul(dst, m, n)?;
    gemm_with(kernel(), &mut dst.view_mut(), m.view(), n.view());
    Ok(())
}

/// Same as [`matmul`], with output rows spread over the rayon thread pool.
///
/// Each row runs the identical AXPY sequence it would run in [`matmul`], so
/// the result is bit-for-bit the same. Small products (fewer than
/// [`PARALLEL_MATMUL_THRESHOLD`] multiply-adds) run sequentially.
pub fn par_matmul(dst: &mut Matrix, m: &Matrix, n: &Matrix) -> Result<()> {
    check_matmul(dst, m, n)?;

    let work = m.rows.saturating_mul(m.cols).saturating_mul(n.cols);
    if work < PARALLEL_MATMUL_THRESHOLD {
        gemm_with(kernel(), &mut dst.view_mut(), m.view(), n.view());
        return Ok(());
    }

    let kernel = kernel();
    let n_cols = n.cols;

    dst.data
        .par_chunks_mut(n_cols)
        .zip(m.data.par_chunks(m.cols))
        .for_each(|(out_row, m_row)| {
            let mut out = MatrixMut::new(out_row, 1, n_cols);
            gemm_with(kernel, &mut out, MatrixRef::new(m_row, 1, m_row.len()), n.view());
        });

    Ok(())
}

/// `dst += alpha * x`.
///
/// # Errors
///
/// [`LanekitError::Shape`](crate::LanekitError::Shape) if the slices differ in
/// length.
pub fn axpy(dst: &mut [f32], x: &[f32], alpha: f32) -> Result<()> {
    if dst.len() != x.len() {
        return Err(shape_error(
            (1, dst.len()),
            (1, x.len()),
            "axpy of different sizes",
        ));
    }

    axpy_with(kernel(), x, dst, alpha);
    Ok(())
}

/// `dst += src`, elementwise.
///
/// # Errors
///
/// [`LanekitError::Shape`](crate::LanekitError::Shape) if the slices differ in
/// length.
pub fn add(dst: &mut [f32], src: &[f32]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(shape_error(
            (1, dst.len()),
            (1, src.len()),
            "add of different sizes",
        ));
    }

    add_with(kernel(), dst, src);
    Ok(())
}

/// `dst *= src`, elementwise.
///
/// # Errors
///
/// [`LanekitError::Shape`](crate::LanekitError::Shape) if the slices differ in
/// length.
pub fn mul(dst: &mut [f32], src: &[f32]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(shape_error(
            (1, dst.len()),
            (1, src.len()),
            "multiply of different sizes",
        ));
    }

    mul_with(kernel(), dst, src);
    Ok(())
}

/// Sets every element of `data` to zero.
#[inline]
pub fn clear(data: &mut [f32]) {
    data.fill(0.0);
}
