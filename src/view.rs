//! Borrowed, row-major matrix views and checked entry points into a [`Kernel`].
//!
//! Views are zero-copy wrappers over slices. Shape checks are O(1) and happen
//! once per call, before the kernel runs; nothing is checked per element.
//! Vectors need no wrapper: `&[f32]` / `&mut [f32]` already carry their length.

use crate::simd::Kernel;

/// Read-only view of a dense row-major `rows × cols` matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatrixRef<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
}

impl<'a> MatrixRef<'a> {
    /// Wraps `data` as a `rows × cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: &'a [f32], rows: usize, cols: usize) -> Self {
        assert_eq!(
            rows.checked_mul(cols),
            Some(data.len()),
            "data length {} does not match a {rows}x{cols} matrix",
            data.len()
        );

        Self { data, rows, cols }
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
    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    /// Row `i` as a contiguous slice of `cols` elements.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// Mutable view of a dense row-major `rows × cols` matrix.
#[derive(Debug)]
pub struct MatrixMut<'a> {
    data: &'a mut [f32],
    rows: usize,
    cols: usize,
}

impl<'a> MatrixMut<'a> {
    /// Wraps `data` as a `rows × cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize) -> Self {
        assert_eq!(
            rows.checked_mul(cols),
            Some(data.len()),
            "data length {} does not match a {rows}x{cols} matrix",
            data.len()
        );

        Self { data, rows, cols }
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
        &*self.data
    }

    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut *self.data
    }

    /// Row `i` as a mutable contiguous slice of `cols` elements.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Reborrows as a read-only view.
    #[inline]
    pub fn view(&self) -> MatrixRef<'_> {
        MatrixRef {
            data: &*self.data,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// `y += alpha * x` through `kernel`.
///
/// # Panics
///
/// Panics if `x` and `y` differ in length.
#[inline]
pub fn axpy_with(kernel: &dyn Kernel, x: &[f32], y: &mut [f32], alpha: f32) {
    assert_eq!(
        x.len(),
        y.len(),
        "axpy of different sizes ({}, {})",
        x.len(),
        y.len()
    );

    // SAFETY: both slices hold `y.len()` elements and cannot overlap.
    unsafe { kernel.vector_multiply_add(x.as_ptr(), y.as_mut_ptr(), y.len(), alpha) }
}

/// `dst += src` elementwise through `kernel`.
///
/// # Panics
///
/// Panics if `dst` and `src` differ in length.
#[inline]
pub fn add_with(kernel: &dyn Kernel, dst: &mut [f32], src: &[f32]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "add of different sizes ({}, {})",
        dst.len(),
        src.len()
    );

    // SAFETY: both slices hold `dst.len()` elements and cannot overlap.
    unsafe { kernel.vector_add(dst.as_mut_ptr(), src.as_ptr(), dst.len()) }
}

/// `dst *= src` elementwise through `kernel`.
///
/// # Panics
///
/// Panics if `dst` and `src` differ in length.
#[inline]
pub fn mul_with(kernel: &dyn Kernel, dst: &mut [f32], src: &[f32]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "multiply of different sizes ({}, {})",
        dst.len(),
        src.len()
    );

    // SAFETY: both slices hold `dst.len()` elements and cannot overlap.
    unsafe { kernel.vector_mul(dst.as_mut_ptr(), src.as_ptr(), dst.len()) }
}

/// `output += m · n` through `kernel`.
///
/// # Panics
///
/// Panics if `m.cols() != n.rows()` or `output` is not `m.rows() × n.cols()`.
pub fn gemm_with(kernel: &dyn Kernel, output: &mut MatrixMut<'_>, m: MatrixRef<'_>, n: MatrixRef<'_>) {
    assert_eq!(
        m.cols(),
        n.rows(),
        "contraction dimensions differ ({}x{} · {}x{})",
        m.rows(),
        m.cols(),
        n.rows(),
        n.cols()
    );
    assert_eq!(
        output.shape(),
        (m.rows(), n.cols()),
        "output must be {}x{}",
        m.rows(),
        n.cols()
    );

    // SAFETY: shapes were checked above; the views own disjoint borrows, so
    // `output` cannot overlap `m` or `n`.
    unsafe {
        kernel.matrix_multiply(
            output.data_mut().as_mut_ptr(),
            m.data().as_ptr(),
            n.data().as_ptr(),
            m.rows(),
            m.cols(),
            n.rows(),
            n.cols(),
        )
    }
}
