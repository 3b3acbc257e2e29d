//! Portable AXPY, elementwise add/multiply and matrix multiply.
//!
//! Used when the CPU (or the build host) lacks AVX2/FMA, or when selected
//! explicitly. Full lane groups go through [`f32::mul_add`], which is a single
//! rounding on every target (in software where the hardware has no FMA), and
//! the remainder uses a plain multiply then add. The output is therefore
//! bit-identical to the AVX2 kernel.

use crate::simd::{Kernel, LANE_COUNT};

/// Computes `y[i] += alpha * x[i]` for `i` in `0..size`.
///
/// # Safety
///
/// `x` must be valid for `size` reads and `y` for `size` reads and writes.
/// `x == y` is allowed, partial overlap is not.
#[inline]
pub unsafe fn vector_multiply_add(x: *const f32, y: *mut f32, size: usize, alpha: f32) {
    debug_assert!(
        size == 0 || (!x.is_null() && !y.is_null()),
        "Pointers must not be null"
    );

    let complete_lanes = size - (size % LANE_COUNT);

    for i in (0..complete_lanes).step_by(LANE_COUNT) {
        for lane in i..i + LANE_COUNT {
            let y_i = y.add(lane);
            *y_i = (*x.add(lane)).mul_add(alpha, *y_i);
        }
    }

    // remainder: two roundings
    for i in complete_lanes..size {
        *y.add(i) += alpha * *x.add(i);
    }
}

/// Computes `dst[i] += src[i]` for `i` in `0..size`.
///
/// # Safety
///
/// `dst` must be valid for `size` reads and writes and `src` for `size` reads.
#[inline]
pub unsafe fn vector_add(dst: *mut f32, src: *const f32, size: usize) {
    for i in 0..size {
        *dst.add(i) += *src.add(i);
    }
}

/// Computes `dst[i] *= src[i]` for `i` in `0..size`.
///
/// # Safety
///
/// Same contract as [`vector_add`].
#[inline]
pub unsafe fn vector_mul(dst: *mut f32, src: *const f32, size: usize) {
    for i in 0..size {
        *dst.add(i) *= *src.add(i);
    }
}

/// Accumulates `m · n` into `output` using rank-1 row updates.
///
/// # Safety
///
/// Same contract as [`Kernel::matrix_multiply`].
#[inline]
pub unsafe fn matrix_multiply(
    output: *mut f32,
    m: *const f32,
    n: *const f32,
    mr: usize,
    mc: usize,
    nr: usize,
    nc: usize,
) {
    PortableKernel.matrix_multiply(output, m, n, mr, mc, nr, nc)
}

/// [`Kernel`] backed by [`vector_multiply_add`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableKernel;

impl Kernel for PortableKernel {
    fn name(&self) -> &'static str {
        "portable"
    }

    #[inline]
    unsafe fn vector_multiply_add(&self, x: *const f32, y: *mut f32, size: usize, alpha: f32) {
        vector_multiply_add(x, y, size, alpha)
    }

    #[inline]
    unsafe fn vector_add(&self, dst: *mut f32, src: *const f32, size: usize) {
        vector_add(dst, src, size)
    }

    #[inline]
    unsafe fn vector_mul(&self, dst: *mut f32, src: *const f32, size: usize) {
        vector_mul(dst, src, size)
    }
}
