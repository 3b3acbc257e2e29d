//! AVX2 + FMA AXPY and the outer-product matrix multiply built on it.
//!
//! # Algorithm
//!
//! 1. **Lane groups**: each complete 8-element group of `x` and `y` is loaded,
//!    combined with `vfmadd` (`x * alpha + y`, one rounding) and stored back to `y`.
//! 2. **Remainder**: the last `size % 8` elements use `y[i] += alpha * x[i]`, a
//!    separately rounded multiply and add.
//!
//! The two paths can disagree in the last bit for the same inputs. That split is
//! kept on purpose so results match the portable kernel bit for bit.
//!
//! # Matrix multiply
//!
//! For each output row `i` and each contraction index `k`, row `k` of `n` scaled
//! by `m[i][k]` is accumulated into row `i` of the output. Both rows are
//! contiguous, so the inner loop is a pure streaming AXPY rather than a strided
//! column walk through `n`.

use crate::simd::{
    avx2::{elementwise, f32x8::F32x8},
    Kernel, LANE_COUNT,
};

/// Computes `y[i] += alpha * x[i]` for `i` in `0..size`.
///
/// # Arguments
///
/// * `x` - Input vector, read only
/// * `y` - Accumulator, updated in place
/// * `size` - Number of elements in both vectors
/// * `alpha` - Scalar multiplier for `x`
///
/// # Safety
///
/// - The CPU must support AVX2 and FMA.
/// - `x` must be valid for `size` reads and `y` for `size` reads and writes.
/// - `x == y` is allowed: each lane group is fully loaded before it is stored.
///   Partial overlap is undefined behavior.
#[inline]
#[target_feature(enable = "avx,avx2,fma")]
pub unsafe fn vector_multiply_add(x: *const f32, y: *mut f32, size: usize, alpha: f32) {
    debug_assert!(
        size == 0 || (!x.is_null() && !y.is_null()),
        "Pointers must not be null"
    );

    let a = F32x8::splat(alpha);

    let complete_lanes = size - (size % LANE_COUNT);

    for i in (0..complete_lanes).step_by(LANE_COUNT) {
        let y_vec = F32x8::load(y.add(i));
        let x_vec = F32x8::load(x.add(i));
        x_vec.mul_add(a, y_vec).store_at(y.add(i));
    }

    for i in complete_lanes..size {
        *y.add(i) += alpha * *x.add(i);
    }
}

/// Accumulates the row-major product `m · n` into `output`.
///
/// # Arguments
///
/// * `output` - `mr × nc` accumulator; not cleared, callers zero it for a fresh product
/// * `m` - `mr × mc` left operand
/// * `n` - `nr × nc` right operand
/// * `mr`, `mc`, `nr`, `nc` - dimensions, with `mc == nr`
///
/// # Safety
///
/// - The CPU must support AVX2 and FMA.
/// - `mc == nr`; a mismatch reads past `n` and writes past `output`.
/// - Buffers must be valid for their full extents and `output` must not
///   overlap `m` or `n`.
#[target_feature(enable = "avx,avx2,fma")]
pub unsafe fn matrix_multiply(
    output: *mut f32,
    m: *const f32,
    n: *const f32,
    mr: usize,
    mc: usize,
    nr: usize,
    nc: usize,
) {
    debug_assert_eq!(mc, nr, "contraction dimensions differ ({mc} != {nr})");

    for i in 0..mr {
        let out_row = output.add(i * nc);
        for k in 0..mc {
            vector_multiply_add(n.add(k * nc), out_row, nc, *m.add(i * mc + k));
        }
    }
}

/// [`Kernel`] backed by the AVX2 + FMA functions of this module.
///
/// Only hand this out after checking CPU support, as
/// [`crate::dispatch`] does.
#[derive(Debug, Default, Clone, Copy)]
pub struct Avx2Kernel;

impl Kernel for Avx2Kernel {
    fn name(&self) -> &'static str {
        "avx2"
    }

    #[inline]
    unsafe fn vector_multiply_add(&self, x: *const f32, y: *mut f32, size: usize, alpha: f32) {
        vector_multiply_add(x, y, size, alpha)
    }

    #[inline]
    unsafe fn vector_add(&self, dst: *mut f32, src: *const f32, size: usize) {
        elementwise::vector_add(dst, src, size)
    }

    #[inline]
    unsafe fn vector_mul(&self, dst: *mut f32, src: *const f32, size: usize) {
        elementwise::vector_mul(dst, src, size)
    }

    unsafe fn matrix_multiply(
        &self,
        output: *mut f32,
        m: *const f32,
        n: *const f32,
        mr: usize,
        mc: usize,
        nr: usize,
        nc: usize,
    ) {
        matrix_multiply(output, m, n, mr, mc, nr, nc)
    }
}
