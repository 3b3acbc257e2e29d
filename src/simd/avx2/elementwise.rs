//! In-place elementwise add and multiply on AVX2.
//!
//! Same loop shape as the AXPY kernel: complete 8-lane groups go through
//! [`F32x8`], the last `size % 8` elements are handled one at a time. Both
//! paths round once per element, so the result matches the scalar loop exactly.

use crate::simd::{avx2::f32x8::F32x8, LANE_COUNT};

/// Computes `dst[i] += src[i]` for `i` in `0..size`.
///
/// # Safety
///
/// - The CPU must support AVX2.
/// - `dst` must be valid for `size` reads and writes, `src` for `size` reads.
/// - `src == dst` is allowed. Partial overlap is undefined behavior.
#[inline]
#[target_feature(enable = "avx,avx2")]
pub unsafe fn vector_add(dst: *mut f32, src: *const f32, size: usize) {
    let complete_lanes = size - (size % LANE_COUNT);

    for i in (0..complete_lanes).step_by(LANE_COUNT) {
        let sum = F32x8::load(dst.add(i)) + F32x8::load(src.add(i));
        sum.store_at(dst.add(i));
    }

    for i in complete_lanes..size {
        *dst.add(i) += *src.add(i);
    }
}

/// Computes `dst[i] *= src[i]` for `i` in `0..size`.
///
/// # Safety
///
/// Same contract as [`vector_add`].
#[inline]
#[target_feature(enable = "avx,avx2")]
pub unsafe fn vector_mul(dst: *mut f32, src: *const f32, size: usize) {
    let complete_lanes = size - (size % LANE_COUNT);

    for i in (0..complete_lanes).step_by(LANE_COUNT) {
        let product = F32x8::load(dst.add(i)) * F32x8::load(src.add(i));
        product.store_at(dst.add(i));
    }

    for i in complete_lanes..size {
        *dst.add(i) *= *src.add(i);
    }
}
