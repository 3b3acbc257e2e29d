//! C ABI entry points.
//!
//! These are the symbols a foreign tensor library links against when the crate
//! is built as a `cdylib` or `staticlib`. They do no validation: buffer sizes,
//! dimension compatibility and zeroing the output are the caller's job. Both
//! go through [`crate::dispatch::kernel`], so a CPU without AVX2/FMA runs the
//! portable kernel instead of faulting.
//!
//! ```c
//! void vector_multiply_add(const float *x, float *y, uint64_t size, float alpha);
//! void matrix_multiply(float *output, const float *m, const float *n,
//!                      uint64_t mr, uint64_t mc, uint64_t nr, uint64_t nc);
//! ```

use crate::dispatch::kernel;

/// `y[i] += alpha * x[i]` for `i` in `0..size`.
///
/// # Safety
///
/// - `x` must be valid for `size` reads and `y` for `size` reads and writes.
/// - `x == y` is allowed; any other overlap is undefined behavior.
/// - `size` must fit in `usize` on the target.
#[no_mangle]
pub unsafe extern "C" fn vector_multiply_add(x: *const f32, y: *mut f32, size: u64, alpha: f32) {
    kernel().vector_multiply_add(x, y, size as usize, alpha)
}

/// `output += m · n`, all row-major, `output` is `mr × nc`.
///
/// # Safety
///
/// - `mc == nr`.
/// - `m` valid for `mr * mc` reads, `n` for `nr * nc` reads, `output` for
///   `mr * nc` reads and writes; `output` must not overlap `m` or `n`.
/// - `output` is accumulated into, never cleared.
#[no_mangle]
pub unsafe extern "C" fn matrix_multiply(
    output: *mut f32,
    m: *const f32,
    n: *const f32,
    mr: u64,
    mc: u64,
    nr: u64,
    nc: u64,
) {
    kernel().matrix_multiply(
        output,
        m,
        n,
        mr as usize,
        mc as usize,
        nr as usize,
        nc as usize,
    )
}
