/// An AXPY/matmul implementation that can be selected at run time.
///
/// Implementations only differ in how they execute the bulk of an operation.
/// AXPY keeps the same numeric policy everywhere (fused multiply-add over full
/// lane groups, multiply-then-add over the remainder). The elementwise add and
/// multiply round once per element, so every kernel agrees on them too.
pub trait Kernel: Send + Sync {
    /// Short, lowercase identifier used in logs and by `KernelKind` parsing.
    fn name(&self) -> &'static str;

    /// Computes `y[i] += alpha * x[i]` for `i` in `0..size`.
    ///
    /// # Safety
    ///
    /// - `x` and `y` must each be valid for `size` elements (reads for `x`,
    ///   reads and writes for `y`).
    /// - `x` may equal `y`; any other overlap is undefined behavior.
    unsafe fn vector_multiply_add(&self, x: *const f32, y: *mut f32, size: usize, alpha: f32);

    /// Computes `dst[i] += src[i]` for `i` in `0..size`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for `size` reads and writes, `src` for `size` reads.
    /// `src == dst` is allowed; any other overlap is undefined behavior.
    unsafe fn vector_add(&self, dst: *mut f32, src: *const f32, size: usize);

    /// Computes `dst[i] *= src[i]` for `i` in `0..size`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Kernel::vector_add`].
    unsafe fn vector_mul(&self, dst: *mut f32, src: *const f32, size: usize);

    /// Accumulates the product of `m` (`mr × mc`) and `n` (`nr × nc`) into
    /// `output` (`mr × nc`), all row-major.
    ///
    /// Runs one AXPY per `(i, k)` pair: row `k` of `n`, scaled by `m[i][k]`,
    /// is added into row `i` of `output`. `output` is never cleared.
    ///
    /// # Safety
    ///
    /// - `mc == nr`.
    /// - `m` valid for `mr * mc` reads, `n` for `nr * nc` reads and `output`
    ///   for `mr * nc` reads and writes.
    /// - `output` must not overlap `m` or `n`.
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
        debug_assert_eq!(mc, nr, "contraction dimensions differ ({mc} != {nr})");

        for i in 0..mr {
            let y = output.add(i * nc);
            for k in 0..mc {
                self.vector_multiply_add(n.add(k * nc), y, nc, *m.add(i * mc + k));
            }
        }
    }
}
