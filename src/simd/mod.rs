#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx2;

pub mod portable;

pub mod traits;

pub use traits::Kernel;

/// Number of f32 elements processed per fused batch.
///
/// Matches one 256-bit register (8 × 32 bits). The portable kernel uses the
/// same grouping so both kernels round identically.
pub const LANE_COUNT: usize = 8;
