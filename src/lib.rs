//! # lanekit
//!
//! Fused scale-and-accumulate (AXPY) and an outer-product dense matrix multiply
//! for `f32`, built for the hot path of a tensor library.
//!
//! The crate is layered from the bottom up:
//!
//! - [`simd`]: raw, unchecked kernels working on pointers. [`simd::portable`] runs
//!   everywhere, `simd::avx2` is compiled when the build host reports AVX2 and FMA.
//!   Both implement the [`Kernel`] strategy trait.
//! - [`dispatch`]: picks one kernel on first use, from the `LANEKIT_KERNEL`
//!   environment variable or from run-time CPU detection.
//! - [`view`]: borrowed row-major matrix views and slice entry points that check
//!   shapes once per call, outside the hot loop.
//! - [`matrix`]: an owned [`Matrix`] with validated, `Result` returning operations
//!   and a rayon driven [`par_matmul`], plus the elementwise [`add`] and [`mul`].
//! - [`activation`]: in-place sigmoid, tanh, swish and leaky ReLU.
//! - [`ffi`]: `extern "C"` entry points for cross-language linkage.
//!
//! # Numeric policy
//!
//! AXPY processes 8 lanes at a time with a single-rounding fused multiply-add and
//! finishes the `len % 8` remainder with a separately rounded multiply then add.
//! Every kernel follows this split, so results do not depend on the kernel chosen.
//!
//! # Example
//!
//! ```rust
//! use lanekit::Matrix;
//!
//! let m = Matrix::new(1, 3, Some(vec![2.0, 0.0, 1.0])).unwrap();
//! let n = Matrix::new(3, 2, Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
//! let mut out = Matrix::zeros(1, 2).unwrap();
//!
//! lanekit::matmul(&mut out, &m, &n).unwrap();
//! assert_eq!(out.data(), &[7.0, 10.0]);
//! ```

pub mod activation;
pub mod dispatch;
pub mod error;
pub mod ffi;
pub mod matrix;
pub mod simd;
pub mod view;

pub use dispatch::{kernel, KernelKind};
pub use error::{LanekitError, Result};
pub use matrix::{add, axpy, clear, matmul, mul, par_matmul, Matrix};
pub use simd::{Kernel, LANE_COUNT};
pub use view::{MatrixMut, MatrixRef};

/// Minimum number of scalar multiply-adds (`mr * mc * nc`) before
/// [`par_matmul`] splits output rows across the rayon pool.
///
/// Below this, thread wake-up costs more than the product itself.
pub const PARALLEL_MATMUL_THRESHOLD: usize = 1 << 18;
