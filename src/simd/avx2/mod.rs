//! AVX2 + FMA kernels for 256-bit vector operations.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+), with FMA3
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: functions carry `#[target_feature(enable = "avx,avx2,fma")]`,
//!   no global `-C target-feature` flag is needed
//! - **Build Detection**: `build.rs` only compiles this module when the build host
//!   reports both `avx2` and `fma`; `crate::dispatch` re-checks at run time
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 256-bit vector holding 8 packed single-precision values
//! - [`axpy::Avx2Kernel`]: the [`Kernel`](crate::simd::Kernel) built on it, with
//!   the elementwise add/multiply from [`elementwise`]

pub mod axpy;

pub mod elementwise;

pub mod f32x8;
