//! AVX2 8-lane f32 SIMD vector.
//!
//! `F32x8` wraps an `__m256` register holding 8 single-precision values. It only
//! exposes what the AXPY kernel needs: broadcast, full-width loads and stores,
//! and a fused multiply-add.
//!
//! # Safety model
//!
//! Every method is an `unsafe fn` compiled with the `avx`, `avx2` and `fma`
//! target features. Callers must have checked that the CPU supports them, and
//! pointer arguments must be valid for [`LANE_COUNT`] elements.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Mul};

use crate::simd::LANE_COUNT;

/// AVX2 memory alignment requirement in bytes.
///
/// `_mm256_load_ps` / `_mm256_store_ps` require 32-byte aligned addresses;
/// unaligned addresses go through the `loadu`/`storeu` variants.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// AVX2 SIMD vector containing 8 packed f32 values.
///
/// # Usage
///
/// ```rust
/// use lanekit::simd::avx2::f32x8::F32x8;
///
/// if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
///     let x = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
///     let mut y = [1.0f32; 8];
///     unsafe {
///         let r = F32x8::load(x.as_ptr()).mul_add(F32x8::splat(2.0), F32x8::load(y.as_ptr()));
///         r.store_at(y.as_mut_ptr());
///     }
///     assert_eq!(y, [3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0]);
/// }
/// ```
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// AVX2 256-bit register containing 8 packed f32 values
    pub elements: __m256,
}

impl F32x8 {
    /// Checks whether `ptr` sits on a 32-byte boundary.
    #[inline(always)]
    pub fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }

    /// Broadcasts `value` into all 8 lanes.
    ///
    /// # Safety
    ///
    /// The CPU must support AVX.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn splat(value: f32) -> Self {
        Self {
            elements: _mm256_set1_ps(value),
        }
    }

    /// Loads 8 elements, picking the aligned instruction when possible.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 8 readable f32 values.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => Self::load_aligned(ptr),
            false => Self::load_unaligned(ptr),
        }
    }

    /// Loads 8 elements from 32-byte aligned memory with `_mm256_load_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must be 32-byte aligned and point to at least 8 readable f32 values.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    /// Loads 8 elements from any address with `_mm256_loadu_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 8 readable f32 values.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Stores all 8 lanes, picking the aligned instruction when possible.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 8 writable f32 slots.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => self.store_aligned_at(ptr),
            false => self.store_unaligned_at(ptr),
        }
    }

    /// Stores 8 lanes to 32-byte aligned memory with `_mm256_store_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must be 32-byte aligned and point to at least 8 writable f32 slots.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        _mm256_store_ps(ptr, self.elements)
    }

    /// Stores 8 lanes to any address with `_mm256_storeu_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 8 writable f32 slots.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }

    /// Computes `self * a + b` per lane with a single rounding (`vfmadd`).
    ///
    /// # Safety
    ///
    /// The CPU must support AVX and FMA.
    #[inline]
    #[target_feature(enable = "avx,fma")]
    pub unsafe fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: _mm256_fmadd_ps(self.elements, a.elements, b.elements),
        }
    }

    /// Copies the 8 lanes out into an array.
    ///
    /// # Safety
    ///
    /// The CPU must support AVX.
    #[inline]
    #[target_feature(enable = "avx")]
    pub unsafe fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        _mm256_storeu_ps(out.as_mut_ptr(), self.elements);
        out
    }
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

// Every constructor of `F32x8` is an `unsafe` AVX function, so a value only
// exists once the caller has established AVX support.

impl Add for F32x8 {
    type Output = Self;

    /// Lane-wise addition (`_mm256_add_ps`).
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    /// Lane-wise multiplication (`_mm256_mul_ps`).
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}
