//! AXPY behaviour across every kernel available on this machine.
//!
//! Each test runs against all kernels returned by `dispatch::available()`, so the
//! portable kernel is always covered and AVX2 is covered wherever it runs.

use lanekit::dispatch::{self, KernelKind};
use lanekit::simd::Kernel;
use lanekit::view::axpy_with;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn kernels() -> Vec<(KernelKind, &'static dyn Kernel)> {
    dispatch::available()
        .into_iter()
        .filter_map(|kind| dispatch::select(kind).map(|k| (kind, k)))
        .collect()
}

/// Distance to the next representable f32 above `|v|`.
fn ulp(v: f32) -> f32 {
    let a = v.abs();
    f32::from_bits(a.to_bits() + 1) - a
}

#[test]
fn test_no_tail() {
    for (kind, kernel) in kernels() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mut y = [0.0f32; 8];

        axpy_with(kernel, &x, &mut y, 2.0);

        assert_eq!(y, [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0], "{kind}");
    }
}

#[test]
fn test_with_tail() {
    for (kind, kernel) in kernels() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let mut y = [0.0f32; 9];

        axpy_with(kernel, &x, &mut y, 2.0);

        assert_eq!(
            y,
            [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0],
            "{kind}"
        );
    }
}

#[test]
fn test_zero_size_noop() {
    for (kind, kernel) in kernels() {
        let x = [f32::NAN, f32::INFINITY, 1.0];
        let mut y = [1.0f32, 2.0, 3.0];

        unsafe { kernel.vector_multiply_add(x.as_ptr(), y.as_mut_ptr(), 0, 123.0) };

        assert_eq!(y, [1.0, 2.0, 3.0], "{kind}");
    }
}

#[test]
fn test_aliased_x_and_y() {
    for (kind, kernel) in kernels() {
        let mut v: Vec<f32> = (1..=19).map(|i| i as f32).collect();
        let p = v.as_mut_ptr();

        unsafe { kernel.vector_multiply_add(p as *const f32, p, v.len(), 2.0) };

        let expected: Vec<f32> = (1..=19).map(|i| 3.0 * i as f32).collect();
        assert_eq!(v, expected, "{kind}");
    }
}

/// `+alpha` then `-alpha` returns to the start, within one ulp of the
/// intermediate accumulator, on both the fused bulk and the unfused tail.
#[test]
fn test_approximate_inverse() {
    let mut rng = StdRng::seed_from_u64(2024);

    for (kind, kernel) in kernels() {
        for len in [8usize, 16, 13, 5, 67] {
            let x: Vec<f32> = (0..len).map(|_| rng.random_range(1.0..2.0)).collect();
            let y0: Vec<f32> = (0..len).map(|_| rng.random_range(1.0..2.0)).collect();
            let alpha = 0.75f32;

            let mut y = y0.clone();
            axpy_with(kernel, &x, &mut y, alpha);
            let y1 = y.clone();
            axpy_with(kernel, &x, &mut y, -alpha);

            for i in 0..len {
                let bound = ulp(y1[i]);
                let err = (y[i] - y0[i]).abs();
                let path = if i < len - len % 8 { "bulk" } else { "tail" };
                assert!(
                    err <= bound,
                    "{kind} {path} len {len} index {i}: |{} - {}| = {err:e} > {bound:e}",
                    y[i],
                    y0[i]
                );
            }
        }
    }
}

/// The same triple gives different answers in the fused bulk and in the tail.
///
/// `(1 + 2^-12)^2 = 1 + 2^-11 + 2^-24` sits exactly halfway between two f32
/// values. The tail rounds the product first (to `1 + 2^-11`, ties to even)
/// and ends at `2^-11`; the bulk keeps the `2^-24` term. The gap is exactly the
/// rounding error of `alpha * x`.
#[test]
fn test_bulk_and_tail_rounding_divergence() {
    let a = 1.0f32 + 1.0 / 4096.0;
    let fused = 1.0f32 / 2048.0 + 1.0 / 16_777_216.0;
    let unfused = 1.0f32 / 2048.0;

    for (kind, kernel) in kernels() {
        let x = [a; 9];
        let mut y = [-1.0f32; 9];

        axpy_with(kernel, &x, &mut y, a);

        assert_eq!(&y[..8], &[fused; 8], "{kind} bulk");
        assert_eq!(y[8], unfused, "{kind} tail");

        let divergence = y[0] - y[8];
        let product_rounding = ulp(a * a) / 2.0;
        assert_eq!(divergence, product_rounding, "{kind}");
    }
}

#[test]
fn test_kernels_agree_bit_for_bit() {
    let all = kernels();
    let mut rng = StdRng::seed_from_u64(99);

    for len in 0..=67 {
        let x: Vec<f32> = (0..len).map(|_| rng.random_range(-100.0..100.0)).collect();
        let y: Vec<f32> = (0..len).map(|_| rng.random_range(-100.0..100.0)).collect();
        let alpha: f32 = rng.random_range(-5.0..5.0);

        let results: Vec<Vec<f32>> = all
            .iter()
            .map(|(_, kernel)| {
                let mut out = y.clone();
                axpy_with(*kernel, &x, &mut out, alpha);
                out
            })
            .collect();

        for (r, (kind, _)) in results.iter().zip(&all).skip(1) {
            let same = r
                .iter()
                .zip(&results[0])
                .all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same, "{kind} disagrees with {} at len {len}", all[0].0);
        }
    }
}

#[test]
fn test_dispatched_axpy() {
    let x: Vec<f32> = (0..20).map(|i| i as f32).collect();
    let mut y = vec![1.0f32; 20];

    lanekit::axpy(&mut y, &x, -1.0).unwrap();

    let expected: Vec<f32> = (0..20).map(|i| 1.0 - i as f32).collect();
    assert_eq!(y, expected);
}

#[test]
fn test_ffi_entry_point() {
    let x = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    let mut y = [0.0f32; 9];

    unsafe { lanekit::ffi::vector_multiply_add(x.as_ptr(), y.as_mut_ptr(), 9, 2.0) };

    assert_eq!(y, [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0]);
}
