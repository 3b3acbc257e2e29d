//! In-place activation functions over `f32` slices.
//!
//! These run as plain scalar loops on every kernel. The exponential is
//! evaluated in `f64` and rounded once to `f32`.

/// Logistic sigmoid, `1 / (1 + e^-v)`.
pub fn sigmoid(x: &mut [f32]) {
    for v in x.iter_mut() {
        *v = 1.0 / (1.0 + (-f64::from(*v)).exp() as f32);
    }
}

/// Hyperbolic tangent, computed as `2 / (1 + e^-2v) - 1`.
pub fn tanh(x: &mut [f32]) {
    for v in x.iter_mut() {
        *v = 2.0 / (1.0 + (-2.0 * f64::from(*v)).exp() as f32) - 1.0;
    }
}

/// Swish, `v / (1 + e^-v)`.
pub fn swish(x: &mut [f32]) {
    for v in x.iter_mut() {
        *v /= 1.0 + (-f64::from(*v)).exp() as f32;
    }
}

/// Leaky ReLU with a slope of `0.01` below zero.
pub fn lrelu(x: &mut [f32]) {
    for v in x.iter_mut().filter(|v| **v < 0.0) {
        *v *= 0.01;
    }
}
