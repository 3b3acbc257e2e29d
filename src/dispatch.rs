//! Run-time kernel selection.
//!
//! The kernel is chosen once, on first use, and cached for the life of the
//! process:
//!
//! 1. `LANEKIT_KERNEL=portable|avx2` forces a kernel. An `avx2` request on a
//!    CPU without AVX2/FMA (or a build without the AVX2 module) logs a warning
//!    and falls through to automatic selection.
//! 2. Otherwise the fastest supported kernel wins.
//!
//! Builds configured with `cfg(fallback)` (no AVX2/FMA on the build host, or a
//! cross build) only carry the portable kernel.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{debug, warn};

#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
use crate::simd::avx2::axpy::Avx2Kernel;
use crate::{
    error::{unknown_kernel_error, LanekitError},
    simd::{portable::PortableKernel, Kernel},
};

/// Environment variable that overrides automatic kernel selection.
pub const KERNEL_ENV: &str = "LANEKIT_KERNEL";

static PORTABLE: PortableKernel = PortableKernel;

#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
static AVX2: Avx2Kernel = Avx2Kernel;

static SELECTED: OnceLock<&'static dyn Kernel> = OnceLock::new();

/// The kernels this crate knows about, fastest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    Portable,
    Avx2,
}

impl KernelKind {
    /// Every kind, in ascending order of preference.
    pub const ALL: [KernelKind; 2] = [KernelKind::Portable, KernelKind::Avx2];

    pub fn as_str(self) -> &'static str {
        match self {
            KernelKind::Portable => "portable",
            KernelKind::Avx2 => "avx2",
        }
    }

    /// Whether this kernel was compiled in and the running CPU can execute it.
    pub fn is_supported(self) -> bool {
        match self {
            KernelKind::Portable => true,
            KernelKind::Avx2 => avx2_supported(),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelKind {
    type Err = LanekitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portable" | "scalar" | "fallback" => Ok(KernelKind::Portable),
            "avx2" => Ok(KernelKind::Avx2),
            _ => Err(unknown_kernel_error(s)),
        }
    }
}

#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
fn avx2_supported() -> bool {
    std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")
}

#[cfg(not(all(avx2, any(target_arch = "x86", target_arch = "x86_64"))))]
fn avx2_supported() -> bool {
    false
}

/// Returns the kernel for `kind`, or `None` when it is not supported here.
pub fn select(kind: KernelKind) -> Option<&'static dyn Kernel> {
    if !kind.is_supported() {
        return None;
    }

    match kind {
        KernelKind::Portable => Some(&PORTABLE),
        #[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
        KernelKind::Avx2 => Some(&AVX2),
        #[cfg(not(all(avx2, any(target_arch = "x86", target_arch = "x86_64"))))]
        KernelKind::Avx2 => None,
    }
}

/// Kinds usable on this machine, in ascending order of preference.
pub fn available() -> Vec<KernelKind> {
    KernelKind::ALL
        .into_iter()
        .filter(|kind| kind.is_supported())
        .collect()
}

/// The process-wide kernel, selected on first call.
#[inline]
pub fn kernel() -> &'static dyn Kernel {
    *SELECTED.get_or_init(init)
}

fn init() -> &'static dyn Kernel {
    #[cfg(fallback)]
    debug!("lanekit: built without the AVX2 kernel");

    choose(std::env::var(KERNEL_ENV).ok().as_deref())
}

/// Resolves a `LANEKIT_KERNEL` value to a kernel.
///
/// `None`, an unknown name or an unsupported kernel all end in automatic
/// selection; the last two log a warning first.
fn choose(requested: Option<&str>) -> &'static dyn Kernel {
    if let Some(requested) = requested {
        match requested.parse::<KernelKind>() {
            Ok(kind) => match select(kind) {
                Some(kernel) => {
                    debug!("lanekit: using {} kernel ({}={})", kind, KERNEL_ENV, requested);
                    return kernel;
                }
                None => warn!(
                    "lanekit: {}={} is not supported on this CPU, selecting automatically",
                    KERNEL_ENV, requested
                ),
            },
            Err(err) => warn!("lanekit: ignoring {}: {}", KERNEL_ENV, err),
        }
    }

    let best = available()
        .last()
        .copied()
        .unwrap_or(KernelKind::Portable);

    debug!("lanekit: using {} kernel (detected)", best);

    select(best).unwrap_or(&PORTABLE)
}
