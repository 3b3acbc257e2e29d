use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features the kernels can use
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // every flag listed here must be reported by the host
    requires: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == highest priority
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            _ => usize::MAX,
        }
    }

    // The AXPY bulk path needs both the 256-bit integer/float ops and FMA3
    fn features() -> Vec<CpuFeature> {
        vec![CpuFeature {
            name: "avx2",
            requires: &["avx2", "fma"],
            cfg_flag: "avx2",
            detected: false,
        }]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let flags: Vec<String> = cpuinfo
                .lines()
                .filter(|line| line.starts_with("flags"))
                .flat_map(|line| line.split_whitespace().map(|f| f.to_lowercase()))
                .collect();

            for feature in features.iter_mut() {
                feature.detected = feature
                    .requires
                    .iter()
                    .all(|required| flags.iter().any(|flag| flag == required));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = feature.requires.iter().all(|required| match *required {
                    "avx2" => contents.contains("hw.optional.avx2_0: 1"),
                    "fma" => contents.contains("hw.optional.fma: 1"),
                    _ => false,
                });
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// TODO: Windows detector (needs access to a windows machine)

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature], target_arch: &str) {
        features.sort();

        let x86 = target_arch == "x86" || target_arch == "x86_64";

        // if no feature is detected, only the portable kernel is compiled
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected && x86)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("applying: {cfg_flag}");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // Only probe the host for native builds
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features, &target_arch);
}
