use std::cmp::Ordering;
use std::env;
use std::process::Command;

// SIMD widths the allocator can align for, probed on the build host
#[derive(PartialEq, Eq, Debug)]
struct SimdWidth {
    name: &'static str,
    // alternate spellings used by the OS feature listings (e.g. aarch64
    // /proc/cpuinfo reports NEON as "asimd")
    aliases: &'static [&'static str],
    rustc_flag: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl SimdWidth {
    // Define priority order between widths (lowest number == highest priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "sse4_1" => 2,
            "neon" => 3,
            "sse2" => 4,
            _ => usize::MAX, // lowest priority by default
        }
    }

    // Groups all instruction-set widths the crate aligns allocations for
    fn widths() -> Vec<SimdWidth> {
        vec![
            SimdWidth {
                name: "avx512f",
                aliases: &["avx512f"],
                rustc_flag: "+avx512f",
                cfg_flag: "simd512",
                detected: false,
            },
            SimdWidth {
                name: "avx2",
                aliases: &["avx2"],
                rustc_flag: "+avx2,+avx",
                cfg_flag: "simd256",
                detected: false,
            },
            SimdWidth {
                name: "sse4_1",
                aliases: &["sse4_1"],
                rustc_flag: "+sse4.1",
                cfg_flag: "simd128",
                detected: false,
            },
            SimdWidth {
                name: "neon",
                aliases: &["neon", "asimd"],
                rustc_flag: "+neon",
                cfg_flag: "simd128",
                detected: false,
            },
            SimdWidth {
                name: "sse2",
                aliases: &["sse2"],
                rustc_flag: "+sse2",
                cfg_flag: "simd128",
                detected: false,
            },
        ]
    }
}

impl Ord for SimdWidth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for SimdWidth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Feature detection trait to make implementations more modular
trait SimdWidthDetector {
    fn detect_widths(&self, widths: &mut [SimdWidth]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl SimdWidthDetector for LinuxDetector {
    fn detect_widths(&self, widths: &mut [SimdWidth]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for width in widths.iter_mut() {
                width.detected = width.aliases.iter().any(|alias| contents.contains(alias));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl SimdWidthDetector for MacOSDetector {
    fn detect_widths(&self, widths: &mut [SimdWidth]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for width in widths.iter_mut() {
                match width.name {
                    "avx512f" => width.detected = contents.contains("hw.optional.avx512f: 1"),
                    "avx2" => width.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => width.detected = contents.contains("hw.optional.sse4_1: 1"),
                    "sse2" => width.detected = contents.contains("hw.optional.sse2: 1"),
                    "neon" => width.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Factory that selects the appropriate detector for the current OS
struct PlatformDetector;
impl PlatformDetector {
    fn simd_width_detectors() -> Vec<Box<dyn SimdWidthDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_simd_widths(widths: &mut [SimdWidth]) {
        // Find the applicable detector and use it
        for detector in Self::simd_width_detectors() {
            if detector.is_applicable() {
                detector.detect_widths(widths);
                break;
            }
        }
    }

    fn apply(widths: &mut [SimdWidth]) {
        // Sort widths by priority (highest first)
        widths.sort();

        // Use the widest detected instruction set; with nothing detected the
        // allocator falls back to natural alignment
        let cfg_flag = widths
            .iter()
            .find(|width| width.detected)
            .map(|width| {
                println!("cargo:rustc-flag=-C");
                println!("cargo:rustc-flag=target-feature={}", width.rustc_flag);
                width.cfg_flag
            })
            .unwrap_or("fallback");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(simd512)");
        println!("cargo::rustc-check-cfg=cfg(simd256)");
        println!("cargo::rustc-check-cfg=cfg(simd128)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    let mut widths = SimdWidth::widths();

    // Determine if we're cross-compiling
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    let is_native_build = host == target;

    // Only probe the host CPU for native builds; cross builds take the
    // fallback tier rather than inheriting the host's instruction sets
    if is_native_build {
        PlatformDetector::detect_simd_widths(&mut widths);
    }

    PlatformDetector::apply(&mut widths);
}
