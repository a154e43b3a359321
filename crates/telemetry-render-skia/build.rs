// File: crates/telemetry-render-skia/build.rs
// Summary: Links the Windows system libraries Skia's font manager and ICU expect.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used for system font discovery
        println!("cargo:rustc-link-lib=advapi32");
    }
}
