// File: crates/hubchart-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, pulled in by Skia's font discovery
        println!("cargo:rustc-link-lib=advapi32");
    }
}
