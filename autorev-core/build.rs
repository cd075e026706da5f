//! Build script for autorev-core.
//!
//! Sets compile-time environment variables so the library can report its own
//! provenance:
//! - `AUTOREV_VERSION`: Package version (from Cargo.toml or env)
//! - `AUTOREV_BUILD_NUMBER`: CI build number (from env, `0` for local builds)

fn main() {
    println!("cargo:rerun-if-env-changed=AUTOREV_VERSION");
    println!("cargo:rerun-if-env-changed=AUTOREV_BUILD_NUMBER");

    // Set AUTOREV_VERSION (use env var if set, otherwise Cargo.toml version)
    let version = std::env::var("AUTOREV_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=AUTOREV_VERSION={}", version);

    let build = std::env::var("AUTOREV_BUILD_NUMBER")
        .ok()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| "0".to_string());
    println!("cargo:rustc-env=AUTOREV_BUILD_NUMBER={}", build);
}
