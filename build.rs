// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Build script: probes the target's cache line size and exposes it to the
// crate as `CARGO_RWLOCK_CACHE_LINE_SIZE`, read back by `config::CACHE_LINE_SIZE`.
//
// Probe order:
//   1. RWLOCK_CACHE_LINE_SIZE env var (explicit override)
//   2. A small table of known target_arch defaults
//   3. Fall back to 64, the common case on x86_64 and most aarch64

fn probe_cache_line_size() -> u64 {
    if let Ok(v) = std::env::var("RWLOCK_CACHE_LINE_SIZE") {
        if let Ok(n) = v.parse::<u64>() {
            return n;
        }
        println!("cargo:warning=RWLOCK_CACHE_LINE_SIZE={v:?} is not a number, ignoring");
    }

    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let vendor = std::env::var("CARGO_CFG_TARGET_VENDOR").unwrap_or_default();

    match arch.as_str() {
        // Apple silicon and most POWER targets use 128-byte lines.
        "aarch64" if vendor == "apple" => 128,
        "powerpc64" | "powerpc64le" => 128,
        _ => 64,
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=RWLOCK_CACHE_LINE_SIZE");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_ARCH");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_VENDOR");

    let size = probe_cache_line_size();
    println!("cargo:rustc-env=CARGO_RWLOCK_CACHE_LINE_SIZE={size}");
}
