// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=DEPTHSHOT_VERSION");

    // Packagers can pin the reported version
    let version = std::env::var("DEPTHSHOT_VERSION").unwrap_or_else(|_| describe_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version string derived from git, falling back to the crate version
///
/// - exact tag `v0.1.0` becomes `0.1.0-abcdef1`
/// - `v0.1.0-5-gabcdef1` becomes `0.1.0-dirty-abcdef1`
/// - outside a git checkout the Cargo package version is used as is
fn describe_version() -> String {
    let package_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".into());

    let Some(described) = git(&["describe", "--tags", "--always", "--match", "v*"]) else {
        return package_version;
    };
    let described = described.strip_prefix('v').unwrap_or(&described);
    let commit_hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());

    if !described.contains('.') {
        // No tag yet, `--always` gave us a bare hash
        return format!("{}-{}", package_version, commit_hash);
    }

    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    match parts.as_slice() {
        [hash, _commits, base] => {
            let hash = hash.strip_prefix('g').unwrap_or(hash);
            format!("{}-dirty-{}", base, hash)
        }
        _ => format!("{}-{}", described, commit_hash),
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
