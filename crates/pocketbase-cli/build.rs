//! Exports `PB_VERSION` for `pb --version`.
//!
//! Resolution order: the `PB_BUILD_VERSION` environment variable, then
//! `git describe`, then the package version. A describe result without a tag
//! (a bare commit hash) is appended to the package version as build metadata.

use std::path::PathBuf;
use std::process::Command;

const OVERRIDE: &str = "PB_BUILD_VERSION";

fn main() {
    println!("cargo:rerun-if-env-changed={OVERRIDE}");
    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]).map(PathBuf::from) {
        println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
        println!("cargo:rerun-if-changed={}", git_dir.join("refs").display());
    }

    let package = env!("CARGO_PKG_VERSION");
    let version = match std::env::var(OVERRIDE) {
        Ok(version) if !version.trim().is_empty() => version.trim().to_string(),
        _ => match git(&["describe", "--tags", "--always", "--dirty"]) {
            Some(described) => from_describe(package, &described),
            None => package.to_string(),
        },
    };

    println!("cargo:rustc-env=PB_VERSION={version}");
}

/// Run git and return its trimmed stdout when it succeeds with output.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    let stdout = stdout.trim();
    (!stdout.is_empty()).then(|| stdout.to_string())
}

/// `v1.2.0-3-gabc123` → `1.2.0-3-gabc123`; `abc123-dirty` → `0.1.0+abc123-dirty`.
fn from_describe(package: &str, described: &str) -> String {
    let tagged = described.contains('.');
    if tagged {
        described.strip_prefix('v').unwrap_or(described).to_string()
    } else {
        format!("{package}+{described}")
    }
}
