use std::env;
use std::process::Command;

/// Release builds pass `SHUTTLE_VERSION`; local builds fall back to the
/// crate version.
fn version() -> String {
    env::var("SHUTTLE_VERSION")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| format!("{}-dev", env!("CARGO_PKG_VERSION")))
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|t| !t.is_empty())
}

fn main() {
    println!("cargo:rerun-if-env-changed=SHUTTLE_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = git(&["rev-parse", "--short=10", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"]).is_some();

    println!("cargo:rustc-env=SHUTTLE_VERSION={}", version());
    println!(
        "cargo:rustc-env=SHUTTLE_BUILD_HASH={hash}{}",
        if dirty { "-dirty" } else { "" }
    );
}
