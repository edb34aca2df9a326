use serde_json::{json, Value};
use std::process::Command;

/// Version and build revision of this binary.
pub fn build_report() -> Value {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": specrel::VERSION,
        "code_rev": current_git_rev(),
    })
}

/// Revision of the source tree: a non-empty `GIT_COMMIT` seen at build
/// time or at run time, then `git rev-parse HEAD`, then `"unknown"`.
pub fn current_git_rev() -> String {
    let build_time = option_env!("GIT_COMMIT").map(str::to_owned);
    let run_time = std::env::var("GIT_COMMIT").ok();
    build_time
        .into_iter()
        .chain(run_time)
        .find(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_owned())
}
