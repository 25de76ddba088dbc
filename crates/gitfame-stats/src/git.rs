//! Subprocess wrapper around the git CLI.

use std::path::Path;
use std::process::Command;

use gitfame_core::FameError;

/// Run `git -C <repo> <args...>` and return its stdout.
///
/// Output is decoded permissively: invalid UTF-8 byte sequences become
/// U+FFFD instead of failing the run.
///
/// # Errors
///
/// Returns [`FameError::Git`] if the process cannot be spawned or exits
/// non-zero; the message carries git's stderr.
pub(crate) fn run(repo: &Path, args: &[&str]) -> Result<String, FameError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| FameError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FameError::Git(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&"?"),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_outside_a_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), &["ls-files"]).unwrap_err();
        match err {
            FameError::Git(msg) => assert!(msg.contains("ls-files"), "unexpected message: {msg}"),
            other => panic!("expected Git error, got {other:?}"),
        }
    }

    #[test]
    fn run_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        // `git version` works in any directory
        let out = run(dir.path(), &["version"]).unwrap();
        assert!(out.starts_with("git version"));
    }
}
