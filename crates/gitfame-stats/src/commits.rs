//! Per-author commit counting via `git shortlog`.

use std::path::Path;

use gitfame_core::FameError;
use serde::{Deserialize, Serialize};

use crate::git;

/// Commit count for a single author.
///
/// # Examples
///
/// ```
/// use gitfame_stats::commits::AuthorCommits;
///
/// let entry = AuthorCommits {
///     author: "alice".into(),
///     commits: 42,
/// };
/// assert_eq!(entry.commits, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCommits {
    /// Author display name exactly as recorded by git.
    pub author: String,
    /// Number of commits by this author.
    pub commits: u64,
}

/// Count commits per author for the repository at `repo`.
///
/// Runs `git shortlog -s -n HEAD` scoped via `-C` and returns entries in the
/// order git emits them (descending count, git's own tie order). `HEAD` is
/// passed explicitly so the summarization also works when stdin is not a
/// terminal.
///
/// # Errors
///
/// Returns [`FameError::Git`] if the path is not a git repository or the
/// invocation fails.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use gitfame_stats::commits::count_commits;
///
/// let tally = count_commits(Path::new(".")).unwrap();
/// for entry in &tally {
///     println!("{:>6}  {}", entry.commits, entry.author);
/// }
/// ```
pub fn count_commits(repo: &Path) -> Result<Vec<AuthorCommits>, FameError> {
    let output = git::run(repo, &["shortlog", "-s", "-n", "HEAD"])?;
    Ok(parse_shortlog(&output))
}

/// Parse `git shortlog -s -n` output into per-author commit counts.
///
/// A line matches when, after optional leading whitespace, it starts with an
/// integer count followed by whitespace and a non-empty name. Lines that do
/// not match are silently skipped. Counts and names are preserved verbatim,
/// in input order.
///
/// # Examples
///
/// ```
/// use gitfame_stats::commits::parse_shortlog;
///
/// let tally = parse_shortlog("  3\tAlice\n  1\tBob\n");
/// assert_eq!(tally.len(), 2);
/// assert_eq!(tally[0].author, "Alice");
/// assert_eq!(tally[0].commits, 3);
/// ```
pub fn parse_shortlog(output: &str) -> Vec<AuthorCommits> {
    output.lines().filter_map(parse_shortlog_line).collect()
}

fn parse_shortlog_line(line: &str) -> Option<AuthorCommits> {
    let rest = line.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let (count, rest) = rest.split_at(digits_end);
    // The count must be separated from the name by at least one whitespace
    // character (shortlog uses a tab).
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let author = rest.trim();
    if author.is_empty() {
        return None;
    }
    let commits = count.parse().ok()?;
    Some(AuthorCommits {
        author: author.to_string(),
        commits,
    })
}
