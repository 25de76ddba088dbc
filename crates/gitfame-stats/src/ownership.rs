//! Per-author line ownership via `git blame --line-porcelain`.
//!
//! Every tracked file is blamed in porcelain mode, which emits one metadata
//! record per source line. Each record carries an `author <name>` field; the
//! aggregator counts those fields into a single tally spanning the whole
//! file set.

use std::collections::HashMap;
use std::path::Path;

use gitfame_core::FameError;
use serde::{Deserialize, Serialize};

use crate::git;

/// The porcelain field that attributes one line to an author.
const AUTHOR_PREFIX: &str = "author ";

/// Line count owned by a single author.
///
/// # Examples
///
/// ```
/// use gitfame_stats::ownership::AuthorLines;
///
/// let entry = AuthorLines {
///     author: "alice".into(),
///     lines: 1200,
/// };
/// assert_eq!(entry.lines, 1200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorLines {
    /// Author display name exactly as recorded by git.
    pub author: String,
    /// Number of lines last modified by this author.
    pub lines: u64,
}

/// Running author -> line-count accumulator.
///
/// Counters persist across files; the tally is only ordered when finalized
/// with [`into_sorted`](OwnershipTally::into_sorted). Merging two tallies
/// with [`absorb`](OwnershipTally::absorb) is associative and commutative,
/// so accumulation order never changes the result.
///
/// # Examples
///
/// ```
/// use gitfame_stats::ownership::OwnershipTally;
///
/// let mut tally = OwnershipTally::default();
/// tally.record("alice");
/// tally.record("alice");
/// tally.record("bob");
/// let sorted = tally.into_sorted();
/// assert_eq!(sorted[0].author, "alice");
/// assert_eq!(sorted[0].lines, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OwnershipTally {
    counts: HashMap<String, u64>,
}

impl OwnershipTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute one line to `author`.
    pub fn record(&mut self, author: &str) {
        *self.counts.entry(author.to_string()).or_default() += 1;
    }

    /// Scan one file's `--line-porcelain` output and tally every
    /// `author <name>` record.
    ///
    /// Only lines starting with the exact prefix `author ` count; related
    /// fields such as `author-mail` or `author-time` do not match.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitfame_stats::ownership::OwnershipTally;
    ///
    /// let porcelain = "\
    /// 0f1e2d 1 1 1\n\
    /// author Alice\n\
    /// author-mail <alice@example.com>\n\
    /// \tfn main() {}\n";
    /// let mut tally = OwnershipTally::new();
    /// tally.record_blame(porcelain);
    /// assert_eq!(tally.into_sorted()[0].author, "Alice");
    /// ```
    pub fn record_blame(&mut self, porcelain: &str) {
        for line in porcelain.lines() {
            if let Some(name) = line.strip_prefix(AUTHOR_PREFIX) {
                self.record(name.trim());
            }
        }
    }

    /// Merge another tally into this one.
    ///
    /// This is the reduction step a parallel fan-out would use: counts add
    /// up per author regardless of merge order.
    pub fn absorb(&mut self, other: OwnershipTally) {
        for (author, lines) in other.counts {
            *self.counts.entry(author).or_default() += lines;
        }
    }

    /// Number of distinct authors tallied so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no line has been attributed yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Finalize the tally as a sequence sorted descending by line count.
    ///
    /// Order among equal counts is unspecified.
    pub fn into_sorted(self) -> Vec<AuthorLines> {
        let mut entries: Vec<AuthorLines> = self
            .counts
            .into_iter()
            .map(|(author, lines)| AuthorLines { author, lines })
            .collect();
        entries.sort_by(|a, b| b.lines.cmp(&a.lines));
        entries
    }
}

/// Progress report for one tracked file during ownership measurement.
#[derive(Debug)]
pub enum BlameProgress<'a> {
    /// Tracked-file enumeration finished; this many files will be blamed.
    Listed(usize),
    /// One file was blamed and its lines were tallied.
    Counted(&'a str),
    /// Blame failed for one file; it was skipped and the run continued.
    Skipped(&'a str, FameError),
}

/// List the tracked files of the repository at `repo`.
///
/// Runs `git ls-files` scoped via `-C`; output is split into one path per
/// line. An empty file set yields an empty list, not an error.
///
/// # Errors
///
/// Returns [`FameError::Git`] if the path is not a git repository.
pub fn list_tracked_files(repo: &Path) -> Result<Vec<String>, FameError> {
    let output = git::run(repo, &["ls-files"])?;
    Ok(output
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Measure line ownership across every tracked file of `repo`.
///
/// Each file is blamed with `git blame --line-porcelain <file>` and its
/// `author` records are accumulated into one global tally, finalized in
/// descending line-count order. Files whose blame fails (deleted from the
/// working tree, unreadable) are skipped and reported through `observer`;
/// a single bad file never aborts the run.
///
/// The `observer` callback receives a [`BlameProgress`] event per file so
/// callers can drive progress display without this crate touching a
/// terminal.
///
/// # Errors
///
/// Returns [`FameError::Git`] only if the tracked-file listing itself fails
/// (bad path, not a repository).
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use gitfame_stats::ownership::measure_ownership;
///
/// let tally = measure_ownership(Path::new("."), |_event| {}).unwrap();
/// for entry in &tally {
///     println!("{:>8}  {}", entry.lines, entry.author);
/// }
/// ```
pub fn measure_ownership<F>(repo: &Path, mut observer: F) -> Result<Vec<AuthorLines>, FameError>
where
    F: FnMut(BlameProgress<'_>),
{
    let files = list_tracked_files(repo)?;
    observer(BlameProgress::Listed(files.len()));

    let mut tally = OwnershipTally::new();
    for file in &files {
        match git::run(repo, &["blame", "--line-porcelain", file.as_str()]) {
            Ok(porcelain) => {
                tally.record_blame(&porcelain);
                observer(BlameProgress::Counted(file));
            }
            Err(err) => observer(BlameProgress::Skipped(file, err)),
        }
    }

    Ok(tally.into_sorted())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn porcelain_for(authors: &[&str]) -> String {
        // One porcelain record per line: header, author fields, content
        let mut out = String::new();
        for (i, author) in authors.iter().enumerate() {
            out.push_str(&format!("abcdef{i} {n} {n} 1\n", n = i + 1));
            out.push_str(&format!("author {author}\n"));
            out.push_str(&format!("author-mail <{author}@example.com>\n"));
            out.push_str("author-time 1700000000\n");
            out.push_str("summary add line\n");
            out.push_str("\tsome content\n");
        }
        out
    }

    #[test]
    fn each_author_record_counts_once() {
        let mut tally = OwnershipTally::new();
        tally.record_blame(&porcelain_for(&["Alice", "Alice", "Bob", "Alice"]));
        let sorted = tally.into_sorted();
        assert_eq!(
            sorted,
            vec![
                AuthorLines {
                    author: "Alice".into(),
                    lines: 3,
                },
                AuthorLines {
                    author: "Bob".into(),
                    lines: 1,
                },
            ]
        );
    }

    #[test]
    fn author_metadata_fields_do_not_match() {
        let porcelain = "author-mail <alice@example.com>\nauthor-time 1700000000\nauthor-tz +0000\n";
        let mut tally = OwnershipTally::new();
        tally.record_blame(porcelain);
        assert!(tally.is_empty());
    }

    #[test]
    fn accumulation_spans_files() {
        // Two files: together four Alice lines and two Bob lines
        let mut tally = OwnershipTally::new();
        tally.record_blame(&porcelain_for(&["Alice", "Bob", "Alice"]));
        tally.record_blame(&porcelain_for(&["Alice", "Bob", "Alice"]));
        let sorted = tally.into_sorted();
        assert_eq!(sorted[0], AuthorLines { author: "Alice".into(), lines: 4 });
        assert_eq!(sorted[1], AuthorLines { author: "Bob".into(), lines: 2 });
    }

    #[test]
    fn accumulation_is_order_independent() {
        let outputs = [
            porcelain_for(&["Alice", "Alice"]),
            porcelain_for(&["Bob"]),
            porcelain_for(&["Alice", "Bob", "Carol"]),
        ];

        let mut forward = OwnershipTally::new();
        for out in &outputs {
            forward.record_blame(out);
        }

        let mut reverse = OwnershipTally::new();
        for out in outputs.iter().rev() {
            reverse.record_blame(out);
        }

        let mut merged = OwnershipTally::new();
        for out in &outputs {
            let mut partial = OwnershipTally::new();
            partial.record_blame(out);
            merged.absorb(partial);
        }

        let forward = forward.into_sorted();
        assert_eq!(forward, reverse.into_sorted());
        assert_eq!(forward, merged.into_sorted());
    }

    #[test]
    fn absorb_adds_counts_per_author() {
        let mut left = OwnershipTally::new();
        left.record("alice");
        left.record("bob");

        let mut right = OwnershipTally::new();
        right.record("alice");

        left.absorb(right);
        let sorted = left.into_sorted();
        assert_eq!(sorted[0], AuthorLines { author: "alice".into(), lines: 2 });
        assert_eq!(sorted[1], AuthorLines { author: "bob".into(), lines: 1 });
    }

    #[test]
    fn finalized_tally_is_sorted_descending() {
        let mut tally = OwnershipTally::new();
        for (author, n) in [("ann", 2u64), ("zed", 9), ("kim", 5)] {
            for _ in 0..n {
                tally.record(author);
            }
        }
        let sorted = tally.into_sorted();
        for pair in sorted.windows(2) {
            assert!(pair[0].lines >= pair[1].lines);
        }
        assert_eq!(sorted[0].author, "zed");
    }

    #[test]
    fn empty_tally_finalizes_empty() {
        let tally = OwnershipTally::new();
        assert!(tally.is_empty());
        assert!(tally.into_sorted().is_empty());
    }

    #[test]
    fn author_name_is_trimmed_but_not_normalized() {
        let mut tally = OwnershipTally::new();
        tally.record_blame("author Alice Smith \nauthor alice smith\n");
        let sorted = tally.into_sorted();
        // Exact string identity: case variants stay distinct
        assert_eq!(sorted.len(), 2);
    }

    #[test]
    fn serializes_camel_case() {
        let entry = AuthorLines {
            author: "bob".into(),
            lines: 10,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["author"], "bob");
        assert_eq!(json["lines"], 10);
    }
}
