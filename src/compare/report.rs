//! Comparison verdicts and their printed form.

use std::fmt;
use std::path::PathBuf;

/// Outcome of comparing the sorted line dumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineComparison {
    /// Both sorted line sequences are identical.
    Match,
    /// The sequences differ.
    ///
    /// `matched / total` is a heuristic similarity score: lines are compared
    /// position by position after sorting, so it measures how much text the
    /// dumps share, not how much of the documents is equivalent.
    Mismatch {
        /// Position-wise equal lines after padding.
        matched: usize,
        /// Larger of the two raw file line counts.
        total: usize,
    },
}

impl LineComparison {
    /// Check if the sorted lines matched.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Files persisted for a comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Pretty-printed canonical documents, left then right.
    pub documents: [PathBuf; 2],
    /// Sorted-line dumps, left then right.
    pub line_dumps: [PathBuf; 2],
}

/// Everything the checker learned about a pair of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    /// Raw byte sizes, left then right.
    pub sizes: (u64, u64),
    /// Raw text line counts, left then right.
    pub line_counts: (usize, usize),
    /// Authoritative verdict: canonical serializations are identical.
    pub canonical_match: bool,
    /// Secondary signal from the sorted line dumps.
    pub lines: LineComparison,
    /// Persisted files, when requested.
    pub artifacts: Option<Artifacts>,
}

impl DiffReport {
    /// True when the raw byte sizes agree.
    pub fn sizes_match(&self) -> bool {
        self.sizes.0 == self.sizes.1
    }

    /// True when the raw line counts agree.
    pub fn line_counts_match(&self) -> bool {
        self.line_counts.0 == self.line_counts.1
    }

    /// The equivalence verdict.
    pub fn is_equivalent(&self) -> bool {
        self.canonical_match
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "JSON sizes match? {} {} {}",
            self.sizes_match(),
            self.sizes.0,
            self.sizes.1
        )?;
        writeln!(
            f,
            "JSON line count match? {} {} {}",
            self.line_counts_match(),
            self.line_counts.0,
            self.line_counts.1
        )?;
        writeln!(f, "JSON contents match? {}", self.canonical_match)?;
        if let Some(artifacts) = &self.artifacts {
            writeln!(f, "Writing output JSON files:")?;
            for path in &artifacts.documents {
                writeln!(f, "{}", path.display())?;
            }
            writeln!(f, "Writing output TXT files:")?;
            for path in &artifacts.line_dumps {
                writeln!(f, "{}", path.display())?;
            }
        }
        writeln!(f, "JSON ordered lines match? {}", self.lines.is_match())?;
        if let LineComparison::Mismatch { matched, total } = self.lines {
            writeln!(f, "Number of equal ordered lines: {} / {}", matched, total)?;
        }
        Ok(())
    }
}

/// Compare two sorted line sequences.
///
/// `line_counts` are the raw file line counts. The side with fewer raw lines
/// is padded with that many empty lines, the common prefix is compared
/// position by position, and the larger raw count is the denominator.
pub fn compare_lines(left: &[String], right: &[String], line_counts: (usize, usize)) -> LineComparison {
    if left == right {
        return LineComparison::Match;
    }
    fn padded(lines: &[String], i: usize) -> &str {
        lines.get(i).map(String::as_str).unwrap_or("")
    }

    let (l1, l2) = line_counts;
    let span = (left.len() + l2.saturating_sub(l1)).min(right.len() + l1.saturating_sub(l2));
    let matched = (0..span)
        .filter(|&i| padded(left, i) == padded(right, i))
        .count();
    LineComparison::Mismatch {
        matched,
        total: l1.max(l2),
    }
}
