use serde::{Deserialize, Serialize};

/// 預設的先修課程上限
pub const DEFAULT_MAX_PREREQUISITES: usize = 8;

/// A single catalog entry. `id` is the lookup key and is never empty once
/// stored; `prerequisites` keeps file order and may name courses that are
/// not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prerequisites: Vec::new(),
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }
}

/// Problems found on one line of a course file. None of them abort a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineIssue {
    /// Fewer than two fields, or an empty title; the line is skipped.
    Malformed,
    /// The identifier field is empty; the line is skipped.
    MissingIdentifier,
    /// Bytes that are not UTF-8 were replaced; the course is kept.
    InvalidEncoding,
    /// The course is kept with only the first `kept` prerequisites.
    PrerequisitesTruncated { kept: usize, dropped: usize },
}

impl LineIssue {
    pub fn skips_line(&self) -> bool {
        matches!(self, LineIssue::Malformed | LineIssue::MissingIdentifier)
    }
}

impl std::fmt::Display for LineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineIssue::Malformed => write!(f, "malformed (needs at least course and title). Skipped."),
            LineIssue::MissingIdentifier => write!(f, "has an empty course number. Skipped."),
            LineIssue::InvalidEncoding => {
                write!(f, "is not valid UTF-8; unreadable bytes were replaced.")
            }
            LineIssue::PrerequisitesTruncated { kept, dropped } => write!(
                f,
                "lists too many prerequisites; kept the first {}, dropped {}.",
                kept, dropped
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiagnostic {
    pub line: u64,
    #[serde(flatten)]
    pub issue: LineIssue,
}

impl std::fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {} {}", self.line, self.issue)
    }
}

/// Outcome of one load into a catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub path: String,
    /// Lines that produced a course, duplicates included.
    pub accepted_lines: usize,
    /// Distinct courses in the catalog after the load.
    pub course_count: usize,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl LoadReport {
    pub fn skipped_lines(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.issue.skips_line())
            .count()
    }
}
