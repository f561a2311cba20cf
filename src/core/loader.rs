use crate::core::catalog::CourseCatalog;
use crate::domain::model::{
    Course, LineDiagnostic, LineIssue, LoadReport, DEFAULT_MAX_PREREQUISITES,
};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Courses parsed from one file, in file order, plus per-line problems.
#[derive(Debug, Clone, Default)]
pub struct ParsedCourses {
    pub courses: Vec<Course>,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Parses course lines: `id, title[, prereq...]`.
///
/// Every line is split on its own, so a stray quote can only affect the
/// line it sits on. Bytes that are not UTF-8 are replaced and reported.
/// Every field is trimmed. Blank lines are ignored, and empty prerequisite
/// fields are skipped. At most `max_prerequisites` prerequisites are kept
/// per course; anything past that is reported, not silently lost.
pub fn parse_courses(content: impl AsRef<[u8]>, max_prerequisites: usize) -> Result<ParsedCourses> {
    let mut parsed = ParsedCourses::default();

    for (index, raw) in content.as_ref().split(|&b| b == b'\n').enumerate() {
        let line = index as u64 + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let text = String::from_utf8_lossy(raw);

        // 只有空白的行直接略過
        if text.trim().is_empty() {
            continue;
        }

        let record = split_fields(&text)?;
        let mut report = |issue: LineIssue| {
            tracing::debug!("Line {}: {:?}", line, issue);
            parsed.diagnostics.push(LineDiagnostic { line, issue });
        };

        if record.len() < 2 {
            report(LineIssue::Malformed);
            continue;
        }

        let id = &record[0];
        if id.is_empty() {
            report(LineIssue::MissingIdentifier);
            continue;
        }

        // `CS200,` 視為缺少課程名稱
        if record[1].is_empty() {
            report(LineIssue::Malformed);
            continue;
        }

        if matches!(text, std::borrow::Cow::Owned(_)) {
            report(LineIssue::InvalidEncoding);
        }

        let listed: Vec<&str> = record.iter().skip(2).filter(|f| !f.is_empty()).collect();
        if listed.len() > max_prerequisites {
            report(LineIssue::PrerequisitesTruncated {
                kept: max_prerequisites,
                dropped: listed.len() - max_prerequisites,
            });
        }

        let course = Course::new(id, &record[1])
            .with_prerequisites(listed.into_iter().take(max_prerequisites));
        tracing::debug!(
            "Line {}: {} with {} prerequisite(s)",
            line,
            course.id,
            course.prerequisites.len()
        );
        parsed.courses.push(course);
    }

    Ok(parsed)
}

/// Splits one line into trimmed fields. Double-quoted fields may contain
/// commas; an unclosed quote runs to the end of this line only.
fn split_fields(line: &str) -> Result<csv::StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

pub struct CourseLoader<S: Storage> {
    storage: S,
    max_prerequisites: usize,
}

impl<S: Storage> CourseLoader<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            max_prerequisites: DEFAULT_MAX_PREREQUISITES,
        }
    }

    pub fn with_max_prerequisites(mut self, max_prerequisites: usize) -> Self {
        self.max_prerequisites = max_prerequisites;
        self
    }

    pub fn max_prerequisites(&self) -> usize {
        self.max_prerequisites
    }

    /// Replaces the contents of `catalog` with the courses in `path`.
    ///
    /// The file is read and parsed before anything is cleared, so a file
    /// that cannot be opened leaves the catalog as it was.
    pub fn load_into(&self, path: &str, catalog: &mut CourseCatalog) -> Result<LoadReport> {
        tracing::debug!("Reading course data from: {}", path);
        let content = self.storage.read_file(path)?;
        let parsed = parse_courses(&content, self.max_prerequisites)?;

        let accepted_lines = parsed.courses.len();
        catalog.clear();
        catalog.extend(parsed.courses);

        let report = LoadReport {
            path: path.to_string(),
            accepted_lines,
            course_count: catalog.len(),
            diagnostics: parsed.diagnostics,
        };

        if !report.diagnostics.is_empty() {
            tracing::debug!(
                "{} line(s) in {} had problems ({} skipped)",
                report.diagnostics.len(),
                path,
                report.skipped_lines()
            );
        }
        tracing::info!("Loaded {} course(s) from {}", report.course_count, path);

        Ok(report)
    }
}
