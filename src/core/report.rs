use crate::core::catalog::CourseCatalog;
use crate::utils::error::{PlannerError, Result};
use serde::Serialize;
use std::fmt;

pub const LISTING_HEADER: &str = "Course List (alphanumeric):";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

/// One prerequisite of a described course. `title` is `None` when the id
/// does not name a course in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrerequisiteRef<'a> {
    pub id: &'a str,
    pub title: Option<&'a str>,
    pub resolved: bool,
}

impl fmt::Display for PrerequisiteRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title {
            Some(title) => write!(f, "{} ({})", self.id, title),
            None => write!(f, "{}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDescription<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub prerequisites: Vec<PrerequisiteRef<'a>>,
}

impl CourseDescription<'_> {
    /// Renders the prerequisite list, or `None` when there are none.
    /// Unresolved ids are printed bare unless a marker is given.
    pub fn prerequisites_text(&self, unresolved_marker: Option<&str>) -> String {
        if self.prerequisites.is_empty() {
            return "None".to_string();
        }

        self.prerequisites
            .iter()
            .map(|prereq| match (prereq.resolved, unresolved_marker) {
                (false, Some(marker)) => format!("{}{}", prereq, marker),
                _ => prereq.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn render(&self, unresolved_marker: Option<&str>) -> String {
        format!(
            "{}: {}\nPrerequisites: {}",
            self.id,
            self.title,
            self.prerequisites_text(unresolved_marker)
        )
    }
}

impl fmt::Display for CourseDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

/// All courses ordered by id (byte-wise, ascending).
pub fn list_sorted(catalog: &CourseCatalog) -> Result<Vec<CourseSummary<'_>>> {
    if catalog.is_empty() {
        return Err(PlannerError::NoDataError);
    }

    let mut summaries = Vec::with_capacity(catalog.len());
    catalog.for_each(|course| {
        summaries.push(CourseSummary {
            id: &course.id,
            title: &course.title,
        })
    });

    summaries.sort_by(|a, b| a.id.cmp(b.id));
    tracing::debug!("Sorted {} courses for listing", summaries.len());

    Ok(summaries)
}

pub fn describe_course<'a>(catalog: &'a CourseCatalog, id: &str) -> Result<CourseDescription<'a>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(PlannerError::EmptyIdentifierError);
    }
    if catalog.is_empty() {
        return Err(PlannerError::NoDataError);
    }

    let course = catalog
        .find(id)
        .ok_or_else(|| PlannerError::CourseNotFoundError { id: id.to_string() })?;

    let prerequisites = course
        .prerequisites
        .iter()
        .map(|prereq_id| {
            let title = catalog.find(prereq_id).map(|p| p.title.as_str());
            PrerequisiteRef {
                id: prereq_id,
                title,
                resolved: title.is_some(),
            }
        })
        .collect();

    Ok(CourseDescription {
        id: &course.id,
        title: &course.title,
        prerequisites,
    })
}

pub fn render_listing(summaries: &[CourseSummary<'_>]) -> String {
    let mut lines = Vec::with_capacity(summaries.len() + 1);
    lines.push(LISTING_HEADER.to_string());
    lines.extend(summaries.iter().map(|s| format!("{} - {}", s.id, s.title)));
    lines.join("\n")
}
