use anyhow::Result;
use course_planner::domain::model::LineIssue;
use course_planner::{
    describe_course, list_sorted, CourseCatalog, CourseLoader, LocalStorage, PlannerConfig,
    PlannerError,
};
use std::fs;
use tempfile::TempDir;

const ABCU_COURSES: &str = "\
MATH201,Discrete Mathematics
CSCI300,Introduction to Algorithms,CSCI200,MATH201
CSCI350,Operating Systems,CSCI300
CSCI101,Introduction to Programming in C++,CSCI100
CSCI100,Introduction to Computer Science
CSCI301,Advanced Programming in C++,CSCI101
CSCI400,Large Software Development,CSCI301,CSCI350
CSCI200,Data Structures,CSCI101
";

fn write_course_file(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    fs::write(dir.path().join(name), content)?;
    Ok(name.to_string())
}

fn storage_for(dir: &TempDir) -> LocalStorage {
    LocalStorage::new(dir.path().to_str().unwrap().to_string())
}

#[test]
fn test_end_to_end_load_and_list() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_course_file(&temp_dir, "abcu.csv", ABCU_COURSES)?;

    let loader = CourseLoader::new(storage_for(&temp_dir));
    let mut catalog = CourseCatalog::new();
    let report = loader.load_into(&file, &mut catalog)?;

    assert_eq!(report.course_count, 8);
    assert!(report.diagnostics.is_empty());

    let ids: Vec<&str> = list_sorted(&catalog)?.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        vec![
            "CSCI100", "CSCI101", "CSCI200", "CSCI300", "CSCI301", "CSCI350", "CSCI400",
            "MATH201"
        ]
    );

    let description = describe_course(&catalog, "CSCI400")?;
    assert_eq!(
        description.to_string(),
        "CSCI400: Large Software Development\n\
         Prerequisites: CSCI301 (Advanced Programming in C++), CSCI350 (Operating Systems)"
    );
    Ok(())
}

#[test]
fn test_reload_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_course_file(&temp_dir, "abcu.csv", ABCU_COURSES)?;
    let loader = CourseLoader::new(storage_for(&temp_dir));
    let mut catalog = CourseCatalog::new();

    loader.load_into(&file, &mut catalog)?;
    let first: Vec<(String, String)> = list_sorted(&catalog)?
        .iter()
        .map(|s| (s.id.to_string(), s.title.to_string()))
        .collect();

    catalog.clear();
    loader.load_into(&file, &mut catalog)?;
    loader.load_into(&file, &mut catalog)?;
    let second: Vec<(String, String)> = list_sorted(&catalog)?
        .iter()
        .map(|s| (s.id.to_string(), s.title.to_string()))
        .collect();

    assert_eq!(first, second);
    assert_eq!(catalog.len(), 8);
    Ok(())
}

#[test]
fn test_unresolved_prerequisite_is_rendered_bare() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_course_file(
        &temp_dir,
        "partial.csv",
        "CS200,Data Structures,CS100,CS050\nCS100,Intro to CS\nCS010,Orientation\n",
    )?;

    let loader = CourseLoader::new(storage_for(&temp_dir));
    let mut catalog = CourseCatalog::new();
    loader.load_into(&file, &mut catalog)?;

    let description = describe_course(&catalog, "CS200")?;
    assert_eq!(description.prerequisites_text(None), "CS100 (Intro to CS), CS050");
    assert_eq!(describe_course(&catalog, "CS010")?.prerequisites_text(None), "None");
    assert!(matches!(
        describe_course(&catalog, "CS999"),
        Err(PlannerError::CourseNotFoundError { .. })
    ));
    Ok(())
}

#[test]
fn test_diagnostics_do_not_abort_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_course_file(
        &temp_dir,
        "messy.csv",
        "CS100,Intro\nJUSTONEFIELD\n\n,No id,CS100\nCS900,Capstone,A,B,C\n",
    )?;

    let config = PlannerConfig::from_toml_str("[loader]\nmax_prerequisites = 2\n")?;
    let loader = config.build_loader(storage_for(&temp_dir));
    let mut catalog = config.build_catalog();
    let report = loader.load_into(&file, &mut catalog)?;

    assert_eq!(report.course_count, 2);
    assert_eq!(report.skipped_lines(), 2);
    let issues: Vec<&LineIssue> = report.diagnostics.iter().map(|d| &d.issue).collect();
    assert_eq!(
        issues,
        vec![
            &LineIssue::Malformed,
            &LineIssue::MissingIdentifier,
            &LineIssue::PrerequisitesTruncated {
                kept: 2,
                dropped: 1
            },
        ]
    );
    assert_eq!(catalog.find("CS900").unwrap().prerequisites, vec!["A", "B"]);
    Ok(())
}

#[test]
fn test_missing_file_keeps_catalog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_course_file(&temp_dir, "abcu.csv", ABCU_COURSES)?;
    let loader = CourseLoader::new(storage_for(&temp_dir));
    let mut catalog = CourseCatalog::new();
    loader.load_into(&file, &mut catalog)?;

    let result = loader.load_into("does-not-exist.csv", &mut catalog);

    assert!(matches!(result, Err(PlannerError::FileOpenError { .. })));
    assert_eq!(catalog.len(), 8);
    Ok(())
}

#[test]
fn test_queries_on_empty_catalog_report_no_data() {
    let catalog = CourseCatalog::new();
    assert!(matches!(list_sorted(&catalog), Err(PlannerError::NoDataError)));
    assert!(matches!(
        describe_course(&catalog, "CSCI100"),
        Err(PlannerError::NoDataError)
    ));
}

#[test]
fn test_json_output_marks_resolution() -> Result<()> {
    let catalog: CourseCatalog = [
        course_planner::Course::new("CS200", "Data Structures").with_prerequisites(["CS100", "CS050"]),
        course_planner::Course::new("CS100", "Intro to CS"),
    ]
    .into_iter()
    .collect();

    let description = describe_course(&catalog, "CS200")?;
    let json = serde_json::to_value(&description)?;

    assert_eq!(json["prerequisites"][0]["resolved"], true);
    assert_eq!(json["prerequisites"][0]["title"], "Intro to CS");
    assert_eq!(json["prerequisites"][1]["resolved"], false);
    assert!(json["prerequisites"][1]["title"].is_null());
    Ok(())
}

#[test]
fn test_latin1_file_loads_with_diagnostic() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("latin1.csv"),
        b"MUS101,Caf\xe9 Music\nMUS201,Harmony,MUS101\n",
    )?;

    let loader = CourseLoader::new(storage_for(&temp_dir));
    let mut catalog = CourseCatalog::new();
    let report = loader.load_into("latin1.csv", &mut catalog)?;

    assert_eq!(report.course_count, 2);
    assert_eq!(report.skipped_lines(), 0);
    assert_eq!(report.diagnostics[0].issue, LineIssue::InvalidEncoding);
    assert_eq!(
        describe_course(&catalog, "MUS201")?.prerequisites_text(None),
        "MUS101 (Caf\u{FFFD} Music)"
    );
    Ok(())
}

#[test]
fn test_stray_quote_does_not_swallow_later_courses() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = write_course_file(
        &temp_dir,
        "quotes.csv",
        "CS100,\"Intro to CS\nCS200,Data Structures,CS100\nCS300,Algorithms\n",
    )?;

    let loader = CourseLoader::new(storage_for(&temp_dir));
    let mut catalog = CourseCatalog::new();
    loader.load_into(&file, &mut catalog)?;

    let ids: Vec<&str> = list_sorted(&catalog)?.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["CS100", "CS200", "CS300"]);
    Ok(())
}
