use crate::utils::error::{PlannerError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PlannerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("loader.data_file", "courses.csv").is_ok());
        assert!(validate_path("loader.data_file", "").is_err());
        assert!(validate_path("loader.data_file", "bad\0name.csv").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("catalog.bucket_count", 211, 1, 65_521).is_ok());
        assert!(validate_range("catalog.bucket_count", 0, 1, 65_521).is_err());
        assert!(validate_range("loader.max_prerequisites", 65, 0, 64).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("courses.csv".to_string());
        let missing: Option<String> = None;
        assert_eq!(
            validate_required_field("loader.data_file", &present).unwrap(),
            "courses.csv"
        );
        assert!(matches!(
            validate_required_field("loader.data_file", &missing),
            Err(PlannerError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("report.unresolved_marker", " (?)").is_ok());
        assert!(validate_non_empty_string("report.unresolved_marker", "   ").is_err());
    }
}
