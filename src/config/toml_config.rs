use crate::core::catalog::{CourseCatalog, DEFAULT_BUCKET_COUNT};
use crate::core::loader::CourseLoader;
use crate::domain::model::DEFAULT_MAX_PREREQUISITES;
use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_BUCKET_COUNT: usize = 65_521;
pub const MAX_PREREQUISITES_LIMIT: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub catalog: CatalogConfig,
    pub loader: LoaderConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub bucket_count: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub data_file: Option<String>,
    pub max_prerequisites: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            max_prerequisites: DEFAULT_MAX_PREREQUISITES,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: OutputFormat,
    pub mark_unresolved: bool,
    pub unresolved_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            mark_unresolved: false,
            unresolved_marker: " [not in catalog]".to_string(),
        }
    }
}

impl PlannerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_DATA})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "catalog.bucket_count",
            self.catalog.bucket_count,
            1,
            MAX_BUCKET_COUNT,
        )?;

        validation::validate_range(
            "loader.max_prerequisites",
            self.loader.max_prerequisites,
            0,
            MAX_PREREQUISITES_LIMIT,
        )?;

        if let Some(data_file) = &self.loader.data_file {
            validation::validate_path("loader.data_file", data_file)?;
        }

        if self.report.mark_unresolved {
            validation::validate_non_empty_string(
                "report.unresolved_marker",
                &self.report.unresolved_marker,
            )?;
        }

        Ok(())
    }

    pub fn data_file(&self) -> Result<&String> {
        validation::validate_required_field("loader.data_file", &self.loader.data_file)
    }

    pub fn unresolved_marker(&self) -> Option<&str> {
        self.report
            .mark_unresolved
            .then_some(self.report.unresolved_marker.as_str())
    }

    pub fn build_catalog(&self) -> CourseCatalog {
        CourseCatalog::with_bucket_count(self.catalog.bucket_count)
    }

    pub fn build_loader<S: Storage>(&self, storage: S) -> CourseLoader<S> {
        CourseLoader::new(storage).with_max_prerequisites(self.loader.max_prerequisites)
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
