pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::{OutputFormat, PlannerConfig};
pub use core::{
    catalog::CourseCatalog,
    loader::CourseLoader,
    report::{describe_course, list_sorted},
    shell::Shell,
};
pub use domain::model::Course;
pub use utils::error::{PlannerError, Result};
