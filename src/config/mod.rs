pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::{OutputFormat, PlannerConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "course-planner")]
#[command(about = "Load a course list and look up courses and their prerequisites")]
pub struct CliConfig {
    /// Course file to load before anything else
    #[arg(short = 'f', long)]
    pub data_file: Option<String>,

    /// Print the sorted course list and exit
    #[arg(long)]
    pub list: bool,

    /// Print one course with its prerequisites and exit
    #[arg(long, value_name = "ID")]
    pub course: Option<String>,

    /// Output format for --list and --course
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum prerequisites kept per course
    #[arg(long)]
    pub max_prerequisites: Option<usize>,

    /// Mark prerequisites that are not in the catalog
    #[arg(long)]
    pub mark_unresolved: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn is_one_shot(&self) -> bool {
        self.list || self.course.is_some()
    }

    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut PlannerConfig) {
        if let Some(data_file) = &self.data_file {
            config.loader.data_file = Some(data_file.clone());
        }
        if let Some(max) = self.max_prerequisites {
            config.loader.max_prerequisites = max;
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if self.mark_unresolved {
            config.report.mark_unresolved = true;
        }
    }

    pub fn resolve(&self) -> crate::utils::error::Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::from_file(path)?,
            None => PlannerConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }
}
