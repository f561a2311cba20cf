use clap::Parser;
use course_planner::core::report::{self, render_listing};
use course_planner::utils::error::ErrorSeverity;
use course_planner::utils::{logger, validation::Validate};
use course_planner::{CliConfig, LocalStorage, OutputFormat, PlannerConfig, PlannerError, Shell};
use std::io::{self, Write};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting course-planner");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ course-planner failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig) -> Result<(), PlannerError> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    if cli.is_one_shot() {
        run_one_shot(cli, &config)
    } else {
        run_interactive(&config)
    }
}

fn run_interactive(config: &PlannerConfig) -> Result<(), PlannerError> {
    let loader = config.build_loader(LocalStorage::default());
    let mut shell = Shell::new(loader, config.build_catalog())
        .with_unresolved_marker(config.unresolved_marker().map(str::to_string));

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Some(path) = &config.loader.data_file {
        shell.load(path, &mut stdout, &mut stderr)?;
    }

    shell.run(io::stdin().lock(), stdout, stderr)
}

fn run_one_shot(cli: &CliConfig, config: &PlannerConfig) -> Result<(), PlannerError> {
    let path = config.data_file()?;
    let loader = config.build_loader(LocalStorage::default());
    let mut catalog = config.build_catalog();

    let load_report = loader.load_into(path, &mut catalog)?;
    for diagnostic in &load_report.diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }

    let mut out = io::stdout().lock();
    let format = config.report.format;

    if cli.list {
        let summaries = report::list_sorted(&catalog)?;
        match format {
            OutputFormat::Text => writeln!(out, "{}", render_listing(&summaries))?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &summaries)?;
                writeln!(out)?;
            }
        }
    }

    if let Some(id) = &cli.course {
        let description = report::describe_course(&catalog, id)?;
        match format {
            OutputFormat::Text => writeln!(
                out,
                "{}",
                description.render(config.unresolved_marker())
            )?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &description)?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
