use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};
use construction_schedule::persistence::{
    load_activities_from_csv, load_metadata_from_json, load_project_from_json,
    save_cash_flow_to_csv, save_project_to_json, save_report_to_json, save_schedule_table_to_csv,
};
use construction_schedule::templates::{building_activities, default_estimates};
use construction_schedule::{ProjectFile, ProjectMetadata, SchedulePlanner};
use polars::prelude::{AnyValue, DataFrame};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "CPM schedule and monthly cash-flow planner for construction projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a project file and print the CPM table and cash flow
    Schedule {
        /// Project JSON, or an activity CSV
        input: PathBuf,

        /// Project start date (YYYY-MM-DD), overrides the file
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Project name, overrides the file
        #[arg(long)]
        name: Option<String>,

        /// Metadata JSON replacing the project file's metadata
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the full report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write the schedule table as CSV
        #[arg(long)]
        table_csv: Option<PathBuf>,

        /// Write the monthly cash flow as CSV
        #[arg(long)]
        cash_flow_csv: Option<PathBuf>,
    },

    /// Check an activity set without scheduling it
    Validate {
        input: PathBuf,
    },

    /// Write the standard six-phase building project
    Template {
        /// Total budget split across the phases
        #[arg(long, default_value_t = 1_000_000.0)]
        budget: f64,

        /// Output path; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schedule {
            input,
            start,
            name,
            config,
            report,
            table_csv,
            cash_flow_csv,
        } => run_schedule(
            &input,
            start,
            name,
            config.as_deref(),
            Outputs {
                report,
                table_csv,
                cash_flow_csv,
            },
        ),
        Commands::Validate { input } => run_validate(&input),
        Commands::Template { budget, out } => run_template(budget, out.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

struct Outputs {
    report: Option<PathBuf>,
    table_csv: Option<PathBuf>,
    cash_flow_csv: Option<PathBuf>,
}

fn load_input(path: &Path) -> Result<ProjectFile> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let project = if is_csv {
        ProjectFile {
            metadata: ProjectMetadata::default(),
            activities: load_activities_from_csv(path)?,
        }
    } else {
        load_project_from_json(path)?
    };
    Ok(project)
}

fn run_schedule(
    input: &Path,
    start: Option<NaiveDate>,
    name: Option<String>,
    config: Option<&Path>,
    outputs: Outputs,
) -> Result<()> {
    let project =
        load_input(input).with_context(|| format!("failed to load {}", input.display()))?;
    let mut metadata = match config {
        Some(path) => load_metadata_from_json(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => project.metadata,
    };
    if let Some(start) = start {
        metadata.project_start_date = start;
    }
    if let Some(name) = name {
        metadata.project_name = name;
    }

    let plan = SchedulePlanner::new(metadata).plan(&project.activities)?;
    let report = &plan.report;

    println!("{}", report.summary_line());
    println!("{}", render_df_as_text_table(&report.schedule_frame()?));
    println!("Critical Path: {}", report.critical_path_label());
    println!("Total Project Duration: {} days", report.project_duration_days);
    println!("Total Budget: {:.2} {}", report.total_budget, report.currency);
    println!();
    println!("{}", render_df_as_text_table(&report.cash_flow_frame()?));
    println!("{}", plan.schedule.summary().to_cli_summary());

    if let Some(path) = outputs.report {
        save_report_to_json(report, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(path) = outputs.table_csv {
        save_schedule_table_to_csv(report, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(path) = outputs.cash_flow_csv {
        save_cash_flow_to_csv(report, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn run_validate(input: &Path) -> Result<()> {
    let project =
        load_input(input).with_context(|| format!("failed to load {}", input.display()))?;
    SchedulePlanner::new(project.metadata).validate(&project.activities)?;
    println!("OK: {} activities", project.activities.len());
    Ok(())
}

fn run_template(budget: f64, out: Option<&Path>) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        anyhow::bail!("budget must be a non-negative number (got {budget})");
    }
    let project = ProjectFile {
        metadata: ProjectMetadata {
            project_name: "Building".to_string(),
            ..ProjectMetadata::default()
        },
        activities: building_activities(&default_estimates(budget)),
    };
    match out {
        Some(path) => {
            save_project_to_json(&project, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Template written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&project)?),
    }
    Ok(())
}

fn format_cell(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float64(v) => format!("{v:.2}"),
        AnyValue::Boolean(v) => (if *v { "yes" } else { "" }).to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| {
                if *days >= 0 {
                    epoch.checked_add_days(Days::new(*days as u64))
                } else {
                    epoch.checked_sub_days(Days::new(days.unsigned_abs() as u64))
                }
            })
            .map(|d| d.to_string())
            .unwrap_or_else(|| av.to_string()),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| {
            columns
                .iter()
                .map(|col| col.get(row_idx).map(|av| format_cell(&av)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, values: &[String]| {
        out.push('|');
        for (ci, s) in values.iter().enumerate() {
            out.push(' ');
            out.push_str(s);
            out.push_str(&" ".repeat(widths[ci].saturating_sub(s.chars().count())));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
