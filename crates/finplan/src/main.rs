use std::path::PathBuf;

use clap::Parser;
use finplan::output::{render, OutputFormat};
use finplan::{init_logging, PlanFile};
use finplan_core::simulation::run_simulation;

/// Run a financial-life simulation plan and print the resulting series.
#[derive(Parser, Debug)]
#[command(name = "finplan")]
#[command(about = "A financial-life simulation engine")]
struct Args {
    /// Path to the plan file (.yaml or .json). Omit with `--demo` to run
    /// the built-in sample plan instead.
    plan: Option<PathBuf>,

    /// Run the built-in demo plan instead of loading a file.
    #[arg(long)]
    demo: bool,

    /// First day of the simulation window (day 0 = plan's epoch)
    #[arg(long, default_value_t = 0.0)]
    start_day: f64,

    /// Last day of the simulation window (defaults to two years with
    /// `--demo`; required otherwise)
    #[arg(long)]
    end_day: Option<f64>,

    /// Spacing between grid points, in days
    #[arg(long, default_value_t = 30.4375)]
    interval: f64,

    /// "Today", for inflation post-processing and grid alignment
    #[arg(long)]
    current_day: Option<f64>,

    /// Where to write log files (default: ~/.finplan/)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".finplan")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    init_logging(&data_dir, &args.log_level)?;

    let (plan, schema, default_end_day) = if args.demo {
        let (plan, schema) = finplan::demo::build_demo_plan();
        (plan, schema, 730.0)
    } else {
        let path = args
            .plan
            .ok_or_else(|| color_eyre::eyre::eyre!("PLAN is required unless --demo is given"))?;
        let file = PlanFile::load(&path)?;
        (file.plan, file.schema, 0.0)
    };
    let end_day = args.end_day.unwrap_or(default_end_day);
    if args.end_day.is_none() && !args.demo {
        return Err(color_eyre::eyre::eyre!("--end-day is required unless --demo is given"));
    }

    let outcome = run_simulation(&plan, &schema, args.start_day, end_day, args.interval, args.current_day);

    for warning in &outcome.warnings {
        tracing::warn!(%warning, "simulation warning");
    }

    if let Some(error) = outcome.error {
        tracing::error!(%error, "simulation aborted");
        return Err(color_eyre::eyre::eyre!("simulation aborted: {error}"));
    }

    render(&outcome.result, args.format);

    Ok(())
}
