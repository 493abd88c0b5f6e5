//! Command line front end for compound interest projections
//!
//! `compound project` runs a single projection, `compound batch` projects every
//! scenario in a CSV file.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use compound_projection::{
    batch::{load_scenarios, run_scenarios, write_summary_csv},
    report::{annual_snapshots, render_annual_table, render_series_table, write_series_csv, Locale},
    ProjectionConfig, ProjectionEngine, ProjectionRequest, ProjectionSummary, Readiness, StartDatePolicy,
};
use log::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "compound")]
#[command(author, version, about = "Compound interest projection with monthly contributions", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Currency formatting locale (overrides the config file)
    #[arg(long, global = true, value_enum)]
    locale: Option<LocaleArg>,

    /// Currency symbol (overrides the config file)
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single plan
    Project(ProjectArgs),

    /// Project every scenario in a CSV file
    Batch {
        /// Scenario CSV (id, initial_balance, monthly_contribution, annual_rate_percent,
        /// duration_years, duration_months, start_date)
        #[arg(short, long)]
        scenarios: PathBuf,

        /// Summary CSV destination (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write amounts as currency strings instead of plain numbers
        #[arg(long)]
        formatted: bool,
    },
}

#[derive(Args)]
struct ProjectArgs {
    /// Starting balance
    #[arg(short, long)]
    initial: Option<f64>,

    /// Amount added at the end of every month
    #[arg(short = 'm', long, allow_negative_numbers = true)]
    contribution: Option<f64>,

    /// Annual interest rate in percent (10 = 10% a year)
    #[arg(short, long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Duration in years
    #[arg(short, long, conflicts_with = "months")]
    years: Option<u32>,

    /// Duration in months
    #[arg(long)]
    months: Option<u32>,

    /// First month of the projection (YYYY-MM-DD, day ignored)
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Start from the current month instead of next month when --start is omitted
    #[arg(long)]
    current_month: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Show one row per calendar year instead of every month
    #[arg(long)]
    annual: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    PtBr,
    EnUs,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::PtBr => Locale::PtBr,
            LocaleArg::EnUs => Locale::EnUs,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ProjectionConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ProjectionConfig::default(),
    };
    if let Some(locale) = cli.locale {
        config.locale = locale.into();
    }
    if let Some(symbol) = cli.currency {
        config.currency_symbol = symbol;
    }
    config.validate()?;

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Project(args) => run_project(args, config, today),
        Commands::Batch {
            scenarios,
            output,
            formatted,
        } => run_batch(&scenarios, output.as_deref(), formatted, &config, today),
    }
}

fn run_project(args: ProjectArgs, mut config: ProjectionConfig, today: NaiveDate) -> Result<()> {
    if args.current_month {
        config.start_date_policy = StartDatePolicy::CurrentMonth;
    }

    let request = ProjectionRequest {
        initial_balance: args.initial,
        monthly_contribution: args.contribution,
        annual_rate_percent: args.rate,
        duration_years: args.years,
        duration_months: args.months,
        start_date: args.start,
    };

    let input = match request.prepare(&config, today)? {
        Readiness::Ready(input) => input,
        Readiness::Pending { missing } => {
            bail!("Missing values: {}", missing.join(", "))
        }
    };

    let series = ProjectionEngine::new().project(&input)?;
    let summary = ProjectionSummary::new(&input, &series);
    let money = config.money_format();
    let stdout = io::stdout();

    match args.format {
        OutputFormat::Table => {
            let composition = summary.composition();
            let locale = money.locale();
            let mut out = stdout.lock();
            writeln!(out, "{}\n", summary.narrative(&money))?;
            let (invested_label, interest_label) = match locale {
                Locale::PtBr => ("Investido", "juros"),
                Locale::EnUs => ("Invested", "interest"),
            };
            writeln!(
                out,
                "{} {} ({}), {} {} ({})\n",
                invested_label,
                money.format(composition.invested),
                locale.format_percent(composition.invested_share),
                interest_label,
                money.format(composition.interest),
                locale.format_percent(composition.interest_share),
            )?;
            let table = if args.annual {
                render_annual_table(&annual_snapshots(&series), &money)
            } else {
                render_series_table(&series, &money)
            };
            write!(out, "{}", table)?;
        }
        OutputFormat::Csv => {
            if args.annual {
                let mut wtr = csv::Writer::from_writer(stdout.lock());
                for snapshot in annual_snapshots(&series) {
                    wtr.serialize(snapshot)?;
                }
                wtr.flush()?;
            } else {
                write_series_csv(&series, stdout.lock(), None)?;
            }
        }
        OutputFormat::Json => {
            let monthly = (!args.annual).then_some(&series);
            let body = serde_json::json!({
                "summary": summary,
                "composition": summary.composition(),
                "annual": annual_snapshots(&series),
                "series": monthly,
            });
            serde_json::to_writer_pretty(stdout.lock(), &body)?;
            println!();
        }
    }

    Ok(())
}

fn run_batch(
    path: &Path,
    output: Option<&Path>,
    formatted: bool,
    config: &ProjectionConfig,
    today: NaiveDate,
) -> Result<()> {
    let start = Instant::now();
    let scenarios = load_scenarios(path)
        .with_context(|| format!("Failed to load scenarios from {}", path.display()))?;

    let outcomes = run_scenarios(&scenarios, config, today);
    info!("Projections complete in {:?}", start.elapsed());

    let money = config.money_format();
    let money = formatted.then_some(&money);
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_summary_csv(&outcomes, file, money)?;
            println!("Summary written to {}", path.display());
        }
        None => write_summary_csv(&outcomes, io::stdout().lock(), money)?,
    }

    Ok(())
}
