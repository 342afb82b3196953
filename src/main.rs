use analytics::registry::{self, Unit};
use analytics::{AnalyticsEngine, MetricParams, PerformanceReport};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use configuration::{Config, OutputFormat};
use core_types::{MetricId, RollingResult, Series};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The main entry point for the Curvestats command-line front end.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = configuration::init_logging(&config.logging)?;
    let format = cli.format.unwrap_or(config.output.format);

    // Execute the appropriate command
    match cli.command {
        Commands::Metrics => print_registry(format),
        Commands::Scalar(args) => handle_scalar(args, &config, format),
        Commands::Rolling(args) => handle_rolling(args, &config, format),
        Commands::Summary(args) => handle_summary(args, &config, format),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Risk/return statistics for backtested equity curves.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding `output.format` from the config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every supported metric identifier.
    Metrics,
    /// Compute one metric over the whole curve.
    Scalar(ScalarArgs),
    /// Compute one metric (or `all`) over sliding windows.
    Rolling(RollingArgs),
    /// Headline figures for the whole curve.
    Summary(SeriesArgs),
}

#[derive(Args)]
struct SeriesArgs {
    /// JSON file holding `{ "name", "values": [...], "dates": ["YYYY-MM-DD", ...] }`.
    #[arg(long)]
    input: PathBuf,

    /// Second curve for correlation, beta and CARP.
    #[arg(long)]
    comparison: Option<PathBuf>,

    /// Annual risk-free rate as a fraction (e.g. 0.04).
    #[arg(long)]
    risk_free_rate: Option<f64>,

    /// Daily return threshold for upside/downside deviation.
    #[arg(long)]
    target_return: Option<f64>,
}

#[derive(Args)]
struct ScalarArgs {
    /// Metric identifier, e.g. `sharpe_ratio`.
    #[arg(long)]
    metric: String,

    #[command(flatten)]
    series: SeriesArgs,
}

#[derive(Args)]
struct RollingArgs {
    /// Metric identifier, or `all` for every metric defined at the window size.
    #[arg(long)]
    metric: String,

    /// Window length in trading days. Defaults to `analysis.window_size`.
    #[arg(long)]
    window: Option<usize>,

    /// Use the whole curve as a single window.
    #[arg(long, conflicts_with = "window")]
    full: bool,

    #[command(flatten)]
    series: SeriesArgs,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Series loaded from disk, kept alive for the borrow in `MetricParams`.
struct Inputs {
    primary: Series,
    comparison: Option<Series>,
}

impl Inputs {
    fn load(args: &SeriesArgs) -> Result<Self> {
        let primary = load_series(&args.input)?;
        let comparison = args.comparison.as_deref().map(load_series).transpose()?;
        Ok(Self { primary, comparison })
    }

    fn params<'a>(&'a self, args: &SeriesArgs, config: &Config) -> MetricParams<'a> {
        let mut params = MetricParams::new()
            .with_risk_free_rate(args.risk_free_rate.unwrap_or(config.analysis.risk_free_rate))
            .with_target_return(args.target_return.unwrap_or(config.analysis.target_return));
        if let Some(comparison) = &self.comparison {
            params = params.with_comparison(comparison);
        }
        params
    }
}

fn load_series(path: &Path) -> Result<Series> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read series from {}", path.display()))?;
    let series: Series = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse series in {}", path.display()))?;
    tracing::info!(path = %path.display(), points = series.len(), "Loaded series.");

    if !series.name().is_empty() {
        return Ok(series);
    }
    // Unnamed series are labelled after their file.
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Series::new(stem, series.values().to_vec(), series.dates().to_vec())?)
}

fn engine(config: &Config) -> AnalyticsEngine {
    AnalyticsEngine::new(config.analysis.parallel_threshold)
}

fn handle_scalar(args: ScalarArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let inputs = Inputs::load(&args.series)?;
    let params = inputs.params(&args.series, config);
    let value = engine(config).compute_scalar(&args.metric, &inputs.primary, &params)?;
    let entry = registry::lookup(&args.metric)?;

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "series": inputs.primary.name(),
                "metric": entry.id,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("{}: {}", entry.id.label(), fmt_value(value, entry.unit));
        }
    }
    Ok(())
}

fn handle_rolling(args: RollingArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let inputs = Inputs::load(&args.series)?;
    let params = inputs.params(&args.series, config);
    let engine = engine(config);
    let window = if args.full {
        None
    } else {
        Some(args.window.unwrap_or(config.analysis.window_size))
    };

    if args.metric.eq_ignore_ascii_case("all") {
        let window = window.unwrap_or(inputs.primary.len());
        let results = engine.compute_all(&inputs.primary, window, &params)?;
        return match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
                Ok(())
            }
            OutputFormat::Table => {
                println!("{}", rolling_table(&results));
                Ok(())
            }
        };
    }

    let result = engine.compute(&args.metric, &inputs.primary, window, &params)?;
    let entry = registry::lookup(&args.metric)?;
    tracing::info!(
        metric = %entry.id,
        windows = result.len(),
        undefined = result.nan_count(),
        "Rolling computation finished."
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => {
            let results = BTreeMap::from([(entry.id, result)]);
            println!("{}", rolling_table(&results));
        }
    }
    Ok(())
}

fn handle_summary(args: SeriesArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let inputs = Inputs::load(&args)?;
    let params = inputs.params(&args, config);
    let report = engine(config).summarize(&inputs.primary, &params)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => println!("{}", summary_table(&report)),
    }
    Ok(())
}

fn print_registry(format: OutputFormat) -> Result<()> {
    let entries = registry::entries();
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = entries
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "id": e.id,
                        "label": e.id.label(),
                        "kind": e.kind(),
                        "min_window": e.min_window,
                        "unit": e.unit,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Identifier", "Label", "Kind", "Min Window", "Unit"]);
            for e in entries {
                table.add_row(vec![
                    Cell::new(e.id),
                    Cell::new(e.id.label()),
                    Cell::new(format!("{:?}", e.kind())),
                    Cell::new(e.min_window),
                    Cell::new(format!("{:?}", e.unit)),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn fmt_value(value: f64, unit: Unit) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    match unit {
        Unit::Percent => format!("{value:.2}%"),
        Unit::Ratio => format!("{value:.2}"),
        Unit::Count => format!("{value:.0}"),
    }
}

/// One row per window end date, one column per metric.
fn rolling_table(results: &BTreeMap<MetricId, RollingResult>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Date".to_string()];
    header.extend(results.keys().map(|id| id.label().to_string()));
    table.set_header(header);

    // Dual-series metrics may cover fewer dates than single-series ones.
    let mut rows: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for (column, (id, result)) in results.iter().enumerate() {
        let unit = registry::entry(*id).unit;
        for point in &result.points {
            let row = rows
                .entry(point.date)
                .or_insert_with(|| vec![String::new(); results.len()]);
            row[column] = fmt_value(point.value, unit);
        }
    }
    for (date, cells) in rows {
        let mut row = vec![date.to_string()];
        row.extend(cells);
        table.add_row(row);
    }
    table
}

fn summary_table(report: &PerformanceReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        format!("{} ({} to {}, {} days)", report.name, report.start, report.end, report.trading_days),
        "Value".to_string(),
    ]);
    for (id, value) in &report.metrics {
        let rendered = match value {
            Some(v) => fmt_value(*v, registry::entry(*id).unit),
            None => "undefined".to_string(),
        };
        table.add_row(vec![id.label().to_string(), rendered]);
    }
    table
}

