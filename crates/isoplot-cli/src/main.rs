//! isoplot - contour input validation and plot recording from the command line

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use isoplot_builtins::datetime_from_days;
use isoplot_builtins::shape_rules::parse_shape;
use isoplot_plot::{AxisScale, Figure, PlotElement};
use isoplot_runtime::{
    colorbar, contour, contour_z, contourf, contourf_z, parse_colors, parse_extend,
    validate_shapes, ContourLevelSpec, ContourOptions, CoordinateKind, PlotResult,
};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

mod config;
mod data;

use config::{ConfigLoader, ExtendMode, IsoplotConfig, LogLevel};
use data::{PlotData, PlotInputs};

#[derive(Parser)]
#[command(
    name = "isoplot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Validate contour inputs and record contour plots",
    after_help = r#"
Environment Variables:
  ISOPLOT_DEBUG=1            Enable debug logging
  ISOPLOT_LOG_LEVEL=debug    Set log level (error, warn, info, debug, trace)
  ISOPLOT_CONFIG=<path>      Path to configuration file
  ISOPLOT_LEVELS=<n>         Default number of contour levels
  ISOPLOT_EXTEND=<mode>      Default extend (neither, min, max, both)
  ISOPLOT_COLORBAR=0         Do not attach colorbars
"#
)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(
        short,
        long,
        env = "ISOPLOT_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    debug: bool,

    /// Set log level
    #[arg(long, value_enum, env = "ISOPLOT_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Configuration file path
    #[arg(long, env = "ISOPLOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Check x/y/z shapes, e.g. `--x 10 --y 9 --z 9x10`
    Check {
        /// Shape of x (`N`, `RxC`, ...)
        #[arg(long)]
        x: String,
        /// Shape of y
        #[arg(long)]
        y: String,
        /// Shape of z
        #[arg(long)]
        z: String,
    },
    /// Load a JSON/YAML data file, validate it and record the contour plot
    Plot {
        /// Data file
        file: PathBuf,
        /// Record filled contours
        #[arg(long)]
        filled: bool,
        /// Explicit levels (comma separated); a single value is a level count
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        levels: Option<Vec<f64>>,
        /// Extend mode
        #[arg(long, value_enum)]
        extend: Option<ExtendMode>,
        /// Do not attach a colorbar
        #[arg(long)]
        no_colorbar: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        config_command: ConfigCommand,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Generate sample configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = ".isoplot.yaml")]
        output: PathBuf,
    },
    /// Validate configuration file
    Validate {
        /// Config file to validate
        config_file: PathBuf,
    },
    /// Show configuration file locations
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_configuration(&cli)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.debug {
        config.logging.debug = true;
    }

    let log_level = if config.logging.debug {
        log::LevelFilter::Debug
    } else {
        config.logging.level.into()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .filter_level(log_level)
        .format(format_log_record)
        .init();

    info!("isoplot v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Configuration loaded: {config:?}");

    match cli.command {
        Commands::Check { x, y, z } => execute_check(&x, &y, &z),
        Commands::Plot {
            file,
            filled,
            levels,
            extend,
            no_colorbar,
        } => {
            if no_colorbar {
                config.plotting.colorbar = false;
            }
            execute_plot(&config, &file, filled, levels, extend)
        }
        Commands::Config { config_command } => execute_config_command(config_command, &config),
    }
}

fn load_configuration(cli: &Cli) -> Result<IsoplotConfig> {
    match &cli.config {
        Some(path) if path.is_file() => ConfigLoader::load_with_file(path),
        Some(path) if !path.exists() => {
            anyhow::bail!("Specified config file does not exist: {}", path.display())
        }
        _ => ConfigLoader::load(),
    }
}

fn execute_check(x: &str, y: &str, z: &str) -> Result<()> {
    let shape_of = |name: &str, text: &str| {
        parse_shape(text)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid shape for {name}"))
    };
    let x = shape_of("x", x)?;
    let y = shape_of("y", y)?;
    let z = shape_of("z", z)?;

    match validate_shapes(&x, &y, &z) {
        Ok(shape) => {
            let kind = match shape.coordinates {
                CoordinateKind::Vector => "vector",
                CoordinateKind::Grid => "grid",
            };
            println!(
                "ok: z is {}x{} with {kind} coordinates",
                shape.rows, shape.cols
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn execute_plot(
    config: &IsoplotConfig,
    file: &Path,
    filled: bool,
    levels: Option<Vec<f64>>,
    extend: Option<ExtendMode>,
) -> Result<()> {
    let data = PlotData::load(file)?;
    let inputs = data.to_inputs()?;
    let builtin = if filled { "contourf" } else { "contour" };

    let mut figure = Figure::new();
    let request = PlotRequest {
        builtin,
        filled,
        levels: levels.as_deref().or(data.levels.as_deref()),
        extend,
    };
    match record_plot(&mut figure, config, &data, &inputs, &request) {
        Ok(index) => {
            print_summary(&mut figure, index);
            Ok(())
        }
        Err(err) => {
            debug!("{builtin} rejected {}", file.display());
            eprintln!("{}", err.format_diagnostic());
            std::process::exit(1);
        }
    }
}

struct PlotRequest<'a> {
    builtin: &'static str,
    filled: bool,
    levels: Option<&'a [f64]>,
    extend: Option<ExtendMode>,
}

/// Options come from the command line, then the data file, then the config.
fn record_plot(
    figure: &mut Figure,
    config: &IsoplotConfig,
    data: &PlotData,
    inputs: &PlotInputs,
    request: &PlotRequest<'_>,
) -> PlotResult<usize> {
    let builtin = request.builtin;
    let level_spec = match request.levels {
        Some(values) => ContourLevelSpec::from_values(builtin, values)?,
        None => ContourLevelSpec::from_count(builtin, config.plotting.default_levels as f64)?,
    };
    let extend = match (request.extend, data.extend.as_deref()) {
        (Some(mode), _) => mode.into(),
        (None, Some(text)) => parse_extend(builtin, text)?,
        (None, None) => config.plotting.extend.into(),
    };
    let mut options = ContourOptions::default()
        .with_levels(level_spec)
        .with_extend(extend);
    if let Some(colors) = &data.colors {
        options = options.with_colors(parse_colors(builtin, colors.as_slice())?);
    }
    if inputs.x_is_datetime {
        options = options.with_x_scale(AxisScale::Date);
    }
    if let Some(label) = &data.label {
        options = options.with_label(label.clone());
    }

    let index = match (&inputs.axes, request.filled) {
        (Some((x, y)), false) => contour(figure, 0, x, y, &inputs.z, &options)?,
        (Some((x, y)), true) => contourf(figure, 0, x, y, &inputs.z, &options)?,
        (None, false) => contour_z(figure, 0, &inputs.z, &options)?,
        (None, true) => contourf_z(figure, 0, &inputs.z, &options)?,
    };
    if config.plotting.colorbar {
        colorbar(figure, 0)?;
    }
    Ok(index)
}

fn print_summary(figure: &mut Figure, index: usize) {
    let Some(plot) = figure.get_plot(index) else {
        return;
    };
    let (kind, rows, cols, extend) = match plot {
        PlotElement::Contour(p) => ("contour", p.grid.rows, p.grid.cols, p.extend),
        PlotElement::ContourFill(p) => ("contourf", p.grid.rows, p.grid.cols, p.extend),
    };
    let levels = plot
        .levels()
        .iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Recorded {kind} on axes 0");
    println!("  grid:     {rows}x{cols}");
    println!("  levels:   [{levels}]");
    println!("  extend:   {extend}");
    println!(
        "  colorbar: {}",
        if figure.has_colorbar(0) { "yes" } else { "no" }
    );
    if let Some(label) = plot.label() {
        println!("  label:    {label}");
    }
    let x_scale = figure.x_scale(0);
    let scale = match x_scale {
        AxisScale::Linear => "linear",
        AxisScale::Date => "date",
    };
    println!("  x scale:  {scale}");
    let bounds = figure.bounds();
    if bounds.is_empty() {
        return;
    }
    println!(
        "  bounds:   x [{}, {}], y [{}, {}]",
        bounds.min.x, bounds.max.x, bounds.min.y, bounds.max.y
    );
    if x_scale == AxisScale::Date {
        if let (Some(first), Some(last)) = (
            datetime_from_days(bounds.min.x),
            datetime_from_days(bounds.max.x),
        ) {
            println!("  dates:    {first} to {last}");
        }
    }
}

fn execute_config_command(config_command: ConfigCommand, config: &IsoplotConfig) -> Result<()> {
    match config_command {
        ConfigCommand::Show => {
            println!("Current isoplot Configuration:");
            println!("==============================");
            let yaml =
                serde_yaml::to_string(config).context("Failed to serialize configuration")?;
            println!("{yaml}");
        }
        ConfigCommand::Generate { output } => {
            ConfigLoader::save_to_file(&IsoplotConfig::default(), &output)
                .with_context(|| format!("Failed to write config to {}", output.display()))?;
            println!("Sample configuration generated: {}", output.display());
        }
        ConfigCommand::Validate { config_file } => {
            match ConfigLoader::load_from_file(&config_file) {
                Ok(_) => println!("Configuration file is valid: {}", config_file.display()),
                Err(e) => {
                    eprintln!("Configuration validation failed: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        ConfigCommand::Paths => {
            println!("isoplot Configuration File Locations:");
            println!("=====================================");
            for path in ConfigLoader::find_config_files() {
                let marker = if path.is_file() { "found" } else { "-" };
                println!("  [{marker}] {}", path.display());
            }
        }
    }
    Ok(())
}

fn format_log_record(
    buf: &mut env_logger::fmt::Formatter,
    record: &log::Record,
) -> std::io::Result<()> {
    let timestamp = buf.timestamp_millis();
    writeln!(
        buf,
        "[{} {:>5} {}] {}",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}
