mod error;

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use error::CliResult;
use rtd_charts::{ChartRequest, ChartResult, package, result_to_json, to_csv, to_json};
use rtd_core::units::{m3, m3ps};
use rtd_reactors::{
    BypassDecay, CurveKind, GridSettings, NonIdeality, NonIdealityParameters, ReactorConfig,
    ReactorKind, RtdCalculator, TimeConstants, TracerMode,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "rtd-cli")]
#[command(about = "Residence time distribution charts for non-ideal reactors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print mean, bypass and dead-volume residence times
    Constants {
        /// Reactor volume [m3]
        #[arg(long)]
        volume: f64,
        /// Volumetric flow rate [m3/s]
        #[arg(long)]
        flow: f64,
        /// Bypass fraction in [0, 1)
        #[arg(long, default_value_t = 0.2)]
        bypass: f64,
        /// Dead volume [m3]
        #[arg(long, default_value_t = 10.0)]
        dead_volume: f64,
    },
    /// Render a single chart
    Chart {
        /// Reactor volume [m3]
        #[arg(long)]
        volume: f64,
        /// Volumetric flow rate [m3/s]
        #[arg(long)]
        flow: f64,
        /// Tracer injection mode (pulse or step)
        #[arg(long)]
        tracer: TracerMode,
        #[arg(long, value_enum)]
        reactor: ReactorArg,
        /// ideal, bypass or dead_volume
        #[arg(long)]
        non_ideality: NonIdeality,
        /// concentration, exit_age or cumulative
        #[arg(long)]
        curve: CurveKind,
        /// Number of tanks in series (CSTR only)
        #[arg(long, default_value_t = 1)]
        tanks: u32,
        /// Bypass fraction in [0, 1)
        #[arg(long, default_value_t = 0.2)]
        bypass: f64,
        /// Dead volume [m3]
        #[arg(long, default_value_t = 10.0)]
        dead_volume: f64,
        /// Decay constant for the CSTR bypass tail (dead_volume or bypass)
        #[arg(long, default_value = "dead_volume")]
        bypass_decay: BypassDecay,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render every chart of a scenario file
    Scenario {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Directory receiving one JSON file per chart
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReactorArg {
    Pfr,
    Cstr,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Chart specification (title, axes, series, annotation)
    Json,
    /// series,time_s,value rows
    Csv,
    /// Packaged result including the request and raw curves
    Full,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Constants {
            volume,
            flow,
            bypass,
            dead_volume,
        } => cmd_constants(volume, flow, bypass, dead_volume),
        Commands::Chart {
            volume,
            flow,
            tracer,
            reactor,
            non_ideality,
            curve,
            tanks,
            bypass,
            dead_volume,
            bypass_decay,
            format,
            output,
        } => {
            let config = ReactorConfig::new(m3(volume), m3ps(flow), tracer)?;
            let params = NonIdealityParameters {
                bypass_fraction: bypass,
                dead_volume: m3(dead_volume),
                bypass_decay,
            };
            let calc = RtdCalculator::with_grid(config, params, GridSettings::default())?;
            let reactor = match reactor {
                ReactorArg::Pfr => ReactorKind::Pfr,
                ReactorArg::Cstr => ReactorKind::cstr(tanks)?,
            };
            let request = ChartRequest::new(reactor, non_ideality, curve);
            cmd_chart(&calc, request, format, output.as_deref())
        }
        Commands::Scenario {
            scenario_path,
            out_dir,
        } => cmd_scenario(&scenario_path, out_dir.as_deref()),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
    }
}

fn cmd_constants(volume: f64, flow: f64, bypass: f64, dead_volume: f64) -> CliResult<()> {
    // Tracer mode has no influence on the time constants.
    let config = ReactorConfig::new(m3(volume), m3ps(flow), TracerMode::Pulse)?;
    let params = NonIdealityParameters {
        bypass_fraction: bypass,
        dead_volume: m3(dead_volume),
        ..NonIdealityParameters::default()
    };
    let tc = TimeConstants::derive(&config, &params)?;

    println!("Residence times for V = {volume} m3, Q = {flow} m3/s:");
    println!("  Mean:        {:.3} s", tc.mean_s());
    println!("  Bypass:      {:.3} s (b = {bypass})", tc.bypass_s());
    println!("  Dead volume: {:.3} s (Vd = {dead_volume} m3)", tc.dead_volume_s());
    Ok(())
}

fn cmd_chart(
    calc: &RtdCalculator,
    request: ChartRequest,
    format: Format,
    output: Option<&Path>,
) -> CliResult<()> {
    let chart = package(calc, request)?;
    let content = match format {
        Format::Json => to_json(&chart.to_spec())?,
        Format::Csv => to_csv(&chart)?,
        Format::Full => result_to_json(&chart)?,
    };

    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Wrote {} to {}", request, path.display());
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_scenario(scenario_path: &Path, out_dir: Option<&Path>) -> CliResult<()> {
    println!("Rendering scenario: {}", scenario_path.display());
    let scenario = rtd_project::load(scenario_path)?;
    let charts = rtd_project::render(&scenario)?;

    match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            for chart in &charts {
                let path = dir.join(format!("{}.json", chart.request.slug()));
                std::fs::write(&path, to_json(&chart.to_spec())?)?;
                info!(path = %path.display(), "wrote chart");
            }
            println!("✓ Wrote {} charts to {}", charts.len(), dir.display());
        }
        None => {
            println!("✓ Rendered {} charts for '{}'", charts.len(), scenario.name);
            for chart in &charts {
                print_summary(chart);
            }
        }
    }
    Ok(())
}

fn print_summary(chart: &ChartResult) {
    println!(
        "  {:<36} {:>6} points  t <= {:.2} s  peak {:.4}",
        chart.request.slug(),
        chart.primary.len(),
        chart.axes.time.1,
        chart.primary.max_value().unwrap_or(0.0)
    );
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = rtd_project::load(scenario_path)?;
    let calc = rtd_project::build_calculator(&scenario)?;
    let tc = calc.constants();
    println!("✓ Scenario is valid");
    println!(
        "  tau = {:.3} s, tau_bypass = {:.3} s, tau_dead = {:.3} s",
        tc.mean_s(),
        tc.bypass_s(),
        tc.dead_volume_s()
    );
    Ok(())
}
