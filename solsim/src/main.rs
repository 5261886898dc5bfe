use solsim::{bench_gravity, bench_step_curve};
use solsim::{generate_system, load_scenario_config, save_stats_csv, save_system, GeneratorConfig, Parameters, Scenario};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "solsim")]
#[command(about = "Star / planet / satellite system simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario headless and optionally save the final state and energy series
    Run {
        /// Scenario YAML, looked up in `scenarios/` if not found as given
        #[arg(short, default_value = "three_stars.yaml")]
        file_name: PathBuf,
        /// Override the configured number of steps
        #[arg(long)]
        steps: Option<u64>,
        /// Write the final system here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the energy series here as CSV
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Generate a multi-star system file with the default layout
    Generate {
        #[arg(long, default_value = "42")]
        seed: u64,
        #[arg(short, long, default_value = "generated_system.txt")]
        out: PathBuf,
    },

    /// Time the force pass and full steps for growing body counts
    Bench,
}

// resolve here to keep main clean
fn scenario_path(file_name: &Path) -> PathBuf {
    if file_name.exists() {
        return file_name.to_path_buf();
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn run(file_name: &Path, steps: Option<u64>, out: Option<PathBuf>, stats: Option<PathBuf>) -> Result<()> {
    let config_path = scenario_path(file_name);
    let cfg = load_scenario_config(&config_path)?;
    let base_dir = config_path.parent().unwrap_or(Path::new("."));

    let mut scenario = Scenario::build_scenario(cfg, base_dir)?;
    if !scenario.warnings.is_empty() {
        warn!(count = scenario.warnings.len(), "system loaded with warnings");
    }

    let dt = scenario.settings.dt;
    let steps = steps.unwrap_or(scenario.settings.steps);
    info!(dt, steps, bodies = scenario.engine.bodies().len(), "running");

    let collisions = scenario.engine.run(dt, steps);
    info!(t = scenario.engine.time(), collisions, "run finished");

    if let Some(path) = out {
        save_system(&path, scenario.engine.system())?;
    }
    if let Some(path) = stats {
        save_stats_csv(&path, scenario.engine.diagnostics())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file_name, steps, out, stats } => run(&file_name, steps, out, stats)?,
        Commands::Generate { seed, out } => {
            let cfg = GeneratorConfig { seed, ..GeneratorConfig::default() };
            let system = generate_system(&cfg, &Parameters::default())?;
            save_system(&out, &system)?;
        }
        Commands::Bench => {
            bench_gravity()?;
            bench_step_curve()?;
        }
    }

    Ok(())
}
