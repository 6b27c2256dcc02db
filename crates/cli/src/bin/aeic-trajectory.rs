use std::path::{Path, PathBuf};

use aeic_trajectory::config::{load_mission, load_options, load_performance_model};
use aeic_trajectory::export::{summary, trajectory, writer_for_path};
use aeic_trajectory::legacy::{FlightProfile, convert, fly_mission};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Fly legacy climb/cruise/descent trajectories from a performance table"
)]
struct Cli {
    /// Aircraft performance model (TOML or YAML)
    #[arg(long)]
    performance: PathBuf,

    /// Mission file (TOML or YAML)
    #[arg(long)]
    mission: PathBuf,

    /// Trajectory options file; defaults apply when omitted
    #[arg(long)]
    options: Option<PathBuf>,

    /// CSV destination for the trajectory points (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Optional JSON file for the flight summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Start the flight at this mass (kg) instead of estimating it
    #[arg(long)]
    starting_mass: Option<f64>,

    /// Re-fly until the starting mass is consistent with the fuel burned
    #[arg(long, default_value_t = false)]
    iterate_mass: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let model_config = load_performance_model(&cli.performance)
        .with_context(|| format!("loading performance model {}", cli.performance.display()))?;
    let model = convert::performance_model(&model_config)?;

    let mut options = match &cli.options {
        Some(path) => convert::options(
            &load_options(path).with_context(|| format!("loading options {}", path.display()))?,
        ),
        None => Default::default(),
    };
    if let Some(mass) = cli.starting_mass {
        options.starting_mass = Some(mass);
    }
    options.iterate_mass |= cli.iterate_mass;

    let mission = convert::mission(
        &load_mission(&cli.mission)
            .with_context(|| format!("loading mission {}", cli.mission.display()))?,
    )?;
    let label = mission.name.clone().unwrap_or_else(|| file_stem(&cli.mission));
    info!(aircraft = %model.name, mission = %label, "flying");

    let profile = fly_mission(&model, &mission, options)
        .with_context(|| format!("flying {label}"))?;

    let writer = writer_for_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    trajectory::write_csv(writer, &profile.buffer)?;

    if let Some(path) = &cli.summary {
        let writer =
            writer_for_path(path).with_context(|| format!("creating {}", path.display()))?;
        summary::write_json(writer, &profile.summary)?;
    }

    if cli.output != Path::new("-") {
        print_summary(&label, &profile);
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mission".to_string())
}

fn print_summary(label: &str, profile: &FlightProfile) {
    let s = &profile.summary;
    let (h, m) = hours_minutes(s.flight_time_s);
    println!("=== {label} ({}) ===", s.aircraft);
    println!(
        "Distance        : {:.1} km flown / {:.1} km great circle",
        s.ground_distance_m / 1_000.0,
        s.great_circle_distance_m / 1_000.0
    );
    println!("Cruise altitude : {:.0} m", s.profile.cruise_m);
    println!("Flight time     : {h}h {m:02}m");
    println!(
        "Starting mass   : {:.1} kg{}",
        s.starting_mass.total_kg,
        if s.starting_mass.clamped { " (clamped)" } else { "" }
    );
    println!("Fuel burned     : {:.1} kg", s.fuel_burned_kg);
    println!("Landing mass    : {:.1} kg", s.landing_mass_kg);
    if s.mass_iterations > 0 {
        println!("Mass iterations : {}", s.mass_iterations);
    }
}

fn hours_minutes(seconds: f64) -> (u64, u64) {
    let minutes = (seconds / 60.0).round() as u64;
    (minutes / 60, minutes % 60)
}
