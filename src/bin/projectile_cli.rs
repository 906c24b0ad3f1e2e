use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use projectile_engine::constants::{
    DEFAULT_IDEAL_SAMPLES, DEFAULT_MAX_STEPS, DEFAULT_PLAYBACK_FRAMES, DEFAULT_TIME_STEP_S,
    G_ACCEL_MPS2,
};
use projectile_engine::{
    compare, solve_ideal, CompareOptions, Comparison, DragSimulator, LaunchParameters,
    ObjectPreset, ObjectProperties, ProjectileError, SimulationConfig, Trajectory,
    TrajectorySummary,
};

#[derive(Parser)]
#[command(name = "projectile")]
#[command(version)]
#[command(about = "Ideal vs. air-drag projectile trajectory calculator", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LaunchArgs {
    /// Initial speed (m/s)
    #[arg(short = 'v', long)]
    velocity: f64,

    /// Launch angle (degrees, 0-90)
    #[arg(short = 'a', long, default_value = "45.0")]
    angle: f64,

    /// Initial height (meters)
    #[arg(long, default_value = "0.0")]
    height: f64,

    /// Gravitational acceleration (m/s²)
    #[arg(long, default_value_t = G_ACCEL_MPS2)]
    gravity: f64,
}

impl LaunchArgs {
    fn parameters(&self) -> LaunchParameters {
        LaunchParameters::new(self.velocity, self.angle, self.height).with_gravity(self.gravity)
    }
}

#[derive(Args)]
struct ObjectArgs {
    /// Object preset (custom, ping-pong-ball, cannonball, soccer-ball)
    #[arg(short = 'p', long, default_value = "custom")]
    preset: String,

    /// Mass (kg), overrides the preset
    #[arg(short = 'm', long)]
    mass: Option<f64>,

    /// Radius (meters), overrides the preset
    #[arg(short = 'r', long)]
    radius: Option<f64>,

    /// Drag coefficient, overrides the preset
    #[arg(long)]
    cd: Option<f64>,

    /// Air density (kg/m³), overrides the preset
    #[arg(long)]
    air_density: Option<f64>,
}

impl ObjectArgs {
    fn properties(&self) -> Result<ObjectProperties, ProjectileError> {
        let preset: ObjectPreset = self.preset.parse()?;
        let mut properties = preset.properties();
        if let Some(mass) = self.mass {
            properties.mass = mass;
        }
        if let Some(radius) = self.radius {
            properties.radius = radius;
        }
        if let Some(cd) = self.cd {
            properties.drag_coefficient = cd;
        }
        if let Some(air_density) = self.air_density {
            properties.air_density = air_density;
        }
        Ok(properties)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the drag-free trajectory
    Ideal {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Number of samples
        #[arg(short = 'n', long, default_value_t = DEFAULT_IDEAL_SAMPLES)]
        samples: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Calculate the trajectory under quadratic air drag
    Drag {
        #[command(flatten)]
        launch: LaunchArgs,

        #[command(flatten)]
        object: ObjectArgs,

        /// Integration time step (seconds)
        #[arg(long, default_value_t = DEFAULT_TIME_STEP_S)]
        time_step: f64,

        /// Maximum integration steps
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Compare the ideal and drag trajectories on a shared clock
    Compare {
        #[command(flatten)]
        launch: LaunchArgs,

        #[command(flatten)]
        object: ObjectArgs,

        /// Number of ideal samples
        #[arg(short = 'n', long, default_value_t = DEFAULT_IDEAL_SAMPLES)]
        samples: usize,

        /// Integration time step (seconds)
        #[arg(long, default_value_t = DEFAULT_TIME_STEP_S)]
        time_step: f64,

        /// Maximum integration steps
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Frames on the shared playback clock
        #[arg(short = 'f', long, default_value_t = DEFAULT_PLAYBACK_FRAMES)]
        frames: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Run a comparison described by a TOML or JSON config file
    Run {
        /// Path to the config file
        config: PathBuf,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// List the object presets
    Presets,

    /// Display engine information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct PointRecord {
    time: f64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    speed: f64,
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    time_of_flight: f64,
    max_range: f64,
    max_height: f64,
    impact_speed: f64,
    points: usize,
}

impl From<TrajectorySummary> for SummaryRecord {
    fn from(s: TrajectorySummary) -> Self {
        Self {
            time_of_flight: s.time_of_flight,
            max_range: s.max_range,
            max_height: s.max_height,
            impact_speed: s.impact_speed,
            points: s.points,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrajectoryReport {
    #[serde(flatten)]
    summary: SummaryRecord,
    trajectory: Vec<PointRecord>,
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: usize,
    time: f64,
    ideal_x: f64,
    ideal_y: f64,
    drag_x: f64,
    drag_y: f64,
}

#[derive(Debug, Serialize)]
struct ComparisonReport {
    ideal: SummaryRecord,
    drag: SummaryRecord,
    range_delta: f64,
    height_delta: f64,
    flight_time_delta: f64,
    frames: Vec<FrameRecord>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Ideal { launch, samples, output, full } => {
            let trajectory = solve_ideal(&launch.parameters(), samples)?;
            display_trajectory("IDEAL TRAJECTORY", &trajectory, output, full)?;
        }

        Commands::Drag {
            launch, object, time_step, max_steps, output, full
        } => {
            let mut simulator = DragSimulator::new(launch.parameters(), object.properties()?);
            simulator.set_time_step(time_step);
            simulator.set_max_steps(max_steps);

            let trajectory = simulator.simulate()?;
            display_trajectory("DRAG TRAJECTORY", &trajectory, output, full)?;
        }

        Commands::Compare {
            launch, object, samples, time_step, max_steps, frames, output
        } => {
            let options = CompareOptions {
                ideal_samples: samples,
                time_step,
                max_steps,
            };
            let comparison = compare(&launch.parameters(), &object.properties()?, &options)?;
            display_comparison(&comparison, frames, output)?;
        }

        Commands::Run { config, output } => {
            info!("loading config from {}", config.display());
            let config = SimulationConfig::from_path(&config)?;
            let comparison = compare(
                &config.launch,
                &config.object_properties(),
                &config.compare_options(),
            )?;
            display_comparison(&comparison, config.frames, output)?;
        }

        Commands::Presets => {
            println!("┌────────────────┬────────────────┬──────────┬──────────┬──────┐");
            println!("│ Name           │ Object         │ Mass(kg) │ Radius(m)│  Cd  │");
            println!("├────────────────┼────────────────┼──────────┼──────────┼──────┤");
            for preset in ObjectPreset::ALL {
                let p = preset.properties();
                println!("│ {:<14} │ {:<14} │ {:>8.4} │ {:>8.3} │ {:>4.2} │",
                    preset.name(), preset.label(), p.mass, p.radius, p.drag_coefficient);
            }
            println!("└────────────────┴────────────────┴──────────┴──────────┴──────┘");
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      PROJECTILE ENGINE v{:<14} ║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Ideal vs. air-drag projectile motion.  ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Closed-form drag-free trajectory     ║");
            println!("║ • Quadratic drag, Euler integration    ║");
            println!("║ • Shared-clock resampling for playback ║");
            println!("║ • Table, JSON and CSV output           ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn point_records(trajectory: &Trajectory) -> Vec<PointRecord> {
    trajectory
        .points()
        .iter()
        .map(|p| PointRecord {
            time: p.time,
            x: p.x(),
            y: p.y(),
            vx: p.velocity.x,
            vy: p.velocity.y,
            speed: p.speed(),
        })
        .collect()
}

fn print_summary_box(title: &str, s: &TrajectorySummary) {
    println!("╔════════════════════════════════════════╗");
    println!("║ {:<38} ║", title);
    println!("╠════════════════════════════════════════╣");
    println!("║ Max Range:         {:>8.2} m          ║", s.max_range);
    println!("║ Max Height:        {:>8.2} m          ║", s.max_height);
    println!("║ Time of Flight:    {:>8.3} s          ║", s.time_of_flight);
    println!("║ Impact Speed:      {:>8.2} m/s        ║", s.impact_speed);
    println!("║ Points:            {:>8}            ║", s.points);
    println!("╚════════════════════════════════════════╝");
}

fn display_trajectory(
    title: &str,
    trajectory: &Trajectory,
    format: OutputFormat,
    full: bool,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let report = TrajectoryReport {
                summary: trajectory.summary().into(),
                trajectory: point_records(trajectory),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            println!("time,x,y,vx,vy,speed");
            for p in point_records(trajectory) {
                println!("{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
                    p.time, p.x, p.y, p.vx, p.vy, p.speed);
            }
        }

        OutputFormat::Table => {
            print_summary_box(title, &trajectory.summary());

            let points = trajectory.points();
            if full {
                println!("\nFull Trajectory Points:");
            } else {
                println!("\nTrajectory Points (every {:.2}s):", trajectory.duration() / 10.0);
            }
            println!("┌──────────┬──────────┬──────────┬──────────┐");
            println!("│ Time (s) │  X (m)   │  Y (m)   │ Vel(m/s) │");
            println!("├──────────┼──────────┼──────────┼──────────┤");
            let step = if full { 1 } else { (points.len() / 10).max(1) };
            for (i, p) in points.iter().enumerate() {
                if i % step == 0 || i == points.len() - 1 {
                    println!("│ {:>8.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                        p.time, p.x(), p.y(), p.speed());
                }
            }
            println!("└──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

fn display_comparison(
    comparison: &Comparison,
    frames: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let pair = comparison.resample(frames)?;
    let frame_records: Vec<FrameRecord> = pair
        .frames()
        .map(|f| FrameRecord {
            frame: f.index,
            time: f.time,
            ideal_x: f.first.x,
            ideal_y: f.first.y,
            drag_x: f.second.x,
            drag_y: f.second.y,
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let report = ComparisonReport {
                ideal: comparison.ideal_summary().into(),
                drag: comparison.drag_summary().into(),
                range_delta: comparison.range_delta(),
                height_delta: comparison.height_delta(),
                flight_time_delta: comparison.flight_time_delta(),
                frames: frame_records,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            println!("frame,time,ideal_x,ideal_y,drag_x,drag_y");
            for f in &frame_records {
                println!("{},{:.3},{:.3},{:.3},{:.3},{:.3}",
                    f.frame, f.time, f.ideal_x, f.ideal_y, f.drag_x, f.drag_y);
            }
        }

        OutputFormat::Table => {
            print_summary_box("IDEAL (NO AIR)", &comparison.ideal_summary());
            print_summary_box("WITH AIR DRAG", &comparison.drag_summary());
            println!("╔════════════════════════════════════════╗");
            println!("║ DRAG vs. IDEAL                         ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Range Delta:       {:>8.2} m          ║", comparison.range_delta());
            println!("║ Height Delta:      {:>8.2} m          ║", comparison.height_delta());
            println!("║ Flight Time Delta: {:>8.3} s          ║", comparison.flight_time_delta());
            println!("║ Playback Frames:   {:>8}            ║", pair.len());
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}
