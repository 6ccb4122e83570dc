use clap::Parser;
use convection_sim_core::{ConvectionSimulation, SimulationConfig};
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Convection simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "convection-sim-demo")]
#[command(about = "Headless heat convection simulation demo", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 160)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 200)]
    height: usize,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Seed for the initial temperature jitter
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Heat power slider (0-100)
    #[arg(long, default_value_t = 50.0)]
    heat: f32,

    /// Diffusion slider (0-100)
    #[arg(short, long, default_value_t = 50.0)]
    diffusion: f32,

    /// Report interval in frames
    #[arg(short, long, default_value_t = 60)]
    report_interval: u32,

    /// YAML file overriding the simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the final frame as a binary PPM image
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Load constants from YAML, falling back to defaults when the file is unusable.
fn load_config(path: &Path) -> SimulationConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to parse {}: {e}; using defaults", path.display());
                SimulationConfig::default()
            }
        },
        Err(e) => {
            warn!("failed to read {}: {e}; using defaults", path.display());
            SimulationConfig::default()
        }
    }
}

/// Write an RGBA frame as P6 PPM, dropping the alpha channel.
fn write_ppm(path: &Path, width: usize, height: usize, rgba: &[u8]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "P6\n{width} {height}\n255")?;
    for px in rgba.chunks_exact(4) {
        out.write_all(&px[..3])?;
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Convection Simulation Demo ===\n");

    let config = args
        .config
        .as_deref()
        .map_or_else(SimulationConfig::default, load_config);
    let mut sim = ConvectionSimulation::with_config(args.width, args.height, config, args.seed)?;
    sim.set_heat_power(args.heat);
    sim.set_diffusion_rate(args.diffusion);

    let controls = sim.controls();
    println!("Grid: {}x{} cells, seed {}", sim.width(), sim.height(), args.seed);
    println!(
        "Heat power: {:.4} (slider {:.0}), diffusion: {:.4} (slider {:.0})\n",
        controls.heat_power, args.heat, controls.diffusion_rate, args.diffusion
    );

    println!(" Frame | Mean temp | Peak temp | Peak speed");
    println!("-------|-----------|-----------|-----------");

    let mut frame = vec![0_u8; sim.pixel_buffer_len()];
    let interval = args.report_interval.max(1);
    for n in 1..=args.frames {
        sim.advance();
        sim.render(&mut frame)?;

        if n % interval == 0 || n == args.frames {
            let stats = sim.stats();
            println!(
                "{:6} | {:9.4} | {:9.4} | {:10.4}",
                stats.step_count, stats.mean_temperature, stats.peak_temperature, stats.peak_speed
            );
        }
    }

    println!("\n=== Simulation Complete ===");

    if let Some(path) = &args.output {
        write_ppm(path, sim.width(), sim.height(), &frame)?;
        info!(path = %path.display(), "wrote final frame");
        println!("Final frame written to {}", path.display());
    }

    Ok(())
}
