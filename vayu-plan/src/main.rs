//! VayuPlan - command-line planner
//!
//! Loads a world JSON, plans a path with the configured strategy, and writes
//! the plan JSON and an SVG visualization.
//!
//! ```text
//! vayu-plan --world worlds/sample.json --strategy rrt_star --seed 7
//! ```
//!
//! Exit codes: 0 path found, 1 invalid input or I/O failure, 2 no path.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use vayu_plan::io::{SvgConfig, SvgRenderer, load_world, save_plan};
use vayu_plan::{Planner, Result, Strategy, VayuConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World JSON file (start, goal, obstacles)
    #[arg(short, long)]
    world: PathBuf,

    /// Configuration file path (defaults to vayu.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Growth strategy: rrt_star or multi_bias
    #[arg(long)]
    strategy: Option<Strategy>,

    /// RNG seed (0 = entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Iteration budget
    #[arg(long)]
    iterations: Option<usize>,

    /// Obstacle inflation margin in meters
    #[arg(long)]
    margin: Option<f64>,

    /// Skip path shortcutting
    #[arg(long)]
    no_smooth: bool,

    /// Plan JSON output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SVG output path
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vayu_plan=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a path was found.
fn run(args: &Args) -> Result<bool> {
    info!("VayuPlan v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args)?;
    let world = load_world(&args.world)?;
    info!(
        "World {:?}: {} obstacles, margin {:.2}m",
        args.world,
        world.obstacles().len(),
        config.collision.margin
    );

    let planner = Planner::from_config(&config)?;
    let result = planner.plan(&world);

    let output = &config.output;
    if !output.plan_path.is_empty() {
        save_plan(&result, Path::new(&output.plan_path), output.include_tree)?;
    }

    if !output.svg_path.is_empty() {
        let svg_config = SvgConfig {
            bounds: config.planner.bounds,
            margin: config.collision.margin,
            ..Default::default()
        };
        let mut renderer = SvgRenderer::new(&world, svg_config).with_title(format!(
            "{} ({:?}, {} nodes)",
            config.planner.strategy, result.status, result.stats.nodes
        ));
        if output.include_tree {
            renderer = renderer.with_tree(&result.tree_edges);
        }
        if let Some(raw) = &result.raw {
            renderer = renderer.with_raw_path(&raw.waypoints);
        }
        if let Some(smoothed) = &result.smoothed {
            renderer = renderer.with_smoothed_path(&smoothed.waypoints);
        }
        renderer.save(Path::new(&output.svg_path))?;
        info!("Saved SVG to {}", output.svg_path);
    }

    match &result.smoothed {
        Some(path) => {
            info!(
                "Path: {} waypoints, {:.2}m",
                path.waypoints.len(),
                path.length
            );
            Ok(true)
        }
        None => {
            warn!("No path found ({:?})", result.status);
            Ok(false)
        }
    }
}

/// Config file (explicit, ./vayu.toml, or defaults) with CLI overrides applied.
fn load_config(args: &Args) -> Result<VayuConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            VayuConfig::load(path)?
        }
        None if Path::new("vayu.toml").exists() => {
            info!("Loading configuration from vayu.toml");
            VayuConfig::load(Path::new("vayu.toml"))?
        }
        None => {
            info!("Using default configuration");
            VayuConfig::default()
        }
    };

    if let Some(strategy) = args.strategy {
        config.planner.strategy = strategy;
    }
    if let Some(seed) = args.seed {
        config.planner.seed = seed;
    }
    if let Some(iterations) = args.iterations {
        config.planner.max_iterations = iterations;
    }
    if let Some(margin) = args.margin {
        config.collision.margin = margin;
    }
    if args.no_smooth {
        config.smoothing.enabled = false;
    }
    if let Some(path) = &args.output {
        config.output.plan_path = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &args.svg {
        config.output.svg_path = path.to_string_lossy().into_owned();
    }

    config.validate()?;
    Ok(config)
}
