//! Skirmish CLI
//!
//! Command-line driver for episodic sessions against a remote engine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use skirmish::prelude::*;
use skirmish::utils::format_duration;
use skirmish_rpc::GrpcTransport;

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(version, about = "Skirmish - episodic client for a remote FPS engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run episodes against the engine with the built-in random policy
    Run(RunArgs),

    /// List game modes and action dimensions
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Navigation,
    SupplyGather,
    SupplyBattle,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Navigation => GameMode::Navigation,
            ModeArg::SupplyGather => GameMode::SupplyGather,
            ModeArg::SupplyBattle => GameMode::SupplyBattle,
        }
    }
}

#[derive(Args)]
struct RunArgs {
    /// Engine host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Engine gRPC port
    #[arg(long, default_value_t = 50051)]
    port: u16,

    /// Episode timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Connection timeout in seconds
    #[arg(long, default_value_t = 10)]
    connect_timeout: u64,

    #[arg(long, default_value_t = 1)]
    map_id: u32,

    #[arg(long, default_value_t = 0)]
    random_seed: u64,

    #[arg(long, default_value_t = 1)]
    num_episodes: u32,

    #[arg(long, default_value_t = 1)]
    num_agents: u32,

    /// Game mode
    #[arg(long, value_enum, default_value_t = ModeArg::SupplyBattle)]
    mode: ModeArg,

    /// Movement speed for the random policy
    #[arg(long, default_value_t = 1.0)]
    walk_speed: f32,

    /// Spawn pose of the first agent
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, 0.0, 0.0])]
    start_location: Vec<f32>,

    /// Capture per-agent depth buffers
    #[arg(long)]
    use_depth_map: bool,

    /// Record engine-side replays
    #[arg(long)]
    record: bool,

    /// Prefix for per-episode replay labels
    #[arg(long, default_value = "")]
    replay_suffix: String,

    /// Supply heatmap center on the ground plane; defaults to the start
    /// location's X/Z
    #[arg(long, num_args = 2, value_names = ["X", "Z"])]
    supply_center: Option<Vec<f32>>,

    #[arg(long, default_value_t = 50.0)]
    supply_radius: f32,

    #[arg(long, default_value_t = 80)]
    supply_indoor_richness: u32,

    #[arg(long, default_value_t = 20)]
    supply_outdoor_richness: u32,

    /// Items per indoor spawn point
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], default_values_t = [10, 50])]
    supply_indoor_quantity: Vec<u32>,

    /// Items per outdoor spawn point
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], default_values_t = [1, 5])]
    supply_outdoor_quantity: Vec<u32>,

    #[arg(long, default_value_t = 5)]
    supply_spacing: u32,

    /// Append per-step telemetry as JSON lines to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn to_config(&self) -> GameConfig {
        let start_location = Position::new(
            self.start_location[0],
            self.start_location[1],
            self.start_location[2],
        );
        let heatmap_center = match &self.supply_center {
            Some(center) => [center[0], center[1]],
            None => [start_location.x, start_location.z],
        };

        GameConfig {
            host: self.host.clone(),
            port: self.port,
            connect_timeout: Duration::from_secs(self.connect_timeout),
            episode_timeout: Duration::from_secs(self.timeout),
            map_id: self.map_id,
            random_seed: self.random_seed,
            num_episodes: self.num_episodes,
            num_agents: self.num_agents,
            game_mode: self.mode.into(),
            use_depth_map: self.use_depth_map,
            record: self.record,
            replay_suffix: self.replay_suffix.clone(),
            start_location,
            walk_speed: self.walk_speed,
            supply: SupplyRules {
                heatmap_center,
                heatmap_radius: self.supply_radius,
                indoor_richness: self.supply_indoor_richness,
                outdoor_richness: self.supply_outdoor_richness,
                indoor_quantity: (self.supply_indoor_quantity[0], self.supply_indoor_quantity[1]),
                outdoor_quantity: (
                    self.supply_outdoor_quantity[0],
                    self.supply_outdoor_quantity[1],
                ),
                spacing: self.supply_spacing,
            },
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(&args)?,
        Commands::List => list(),
    }

    Ok(())
}

fn run(args: &RunArgs) -> Result<()> {
    let config = args.to_config();

    let transport = GrpcTransport::new(&config)?;
    let mut runner = EpisodeRunner::new(config.clone(), transport)?.with_sink(build_sink(args)?);

    tracing::info!(
        endpoint = %config.endpoint(),
        mode = config.game_mode.name(),
        episodes = config.num_episodes,
        agents = config.num_agents,
        "starting session"
    );
    runner.start_session()?;

    let mut policy = RandomPolicy::from_config(&config);
    let summary = runner.run(config.num_episodes, &mut policy);
    runner.close()?;

    let summary = summary?;
    tracing::info!(
        episodes = summary.episodes,
        steps = summary.total_steps,
        elapsed = %format_duration(summary.elapsed.as_secs_f64()),
        "run complete"
    );
    Ok(())
}

fn build_sink(args: &RunArgs) -> Result<Arc<dyn StepSink>> {
    Ok(match &args.output {
        Some(path) => Arc::new(CompositeSink::new(vec![
            Box::new(ConsoleSink::new()),
            Box::new(JsonlSink::create(path)?),
        ])),
        None => Arc::new(ConsoleSink::new()),
    })
}

fn list() {
    println!("Game modes:");
    println!();
    println!("  navigation     Navigate to a target location");
    println!("  supply-gather  Collect supply items, no combat");
    println!("  supply-battle  Collect supply items while fighting other agents");
    println!();
    println!("Action dimensions (registered in this order):");
    println!();
    for variable in ActionVariable::ALL {
        println!("  {:2}  {}", variable.wire_id(), variable.name());
    }
}
