use anyhow::{Context, Result};
use clap::Parser;
use intersection_sim::simulation::{SimConfig, SimWorld};

/// Default log filter when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "warn,intersection_sim=info";

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way adaptive signal simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "3600")]
    ticks: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks between two vehicle spawns
    #[arg(long)]
    spawn_interval: Option<u32>,

    /// Probability that a spawned vehicle is an emergency vehicle
    #[arg(long)]
    emergency_chance: Option<f64>,

    /// Print a summary every this many ticks in headless mode (0 disables)
    #[arg(long, default_value = "600")]
    report_every: u32,

    /// Also draw the ASCII map with every summary
    #[arg(long)]
    map: bool,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig {
            seed: self.seed,
            ..SimConfig::default()
        };
        if let Some(interval) = self.spawn_interval {
            config.spawn_interval = interval;
        }
        if let Some(chance) = self.emergency_chance {
            config.emergency_chance = chance;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("Invalid command line options")?;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
        )
        .init();
        run_headless(&cli, config)?;
    }
    Ok(())
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: SimConfig) -> Result<()> {
    println!("Running intersection simulation in headless mode...");
    println!("Ticks: {}, Seed: {:?}", cli.ticks, config.seed);
    println!();

    let mut world = SimWorld::from_config(config)?;

    println!("Initial state:");
    world.print_summary();
    if cli.map {
        world.draw_map();
    }
    println!();

    for tick in 1..=cli.ticks {
        world.tick();

        if cli.report_every > 0 && tick % cli.report_every == 0 && tick < cli.ticks {
            println!("--- After tick {} ---", tick);
            world.print_summary();
            if cli.map {
                world.draw_map();
            }
            println!();
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    if cli.map {
        world.draw_map();
    }

    world.stats().log_summary(world.vehicle_count());
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SimConfig) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use intersection_sim::ui;

    println!("Starting Intersection Sim UI...");
    println!();
    println!("Controls:");
    println!("  ESC         - Exit");
    println!();

    let layout = config.layout;
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: DEFAULT_LOG_FILTER.to_string(),
                    level: bevy::log::Level::INFO,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Intersection Sim".into(),
                        resolution: (layout.width as u32, layout.height as u32).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ui::IntersectionUIPlugin { config })
        .run();
}
