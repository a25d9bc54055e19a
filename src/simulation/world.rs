//! Main simulation world that ties everything together
//!
//! This is the entry point for running the intersection simulation
//! without any Bevy dependencies.

use anyhow::{Context, Result};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;

use super::config::{IntersectionLayout, SimConfig};
use super::render::{AsciiMap, SceneRenderer, SignalView, VehicleView};
use super::signal::{DirectionCounts, SignalController, SignalEvent};
use super::spawner::{SpawnDecision, SpawnPolicy};
use super::stats::SimStats;
use super::types::{Direction, Position, VehicleId};
use super::vehicle::Vehicle;

/// World units per character in the console map
const MAP_SCALE: f32 = 25.0;

/// The main simulation world
///
/// Owns the vehicle fleet and the signal controller. A driver (the headless
/// loop or the Bevy UI) calls [`SimWorld::tick`] once per frame.
pub struct SimWorld {
    config: SimConfig,

    /// Intersection signal
    signal: SignalController,

    /// All live vehicles, in spawn order
    vehicles: Vec<Vehicle>,

    spawn_policy: SpawnPolicy,

    /// Next ID to assign
    next_id: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    stats: SimStats,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(config: SimConfig) -> Self {
        let rng = config.seed.map(StdRng::seed_from_u64);
        Self {
            signal: SignalController::new(config.layout.center(), config.timing),
            vehicles: Vec::new(),
            spawn_policy: SpawnPolicy::new(config.spawn_interval),
            next_id: 0,
            rng,
            stats: SimStats::default(),
            config,
        }
    }

    pub fn new() -> Self {
        Self::new_internal(SimConfig::default())
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        })
    }

    /// Create a SimWorld from a custom configuration
    pub fn from_config(config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation configuration")?;
        Ok(Self::new_internal(config))
    }

    /// Get a random value in the given range, using seeded RNG if available
    fn random_range(&mut self, range: std::ops::Range<f32>) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    fn random_bool(&mut self, probability: f64) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(probability),
            None => rand::rng().random_bool(probability),
        }
    }

    fn random_direction(&mut self) -> Direction {
        let directions = Direction::ALL;
        let picked = match &mut self.rng {
            Some(rng) => directions.choose(rng),
            None => directions.choose(&mut rand::rng()),
        };
        picked.copied().unwrap_or(Direction::North)
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn layout(&self) -> &IntersectionLayout {
        &self.config.layout
    }

    pub fn signal(&self) -> &SignalController {
        &self.signal
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Number of live vehicles, for on-screen or log display
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn spawn_policy(&self) -> &SpawnPolicy {
        &self.spawn_policy
    }

    /// Waiting vehicles per direction right now
    pub fn congestion(&self) -> DirectionCounts {
        self.signal.congestion(&self.vehicles)
    }

    /// Spawn a vehicle at the spawn point of `direction` with a random speed cap
    pub fn spawn_vehicle(&mut self, direction: Direction, is_emergency: bool) -> Result<VehicleId> {
        let position = self.config.layout.spawn_point(direction);
        self.spawn_vehicle_at(direction, is_emergency, position)
    }

    /// Spawn a vehicle at an explicit position (used to stage scenarios)
    pub fn spawn_vehicle_at(
        &mut self,
        direction: Direction,
        is_emergency: bool,
        position: Position,
    ) -> Result<VehicleId> {
        let params = self.config.vehicles;
        let speed_cap = self.random_range(params.min_speed_cap..params.max_speed_cap);
        let id = self.next_vehicle_id();
        let vehicle = Vehicle::new(
            id,
            direction,
            is_emergency,
            speed_cap,
            &params,
            &self.config.layout,
        )?
        .with_position(position);

        debug!(
            "Spawned {} vehicle {:?} from {} (speed cap {:.2})",
            if is_emergency { "emergency" } else { "regular" },
            id.0,
            direction,
            speed_cap
        );

        self.vehicles.push(vehicle);
        self.stats.vehicles_spawned += 1;
        if is_emergency {
            self.stats.emergency_spawned += 1;
        }
        self.stats.peak_vehicles = self.stats.peak_vehicles.max(self.vehicles.len());
        Ok(id)
    }

    fn apply_spawn_decision(&mut self, decision: SpawnDecision) {
        let request = match decision {
            SpawnDecision::Skip => None,
            SpawnDecision::Spawn {
                direction,
                is_emergency,
            } => Some((direction, is_emergency)),
            SpawnDecision::Policy => {
                if self.spawn_policy.tick() {
                    let direction = self.random_direction();
                    let is_emergency = self.random_bool(self.config.emergency_chance);
                    Some((direction, is_emergency))
                } else {
                    None
                }
            }
        };

        if let Some((direction, is_emergency)) = request {
            if let Err(e) = self.spawn_vehicle(direction, is_emergency) {
                warn!("Failed to spawn vehicle from {}: {:#}", direction, e);
            }
        }
    }

    /// Advance the simulation by one tick using the built-in spawn policy
    pub fn tick(&mut self) -> SignalEvent {
        self.step(SpawnDecision::Policy)
    }

    /// Advance the simulation by one tick
    ///
    /// Order: spawn, signal update, vehicle updates against the pre-update
    /// snapshot, then removal of vehicles that left the area.
    pub fn step(&mut self, decision: SpawnDecision) -> SignalEvent {
        self.stats.ticks += 1;
        self.apply_spawn_decision(decision);

        let event = self.signal.update(&self.vehicles);
        match event {
            SignalEvent::Preempted { engaged: true, .. } => {
                self.stats.preemptions += 1;
            }
            SignalEvent::Yellow(_) | SignalEvent::Green(_) => {
                self.stats.phase_changes += 1;
            }
            _ => {}
        }

        // Every vehicle decides against the same view of the fleet
        let snapshot = self.vehicles.clone();
        for vehicle in &mut self.vehicles {
            vehicle.update(&snapshot, &self.signal, &self.config.layout);
        }

        let layout = self.config.layout;
        let before = self.vehicles.len();
        self.vehicles.retain(|v| {
            let keep = !layout.is_out_of_bounds(v.position());
            if !keep {
                trace!("Vehicle {:?} left the area", v.id().0);
            }
            keep
        });
        self.stats.vehicles_exited += (before - self.vehicles.len()) as u32;

        event
    }

    /// Hand the current frame to a renderer
    pub fn render<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_signal(&SignalView::new(&self.signal));
        for vehicle in &self.vehicles {
            renderer.draw_vehicle(&VehicleView::new(vehicle, &self.config.layout));
        }
        renderer.draw_status(self.vehicle_count());
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!("Tick: {}", self.stats.ticks);
        println!(
            "Signal: {} {:?} (timer {}/{}){}",
            self.signal.current(),
            self.signal.phase(),
            self.signal.timer(),
            self.signal.green_duration(),
            if self.signal.emergency_lock() {
                " [EMERGENCY]"
            } else {
                ""
            }
        );
        println!("Vehicles: {}", self.vehicle_count());

        println!("--- Congestion ---");
        for (direction, count) in self.congestion().iter() {
            println!("  {}: {}", direction, count);
        }

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in &self.vehicles {
                println!(
                    "  Vehicle {:?}{}: {} velocity={:.2}/{:.2}, position=({:.1}, {:.1}), {}",
                    vehicle.id().0,
                    if vehicle.is_emergency() { " (emergency)" } else { "" },
                    vehicle.direction().short_name(),
                    vehicle.velocity(),
                    vehicle.speed_cap(),
                    vehicle.position().x,
                    vehicle.position().y,
                    if vehicle.crossed() {
                        "crossed"
                    } else if vehicle.in_intersection() {
                        "crossing"
                    } else {
                        "approaching"
                    }
                );
            }
        }
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        let mut map = AsciiMap::new(self.config.layout, MAP_SCALE);
        self.render(&mut map);

        println!("\n=== Intersection Map ===");
        println!("Legend: R/Y/G=Signal, n/e/s/w=Vehicle by approach, !=Emergency");
        println!();
        println!("{}", map.render());
        println!();
    }
}
