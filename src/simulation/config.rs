//! Tunable parameters for the intersection simulation
//!
//! Every value defaults to the constants in [`super::types`]; the binary
//! overrides a few of them from the command line.

use anyhow::{bail, ensure, Result};

use super::types::{
    Direction, Position, ACCELERATION, BRAKE_STEP, DESPAWN_MARGIN, LANE_OFFSET, MAX_SPEED_CAP,
    MIN_SPEED_CAP, ROAD_WIDTH, SAFE_DISTANCE, SPAWN_DISTANCE, STOP_BUFFER, VEHICLE_HEIGHT,
    VEHICLE_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH,
};

/// Baseline green ticks before congestion is added
pub const GREEN_DURATION_BASE: u32 = 120;

/// Extra green ticks granted per queued vehicle
pub const GREEN_TICKS_PER_VEHICLE: u32 = 5;

/// Yellow ticks between two greens
pub const YELLOW_DURATION: u32 = 50;

/// Ticks between two spawns
pub const SPAWN_INTERVAL: u32 = 40;

/// Probability that a spawned vehicle is an emergency vehicle
pub const EMERGENCY_CHANCE: f64 = 0.05;

/// Geometry of the visible area and the single intersection in it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionLayout {
    pub width: f32,
    pub height: f32,
    pub road_width: f32,
    pub stop_buffer: f32,
    pub safe_distance: f32,
    pub vehicle_width: f32,
    pub vehicle_height: f32,
    pub despawn_margin: f32,
    pub lane_offset: f32,
    pub spawn_distance: f32,
}

impl Default for IntersectionLayout {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            road_width: ROAD_WIDTH,
            stop_buffer: STOP_BUFFER,
            safe_distance: SAFE_DISTANCE,
            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            despawn_margin: DESPAWN_MARGIN,
            lane_offset: LANE_OFFSET,
            spawn_distance: SPAWN_DISTANCE,
        }
    }
}

impl IntersectionLayout {
    /// Geometric center of the intersection
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn half_road(&self) -> f32 {
        self.road_width / 2.0
    }

    /// Where a vehicle from `direction` enters the world
    pub fn spawn_point(&self, direction: Direction) -> Position {
        let center = self.center();
        match direction {
            Direction::North => Position::new(center.x - self.lane_offset, -self.spawn_distance),
            Direction::South => Position::new(
                center.x + self.lane_offset,
                self.height + self.spawn_distance,
            ),
            Direction::East => Position::new(
                self.width + self.spawn_distance,
                center.y - self.lane_offset,
            ),
            Direction::West => Position::new(-self.spawn_distance, center.y + self.lane_offset),
        }
    }

    /// Whether a position is far enough outside the visible area to be removed
    pub fn is_out_of_bounds(&self, position: Position) -> bool {
        position.x < -self.despawn_margin
            || position.x > self.width + self.despawn_margin
            || position.y < -self.despawn_margin
            || position.y > self.height + self.despawn_margin
    }
}

/// Signal timing in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTiming {
    pub green_base: u32,
    pub green_per_vehicle: u32,
    pub yellow: u32,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            green_base: GREEN_DURATION_BASE,
            green_per_vehicle: GREEN_TICKS_PER_VEHICLE,
            yellow: YELLOW_DURATION,
        }
    }
}

/// Per-vehicle motion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleParams {
    pub acceleration: f32,
    pub brake_step: f32,
    pub min_speed_cap: f32,
    pub max_speed_cap: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            brake_step: BRAKE_STEP,
            min_speed_cap: MIN_SPEED_CAP,
            max_speed_cap: MAX_SPEED_CAP,
        }
    }
}

/// Full configuration of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub layout: IntersectionLayout,
    pub timing: SignalTiming,
    pub vehicles: VehicleParams,
    /// Ticks between two policy spawns
    pub spawn_interval: u32,
    /// Probability in [0, 1] that a spawn is an emergency vehicle
    pub emergency_chance: f64,
    /// Seed for reproducible runs; `None` uses the thread RNG
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            layout: IntersectionLayout::default(),
            timing: SignalTiming::default(),
            vehicles: VehicleParams::default(),
            spawn_interval: SPAWN_INTERVAL,
            emergency_chance: EMERGENCY_CHANCE,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        let vehicles = &self.vehicles;
        let floats = [
            ("width", layout.width),
            ("height", layout.height),
            ("road_width", layout.road_width),
            ("stop_buffer", layout.stop_buffer),
            ("safe_distance", layout.safe_distance),
            ("vehicle_width", layout.vehicle_width),
            ("vehicle_height", layout.vehicle_height),
            ("despawn_margin", layout.despawn_margin),
            ("lane_offset", layout.lane_offset),
            ("spawn_distance", layout.spawn_distance),
            ("acceleration", vehicles.acceleration),
            ("brake_step", vehicles.brake_step),
            ("min_speed_cap", vehicles.min_speed_cap),
            ("max_speed_cap", vehicles.max_speed_cap),
        ];
        for (name, value) in floats {
            ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
        }

        ensure!(
            layout.width > 0.0 && layout.height > 0.0,
            "Visible area must be positive, got {}x{}",
            layout.width,
            layout.height
        );
        ensure!(
            layout.road_width > 0.0,
            "Road width must be positive, got {}",
            layout.road_width
        );
        ensure!(
            layout.vehicle_width > 0.0 && layout.vehicle_height > 0.0,
            "Vehicle size must be positive"
        );
        ensure!(
            layout.safe_distance >= 0.0 && layout.stop_buffer >= 0.0,
            "Safe distance and stop buffer cannot be negative"
        );
        ensure!(
            layout.lane_offset >= 0.0 && layout.spawn_distance >= 0.0,
            "Lane offset and spawn distance cannot be negative"
        );
        ensure!(
            layout.lane_offset < layout.half_road(),
            "Lane offset {} puts vehicles off the road",
            layout.lane_offset
        );
        // Spawn points must lie inside the despawn bounds
        ensure!(
            layout.despawn_margin > layout.spawn_distance,
            "Despawn margin {} must exceed spawn distance {}",
            layout.despawn_margin,
            layout.spawn_distance
        );

        ensure!(
            vehicles.acceleration > 0.0 && vehicles.brake_step > 0.0,
            "Acceleration and brake step must be positive"
        );
        if !(vehicles.min_speed_cap > 0.0 && vehicles.min_speed_cap < vehicles.max_speed_cap) {
            bail!(
                "Speed cap range {}..{} is empty or not positive",
                vehicles.min_speed_cap,
                vehicles.max_speed_cap
            );
        }

        ensure!(self.spawn_interval > 0, "Spawn interval must be at least 1 tick");
        ensure!(
            (0.0..=1.0).contains(&self.emergency_chance),
            "Emergency chance must be within [0, 1], got {}",
            self.emergency_chance
        );
        Ok(())
    }
}
