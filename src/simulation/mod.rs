//! Standalone intersection simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod config;
mod render;
mod signal;
mod spawner;
mod stats;
mod types;
mod vehicle;
mod world;

pub use config::{
    IntersectionLayout, SignalTiming, SimConfig, VehicleParams, EMERGENCY_CHANCE,
    GREEN_DURATION_BASE, GREEN_TICKS_PER_VEHICLE, SPAWN_INTERVAL, YELLOW_DURATION,
};
pub use render::{AsciiMap, SceneRenderer, SignalView, VehicleView};
pub use signal::{DirectionCounts, SignalController, SignalEvent};
pub use spawner::{SpawnDecision, SpawnPolicy};
pub use stats::SimStats;
pub use types::{
    Direction, LightColor, Position, SignalPhase, VehicleId, ACCELERATION, BRAKE_STEP,
    DESPAWN_MARGIN, LANE_OFFSET, MAX_SPEED_CAP, MIN_SPEED_CAP, ROAD_WIDTH, SAFE_DISTANCE,
    SPAWN_DISTANCE, STOP_BUFFER, VEHICLE_HEIGHT, VEHICLE_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH,
};
pub use vehicle::Vehicle;
pub use world::SimWorld;
