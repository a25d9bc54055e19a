//! Core types for the intersection simulation
//!
//! These are standalone types that don't depend on Bevy.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// The approach a vehicle enters from
///
/// The declaration order (North, East, South, West) is the tie-break order
/// used by the signal controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Enters from the top edge, travels down (+y)
    North,
    /// Enters from the right edge, travels left (-x)
    East,
    /// Enters from the bottom edge, travels up (-y)
    South,
    /// Enters from the left edge, travels right (+x)
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position of this direction in [`Direction::ALL`]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// True for the North/South axis, false for East/West
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Whether two directions share a travel axis (same or opposite approaches)
    pub fn same_axis(self, other: Direction) -> bool {
        self.is_vertical() == other.is_vertical()
    }

    /// Single-letter label used by the console output
    pub fn short_name(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "e" | "east" => Ok(Direction::East),
            "s" | "south" => Ok(Direction::South),
            "w" | "west" => Ok(Direction::West),
            other => bail!("Unknown direction '{}'", other),
        }
    }
}

/// Phase of the direction that currently holds right-of-way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalPhase {
    Green,
    Yellow,
}

/// Color shown to a single approach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

/// A 2D position in screen coordinates (origin top-left, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visible area width in world units
pub const WINDOW_WIDTH: f32 = 1200.0;

/// Visible area height in world units
pub const WINDOW_HEIGHT: f32 = 900.0;

/// Width of each road through the intersection
pub const ROAD_WIDTH: f32 = 200.0;

/// Minimum longitudinal gap kept between same-axis vehicles
pub const SAFE_DISTANCE: f32 = 50.0;

/// Distance from the intersection edge to the stop line
pub const STOP_BUFFER: f32 = 50.0;

/// Vehicle footprint
pub const VEHICLE_WIDTH: f32 = 40.0;
pub const VEHICLE_HEIGHT: f32 = 20.0;

/// Vehicles are removed once they are this far outside the visible area
pub const DESPAWN_MARGIN: f32 = 200.0;

/// Velocity gained per tick while moving
pub const ACCELERATION: f32 = 0.05;

/// Velocity lost per tick while stopping
pub const BRAKE_STEP: f32 = 0.1;

/// Range a vehicle's personal speed cap is drawn from
pub const MIN_SPEED_CAP: f32 = 2.0;
pub const MAX_SPEED_CAP: f32 = 3.0;

/// Offset of a spawn point from the intersection's center line
pub const LANE_OFFSET: f32 = 40.0;

/// How far outside the visible area vehicles appear
pub const SPAWN_DISTANCE: f32 = 60.0;
