//! Vehicle spawning for the intersection simulation
//!
//! The policy only decides *when* to spawn; the world rolls the direction,
//! emergency flag and speed cap from its RNG.

use super::types::Direction;

/// How a single tick should treat spawning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnDecision {
    /// Let the spawn policy decide
    Policy,
    /// Spawn nothing this tick (the policy counter does not advance)
    Skip,
    /// Spawn exactly this vehicle
    Spawn {
        direction: Direction,
        is_emergency: bool,
    },
}

/// Fixed-interval spawn timer
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    interval: u32,
    counter: u32,
}

impl SpawnPolicy {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            counter: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Ticks accumulated since the last spawn
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Advance the counter by one tick; returns true when a vehicle is due
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.interval {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}
