//! Vehicle movement logic for the intersection simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use anyhow::{ensure, Result};

use super::config::{IntersectionLayout, VehicleParams};
use super::signal::SignalController;
use super::types::{Direction, Position, SignalPhase, VehicleId};

/// A vehicle approaching, crossing or leaving the intersection
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    direction: Direction,
    is_emergency: bool,
    position: Position,
    velocity: f32,
    /// Personal maximum speed
    speed_cap: f32,
    acceleration: f32,
    brake_step: f32,
    /// Leading edge has reached the near side of the box (never resets)
    in_intersection: bool,
    /// Leading edge has passed the far side of the box (never resets)
    crossed: bool,
}

impl Vehicle {
    /// Create a stationary vehicle at its direction's spawn point
    pub fn new(
        id: VehicleId,
        direction: Direction,
        is_emergency: bool,
        speed_cap: f32,
        params: &VehicleParams,
        layout: &IntersectionLayout,
    ) -> Result<Self> {
        ensure!(
            speed_cap.is_finite() && speed_cap > 0.0,
            "Vehicle {:?} has invalid speed cap {}",
            id.0,
            speed_cap
        );

        Ok(Self {
            id,
            direction,
            is_emergency,
            position: layout.spawn_point(direction),
            velocity: 0.0,
            speed_cap,
            acceleration: params.acceleration,
            brake_step: params.brake_step,
            in_intersection: false,
            crossed: false,
        })
    }

    /// Place the vehicle somewhere other than its spawn point
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_emergency(&self) -> bool {
        self.is_emergency
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn speed_cap(&self) -> f32 {
        self.speed_cap
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn in_intersection(&self) -> bool {
        self.in_intersection
    }

    pub fn crossed(&self) -> bool {
        self.crossed
    }

    /// Coordinate on the travel axis where this vehicle must halt on red or yellow
    pub fn stop_line(&self, layout: &IntersectionLayout) -> f32 {
        let center = layout.center();
        let offset = layout.half_road() + layout.stop_buffer;
        match self.direction {
            Direction::North => center.y - offset,
            Direction::South => center.y + offset,
            Direction::East => center.x + offset,
            Direction::West => center.x - offset,
        }
    }

    /// Whether the leading edge has reached `line` on the travel axis
    fn leading_edge_reached(&self, line: f32, layout: &IntersectionLayout) -> bool {
        match self.direction {
            Direction::North => self.position.y + layout.vehicle_height >= line,
            Direction::South => self.position.y <= line,
            Direction::East => self.position.x <= line,
            Direction::West => self.position.x + layout.vehicle_width >= line,
        }
    }

    /// Decide whether this vehicle has to brake this tick
    ///
    /// `vehicles` is the population as it was before any vehicle moved this tick.
    pub fn should_stop(
        &self,
        vehicles: &[Vehicle],
        signal: &SignalController,
        layout: &IntersectionLayout,
    ) -> bool {
        if self.is_emergency {
            return false;
        }

        // Hold at the stop line unless we own a green; never halt mid-box
        if !self.in_intersection && self.leading_edge_reached(self.stop_line(layout), layout) {
            let has_right_of_way =
                self.direction == signal.current() && signal.phase() == SignalPhase::Green;
            if !has_right_of_way {
                return true;
            }
        }

        // Keep distance to the vehicle ahead on the same axis
        let lateral_band = layout.road_width / 4.0;
        vehicles.iter().any(|other| {
            if other.id == self.id || other.in_intersection {
                return false;
            }
            if !self.direction.same_axis(other.direction) {
                return false;
            }
            let dx = other.position.x - self.position.x;
            let dy = other.position.y - self.position.y;
            let (gap, lateral) = match self.direction {
                Direction::North => (dy, dx),
                Direction::South => (-dy, dx),
                Direction::East => (-dx, dy),
                Direction::West => (dx, dy),
            };
            gap > 0.0 && gap < layout.safe_distance && lateral.abs() < lateral_band
        })
    }

    /// Accelerate toward the speed cap and advance along the travel axis
    pub fn move_forward(&mut self, layout: &IntersectionLayout) {
        self.velocity = (self.velocity + self.acceleration).min(self.speed_cap);

        let center = layout.center();
        let half_road = layout.half_road();

        if !self.in_intersection {
            let near_edge = match self.direction {
                Direction::North => center.y - half_road,
                Direction::South => center.y + half_road,
                Direction::East => center.x + half_road,
                Direction::West => center.x - half_road,
            };
            if self.leading_edge_reached(near_edge, layout) {
                self.in_intersection = true;
            }
        }

        match self.direction {
            Direction::North => self.position.y += self.velocity,
            Direction::South => self.position.y -= self.velocity,
            Direction::East => self.position.x -= self.velocity,
            Direction::West => self.position.x += self.velocity,
        }

        let past_far_edge = match self.direction {
            Direction::North => self.position.y >= center.y + half_road,
            Direction::South => self.position.y <= center.y - half_road,
            Direction::East => self.position.x <= center.x - half_road,
            Direction::West => self.position.x >= center.x + half_road,
        };
        if past_far_edge {
            self.crossed = true;
        }
    }

    /// Ease off toward a standstill without moving
    pub fn brake(&mut self) {
        self.velocity = (self.velocity - self.brake_step).max(0.0);
    }

    /// Per-tick update: brake if required, otherwise drive on
    pub fn update(
        &mut self,
        vehicles: &[Vehicle],
        signal: &SignalController,
        layout: &IntersectionLayout,
    ) {
        if self.should_stop(vehicles, signal, layout) {
            self.brake();
        } else {
            self.move_forward(layout);
        }
    }
}
