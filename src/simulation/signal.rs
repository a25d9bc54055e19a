//! Signal controller for the intersection
//!
//! Standalone implementation that doesn't depend on Bevy.

use log::{debug, info};

use super::config::SignalTiming;
use super::types::{Direction, LightColor, Position, SignalPhase};
use super::vehicle::Vehicle;

/// Number of vehicles per direction, indexed in [`Direction::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionCounts([usize; 4]);

impl DirectionCounts {
    pub fn get(&self, direction: Direction) -> usize {
        self.0[direction.index()]
    }

    fn increment(&mut self, direction: Direction) {
        self.0[direction.index()] += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Direction with the highest count; the first one in enumeration order
    /// wins a tie, so an all-zero table yields North
    pub fn busiest(&self) -> (Direction, usize) {
        let mut best = (Direction::North, self.get(Direction::North));
        for (direction, count) in self.iter() {
            if count > best.1 {
                best = (direction, count);
            }
        }
        best
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// What happened during a single controller update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// Normal timing advanced, no transition
    Held,
    /// An emergency vehicle forced green for its direction; `engaged` is set
    /// on the tick the lock starts or moves to another direction
    Preempted { direction: Direction, engaged: bool },
    /// The emergency lock was released this tick
    PreemptionCleared,
    /// Green ran out for this direction
    Yellow(Direction),
    /// Yellow ran out and this direction was granted green
    Green(Direction),
}

/// Adaptive traffic signal guarding a single four-way intersection
#[derive(Debug, Clone)]
pub struct SignalController {
    center: Position,
    current: Direction,
    phase: SignalPhase,
    /// Ticks spent in the current phase
    timer: u32,
    timing: SignalTiming,
    green_duration: u32,
    emergency_lock: bool,
}

impl SignalController {
    pub fn new(center: Position, timing: SignalTiming) -> Self {
        Self {
            center,
            current: Direction::North,
            phase: SignalPhase::Green,
            timer: 0,
            timing,
            green_duration: timing.green_base,
            emergency_lock: false,
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn phase(&self) -> SignalPhase {
        self.phase
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn green_duration_base(&self) -> u32 {
        self.timing.green_base
    }

    pub fn green_duration(&self) -> u32 {
        self.green_duration
    }

    pub fn yellow_duration(&self) -> u32 {
        self.timing.yellow
    }

    pub fn emergency_lock(&self) -> bool {
        self.emergency_lock
    }

    /// Color currently shown to `direction`; everything but `current` is red
    pub fn light(&self, direction: Direction) -> LightColor {
        if direction != self.current {
            return LightColor::Red;
        }
        match self.phase {
            SignalPhase::Green => LightColor::Green,
            SignalPhase::Yellow => LightColor::Yellow,
        }
    }

    /// Count waiting vehicles per direction
    ///
    /// Crossed vehicles and emergency vehicles are not counted.
    pub fn congestion(&self, vehicles: &[Vehicle]) -> DirectionCounts {
        let mut counts = DirectionCounts::default();
        for vehicle in vehicles {
            if !vehicle.crossed() && !vehicle.is_emergency() {
                counts.increment(vehicle.direction());
            }
        }
        counts
    }

    /// Pick the most congested direction and size its green accordingly
    pub fn choose_next(&mut self, vehicles: &[Vehicle]) -> Direction {
        let (direction, count) = self.congestion(vehicles).busiest();
        self.green_duration = self.timing.green_base + self.timing.green_per_vehicle * count as u32;
        direction
    }

    /// Advance the signal by one tick
    ///
    /// This is the only method that mutates signal state.
    pub fn update(&mut self, vehicles: &[Vehicle]) -> SignalEvent {
        // Emergency override: the first uncrossed emergency vehicle wins
        if let Some(ambulance) = vehicles.iter().find(|v| v.is_emergency() && !v.crossed()) {
            let direction = ambulance.direction();
            let engaged = !self.emergency_lock || self.current != direction;
            if engaged {
                info!(
                    "Emergency vehicle {:?} preempting signal for {}",
                    ambulance.id().0,
                    direction
                );
            }
            self.current = direction;
            self.phase = SignalPhase::Green;
            self.timer = 0;
            self.emergency_lock = true;
            return SignalEvent::Preempted { direction, engaged };
        }

        let mut event = SignalEvent::Held;
        if self.emergency_lock {
            self.emergency_lock = false;
            info!("Emergency preemption released, {} keeps green", self.current);
            event = SignalEvent::PreemptionCleared;
        }

        self.timer += 1;
        match self.phase {
            SignalPhase::Green if self.timer > self.green_duration => {
                self.phase = SignalPhase::Yellow;
                self.timer = 0;
                debug!("{} turns yellow", self.current);
                event = SignalEvent::Yellow(self.current);
            }
            SignalPhase::Yellow if self.timer > self.timing.yellow => {
                self.current = self.choose_next(vehicles);
                self.phase = SignalPhase::Green;
                self.timer = 0;
                debug!(
                    "{} turns green for {} ticks",
                    self.current, self.green_duration
                );
                event = SignalEvent::Green(self.current);
            }
            _ => {}
        }
        event
    }
}
