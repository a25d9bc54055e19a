//! Read-only views of the simulation for renderers
//!
//! Renderers receive these views through [`SceneRenderer`] and never touch
//! simulation state directly.

use super::config::IntersectionLayout;
use super::signal::SignalController;
use super::types::{Direction, LightColor, Position, SignalPhase, VehicleId};
use super::vehicle::Vehicle;

/// Everything needed to draw one vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleView {
    pub id: VehicleId,
    /// Top-left corner of the footprint
    pub position: Position,
    pub direction: Direction,
    pub is_emergency: bool,
    pub width: f32,
    pub height: f32,
}

impl VehicleView {
    pub fn new(vehicle: &Vehicle, layout: &IntersectionLayout) -> Self {
        Self {
            id: vehicle.id(),
            position: vehicle.position(),
            direction: vehicle.direction(),
            is_emergency: vehicle.is_emergency(),
            width: layout.vehicle_width,
            height: layout.vehicle_height,
        }
    }
}

/// Everything needed to draw the signal heads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalView {
    pub center: Position,
    pub current: Direction,
    pub phase: SignalPhase,
    /// One entry per direction, in [`Direction::ALL`] order
    pub lights: [(Direction, LightColor); 4],
}

impl SignalView {
    pub fn new(signal: &SignalController) -> Self {
        Self {
            center: signal.center(),
            current: signal.current(),
            phase: signal.phase(),
            lights: Direction::ALL.map(|d| (d, signal.light(d))),
        }
    }

    pub fn light(&self, direction: Direction) -> LightColor {
        self.lights[direction.index()].1
    }
}

/// Callback contract a front end implements to draw a frame
pub trait SceneRenderer {
    fn draw_signal(&mut self, signal: &SignalView);
    fn draw_vehicle(&mut self, vehicle: &VehicleView);
    /// Diagnostic line, called once per frame after everything else
    fn draw_status(&mut self, vehicle_count: usize);
}

/// Terminal renderer that rasterizes the scene into a character grid
#[derive(Debug, Clone)]
pub struct AsciiMap {
    layout: IntersectionLayout,
    /// World units per character cell
    scale: f32,
    grid: Vec<Vec<char>>,
    status: String,
}

impl AsciiMap {
    pub fn new(layout: IntersectionLayout, scale: f32) -> Self {
        let scale = if scale > 0.0 { scale } else { 25.0 };
        let width = (layout.width / scale).ceil() as usize;
        // Terminal cells are roughly twice as tall as wide
        let height = (layout.height / (scale * 2.0)).ceil() as usize;
        let mut map = Self {
            layout,
            scale,
            grid: vec![vec![' '; width.max(1)]; height.max(1)],
            status: String::new(),
        };
        map.draw_roads();
        map
    }

    fn to_grid(&self, position: Position) -> Option<(usize, usize)> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let col = (position.x / self.scale) as usize;
        let row = (position.y / (self.scale * 2.0)) as usize;
        if row < self.grid.len() && col < self.grid[0].len() {
            Some((row, col))
        } else {
            None
        }
    }

    fn draw_roads(&mut self) {
        let center = self.layout.center();
        let half_road = self.layout.half_road();
        let rows = self.grid.len();
        let cols = self.grid[0].len();
        for row in 0..rows {
            for col in 0..cols {
                let x = (col as f32 + 0.5) * self.scale;
                let y = (row as f32 + 0.5) * self.scale * 2.0;
                let on_vertical = (x - center.x).abs() < half_road;
                let on_horizontal = (y - center.y).abs() < half_road;
                self.grid[row][col] = match (on_vertical, on_horizontal) {
                    (true, true) => '+',
                    (true, false) => '|',
                    (false, true) => '-',
                    (false, false) => ' ',
                };
            }
        }
    }

    /// Render the grid plus status line as text
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out.push_str(&self.status);
        out
    }
}

impl SceneRenderer for AsciiMap {
    fn draw_signal(&mut self, signal: &SignalView) {
        let half_road = self.layout.half_road();
        for (direction, color) in signal.lights {
            // Lamp sits at the near corner of each approach
            let near = half_road - 1.0;
            let (cx, cy) = (signal.center.x, signal.center.y);
            let lamp = match direction {
                Direction::North => Position::new(cx - half_road, cy - half_road),
                Direction::East => Position::new(cx + near, cy - half_road),
                Direction::South => Position::new(cx + near, cy + near),
                Direction::West => Position::new(cx - half_road, cy + near),
            };
            if let Some((row, col)) = self.to_grid(lamp) {
                self.grid[row][col] = match color {
                    LightColor::Red => 'R',
                    LightColor::Yellow => 'Y',
                    LightColor::Green => 'G',
                };
            }
        }
    }

    fn draw_vehicle(&mut self, vehicle: &VehicleView) {
        let middle = Position::new(
            vehicle.position.x + vehicle.width / 2.0,
            vehicle.position.y + vehicle.height / 2.0,
        );
        if let Some((row, col)) = self.to_grid(middle) {
            self.grid[row][col] = if vehicle.is_emergency {
                '!'
            } else {
                vehicle.direction.short_name().to_ascii_lowercase()
            };
        }
    }

    fn draw_status(&mut self, vehicle_count: usize) {
        self.status = format!("Vehicles: {}", vehicle_count);
    }
}
