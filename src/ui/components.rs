//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{Direction, IntersectionLayout, LightColor, Position, SimWorld, VehicleId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Signal lamp facing one approach
#[derive(Component)]
pub struct SignalLamp(pub Direction);

/// Flashing light on top of an emergency vehicle
#[derive(Component)]
pub struct EmergencyBeacon;

/// Marker for the vehicle counter text
#[derive(Component)]
pub struct VehicleCountText;

/// Sprite entity of each live simulation vehicle
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub vehicles: HashMap<VehicleId, Entity>,
}

pub const BACKGROUND_COLOR: Color = Color::srgb(60.0 / 255.0, 60.0 / 255.0, 60.0 / 255.0);
pub const ROAD_COLOR: Color = Color::srgb(40.0 / 255.0, 40.0 / 255.0, 40.0 / 255.0);
pub const POLE_COLOR: Color = Color::srgb(80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0);
pub const VEHICLE_COLOR: Color = Color::WHITE;
pub const EMERGENCY_COLOR: Color = Color::srgb(0.0, 120.0 / 255.0, 1.0);
pub const BEACON_COLOR: Color = Color::srgb(1.0, 200.0 / 255.0, 0.0);

pub fn light_color(light: LightColor) -> Color {
    match light {
        LightColor::Red => Color::srgb(200.0 / 255.0, 0.0, 0.0),
        LightColor::Yellow => Color::srgb(1.0, 200.0 / 255.0, 0.0),
        LightColor::Green => Color::srgb(0.0, 200.0 / 255.0, 0.0),
    }
}

/// Convert simulation screen coordinates (origin top-left, +y down) to
/// Bevy world coordinates (origin at the window center, +y up)
pub fn to_world(position: Position, layout: &IntersectionLayout) -> Vec2 {
    Vec2::new(
        position.x - layout.width / 2.0,
        layout.height / 2.0 - position.y,
    )
}
