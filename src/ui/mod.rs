//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld` and renders it as a 2D top-down scene.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, SimWorldResource};

use crate::simulation::{SimConfig, SimWorld};
use components::BACKGROUND_COLOR;
use input::handle_input;
use sync::{
    flash_beacons, sync_vehicles, tick_simulation, update_signal_lamps,
    update_vehicle_count_text,
};
use world::setup_world;

/// Simulation ticks per second
const TICK_RATE_HZ: f64 = 60.0;

/// Plugin to register all UI systems
pub struct IntersectionUIPlugin {
    pub config: SimConfig,
}

impl Plugin for IntersectionUIPlugin {
    fn build(&self, app: &mut App) {
        let world = match SimWorld::from_config(self.config.clone()) {
            Ok(world) => world,
            Err(e) => {
                error!("Falling back to default simulation: {:#}", e);
                SimWorld::new()
            }
        };

        app.insert_resource(SimWorldResource(world))
            .init_resource::<EntityMappings>()
            .insert_resource(ClearColor(BACKGROUND_COLOR))
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_systems(Startup, setup_world)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    sync_vehicles,
                    update_signal_lamps,
                    flash_beacons,
                    update_vehicle_count_text,
                    handle_input,
                ),
            );
    }
}
