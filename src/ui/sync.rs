//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    light_color, to_world, EmergencyBeacon, EntityMappings, SignalLamp, SimWorldResource,
    VehicleCountText, VehicleLink, BEACON_COLOR, EMERGENCY_COLOR, VEHICLE_COLOR,
};
use crate::simulation::{IntersectionLayout, Position, SignalView, VehicleView};

/// Darkening applied to the top half of each vehicle
const SHADE: f32 = 30.0 / 255.0;

/// System to run simulation tick
pub fn tick_simulation(mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick();
}

/// Center of a vehicle's footprint in Bevy coordinates
fn vehicle_translation(view: &VehicleView, layout: &IntersectionLayout) -> Vec3 {
    let middle = Position::new(
        view.position.x + view.width / 2.0,
        view.position.y + view.height / 2.0,
    );
    to_world(middle, layout).extend(3.0)
}

fn shaded(color: Color) -> Color {
    let srgba = color.to_srgba();
    Color::srgb(
        (srgba.red - SHADE).max(0.0),
        (srgba.green - SHADE).max(0.0),
        (srgba.blue - SHADE).max(0.0),
    )
}

/// System to sync vehicle visuals from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut transforms: Query<&mut Transform, With<VehicleLink>>,
) {
    let world = &sim_world.0;
    let layout = *world.layout();

    // Vehicle left the area, despawn its sprite
    mappings.vehicles.retain(|id, entity| {
        let alive = world.vehicle(*id).is_some();
        if !alive {
            commands.entity(*entity).despawn();
        }
        alive
    });

    for vehicle in world.vehicles() {
        let view = VehicleView::new(vehicle, &layout);
        if let Some(&entity) = mappings.vehicles.get(&view.id) {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation = vehicle_translation(&view, &layout);
            }
            continue;
        }

        let color = if view.is_emergency {
            EMERGENCY_COLOR
        } else {
            VEHICLE_COLOR
        };

        let entity = commands
            .spawn((
                VehicleLink(view.id),
                Sprite::from_color(color, Vec2::new(view.width, view.height)),
                Transform::from_translation(vehicle_translation(&view, &layout)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite::from_color(shaded(color), Vec2::new(view.width, view.height / 2.0)),
                    Transform::from_xyz(0.0, view.height / 4.0, 0.1),
                ));
                if view.is_emergency {
                    parent.spawn((
                        EmergencyBeacon,
                        Sprite::from_color(BEACON_COLOR, Vec2::splat(10.0)),
                        Transform::from_xyz(10.0 - view.width / 2.0, 0.0, 0.2),
                        Visibility::Inherited,
                    ));
                }
            })
            .id();
        mappings.vehicles.insert(view.id, entity);
    }
}

/// System to color the signal lamps from the controller state
pub fn update_signal_lamps(
    sim_world: Res<SimWorldResource>,
    lamp_query: Query<(&SignalLamp, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let view = SignalView::new(sim_world.0.signal());
    for (lamp, material_handle) in lamp_query.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.color = light_color(view.light(lamp.0));
        }
    }
}

/// System to blink emergency beacons
pub fn flash_beacons(
    time: Res<Time>,
    mut beacon_query: Query<&mut Visibility, With<EmergencyBeacon>>,
) {
    let lit = time.elapsed().as_millis() % 300 < 150;
    for mut visibility in beacon_query.iter_mut() {
        *visibility = if lit {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// System to update the vehicle counter
pub fn update_vehicle_count_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<&mut Text, With<VehicleCountText>>,
) {
    for mut text in text_query.iter_mut() {
        **text = format!("Vehicles: {}", sim_world.0.vehicle_count());
    }
}
