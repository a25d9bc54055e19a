//! World setup systems for camera, roads, signal lamps and the status text

use bevy::prelude::*;

use super::components::{
    light_color, to_world, SignalLamp, SimWorldResource, VehicleCountText, POLE_COLOR, ROAD_COLOR,
};
use crate::simulation::{Direction, IntersectionLayout, LightColor, Position};

const LAMP_RADIUS: f32 = 15.0;
const LAMP_OFFSET: f32 = 30.0;
const POLE_THICKNESS: f32 = 10.0;
const POLE_LENGTH: f32 = 60.0;

/// Where the lamp for `direction` sits, in simulation coordinates
fn lamp_position(direction: Direction, layout: &IntersectionLayout) -> Position {
    let center = layout.center();
    let half_road = layout.half_road();
    match direction {
        Direction::North => Position::new(center.x - half_road + 45.0, center.y - LAMP_OFFSET),
        Direction::South => Position::new(center.x + half_road - 45.0, center.y + LAMP_OFFSET),
        Direction::East => Position::new(center.x + LAMP_OFFSET, center.y - half_road + 45.0),
        Direction::West => Position::new(center.x - LAMP_OFFSET, center.y + half_road - 45.0),
    }
}

/// System to setup the scene (camera, roads, poles, lamps, text)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim_world: Res<SimWorldResource>,
) {
    let layout = *sim_world.0.layout();
    let center = to_world(layout.center(), &layout);

    commands.spawn(Camera2d);

    // Roads
    commands.spawn((
        Sprite::from_color(ROAD_COLOR, Vec2::new(layout.road_width, layout.height)),
        Transform::from_xyz(center.x, 0.0, 0.0),
    ));
    commands.spawn((
        Sprite::from_color(ROAD_COLOR, Vec2::new(layout.width, layout.road_width)),
        Transform::from_xyz(0.0, center.y, 0.0),
    ));

    // Poles, one per corner of the box
    let half_road = layout.half_road();
    let c = layout.center();
    let upright = Vec2::new(POLE_THICKNESS, POLE_LENGTH);
    let flat = Vec2::new(POLE_LENGTH, POLE_THICKNESS);
    let poles = [
        (Position::new(c.x - half_road + 40.0, c.y - half_road + 20.0), upright),
        (Position::new(c.x + half_road - 50.0, c.y + half_road - 80.0), upright),
        (Position::new(c.x + half_road - 80.0, c.y - half_road + 40.0), flat),
        (Position::new(c.x - half_road + 20.0, c.y + half_road - 50.0), flat),
    ];
    for (corner, size) in poles {
        // Sprites are centered; the corner is the top-left of the rectangle
        let middle = Position::new(corner.x + size.x / 2.0, corner.y + size.y / 2.0);
        commands.spawn((
            Sprite::from_color(POLE_COLOR, size),
            Transform::from_translation(to_world(middle, &layout).extend(1.0)),
        ));
    }

    for direction in Direction::ALL {
        let position = to_world(lamp_position(direction, &layout), &layout);
        commands.spawn((
            SignalLamp(direction),
            Mesh2d(meshes.add(Circle::new(LAMP_RADIUS))),
            MeshMaterial2d(materials.add(light_color(LightColor::Red))),
            Transform::from_translation(position.extend(2.0)),
        ));
    }

    commands.spawn((
        VehicleCountText,
        Text::new("Vehicles: 0"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(20.0),
            ..default()
        },
    ));
}
