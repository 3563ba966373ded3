//! Movement domain: sandbox level for trying out movement tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

#[derive(Debug, Clone, Copy)]
enum BlockKind {
    Floor,
    Ledge,
    Wall,
}

/// (kind, center, size)
const SANDBOX: &[(BlockKind, Vec2, Vec2)] = &[
    (BlockKind::Floor, Vec2::new(0.0, -200.0), Vec2::new(800.0, 40.0)),
    (BlockKind::Wall, Vec2::new(-420.0, 50.0), Vec2::new(40.0, 500.0)),
    (BlockKind::Wall, Vec2::new(420.0, 50.0), Vec2::new(40.0, 500.0)),
    // Knee-high steps to run into mid-air and get snapped over
    (BlockKind::Ledge, Vec2::new(-250.0, -50.0), Vec2::new(150.0, 20.0)),
    (BlockKind::Ledge, Vec2::new(250.0, 50.0), Vec2::new(150.0, 20.0)),
    (BlockKind::Ledge, Vec2::new(0.0, 150.0), Vec2::new(120.0, 20.0)),
    (BlockKind::Ledge, Vec2::new(150.0, -176.0), Vec2::new(80.0, 8.0)),
    // Tall pillar for testing full-wall stops
    (BlockKind::Wall, Vec2::new(-100.0, -80.0), Vec2::new(30.0, 200.0)),
];

pub(crate) fn spawn_test_room(mut commands: Commands) {
    for &(kind, center, size) in SANDBOX {
        let (color, layer) = match kind {
            BlockKind::Floor => (Color::srgb(0.4, 0.5, 0.4), GameLayer::Ground),
            BlockKind::Ledge => (Color::srgb(0.5, 0.4, 0.3), GameLayer::Ground),
            BlockKind::Wall => (Color::srgb(0.3, 0.3, 0.4), GameLayer::Wall),
        };

        let mut block = commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(layer, [GameLayer::Player]),
        ));

        match layer {
            GameLayer::Wall => block.insert(Wall),
            _ => block.insert(Ground),
        };
    }

    debug!("Spawned sandbox with {} blocks", SANDBOX.len());
}
