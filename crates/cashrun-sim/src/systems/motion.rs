//! Cosmetic motion: pickup bobbing, camera head bob and billboards.

use glam::Vec3;
use hecs::World;

use cashrun_core::types::Transform;

use crate::components::{Billboard, HeadBob, PingPongMovement};

/// Move every ping-pong entity along its current leg.
pub fn run_ping_pong(world: &mut World, dt: f32) {
    for (_entity, (mover, transform)) in
        world.query_mut::<(&mut PingPongMovement, &mut Transform)>()
    {
        step_ping_pong(mover, &mut transform.position, dt);
    }
}

/// Advance one step, stopping exactly at the end of the leg and reversing.
pub fn step_ping_pong(mover: &mut PingPongMovement, position: &mut Vec3, dt: f32) {
    let remaining = (mover.travel_distance - mover.travelled).max(0.0);
    let step = mover.speed * dt;
    if step >= remaining {
        *position += mover.direction * remaining;
        mover.travelled = 0.0;
        mover.direction = -mover.direction;
    } else {
        *position += mover.direction * step;
        mover.travelled += step;
    }
}

/// Bob every camera while input is allowed.
pub fn run_head_bob(world: &mut World, input_allowed: bool, movement: f32, dt: f32) {
    if !input_allowed {
        return;
    }
    for (_entity, bob) in world.query_mut::<&mut HeadBob>() {
        step_head_bob(bob, movement, dt);
    }
}

pub fn step_head_bob(bob: &mut HeadBob, movement: f32, dt: f32) {
    if movement > 0.0 {
        bob.elapsed += dt;
    } else {
        bob.elapsed = 0.0;
    }
    bob.camera_y = bob.neutral_y + (bob.elapsed * bob.frequency).sin() * bob.strength * movement;
}

/// Combined magnitude of the two movement axes, clamped to [0, 1].
pub fn movement_magnitude(horizontal: f32, vertical: f32) -> f32 {
    (horizontal.abs() + vertical.abs()).clamp(0.0, 1.0)
}

/// Turn every billboard toward `camera` around the vertical axis.
pub fn run_billboards(world: &mut World, camera: Vec3) {
    for (_entity, (billboard, transform)) in world.query_mut::<(&mut Billboard, &Transform)>() {
        billboard.yaw = billboard_yaw(transform.position, camera);
    }
}

/// Yaw (radians) that points a sprite's facing away from the camera, so
/// its front is what the camera sees. Vertical offset is ignored.
pub fn billboard_yaw(sprite: Vec3, camera: Vec3) -> f32 {
    let dx = sprite.x - camera.x;
    let dz = sprite.z - camera.z;
    if dx * dx + dz * dz < f32::EPSILON {
        return 0.0;
    }
    dx.atan2(dz)
}
