use delve_blocks::BlockRegistry;
use delve_chunk::FaceDir;
use delve_geom::{Aabb, Vec3};
use delve_world::GridWorld;

use crate::entity::Entity;

/// Downward acceleration, world units per second squared.
pub const GRAVITY: f32 = -25.0;
/// Impulse velocity is divided by this every tick.
pub const DYNAMIC_DECAY: f32 = 1.25;
/// Fastest allowed per-tick fall displacement. Kept well under one block so
/// a falling hitbox cannot step over a face collider between ticks.
pub const TERMINAL_FALL: f32 = -0.6;
/// Radius, in chunks, of the collider window fetched around an entity.
pub const COLLIDER_RADIUS: i32 = 1;

/// Advances one entity by one tick: integrate velocities, resolve collisions
/// against nearby face colliders, apply the surviving displacement.
pub fn step_entity(world: &GridWorld, reg: &BlockRegistry, e: &mut Entity, dt: f32) {
    integrate(e, dt);
    let mut vel = e.dynamic_vel + e.fixed_vel;
    if !standing_fast_path(world, reg, e, &mut vel) {
        resolve_collisions(world, e, &mut vel);
    }
    e.pos += vel;
    e.refresh_hitbox();
}

/// Damps impulses and applies gravity to the dynamic component. Velocities
/// are per-tick displacements, so gravity contributes `g * dt` of velocity,
/// scaled by `dt` once more on application.
fn integrate(e: &mut Entity, dt: f32) {
    e.dynamic_vel = e.dynamic_vel / DYNAMIC_DECAY;
    if !e.flying {
        e.dynamic_vel.y += GRAVITY * dt * dt;
        if e.dynamic_vel.y < TERMINAL_FALL {
            e.dynamic_vel.y = TERMINAL_FALL;
        }
    }
}

/// Resting on a known solid block: zero vertical motion and skip the face
/// scan. Only taken while the entity is horizontally still; any lateral
/// motion needs the full scan so walls next to the standing block still
/// block it.
fn standing_fast_path(
    world: &GridWorld,
    reg: &BlockRegistry,
    e: &mut Entity,
    vel: &mut Vec3,
) -> bool {
    if vel.x != 0.0 || vel.z != 0.0 {
        return false;
    }
    let Some((bx, by, bz)) = e.standing_on else {
        return false;
    };
    if !reg.is_solid(world.block_at(bx, by, bz)) {
        // Block was broken out from under us.
        e.standing_on = None;
        return false;
    }
    let collider = Aabb::unit_cube(bx, by, bz);
    if vel.y <= 0.0 && e.hitbox.translated(*vel).intersects(collider) {
        vel.y = 0.0;
        e.dynamic_vel.y = 0.0;
        return true;
    }
    false
}

/// Per-axis collision response against the cached face colliders of nearby
/// chunks. Only newly entered overlaps count: a face already overlapped by
/// the current hitbox never re-zeroes velocity, and a component is zeroed
/// only while the entity is still strictly on the outside of that face along
/// its travel direction, so grazing past a boundary cannot stick.
fn resolve_collisions(world: &GridWorld, e: &mut Entity, vel: &mut Vec3) {
    let predicted = e.hitbox.translated(*vel);
    let mut landed: Option<(i32, i32, i32)> = None;
    for chunk in world
        .chunks_near(e.pos.x, e.pos.z, COLLIDER_RADIUS)
        .flatten()
    {
        for face in &chunk.faces {
            if !predicted.intersects(face.hitbox) || e.hitbox.intersects(face.hitbox) {
                continue;
            }
            match face.dir {
                FaceDir::PosY => {
                    if vel.y < 0.0 && e.hitbox.min.y >= face.hitbox.max.y {
                        vel.y = 0.0;
                        e.dynamic_vel.y = 0.0;
                        landed = Some((
                            face.block_pos.x as i32,
                            face.block_pos.y as i32,
                            face.block_pos.z as i32,
                        ));
                    }
                }
                FaceDir::NegY => {
                    if vel.y > 0.0 && e.hitbox.max.y <= face.hitbox.min.y {
                        vel.y = 0.0;
                        e.dynamic_vel.y = 0.0;
                    }
                }
                FaceDir::PosX => {
                    if vel.x < 0.0 && e.hitbox.min.x >= face.hitbox.max.x {
                        vel.x = 0.0;
                    }
                }
                FaceDir::NegX => {
                    if vel.x > 0.0 && e.hitbox.max.x <= face.hitbox.min.x {
                        vel.x = 0.0;
                    }
                }
                FaceDir::PosZ => {
                    if vel.z < 0.0 && e.hitbox.min.z >= face.hitbox.max.z {
                        vel.z = 0.0;
                    }
                }
                FaceDir::NegZ => {
                    if vel.z > 0.0 && e.hitbox.max.z <= face.hitbox.min.z {
                        vel.z = 0.0;
                    }
                }
            }
        }
    }
    if let Some(block) = landed {
        e.standing_on = Some(block);
    }
}
