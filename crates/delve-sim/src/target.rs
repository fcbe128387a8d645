use delve_chunk::Face;
use delve_geom::Vec3;
use delve_world::GridWorld;

use crate::entity::Entity;

/// Chunk radius searched for targetable faces around the viewer.
const TARGET_RADIUS: i32 = 1;

/// A face the view ray hits, with the ray parameter at entry.
#[derive(Clone, Copy, Debug)]
pub struct Target {
    pub face: Face,
    pub enter_t: f32,
}

impl Target {
    /// Block position behind the face (the solid block).
    pub fn block(&self) -> (i32, i32, i32) {
        (
            self.face.block_pos.x as i32,
            self.face.block_pos.y as i32,
            self.face.block_pos.z as i32,
        )
    }

    /// Block position in front of the face, where a placement lands.
    pub fn adjacent(&self) -> (i32, i32, i32) {
        let d = self.face.dir.delta();
        let (bx, by, bz) = self.block();
        (bx + d.0, by + d.1, bz + d.2)
    }
}

/// Casts the entity's view ray against the cached face colliders of nearby
/// chunks and returns the closest hit within `max_dist`. Candidates are
/// ranked by the distance from the entity position to the face collider's
/// max corner rather than to the ray hit point; this biases ties toward the
/// nearer block and is long-standing behavior that block placement expects.
pub fn target_face(world: &GridWorld, e: &Entity, max_dist: f32) -> Option<Target> {
    let origin = e.eye_pos();
    let dir = e.facing();
    let mut best: Option<(f32, Target)> = None;
    for chunk in world
        .chunks_near(e.pos.x, e.pos.z, TARGET_RADIUS)
        .flatten()
    {
        for face in &chunk.faces {
            let Some(t) = face.hitbox.ray_enter(origin, dir) else {
                continue;
            };
            if t > max_dist {
                continue;
            }
            let rank = (face.hitbox.max - e.pos).length();
            if best.as_ref().is_none_or(|(r, _)| rank < *r) {
                best = Some((rank, Target { face: *face, enter_t: t }));
            }
        }
    }
    best.map(|(_, target)| target)
}

/// Point where the view ray enters the targeted face collider.
pub fn hit_point(e: &Entity, target: &Target) -> Vec3 {
    e.eye_pos() + e.facing() * target.enter_t
}
