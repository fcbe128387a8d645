use delve_blocks::{BlockId, BlockRegistry};
use delve_geom::Vec3;
use delve_light::LightEngine;
use delve_world::GridWorld;

use crate::entity::Entity;
use crate::target::Target;

/// Ticks a thrown bomb waits before detonating.
pub const BOMB_FUSE_TICKS: u32 = 40;
/// Blocks broken around a detonation, as a cube half-extent.
pub const EXPLOSION_RADIUS: i32 = 2;
/// Ticks an explosion entity lingers before despawning.
pub const EXPLOSION_LIFETIME_TICKS: u32 = 8;

/// What holding the item does when used; each variant carries its own effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Places its block into the cell in front of the targeted face.
    BlockItem(BlockId),
    /// Spawns a fused bomb entity at the hit point.
    Bomb,
}

/// Outcome of using an item, for the session to act on.
pub enum UseEffect {
    /// A block was written into the world.
    Placed { pos: (i32, i32, i32) },
    /// A new entity should join the simulation.
    Spawn(Entity),
    /// Nothing happened (no target, or the edit was refused).
    None,
}

impl ItemKind {
    /// Applies the item's use effect against the current target.
    pub fn use_on(
        self,
        world: &mut GridWorld,
        reg: &BlockRegistry,
        light: &mut LightEngine,
        target: Option<&Target>,
        hit_point: Option<Vec3>,
    ) -> UseEffect {
        match self {
            ItemKind::BlockItem(id) => {
                let Some(target) = target else {
                    return UseEffect::None;
                };
                let pos = target.adjacent();
                if delve_edit::apply_edit(world, reg, light, pos, id) {
                    UseEffect::Placed { pos }
                } else {
                    UseEffect::None
                }
            }
            ItemKind::Bomb => {
                let Some(at) = hit_point else {
                    return UseEffect::None;
                };
                UseEffect::Spawn(Entity::bomb(at, BOMB_FUSE_TICKS))
            }
        }
    }
}

/// Breaks every block in a cube around the detonation point. Runs through the
/// normal edit path so light and rebuilds settle the same way manual digs do.
pub fn detonate(
    world: &mut GridWorld,
    reg: &BlockRegistry,
    light: &mut LightEngine,
    center: Vec3,
) -> u32 {
    let (cx, cy, cz) = (
        center.x.floor() as i32,
        center.y.floor() as i32,
        center.z.floor() as i32,
    );
    let mut broken = 0;
    for y in (cy - EXPLOSION_RADIUS)..=(cy + EXPLOSION_RADIUS) {
        for z in (cz - EXPLOSION_RADIUS)..=(cz + EXPLOSION_RADIUS) {
            for x in (cx - EXPLOSION_RADIUS)..=(cx + EXPLOSION_RADIUS) {
                if delve_edit::break_block(world, reg, light, (x, y, z)).is_some() {
                    broken += 1;
                }
            }
        }
    }
    log::debug!("detonation at ({cx},{cy},{cz}) broke {broken} blocks");
    broken
}
