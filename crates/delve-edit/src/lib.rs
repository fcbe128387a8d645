//! Block-edit orchestration: voxel write, light update, rebuild scheduling.
#![forbid(unsafe_code)]

use delve_blocks::{AIR, BlockId, BlockRegistry};
use delve_light::LightEngine;
use delve_world::GridWorld;

/// Writes a block and runs the light passes the edit requires. The voxel
/// write happens first, light propagation second, and the rebuild is already
/// queued by the write, so the throttled rebuild sees settled light values.
/// Out-of-grid edits are silent no-ops; returns whether the edit applied.
pub fn apply_edit(
    world: &mut GridWorld,
    reg: &BlockRegistry,
    light: &mut LightEngine,
    (wx, wy, wz): (i32, i32, i32),
    id: BlockId,
) -> bool {
    // Placement of an unregistered id is a data bug; fail fast here rather
    // than let it sit silently in chunk storage.
    let _ = reg.lookup(id);
    let Some(old) = world.set_block_at(wx, wy, wz, id) else {
        return false;
    };
    if old != id {
        light.block_changed(world, reg, (wx, wy, wz), old, id);
    }
    log::debug!("edit at ({wx},{wy},{wz}): {old} -> {id}");
    true
}

/// Breaks a block back to air. No-op on air or out-of-grid positions.
pub fn break_block(
    world: &mut GridWorld,
    reg: &BlockRegistry,
    light: &mut LightEngine,
    pos: (i32, i32, i32),
) -> Option<BlockId> {
    let old = world.block_at(pos.0, pos.1, pos.2);
    if old == AIR {
        return None;
    }
    apply_edit(world, reg, light, pos, AIR).then_some(old)
}
