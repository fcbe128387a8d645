use delve_blocks::BlockRegistry;
use delve_chunk::{ALL_DIRS, CHUNK_X, CHUNK_Y, CHUNK_Z, Face};
use delve_world::GridWorld;

/// Computes the visible-face list for one chunk.
///
/// Iterates the chunk's transparent cells and emits a face for every solid
/// 6-neighbor (crossing chunk seams through the grid). This is the dual of
/// culling hidden faces from the solid side: same asymptotic cost, but
/// interior solid regions with no exposed surface are skipped outright.
/// The face normal points from the solid block back toward the transparent
/// cell, and the hitbox is the solid block's unit box, so the output serves
/// both the mesh builder and entity collision.
pub fn extract_faces(world: &GridWorld, reg: &BlockRegistry, gx: usize, gz: usize) -> Vec<Face> {
    let Some(chunk) = world.chunk(gx, gz) else {
        return Vec::new();
    };
    let (base_x, base_z) = world.chunk_origin(gx, gz);
    let mut faces = Vec::new();
    for ly in 0..CHUNK_Y as i32 {
        for lz in 0..CHUNK_Z as i32 {
            for lx in 0..CHUNK_X as i32 {
                if !reg.is_transparent(chunk.block(lx, ly, lz)) {
                    continue;
                }
                let wx = base_x + lx;
                let wz = base_z + lz;
                for dir in ALL_DIRS {
                    let (dx, dy, dz) = dir.delta();
                    let (nx, ny, nz) = (wx + dx, ly + dy, wz + dz);
                    if reg.is_solid(world.block_at(nx, ny, nz)) {
                        // The face looks back at the transparent cell.
                        faces.push(Face::new(nx, ny, nz, dir.opposite()));
                    }
                }
            }
        }
    }
    faces
}

/// Recomputes and stores a chunk's face list, clearing its dirty flag.
/// Idempotent: two calls with no intervening mutation store the same list.
pub fn rebuild_chunk(world: &mut GridWorld, reg: &BlockRegistry, gx: usize, gz: usize) {
    let faces = extract_faces(world, reg, gx, gz);
    log::trace!("rebuilt chunk ({gx},{gz}): {} faces", faces.len());
    world.store_faces(gx, gz, faces);
}
