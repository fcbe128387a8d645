//! Flood-fill light propagation and depopulation over transparent blocks.
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use delve_blocks::{BlockId, BlockRegistry, MAX_LIGHT};
use delve_chunk::{CHUNK_X, CHUNK_Y, CHUNK_Z};
use delve_world::GridWorld;

const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Worklist-based light engine. Both operations are BFS over the 6-connected
/// transparent-block graph; opaque blocks are walls. Worklists are explicit
/// (no call-stack recursion) and owned by the engine so repeated edits reuse
/// their allocations.
#[derive(Default)]
pub struct LightEngine {
    queue: VecDeque<(i32, i32, i32)>,
    clears: Vec<(i32, i32, i32, u8)>,
    relight: Vec<(i32, i32, i32)>,
}

impl LightEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the before/after ids of a block edit, after the voxel
    /// write and before the rebuild is scheduled. Decides which propagation
    /// passes the edit needs.
    pub fn block_changed(
        &mut self,
        world: &mut GridWorld,
        reg: &BlockRegistry,
        (wx, wy, wz): (i32, i32, i32),
        old: BlockId,
        new: BlockId,
    ) {
        let old_em = reg.emission(old);
        let new_em = reg.emission(new);
        let became_opaque = !reg.is_transparent(new) && reg.is_transparent(old);
        let became_clear = reg.is_transparent(new) && !reg.is_transparent(old);

        // Removing a source, or walling off a lit cell, darkens its reach
        // first; refills from surviving sources happen inside depopulate.
        if old_em > 0 || became_opaque {
            self.depopulate(world, reg, wx, wy, wz);
        }
        if new_em > 0 {
            self.seed(world, reg, wx, wy, wz, new_em);
        } else if became_clear {
            self.propagate(world, reg, wx, wy, wz);
        }
    }

    /// Sets an emitter's own level and floods outward from it.
    pub fn seed(
        &mut self,
        world: &mut GridWorld,
        reg: &BlockRegistry,
        wx: i32,
        wy: i32,
        wz: i32,
        level: u8,
    ) {
        world.set_light_at(wx, wy, wz, level.min(MAX_LIGHT));
        for (dx, dy, dz) in NEIGHBORS {
            self.queue.push_back((wx + dx, wy + dy, wz + dz));
        }
        self.drain(world, reg);
    }

    /// Increase-and-flood: recomputes `origin` from its neighbors and spreads
    /// any increase. A cell at BFS distance d from a level-L source settles
    /// at `L - d`; the 0..=15 range bounds the traversal depth.
    pub fn propagate(&mut self, world: &mut GridWorld, reg: &BlockRegistry, wx: i32, wy: i32, wz: i32) {
        self.queue.push_back((wx, wy, wz));
        self.drain(world, reg);
    }

    /// Light levels of the 6 neighbors; the planes above and below the world
    /// are absent from the neighbor set, not zero.
    fn neighbor_levels(&self, world: &GridWorld, x: i32, y: i32, z: i32) -> [Option<u8>; 6] {
        let mut out = [None; 6];
        for (i, (dx, dy, dz)) in NEIGHBORS.iter().enumerate() {
            let ny = y + dy;
            if ny < 0 || ny >= CHUNK_Y as i32 {
                continue;
            }
            out[i] = Some(world.light_at(x + dx, ny, z + dz));
        }
        out
    }

    fn drain(&mut self, world: &mut GridWorld, reg: &BlockRegistry) {
        while let Some((x, y, z)) = self.queue.pop_front() {
            if !reg.is_transparent(world.block_at(x, y, z)) || !world.contains(x, y, z) {
                continue;
            }
            let cur = world.light_at(x, y, z);
            let best = self
                .neighbor_levels(world, x, y, z)
                .into_iter()
                .flatten()
                .max()
                .unwrap_or(0);
            let new = best.saturating_sub(1);
            if new <= cur {
                continue;
            }
            world.set_light_at(x, y, z, new);
            if new > 1 {
                for (dx, dy, dz) in NEIGHBORS {
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    if ny < 0 || ny >= CHUNK_Y as i32 {
                        continue;
                    }
                    if reg.is_transparent(world.block_at(nx, ny, nz))
                        && world.light_at(nx, ny, nz) < new - 1
                    {
                        self.queue.push_back((nx, ny, nz));
                    }
                }
            }
        }
    }

    /// Removes all light sourced (transitively) from `origin`: clears the
    /// cell, walks outward zeroing every neighbor whose level could only have
    /// come from here (level == parent level - 1), and queues any other lit
    /// neighbor for refill. The refill runs only after the darkening pass has
    /// fully unwound; propagating mid-clear would read half-cleared state.
    pub fn depopulate(&mut self, world: &mut GridWorld, reg: &BlockRegistry, wx: i32, wy: i32, wz: i32) {
        let level = world.light_at(wx, wy, wz);
        world.set_light_at(wx, wy, wz, 0);
        self.clears.push((wx, wy, wz, level));
        while let Some((x, y, z, lvl)) = self.clears.pop() {
            let threshold = lvl.saturating_sub(1);
            for (dx, dy, dz) in NEIGHBORS {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                if ny < 0 || ny >= CHUNK_Y as i32 {
                    continue;
                }
                if !reg.is_transparent(world.block_at(nx, ny, nz)) {
                    continue;
                }
                let ln = world.light_at(nx, ny, nz);
                if ln == 0 {
                    continue;
                }
                if ln == threshold {
                    world.set_light_at(nx, ny, nz, 0);
                    self.clears.push((nx, ny, nz, ln));
                } else {
                    // Lit from a different, still-valid source; relit later.
                    self.relight.push((nx, ny, nz));
                }
            }
        }
        // Frontier cells usually already hold their correct level, so queueing
        // them alone would stall on the no-increase check in `drain`; their
        // neighbors inside the darkened zone are the cells that need raising.
        for (x, y, z) in self.relight.drain(..) {
            self.queue.push_back((x, y, z));
            for (dx, dy, dz) in NEIGHBORS {
                self.queue.push_back((x + dx, y + dy, z + dz));
            }
        }
        self.drain(world, reg);
    }

    /// One-time startup pass seeding every emitting block already in the
    /// grid. Incremental edits keep the field up to date afterwards.
    pub fn seed_world(&mut self, world: &mut GridWorld, reg: &BlockRegistry) {
        let n = world.grid_size();
        let mut emitters: Vec<(i32, i32, i32, u8)> = Vec::new();
        for gz in 0..n {
            for gx in 0..n {
                let (bx, bz) = world.chunk_origin(gx, gz);
                let Some(chunk) = world.chunk(gx, gz) else { continue };
                for lz in 0..CHUNK_Z as i32 {
                    for ly in 0..CHUNK_Y as i32 {
                        for lx in 0..CHUNK_X as i32 {
                            let em = reg.emission(chunk.block(lx, ly, lz));
                            if em > 0 {
                                emitters.push((bx + lx, ly, bz + lz, em));
                            }
                        }
                    }
                }
            }
        }
        log::debug!("seeding {} light emitters", emitters.len());
        for (x, y, z, em) in emitters {
            self.seed(world, reg, x, y, z, em);
        }
    }
}
