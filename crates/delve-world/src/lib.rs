//! Bounded chunk grid: coordinate transforms, chunk lifecycle, rebuild throttling.
#![forbid(unsafe_code)]

use std::collections::VecDeque;
use std::error::Error;

use delve_blocks::{AIR, BlockId, BlockRegistry};
use delve_chunk::{CHUNK_X, CHUNK_Y, CHUNK_Z, Chunk, Face};

mod sched;
mod worldgen;

pub use sched::{REBUILD_INTERVAL_TICKS, RebuildScheduler};
pub use worldgen::{GenMode, WorldGenConfig};

/// N x N pre-allocated grid of chunks centered on the world origin. Chunk
/// grid indices are world chunk coordinates shifted by `n/2`, so the world
/// spans `[-n/2 * 16, n/2 * 16)` on X and Z. Positions outside the grid read
/// as air/dark and writes there are silent no-ops.
pub struct GridWorld {
    n: usize,
    chunks: Vec<Chunk>,
    sched: RebuildScheduler,
    pending_loads: VecDeque<(usize, usize)>,
}

impl GridWorld {
    pub fn new(n: usize) -> Result<Self, Box<dyn Error>> {
        if n < 2 || n % 2 != 0 {
            return Err(format!("grid size must be even and >= 2, got {n}").into());
        }
        let mut chunks = Vec::with_capacity(n * n);
        for gz in 0..n {
            for gx in 0..n {
                chunks.push(Chunk::new(gx, gz));
            }
        }
        Ok(Self {
            n,
            chunks,
            sched: RebuildScheduler::default(),
            pending_loads: VecDeque::new(),
        })
    }

    #[inline]
    pub fn grid_size(&self) -> usize {
        self.n
    }

    #[inline]
    fn half(&self) -> i32 {
        (self.n / 2) as i32
    }

    // ---- coordinate transforms ----

    /// Grid indices of the chunk containing world column `(wx, wz)`.
    #[inline]
    pub fn chunk_index(&self, wx: i32, wz: i32) -> Option<(usize, usize)> {
        let gx = wx.div_euclid(CHUNK_X as i32) + self.half();
        let gz = wz.div_euclid(CHUNK_Z as i32) + self.half();
        if gx < 0 || gz < 0 || gx >= self.n as i32 || gz >= self.n as i32 {
            return None;
        }
        Some((gx as usize, gz as usize))
    }

    /// Full world -> (chunk, local) resolution. `wy` carries no centering
    /// offset; height is not centered.
    #[inline]
    pub fn world_to_chunk(&self, wx: i32, wy: i32, wz: i32) -> Option<(usize, usize, i32, i32, i32)> {
        if wy < 0 || wy >= CHUNK_Y as i32 {
            return None;
        }
        let (gx, gz) = self.chunk_index(wx, wz)?;
        Some((
            gx,
            gz,
            wx.rem_euclid(CHUNK_X as i32),
            wy,
            wz.rem_euclid(CHUNK_Z as i32),
        ))
    }

    /// World position of a chunk's minimum corner.
    #[inline]
    pub fn chunk_origin(&self, gx: usize, gz: usize) -> (i32, i32) {
        (
            (gx as i32 - self.half()) * CHUNK_X as i32,
            (gz as i32 - self.half()) * CHUNK_Z as i32,
        )
    }

    // ---- chunk access ----

    #[inline]
    pub fn chunk(&self, gx: usize, gz: usize) -> Option<&Chunk> {
        if gx >= self.n || gz >= self.n {
            return None;
        }
        self.chunks.get(gz * self.n + gx)
    }

    #[inline]
    pub fn chunk_mut(&mut self, gx: usize, gz: usize) -> Option<&mut Chunk> {
        if gx >= self.n || gz >= self.n {
            return None;
        }
        self.chunks.get_mut(gz * self.n + gx)
    }

    /// `(2*radius+1)^2` window of chunk refs centered on the chunk containing
    /// `(wx, wz)`, row-major, with `None` past the grid edge. This is the
    /// per-tick collision hot path; it allocates nothing.
    pub fn chunks_near(
        &self,
        wx: f32,
        wz: f32,
        radius: i32,
    ) -> impl Iterator<Item = Option<&Chunk>> + '_ {
        let cgx = (wx.floor() as i32).div_euclid(CHUNK_X as i32) + self.half();
        let cgz = (wz.floor() as i32).div_euclid(CHUNK_Z as i32) + self.half();
        let n = self.n as i32;
        (-radius..=radius).flat_map(move |dz| {
            (-radius..=radius).map(move |dx| {
                let gx = cgx + dx;
                let gz = cgz + dz;
                if gx < 0 || gz < 0 || gx >= n || gz >= n {
                    None
                } else {
                    self.chunks.get((gz * n + gx) as usize)
                }
            })
        })
    }

    // ---- block and light access ----

    #[inline]
    pub fn block_at(&self, wx: i32, wy: i32, wz: i32) -> BlockId {
        match self.world_to_chunk(wx, wy, wz) {
            Some((gx, gz, lx, ly, lz)) => self.chunks[gz * self.n + gx].block(lx, ly, lz),
            None => AIR,
        }
    }

    /// Writes a block and schedules the owning chunk for rebuild. A write on
    /// an X or Z chunk boundary also dirties the adjacent chunk so cross-chunk
    /// face culling stays correct. Returns the previous id, or `None` for the
    /// out-of-grid no-op.
    pub fn set_block_at(&mut self, wx: i32, wy: i32, wz: i32, id: BlockId) -> Option<BlockId> {
        let (gx, gz, lx, ly, lz) = self.world_to_chunk(wx, wy, wz)?;
        let old = self.chunks[gz * self.n + gx].set_block(lx, ly, lz, id)?;
        self.sched.mark(gx, gz);
        let mut dirty_neighbor = |ngx: i32, ngz: i32| {
            if ngx >= 0 && ngz >= 0 && (ngx as usize) < self.n && (ngz as usize) < self.n {
                let (ngx, ngz) = (ngx as usize, ngz as usize);
                self.chunks[ngz * self.n + ngx].dirty = true;
                self.sched.mark(ngx, ngz);
            }
        };
        if lx == 0 {
            dirty_neighbor(gx as i32 - 1, gz as i32);
        } else if lx == CHUNK_X as i32 - 1 {
            dirty_neighbor(gx as i32 + 1, gz as i32);
        }
        if lz == 0 {
            dirty_neighbor(gx as i32, gz as i32 - 1);
        } else if lz == CHUNK_Z as i32 - 1 {
            dirty_neighbor(gx as i32, gz as i32 + 1);
        }
        Some(old)
    }

    #[inline]
    pub fn light_at(&self, wx: i32, wy: i32, wz: i32) -> u8 {
        match self.world_to_chunk(wx, wy, wz) {
            Some((gx, gz, lx, ly, lz)) => self.chunks[gz * self.n + gx].light(lx, ly, lz),
            None => 0,
        }
    }

    /// Light writes dirty the chunk (shading lives in the vertex colors) but
    /// never change collision geometry.
    pub fn set_light_at(&mut self, wx: i32, wy: i32, wz: i32, level: u8) {
        if let Some((gx, gz, lx, ly, lz)) = self.world_to_chunk(wx, wy, wz) {
            self.chunks[gz * self.n + gx].set_light(lx, ly, lz, level);
            self.sched.mark(gx, gz);
        }
    }

    /// True when the position is inside the generated grid.
    #[inline]
    pub fn contains(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.world_to_chunk(wx, wy, wz).is_some()
    }

    /// Highest solid cell in a column, for spawn placement.
    pub fn highest_solid(&self, reg: &BlockRegistry, wx: i32, wz: i32) -> Option<i32> {
        (0..CHUNK_Y as i32)
            .rev()
            .find(|&wy| reg.is_solid(self.block_at(wx, wy, wz)))
    }

    // ---- chunk lifecycle ----

    /// Marks every not-yet-loaded chunk in a `diameter`-wide window as loaded
    /// and queues it for one-per-tick face/mesh building. Used when the view
    /// center crosses a chunk boundary.
    pub fn load_chunks_async(&mut self, center: (usize, usize), diameter: usize) {
        for (gx, gz) in self.window(center, diameter) {
            let c = &mut self.chunks[gz * self.n + gx];
            if !c.loaded {
                c.loaded = true;
                self.pending_loads.push_back((gx, gz));
            }
        }
    }

    /// Same window, but returns every chunk for the caller to build
    /// synchronously. Used once at spawn so the initial area is ready before
    /// the first frame.
    pub fn load_chunks_immediate(&mut self, center: (usize, usize), diameter: usize) -> Vec<(usize, usize)> {
        let coords = self.window(center, diameter);
        for &(gx, gz) in &coords {
            self.chunks[gz * self.n + gx].loaded = true;
        }
        coords
    }

    fn window(&self, center: (usize, usize), diameter: usize) -> Vec<(usize, usize)> {
        let r = (diameter / 2) as i32;
        let mut out = Vec::new();
        for dz in -r..=r {
            for dx in -r..=r {
                let gx = center.0 as i32 + dx;
                let gz = center.1 as i32 + dz;
                if gx >= 0 && gz >= 0 && (gx as usize) < self.n && (gz as usize) < self.n {
                    out.push((gx as usize, gz as usize));
                }
            }
        }
        out
    }

    /// One queued chunk load per tick.
    pub fn pop_pending_load(&mut self) -> Option<(usize, usize)> {
        self.pending_loads.pop_front()
    }

    // ---- rebuild scheduling ----

    /// Explicit dirty-marking for callers outside `set_block_at` (lighting).
    pub fn mark_dirty(&mut self, gx: usize, gz: usize) {
        if let Some(c) = self.chunk_mut(gx, gz) {
            c.dirty = true;
            self.sched.mark(gx, gz);
        }
    }

    /// At most one chunk per call; honors the per-chunk cooldown.
    pub fn next_rebuild(&mut self, tick: u64) -> Option<(usize, usize)> {
        self.sched.pop_due(tick)
    }

    pub fn note_rebuilt(&mut self, gx: usize, gz: usize, tick: u64) {
        self.sched.note_built(gx, gz, tick);
    }

    /// Stores a freshly extracted face list and clears the dirty flag.
    pub fn store_faces(&mut self, gx: usize, gz: usize, faces: Vec<Face>) {
        if let Some(c) = self.chunk_mut(gx, gz) {
            c.faces = faces;
            c.dirty = false;
        }
    }

    // ---- generation ----

    /// Fills every chunk from the terrain config. Runs once at startup;
    /// chunks end up dirty but unqueued, since initial face building goes
    /// through the load paths instead of the edit scheduler.
    pub fn generate(&mut self, reg: &BlockRegistry, cfg: &WorldGenConfig) -> Result<(), Box<dyn Error>> {
        let palette = worldgen::GenPalette::resolve(reg)?;
        let sampler = worldgen::HeightSampler::new(cfg);
        let n = self.n;
        for gz in 0..n {
            for gx in 0..n {
                let (base_x, base_z) = self.chunk_origin(gx, gz);
                let chunk = &mut self.chunks[gz * n + gx];
                for lz in 0..CHUNK_Z as i32 {
                    for lx in 0..CHUNK_X as i32 {
                        let wx = base_x + lx;
                        let wz = base_z + lz;
                        let h = sampler.height_at(wx, wz);
                        let dirt_from = (h - sampler.dirt_depth()).max(0);
                        for y in 0..h {
                            let id = if y == h - 1 {
                                palette.grass
                            } else if y >= dirt_from {
                                palette.dirt
                            } else {
                                palette.stone
                            };
                            chunk.set_block(lx, y, lz, id);
                        }
                        if let Some(lantern) = palette.lantern {
                            if worldgen::lantern_column(cfg, wx, wz) && h < CHUNK_Y as i32 {
                                chunk.set_block(lx, h, lz, lantern);
                            }
                        }
                    }
                }
            }
        }
        log::info!(
            "generated {}x{} chunk grid ({} voxels)",
            n,
            n,
            n * n * CHUNK_X * CHUNK_Y * CHUNK_Z
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_must_be_even() {
        assert!(GridWorld::new(3).is_err());
        assert!(GridWorld::new(0).is_err());
        assert!(GridWorld::new(4).is_ok());
    }

    #[test]
    fn origin_block_lands_in_center_chunk() {
        let w = GridWorld::new(4).unwrap();
        let (gx, gz, lx, ly, lz) = w.world_to_chunk(0, 0, 0).unwrap();
        assert_eq!((gx, gz), (2, 2));
        assert_eq!((lx, ly, lz), (0, 0, 0));
    }

    #[test]
    fn negative_coords_resolve_with_euclidean_locals() {
        let w = GridWorld::new(4).unwrap();
        let (gx, gz, lx, _, lz) = w.world_to_chunk(-1, 5, -17).unwrap();
        assert_eq!((gx, gz), (1, 0));
        assert_eq!((lx, lz), (15, 15));
    }

    #[test]
    fn chunk_origin_round_trips() {
        let w = GridWorld::new(6).unwrap();
        for gz in 0..6 {
            for gx in 0..6 {
                let (bx, bz) = w.chunk_origin(gx, gz);
                assert_eq!(w.chunk_index(bx, bz), Some((gx, gz)));
                assert_eq!(
                    w.chunk_index(bx + CHUNK_X as i32 - 1, bz + CHUNK_Z as i32 - 1),
                    Some((gx, gz))
                );
            }
        }
    }

    #[test]
    fn boundary_write_dirties_neighbor() {
        let mut w = GridWorld::new(4).unwrap();
        // Local x == 0 of chunk (2,2) is world x == 0.
        w.set_block_at(0, 10, 5, 1);
        assert!(w.chunk(2, 2).unwrap().dirty);
        assert!(w.chunk(1, 2).unwrap().dirty);
        assert!(!w.chunk(3, 2).unwrap().dirty);
    }

    #[test]
    fn chunks_near_window_is_dense_with_edge_nulls() {
        let w = GridWorld::new(4).unwrap();
        let all: Vec<_> = w.chunks_near(0.0, 0.0, 1).collect();
        assert_eq!(all.len(), 9);
        assert!(all.iter().all(|c| c.is_some()));
        // Window centered in the far corner spills off the grid.
        let edge: Vec<_> = w.chunks_near(-31.9, -31.9, 1).collect();
        assert_eq!(edge.len(), 9);
        assert!(edge.iter().any(|c| c.is_none()));
        assert!(edge.iter().any(|c| c.is_some()));
    }
}
