//! Fixed-size voxel chunk storage and face records.
#![forbid(unsafe_code)]

use delve_blocks::{AIR, BlockId};

mod face;

pub use face::{ALL_DIRS, Face, FaceDir};

pub const CHUNK_X: usize = 16;
pub const CHUNK_Y: usize = 50;
pub const CHUNK_Z: usize = 16;

/// One voxel: block id plus propagated light level (0..=15).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub id: BlockId,
    pub light: u8,
}

/// A 16x50x16 block of voxel storage. Allocated once at grid construction;
/// `loaded` gates face/mesh building only, never the voxel array itself.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Grid indices into the owning world grid (offset-shifted, non-negative).
    pub gx: usize,
    pub gz: usize,
    pub loaded: bool,
    /// Rebuild pending: the cached face list no longer matches the cells.
    pub dirty: bool,
    cells: Vec<Cell>,
    pub faces: Vec<Face>,
}

impl Chunk {
    pub fn new(gx: usize, gz: usize) -> Self {
        Self {
            gx,
            gz,
            loaded: false,
            dirty: false,
            cells: vec![Cell::default(); CHUNK_X * CHUNK_Y * CHUNK_Z],
            faces: Vec::new(),
        }
    }

    #[inline]
    fn idx(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_Z + z) * CHUNK_X + x
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < CHUNK_X
            && (y as usize) < CHUNK_Y
            && (z as usize) < CHUNK_Z
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize, z: usize) -> Cell {
        self.cells[Self::idx(x, y, z)]
    }

    /// Out-of-range reads degrade to air.
    #[inline]
    pub fn block(&self, x: i32, y: i32, z: i32) -> BlockId {
        if !Self::in_bounds(x, y, z) {
            return AIR;
        }
        self.cells[Self::idx(x as usize, y as usize, z as usize)].id
    }

    /// Writes a block id and marks the chunk dirty. Out-of-range input is a
    /// silent no-op (single policy across the codebase; entities and rays
    /// routinely probe past the edges). Returns the previous id when applied.
    #[inline]
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> Option<BlockId> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        let ix = Self::idx(x as usize, y as usize, z as usize);
        let old = self.cells[ix].id;
        self.cells[ix].id = id;
        self.dirty = true;
        Some(old)
    }

    #[inline]
    pub fn light(&self, x: i32, y: i32, z: i32) -> u8 {
        if !Self::in_bounds(x, y, z) {
            return 0;
        }
        self.cells[Self::idx(x as usize, y as usize, z as usize)].light
    }

    #[inline]
    pub fn set_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        self.cells[Self::idx(x as usize, y as usize, z as usize)].light = level;
        self.dirty = true;
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.cells.iter().all(|c| c.id == AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_chunk_is_air_and_unlit() {
        let c = Chunk::new(0, 0);
        assert!(c.is_all_air());
        assert_eq!(c.block(5, 5, 5), AIR);
        assert_eq!(c.light(5, 5, 5), 0);
        assert!(!c.dirty);
    }

    #[test]
    fn out_of_range_set_is_silent_noop() {
        let mut c = Chunk::new(0, 0);
        assert_eq!(c.set_block(-1, 0, 0, 1), None);
        assert_eq!(c.set_block(0, CHUNK_Y as i32, 0, 1), None);
        assert!(!c.dirty);
        assert!(c.is_all_air());
    }

    #[test]
    fn set_block_marks_dirty_and_returns_old() {
        let mut c = Chunk::new(0, 0);
        assert_eq!(c.set_block(3, 10, 3, 7), Some(AIR));
        assert_eq!(c.set_block(3, 10, 3, 9), Some(7));
        assert!(c.dirty);
    }

    #[test]
    fn out_of_range_reads_are_air_and_dark() {
        let mut c = Chunk::new(0, 0);
        c.set_block(0, 0, 0, 1);
        c.set_light(0, 0, 0, 9);
        assert_eq!(c.block(-1, 0, 0), AIR);
        assert_eq!(c.light(0, -1, 0), 0);
        assert_eq!(c.light(CHUNK_X as i32, 0, 0), 0);
    }
}
