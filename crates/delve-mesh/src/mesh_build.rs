use delve_blocks::MAX_LIGHT;
use delve_chunk::{Chunk, Face, FaceDir};
use delve_geom::Vec3;
use delve_world::GridWorld;

/// CPU-side vertex buffers for one chunk, ready for upload by a renderer.
#[derive(Default, Clone)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub col: Vec<u8>,
    pub idx: Vec<u16>,
}

/// Never fully black: a floor keeps unlit geometry readable.
const AMBIENT_FLOOR: f32 = 0.12;

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.col.clear();
        self.idx.clear();
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }

    /// Appends the unit quad for `face`, shaded flat by `light` (0..=15).
    pub fn add_face_quad(&mut self, face: &Face, light: u8) {
        let o = face.block_pos;
        // Corners counter-clockwise when viewed from outside the solid block.
        let vs: [Vec3; 4] = match face.dir {
            FaceDir::PosY => [
                Vec3::new(o.x, o.y + 1.0, o.z),
                Vec3::new(o.x, o.y + 1.0, o.z + 1.0),
                Vec3::new(o.x + 1.0, o.y + 1.0, o.z + 1.0),
                Vec3::new(o.x + 1.0, o.y + 1.0, o.z),
            ],
            FaceDir::NegY => [
                Vec3::new(o.x, o.y, o.z),
                Vec3::new(o.x + 1.0, o.y, o.z),
                Vec3::new(o.x + 1.0, o.y, o.z + 1.0),
                Vec3::new(o.x, o.y, o.z + 1.0),
            ],
            FaceDir::PosX => [
                Vec3::new(o.x + 1.0, o.y, o.z),
                Vec3::new(o.x + 1.0, o.y + 1.0, o.z),
                Vec3::new(o.x + 1.0, o.y + 1.0, o.z + 1.0),
                Vec3::new(o.x + 1.0, o.y, o.z + 1.0),
            ],
            FaceDir::NegX => [
                Vec3::new(o.x, o.y, o.z),
                Vec3::new(o.x, o.y, o.z + 1.0),
                Vec3::new(o.x, o.y + 1.0, o.z + 1.0),
                Vec3::new(o.x, o.y + 1.0, o.z),
            ],
            FaceDir::PosZ => [
                Vec3::new(o.x, o.y, o.z + 1.0),
                Vec3::new(o.x + 1.0, o.y, o.z + 1.0),
                Vec3::new(o.x + 1.0, o.y + 1.0, o.z + 1.0),
                Vec3::new(o.x, o.y + 1.0, o.z + 1.0),
            ],
            FaceDir::NegZ => [
                Vec3::new(o.x, o.y, o.z),
                Vec3::new(o.x, o.y + 1.0, o.z),
                Vec3::new(o.x + 1.0, o.y + 1.0, o.z),
                Vec3::new(o.x + 1.0, o.y, o.z),
            ],
        };
        let n = face.normal();
        let shade = AMBIENT_FLOOR + (1.0 - AMBIENT_FLOOR) * (light as f32 / MAX_LIGHT as f32);
        let c = (shade * 255.0) as u8;
        let base = (self.pos.len() / 3) as u16;
        let uvs = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        for (v, uv) in vs.iter().zip(uvs) {
            self.pos.extend_from_slice(&[v.x, v.y, v.z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&[uv.0, uv.1]);
            self.col.extend_from_slice(&[c, c, c, 255]);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Builds a chunk's vertex buffers from its cached face list, sampling the
/// light level of the transparent cell each face looks at. Light drives only
/// the vertex colors; geometry comes from the faces alone.
pub fn build_chunk_mesh(world: &GridWorld, chunk: &Chunk) -> MeshBuild {
    let mut mb = MeshBuild::default();
    for face in &chunk.faces {
        let (dx, dy, dz) = face.dir.delta();
        let bx = face.block_pos.x as i32;
        let by = face.block_pos.y as i32;
        let bz = face.block_pos.z as i32;
        let light = world.light_at(bx + dx, by + dy, bz + dz);
        mb.add_face_quad(face, light);
    }
    mb
}
