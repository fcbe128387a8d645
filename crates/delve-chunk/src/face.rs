use delve_geom::{Aabb, Vec3};

/// Outward axis direction of a block face.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceDir {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

pub const ALL_DIRS: [FaceDir; 6] = [
    FaceDir::PosY,
    FaceDir::NegY,
    FaceDir::PosX,
    FaceDir::NegX,
    FaceDir::PosZ,
    FaceDir::NegZ,
];

impl FaceDir {
    /// Returns the `[0..6)` index of this direction.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit-normal vector for this direction.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            FaceDir::PosY => Vec3::new(0.0, 1.0, 0.0),
            FaceDir::NegY => Vec3::new(0.0, -1.0, 0.0),
            FaceDir::PosX => Vec3::new(1.0, 0.0, 0.0),
            FaceDir::NegX => Vec3::new(-1.0, 0.0, 0.0),
            FaceDir::PosZ => Vec3::new(0.0, 0.0, 1.0),
            FaceDir::NegZ => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            FaceDir::PosY => (0, 1, 0),
            FaceDir::NegY => (0, -1, 0),
            FaceDir::PosX => (1, 0, 0),
            FaceDir::NegX => (-1, 0, 0),
            FaceDir::PosZ => (0, 0, 1),
            FaceDir::NegZ => (0, 0, -1),
        }
    }

    /// The direction pointing back the way `delta` came.
    #[inline]
    pub fn opposite(self) -> FaceDir {
        match self {
            FaceDir::PosY => FaceDir::NegY,
            FaceDir::NegY => FaceDir::PosY,
            FaceDir::PosX => FaceDir::NegX,
            FaceDir::NegX => FaceDir::PosX,
            FaceDir::PosZ => FaceDir::NegZ,
            FaceDir::NegZ => FaceDir::PosZ,
        }
    }

    /// Axis of the normal: 0 = X, 1 = Y, 2 = Z.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            FaceDir::PosX | FaceDir::NegX => 0,
            FaceDir::PosY | FaceDir::NegY => 1,
            FaceDir::PosZ | FaceDir::NegZ => 2,
        }
    }
}

/// A solid block surface bordering a transparent cell. Derived data: rebuilt
/// from scratch on every chunk rebuild, consumed by both the mesh builder and
/// entity collision.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Face {
    /// World position (minimum corner) of the solid block owning the face.
    pub block_pos: Vec3,
    /// Points from the solid block toward the transparent neighbor.
    pub dir: FaceDir,
    /// Unit box of the solid block, in world space.
    pub hitbox: Aabb,
}

impl Face {
    #[inline]
    pub fn new(bx: i32, by: i32, bz: i32, dir: FaceDir) -> Self {
        Self {
            block_pos: Vec3::new(bx as f32, by as f32, bz as f32),
            dir,
            hitbox: Aabb::unit_cube(bx, by, bz),
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.dir.normal()
    }
}
