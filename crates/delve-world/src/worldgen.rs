use std::error::Error;
use std::fs;
use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

use delve_blocks::{BlockId, BlockRegistry};
use delve_chunk::CHUNK_Y;

/// Terrain parameters, loadable from TOML alongside the block table.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: GenMode,
    #[serde(default)]
    pub seed: i32,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub lanterns: Lanterns,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenMode {
    /// Noise heightmap terrain.
    Normal,
    /// Flat slab of `height.base` layers, handy for tests and demos.
    Flat,
}

fn default_mode() -> GenMode {
    GenMode::Normal
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    pub base: i32,
    pub amplitude: f32,
    pub frequency: f32,
    pub dirt_depth: i32,
}

impl Default for Height {
    fn default() -> Self {
        Self {
            base: 20,
            amplitude: 8.0,
            frequency: 0.02,
            dirt_depth: 3,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Lanterns {
    /// A lantern is stamped on roughly one surface column out of `spacing`
    /// squared, on a fixed lattice so worlds are reproducible per seed.
    pub spacing: i32,
}

impl Default for Lanterns {
    fn default() -> Self {
        Self { spacing: 24 }
    }
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            mode: GenMode::Normal,
            seed: 0,
            height: Height::default(),
            lanterns: Lanterns::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn flat(layers: i32) -> Self {
        Self {
            mode: GenMode::Flat,
            height: Height {
                base: layers,
                ..Height::default()
            },
            ..Self::default()
        }
    }
}

/// Block ids the generator stamps, resolved once from the registry. Missing
/// terrain blocks are a data-loading bug and fail fast at startup.
pub(crate) struct GenPalette {
    pub stone: BlockId,
    pub dirt: BlockId,
    pub grass: BlockId,
    pub lantern: Option<BlockId>,
}

impl GenPalette {
    pub fn resolve(reg: &BlockRegistry) -> Result<Self, Box<dyn Error>> {
        let need = |name: &str| -> Result<BlockId, Box<dyn Error>> {
            reg.id_by_name(name)
                .ok_or_else(|| format!("terrain block {name:?} is not registered").into())
        };
        Ok(Self {
            stone: need("stone")?,
            dirt: need("dirt")?,
            grass: need("grass")?,
            lantern: reg.id_by_name("lantern"),
        })
    }
}

pub(crate) struct HeightSampler {
    noise: Option<FastNoiseLite>,
    base: i32,
    amplitude: f32,
    dirt_depth: i32,
}

impl HeightSampler {
    pub fn new(cfg: &WorldGenConfig) -> Self {
        let noise = match cfg.mode {
            GenMode::Flat => None,
            GenMode::Normal => {
                let mut n = FastNoiseLite::with_seed(cfg.seed);
                n.set_noise_type(Some(NoiseType::OpenSimplex2));
                n.set_frequency(Some(cfg.height.frequency));
                Some(n)
            }
        };
        Self {
            noise,
            base: cfg.height.base,
            amplitude: cfg.height.amplitude,
            dirt_depth: cfg.height.dirt_depth.max(1),
        }
    }

    /// Surface height (exclusive upper solid y) for a world column.
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let h = match &self.noise {
            None => self.base,
            Some(n) => {
                let v = n.get_noise_2d(wx as f32, wz as f32);
                self.base + (v * self.amplitude).round() as i32
            }
        };
        h.clamp(1, CHUNK_Y as i32 - 1)
    }

    #[inline]
    pub fn dirt_depth(&self) -> i32 {
        self.dirt_depth
    }
}

/// Fixed lattice test for lantern columns.
#[inline]
pub(crate) fn lantern_column(cfg: &WorldGenConfig, wx: i32, wz: i32) -> bool {
    let s = cfg.lanterns.spacing.max(2);
    wx.rem_euclid(s) == s / 2 && wz.rem_euclid(s) == s / 2
}
