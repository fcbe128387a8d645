use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::types::{AIR, BlockId, BlockType};

pub const MAX_LIGHT: u8 = 15;

/// Read-only block table. Built once at startup; chunk storage defaults to
/// id 0, so air must always be present and registered first.
#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<Option<BlockType>>,
    pub by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        let cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let solid = def.solid.unwrap_or(true);
            reg.register(BlockType {
                id,
                name: def.name,
                solid,
                transparent: def.transparent.unwrap_or(!solid),
                emission: def.emission.unwrap_or(0).min(MAX_LIGHT),
            })?;
        }
        reg.validate_air()?;
        Ok(reg)
    }

    /// Registering the same id twice is a data-loading bug, not a runtime
    /// condition, so it surfaces as an error instead of a silent overwrite.
    pub fn register(&mut self, ty: BlockType) -> Result<(), Box<dyn Error>> {
        let ix = ty.id as usize;
        if self.blocks.len() <= ix {
            self.blocks.resize(ix + 1, None);
        }
        if let Some(prev) = &self.blocks[ix] {
            return Err(format!(
                "block id {} registered twice: {:?} then {:?}",
                ty.id, prev.name, ty.name
            )
            .into());
        }
        self.by_name.insert(ty.name.clone(), ty.id);
        self.blocks[ix] = Some(ty);
        Ok(())
    }

    fn validate_air(&self) -> Result<(), Box<dyn Error>> {
        match self.get(AIR) {
            Some(a) if !a.solid && a.transparent && a.emission == 0 => Ok(()),
            Some(a) => Err(format!("block id 0 must be air-like, got {:?}", a.name).into()),
            None => Err("block id 0 (air) is not registered".into()),
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).and_then(|b| b.as_ref())
    }

    /// Strict lookup for the edit path: an unregistered id here indicates a
    /// data-loading bug, so fail fast rather than degrade.
    #[inline]
    pub fn lookup(&self, id: BlockId) -> &BlockType {
        match self.get(id) {
            Some(ty) => ty,
            None => panic!("block id {id} is not registered"),
        }
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    // Defensive attribute accessors for the hot paths: unregistered ids in
    // chunk storage read as air.
    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.get(id).map(|t| t.solid).unwrap_or(false)
    }

    #[inline]
    pub fn is_transparent(&self, id: BlockId) -> bool {
        self.get(id).map(|t| t.transparent).unwrap_or(true)
    }

    #[inline]
    pub fn emission(&self, id: BlockId) -> u8 {
        self.get(id).map(|t| t.emission).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BlockRegistry {
        let mut reg = BlockRegistry::new();
        reg.register(BlockType {
            id: 0,
            name: "air".into(),
            solid: false,
            transparent: true,
            emission: 0,
        })
        .unwrap();
        reg
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut reg = base();
        reg.register(BlockType {
            id: 1,
            name: "stone".into(),
            solid: true,
            transparent: false,
            emission: 0,
        })
        .unwrap();
        let dup = BlockType {
            id: 1,
            name: "granite".into(),
            solid: true,
            transparent: false,
            emission: 0,
        };
        assert!(reg.register(dup).is_err());
    }

    #[test]
    fn unregistered_ids_read_as_air() {
        let reg = base();
        assert!(!reg.is_solid(999));
        assert!(reg.is_transparent(999));
        assert_eq!(reg.emission(999), 0);
    }

    #[test]
    fn non_air_zero_id_is_rejected() {
        let cfg: BlocksConfig = toml::from_str(
            r#"
            [[blocks]]
            name = "stone"
            id = 0
            solid = true
        "#,
        )
        .unwrap();
        assert!(BlockRegistry::from_config(cfg).is_err());
    }

    #[test]
    fn config_defaults_fill_in() {
        let cfg: BlocksConfig = toml::from_str(
            r#"
            [[blocks]]
            name = "air"
            solid = false

            [[blocks]]
            name = "stone"

            [[blocks]]
            name = "lantern"
            emission = 14
        "#,
        )
        .unwrap();
        let reg = BlockRegistry::from_config(cfg).unwrap();
        let stone = reg.id_by_name("stone").unwrap();
        assert!(reg.is_solid(stone) && !reg.is_transparent(stone));
        let lantern = reg.id_by_name("lantern").unwrap();
        assert_eq!(reg.emission(lantern), 14);
    }
}
