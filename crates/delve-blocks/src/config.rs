use serde::Deserialize;

/// TOML schema for the block table. Missing attributes fall back to the
/// conventional defaults for a plain terrain block.
#[derive(Clone, Debug, Deserialize)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub solid: Option<bool>,
    pub transparent: Option<bool>,
    pub emission: Option<u8>,
}
