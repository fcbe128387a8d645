pub type BlockId = u16;

/// Block id 0 is always air: transparent, non-solid, non-emitting.
pub const AIR: BlockId = 0;

/// Immutable per-type block attributes, owned by the registry.
#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    /// Solid blocks stop light and carry collision faces.
    pub solid: bool,
    /// Transparent blocks never cull a neighbor's face and admit light.
    pub transparent: bool,
    /// Emitted light level, 0..=15.
    pub emission: u8,
}

impl BlockType {
    #[inline]
    pub fn is_emitter(&self) -> bool {
        self.emission > 0
    }
}
