use proptest::prelude::*;

use delve_blocks::{BlockRegistry, BlockType};
use delve_mesh::extract_faces;
use delve_world::GridWorld;

const STONE: u16 = 1;

fn test_registry() -> BlockRegistry {
    let mut reg = BlockRegistry::new();
    reg.register(BlockType {
        id: 0,
        name: "air".into(),
        solid: false,
        transparent: true,
        emission: 0,
    })
    .unwrap();
    reg.register(BlockType {
        id: STONE,
        name: "stone".into(),
        solid: true,
        transparent: false,
        emission: 0,
    })
    .unwrap();
    reg
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every extracted face sits on a solid/air boundary, and no boundary is
    /// reported twice.
    #[test]
    fn faces_sit_on_solid_air_boundaries(
        cells in proptest::collection::hash_set((0i32..16, 0i32..49, 0i32..16), 0..40)
    ) {
        let reg = test_registry();
        let mut world = GridWorld::new(4).unwrap();
        for &(x, y, z) in &cells {
            world.set_block_at(x, y, z, STONE);
        }
        let faces = extract_faces(&world, &reg, 2, 2);
        let mut seen = std::collections::HashSet::new();
        for f in &faces {
            let bx = f.block_pos.x as i32;
            let by = f.block_pos.y as i32;
            let bz = f.block_pos.z as i32;
            prop_assert!(reg.is_solid(world.block_at(bx, by, bz)));
            let (dx, dy, dz) = f.dir.delta();
            prop_assert!(reg.is_transparent(world.block_at(bx + dx, by + dy, bz + dz)));
            prop_assert!(seen.insert((bx, by, bz, f.dir.index())), "duplicate face");
        }
    }
}
