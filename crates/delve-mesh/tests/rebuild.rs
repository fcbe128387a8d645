use delve_blocks::{BlockRegistry, BlockType};
use delve_mesh::rebuild_chunk;
use delve_world::{GridWorld, REBUILD_INTERVAL_TICKS};

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

/// Runs one tick's worth of rebuild work; returns whether a chunk was rebuilt.
fn pump(world: &mut GridWorld, reg: &BlockRegistry, tick: u64) -> bool {
    if let Some((gx, gz)) = world.next_rebuild(tick) {
        rebuild_chunk(world, reg, gx, gz);
        true
    } else {
        false
    }
}

#[test]
fn edit_storm_rebuilds_once_per_throttle_window() {
    let reg = test_registry();
    let mut world = GridWorld::new(4).unwrap();
    let mut rebuilds_in_window = 0;

    // Three edits to the same chunk within four ticks.
    world.set_block_at(4, 25, 4, STONE); // tick 0
    if pump(&mut world, &reg, 0) {
        rebuilds_in_window += 1;
    }
    world.set_block_at(8, 25, 8, STONE); // tick 1
    if pump(&mut world, &reg, 1) {
        rebuilds_in_window += 1;
    }
    if pump(&mut world, &reg, 2) {
        rebuilds_in_window += 1;
    }
    world.set_block_at(12, 25, 12, STONE); // tick 3
    if pump(&mut world, &reg, 3) {
        rebuilds_in_window += 1;
    }
    assert_eq!(rebuilds_in_window, 1, "one rebuild within the 4-tick window");

    // The cached face list reflects only the first mutation so far.
    assert_eq!(world.chunk(2, 2).unwrap().faces.len(), 6);
    assert!(world.chunk(2, 2).unwrap().dirty);

    // Once the per-chunk cooldown elapses the rebuild picks up all three.
    assert!(!pump(&mut world, &reg, REBUILD_INTERVAL_TICKS - 1));
    assert!(pump(&mut world, &reg, REBUILD_INTERVAL_TICKS));
    let chunk = world.chunk(2, 2).unwrap();
    assert_eq!(chunk.faces.len(), 18);
    assert!(!chunk.dirty);
}

#[test]
fn light_only_changes_still_schedule_a_rebuild() {
    let reg = test_registry();
    let mut world = GridWorld::new(4).unwrap();
    world.set_block_at(4, 25, 4, STONE);
    assert!(pump(&mut world, &reg, 0));
    // Shading changed, geometry did not.
    world.set_light_at(4, 26, 4, 9);
    assert!(world.chunk(2, 2).unwrap().dirty);
    assert!(pump(&mut world, &reg, REBUILD_INTERVAL_TICKS));
    assert_eq!(world.chunk(2, 2).unwrap().faces.len(), 6);
}
