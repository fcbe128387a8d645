use std::collections::HashMap;
use std::error::Error;

use delve_blocks::{BlockId, BlockRegistry};
use delve_geom::Vec3;
use delve_light::LightEngine;
use delve_mesh::MeshBuild;
use delve_sim::{Entity, ItemKind, Simulation, Target, UseEffect};
use delve_world::{GridWorld, WorldGenConfig};

/// Reach of the player's view ray when placing or breaking.
const REACH: f32 = 6.0;
/// Chunk-window width kept loaded around the player.
const VIEW_DIAMETER: usize = 5;

/// One running game: world, block table, light engine, entities, and the
/// per-chunk mesh cache, advanced one tick at a time.
pub struct GameSession {
    pub world: GridWorld,
    pub reg: BlockRegistry,
    pub light: LightEngine,
    pub sim: Simulation,
    pub meshes: HashMap<(usize, usize), MeshBuild>,
    tick: u64,
    player_chunk: (usize, usize),
}

impl GameSession {
    pub fn new(
        reg: BlockRegistry,
        gen_cfg: &WorldGenConfig,
        grid_size: usize,
    ) -> Result<Self, Box<dyn Error>> {
        let mut world = GridWorld::new(grid_size)?;
        world.generate(&reg, gen_cfg)?;
        let mut light = LightEngine::new();
        light.seed_world(&mut world, &reg);

        let surface = world.highest_solid(&reg, 0, 0).unwrap_or(0);
        let spawn = Vec3::new(0.5, surface as f32 + 1.0, 0.5);
        let mut sim = Simulation::new();
        sim.spawn(Entity::player(spawn));
        log::info!("player spawn at {spawn:?}");

        let mut session = Self {
            world,
            reg,
            light,
            sim,
            meshes: HashMap::new(),
            tick: 0,
            player_chunk: (grid_size / 2, grid_size / 2),
        };
        // Spawn area is built synchronously so tick 0 already has colliders
        // under the player's feet.
        let initial = session
            .world
            .load_chunks_immediate(session.player_chunk, VIEW_DIAMETER);
        for (gx, gz) in initial {
            session.rebuild(gx, gz);
        }
        Ok(session)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&mut self) -> &mut Entity {
        // A session always carries its player; losing it is a logic bug.
        self.sim.player_mut().expect("session without a player entity")
    }

    /// Advances the session one tick: one queued chunk load, one throttled
    /// rebuild, then the entity step.
    pub fn step(&mut self) {
        if let Some((gx, gz)) = self.world.pop_pending_load() {
            self.rebuild(gx, gz);
        }
        if let Some((gx, gz)) = self.world.next_rebuild(self.tick) {
            self.rebuild(gx, gz);
            self.world.note_rebuilt(gx, gz, self.tick);
        }
        self.sim.step(&mut self.world, &self.reg, &mut self.light);
        self.track_player_chunk();
        self.tick += 1;
    }

    /// Face of the solid block the player is looking at, within reach.
    pub fn player_target(&mut self) -> Option<Target> {
        let player = self.player().clone();
        delve_sim::target_face(&self.world, &player, REACH)
    }

    /// Uses the held item against the current target.
    pub fn use_item(&mut self, item: ItemKind) {
        let player = self.player().clone();
        let target = delve_sim::target_face(&self.world, &player, REACH);
        let hit = target
            .as_ref()
            .map(|t| delve_sim::hit_point(&player, t));
        let effect = item.use_on(
            &mut self.world,
            &self.reg,
            &mut self.light,
            target.as_ref(),
            hit,
        );
        if let UseEffect::Spawn(e) = effect {
            self.sim.spawn(e);
        }
    }

    /// Breaks the targeted block, leaving a dropped item in its place.
    pub fn break_target(&mut self) -> Option<BlockId> {
        let player = self.player().clone();
        let target = delve_sim::target_face(&self.world, &player, REACH)?;
        let (bx, by, bz) = target.block();
        let old =
            delve_edit::break_block(&mut self.world, &self.reg, &mut self.light, target.block())?;
        self.sim.spawn(Entity::dropped_item(
            Vec3::new(bx as f32 + 0.5, by as f32, bz as f32 + 0.5),
            old,
        ));
        Some(old)
    }

    fn rebuild(&mut self, gx: usize, gz: usize) {
        delve_mesh::rebuild_chunk(&mut self.world, &self.reg, gx, gz);
        if let Some(chunk) = self.world.chunk(gx, gz) {
            let mesh = delve_mesh::build_chunk_mesh(&self.world, chunk);
            if mesh.quad_count() == 0 {
                self.meshes.remove(&(gx, gz));
            } else {
                self.meshes.insert((gx, gz), mesh);
            }
        }
    }

    /// Queues loads for the new window when the player crosses a chunk edge.
    fn track_player_chunk(&mut self) {
        let pos = self.player().pos;
        let Some(center) = self
            .world
            .chunk_index(pos.x.floor() as i32, pos.z.floor() as i32)
        else {
            return;
        };
        if center != self.player_chunk {
            self.player_chunk = center;
            self.world.load_chunks_async(center, VIEW_DIAMETER);
            log::debug!("view window recentered on chunk {center:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_blocks::config::BlocksConfig;

    fn registry() -> BlockRegistry {
        let cfg: BlocksConfig = toml::from_str(
            r#"
            [[blocks]]
            name = "air"
            solid = false

            [[blocks]]
            name = "stone"

            [[blocks]]
            name = "dirt"

            [[blocks]]
            name = "grass"

            [[blocks]]
            name = "lantern"
            emission = 14
        "#,
        )
        .unwrap();
        BlockRegistry::from_config(cfg).unwrap()
    }

    #[test]
    fn session_spawns_player_above_ground() {
        let mut s = GameSession::new(registry(), &WorldGenConfig::flat(4), 2).unwrap();
        assert_eq!(s.player().pos.y, 4.0);
        // The spawn chunk was built synchronously and has a surface mesh.
        assert!(s.meshes.contains_key(&(1, 1)));
    }

    #[test]
    fn stepped_session_keeps_the_player_on_the_surface() {
        let mut s = GameSession::new(registry(), &WorldGenConfig::flat(4), 2).unwrap();
        for _ in 0..120 {
            s.step();
        }
        let y = s.player().pos.y;
        assert!((4.0..4.1).contains(&y), "player at y = {y}");
    }

    #[test]
    fn using_items_places_blocks_and_spawns_bombs() {
        use delve_sim::EntityKind;

        let mut s = GameSession::new(registry(), &WorldGenConfig::flat(4), 2).unwrap();
        for _ in 0..60 {
            s.step();
        }
        s.player().pitch = -std::f32::consts::FRAC_PI_2;
        let target = s.player_target().expect("looking at the ground");
        assert_eq!(target.block(), (0, 3, 0));

        let stone = s.reg.id_by_name("stone").unwrap();
        s.use_item(ItemKind::BlockItem(stone));
        assert_eq!(s.world.block_at(0, 4, 0), stone);

        s.use_item(ItemKind::Bomb);
        assert!(
            s.sim
                .entities
                .iter()
                .any(|e| matches!(e.kind, EntityKind::Bomb { .. }))
        );
    }

    #[test]
    fn breaking_below_reach_returns_the_block() {
        let mut s = GameSession::new(registry(), &WorldGenConfig::flat(4), 2).unwrap();
        for _ in 0..60 {
            s.step();
        }
        let p = s.player();
        p.pitch = -std::f32::consts::FRAC_PI_2;
        let grass = s.reg.id_by_name("grass").unwrap();
        assert_eq!(s.break_target(), Some(grass));
    }
}
