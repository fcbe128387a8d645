//! Entity simulation: movement, collision, targeting, and item effects.
#![forbid(unsafe_code)]

pub mod entity;
pub mod items;
pub mod movement;
pub mod target;

pub use entity::{Entity, EntityKind};
pub use items::{ItemKind, UseEffect};
pub use movement::step_entity;
pub use target::{Target, hit_point, target_face};

use delve_blocks::BlockRegistry;
use delve_light::LightEngine;
use delve_world::GridWorld;

/// Seconds per simulation tick.
pub const TICK_DT: f32 = 1.0 / 30.0;

/// Owns the live entities and advances them one tick at a time. Movement
/// reads the world; fuse and detonation effects write back through the edit
/// path, so the step is split into a read phase and a write phase.
pub struct Simulation {
    pub entities: Vec<Entity>,
}

impl Simulation {
    pub fn new() -> Self {
        Self { entities: Vec::new() }
    }

    pub fn spawn(&mut self, e: Entity) -> usize {
        self.entities.push(e);
        self.entities.len() - 1
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| matches!(e.kind, EntityKind::Player))
    }

    /// Advances every entity one tick, then applies the tick's world effects:
    /// expired bomb fuses detonate and explosions age out.
    pub fn step(&mut self, world: &mut GridWorld, reg: &BlockRegistry, light: &mut LightEngine) {
        for e in &mut self.entities {
            movement::step_entity(world, reg, e, TICK_DT);
        }

        let mut detonations = Vec::new();
        self.entities.retain_mut(|e| match &mut e.kind {
            EntityKind::Bomb { fuse_ticks } => {
                if *fuse_ticks == 0 {
                    detonations.push(e.pos + e.dims * 0.5);
                    false
                } else {
                    *fuse_ticks -= 1;
                    true
                }
            }
            EntityKind::Explosion { age_ticks } => {
                *age_ticks += 1;
                *age_ticks < items::EXPLOSION_LIFETIME_TICKS
            }
            _ => true,
        });
        for center in detonations {
            items::detonate(world, reg, light, center);
            self.entities.push(Entity::explosion(center));
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
