use delve_blocks::BlockId;
use delve_geom::{Aabb, Vec3};

/// Closed set of entity kinds; behavior is selected by matching on the kind,
/// and kind-specific state lives in the variant.
#[derive(Clone, Debug)]
pub enum EntityKind {
    Player,
    DroppedItem { block: BlockId },
    Bomb { fuse_ticks: u32 },
    Explosion { age_ticks: u32 },
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    /// Feet position: x,z at the hitbox center, y at its bottom.
    pub pos: Vec3,
    /// Heading in radians; pitch tilts the view ray only.
    pub yaw: f32,
    pub pitch: f32,
    /// Impulse-driven displacement per tick; damped toward zero and pulled
    /// down by gravity.
    pub dynamic_vel: Vec3,
    /// Input-driven displacement per tick; recomputed from intent every tick.
    pub fixed_vel: Vec3,
    /// Full hitbox extents.
    pub dims: Vec3,
    /// Derived from `pos` after every move; never mutated directly.
    pub hitbox: Aabb,
    /// Block the entity rested on last tick, for the collision fast path.
    pub standing_on: Option<(i32, i32, i32)>,
    /// Disables gravity and the terminal clamp.
    pub flying: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec3, dims: Vec3) -> Self {
        let mut e = Self {
            kind,
            pos,
            yaw: 0.0,
            pitch: 0.0,
            dynamic_vel: Vec3::ZERO,
            fixed_vel: Vec3::ZERO,
            dims,
            hitbox: Aabb::default(),
            standing_on: None,
            flying: false,
        };
        e.refresh_hitbox();
        e
    }

    pub fn player(pos: Vec3) -> Self {
        Self::new(EntityKind::Player, pos, Vec3::new(0.6, 1.8, 0.6))
    }

    pub fn dropped_item(pos: Vec3, block: BlockId) -> Self {
        Self::new(EntityKind::DroppedItem { block }, pos, Vec3::new(0.25, 0.25, 0.25))
    }

    pub fn bomb(pos: Vec3, fuse_ticks: u32) -> Self {
        Self::new(EntityKind::Bomb { fuse_ticks }, pos, Vec3::new(0.5, 0.5, 0.5))
    }

    pub fn explosion(pos: Vec3) -> Self {
        Self::new(EntityKind::Explosion { age_ticks: 0 }, pos, Vec3::new(1.0, 1.0, 1.0))
    }

    #[inline]
    pub fn refresh_hitbox(&mut self) {
        let half_x = self.dims.x * 0.5;
        let half_z = self.dims.z * 0.5;
        self.hitbox = Aabb::new(
            Vec3::new(self.pos.x - half_x, self.pos.y, self.pos.z - half_z),
            Vec3::new(self.pos.x + half_x, self.pos.y + self.dims.y, self.pos.z + half_z),
        );
    }

    /// Eye point the view ray starts from.
    #[inline]
    pub fn eye_pos(&self) -> Vec3 {
        Vec3::new(self.pos.x, self.pos.y + self.dims.y * 0.9, self.pos.z)
    }

    /// Unit view direction from yaw and pitch.
    pub fn facing(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cy * cp, sp, sy * cp).normalized()
    }

    /// Recomputes the input-driven velocity from a movement intent on the XZ
    /// plane (forward/strafe, unnormalized), rotated into the current heading.
    pub fn set_move_intent(&mut self, intent: Vec3, speed: f32, dt: f32) {
        let flat = Vec3::new(intent.x, 0.0, intent.z);
        if flat.length() < 1e-6 {
            self.fixed_vel = Vec3::ZERO;
            return;
        }
        self.fixed_vel = flat.normalized().rotated_yaw(self.yaw) * speed * dt;
    }

    /// Adds an impulse (jump, knockback, throw recoil) to the damped velocity.
    #[inline]
    pub fn impulse(&mut self, v: Vec3) {
        self.dynamic_vel += v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_intent_follows_heading() {
        let mut e = Entity::player(Vec3::ZERO);
        e.yaw = std::f32::consts::FRAC_PI_2;
        e.set_move_intent(Vec3::new(1.0, 0.0, 0.0), 2.0, 0.5);
        assert!(e.fixed_vel.x.abs() < 1e-5);
        assert!((e.fixed_vel.z + 1.0).abs() < 1e-5);
        e.set_move_intent(Vec3::ZERO, 2.0, 0.5);
        assert_eq!(e.fixed_vel, Vec3::ZERO);
    }

    #[test]
    fn hitbox_is_centered_on_xz_and_feet_on_y() {
        let e = Entity::player(Vec3::new(10.0, 4.0, -3.0));
        let b = e.hitbox;
        assert_eq!(b.min.y, 4.0);
        assert!((b.max.y - 5.8).abs() < 1e-5);
        assert!(((b.min.x + b.max.x) * 0.5 - 10.0).abs() < 1e-5);
        assert!(((b.min.z + b.max.z) * 0.5 + 3.0).abs() < 1e-5);
        assert!((b.max.x - b.min.x - 0.6).abs() < 1e-5);
    }
}
