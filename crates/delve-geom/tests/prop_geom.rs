use delve_geom::{Aabb, Vec3};
use proptest::prelude::*;

// Integer-cornered boxes and translations: f32 arithmetic on these values is
// exact, so the properties hold with equality rather than within a tolerance.
fn arb_box() -> impl Strategy<Value = Aabb> {
    (
        (-512i32..512, -512i32..512, -512i32..512),
        (1i32..64, 1i32..64, 1i32..64),
    )
        .prop_map(|((x, y, z), (w, h, d))| {
            let min = Vec3::new(x as f32, y as f32, z as f32);
            Aabb::new(min, min + Vec3::new(w as f32, h as f32, d as f32))
        })
}

fn arb_int_vec3() -> impl Strategy<Value = Vec3> {
    (-512i32..512, -512i32..512, -512i32..512)
        .prop_map(|(x, y, z)| Vec3::new(x as f32, y as f32, z as f32))
}

proptest! {
    #[test]
    fn intersection_is_symmetric(a in arb_box(), b in arb_box()) {
        prop_assert_eq!(a.intersects(b), b.intersects(a));
    }

    #[test]
    fn translation_preserves_intersection(a in arb_box(), b in arb_box(), d in arb_int_vec3()) {
        let hit = a.intersects(b);
        prop_assert_eq!(a.translated(d).intersects(b.translated(d)), hit);
    }

    #[test]
    fn ray_from_inside_enters_at_zero(b in arb_box(), dir in arb_int_vec3()) {
        prop_assume!(dir.length() > 0.0);
        let center = b.min + (b.max - b.min) * 0.5;
        prop_assert_eq!(b.ray_enter(center, dir.normalized()), Some(0.0));
    }

    #[test]
    fn unit_cube_contains_its_center(x in -64i32..64, y in -64i32..64, z in -64i32..64) {
        let b = Aabb::unit_cube(x, y, z);
        let c = (b.min + b.max) * 0.5;
        prop_assert!(c.x > b.min.x && c.x < b.max.x);
        prop_assert!(c.y > b.min.y && c.y < b.max.y);
        prop_assert!(c.z > b.min.z && c.z < b.max.z);
    }
}
