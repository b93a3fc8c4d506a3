//! Soother detection

use hecs::World;

use crate::components::{Soother, Transform};

/// Whether a living soother stands within `range` of `origin`.
pub fn soother_in_range(world: &World, origin: &Transform, range: f32) -> bool {
    world
        .query::<(&Transform, &Soother)>()
        .iter()
        .any(|(_, (transform, soother))| soother.alive && origin.within(transform, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec3;

    #[test]
    fn test_dead_or_distant_soothers_ignored() {
        let mut world = World::new();
        let origin = Transform::new(Vec3::ZERO, 1);
        world.spawn((Transform::new(Vec3::new(5.0, 0.0, 0.0), 1), Soother { alive: false }));
        world.spawn((Transform::new(Vec3::new(50.0, 0.0, 0.0), 1), Soother { alive: true }));
        assert!(!soother_in_range(&world, &origin, 20.0));

        world.spawn((Transform::new(Vec3::new(10.0, 0.0, 0.0), 1), Soother { alive: true }));
        assert!(soother_in_range(&world, &origin, 20.0));
    }
}
