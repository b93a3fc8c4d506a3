//! Matter consumption - find what touches a crystal and turn it to ash

use crystal_logic::consumption::{MatterCandidate, MatterTraits};
use hecs::{Entity, EntityRef, World};

use crate::components::{
    Ash, Body, FoodEnergy, Ghost, HiddenUnderFloor, InContainer, Item, Projectile,
    ProjectileBolt, Prototype, Transform,
};

/// Read the consumption-relevant markers of an entity.
pub fn matter_traits(entity: EntityRef<'_>) -> MatterTraits {
    MatterTraits {
        body: entity.has::<Body>(),
        item: entity.has::<Item>(),
        projectile_bolt: entity.has::<ProjectileBolt>(),
        ash: entity.has::<Ash>(),
        in_container: entity.has::<InContainer>(),
        ghost: entity.has::<Ghost>(),
        under_floor: entity.has::<HiddenUnderFloor>(),
        food_energy: entity.get::<&FoodEnergy>().map(|f| f.0),
        projectile_damage: entity.get::<&Projectile>().map(|p| p.damage),
    }
}

/// Every other entity within `radius` of the crystal, with its traits.
pub fn matter_in_reach(
    world: &World,
    crystal: Entity,
    origin: &Transform,
    radius: f32,
) -> Vec<MatterCandidate> {
    let nearby: Vec<Entity> = world
        .query::<&Transform>()
        .iter()
        .filter(|(entity, transform)| *entity != crystal && origin.within(transform, radius))
        .map(|(entity, _)| entity)
        .collect();

    nearby
        .into_iter()
        .filter_map(|entity| {
            let entity_ref = world.entity(entity).ok()?;
            Some(MatterCandidate {
                id: entity.to_bits().get(),
                traits: matter_traits(entity_ref),
            })
        })
        .collect()
}

/// Delete a consumed entity and leave ash where it was.
///
/// Returns the ash entity, or `None` if the entity was already gone.
pub fn reduce_to_ash(world: &mut World, entity: Entity, ash_prototype: &str) -> Option<Entity> {
    let transform = *world.get::<&Transform>(entity).ok()?;
    world.despawn(entity).ok()?;
    Some(world.spawn((transform, Ash, Prototype(ash_prototype.to_string()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec3;

    fn at(x: f32) -> Transform {
        Transform::new(Vec3::new(x, 0.0, 0.0), 1)
    }

    #[test]
    fn test_reach_excludes_crystal_and_far_entities() {
        let mut world = World::new();
        let crystal = world.spawn((at(0.0),));
        let near = world.spawn((at(0.4), Item));
        let _far = world.spawn((at(3.0), Item));

        let found = matter_in_reach(&world, crystal, &at(0.0), 0.5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, near.to_bits().get());
        assert!(found[0].traits.item);
    }

    #[test]
    fn test_traits_read_from_components() {
        let mut world = World::new();
        let e = world.spawn((at(0.0), Item, FoodEnergy(12.0), InContainer));
        let traits = matter_traits(world.entity(e).unwrap());
        assert!(traits.item && traits.in_container);
        assert_eq!(traits.food_energy, Some(12.0));
        assert!(!traits.is_destructible());
    }

    #[test]
    fn test_reduce_to_ash_keeps_position() {
        let mut world = World::new();
        let e = world.spawn((at(0.3), Body));
        let ash = reduce_to_ash(&mut world, e, "Ash").unwrap();
        assert!(!world.contains(e));
        assert_eq!(*world.get::<&Transform>(ash).unwrap(), at(0.3));
        assert!(world.get::<&Ash>(ash).is_ok());
    }
}
