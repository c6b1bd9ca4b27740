use impact2d::math::{Isometry, Real, Vector};
use impact2d::pipeline::{Collider, ColliderSet, ManifoldRegistry, NarrowPhase};
use impact2d::shape::ColliderShape;

fn main() {
    let mut colliders = ColliderSet::new();
    let ground = colliders.insert(Collider::new(ColliderShape::cuboid(10.0, 0.5)));
    let cube = colliders.insert(
        Collider::new(ColliderShape::cuboid(0.5, 0.5))
            .with_position(Isometry::new(Vector::new(0.0, 0.9), 0.1)),
    );
    let ball = colliders.insert(
        Collider::new(ColliderShape::ball(0.5)).with_position(Isometry::translation(3.0, 0.9)),
    );
    let far_ball = colliders.insert(
        Collider::new(ColliderShape::ball(0.5)).with_position(Isometry::translation(6.0, 4.0)),
    );

    let pairs = [(ground, cube), (ground, ball), (ground, far_ball)];
    let narrow_phase = NarrowPhase::default();
    let mut registry = ManifoldRegistry::<Real>::default();

    for (handle, _) in colliders.iter() {
        registry.register_collider(handle);
    }

    for contact in narrow_phase.detect_contacts(&colliders, pairs) {
        println!(
            "{:?} - {:?}: depth {:.3}, normal {:?}, at {:?}",
            contact.collider1, contact.collider2, contact.depth, contact.normal, contact.point1
        );
        registry.add_contact(
            &contact,
            colliders[contact.collider1].position(),
            colliders[contact.collider2].position(),
        );
    }
    registry.validate();

    assert_eq!(registry.contacts(ground, cube).len(), 2);
    assert_eq!(registry.contacts(ground, ball).len(), 1);
    assert!(registry.contacts(ground, far_ball).is_empty());

    let closest = narrow_phase
        .closest_points(&colliders, ground, far_ball)
        .unwrap();
    println!("Distance to the far ball: {}", closest.distance);
    assert!(closest.distance > 2.9);
}
