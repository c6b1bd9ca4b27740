use impact2d::math::{Isometry, Point, Real};
use impact2d::pipeline::{Collider, ColliderSet, NarrowPhase};
use impact2d::shape::{ColliderShape, MeshShape, Shape};
use impact2d::transformation;

fn main() {
    // A "U" shaped outline.
    let outline = [
        Point::new(0.0, 0.0),
        Point::new(6.0, 0.0),
        Point::new(6.0, 4.0),
        Point::new(5.0, 4.0),
        Point::new(5.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 4.0),
        Point::new(0.0, 4.0),
    ];

    let pieces = transformation::convex_decomposition(&outline).unwrap();
    for (i, piece) in pieces.iter().enumerate() {
        println!("Piece {}: {:?}", i, piece);
    }

    let mesh = MeshShape::from_outline(&outline).unwrap();
    println!(
        "{} pieces, OBB tree depth {}, area {}",
        mesh.pieces().len(),
        mesh.tree().depth(),
        mesh.area()
    );
    assert!((mesh.area() - 12.0 as Real).abs() < 1.0e-3);

    // Drop a ball inside of the "U".
    let mut colliders = ColliderSet::new();
    let cup = colliders.insert(Collider::new(mesh));
    let ball = colliders.insert(
        Collider::new(ColliderShape::ball(0.5)).with_position(Isometry::translation(3.0, 1.4)),
    );

    for contact in NarrowPhase::default().detect_contacts(&colliders, [(cup, ball)]) {
        println!(
            "Piece {} touches the ball with depth {:.3}",
            contact.subshape1, contact.depth
        );
    }
}
