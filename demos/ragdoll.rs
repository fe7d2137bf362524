use impulse2d::body::PhysicsBody;
use impulse2d::collider::Collider;
use impulse2d::spring::Spring;
use impulse2d::world::PhysicsWorld;
use impulse2d::Vec2;

// Floating two-part pet: a circle head over a box torso, joined by a stiff
// damped neck spring. Low gravity scale keeps the assembly drifting instead
// of dropping.
fn main() {
    let mut world = PhysicsWorld::builder().build();
    let origin = Vec2::new(0.0, 2.0);

    let head = world.add_body(
        PhysicsBody::new(
            origin + Vec2::new(0.0, 1.0),
            2.0,
            Collider::Circle { radius: 0.4 },
        )
        .with_gravity_scale(0.1),
    );
    let torso = world.add_body(
        PhysicsBody::new(
            origin + Vec2::new(0.0, 0.2),
            5.0,
            Collider::Box {
                half_extent: Vec2::new(0.3, 0.4),
            },
        )
        .with_gravity_scale(0.1),
    );
    world.add_spring(
        Spring::new(head, torso, 0.4)
            .with_stiffness(200.0)
            .with_damping(10.0),
    );

    // Poke the head sideways and let the neck spring settle.
    if let Some(body) = world.body_mut(head) {
        body.apply_impulse(Vec2::new(1.5, 0.0));
    }

    for i in 0..240 {
        world.step_fixed();
        if i % 30 == 0 {
            let h = world.body(head).unwrap().position;
            let t = world.body(torso).unwrap().position;
            println!(
                "t={:5.2}s head=({:5.2}, {:5.2}) torso=({:5.2}, {:5.2})",
                i as f32 / 60.0,
                h.x,
                h.y,
                t.x,
                t.y
            );
        }
    }
}
