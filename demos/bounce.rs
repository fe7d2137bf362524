use impulse2d::body::PhysicsBody;
use impulse2d::collider::Collider;
use impulse2d::world::PhysicsWorld;
use impulse2d::Vec2;

// Drops a bouncy ball onto a static ground box and prints its trajectory.
fn main() {
    let mut world = PhysicsWorld::builder()
        .gravity(Vec2::new(0.0, -5.0))
        .build();

    let _ground = world.add_body(PhysicsBody::new_static(
        Vec2::new(0.0, -2.0),
        Collider::Box {
            half_extent: Vec2::new(10.0, 0.5),
        },
    ));
    let ball = world.add_body(
        PhysicsBody::new(Vec2::new(0.0, 3.0), 1.0, Collider::Circle { radius: 0.5 })
            .with_restitution(0.7),
    );

    for i in 0..100 {
        let contacts = world.step(0.016).len();
        if i % 10 == 0 {
            let body = world.body(ball).unwrap();
            println!(
                "step {i:3}: y={:6.2} vy={:6.2} contacts={contacts}",
                body.position.y, body.velocity.y
            );
        }
    }
}
