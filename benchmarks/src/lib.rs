//! Scene builders shared by the physics benchmarks.

use anyhow::Context;
use glam::{UVec2, Vec2};
use rein2d::physics::Candidate;
use rein2d::{Collider, GlobalTransform, PhysicsConfig, PhysicsWorld, RigidBody, Transform};

/// Deterministic pseudo-random sequence in [0, 1).
pub struct Lcg(u32);

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self(seed)
    }

    pub fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (self.0 >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in `[-half, half)`.
    pub fn spread(&mut self, half: f32) -> f32 {
        (self.next_f32() * 2.0 - 1.0) * half
    }
}

pub fn spawn_collider(
    world: &mut hecs::World,
    position: Vec2,
    body: Option<RigidBody>,
    collider: Collider,
) -> hecs::Entity {
    let transform = Transform::from_position(position);
    let entity = world.spawn((transform, GlobalTransform::from(transform), collider));
    if let Some(body) = body {
        // Freshly spawned entity always exists
        let _ = world.insert_one(entity, body);
    }
    entity
}

/// `n` dynamic circles and boxes scattered over a `extent` x `extent`
/// square, above a static floor, all registered with a physics world.
pub fn build_scene(
    n: usize,
    extent: f32,
    config: PhysicsConfig,
) -> anyhow::Result<(hecs::World, PhysicsWorld)> {
    let mut world = hecs::World::new();
    let mut physics = PhysicsWorld::try_new(config).context("invalid physics config")?;
    let mut rng = Lcg::new(42);

    spawn_collider(
        &mut world,
        Vec2::new(0.0, -extent * 0.5 - 1.0),
        Some(RigidBody::new_static()),
        Collider::cuboid(extent * 2.0, 2.0),
    );
    for i in 0..n {
        let position = Vec2::new(rng.spread(extent * 0.5), rng.spread(extent * 0.5));
        let collider = if i % 2 == 0 {
            Collider::circle(0.3 + rng.next_f32() * 0.3)
        } else {
            Collider::cuboid(0.5 + rng.next_f32() * 0.5, 0.5 + rng.next_f32() * 0.5)
        };
        spawn_collider(
            &mut world,
            position,
            Some(RigidBody::new_dynamic(1.0)),
            collider,
        );
    }

    physics.add_all_colliders(&world);
    Ok((world, physics))
}

/// Scene with the density of a `n`-body pile in a square sized for it.
pub fn setup_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    build_scene(n, scene_extent(n), PhysicsConfig::default()).expect("scene setup")
}

/// Same scene with the broadphase grid sized to cover it.
pub fn setup_partitioned_scene(n: usize, grid: u32) -> (hecs::World, PhysicsWorld) {
    let extent = scene_extent(n);
    let mut config = PhysicsConfig::default();
    config.partition.enabled = true;
    config.partition.min_colliders = 0;
    config.partition.grid_size = UVec2::splat(grid);
    config.partition.viewport = Vec2::splat(extent + 4.0);
    build_scene(n, extent, config).expect("scene setup")
}

/// Same scene with grid partitioning off.
pub fn setup_unpartitioned_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut config = PhysicsConfig::default();
    config.partition.enabled = false;
    build_scene(n, scene_extent(n), config).expect("scene setup")
}

fn scene_extent(n: usize) -> f32 {
    (n as f32).sqrt() * 1.5 + 4.0
}

/// Broadphase candidates for every collider in `world`.
pub fn candidates(world: &hecs::World) -> Vec<Candidate> {
    let entities: Vec<hecs::Entity> = world
        .query::<&Collider>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    entities
        .into_iter()
        .filter_map(|entity| {
            let aabb = rein2d::physics::collider::collider_aabb(world, entity)?;
            let body = rein2d::physics::collider::attached_body(world, entity);
            Some(Candidate {
                collider: entity,
                body,
                aabb,
            })
        })
        .collect()
}
