//! Navigation and physics seams.
//!
//! The simulation only needs two questions answered by the outside world:
//! "where can this agent walk" and "what does this ray hit". Hosts plug in
//! their own engine behind these traits. The built-in implementations are
//! an obstacle-free ground plane and a set of hit spheres, enough to run
//! the game headless.

use std::collections::HashMap;

use glam::Vec3;
use hecs::Entity;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cashrun_core::enums::HitTag;

/// Pathfinding for enemy agents.
pub trait Navigator {
    /// A random reachable point within `radius` of `center`, if any.
    fn sample_reachable_point(&mut self, center: Vec3, radius: f32) -> Option<Vec3>;
    fn set_move_target(&mut self, agent: Entity, target: Vec3);
    fn stop_movement(&mut self, agent: Entity);

    fn register_agent(&mut self, _agent: Entity, _position: Vec3, _speed: f32) {}
    fn remove_agent(&mut self, _agent: Entity) {}

    /// Where the navigator has moved `agent` to. `None` leaves the
    /// simulation's transform untouched.
    fn agent_position(&self, _agent: Entity) -> Option<Vec3> {
        None
    }

    /// Move every agent along its path by `dt` seconds.
    fn advance(&mut self, _dt: f32) {}
}

/// Closest hit of a weapon ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub target: Entity,
    pub tag: HitTag,
    pub distance: f32,
}

/// Hit detection for weapon rays.
pub trait Physics {
    fn raycast_forward(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RaycastHit>;

    fn sync_collider(&mut self, _entity: Entity, _center: Vec3, _radius: f32, _tag: HitTag) {}
    fn remove_collider(&mut self, _entity: Entity) {}
}

#[derive(Debug, Clone, Copy)]
struct Agent {
    position: Vec3,
    speed: f32,
    target: Option<Vec3>,
}

/// Straight-line movement over an empty ground plane.
#[derive(Debug)]
pub struct OpenFieldNavigator {
    rng: ChaCha8Rng,
    agents: HashMap<Entity, Agent>,
}

impl OpenFieldNavigator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            agents: HashMap::new(),
        }
    }

    pub fn move_target(&self, agent: Entity) -> Option<Vec3> {
        self.agents.get(&agent).and_then(|a| a.target)
    }
}

impl Navigator for OpenFieldNavigator {
    fn sample_reachable_point(&mut self, center: Vec3, radius: f32) -> Option<Vec3> {
        if radius <= 0.0 {
            return Some(center);
        }
        // Rejection sampling inside the unit disc.
        loop {
            let x: f32 = self.rng.gen_range(-1.0..=1.0);
            let z: f32 = self.rng.gen_range(-1.0..=1.0);
            if x * x + z * z <= 1.0 {
                return Some(center + Vec3::new(x, 0.0, z) * radius);
            }
        }
    }

    fn set_move_target(&mut self, agent: Entity, target: Vec3) {
        if let Some(state) = self.agents.get_mut(&agent) {
            state.target = Some(target);
        }
    }

    fn stop_movement(&mut self, agent: Entity) {
        if let Some(state) = self.agents.get_mut(&agent) {
            state.target = None;
        }
    }

    fn register_agent(&mut self, agent: Entity, position: Vec3, speed: f32) {
        self.agents.insert(
            agent,
            Agent {
                position,
                speed,
                target: None,
            },
        );
    }

    fn remove_agent(&mut self, agent: Entity) {
        self.agents.remove(&agent);
    }

    fn agent_position(&self, agent: Entity) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.position)
    }

    fn advance(&mut self, dt: f32) {
        for agent in self.agents.values_mut() {
            let Some(target) = agent.target else {
                continue;
            };
            let to_target = target - agent.position;
            let distance = to_target.length();
            let step = agent.speed * dt;
            if distance <= step {
                agent.position = target;
                agent.target = None;
            } else {
                agent.position += to_target / distance * step;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Sphere {
    center: Vec3,
    radius: f32,
    tag: HitTag,
}

/// Ray-vs-sphere hit detection.
#[derive(Debug, Default)]
pub struct SphereColliders {
    spheres: HashMap<Entity, Sphere>,
}

impl SphereColliders {
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

impl Physics for SphereColliders {
    fn raycast_forward(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        self.spheres
            .iter()
            .filter_map(|(entity, sphere)| {
                ray_sphere_distance(origin, direction, sphere)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| RaycastHit {
                        target: *entity,
                        tag: sphere.tag,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn sync_collider(&mut self, entity: Entity, center: Vec3, radius: f32, tag: HitTag) {
        self.spheres.insert(entity, Sphere { center, radius, tag });
    }

    fn remove_collider(&mut self, entity: Entity) {
        self.spheres.remove(&entity);
    }
}

/// Distance along a unit ray to the first sphere surface, or 0 when the
/// origin is inside the sphere.
fn ray_sphere_distance(origin: Vec3, direction: Vec3, sphere: &Sphere) -> Option<f32> {
    let offset = origin - sphere.center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - sphere.radius * sphere.radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let far = -b + root;
    if far < 0.0 {
        return None;
    }
    Some((-b - root).max(0.0))
}
