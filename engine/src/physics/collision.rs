//! Collision query module
//!
//! The camera rig and the movement controller never own world geometry. They
//! talk to it through [`CollisionWorld`], a read-only collaborator exposing two
//! synchronous point queries:
//!
//! - [`CollisionWorld::query_shape_overlap`] - is a sphere touching anything?
//! - [`CollisionWorld::cast_shape`] - sweep a sphere (radius 0 = ray) and report
//!   the nearest surface hit.
//!
//! [`StaticWorld`] is a small brute-force implementation over planes, boxes and
//! spheres. It is what the tests and the headless simulation run against; a
//! game would implement the trait on top of its own physics engine instead.
//!
//! # Ray-AABB Intersection
//!
//! Box casts use the slab method: a sphere of radius `r` swept against a box is
//! approximated by a ray against the box grown by `r` on every side. The grown
//! box is conservative at the edges and corners, which only ever pulls the
//! camera in slightly earlier.
//!
//! # Example
//!
//! ```ignore
//! use orbit_rig_engine::physics::{CollisionWorld, LayerMask, StaticWorld};
//! use glam::Vec3;
//!
//! let mut world = StaticWorld::new();
//! world.add_ground_plane(0.0);
//!
//! let hit = world.cast_shape(Vec3::new(0.0, 5.0, 0.0), 0.3, Vec3::NEG_Y, 10.0, LayerMask::ALL);
//! assert!(hit.is_some());
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Directions shorter than this are treated as degenerate by every query.
pub const DIRECTION_EPSILON: f32 = 1e-6;

// =============================================================================
// Layers
// =============================================================================

/// Collision layer index (0..32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Layer {
    /// Static environment geometry.
    pub const ENVIRONMENT: Layer = Layer(0);
    /// The controlled character's own collider.
    pub const PLAYER: Layer = Layer(6);
    /// Geometry that only blocks the camera.
    pub const CAMERA_BLOCKER: Layer = Layer(8);

    /// Bit for this layer inside a [`LayerMask`].
    #[inline]
    pub fn bit(self) -> u32 {
        1u32 << (self.0 & 31)
    }
}

/// Bit set of collision layers a query is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing a single layer.
    pub fn only(layer: Layer) -> Self {
        Self(layer.bit())
    }

    /// Everything except the given layer (e.g. "all but the player").
    pub fn all_except(layer: Layer) -> Self {
        Self(!layer.bit())
    }

    /// Remove a layer from the mask.
    pub fn without(self, layer: Layer) -> Self {
        Self(self.0 & !layer.bit())
    }

    /// Add a layer to the mask.
    pub fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer.bit())
    }

    /// Check if the mask accepts a layer.
    #[inline]
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::all_except(Layer::PLAYER)
    }
}

// =============================================================================
// Query results and the collaborator trait
// =============================================================================

/// Nearest surface hit reported by a shape cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Distance the shape travelled along the cast direction before touching
    pub distance: f32,
    /// World-space contact point on the surface
    pub point: Vec3,
    /// Surface normal at the contact (normalized, facing the caster)
    pub normal: Vec3,
}

impl ShapeHit {
    /// Creates a new ShapeHit with the given parameters.
    pub fn new(distance: f32, point: Vec3, normal: Vec3) -> Self {
        Self {
            distance,
            point,
            normal,
        }
    }
}

/// Read-only spatial query service shared by the camera rig and the movement
/// controller.
///
/// Both calls are one-shot and synchronous. Implementations must never mutate
/// world state from inside a query.
pub trait CollisionWorld {
    /// Returns `true` when a sphere at `point` overlaps any collider in `mask`.
    fn query_shape_overlap(&self, point: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Sweeps a sphere of `radius` from `origin` along `direction` (normalized)
    /// for at most `max_distance`, returning the closest hit in `mask`.
    ///
    /// A `radius` of zero is a plain ray cast. A shape that already overlaps
    /// something at `origin` reports a hit at distance 0, but only for surfaces
    /// it is moving into.
    fn cast_shape(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ShapeHit>;
}

/// A world with nothing in it: every cast misses and nothing overlaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWorld;

impl CollisionWorld for EmptyWorld {
    fn query_shape_overlap(&self, _point: Vec3, _radius: f32, _mask: LayerMask) -> bool {
        false
    }

    fn cast_shape(
        &self,
        _origin: Vec3,
        _radius: f32,
        _direction: Vec3,
        _max_distance: f32,
        _mask: LayerMask,
    ) -> Option<ShapeHit> {
        None
    }
}

// =============================================================================
// Primitive intersection helpers
// =============================================================================

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters and exits the AABB
/// at valid times (t_enter < t_exit and t_exit > 0), there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point, 0 when starting inside
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get huge inverse values so their slab never clips
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let local = point - center;

    // Normalize to unit cube space
    let normalized = local / half_extents;
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Ray-sphere intersection. Returns the entry distance, 0 when starting inside.
pub fn ray_sphere_intersect(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray_origin - center;
    let c = to_origin.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = to_origin.dot(ray_dir);
    if b > 0.0 {
        // Outside and pointing away
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some((-b - discriminant.sqrt()).max(0.0))
}

// =============================================================================
// StaticWorld - brute-force reference implementation
// =============================================================================

/// Geometric shape of a static collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Solid half-space below the plane `normal · p = offset`
    Plane { normal: Vec3, offset: f32 },
    /// Axis-aligned box
    Aabb { min: Vec3, max: Vec3 },
    /// Solid sphere
    Sphere { center: Vec3, radius: f32 },
}

/// A static collider tagged with the layer it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    pub layer: Layer,
}

impl Collider {
    /// Sphere-overlap test against this collider.
    fn overlaps(&self, point: Vec3, radius: f32) -> bool {
        match self.shape {
            ColliderShape::Plane { normal, offset } => normal.dot(point) - offset <= radius,
            ColliderShape::Aabb { min, max } => {
                let closest = point.clamp(min, max);
                closest.distance_squared(point) <= radius * radius
            }
            ColliderShape::Sphere { center, radius: r } => {
                center.distance_squared(point) <= (r + radius) * (r + radius)
            }
        }
    }

    /// Sphere sweep against this collider.
    fn cast(&self, origin: Vec3, radius: f32, direction: Vec3, max_distance: f32) -> Option<ShapeHit> {
        match self.shape {
            ColliderShape::Plane { normal, offset } => {
                let start = normal.dot(origin) - offset;
                if start <= radius {
                    return Some(ShapeHit::new(0.0, origin - normal * start, normal));
                }
                let approach = normal.dot(direction);
                if approach >= -DIRECTION_EPSILON {
                    // Parallel or moving away from the surface
                    return None;
                }
                let t = (radius - start) / approach;
                if t > max_distance {
                    return None;
                }
                let center = origin + direction * t;
                Some(ShapeHit::new(t, center - normal * radius, normal))
            }
            ColliderShape::Aabb { min, max } => {
                let grown_min = min - Vec3::splat(radius);
                let grown_max = max + Vec3::splat(radius);
                let t = ray_aabb_intersect(origin, direction, grown_min, grown_max)?;
                if t > max_distance {
                    return None;
                }
                let center = origin + direction * t;
                let normal = aabb_surface_normal(center, grown_min, grown_max);
                Some(ShapeHit::new(t, center.clamp(min, max), normal))
            }
            ColliderShape::Sphere { center, radius: r } => {
                let t = ray_sphere_intersect(origin, direction, center, r + radius)?;
                if t > max_distance {
                    return None;
                }
                let hit_center = origin + direction * t;
                let normal = (hit_center - center).normalize_or(Vec3::Y);
                Some(ShapeHit::new(t, center + normal * r, normal))
            }
        }
    }
}

/// A flat list of static colliders queried by brute force.
///
/// Good enough for tests and small scenes; there is no broad phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    colliders: Vec<Collider>,
}

impl StaticWorld {
    /// Creates a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary collider.
    pub fn add(&mut self, shape: ColliderShape, layer: Layer) -> &mut Self {
        self.colliders.push(Collider { shape, layer });
        self
    }

    /// Adds a horizontal ground plane at height `y` on the environment layer.
    pub fn add_ground_plane(&mut self, y: f32) -> &mut Self {
        self.add_plane(Vec3::Y, y)
    }

    /// Adds a plane through `normal * offset` whose solid side is behind `normal`.
    pub fn add_plane(&mut self, normal: Vec3, offset: f32) -> &mut Self {
        let normal = normal.normalize_or(Vec3::Y);
        self.add(ColliderShape::Plane { normal, offset }, Layer::ENVIRONMENT)
    }

    /// Adds an axis-aligned box on the environment layer.
    pub fn add_box(&mut self, min: Vec3, max: Vec3) -> &mut Self {
        self.add(
            ColliderShape::Aabb {
                min: min.min(max),
                max: min.max(max),
            },
            Layer::ENVIRONMENT,
        )
    }

    /// Adds a solid sphere on the environment layer.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32) -> &mut Self {
        self.add(
            ColliderShape::Sphere {
                center,
                radius: radius.abs(),
            },
            Layer::ENVIRONMENT,
        )
    }

    /// Returns the number of colliders in the world.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns true if the world contains no colliders.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Clears all colliders.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Returns an iterator over all colliders.
    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }
}

impl CollisionWorld for StaticWorld {
    fn query_shape_overlap(&self, point: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.colliders
            .iter()
            .filter(|c| mask.contains(c.layer))
            .any(|c| c.overlaps(point, radius.max(0.0)))
    }

    fn cast_shape(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ShapeHit> {
        let direction = direction.normalize_or_zero();
        if direction.length_squared() < DIRECTION_EPSILON || !(max_distance >= 0.0) {
            return None;
        }

        let mut closest: Option<ShapeHit> = None;
        for collider in self.colliders.iter().filter(|c| mask.contains(c.layer)) {
            let limit = closest.map_or(max_distance, |hit| hit.distance);
            if let Some(hit) = collider.cast(origin, radius.max(0.0), direction, limit) {
                // Touching a surface while sliding along or leaving it is not a hit
                if hit.normal.dot(direction) >= 0.0 {
                    continue;
                }
                if closest.is_none_or(|c| hit.distance < c.distance) {
                    closest = Some(hit);
                }
            }
        }
        closest
    }
}
