//! Arcade Physics Bodies
//!
//! Axis-aligned boxes positioned by their centre. Static bodies never move;
//! dynamic bodies integrate gravity and velocity once per tick and may be
//! clamped to the world rectangle.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, fixed_mul, rebound};
use crate::core::vec2::FixedVec2;

/// Axis-aligned bounding box in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: FixedVec2,
    /// Bottom-right corner
    pub max: FixedVec2,
}

impl Aabb {
    /// Box centred on `center` with the given half extents.
    #[inline]
    pub fn from_center(center: FixedVec2, half_size: FixedVec2) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Strict intersection test; boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth on each axis. Only meaningful when overlapping.
    #[inline]
    pub fn penetration(&self, other: &Aabb) -> FixedVec2 {
        let x = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let y = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        FixedVec2::new(x, y)
    }
}

/// Which faces of a body are in contact with something.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    /// Contact above
    pub up: bool,
    /// Contact below (standing on something)
    pub down: bool,
    /// Contact on the left
    pub left: bool,
    /// Contact on the right
    pub right: bool,
}

impl Contacts {
    /// No contact on any face.
    pub const NONE: Self = Self { up: false, down: false, left: false, right: false };
}

/// An immovable body. Platforms never change after the scene is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticBody {
    /// Centre position
    pub position: FixedVec2,
    /// Half width / half height
    pub half_size: FixedVec2,
}

impl StaticBody {
    /// Static body of `size` centred on `position`.
    pub fn new(position: FixedVec2, size: FixedVec2) -> Self {
        Self {
            position,
            half_size: size.half(),
        }
    }

    /// Bounding box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_size)
    }
}

/// A dynamic arcade body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Centre position
    pub position: FixedVec2,
    /// Half width / half height
    pub half_size: FixedVec2,
    /// Velocity in px/s
    pub velocity: FixedVec2,
    /// Rebound factor per axis (0 = dead stop, FIXED_ONE = elastic)
    pub bounce: FixedVec2,
    /// Gravity added on top of the world gravity
    pub extra_gravity: Fixed,
    /// Clamp to the world rectangle
    pub collide_world_bounds: bool,
    /// Disabled bodies neither move nor collide
    pub enabled: bool,
    /// Contacts with other bodies from the last physics step
    pub touching: Contacts,
    /// Contacts with the world bounds from the last physics step
    pub blocked: Contacts,
}

impl Body {
    /// New enabled body at rest.
    pub fn new(position: FixedVec2, size: FixedVec2) -> Self {
        Self {
            position,
            half_size: size.half(),
            velocity: FixedVec2::ZERO,
            bounce: FixedVec2::ZERO,
            extra_gravity: 0,
            collide_world_bounds: false,
            enabled: true,
            touching: Contacts::NONE,
            blocked: Contacts::NONE,
        }
    }

    /// Set the same bounce on both axes.
    pub fn with_bounce(mut self, bounce: Fixed) -> Self {
        self.bounce = FixedVec2::new(bounce, bounce);
        self
    }

    /// Set the vertical bounce only.
    pub fn with_bounce_y(mut self, bounce: Fixed) -> Self {
        self.bounce.y = bounce;
        self
    }

    /// Clamp to world bounds.
    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    /// Extra downward acceleration for this body only.
    pub fn with_extra_gravity(mut self, gravity: Fixed) -> Self {
        self.extra_gravity = gravity;
        self
    }

    /// Current bounding box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_size)
    }

    /// Clear contact flags ahead of a physics step.
    pub fn reset_contacts(&mut self) {
        self.touching = Contacts::NONE;
        self.blocked = Contacts::NONE;
    }

    /// Apply gravity, then move by velocity.
    pub fn integrate(&mut self, gravity: Fixed, dt: Fixed) {
        let accel = gravity.wrapping_add(self.extra_gravity);
        self.velocity.y = self.velocity.y.wrapping_add(fixed_mul(accel, dt));
        self.position = self.position + self.velocity.scale(dt);
    }

    /// Keep the body inside `[0, world_size]`, rebounding off the edges.
    pub fn constrain_to_world(&mut self, world_size: FixedVec2) {
        if !self.collide_world_bounds {
            return;
        }

        let aabb = self.aabb();

        if aabb.min.x < 0 {
            self.position.x = self.half_size.x;
            if self.velocity.x < 0 {
                self.velocity.x = rebound(self.velocity.x, self.bounce.x);
            }
            self.blocked.left = true;
        } else if aabb.max.x > world_size.x {
            self.position.x = world_size.x - self.half_size.x;
            if self.velocity.x > 0 {
                self.velocity.x = rebound(self.velocity.x, self.bounce.x);
            }
            self.blocked.right = true;
        }

        if aabb.min.y < 0 {
            self.position.y = self.half_size.y;
            if self.velocity.y < 0 {
                self.velocity.y = rebound(self.velocity.y, self.bounce.y);
            }
            self.blocked.up = true;
        } else if aabb.max.y > world_size.y {
            self.position.y = world_size.y - self.half_size.y;
            if self.velocity.y > 0 {
                self.velocity.y = rebound(self.velocity.y, self.bounce.y);
            }
            self.blocked.down = true;
        }
    }

    /// Re-enable at `position`, at rest.
    pub fn reset(&mut self, position: FixedVec2) {
        self.position = position;
        self.velocity = FixedVec2::ZERO;
        self.enabled = true;
        self.reset_contacts();
    }

    /// Remove from simulation and display.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.velocity = FixedVec2::ZERO;
        self.reset_contacts();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, FIXED_ONE, TICK_DURATION, WORLD_WIDTH, WORLD_HEIGHT};

    fn world() -> FixedVec2 {
        FixedVec2::new(WORLD_WIDTH, WORLD_HEIGHT)
    }

    #[test]
    fn test_aabb_edges_do_not_overlap() {
        let a = Aabb::from_center(FixedVec2::from_ints(10, 10), FixedVec2::from_ints(5, 5));
        let b = Aabb::from_center(FixedVec2::from_ints(20, 10), FixedVec2::from_ints(5, 5));
        assert!(!a.overlaps(&b));

        let c = Aabb::from_center(FixedVec2::from_ints(19, 10), FixedVec2::from_ints(5, 5));
        assert!(a.overlaps(&c));
        assert_eq!(a.penetration(&c), FixedVec2::from_ints(1, 10));
    }

    #[test]
    fn test_integrate_applies_gravity_then_moves() {
        let mut body = Body::new(FixedVec2::from_ints(100, 100), FixedVec2::from_ints(10, 10));
        body.integrate(from_int(300), TICK_DURATION);

        assert!(body.velocity.y > 0);
        assert!(body.position.y > from_int(100));
        assert_eq!(body.position.x, from_int(100));
    }

    #[test]
    fn test_extra_gravity_falls_faster() {
        let mut plain = Body::new(FixedVec2::from_ints(100, 100), FixedVec2::from_ints(10, 10));
        let mut heavy = plain.clone().with_extra_gravity(from_int(300));

        for _ in 0..30 {
            plain.integrate(from_int(300), TICK_DURATION);
            heavy.integrate(from_int(300), TICK_DURATION);
        }

        assert!(heavy.position.y > plain.position.y);
    }

    #[test]
    fn test_world_bounds_clamp_and_rebound() {
        let mut body = Body::new(FixedVec2::from_ints(2, 300), FixedVec2::from_ints(14, 14))
            .with_bounce(FIXED_ONE)
            .with_world_bounds();
        body.velocity = FixedVec2::from_ints(-150, 0);

        body.constrain_to_world(world());

        assert_eq!(body.position.x, from_int(7));
        assert_eq!(body.velocity.x, from_int(150));
        assert!(body.blocked.left);
        assert_eq!(body.touching, Contacts::NONE);
    }

    #[test]
    fn test_no_world_bounds_means_no_clamp() {
        let mut body = Body::new(FixedVec2::from_ints(-50, 300), FixedVec2::from_ints(14, 14));
        body.constrain_to_world(world());
        assert_eq!(body.position.x, from_int(-50));
    }

    #[test]
    fn test_scaled_floor_spans_world() {
        let floor = StaticBody::new(FixedVec2::from_ints(400, 568), FixedVec2::from_ints(800, 64));
        let aabb = floor.aabb();
        assert_eq!(aabb.min, FixedVec2::from_ints(0, 536));
        assert_eq!(aabb.max, FixedVec2::from_ints(800, 600));
    }

    #[test]
    fn test_reset_and_disable() {
        let mut body = Body::new(FixedVec2::from_ints(10, 10), FixedVec2::from_ints(24, 22));
        body.velocity = FixedVec2::from_ints(0, 90);
        body.disable();
        assert!(!body.enabled);

        body.reset(FixedVec2::from_ints(10, 0));
        assert!(body.enabled);
        assert_eq!(body.velocity, FixedVec2::ZERO);
        assert_eq!(body.position, FixedVec2::from_ints(10, 0));
    }
}
