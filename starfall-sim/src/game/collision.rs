//! Collision Detection
//!
//! Deterministic AABB colliders and overlap tests. Detectors only resolve
//! physics and report contacts; the tick loop dispatches the reports to the
//! gameplay handlers.

use crate::core::fixed::{fixed_mul, rebound};
use crate::game::body::{Aabb, Body, StaticBody};
use crate::game::state::SceneState;

/// Axis a collision was resolved along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

/// Pick the axis of least penetration. Ties resolve vertically so that a
/// body sitting exactly on a corner lands instead of sliding off.
fn separation_axis(a: &Aabb, b: &Aabb) -> Axis {
    let pen = a.penetration(b);
    if pen.x < pen.y { Axis::X } else { Axis::Y }
}

/// Collide a dynamic body against a static one.
///
/// Returns true if the bodies overlapped and were separated.
pub fn separate_from_static(body: &mut Body, other: &StaticBody) -> bool {
    if !body.enabled {
        return false;
    }

    let a = body.aabb();
    let b = other.aabb();
    if !a.overlaps(&b) {
        return false;
    }

    let pen = a.penetration(&b);
    match separation_axis(&a, &b) {
        Axis::Y => {
            if body.position.y <= other.position.y {
                // Landed on top
                body.position.y -= pen.y;
                if body.velocity.y > 0 {
                    body.velocity.y = rebound(body.velocity.y, body.bounce.y);
                }
                body.touching.down = true;
            } else {
                body.position.y += pen.y;
                if body.velocity.y < 0 {
                    body.velocity.y = rebound(body.velocity.y, body.bounce.y);
                }
                body.touching.up = true;
            }
        }
        Axis::X => {
            if body.position.x <= other.position.x {
                body.position.x -= pen.x;
                if body.velocity.x > 0 {
                    body.velocity.x = rebound(body.velocity.x, body.bounce.x);
                }
                body.touching.right = true;
            } else {
                body.position.x += pen.x;
                if body.velocity.x < 0 {
                    body.velocity.x = rebound(body.velocity.x, body.bounce.x);
                }
                body.touching.left = true;
            }
        }
    }

    true
}

/// Collide a dynamic body against every platform in order.
///
/// Returns true if any platform was touched.
pub fn collide_with_platforms(body: &mut Body, platforms: &[StaticBody]) -> bool {
    let mut hit = false;
    for platform in platforms {
        hit |= separate_from_static(body, platform);
    }
    hit
}

/// Collide two dynamic bodies.
///
/// The overlap is split evenly and the velocity components along the
/// separation axis are exchanged, each scaled by the receiving body's bounce.
pub fn separate_dynamic(a: &mut Body, b: &mut Body) -> bool {
    if !a.enabled || !b.enabled {
        return false;
    }

    let box_a = a.aabb();
    let box_b = b.aabb();
    if !box_a.overlaps(&box_b) {
        return false;
    }

    let pen = box_a.penetration(&box_b);
    match separation_axis(&box_a, &box_b) {
        Axis::Y => {
            let half = pen.y >> 1;
            let rest = pen.y - half;
            if a.position.y <= b.position.y {
                a.position.y -= half;
                b.position.y += rest;
                a.touching.down = true;
                b.touching.up = true;
            } else {
                a.position.y += half;
                b.position.y -= rest;
                a.touching.up = true;
                b.touching.down = true;
            }
            let (va, vb) = (a.velocity.y, b.velocity.y);
            a.velocity.y = fixed_mul(vb, a.bounce.y);
            b.velocity.y = fixed_mul(va, b.bounce.y);
        }
        Axis::X => {
            let half = pen.x >> 1;
            let rest = pen.x - half;
            if a.position.x <= b.position.x {
                a.position.x -= half;
                b.position.x += rest;
                a.touching.right = true;
                b.touching.left = true;
            } else {
                a.position.x += half;
                b.position.x -= rest;
                a.touching.left = true;
                b.touching.right = true;
            }
            let (va, vb) = (a.velocity.x, b.velocity.x);
            a.velocity.x = fixed_mul(vb, a.bounce.x);
            b.velocity.x = fixed_mul(va, b.bounce.x);
        }
    }

    true
}

/// Overlap test with no response. Disabled bodies never overlap.
#[inline]
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    a.enabled && b.enabled && a.aabb().overlaps(&b.aabb())
}

/// Player touched a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarOverlap {
    /// Star touched
    pub star_id: u32,
}

/// Player collided with a bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombContact {
    /// Bomb touched
    pub bomb_id: u32,
}

/// Collide every enabled star against the platforms.
pub fn collide_stars_with_platforms(state: &mut SceneState) {
    let platforms = &state.platforms;
    for star in state.stars.iter_mut() {
        collide_with_platforms(&mut star.body, platforms);
    }
}

/// Collide every bomb against the platforms.
pub fn collide_bombs_with_platforms(state: &mut SceneState) {
    let platforms = &state.platforms;
    for bomb in state.bombs.iter_mut() {
        collide_with_platforms(&mut bomb.body, platforms);
    }
}

/// Find every enabled star the player overlaps, in star id order.
pub fn check_star_overlaps(state: &SceneState) -> Vec<StarOverlap> {
    state
        .stars
        .iter()
        .filter(|star| bodies_overlap(&state.player.body, &star.body))
        .map(|star| StarOverlap { star_id: star.id })
        .collect()
}

/// Collide the player against every bomb in id order.
pub fn collide_player_with_bombs(state: &mut SceneState) -> Vec<BombContact> {
    let mut contacts = Vec::new();
    let player = &mut state.player.body;

    for bomb in state.bombs.iter_mut() {
        if separate_dynamic(player, &mut bomb.body) {
            contacts.push(BombContact { bomb_id: bomb.id });
        }
    }

    contacts
}
