//! Collision resolution between two moving axis-aligned bodies
//!
//! The interesting part of the arena: two bears whose hit-boxes overlap get
//! their velocities exchanged along the collision normal, are pushed apart,
//! advanced by one step, and checked against the arena bounds.

use glam::Vec2;

use super::rect::Rect;

/// What happened to one body after a bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BounceOutcome {
    /// Body stays in the arena with a new velocity and sprite rectangle
    InBounds { velocity: Vec2, draw_rect: Rect },
    /// Body left the arena entirely; the caller should deactivate it
    OutOfBounds,
}

impl BounceOutcome {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, BounceOutcome::OutOfBounds)
    }
}

/// Result of resolving a pairwise bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolution {
    pub first: BounceOutcome,
    pub second: BounceOutcome,
}

impl CollisionResolution {
    /// Same resolution seen from the other body
    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

/// Sign that treats both zeros as zero (`f32::signum` maps `+0.0` to `1.0`)
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Resolve a bounce between two overlapping bodies
///
/// `rect_a` and `rect_b` must already intersect. The collision normal is the
/// axis of least penetration; the velocity components along it are exchanged
/// (equal-mass elastic collision) and then forced to point away from the other
/// body. Both rectangles are separated by half the penetration each and then
/// advanced by `velocity * elapsed_ms`.
///
/// A body whose advanced rectangle is entirely outside `[0, arena_width] x
/// [0, arena_height]` is reported as [`BounceOutcome::OutOfBounds`]. A body
/// that only straddles an edge is clamped back inside and its velocity along
/// that axis turned inward.
///
/// Returns `None` when the rectangles do not overlap. That is a caller bug and
/// trips a debug assertion.
pub fn resolve_bounce(
    elapsed_ms: f32,
    arena_width: f32,
    arena_height: f32,
    velocity_a: Vec2,
    rect_a: Rect,
    velocity_b: Vec2,
    rect_b: Rect,
) -> Option<CollisionResolution> {
    if !rect_a.intersects(&rect_b) {
        debug_assert!(false, "resolve_bounce called on disjoint rectangles");
        return None;
    }

    let delta = rect_b.center() - rect_a.center();
    let overlap = (rect_a.size + rect_b.size) / 2.0 - delta.abs();

    let mut va = velocity_a;
    let mut vb = velocity_b;
    let (normal, depth) = if overlap.x <= overlap.y {
        std::mem::swap(&mut va.x, &mut vb.x);
        (Vec2::new(sign(delta.x), 0.0), overlap.x)
    } else {
        std::mem::swap(&mut va.y, &mut vb.y);
        (Vec2::new(0.0, sign(delta.y)), overlap.y)
    };

    // A always heads against the normal, B along it
    let na = va.dot(normal);
    if na > 0.0 {
        va -= 2.0 * na * normal;
    }
    let nb = vb.dot(normal);
    if nb < 0.0 {
        vb -= 2.0 * nb * normal;
    }

    let half = depth / 2.0;
    let moved_a = rect_a.translated(-normal * half).translated(va * elapsed_ms);
    let moved_b = rect_b.translated(normal * half).translated(vb * elapsed_ms);

    Some(CollisionResolution {
        first: contain(va, moved_a, arena_width, arena_height),
        second: contain(vb, moved_b, arena_width, arena_height),
    })
}

/// Keep a body inside the arena, or report it gone
fn contain(velocity: Vec2, rect: Rect, width: f32, height: f32) -> BounceOutcome {
    if rect.entirely_outside(width, height) {
        return BounceOutcome::OutOfBounds;
    }

    let mut velocity = velocity;
    let mut rect = rect;

    let max_x = (width - rect.size.x).max(0.0);
    if rect.pos.x < 0.0 {
        rect.pos.x = 0.0;
        velocity.x = velocity.x.abs();
    } else if rect.pos.x > max_x {
        rect.pos.x = max_x;
        velocity.x = -velocity.x.abs();
    }

    let max_y = (height - rect.size.y).max(0.0);
    if rect.pos.y < 0.0 {
        rect.pos.y = 0.0;
        velocity.y = velocity.y.abs();
    } else if rect.pos.y > max_y {
        rect.pos.y = max_y;
        velocity.y = -velocity.y.abs();
    }

    BounceOutcome::InBounds {
        velocity,
        draw_rect: rect,
    }
}
