//! Visual position easing.
//!
//! Each frame an entity's visual position covers a fraction `rate * elapsed` of the remaining distance to its
//! logical cell, giving an exponential ease-out that stops exactly on the cell.

use glam::Vec2;

use crate::constants::VISUAL_SNAP_EPSILON;
use crate::entity::Entity;

/// How the per-frame easing factor is treated when `rate * elapsed` exceeds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// The factor is clamped into `[0, 1]`; the visual position can never overshoot.
    #[default]
    Clamped,
    /// The factor is used as-is. Long frames or high rates overshoot and oscillate.
    Unclamped,
}

impl InterpolationMode {
    /// The fraction of the remaining distance to cover this frame.
    pub fn factor(self, elapsed: f32, rate: f32) -> f32 {
        let t = rate * elapsed;
        match self {
            InterpolationMode::Clamped => t.clamp(0.0, 1.0),
            InterpolationMode::Unclamped => t,
        }
    }
}

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn approach(visual: f32, target: f32, t: f32) -> f32 {
    let next = lerp(visual, target, t);
    if (target - next).abs() < VISUAL_SNAP_EPSILON {
        target
    } else {
        next
    }
}

/// Moves the entity's visual position toward its logical position.
///
/// Calling this with `elapsed <= 0` or on a settled entity changes nothing.
pub fn advance(entity: &mut Entity, elapsed: f32, rate: f32, mode: InterpolationMode) {
    let elapsed = elapsed.max(0.0);
    let target = entity.position().as_vec2();
    if entity.visual == target {
        return;
    }

    let t = mode.factor(elapsed, rate);
    if t == 0.0 {
        return;
    }

    entity.visual = Vec2::new(approach(entity.visual.x, target.x, t), approach(entity.visual.y, target.y, t));
}

/// Whether the visual position has caught up with the logical one.
pub fn is_settled(entity: &Entity) -> bool {
    entity.visual == entity.position().as_vec2()
}
