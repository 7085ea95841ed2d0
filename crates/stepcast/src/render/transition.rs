use std::time::{Duration, Instant};

use stepcast::{AnimationId, Point};

/// Built-in animation behaviors, selected by an action's executor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Executor {
    /// Interpolate the target's position to the destination.
    Move,
    /// Jump to the destination and fade in.
    Appear,
    /// Fade out where it stands.
    Disappear,
}

impl Executor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "move" => Some(Self::Move),
            "appear" => Some(Self::Appear),
            "disappear" => Some(Self::Disappear),
            _ => None,
        }
    }
}

/// One running animation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub id: AnimationId,
    pub target: String,
    pub executor: Executor,
    pub from: Point,
    pub to: Point,
    pub from_opacity: f32,
    pub start: Instant,
    pub duration: Duration,
}

impl Tween {
    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    let t = f64::from(t);
    Point::new(a.abs + (b.abs - a.abs) * t, a.ord + (b.ord - a.ord) * t)
}
