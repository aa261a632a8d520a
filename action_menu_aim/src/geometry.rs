// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heading estimation and edge extrapolation.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Vec2};

use crate::trail::PointerTrail;

/// Number of trailing samples that contribute to the heading.
const HEADING_SAMPLES: usize = 4;

/// Which vertical edge of a submenu faces its trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    /// The submenu's left edge faces the trigger; it opened to the right.
    Left,
    /// The submenu's right edge faces the trigger; it opened to the left.
    Right,
}

impl AnchorSide {
    /// X coordinate of the facing edge of `rect`.
    #[must_use]
    pub fn edge_x(self, rect: Rect) -> f64 {
        match self {
            Self::Left => rect.x0,
            Self::Right => rect.x1,
        }
    }
}

/// Empirical tolerances for the predictor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AimTuning {
    /// Motion (and horizontal heading) below this length counts as none.
    pub epsilon: f64,
    /// Vertical slack around the submenu when no trigger rect is known.
    pub base_tolerance: f64,
    /// Vertical slack as a fraction of the trigger row's height.
    ///
    /// The effective tolerance is never below `base_tolerance`.
    pub trigger_tolerance: f64,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            epsilon: 0.5,
            base_tolerance: 8.0,
            trigger_tolerance: 1.0,
        }
    }
}

impl AimTuning {
    fn vertical_slack(&self, trigger: Option<Rect>) -> f64 {
        match trigger {
            Some(trigger) => (trigger.height() * self.trigger_tolerance).max(self.base_tolerance),
            None => self.base_tolerance,
        }
    }
}

/// Decides which edge of `submenu` faces its trigger.
///
/// Compares the horizontal distance from the trigger's center (or from
/// `mouse_x` when there is no trigger rect) to the submenu's left and right
/// edges. Exact ties resolve to [`AnchorSide::Left`]. Without a trigger, a
/// mouse strictly inside the submenu's horizontal span resolves to
/// [`AnchorSide::Right`].
#[must_use]
pub fn resolve_anchor_side(submenu: Rect, trigger: Option<Rect>, mouse_x: f64) -> AnchorSide {
    let x = match trigger {
        Some(trigger) => trigger.center().x,
        None => {
            if mouse_x > submenu.x0 && mouse_x < submenu.x1 {
                return AnchorSide::Right;
            }
            mouse_x
        }
    };
    let to_left = (x - submenu.x0).abs();
    let to_right = (x - submenu.x1).abs();
    if to_right < to_left {
        AnchorSide::Right
    } else {
        AnchorSide::Left
    }
}

/// Smoothed pointer heading.
///
/// Sums the deltas between the last (up to four) samples of `trail`, which
/// damps single-sample jitter. When fewer than two samples exist or the summed
/// motion is shorter than `tuning.epsilon`, falls back to a heading from the
/// trigger's center (or from `current` without a trigger) toward the facing
/// edge of `submenu`, at the origin's height clamped into the submenu.
#[must_use]
pub fn smoothed_heading(
    trail: &PointerTrail,
    current: Point,
    anchor: AnchorSide,
    trigger: Option<Rect>,
    submenu: Rect,
    tuning: &AimTuning,
) -> Vec2 {
    let points = trail.points();
    let recent = &points[points.len().saturating_sub(HEADING_SAMPLES)..];
    let mut heading = Vec2::ZERO;
    for pair in recent.windows(2) {
        heading += pair[1].point - pair[0].point;
    }
    if recent.len() >= 2 && heading.hypot() >= tuning.epsilon {
        return heading;
    }

    let origin = trigger.map_or(current, |trigger| trigger.center());
    let target_y = origin.y.max(submenu.y0).min(submenu.y1);
    Point::new(anchor.edge_x(submenu), target_y) - origin
}

/// Returns `true` if moving from `exit` along `heading` reaches the facing
/// edge of `submenu` within its vertical bounds (plus tolerance).
///
/// Rejects headings whose horizontal component is shorter than
/// `tuning.epsilon` or points away from the facing edge, and exits that are
/// already past the edge.
#[must_use]
pub fn will_hit_submenu(
    exit: Point,
    heading: Vec2,
    submenu: Rect,
    anchor: AnchorSide,
    trigger: Option<Rect>,
    tuning: &AimTuning,
) -> bool {
    let dx = heading.x;
    if !dx.is_finite() || !heading.y.is_finite() || dx.abs() < tuning.epsilon {
        return false;
    }
    let toward = match anchor {
        AnchorSide::Left => dx > 0.0,
        AnchorSide::Right => dx < 0.0,
    };
    if !toward {
        return false;
    }
    let t = (anchor.edge_x(submenu) - exit.x) / dx;
    if t < 0.0 {
        return false;
    }
    let y = exit.y + t * heading.y;
    let slack = tuning.vertical_slack(trigger);
    y >= submenu.y0 - slack && y <= submenu.y1 + slack
}

/// Runs the whole predictor: anchor side, heading, and edge test.
#[must_use]
pub fn predict_aim(
    trail: &PointerTrail,
    current: Point,
    submenu: Rect,
    trigger: Option<Rect>,
    tuning: &AimTuning,
) -> bool {
    let anchor = resolve_anchor_side(submenu, trigger, current.x);
    let heading = smoothed_heading(trail, current, anchor, trigger, submenu, tuning);
    will_hit_submenu(current, heading, submenu, anchor, trigger, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBMENU: Rect = Rect::new(200.0, 0.0, 400.0, 300.0);

    fn trail_of(points: &[(f64, f64)]) -> PointerTrail {
        let mut trail = PointerTrail::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            trail.push(Point::new(x, y), i as u64 * 10);
        }
        trail
    }

    #[test]
    fn anchor_follows_nearest_edge() {
        let left_of = Rect::new(0.0, 0.0, 180.0, 20.0);
        let right_of = Rect::new(420.0, 0.0, 600.0, 20.0);
        assert_eq!(resolve_anchor_side(SUBMENU, Some(left_of), 0.0), AnchorSide::Left);
        assert_eq!(resolve_anchor_side(SUBMENU, Some(right_of), 0.0), AnchorSide::Right);
    }

    #[test]
    fn anchor_tie_resolves_left() {
        let centered = Rect::new(290.0, 0.0, 310.0, 20.0);
        assert_eq!(resolve_anchor_side(SUBMENU, Some(centered), 0.0), AnchorSide::Left);
    }

    #[test]
    fn anchor_without_trigger_uses_mouse() {
        assert_eq!(resolve_anchor_side(SUBMENU, None, 150.0), AnchorSide::Left);
        assert_eq!(resolve_anchor_side(SUBMENU, None, 450.0), AnchorSide::Right);
        assert_eq!(resolve_anchor_side(SUBMENU, None, 210.0), AnchorSide::Right);
        // On the edge is not strictly inside.
        assert_eq!(resolve_anchor_side(SUBMENU, None, 200.0), AnchorSide::Left);
    }

    #[test]
    fn heading_sums_last_four_samples() {
        let trail = trail_of(&[(0.0, 0.0), (100.0, 100.0), (10.0, 0.0), (20.0, 2.0), (30.0, 4.0), (40.0, 6.0)]);
        let heading = smoothed_heading(
            &trail,
            Point::new(40.0, 6.0),
            AnchorSide::Left,
            None,
            SUBMENU,
            &AimTuning::default(),
        );
        assert_eq!(heading, Vec2::new(30.0, 6.0));
    }

    #[test]
    fn heading_falls_back_toward_edge() {
        let trigger = Rect::new(0.0, 400.0, 180.0, 420.0);
        let still = trail_of(&[(50.0, 50.0), (50.1, 50.0)]);
        let heading = smoothed_heading(
            &still,
            Point::new(50.1, 50.0),
            AnchorSide::Left,
            Some(trigger),
            SUBMENU,
            &AimTuning::default(),
        );
        // From the trigger center (90, 410) to (200, 300).
        assert_eq!(heading, Vec2::new(110.0, -110.0));

        let empty = PointerTrail::new();
        let heading = smoothed_heading(
            &empty,
            Point::new(100.0, 150.0),
            AnchorSide::Left,
            None,
            SUBMENU,
            &AimTuning::default(),
        );
        assert_eq!(heading, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn hit_requires_heading_toward_facing_edge() {
        let tuning = AimTuning::default();
        let exit = Point::new(180.0, 100.0);
        assert!(will_hit_submenu(exit, Vec2::new(10.0, 1.0), SUBMENU, AnchorSide::Left, None, &tuning));
        assert!(!will_hit_submenu(exit, Vec2::new(-10.0, 1.0), SUBMENU, AnchorSide::Left, None, &tuning));
        assert!(!will_hit_submenu(exit, Vec2::new(0.1, 1.0), SUBMENU, AnchorSide::Left, None, &tuning));
    }

    #[test]
    fn hit_rejects_exit_past_edge() {
        let tuning = AimTuning::default();
        let exit = Point::new(420.0, 100.0);
        assert!(!will_hit_submenu(exit, Vec2::new(-10.0, 0.0), SUBMENU, AnchorSide::Left, None, &tuning));
        assert!(!will_hit_submenu(Point::new(250.0, 100.0), Vec2::new(10.0, 0.0), SUBMENU, AnchorSide::Left, None, &tuning));
    }

    #[test]
    fn trigger_widens_vertical_tolerance() {
        let tuning = AimTuning::default();
        let exit = Point::new(180.0, 320.0);
        // Projected y at the edge is 320 + 20 * 0.5 = 330, 30 below the submenu.
        let heading = Vec2::new(10.0, 5.0);
        assert!(!will_hit_submenu(exit, heading, SUBMENU, AnchorSide::Left, None, &tuning));
        let tall_trigger = Rect::new(0.0, 300.0, 180.0, 340.0);
        assert!(will_hit_submenu(exit, heading, SUBMENU, AnchorSide::Left, Some(tall_trigger), &tuning));
    }

    #[test]
    fn predicts_leftward_submenu() {
        let submenu = Rect::new(0.0, 0.0, 200.0, 300.0);
        let trigger = Rect::new(220.0, 100.0, 420.0, 130.0);
        let trail = trail_of(&[(300.0, 115.0), (290.0, 118.0), (280.0, 121.0)]);
        assert!(predict_aim(&trail, Point::new(280.0, 121.0), submenu, Some(trigger), &AimTuning::default()));
        let away = trail_of(&[(280.0, 115.0), (290.0, 118.0), (300.0, 121.0)]);
        assert!(!predict_aim(&away, Point::new(300.0, 121.0), submenu, Some(trigger), &AimTuning::default()));
    }
}
