// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property checks for the aim predictor.

use action_menu_aim::{AimTuning, AnchorSide, resolve_anchor_side, will_hit_submenu};
use kurbo::{Point, Rect, Vec2};
use proptest::prelude::*;

fn rect() -> impl Strategy<Value = Rect> {
    (-500.0..500.0_f64, -500.0..500.0_f64, 1.0..400.0_f64, 1.0..400.0_f64)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

proptest! {
    #[test]
    fn anchor_side_matches_nearest_edge(submenu in rect(), trigger in rect()) {
        let x = trigger.center().x;
        let to_left = (x - submenu.x0).abs();
        let to_right = (x - submenu.x1).abs();
        let side = resolve_anchor_side(submenu, Some(trigger), 0.0);
        if to_left < to_right {
            prop_assert_eq!(side, AnchorSide::Left);
        } else if to_right < to_left {
            prop_assert_eq!(side, AnchorSide::Right);
        } else {
            prop_assert_eq!(side, AnchorSide::Left);
        }
    }

    #[test]
    fn wrong_direction_never_hits(
        submenu in rect(),
        x in -1000.0..1000.0_f64,
        y in -1000.0..1000.0_f64,
        dx in 0.0..100.0_f64,
        dy in -100.0..100.0_f64,
    ) {
        let tuning = AimTuning::default();
        let exit = Point::new(x, y);
        prop_assert!(!will_hit_submenu(exit, Vec2::new(-dx, dy), submenu, AnchorSide::Left, None, &tuning));
        prop_assert!(!will_hit_submenu(exit, Vec2::new(dx, dy), submenu, AnchorSide::Right, None, &tuning));
    }

    #[test]
    fn negligible_dx_never_hits(
        submenu in rect(),
        x in -1000.0..1000.0_f64,
        y in -1000.0..1000.0_f64,
        dx in -0.49..0.49_f64,
        dy in -100.0..100.0_f64,
    ) {
        let tuning = AimTuning::default();
        for side in [AnchorSide::Left, AnchorSide::Right] {
            prop_assert!(!will_hit_submenu(Point::new(x, y), Vec2::new(dx, dy), submenu, side, None, &tuning));
        }
    }

    #[test]
    fn projection_outside_band_never_hits(
        submenu in rect(),
        gap in 1.0..300.0_f64,
        dx in 1.0..100.0_f64,
        dy in -100.0..100.0_f64,
        above in any::<bool>(),
    ) {
        let tuning = AimTuning::default();
        let exit_x = submenu.x0 - gap;
        let t = gap / dx;
        let slack = tuning.base_tolerance;
        // Choose an exit height whose projection lands outside the band.
        let projected = if above { submenu.y0 - slack - 1.0 } else { submenu.y1 + slack + 1.0 };
        let exit = Point::new(exit_x, projected - t * dy);
        prop_assert!(!will_hit_submenu(exit, Vec2::new(dx, dy), submenu, AnchorSide::Left, None, &tuning));
    }
}
