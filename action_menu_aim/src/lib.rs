// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Aim: submenu intent prediction.
//!
//! When a submenu is open to the side of its trigger row, the shortest path
//! from the trigger into the submenu often crosses sibling rows. Hovering those
//! siblings would normally close the submenu. This crate decides, from the
//! recent pointer trajectory, whether the pointer is on its way into the open
//! submenu, and keeps a short time-boxed guard during which hover changes on
//! other rows are ignored.
//!
//! The pieces are small and independent:
//!
//! - [`resolve_anchor_side`] tells which vertical edge of the submenu faces the
//!   trigger.
//! - [`smoothed_heading`] turns a [`PointerTrail`] into a heading vector, with a
//!   geometric fallback when the trail is too short or too still.
//! - [`will_hit_submenu`] extrapolates that heading to the submenu's near edge.
//! - [`AimGuard`] is the timed flag the predictor arms.
//!
//! All coordinates share one space (typically viewport pixels). Time is passed
//! in as milliseconds; nothing here reads a clock.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_aim::{AimGuard, AimTuning, PointerTrail, predict_aim};
//! use kurbo::{Point, Rect};
//!
//! let trigger = Rect::new(0.0, 100.0, 200.0, 132.0);
//! let submenu = Rect::new(204.0, 90.0, 404.0, 390.0);
//!
//! // Pointer leaves the trigger moving right and slightly down.
//! let mut trail = PointerTrail::new();
//! for (i, x) in [150.0, 160.0, 170.0, 180.0].into_iter().enumerate() {
//!     trail.push(Point::new(x, 116.0 + i as f64 * 4.0), i as u64 * 16);
//! }
//!
//! let tuning = AimTuning::default();
//! let aiming = predict_aim(&trail, Point::new(180.0, 128.0), submenu, Some(trigger), &tuning);
//! assert!(aiming);
//!
//! let mut guard = AimGuard::new(450);
//! guard.arm("share", 64);
//! assert!(guard.suppresses(&"copy", 200));
//! assert!(!guard.suppresses(&"copy", 600));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;
mod guard;
mod trail;

pub use geometry::{
    AimTuning, AnchorSide, predict_aim, resolve_anchor_side, smoothed_heading, will_hit_submenu,
};
pub use guard::{AimGuard, DEFAULT_AIM_GUARD_MS};
pub use trail::{PointerTrail, TrailPoint, TRAIL_CAPACITY};
