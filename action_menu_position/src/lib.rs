// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Position: inputs for placing menu surfaces.
//!
//! Placement itself (flipping and shifting on overflow) belongs to an external
//! [`PositioningService`]. This crate only prepares what that service needs:
//!
//! - [`PlacementDefaults`]: the root opens below its trigger, start aligned;
//!   submenus open beside their trigger row with [`Align::List`].
//! - [`ListAlignTracker`]: measures the gap between a submenu's top edge and
//!   its first row (below the search input if one is visible, otherwise
//!   inside the list's top padding) so the first row lines up with the
//!   trigger row.
//! - [`PlacementRequest`]: anchor, size, side, alignment, offsets and boundary.
//!
//! [`StaticPlacer`] is a reference service that places surfaces exactly where
//! requested.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_position::{
//!     ListAlignTracker, PlacementDefaults, PlacementRequest, PositioningService, StaticPlacer,
//!     SurfaceLayout,
//! };
//! use kurbo::{Rect, Size};
//!
//! let trigger_row = Rect::new(0.0, 120.0, 200.0, 152.0);
//! let mut tracker = ListAlignTracker::new();
//! tracker.measure(&SurfaceLayout {
//!     surface_top: 0.0,
//!     input_bottom: Some(40.0),
//!     list_content_top: 44.0,
//! });
//!
//! let request = PlacementRequest::new(trigger_row, Size::new(220.0, 300.0), PlacementDefaults::for_depth(1))
//!     .with_align_offset(tracker.offset());
//! let placement = StaticPlacer.place(&request);
//! assert_eq!(placement.rect.y0 + tracker.offset(), trigger_row.y0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod list_offset;
mod placement;

pub use list_offset::{ListAlignTracker, SurfaceLayout};
pub use placement::{
    Align, Placement, PlacementDefaults, PlacementRequest, PositioningService, Side, StaticPlacer,
};
