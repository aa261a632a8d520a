// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Virtual List: flattening and windowed rendering for menu surfaces.
//!
//! A surface renders a flat row sequence. This crate builds that sequence and
//! decides which part of it to realize:
//!
//! - [`flatten_rows`] expands groups into a heading plus children tagged with
//!   their [`GroupPosition`](action_menu_model::GroupPosition); [`search_rows`]
//!   turns ranked search results into rows.
//! - [`sync_store`] mirrors the interactive rows into a surface's
//!   [`SurfaceStore`](action_menu_registry::SurfaceStore), so keyboard order
//!   follows the visible sequence rather than the authored one.
//! - [`ExtentModel`] and [`compute_visible_strip`] describe row heights and the
//!   rows intersecting a viewport, widened by an overscan counted in rows.
//! - [`MeasuredExtentModel`] starts every row at an estimate and refines it
//!   as rows are measured.
//! - [`VirtualWindow`] owns a model plus scroll state and caches the last
//!   [`VisibleStrip`]. It also scrolls rows into view via [`ScrollAlign`].
//!
//! Hosts realize `strip.start..strip.end`, size the leading and trailing
//! spacers from `before_extent` and `after_extent`, and report measured
//! heights back through [`VirtualWindow::measure`].
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_model::{ItemDef, Menu, NodeDef, SurfaceId};
//! use action_menu_registry::SurfaceStore;
//! use action_menu_virtual_list::{
//!     VirtualWindow, WindowConfig, flatten_rows, plain_record, sync_store,
//! };
//!
//! let defs: Vec<NodeDef<()>> = (0..1000)
//!     .map(|i| ItemDef::new(format!("item-{i}")).into())
//!     .collect();
//! let menu = Menu::instantiate(&defs);
//! let rows = flatten_rows(&menu);
//!
//! let mut store = SurfaceStore::new("list");
//! sync_store(&mut store, &SurfaceId::root(), &rows, plain_record);
//! assert_eq!(store.len(), 1000);
//!
//! // 320px viewport over 32px rows, 12 rows of overscan.
//! let mut window = VirtualWindow::with_config(rows.len(), 320.0, WindowConfig::default());
//! window.set_scroll_offset(3200.0);
//! let strip = window.visible_strip();
//! assert_eq!(strip.start..strip.end, 88..122);
//! ```

mod flatten;
mod measured;
mod model;
mod sync;
mod window;

pub use flatten::{flatten_rows, search_rows};
pub use measured::{DEFAULT_ESTIMATED_ROW_HEIGHT, MeasuredExtentModel};
pub use model::{ExtentModel, VisibleStrip, compute_visible_strip};
pub use sync::{SyncOutcome, plain_record, sync_store};
pub use window::{DEFAULT_OVERSCAN, ScrollAlign, VirtualWindow, WindowConfig};
