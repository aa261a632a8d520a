// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Registry: the per-surface row registry and focus store.
//!
//! Every open surface (the root menu and each open submenu) owns one
//! [`SurfaceStore`]. The store keeps:
//!
//! - the **keyboard order** of interactive rows, registered as they mount and
//!   re-sorted with [`SurfaceStore::reset_order`] whenever the visible sequence
//!   changes (for example on every search keystroke),
//! - the **active row**, changed through [`SurfaceStore::set_active_id`] and the
//!   wrapping movement helpers ([`SurfaceStore::next`], [`SurfaceStore::prev`],
//!   [`SurfaceStore::first`], [`SurfaceStore::last`]),
//! - a small **observable state** ([`SurfaceState`]) with publish/subscribe.
//!
//! Changing the active row enforces the single-open-submenu policy: every
//! other submenu row is told to close, and the ids are reported back in
//! [`ActiveChange::closed_submenus`] so the owner of the surface tree can act
//! on them.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_model::RowId;
//! use action_menu_registry::{ActiveCause, RowRecord, SurfaceStore};
//!
//! let mut store = SurfaceStore::new("root-list");
//! store.register_row(RowId::new("cut"), RowRecord::item());
//! store.register_row(RowId::new("copy"), RowRecord::item());
//!
//! // The first registered row becomes active.
//! assert_eq!(store.active_id().map(RowId::as_str), Some("cut"));
//!
//! // Movement wraps around.
//! store.next(ActiveCause::Keyboard);
//! store.next(ActiveCause::Keyboard);
//! assert_eq!(store.active_id().map(RowId::as_str), Some("cut"));
//! ```
//!
//! Operations on unknown ids are no-ops: rows come and go during animated
//! open/close transitions, and a late unregister must never fail.

mod row;
mod store;

pub use row::{RowHook, RowKind, RowRecord};
pub use store::{ActiveCause, ActiveChange, ScrollRequest, SubscriptionId, SurfaceState, SurfaceStore};
