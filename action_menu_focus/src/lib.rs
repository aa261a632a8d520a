// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Focus: the surface arena and focus ownership arbiter.
//!
//! A menu tree is a root surface plus a chain of open submenu surfaces.
//! This crate models it as:
//!
//! - [`SurfaceTree`]: an arena of [`SurfaceRecord`]s keyed by path-qualified
//!   [`SurfaceId`](action_menu_model::SurfaceId). Parents and children link
//!   by id lookup, never by reference, and at most one child per surface is
//!   open at a time.
//! - [`FocusArbiter`]: the single owner of keyboard input across the tree.
//!   It changes hands when the root opens, when a submenu opens or closes
//!   through the keyboard, and when the pointer moves inside a surface.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_focus::{FocusArbiter, OwnershipReason, SurfaceTree};
//! use action_menu_model::{RowId, SurfaceId};
//! use action_menu_registry::RowRecord;
//!
//! let mut tree = SurfaceTree::new();
//! let mut focus = FocusArbiter::default();
//! let root = SurfaceId::root();
//!
//! tree.open_root();
//! focus.claim(&root, OwnershipReason::RootOpened);
//! tree.store_mut(&root)
//!     .unwrap()
//!     .register_row(RowId::new("share"), RowRecord::submenu());
//!
//! let child = tree.open_submenu(&root, &RowId::new("share")).unwrap();
//! focus.claim(&child, OwnershipReason::SubmenuOpened);
//! assert_eq!(child.as_str(), "root::share");
//! assert!(focus.owns(&child));
//! ```

mod arbiter;
mod tree;

pub use arbiter::{
    DEFAULT_FOCUS_RETRY_FRAMES, FocusArbiter, FocusGrant, FocusTarget, OwnershipReason,
};
pub use tree::{SurfaceRecord, SurfaceStateTag, SurfaceTree};
