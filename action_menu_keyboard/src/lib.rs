// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Keyboard: the keyboard navigation engine.
//!
//! [`handle_key`] is a stateless function of a [`KeyEvent`], the engine state
//! it may touch ([`Navigator`]: the surface tree and the focus arbiter), and
//! [`KeyboardOptions`] (layout [`Direction`] and optional vim-style bindings).
//! It returns a [`KeyResponse`] telling the host whether to prevent the
//! platform default and what happened.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_focus::{FocusArbiter, OwnershipReason, SurfaceTree};
//! use action_menu_keyboard::{Key, KeyEvent, KeyboardOptions, Navigator, handle_key};
//! use action_menu_model::{RowId, SurfaceId};
//! use action_menu_registry::RowRecord;
//!
//! let root = SurfaceId::root();
//! let mut tree = SurfaceTree::new();
//! let mut focus = FocusArbiter::default();
//! tree.open_root();
//! focus.claim(&root, OwnershipReason::RootOpened);
//! let store = tree.store_mut(&root).unwrap();
//! store.register_row(RowId::new("undo"), RowRecord::item());
//! store.register_row(RowId::new("redo"), RowRecord::item());
//!
//! let mut nav = Navigator { tree: &mut tree, focus: &mut focus };
//! let response = handle_key(
//!     &KeyEvent::new(Key::ArrowDown, root.clone()),
//!     &mut nav,
//!     &KeyboardOptions::default(),
//! );
//! assert!(response.prevent_default);
//! assert_eq!(tree.store(&root).unwrap().active_id().map(RowId::as_str), Some("redo"));
//! ```

mod engine;
mod key;

pub use engine::{KeyAction, KeyResponse, KeyboardOptions, Navigator, handle_key};
pub use key::{Direction, Key, KeyEvent, Modifiers};
