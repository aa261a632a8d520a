// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Loader: running submenu loaders.
//!
//! The path from a keystroke to loaded nodes has explicit stages, each usable
//! on its own:
//!
//! 1. [`QueryGate`] debounces raw input into an effective query and applies
//!    the minimum length.
//! 2. A [`LoaderAdapter`] invokes loaders for effective queries, aborting the
//!    previous invocation for the same surface and discarding stale results.
//!    [`DefaultLoaderAdapter`] runs futures on a local executor driven by
//!    [`LoaderAdapter::poll`].
//! 3. [`load_all`] runs a batch of loaders concurrently to completion, for
//!    hosts that prefer to await.
//!
//! No clock is read: callers pass timestamps to the gate and decide when to
//! poll.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_loader::{DefaultLoaderAdapter, LoaderAdapter, QueryGate, QueryGateConfig};
//! use action_menu_model::{ItemDef, LoaderQuery, LoaderSpec, SurfaceId};
//!
//! let mut gate = QueryGate::new(QueryGateConfig { debounce_ms: 150, min_length: 2 });
//! let users = LoaderSpec::<()>::from_async(|q| {
//!     let name = format!("{}-user", q.query);
//!     async move { Ok(vec![ItemDef::new(name).into()]) }
//! });
//! let mut adapter = DefaultLoaderAdapter::new();
//! let surface = SurfaceId::from_path("root::users");
//!
//! gate.input("ad", 0);
//! assert_eq!(gate.tick(100), None);
//! assert_eq!(gate.tick(150), Some("ad"));
//! assert!(gate.should_load());
//!
//! let query = LoaderQuery { query: gate.effective().to_owned(), open: true };
//! assert!(adapter.use_loader(&surface, &users, &query).unwrap().is_loading);
//! adapter.poll();
//! let result = adapter.use_loader(&surface, &users, &query).unwrap();
//! assert_eq!(result.nodes()[0].id().as_str(), "ad-user");
//! ```

mod adapter;
mod gate;
mod parallel;

pub use adapter::{DefaultLoaderAdapter, LoaderAdapter, LoaderRequest};
pub use gate::{QueryGate, QueryGateConfig};
pub use parallel::{load_all, run_loader, settle, start_loader};
