// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Search: fuzzy scoring and deep search.
//!
//! - [`command_score`] rates how well a typed query abbreviates a label.
//! - [`deep_search`] walks a runtime [`Menu`](action_menu_model::Menu) and its
//!   submenus, returning ranked matches that carry breadcrumbs.
//! - [`StickyGroups`] keeps the selected/unselected split of a value picker
//!   stable while the user filters.
//! - [`collect_deep_search_loaders`], [`aggregate_loader_results`], and
//!   [`inject_loader_results`] fold async submenu content into a deep search.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_model::{ItemDef, Menu, NodeDef, SearchMode, SubmenuDef};
//! use action_menu_search::deep_search;
//!
//! let defs: Vec<NodeDef<()>> = vec![
//!     ItemDef::new("new-file").label("New File").into(),
//!     SubmenuDef::new("export", [ItemDef::new("pdf").label("Export as PDF").into()])
//!         .title("Export")
//!         .into(),
//! ];
//! let menu = Menu::instantiate(&defs);
//!
//! let hits = deep_search(&menu, "pdf", SearchMode::Client);
//! assert_eq!(hits.len(), 1);
//! let context = hits[0].search().unwrap();
//! assert_eq!(context.breadcrumbs, ["Export"]);
//! assert!(context.is_deep);
//! ```

mod deep;
mod loaders;
mod score;
mod sticky;

pub use deep::{HYBRID_FLOOR_SCORE, TRUSTED_SCORE, deep_search, rank, score_node};
pub use loaders::{
    AggregateResult, DeepSearchLoader, LoaderProgress, aggregate_loader_results,
    collect_deep_search_loaders, inject_loader_results,
};
pub use score::{
    PENALTY_CASE_MISMATCH, PENALTY_NOT_COMPLETE, PENALTY_SKIPPED, SCORE_CHARACTER_JUMP,
    SCORE_CONTINUE_MATCH, SCORE_NON_SPACE_WORD_JUMP, SCORE_SPACE_WORD_JUMP, SCORE_TRANSPOSITION,
    command_score,
};
pub use sticky::{InitialGroup, STICKY_SEPARATOR_ID, StickyGroups};
