// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu Model: definitions and runtime trees for a headless menu engine.
//!
//! This crate holds the data the rest of the engine operates on:
//!
//! - **Definitions** ([`NodeDef`]): the author-time tree of items, groups, and
//!   submenus. Every definition node is reference counted so callbacks and host
//!   payloads survive instantiation without copies.
//! - **Runtime menus** ([`Menu`], [`Node`]): one instantiated tree per surface.
//!   Runtime nodes remember their definition and owning [`SurfaceId`]; submenu
//!   nodes carry their instantiated child menu.
//! - **Identifiers** ([`RowId`], [`SurfaceId`]): surface ids are path-qualified
//!   (`root::file::export`), so a submenu's child surface is always
//!   `{parent}::{submenu}`.
//! - **Loader data** ([`LoaderSpec`], [`LoaderResult`]): the static, synchronous,
//!   and asynchronous forms a loader may take, plus the flags it reports.
//! - **Rows** ([`Row`]): the flat sequence a surface renders.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu_model::{FlattenMode, ItemDef, Menu, NodeDef, SubmenuDef};
//!
//! let defs: Vec<NodeDef<()>> = vec![
//!     ItemDef::new("open").label("Open…").into(),
//!     SubmenuDef::new("export", [ItemDef::new("pdf").into()]).into(),
//! ];
//!
//! let menu = Menu::instantiate(&defs);
//! assert_eq!(menu.flatten(FlattenMode { deep: false }).len(), 2);
//! assert_eq!(menu.flatten(FlattenMode { deep: true }).len(), 3);
//! ```

mod def;
mod ids;
mod loader;
mod node;
mod row;

pub use def::{
    GroupDef, ItemDef, ItemVariant, NodeDef, NodeKind, RadioGroup, SearchConfig, SearchMode,
    SelectEvent, SelectHandler, SubmenuDef, SubmenuSource, ValueChangeHandler,
};
pub use ids::{ROOT_SURFACE, RowId, SURFACE_SEPARATOR, SurfaceId};
pub use loader::{
    LoadStatus, LoaderError, LoaderFn, LoaderFuture, LoaderOutput, LoaderQuery, LoaderResult,
    LoaderSpec,
};
pub use node::{
    FlattenMode, GroupNode, ItemNode, LoaderResolver, Menu, NoLoaders, Node, SearchContext,
    SubmenuNode,
};
pub use row::{GroupEdge, GroupPosition, Row};
