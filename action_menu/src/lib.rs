// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action Menu: a headless engine for nested popup menus.
//!
//! [`ActionMenu`] ties the component crates together:
//!
//! - definitions ([`NodeDef`]) are instantiated per surface, flattened, and
//!   mirrored into each surface's row registry;
//! - key presses run through the keyboard transition table, gated by a
//!   single focus owner for the whole tree;
//! - pointer movement feeds the aim predictor, whose guard keeps a diagonal
//!   path into an open submenu from closing it;
//! - the search input goes through a debounce and minimum-length gate, then
//!   deep search runs over the surface and every reachable submenu, loaders
//!   included;
//! - each surface realizes only the rows in its visible strip;
//! - placement requests align a submenu's first row with its trigger.
//!
//! Time is always an argument. The host calls [`ActionMenu::tick`] at
//! [`ActionMenu::next_deadline`] and once per frame calls
//! [`ActionMenu::frame`] to learn where real focus should go.
//!
//! ## Minimal example
//!
//! ```rust
//! use action_menu::{ActionMenu, ActionMenuConfig, ItemDef, Key, KeyEvent, NodeDef, SurfaceId};
//!
//! let defs: Vec<NodeDef<()>> = ["apple", "banana", "cherry"]
//!     .into_iter()
//!     .map(|id| ItemDef::new(id).into())
//!     .collect();
//! let mut menu = ActionMenu::new(defs, ActionMenuConfig::default())?;
//! let root = SurfaceId::root();
//!
//! menu.open(0);
//! menu.set_viewport(&root, 320.0);
//! assert!(menu.trigger_attributes().expanded);
//!
//! let view = menu.surface_view(&root).unwrap();
//! assert_eq!(view.row_attributes().count(), 3);
//!
//! menu.handle_key(&KeyEvent::new(Key::ArrowDown, root.clone()), 10);
//! assert_eq!(menu.active_row(&root).unwrap().as_str(), "banana");
//!
//! menu.set_query(&root, "chy", 20);
//! let view = menu.surface_view(&root).unwrap();
//! let ids: Vec<_> = view.row_attributes().map(|row| row.item_id.as_str()).collect();
//! assert_eq!(ids, ["cherry"]);
//! # Ok::<(), action_menu::MenuError>(())
//! ```

mod attributes;
mod config;
mod error;
mod menu;
mod session;
mod view;

pub use attributes::{InputAttributes, RowAttributes, RowRole, SurfaceAttributes, TriggerAttributes, row_element_id};
pub use config::{ActionMenuConfig, ClearInput, DEFAULT_CLEAR_INPUT_MS};
pub use error::{MenuError, validate_defs};
pub use menu::{ActionMenu, Selection};
pub use view::{RowView, SurfaceView};

pub use action_menu_aim::AimTuning;
pub use action_menu_focus::{FocusGrant, FocusTarget, SurfaceStateTag};
pub use action_menu_keyboard::{Direction, Key, KeyAction, KeyEvent, KeyResponse, Modifiers};
pub use action_menu_loader::{DefaultLoaderAdapter, LoaderAdapter};
pub use action_menu_model::{
    GroupDef, GroupPosition, ItemDef, ItemVariant, LoadStatus, LoaderError, LoaderQuery, LoaderResult,
    LoaderSpec, Node, NodeDef, RadioGroup, Row, RowId, SearchConfig, SearchMode, SelectEvent, SubmenuDef,
    SubmenuSource, SurfaceId,
};
pub use action_menu_position::{Placement, PlacementRequest, PositioningService, StaticPlacer, SurfaceLayout};
pub use action_menu_registry::{SubscriptionId, SurfaceState, SurfaceStore};
pub use action_menu_search::AggregateResult;
