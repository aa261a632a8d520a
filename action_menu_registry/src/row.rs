// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry records for interactive rows.

use core::fmt;
use std::rc::Rc;

use action_menu_model::{NodeKind, RowId};
use kurbo::Rect;

/// Kind of an interactive row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A selectable item.
    Item,
    /// A submenu trigger.
    Submenu,
}

impl RowKind {
    /// Maps a node kind to a row kind; groups are never rows.
    #[must_use]
    pub fn from_node(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Item => Some(Self::Item),
            NodeKind::Submenu => Some(Self::Submenu),
            NodeKind::Group => None,
        }
    }
}

/// Host callback attached to a submenu row.
pub type RowHook = Rc<dyn Fn(&RowId)>;

/// Registry entry for one interactive row.
#[derive(Clone)]
pub struct RowRecord {
    /// Item or submenu trigger.
    pub kind: RowKind,
    /// Called when the row's submenu should open (submenu rows only).
    pub on_open: Option<RowHook>,
    /// Called when the row's submenu should close (submenu rows only).
    pub on_close: Option<RowHook>,
    /// Index of the row in the virtualized sequence, when virtualized.
    pub virtual_index: Option<usize>,
    /// Last known bounds of the row element, in the scroll container's space.
    pub bounds: Option<Rect>,
}

impl RowRecord {
    /// Record for a plain item.
    #[must_use]
    pub fn item() -> Self {
        Self::new(RowKind::Item)
    }

    /// Record for a submenu trigger.
    #[must_use]
    pub fn submenu() -> Self {
        Self::new(RowKind::Submenu)
    }

    /// Record of the given kind with no hooks.
    #[must_use]
    pub fn new(kind: RowKind) -> Self {
        Self {
            kind,
            on_open: None,
            on_close: None,
            virtual_index: None,
            bounds: None,
        }
    }

    /// Attaches open/close hooks. Ignored for item rows.
    #[must_use]
    pub fn with_hooks(mut self, on_open: RowHook, on_close: RowHook) -> Self {
        if self.kind == RowKind::Submenu {
            self.on_open = Some(on_open);
            self.on_close = Some(on_close);
        }
        self
    }

    /// Sets the virtual index.
    #[must_use]
    pub fn with_virtual_index(mut self, index: usize) -> Self {
        self.virtual_index = Some(index);
        self
    }

    /// Sets the element bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl fmt::Debug for RowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowRecord")
            .field("kind", &self.kind)
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("virtual_index", &self.virtual_index)
            .field("bounds", &self.bounds)
            .finish()
    }
}
