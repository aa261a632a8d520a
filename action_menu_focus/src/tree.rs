// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena of open surfaces.

use action_menu_model::{RowId, SurfaceId};
use action_menu_registry::{ActiveCause, ActiveChange, RowKind, SurfaceStore};
use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Visible state of a surface, mirrored as `data-state`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceStateTag {
    /// The surface is shown.
    Open,
    /// The surface is hidden (or animating out).
    Closed,
}

impl SurfaceStateTag {
    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// One mounted surface.
#[derive(Debug)]
pub struct SurfaceRecord {
    /// Path-qualified id.
    pub id: SurfaceId,
    /// Submenu row on the parent surface that opened this one.
    pub trigger: Option<RowId>,
    /// Row registry and observable state.
    pub store: SurfaceStore,
    /// The currently open child surface, if any.
    pub open_child: Option<SurfaceId>,
    /// Bounds of the surface content, once laid out.
    pub bounds: Option<Rect>,
    /// Whether the content element exists and can take focus.
    pub mounted: bool,
}

impl SurfaceRecord {
    fn new(id: SurfaceId, trigger: Option<RowId>) -> Self {
        let list_id = format!("{id}::list");
        Self {
            id,
            trigger,
            store: SurfaceStore::new(list_id),
            open_child: None,
            bounds: None,
            mounted: false,
        }
    }
}

/// Arena of the surfaces of one menu tree, keyed by path-qualified id.
///
/// Parent and child surfaces refer to each other by id only; the arena owns
/// every record. A record exists exactly while its surface is open.
#[derive(Debug, Default)]
pub struct SurfaceTree {
    surfaces: HashMap<SurfaceId, SurfaceRecord>,
}

impl SurfaceTree {
    /// Creates an empty (closed) tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the root surface is open.
    #[must_use]
    pub fn is_root_open(&self) -> bool {
        self.surfaces.contains_key(&SurfaceId::root())
    }

    /// Opens the root surface. Returns `false` if it was already open.
    pub fn open_root(&mut self) -> bool {
        let root = SurfaceId::root();
        if self.surfaces.contains_key(&root) {
            return false;
        }
        tracing::debug!(surface = %root, "open root surface");
        self.surfaces.insert(root.clone(), SurfaceRecord::new(root, None));
        true
    }

    /// Closes every surface. Returns the ids that were open, deepest first.
    pub fn close_all(&mut self) -> Vec<SurfaceId> {
        let mut closed: Vec<SurfaceId> = self.surfaces.keys().cloned().collect();
        closed.sort_by(|a, b| b.depth().cmp(&a.depth()).then_with(|| a.cmp(b)));
        if !closed.is_empty() {
            tracing::debug!(count = closed.len(), "close menu tree");
        }
        self.surfaces.clear();
        closed
    }

    /// Record for `surface`.
    #[must_use]
    pub fn get(&self, surface: &SurfaceId) -> Option<&SurfaceRecord> {
        self.surfaces.get(surface)
    }

    /// Mutable record for `surface`.
    pub fn get_mut(&mut self, surface: &SurfaceId) -> Option<&mut SurfaceRecord> {
        self.surfaces.get_mut(surface)
    }

    /// Store of `surface`.
    #[must_use]
    pub fn store(&self, surface: &SurfaceId) -> Option<&SurfaceStore> {
        self.surfaces.get(surface).map(|record| &record.store)
    }

    /// Mutable store of `surface`.
    pub fn store_mut(&mut self, surface: &SurfaceId) -> Option<&mut SurfaceStore> {
        self.surfaces.get_mut(surface).map(|record| &mut record.store)
    }

    /// Returns `true` if `surface` is open.
    #[must_use]
    pub fn is_open(&self, surface: &SurfaceId) -> bool {
        self.surfaces.contains_key(surface)
    }

    /// `data-state` of `surface`.
    #[must_use]
    pub fn state_tag(&self, surface: &SurfaceId) -> SurfaceStateTag {
        if self.is_open(surface) {
            SurfaceStateTag::Open
        } else {
            SurfaceStateTag::Closed
        }
    }

    /// Open surfaces from the root down to the deepest open submenu.
    #[must_use]
    pub fn open_path(&self) -> Vec<SurfaceId> {
        let mut path = Vec::new();
        let mut cursor = Some(SurfaceId::root());
        while let Some(id) = cursor {
            let Some(record) = self.surfaces.get(&id) else {
                break;
            };
            cursor = record.open_child.clone();
            path.push(id);
        }
        path
    }

    /// The deepest open surface.
    #[must_use]
    pub fn deepest_open(&self) -> Option<SurfaceId> {
        self.open_path().pop()
    }

    /// Number of open surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns `true` if nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Opens the submenu triggered by row `trigger` on `parent`.
    ///
    /// The trigger must be a registered submenu row. Any other open child of
    /// `parent` is closed first. Returns the child id, or `None` when the
    /// request does not apply.
    pub fn open_submenu(&mut self, parent: &SurfaceId, trigger: &RowId) -> Option<SurfaceId> {
        let record = self.surfaces.get(parent)?;
        let row = record.store.row(trigger.as_str())?;
        if row.kind != RowKind::Submenu {
            return None;
        }
        let on_open = row.on_open.clone();
        let child = parent.child(trigger);
        if let Some(open) = record.open_child.clone() {
            if open == child {
                return Some(child);
            }
            self.close_submenu(&open);
        }
        tracing::debug!(surface = %child, "open submenu");
        if let Some(record) = self.surfaces.get_mut(parent) {
            record.open_child = Some(child.clone());
        }
        self.surfaces
            .insert(child.clone(), SurfaceRecord::new(child.clone(), Some(trigger.clone())));
        if let Some(on_open) = on_open {
            on_open(trigger);
        }
        Some(child)
    }

    /// Closes `surface` and its descendants.
    ///
    /// Returns the trigger row on the parent surface. Closing the root or an
    /// unknown surface is a no-op.
    pub fn close_submenu(&mut self, surface: &SurfaceId) -> Option<RowId> {
        let parent = surface.parent()?;
        let record = self.surfaces.get(surface)?;
        let trigger = record.trigger.clone();

        let doomed: SmallVec<[SurfaceId; 4]> = self
            .surfaces
            .keys()
            .filter(|id| id.is_within(surface))
            .cloned()
            .collect();
        for id in &doomed {
            self.surfaces.remove(id);
        }
        tracing::debug!(surface = %surface, closed = doomed.len(), "close submenu");

        if let Some(parent) = self.surfaces.get_mut(&parent) {
            if parent.open_child.as_ref() == Some(surface) {
                parent.open_child = None;
            }
            if let Some(on_close) = trigger
                .as_ref()
                .and_then(|row| parent.store.row(row.as_str()))
                .and_then(|row| row.on_close.clone())
                && let Some(trigger) = &trigger
            {
                on_close(trigger);
            }
        }
        trigger
    }

    /// Changes the active row of `surface`, closing any open sibling submenu.
    pub fn set_active(&mut self, surface: &SurfaceId, row: &str, cause: ActiveCause) -> Option<ActiveChange> {
        let record = self.surfaces.get_mut(surface)?;
        let change = record.store.set_active_id(row, cause)?;
        self.close_stale_children(surface, &change);
        Some(change)
    }

    /// Closes the open child of `surface` if `change` asked its trigger to close.
    pub fn close_stale_children(&mut self, surface: &SurfaceId, change: &ActiveChange) {
        let Some(open) = self.surfaces.get(surface).and_then(|r| r.open_child.clone()) else {
            return;
        };
        let stale = open
            .trigger()
            .is_some_and(|trigger| change.closed_submenus.contains(&trigger));
        if stale {
            self.close_submenu(&open);
        }
    }

    /// Marks the content of `surface` as mounted (focusable).
    pub fn mark_mounted(&mut self, surface: &SurfaceId) {
        if let Some(record) = self.surfaces.get_mut(surface) {
            record.mounted = true;
        }
    }

    /// Records the laid-out bounds of `surface`.
    pub fn set_bounds(&mut self, surface: &SurfaceId, bounds: Rect) {
        if let Some(record) = self.surfaces.get_mut(surface) {
            record.bounds = Some(bounds);
        }
    }

    /// Deepest open surface whose bounds contain `point`.
    #[must_use]
    pub fn surface_at(&self, point: Point) -> Option<SurfaceId> {
        self.open_path().into_iter().rev().find(|id| {
            self.surfaces
                .get(id)
                .and_then(|record| record.bounds)
                .is_some_and(|bounds| bounds.contains(point))
        })
    }
}
