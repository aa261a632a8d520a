// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-surface store.

use core::fmt;

use action_menu_model::RowId;
use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::row::{RowKind, RowRecord};

/// Observable state of one surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceState {
    /// Currently active (focused) row.
    pub active_id: Option<RowId>,
    /// Whether the surface renders a search input.
    pub has_input: bool,
    /// DOM-style id of the surface's list element.
    pub list_id: String,
}

/// What caused an active-row change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActiveCause {
    /// Keyboard navigation.
    Keyboard,
    /// Pointer hover.
    Pointer,
    /// Engine bookkeeping (registration, order resets, restores).
    Programmatic,
}

impl ActiveCause {
    /// Pointer-driven changes never scroll: the row is already under the pointer.
    const fn scrolls(self) -> bool {
        !matches!(self, Self::Pointer)
    }
}

/// Request for the host to bring a row into view.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollRequest {
    /// Scroll the virtualized list to this index.
    Index(usize),
    /// Scroll the container so these bounds are visible.
    Bounds(Rect),
}

/// Result of a successful active-row change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveChange {
    /// Previously active row.
    pub previous: Option<RowId>,
    /// Newly active row.
    pub current: RowId,
    /// Submenu rows that were told to close to keep a single submenu open.
    pub closed_submenus: SmallVec<[RowId; 4]>,
}

/// Handle returned by [`SurfaceStore::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SurfaceState)>;

/// Ordered registry of interactive rows plus the surface's observable state.
///
/// ## Invariants
///
/// - `order` is a permutation of the registered row ids.
/// - At most one row is active; if rows exist, the active row is registered.
/// - Changing the active row asks every other submenu row to close, so at most
///   one submenu among siblings is open.
///
/// Lookups and mutations against unknown ids are no-ops.
pub struct SurfaceStore {
    state: SurfaceState,
    order: Vec<RowId>,
    rows: HashMap<RowId, RowRecord>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    scroll_container: Option<Rect>,
    pending_scroll: Option<ScrollRequest>,
}

impl fmt::Debug for SurfaceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceStore")
            .field("state", &self.state)
            .field("order", &self.order)
            .field("listeners", &self.listeners.len())
            .field("scroll_container", &self.scroll_container)
            .field("pending_scroll", &self.pending_scroll)
            .finish_non_exhaustive()
    }
}

impl SurfaceStore {
    /// Creates an empty store whose list element is `list_id`.
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            state: SurfaceState {
                active_id: None,
                has_input: false,
                list_id: list_id.into(),
            },
            order: Vec::new(),
            rows: HashMap::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            scroll_container: None,
            pending_scroll: None,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Active row id.
    #[must_use]
    pub fn active_id(&self) -> Option<&RowId> {
        self.state.active_id.as_ref()
    }

    /// Registered ids in keyboard order.
    #[must_use]
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// Number of registered rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no rows are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Record for a registered row.
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&RowRecord> {
        self.rows.get(id)
    }

    /// Returns `true` if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Position of `id` in keyboard order.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|row| row.as_str() == id)
    }

    /// Kind of the active row.
    #[must_use]
    pub fn active_kind(&self) -> Option<RowKind> {
        self.active_id()
            .and_then(|id| self.rows.get(id.as_str()))
            .map(|row| row.kind)
    }

    /// Registers `id`, appending it to the order.
    ///
    /// Registering an id twice replaces its record and keeps its position.
    pub fn register_row(&mut self, id: RowId, record: RowRecord) {
        tracing::trace!(list = %self.state.list_id, row = %id, kind = ?record.kind, "register row");
        if self.rows.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
        self.revalidate_active();
    }

    /// Removes `id`. Unknown ids are ignored.
    pub fn unregister_row(&mut self, id: &str) {
        if self.rows.remove(id).is_none() {
            return;
        }
        tracing::trace!(list = %self.state.list_id, row = id, "unregister row");
        self.order.retain(|row| row.as_str() != id);
        if self.state.active_id.as_ref().is_some_and(|active| active.as_str() == id) {
            self.state.active_id = None;
            if self.order.is_empty() {
                self.notify();
            }
        }
        self.revalidate_active();
    }

    /// Makes `id` the active row.
    ///
    /// Returns `None` if `id` is unknown or already active. Otherwise every
    /// other submenu row is told to close, subscribers are notified, and a
    /// scroll request is queued unless the change came from the pointer.
    pub fn set_active_id(&mut self, id: &str, cause: ActiveCause) -> Option<ActiveChange> {
        if self.state.active_id.as_ref().is_some_and(|active| active.as_str() == id) {
            return None;
        }
        let (current, record) = self.rows.get_key_value(id)?;
        let current = current.clone();
        let scroll = if cause.scrolls() {
            self.scroll_request_for(record)
        } else {
            None
        };

        let mut closed_submenus = SmallVec::new();
        for row in &self.order {
            if *row == current {
                continue;
            }
            let Some(record) = self.rows.get(row.as_str()) else {
                continue;
            };
            if record.kind == RowKind::Submenu {
                if let Some(on_close) = &record.on_close {
                    on_close(row);
                }
                closed_submenus.push(row.clone());
            }
        }

        let previous = self.state.active_id.replace(current.clone());
        tracing::trace!(
            list = %self.state.list_id,
            from = ?previous,
            to = %current,
            ?cause,
            "active row changed"
        );
        if scroll.is_some() {
            self.pending_scroll = scroll;
        }
        self.notify();
        Some(ActiveChange {
            previous,
            current,
            closed_submenus,
        })
    }

    /// Clears the active row.
    pub fn clear_active(&mut self) {
        if self.state.active_id.take().is_some() {
            self.notify();
        }
    }

    /// Activates the row at `index` in keyboard order.
    pub fn set_active_by_index(&mut self, index: usize, cause: ActiveCause) -> Option<ActiveChange> {
        let id = self.order.get(index)?.clone();
        self.set_active_id(id.as_str(), cause)
    }

    /// Activates the first row.
    pub fn first(&mut self, cause: ActiveCause) -> Option<ActiveChange> {
        self.set_active_by_index(0, cause)
    }

    /// Activates the last row.
    pub fn last(&mut self, cause: ActiveCause) -> Option<ActiveChange> {
        let last = self.order.len().checked_sub(1)?;
        self.set_active_by_index(last, cause)
    }

    /// Activates the row after the active one, wrapping to the first.
    pub fn next(&mut self, cause: ActiveCause) -> Option<ActiveChange> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let next = match self.active_index() {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.set_active_by_index(next, cause)
    }

    /// Activates the row before the active one, wrapping to the last.
    pub fn prev(&mut self, cause: ActiveCause) -> Option<ActiveChange> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let prev = match self.active_index() {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        };
        self.set_active_by_index(prev, cause)
    }

    /// Reorders rows to follow the visible sequence `ids`.
    ///
    /// Unknown ids are skipped; registered rows missing from `ids` keep their
    /// relative order after the listed ones.
    pub fn reset_order<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RowId>,
    {
        let mut order: Vec<RowId> = Vec::with_capacity(self.order.len());
        for id in ids {
            if self.rows.contains_key(id.as_str()) && !order.contains(&id) {
                order.push(id);
            }
        }
        for id in &self.order {
            if !order.contains(id) {
                order.push(id.clone());
            }
        }
        self.order = order;
        self.revalidate_active();
    }

    /// Replaces the virtual indices of registered rows.
    ///
    /// Rows missing from `map` lose their index.
    pub fn reset_virtual_index_map<I>(&mut self, map: I)
    where
        I: IntoIterator<Item = (RowId, usize)>,
    {
        for record in self.rows.values_mut() {
            record.virtual_index = None;
        }
        for (id, index) in map {
            if let Some(record) = self.rows.get_mut(id.as_str()) {
                record.virtual_index = Some(index);
            }
        }
    }

    /// Sets whether the surface has a search input.
    pub fn set_has_input(&mut self, has_input: bool) {
        if self.state.has_input != has_input {
            self.state.has_input = has_input;
            self.notify();
        }
    }

    /// Sets the visible bounds of the managed scroll container.
    pub fn set_scroll_container(&mut self, viewport: Option<Rect>) {
        self.scroll_container = viewport;
    }

    /// Updates the bounds of a registered row.
    pub fn set_row_bounds(&mut self, id: &str, bounds: Rect) {
        if let Some(record) = self.rows.get_mut(id) {
            record.bounds = Some(bounds);
        }
    }

    /// Takes the pending scroll request, if any.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    /// Registers a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SurfaceState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener, _)| *listener != id);
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.state.active_id.as_ref()?;
        self.order.iter().position(|row| row == active)
    }

    fn revalidate_active(&mut self) {
        let valid = self
            .state
            .active_id
            .as_ref()
            .is_some_and(|active| self.rows.contains_key(active.as_str()));
        if valid {
            return;
        }
        if let Some(first) = self.order.first().cloned() {
            self.set_active_id(first.as_str(), ActiveCause::Programmatic);
        }
    }

    fn scroll_request_for(&self, record: &RowRecord) -> Option<ScrollRequest> {
        if let Some(index) = record.virtual_index {
            return Some(ScrollRequest::Index(index));
        }
        let (bounds, viewport) = (record.bounds?, self.scroll_container?);
        let inside = bounds.y0 >= viewport.y0 && bounds.y1 <= viewport.y1;
        (!inside).then_some(ScrollRequest::Bounds(bounds))
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }
}
