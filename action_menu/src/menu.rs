// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine facade.

use core::fmt;

use action_menu_aim::{AimTuning, PointerTrail, predict_aim};
use action_menu_focus::{FocusArbiter, FocusGrant, OwnershipReason, SurfaceStateTag, SurfaceTree};
use action_menu_keyboard::{Direction, KeyAction, KeyEvent, KeyResponse, Navigator, handle_key};
use action_menu_loader::{DefaultLoaderAdapter, LoaderAdapter};
use action_menu_model::{
    ItemVariant, LoaderResolver, LoaderSpec, Node, NodeDef, Row, RowId, SelectEvent, SubmenuSource, SurfaceId,
};
use action_menu_position::{Placement, PlacementDefaults, PlacementRequest, PositioningService, SurfaceLayout};
use action_menu_registry::{ActiveCause, RowKind, SurfaceStore};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use crate::attributes::{InputAttributes, SurfaceAttributes, TriggerAttributes, row_element_id};
use crate::config::{ActionMenuConfig, ClearInput};
use crate::error::{MenuError, validate_defs};
use crate::session::{Refresh, Session, resolve_source};
use crate::view::{RowView, SurfaceView};

/// What selecting an item did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Surface that owns the item.
    pub surface: SurfaceId,
    /// The selected item.
    pub item: RowId,
    /// New checked state of a checkbox or radio item.
    pub checked: Option<bool>,
    /// The selection closed the menu.
    pub closed: bool,
}

/// A headless action menu.
///
/// Owns the surface tree, focus ownership, per-surface search and windowing
/// state, and the loader adapter. The host feeds it events with explicit
/// timestamps and reads back [`SurfaceView`] snapshots; nothing here reads a
/// clock or draws.
///
/// Checkbox and radio state is controlled: selecting such an item reports the
/// new state through the item's handler (and the group's `on_value_change`),
/// and the host passes updated definitions to
/// [`ActionMenu::set_definitions`].
pub struct ActionMenu<T, L = DefaultLoaderAdapter<T>> {
    config: ActionMenuConfig,
    root: SubmenuSource<T>,
    tree: SurfaceTree,
    focus: FocusArbiter,
    loaders: L,
    sessions: HashMap<SurfaceId, Session<T>>,
    trail: PointerTrail,
    aim: AimTuning,
    clear_deadline: Option<u64>,
}

impl<T, L> fmt::Debug for ActionMenu<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionMenu")
            .field("config", &self.config)
            .field("open", &self.tree.open_path())
            .field("owner", &self.focus.owner())
            .field("sessions", &self.sessions)
            .field("clear_deadline", &self.clear_deadline)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ActionMenu<T> {
    /// Creates a closed menu over static root definitions.
    ///
    /// Fails if ids collide on a surface or contain the path separator.
    pub fn new(defs: Vec<NodeDef<T>>, config: ActionMenuConfig) -> Result<Self, MenuError> {
        Self::with_source(SubmenuSource::Nodes(defs), config, DefaultLoaderAdapter::new())
    }

    /// Creates a closed menu whose root content comes from `loader`.
    pub fn with_root_loader(loader: LoaderSpec<T>, config: ActionMenuConfig) -> Result<Self, MenuError> {
        Self::with_source(SubmenuSource::Loader(loader), config, DefaultLoaderAdapter::new())
    }
}

impl<T, L> ActionMenu<T, L>
where
    T: 'static,
    L: LoaderAdapter<T> + LoaderResolver<T>,
{
    /// Creates a closed menu with a custom loader adapter.
    pub fn with_source(root: SubmenuSource<T>, config: ActionMenuConfig, loaders: L) -> Result<Self, MenuError> {
        validate_source(&root)?;
        let aim = AimTuning::default();
        Ok(Self {
            focus: FocusArbiter::new(config.focus_retry_frames),
            config,
            root,
            tree: SurfaceTree::new(),
            loaders,
            sessions: HashMap::new(),
            trail: PointerTrail::new(),
            aim,
            clear_deadline: None,
        })
    }

    /// Replaces the predictor tolerances.
    #[must_use]
    pub fn with_aim_tuning(mut self, aim: AimTuning) -> Self {
        self.aim = aim;
        self
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &ActionMenuConfig {
        &self.config
    }

    /// The loader adapter.
    #[must_use]
    pub fn loaders(&self) -> &L {
        &self.loaders
    }

    /// Replaces the root definitions, keeping open surfaces and queries.
    ///
    /// Open submenus whose definition disappeared are closed.
    pub fn set_definitions(&mut self, defs: Vec<NodeDef<T>>) -> Result<(), MenuError> {
        let root = SubmenuSource::Nodes(defs);
        validate_source(&root)?;
        self.root = root;
        for surface in self.tree.open_path().into_iter().skip(1) {
            if self.tree.is_open(&surface) && resolve_source(&self.root, &surface, &self.loaders).is_none() {
                tracing::debug!(surface = %surface, "definition removed; closing surface");
                self.tree.close_submenu(&surface);
            }
        }
        self.refresh_all();
        self.prune();
        Ok(())
    }

    // --- open / close ---

    /// Returns `true` while the root surface is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.tree.is_root_open()
    }

    /// Opens the root surface. Returns `false` if it was already open.
    pub fn open(&mut self, now_ms: u64) -> bool {
        if !self.tree.open_root() {
            return false;
        }
        let root = SurfaceId::root();
        tracing::debug!(now_ms, "menu opened");
        self.focus.claim(&root, OwnershipReason::RootOpened);
        self.focus.request_focus(&root);
        self.clear_deadline = None;
        match self.sessions.get_mut(&root) {
            Some(session) => {
                session.sticky = None;
                let mut cx = Refresh {
                    tree: &mut self.tree,
                    loaders: &mut self.loaders,
                    config: &self.config,
                    root: &self.root,
                };
                session.refresh(&root, &mut cx, false);
            }
            None => self.ensure_session(&root),
        }
        true
    }

    /// Closes the whole tree.
    pub fn close(&mut self, now_ms: u64) {
        if self.tree.is_empty() {
            return;
        }
        self.tree.close_all();
        self.focus.reset();
        self.finish_close(now_ms);
    }

    fn finish_close(&mut self, now_ms: u64) {
        tracing::debug!(now_ms, "menu closed");
        self.trail.clear();
        self.loaders.release_all();
        let root = SurfaceId::root();
        let retained = self.sessions.remove(&root);
        self.sessions.clear();
        self.clear_deadline = None;
        let Some(mut session) = retained else {
            return;
        };
        match self.config.clear_input {
            ClearInput::Immediate => return,
            ClearInput::After(ms) => self.clear_deadline = Some(now_ms.saturating_add(ms)),
            ClearInput::Never => {}
        }
        session.guard.disarm();
        session.list_align.reset();
        self.sessions.insert(root, session);
    }

    // --- time ---

    /// Advances timers to `now_ms` and folds in loader progress.
    ///
    /// Returns `true` if any surface changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        if self.clear_deadline.is_some_and(|deadline| now_ms >= deadline) {
            self.clear_deadline = None;
            if !self.tree.is_root_open() && self.sessions.remove(&SurfaceId::root()).is_some() {
                tracing::debug!(now_ms, "cleared closed menu input");
                changed = true;
            }
        }
        if !self.tree.is_root_open() {
            return changed;
        }

        let mut cx = Refresh {
            tree: &mut self.tree,
            loaders: &mut self.loaders,
            config: &self.config,
            root: &self.root,
        };
        for (surface, session) in &mut self.sessions {
            session.guard.expire(now_ms);
            if session.gate.tick(now_ms).is_some() {
                session.refresh(surface, &mut cx, true);
                changed = true;
            }
        }
        if self.loaders.poll() {
            self.refresh_all();
            changed = true;
        }
        self.prune();
        changed
    }

    /// Earliest timestamp at which [`ActionMenu::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.sessions
            .values()
            .filter_map(Session::deadline)
            .chain(self.clear_deadline)
            .min()
    }

    /// Advances one animation frame of pending focus.
    pub fn frame(&mut self) -> Option<FocusGrant> {
        self.focus.on_frame(&self.tree)
    }

    // --- input ---

    /// Interprets a key press.
    pub fn handle_key(&mut self, event: &KeyEvent, now_ms: u64) -> KeyResponse {
        let options = self.config.keyboard();
        let mut nav = Navigator {
            tree: &mut self.tree,
            focus: &mut self.focus,
        };
        let response = handle_key(event, &mut nav, &options);
        match &response.action {
            Some(KeyAction::OpenedSubmenu { surface, .. }) => {
                let surface = surface.clone();
                self.ensure_session(&surface);
            }
            Some(KeyAction::Select { surface, row }) => {
                let (surface, row) = (surface.clone(), row.clone());
                self.select(&surface, row.as_str(), now_ms);
            }
            Some(KeyAction::CloseTree) => self.finish_close(now_ms),
            _ => {}
        }
        self.follow_scroll_requests();
        self.prune();
        response
    }

    /// Records a new raw value of the search input of `surface`.
    ///
    /// Returns `true` if the effective query changed right away.
    pub fn set_query(&mut self, surface: &SurfaceId, value: &str, now_ms: u64) -> bool {
        if !self.tree.is_open(surface) {
            return false;
        }
        let Some(session) = self.sessions.get_mut(surface) else {
            return false;
        };
        value.clone_into(&mut session.raw_query);
        if session.gate.input(value, now_ms).is_none() {
            return false;
        }
        let mut cx = Refresh {
            tree: &mut self.tree,
            loaders: &mut self.loaders,
            config: &self.config,
            root: &self.root,
        };
        session.refresh(surface, &mut cx, true);
        self.prune();
        true
    }

    /// Selects the row keyed `row` on `surface` (see [`RowAttributes::key`](crate::RowAttributes::key)).
    ///
    /// Items fire their handler, toggle checkbox state, and close the menu
    /// when they close on select. A submenu trigger opens its submenu and
    /// moves input into it. Returns `None` for unknown, disabled, or
    /// non-item rows.
    pub fn select(&mut self, surface: &SurfaceId, row: &str, now_ms: u64) -> Option<Selection> {
        let node = self
            .sessions
            .get(surface)?
            .rows
            .iter()
            .filter_map(Row::as_node)
            .find(|node| node.row_key(surface).as_str() == row)?
            .clone();
        if !node.is_interactive() {
            return None;
        }
        match node {
            Node::Item(item) => {
                let checked = match item.def.variant {
                    ItemVariant::Button => None,
                    ItemVariant::Checkbox => Some(!item.is_checked()),
                    ItemVariant::Radio => Some(true),
                };
                if item.def.variant == ItemVariant::Radio && !item.is_checked() {
                    let on_change = item
                        .radio_group
                        .as_ref()
                        .and_then(|group| group.radio.as_ref())
                        .and_then(|radio| radio.on_value_change.clone());
                    if let Some(on_change) = on_change {
                        on_change(item.def.id.as_str());
                    }
                }
                tracing::debug!(surface = %item.parent, item = %item.def.id, ?checked, "item selected");
                if let Some(on_select) = &item.def.on_select {
                    on_select(&SelectEvent {
                        item: &item.def,
                        surface: &item.parent,
                        checked,
                    });
                }
                let closed = item.def.closes_on_select();
                if closed {
                    self.close(now_ms);
                }
                Some(Selection {
                    surface: item.parent.clone(),
                    item: item.def.id.clone(),
                    checked,
                    closed,
                })
            }
            Node::Submenu(submenu) if submenu.parent == *surface => {
                let child = self.tree.open_submenu(surface, &submenu.def.id)?;
                self.focus.claim(&child, OwnershipReason::SubmenuOpened);
                self.focus.request_focus(&child);
                self.ensure_session(&child);
                None
            }
            _ => None,
        }
    }

    // --- pointer ---

    /// Pointer moved to `point` over `surface`, hovering `row` if any.
    ///
    /// Claims input for the surface, keeps the aim-guard fed, makes the row
    /// active, and opens a hovered submenu trigger. While the guard of the
    /// surface runs, hovering other rows changes nothing. Returns `true` if
    /// the active row or the open submenu changed.
    pub fn pointer_move(&mut self, surface: &SurfaceId, row: Option<&str>, point: Point, now_ms: u64) -> bool {
        self.trail.push(point, now_ms);
        if !self.tree.is_open(surface) {
            return false;
        }
        self.focus.claim(surface, OwnershipReason::PointerEntered);
        self.update_aim(surface, point, now_ms);

        let Some(row) = row else {
            return false;
        };
        let row_id = RowId::new(row);
        if self
            .sessions
            .get(surface)
            .is_some_and(|session| session.guard.suppresses(&row_id, now_ms))
        {
            tracing::trace!(surface = %surface, row, "hover suppressed by aim guard");
            return false;
        }
        let changed = self.tree.set_active(surface, row, ActiveCause::Pointer).is_some();
        let is_submenu = self
            .tree
            .store(surface)
            .and_then(|store| store.row(row))
            .is_some_and(|record| record.kind == RowKind::Submenu);
        let mut opened = false;
        if is_submenu {
            let already_open = self.tree.get(surface).and_then(|record| record.open_child.clone())
                == Some(surface.child(&row_id));
            if !already_open && let Some(child) = self.tree.open_submenu(surface, &row_id) {
                self.ensure_session(&child);
                opened = true;
            }
        }
        self.prune();
        changed || opened
    }

    /// Pointer left row `row` of `surface` at `point`.
    ///
    /// If `row` triggers the open submenu, the submenu closes unless the
    /// pointer is inside it, the guard runs, or the pointer is heading into
    /// it. Returns `true` if a submenu closed.
    pub fn pointer_leave_row(&mut self, surface: &SurfaceId, row: &str, point: Point, now_ms: u64) -> bool {
        self.trail.push(point, now_ms);
        let Some(open) = self.tree.get(surface).and_then(|record| record.open_child.clone()) else {
            return false;
        };
        if open.trigger().is_none_or(|trigger| trigger.as_str() != row) {
            return false;
        }
        let inside = self
            .tree
            .get(&open)
            .and_then(|record| record.bounds)
            .is_some_and(|bounds| bounds.contains(point));
        let guarded = self
            .sessions
            .get(surface)
            .is_some_and(|session| session.guard.is_active(now_ms));
        if inside || guarded || self.update_aim(surface, point, now_ms) {
            return false;
        }
        self.tree.close_submenu(&open);
        if self.focus.owner().is_some_and(|owner| owner.is_within(&open)) {
            self.focus.claim(surface, OwnershipReason::PointerEntered);
        }
        self.prune();
        true
    }

    /// Arms the guard of `surface` when the pointer heads into its open submenu.
    fn update_aim(&mut self, surface: &SurfaceId, point: Point, now_ms: u64) -> bool {
        let Some(record) = self.tree.get(surface) else {
            return false;
        };
        let Some(child) = record.open_child.clone() else {
            return false;
        };
        let (Some(submenu), Some(trigger)) = (self.tree.get(&child).and_then(|child| child.bounds), child.trigger())
        else {
            return false;
        };
        let trigger_rect = record.store.row(trigger.as_str()).and_then(|row| row.bounds);
        if !predict_aim(&self.trail, point, submenu, trigger_rect, &self.aim) {
            return false;
        }
        if let Some(session) = self.sessions.get_mut(surface) {
            tracing::trace!(surface = %surface, trigger = %trigger, "aim guard armed");
            session.guard.arm(trigger, now_ms);
        }
        true
    }

    // --- layout ---

    /// The surface's content exists and can take focus.
    pub fn mount(&mut self, surface: &SurfaceId) {
        self.tree.mark_mounted(surface);
    }

    /// Records the laid-out bounds of `surface`.
    pub fn set_surface_bounds(&mut self, surface: &SurfaceId, bounds: Rect) {
        self.tree.set_bounds(surface, bounds);
    }

    /// Records the laid-out bounds of a row.
    pub fn set_row_bounds(&mut self, surface: &SurfaceId, row: &str, bounds: Rect) {
        if let Some(store) = self.tree.store_mut(surface) {
            store.set_row_bounds(row, bounds);
        }
    }

    /// Sets the height of the list viewport of `surface`.
    pub fn set_viewport(&mut self, surface: &SurfaceId, extent: f64) {
        if let Some(session) = self.sessions.get_mut(surface) {
            session.window.set_viewport_extent(extent);
        }
    }

    /// The host scrolled the list of `surface`.
    pub fn set_scroll_offset(&mut self, surface: &SurfaceId, offset: f64) {
        if let Some(session) = self.sessions.get_mut(surface) {
            session.window.set_scroll_offset(offset);
        }
    }

    /// Current scroll offset of the list of `surface`.
    #[must_use]
    pub fn scroll_offset(&self, surface: &SurfaceId) -> Option<f64> {
        self.sessions.get(surface).map(|session| session.window.scroll_offset())
    }

    /// Records the measured height of row `index` of `surface`.
    pub fn measure_row(&mut self, surface: &SurfaceId, index: usize, extent: f64) {
        if let Some(session) = self.sessions.get_mut(surface) {
            session.window.measure(index, extent);
        }
    }

    /// Takes bounds the host should scroll into view for a non-virtual list.
    pub fn take_scroll_into_view(&mut self, surface: &SurfaceId) -> Option<Rect> {
        self.sessions.get_mut(surface)?.scroll_into_view.take()
    }

    /// Measures where the first row of a submenu sits inside its surface.
    ///
    /// Returns `true` if the offset changed and the surface should be placed again.
    pub fn measure_layout(&mut self, surface: &SurfaceId, layout: &SurfaceLayout) -> bool {
        self.sessions
            .get_mut(surface)
            .is_some_and(|session| session.list_align.measure(layout))
    }

    /// Builds the placement request for `surface` anchored at `anchor`.
    ///
    /// The root anchors on its trigger button, a submenu on its trigger row.
    /// Submenus align their first row with the trigger row and open toward
    /// the reading direction.
    #[must_use]
    pub fn placement_request(&self, surface: &SurfaceId, anchor: Rect, size: Size) -> Option<PlacementRequest> {
        if !self.tree.is_open(surface) {
            return None;
        }
        let depth = surface.depth();
        let mut defaults = PlacementDefaults::for_depth(depth);
        if self.config.direction == Direction::Rtl {
            defaults = defaults.mirrored();
        }
        let mut request = PlacementRequest::new(anchor, size, defaults);
        if let Some(session) = self.sessions.get(surface).filter(|_| depth > 0) {
            request = request.with_align_offset(session.list_align.offset());
        }
        Some(request)
    }

    /// Places `surface` through `service`.
    pub fn place(
        &self,
        surface: &SurfaceId,
        anchor: Rect,
        size: Size,
        service: &dyn PositioningService,
    ) -> Option<Placement> {
        self.placement_request(surface, anchor, size)
            .map(|request| service.place(&request))
    }

    /// Bounds of the row that opened `surface`, if laid out.
    #[must_use]
    pub fn trigger_row_bounds(&self, surface: &SurfaceId) -> Option<Rect> {
        let parent = surface.parent()?;
        let trigger = surface.trigger()?;
        self.tree.store(&parent)?.row(trigger.as_str())?.bounds
    }

    // --- queries ---

    /// Store of an open surface.
    pub fn store(&self, surface: &SurfaceId) -> Result<&SurfaceStore, MenuError> {
        self.tree
            .store(surface)
            .ok_or_else(|| MenuError::UnknownSurface(surface.clone()))
    }

    /// Mutable store of an open surface, for subscriptions.
    pub fn store_mut(&mut self, surface: &SurfaceId) -> Result<&mut SurfaceStore, MenuError> {
        self.tree
            .store_mut(surface)
            .ok_or_else(|| MenuError::UnknownSurface(surface.clone()))
    }

    /// Open surfaces from the root down.
    #[must_use]
    pub fn open_surfaces(&self) -> Vec<SurfaceId> {
        self.tree.open_path()
    }

    /// Surface that owns keyboard input.
    #[must_use]
    pub fn focus_owner(&self) -> Option<&SurfaceId> {
        self.focus.owner()
    }

    /// Active row of `surface`.
    #[must_use]
    pub fn active_row(&self, surface: &SurfaceId) -> Option<&RowId> {
        self.tree.store(surface)?.active_id()
    }

    /// Raw input value of `surface`.
    #[must_use]
    pub fn query(&self, surface: &SurfaceId) -> Option<&str> {
        self.sessions.get(surface).map(|session| session.raw_query.as_str())
    }

    /// Effective (debounced) query of `surface`.
    #[must_use]
    pub fn effective_query(&self, surface: &SurfaceId) -> Option<&str> {
        self.sessions.get(surface).map(|session| session.gate.effective())
    }

    /// Flattened rows of `surface`.
    #[must_use]
    pub fn rows(&self, surface: &SurfaceId) -> &[Row<T>] {
        self.sessions
            .get(surface)
            .map_or(&[], |session| session.rows.as_slice())
    }

    /// Attributes of the button that opens the menu.
    #[must_use]
    pub fn trigger_attributes(&self) -> TriggerAttributes {
        let root = SurfaceId::root();
        TriggerAttributes {
            expanded: self.tree.is_open(&root),
            state: self.tree.state_tag(&root),
        }
    }

    /// Snapshot of an open surface, realizing only the rows in its window.
    pub fn surface_view(&mut self, surface: &SurfaceId) -> Option<SurfaceView> {
        let record = self.tree.get(surface)?;
        let session = self.sessions.get_mut(surface)?;
        let state = record.store.state();
        let list_id = state.list_id.as_str();
        let active = state.active_id.as_ref();
        let expanded = record.open_child.as_ref().and_then(SurfaceId::trigger);

        let strip = session.window.visible_strip();
        let end = strip.end.min(session.rows.len());
        let rows = session.rows[strip.start.min(end)..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| RowView::new(strip.start + offset, row, surface, list_id, active, expanded.as_ref()))
            .collect();
        let input = state.has_input.then(|| InputAttributes {
            controls: list_id.to_owned(),
            active_descendant: active.map(|row| row_element_id(list_id, row)),
        });
        Some(SurfaceView {
            surface: SurfaceAttributes {
                surface_id: surface.clone(),
                state: SurfaceStateTag::Open,
            },
            input,
            query: session.raw_query.clone(),
            title: session.title.clone(),
            strip,
            row_count: session.rows.len(),
            rows,
            status: session.status.clone(),
            deep: session.deep.clone(),
        })
    }

    // --- bookkeeping ---

    fn ensure_session(&mut self, surface: &SurfaceId) {
        if self.sessions.contains_key(surface) {
            return;
        }
        let inherited = surface
            .parent()
            .and_then(|parent| self.sessions.get(&parent))
            .map_or(self.config.search, |parent| parent.search);
        let search = resolve_source(&self.root, surface, &self.loaders)
            .and_then(|source| source.search)
            .unwrap_or(inherited);
        let mut session = Session::new(&self.config, search);
        let mut cx = Refresh {
            tree: &mut self.tree,
            loaders: &mut self.loaders,
            config: &self.config,
            root: &self.root,
        };
        session.refresh(surface, &mut cx, false);
        self.sessions.insert(surface.clone(), session);
    }

    fn refresh_all(&mut self) {
        let mut cx = Refresh {
            tree: &mut self.tree,
            loaders: &mut self.loaders,
            config: &self.config,
            root: &self.root,
        };
        let mut surfaces: Vec<SurfaceId> = self.sessions.keys().cloned().collect();
        surfaces.sort_by_key(SurfaceId::depth);
        for surface in surfaces {
            if let Some(session) = self.sessions.get_mut(&surface)
                && cx.tree.is_open(&surface)
            {
                session.refresh(&surface, &mut cx, false);
            }
        }
    }

    fn follow_scroll_requests(&mut self) {
        for (surface, session) in &mut self.sessions {
            session.follow_scroll_request(&mut self.tree, surface);
        }
    }

    /// Drops the state of surfaces that closed and hands input back to the
    /// deepest open ancestor if the owner's surface went with them.
    fn prune(&mut self) {
        if !self.tree.is_root_open() {
            return;
        }
        if let Some(owner) = self.focus.owner().filter(|owner| !self.tree.is_open(owner)).cloned() {
            let mut heir = owner.parent();
            while let Some(surface) = heir.as_ref().filter(|surface| !self.tree.is_open(surface)) {
                heir = surface.parent();
            }
            if let Some(heir) = heir {
                tracing::debug!(from = %owner, to = %heir, "focus owner closed");
                self.focus.claim(&heir, OwnershipReason::SubmenuClosed);
                self.focus.request_focus(&heir);
            }
        }
        let tree = &self.tree;
        let loaders = &mut self.loaders;
        self.sessions.retain(|surface, _| {
            let open = tree.is_open(surface);
            if !open {
                tracing::trace!(surface = %surface, "drop surface state");
                loaders.release(surface);
            }
            open
        });
    }
}

fn validate_source<T>(source: &SubmenuSource<T>) -> Result<(), MenuError> {
    let root = SurfaceId::root();
    match source {
        SubmenuSource::Nodes(nodes) => validate_defs(nodes, &root),
        SubmenuSource::Loader(LoaderSpec::Static(result)) => validate_defs(result.nodes(), &root),
        SubmenuSource::Loader(LoaderSpec::Function(_)) => Ok(()),
    }
}
