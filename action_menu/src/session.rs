// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface engine state and the refresh pipeline.

use core::fmt;
use std::rc::Rc;

use action_menu_aim::AimGuard;
use action_menu_focus::SurfaceTree;
use action_menu_loader::{LoaderAdapter, LoaderRequest, QueryGate};
use action_menu_model::{
    LoadStatus, LoaderQuery, LoaderResolver, LoaderSpec, Menu, NodeDef, Row, RowId, SearchConfig,
    SubmenuDef, SubmenuSource, SurfaceId,
};
use action_menu_position::ListAlignTracker;
use action_menu_registry::{ActiveCause, RowRecord, ScrollRequest};
use action_menu_search::{
    AggregateResult, StickyGroups, aggregate_loader_results, collect_deep_search_loaders,
    deep_search, inject_loader_results,
};
use action_menu_virtual_list::{
    ScrollAlign, VirtualWindow, flatten_rows, plain_record, search_rows, sync_store,
};
use kurbo::Rect;

use crate::config::ActionMenuConfig;

/// Where a surface's nodes come from, plus its own search settings.
pub(crate) struct SurfaceSource<T> {
    pub(crate) source: SubmenuSource<T>,
    pub(crate) search: Option<SearchConfig>,
    pub(crate) title: Option<String>,
}

/// Finds the node source of `surface` by walking submenu ids from the root.
///
/// Loader-backed levels on the way are read from whatever `loaders` has
/// cached; nothing is invoked.
pub(crate) fn resolve_source<T>(
    root: &SubmenuSource<T>,
    surface: &SurfaceId,
    loaders: &dyn LoaderResolver<T>,
) -> Option<SurfaceSource<T>> {
    let mut at = SurfaceId::root();
    if !surface.is_within(&at) {
        return None;
    }
    let mut current = SurfaceSource {
        source: root.clone(),
        search: None,
        title: None,
    };
    for id in surface.submenu_path() {
        let defs = materialize(&current.source, &at, loaders);
        let submenu = find_submenu(&defs, id)?;
        at = at.child(&submenu.id);
        current = SurfaceSource {
            source: submenu.source.clone(),
            search: submenu.search,
            title: Some(submenu.breadcrumb().to_owned()),
        };
    }
    Some(current)
}

fn materialize<T>(source: &SubmenuSource<T>, surface: &SurfaceId, loaders: &dyn LoaderResolver<T>) -> Vec<NodeDef<T>> {
    match source {
        SubmenuSource::Nodes(nodes) => nodes.clone(),
        SubmenuSource::Loader(LoaderSpec::Static(result)) => result.nodes().to_vec(),
        SubmenuSource::Loader(loader) => loaders
            .resolve(surface, loader)
            .and_then(|result| result.data)
            .unwrap_or_default(),
    }
}

fn find_submenu<T>(defs: &[NodeDef<T>], id: &str) -> Option<Rc<SubmenuDef<T>>> {
    defs.iter().find_map(|def| match def {
        NodeDef::Submenu(submenu) if submenu.id.as_str() == id => Some(Rc::clone(submenu)),
        NodeDef::Group(group) => find_submenu(&group.children, id),
        _ => None,
    })
}

/// Collaborators a refresh needs besides the session itself.
pub(crate) struct Refresh<'a, T, L> {
    pub(crate) tree: &'a mut SurfaceTree,
    pub(crate) loaders: &'a mut L,
    pub(crate) config: &'a ActionMenuConfig,
    pub(crate) root: &'a SubmenuSource<T>,
}

/// Engine state of one surface that outlives a single render.
pub(crate) struct Session<T> {
    pub(crate) raw_query: String,
    pub(crate) gate: QueryGate,
    pub(crate) search: SearchConfig,
    pub(crate) has_input: bool,
    pub(crate) title: Option<String>,
    pub(crate) status: Option<LoadStatus>,
    pub(crate) rows: Vec<Row<T>>,
    pub(crate) window: VirtualWindow,
    pub(crate) sticky: Option<StickyGroups>,
    pub(crate) deep: AggregateResult,
    pub(crate) guard: AimGuard<RowId>,
    pub(crate) list_align: ListAlignTracker,
    pub(crate) scroll_into_view: Option<Rect>,
}

impl<T> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("raw_query", &self.raw_query)
            .field("effective_query", &self.gate.effective())
            .field("search", &self.search)
            .field("status", &self.status)
            .field("rows", &self.rows.len())
            .field("deep", &self.deep)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Session<T> {
    pub(crate) fn new(config: &ActionMenuConfig, search: SearchConfig) -> Self {
        Self {
            raw_query: String::new(),
            gate: QueryGate::new(search.into()),
            search,
            has_input: config.search_input,
            title: None,
            status: None,
            rows: Vec::new(),
            window: VirtualWindow::with_config(0, 0.0, config.window()),
            sticky: None,
            deep: AggregateResult::default(),
            guard: AimGuard::new(config.aim_guard_ms),
            list_align: ListAlignTracker::new(),
            scroll_into_view: None,
        }
    }

    /// Rebuilds rows for `surface` and mirrors them into its store.
    ///
    /// With `query_changed`, the first row becomes active and the window
    /// scrolls back to the top.
    pub(crate) fn refresh<L>(&mut self, surface: &SurfaceId, cx: &mut Refresh<'_, T, L>, query_changed: bool)
    where
        L: LoaderAdapter<T> + LoaderResolver<T>,
    {
        let Some(source) = resolve_source(cx.root, surface, &*cx.loaders) else {
            tracing::debug!(surface = %surface, "no source for surface");
            return;
        };
        self.title = source.title;

        let query = self.gate.effective().to_owned();
        let load = self.gate.should_load();
        let (defs, status, settled) = match &source.source {
            SubmenuSource::Nodes(nodes) => (nodes.clone(), None, true),
            SubmenuSource::Loader(loader) => {
                let result = match loader {
                    LoaderSpec::Static(result) => Some(result.clone()),
                    LoaderSpec::Function(_) if load => cx.loaders.use_loader(
                        surface,
                        loader,
                        &LoaderQuery {
                            query: query.clone(),
                            open: true,
                        },
                    ),
                    LoaderSpec::Function(_) => LoaderResolver::resolve(&*cx.loaders, surface, loader),
                };
                match result {
                    Some(result) => {
                        let status = result.status();
                        let settled = result.data.is_some() && !result.is_loading;
                        (result.data.unwrap_or_default(), Some(status), settled)
                    }
                    None => (Vec::new(), None, false),
                }
            }
        };
        self.status = status.clone();

        let mut browse = Menu::instantiate_at(&defs, surface.clone(), &*cx.loaders);
        browse.status = status.clone();
        browse.title = self.title.clone();
        // Captured once per open, from the first settled content.
        if self.sticky.is_none() && settled {
            self.sticky = Some(StickyGroups::capture(&browse));
        }

        let rows = if query.is_empty() {
            self.deep = AggregateResult::default();
            flatten_rows(&browse)
        } else {
            let mut searched = browse;
            let entries = if load {
                collect_deep_search_loaders(&defs, surface)
            } else {
                Vec::new()
            };
            if entries.is_empty() {
                self.deep = AggregateResult::default();
            } else {
                // Open surfaces drive their own loader with their own query.
                let requests: Vec<LoaderRequest<T>> = entries
                    .iter()
                    .filter(|entry| !cx.tree.is_open(&entry.surface))
                    .map(|entry| LoaderRequest {
                        surface: entry.surface.clone(),
                        loader: entry.loader.clone(),
                        query: LoaderQuery {
                            query: query.clone(),
                            open: true,
                        },
                    })
                    .collect();
                let mut results = cx.loaders.use_loaders(&requests);
                for entry in entries.iter().filter(|entry| cx.tree.is_open(&entry.surface)) {
                    if let Some(result) = LoaderResolver::resolve(&*cx.loaders, &entry.surface, &entry.loader) {
                        results.insert(entry.surface.clone(), result);
                    }
                }
                self.deep = aggregate_loader_results(&entries, &results);
                let injected = inject_loader_results(&defs, surface, &results);
                searched = Menu::instantiate_at(&injected, surface.clone(), &*cx.loaders);
                searched.status = status;
                searched.title = self.title.clone();
            }
            let results = deep_search(&searched, &query, self.search.mode);
            match &self.sticky {
                Some(sticky) if cx.config.sticky_groups => sticky.apply(results),
                _ => search_rows(results),
            }
        };

        let change = {
            let Some(store) = cx.tree.store_mut(surface) else {
                self.rows = rows;
                return;
            };
            store.set_has_input(self.has_input);
            // Submenus found by deep search belong to another surface and
            // cannot open here.
            sync_store(store, surface, &rows, |node| {
                if node.parent() == surface {
                    plain_record(node)
                } else {
                    RowRecord::item()
                }
            });
            if query_changed {
                store.first(ActiveCause::Programmatic)
            } else {
                None
            }
        };
        if let Some(change) = change {
            cx.tree.close_stale_children(surface, &change);
        }
        if query_changed {
            self.window.scroll_to_index(0, ScrollAlign::Start);
        }
        self.window.set_count(rows.len());
        if self.window.viewport_extent() > 0.0 {
            self.window.clamp_scroll_to_content();
        }
        self.rows = rows;
        self.follow_scroll_request(cx.tree, surface);
    }

    /// Applies a pending scroll request from the surface's store.
    pub(crate) fn follow_scroll_request(&mut self, tree: &mut SurfaceTree, surface: &SurfaceId) {
        let Some(request) = tree.store_mut(surface).and_then(|store| store.take_scroll_request()) else {
            return;
        };
        match request {
            // Nothing is laid out before the host reports a viewport.
            ScrollRequest::Index(_) if self.window.viewport_extent() <= 0.0 => {}
            ScrollRequest::Index(index) => self.window.scroll_to_index(index, ScrollAlign::Nearest),
            ScrollRequest::Bounds(bounds) => self.scroll_into_view = Some(bounds),
        }
    }

    /// Earliest time this session wants a tick.
    pub(crate) fn deadline(&self) -> Option<u64> {
        [self.gate.deadline(), self.guard.deadline()]
            .into_iter()
            .flatten()
            .min()
    }
}
