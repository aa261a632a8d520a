// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discovery, aggregation, and injection of deep-search loaders.
//!
//! A deep search over a tree with loader-backed submenus runs in three steps:
//!
//! 1. [`collect_deep_search_loaders`] finds every function loader reachable
//!    through submenus that allow deep search.
//! 2. The host runs all of them in parallel and gathers their results by
//!    surface id, then [`aggregate_loader_results`] summarizes the flags.
//! 3. [`inject_loader_results`] writes the results back into the definition
//!    tree as static loaders, ready to be instantiated and searched.

use std::rc::Rc;

use action_menu_model::{
    GroupDef, LoadStatus, LoaderResult, LoaderSpec, NodeDef, RowId, SearchConfig, SubmenuDef,
    SubmenuSource, SurfaceId,
};
use hashbrown::HashMap;

/// A loader-backed submenu found by [`collect_deep_search_loaders`].
pub struct DeepSearchLoader<T> {
    /// Submenu ids from the searched surface down to (and including) the owner.
    pub path: Vec<RowId>,
    /// Surface the loader fills.
    pub surface: SurfaceId,
    /// Human-readable titles matching `path`.
    pub breadcrumbs: Vec<String>,
    /// The loader.
    pub loader: LoaderSpec<T>,
    /// The owning submenu's own search configuration.
    pub search: Option<SearchConfig>,
}

impl<T> Clone for DeepSearchLoader<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            surface: self.surface.clone(),
            breadcrumbs: self.breadcrumbs.clone(),
            loader: self.loader.clone(),
            search: self.search,
        }
    }
}

impl<T> core::fmt::Debug for DeepSearchLoader<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeepSearchLoader")
            .field("surface", &self.surface)
            .field("breadcrumbs", &self.breadcrumbs)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

/// Finds the function loaders a deep search from `surface` must run.
///
/// Walks groups and static submenus (including the data of static loaders).
/// A submenu with `deep_search` off is skipped together with everything
/// below it.
#[must_use]
pub fn collect_deep_search_loaders<T>(defs: &[NodeDef<T>], surface: &SurfaceId) -> Vec<DeepSearchLoader<T>> {
    let mut out = Vec::new();
    collect_into(defs, surface, &[], &[], &mut out);
    out
}

fn collect_into<T>(
    defs: &[NodeDef<T>],
    surface: &SurfaceId,
    path: &[RowId],
    breadcrumbs: &[String],
    out: &mut Vec<DeepSearchLoader<T>>,
) {
    for def in defs {
        match def {
            NodeDef::Item(_) => {}
            NodeDef::Group(group) => collect_into(&group.children, surface, path, breadcrumbs, out),
            NodeDef::Submenu(submenu) => {
                if !submenu.deep_search {
                    continue;
                }
                let child = surface.child(&submenu.id);
                let mut child_path = path.to_vec();
                child_path.push(submenu.id.clone());
                let mut child_crumbs = breadcrumbs.to_vec();
                child_crumbs.push(submenu.breadcrumb().to_owned());
                match &submenu.source {
                    SubmenuSource::Nodes(nodes) => {
                        collect_into(nodes, &child, &child_path, &child_crumbs, out);
                    }
                    SubmenuSource::Loader(LoaderSpec::Static(result)) => {
                        collect_into(result.nodes(), &child, &child_path, &child_crumbs, out);
                    }
                    SubmenuSource::Loader(loader) => out.push(DeepSearchLoader {
                        path: child_path,
                        surface: child,
                        breadcrumbs: child_crumbs,
                        loader: loader.clone(),
                        search: submenu.search,
                    }),
                }
            }
        }
    }
}

/// Progress of one deep-search loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderProgress {
    /// Surface the loader fills.
    pub surface: SurfaceId,
    /// Submenu ids leading to it.
    pub path: Vec<RowId>,
    /// Titles leading to it (title, falling back to id).
    pub breadcrumbs: Vec<String>,
    /// Its flags.
    pub status: LoadStatus,
}

/// Combined state of all deep-search loaders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateResult {
    /// Any loader is still on its first load.
    pub is_loading: bool,
    /// Any loader failed.
    pub is_error: bool,
    /// Any loader is in flight.
    pub is_fetching: bool,
    /// One entry per loader, in discovery order.
    pub progress: Vec<LoaderProgress>,
}

/// Summarizes `results` for `entries`.
///
/// Flags are ORed across entries. An entry without a result yet counts as
/// loading. A failure only marks its own entry and the aggregate error flag.
#[must_use]
pub fn aggregate_loader_results<T>(
    entries: &[DeepSearchLoader<T>],
    results: &HashMap<SurfaceId, LoaderResult<T>>,
) -> AggregateResult {
    let mut aggregate = AggregateResult::default();
    for entry in entries {
        let status = results
            .get(&entry.surface)
            .map_or_else(|| LoaderResult::<T>::loading().status(), LoaderResult::status);
        aggregate.is_loading |= status.is_loading;
        aggregate.is_error |= status.is_error;
        aggregate.is_fetching |= status.is_fetching;
        aggregate.progress.push(LoaderProgress {
            surface: entry.surface.clone(),
            path: entry.path.clone(),
            breadcrumbs: entry.breadcrumbs.clone(),
            status,
        });
    }
    aggregate
}

/// Returns a copy of `defs` with loader results substituted in.
///
/// Each loader-backed submenu whose surface has a result gets a static loader
/// holding it. Submenus with `deep_search` off are left untouched, loader
/// included, as is everything below them.
#[must_use]
pub fn inject_loader_results<T>(
    defs: &[NodeDef<T>],
    surface: &SurfaceId,
    results: &HashMap<SurfaceId, LoaderResult<T>>,
) -> Vec<NodeDef<T>> {
    defs.iter()
        .map(|def| inject_one(def, surface, results))
        .collect()
}

fn inject_one<T>(
    def: &NodeDef<T>,
    surface: &SurfaceId,
    results: &HashMap<SurfaceId, LoaderResult<T>>,
) -> NodeDef<T> {
    match def {
        NodeDef::Item(_) => def.clone(),
        NodeDef::Group(group) => NodeDef::Group(Rc::new(GroupDef {
            id: group.id.clone(),
            heading: group.heading.clone(),
            children: inject_loader_results(&group.children, surface, results),
            radio: group.radio.clone(),
        })),
        NodeDef::Submenu(submenu) => {
            if !submenu.deep_search {
                return def.clone();
            }
            let child = surface.child(&submenu.id);
            let source = match &submenu.source {
                SubmenuSource::Nodes(nodes) => {
                    SubmenuSource::Nodes(inject_loader_results(nodes, &child, results))
                }
                SubmenuSource::Loader(LoaderSpec::Static(result)) => {
                    let mut result = result.clone();
                    if let Some(data) = result.data.take() {
                        result.data = Some(inject_loader_results(&data, &child, results));
                    }
                    SubmenuSource::Loader(LoaderSpec::Static(result))
                }
                SubmenuSource::Loader(loader) => match results.get(&child) {
                    Some(result) => SubmenuSource::Loader(LoaderSpec::Static(result.clone())),
                    None => SubmenuSource::Loader(loader.clone()),
                },
            };
            NodeDef::Submenu(Rc::new(SubmenuDef {
                source,
                ..SubmenuDef::clone(submenu)
            }))
        }
    }
}
