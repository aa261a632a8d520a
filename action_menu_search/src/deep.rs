// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep search over runtime menu trees.

use action_menu_model::{Menu, Node, NodeKind, RowId, SearchContext, SearchMode, SurfaceId};

use crate::score::command_score;

/// Score given to every candidate when scoring is delegated to a loader.
pub const TRUSTED_SCORE: f64 = 1.0;

/// Score given in hybrid mode to loader-supplied nodes the local scorer
/// rejected. They sort after every local match.
pub const HYBRID_FLOOR_SCORE: f64 = f64::MIN_POSITIVE;

/// Searches `menu` and every reachable descendant for `query`.
///
/// Items and submenu triggers are scored by id, label, and keywords and kept
/// when the score is positive. Groups are transparent. A submenu whose
/// `deep_search` is off still matches as a trigger, but nothing below it is
/// searched. Each result carries a [`SearchContext`] with the breadcrumbs
/// leading to it.
///
/// `mode` applies to `menu`'s own nodes; nested submenus with their own
/// search configuration use theirs. Results are ordered by [`rank`].
#[must_use]
pub fn deep_search<T>(menu: &Menu<T>, query: &str, mode: SearchMode) -> Vec<Node<T>> {
    let mut out = Vec::new();
    let walk = Walk {
        query,
        root: &menu.surface,
    };
    walk.collect(menu, mode, &[], &[], &mut out);
    tracing::debug!(surface = %menu.surface, query, matches = out.len(), "deep search");
    rank(out)
}

/// Orders search results: descending score, then submenu triggers before
/// items. Both steps are stable, so equal scores keep tree order.
#[must_use]
pub fn rank<T>(mut results: Vec<Node<T>>) -> Vec<Node<T>> {
    results.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
    let (mut submenus, items): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|node| node.kind() == NodeKind::Submenu);
    submenus.extend(items);
    submenus
}

fn score_of<T>(node: &Node<T>) -> f64 {
    node.search().map_or(0.0, |context| context.score)
}

/// Scores one node against `query` by id, label, and keywords.
#[must_use]
pub fn score_node<T>(node: &Node<T>, query: &str) -> f64 {
    let label = node.display_label();
    let keywords = node.keywords();
    let mut aliases: Vec<&str> = Vec::with_capacity(keywords.len() + 1);
    if label != node.id().as_str() {
        aliases.push(label);
    }
    aliases.extend(keywords.iter().map(String::as_str));
    command_score(node.id().as_str(), query, &aliases)
}

struct Walk<'q> {
    query: &'q str,
    root: &'q SurfaceId,
}

impl Walk<'_> {
    fn collect<T>(
        &self,
        menu: &Menu<T>,
        mode: SearchMode,
        breadcrumbs: &[String],
        breadcrumb_ids: &[RowId],
        out: &mut Vec<Node<T>>,
    ) {
        let from_loader = menu.status.is_some();
        self.collect_nodes(&menu.nodes, mode, from_loader, breadcrumbs, breadcrumb_ids, out);
    }

    fn collect_nodes<T>(
        &self,
        nodes: &[Node<T>],
        mode: SearchMode,
        from_loader: bool,
        breadcrumbs: &[String],
        breadcrumb_ids: &[RowId],
        out: &mut Vec<Node<T>>,
    ) {
        for node in nodes {
            match node {
                Node::Group(group) => {
                    self.collect_nodes(&group.children, mode, from_loader, breadcrumbs, breadcrumb_ids, out);
                }
                Node::Item(_) => self.consider(node, mode, from_loader, breadcrumbs, breadcrumb_ids, out),
                Node::Submenu(submenu) => {
                    self.consider(node, mode, from_loader, breadcrumbs, breadcrumb_ids, out);
                    if !submenu.def.deep_search {
                        continue;
                    }
                    let child_mode = submenu.def.search.map_or(mode, |config| config.mode);
                    let mut crumbs = breadcrumbs.to_vec();
                    crumbs.push(submenu.def.breadcrumb().to_owned());
                    let mut crumb_ids = breadcrumb_ids.to_vec();
                    crumb_ids.push(submenu.def.id.clone());
                    self.collect(&submenu.child, child_mode, &crumbs, &crumb_ids, out);
                }
            }
        }
    }

    fn consider<T>(
        &self,
        node: &Node<T>,
        mode: SearchMode,
        from_loader: bool,
        breadcrumbs: &[String],
        breadcrumb_ids: &[RowId],
        out: &mut Vec<Node<T>>,
    ) {
        let score = match mode {
            SearchMode::Client => score_node(node, self.query),
            SearchMode::Server => TRUSTED_SCORE,
            SearchMode::Hybrid => {
                let local = score_node(node, self.query);
                if local <= 0.0 && from_loader {
                    HYBRID_FLOOR_SCORE
                } else {
                    local
                }
            }
        };
        if score <= 0.0 {
            return;
        }
        out.push(node.with_search(SearchContext {
            query: self.query.to_owned(),
            score,
            is_deep: node.parent() != self.root,
            breadcrumbs: breadcrumbs.to_vec(),
            breadcrumb_ids: breadcrumb_ids.to_vec(),
        }));
    }
}
