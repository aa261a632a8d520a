// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a surface's row registry in step with its flattened rows.

use action_menu_model::{Node, Row, RowId, SurfaceId};
use action_menu_registry::{RowKind, RowRecord, SurfaceStore};

/// What [`sync_store`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Rows newly registered.
    pub registered: usize,
    /// Rows removed because they left the sequence.
    pub unregistered: usize,
    /// Whether keyboard order was reset.
    pub reordered: bool,
}

impl SyncOutcome {
    /// Returns `true` if the registry was touched at all.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.registered > 0 || self.unregistered > 0 || self.reordered
    }
}

/// Makes the store of `surface` mirror `rows`.
///
/// Interactive rows (enabled items and submenu triggers) are registered under
/// [`Node::row_key`] with records from `make_record`; registered rows that are no longer in the
/// sequence are unregistered. When the interactive ids differ from the
/// store's order, the order is reset to the visible sequence. Virtual
/// indices always follow row positions, headings and disabled rows included.
pub fn sync_store<T, F>(
    store: &mut SurfaceStore,
    surface: &SurfaceId,
    rows: &[Row<T>],
    mut make_record: F,
) -> SyncOutcome
where
    F: FnMut(&Node<T>) -> RowRecord,
{
    let mut outcome = SyncOutcome::default();
    let mut visible: Vec<(RowId, usize)> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let Some(node) = row.as_node().filter(|node| node.is_interactive()) else {
            continue;
        };
        if RowKind::from_node(node.kind()).is_none() {
            continue;
        }
        visible.push((node.row_key(surface), index));
    }

    let stale: Vec<RowId> = store
        .order()
        .iter()
        .filter(|id| !visible.iter().any(|(row, _)| row == *id))
        .cloned()
        .collect();
    for id in &stale {
        store.unregister_row(id.as_str());
        outcome.unregistered += 1;
    }

    for (id, index) in &visible {
        if store.contains(id.as_str()) {
            continue;
        }
        if let Some(node) = rows[*index].as_node() {
            store.register_row(id.clone(), make_record(node).with_virtual_index(*index));
            outcome.registered += 1;
        }
    }

    let in_order = store.order().len() == visible.len()
        && store
            .order()
            .iter()
            .zip(&visible)
            .all(|(current, (wanted, _))| current == wanted);
    if !in_order {
        store.reset_order(visible.iter().map(|(id, _)| id.clone()));
        outcome.reordered = true;
    }
    store.reset_virtual_index_map(visible);

    if outcome.changed() {
        tracing::trace!(
            list = %store.state().list_id,
            registered = outcome.registered,
            unregistered = outcome.unregistered,
            reordered = outcome.reordered,
            "synced rows"
        );
    }
    outcome
}

/// Default record factory: kind from the node, no hooks.
#[must_use]
pub fn plain_record<T>(node: &Node<T>) -> RowRecord {
    match node {
        Node::Submenu(_) => RowRecord::submenu(),
        _ => RowRecord::item(),
    }
}
