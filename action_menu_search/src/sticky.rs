// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky selected/unselected grouping for value pickers.

use action_menu_model::{Menu, Node, Row, RowId};
use hashbrown::HashMap;

/// Id of the separator row placed between the two buckets.
pub const STICKY_SEPARATOR_ID: &str = "sticky-separator";

/// Bucket an item was in when the menu opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InitialGroup {
    /// Checked at open time.
    Selected,
    /// Not checked at open time.
    Unselected,
}

/// Selected/unselected membership captured once per open.
///
/// Toggling an item while the menu is open does not move it; the split is
/// recomputed only by capturing again (on the next open). Nodes that were
/// not present at capture time count as unselected.
#[derive(Clone, Debug, Default)]
pub struct StickyGroups {
    initial: HashMap<RowId, InitialGroup>,
}

impl StickyGroups {
    /// Records the checked state of every item of `menu` (groups included).
    #[must_use]
    pub fn capture<T>(menu: &Menu<T>) -> Self {
        let initial = menu
            .flatten(action_menu_model::FlattenMode::default())
            .into_iter()
            .filter_map(Node::as_item)
            .map(|item| {
                let group = if item.is_checked() {
                    InitialGroup::Selected
                } else {
                    InitialGroup::Unselected
                };
                (item.def.id.clone(), group)
            })
            .collect();
        Self { initial }
    }

    /// Bucket of `id`.
    #[must_use]
    pub fn group_of(&self, id: &str) -> InitialGroup {
        self.initial
            .get(id)
            .copied()
            .unwrap_or(InitialGroup::Unselected)
    }

    /// Re-partitions `nodes` into selected then unselected rows.
    ///
    /// Order inside each bucket is preserved. A separator row sits between
    /// the buckets when both are non-empty.
    #[must_use]
    pub fn apply<T>(&self, nodes: Vec<Node<T>>) -> Vec<Row<T>> {
        let (selected, unselected): (Vec<_>, Vec<_>) = nodes
            .into_iter()
            .partition(|node| self.group_of(node.id().as_str()) == InitialGroup::Selected);
        let separator = !selected.is_empty() && !unselected.is_empty();
        let mut rows: Vec<Row<T>> = Vec::with_capacity(selected.len() + unselected.len() + 1);
        rows.extend(selected.into_iter().map(Row::node));
        if separator {
            rows.push(Row::Separator {
                id: RowId::new(STICKY_SEPARATOR_ID),
            });
        }
        rows.extend(unselected.into_iter().map(Row::node));
        rows
    }
}
