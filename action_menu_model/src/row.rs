// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat rows handed to the virtualizer.

use std::fmt;

use crate::ids::RowId;
use crate::node::Node;

/// Position of a row within its group, for boundary styling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupEdge {
    /// First of several rows.
    First,
    /// Neither first nor last.
    Middle,
    /// Last of several rows.
    Last,
    /// The group's only row.
    Only,
}

impl GroupEdge {
    /// Edge for `index` in a group of `size` rows.
    #[must_use]
    pub const fn for_index(index: usize, size: usize) -> Self {
        if size <= 1 {
            Self::Only
        } else if index == 0 {
            Self::First
        } else if index + 1 == size {
            Self::Last
        } else {
            Self::Middle
        }
    }
}

/// Group-position metadata carried by a row that came from a group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupPosition {
    /// Id of the enclosing group.
    pub group: RowId,
    /// Edge classification.
    pub edge: GroupEdge,
    /// Index within the group.
    pub index: usize,
    /// Number of rows in the group.
    pub size: usize,
}

/// One row of a flattened surface.
pub enum Row<T> {
    /// A group heading (not interactive).
    Heading {
        /// Id of the group.
        group: RowId,
        /// Heading text.
        text: String,
    },
    /// A visual separator (not interactive).
    Separator {
        /// Stable id of the separator row.
        id: RowId,
    },
    /// An item or submenu trigger.
    Node {
        /// The runtime node.
        node: Node<T>,
        /// Group metadata when the node came from a group.
        group: Option<GroupPosition>,
    },
}

impl<T> Row<T> {
    /// Wraps a node without group metadata.
    pub fn node(node: Node<T>) -> Self {
        Self::Node { node, group: None }
    }

    /// Stable key for this row: the node id, or a derived key for headings.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Heading { group, .. } => format!("heading:{group}"),
            Self::Separator { id } => format!("separator:{id}"),
            Self::Node { node, .. } => node.id().to_string(),
        }
    }

    /// The node, if this row carries one.
    #[must_use]
    pub fn as_node(&self) -> Option<&Node<T>> {
        match self {
            Self::Node { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Id of the row if it can be registered as an interactive row.
    #[must_use]
    pub fn interactive_id(&self) -> Option<&RowId> {
        self.as_node()
            .filter(|node| node.is_interactive())
            .map(Node::id)
    }
}

impl<T> Clone for Row<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Heading { group, text } => Self::Heading {
                group: group.clone(),
                text: text.clone(),
            },
            Self::Separator { id } => Self::Separator { id: id.clone() },
            Self::Node { node, group } => Self::Node {
                node: node.clone(),
                group: group.clone(),
            },
        }
    }
}

impl<T> fmt::Debug for Row<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading { group, text } => f
                .debug_struct("Heading")
                .field("group", group)
                .field("text", text)
                .finish(),
            Self::Separator { id } => f.debug_struct("Separator").field("id", id).finish(),
            Self::Node { node, group } => f
                .debug_struct("Node")
                .field("node", node)
                .field("group", group)
                .finish(),
        }
    }
}
