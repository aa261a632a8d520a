// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render snapshots of one surface.

use action_menu_model::{GroupPosition, LoadStatus, Node, Row, RowId, SurfaceId};
use action_menu_search::AggregateResult;
use action_menu_virtual_list::VisibleStrip;

use crate::attributes::{InputAttributes, RowAttributes, SurfaceAttributes};

/// One realized row of a [`SurfaceView`].
#[derive(Clone, Debug, PartialEq)]
pub enum RowView {
    /// A group heading.
    Heading {
        /// Position in the flattened sequence.
        index: usize,
        /// Id of the group.
        group: RowId,
        /// Heading text.
        text: String,
    },
    /// A separator.
    Separator {
        /// Position in the flattened sequence.
        index: usize,
        /// Id of the separator.
        id: RowId,
    },
    /// An item or submenu trigger.
    Node {
        /// Position in the flattened sequence.
        index: usize,
        /// Display label.
        label: String,
        /// Icon name, if any.
        icon: Option<String>,
        /// Submenu titles leading to a deep search match.
        breadcrumbs: Vec<String>,
        /// Group metadata.
        group: Option<GroupPosition>,
        /// Accessibility attributes.
        attributes: RowAttributes,
    },
}

impl RowView {
    pub(crate) fn new<T>(
        index: usize,
        row: &Row<T>,
        surface: &SurfaceId,
        list_id: &str,
        active: Option<&RowId>,
        expanded: Option<&RowId>,
    ) -> Self {
        match row {
            Row::Heading { group, text } => Self::Heading {
                index,
                group: group.clone(),
                text: text.clone(),
            },
            Row::Separator { id } => Self::Separator { index, id: id.clone() },
            Row::Node { node, group } => {
                let key = node.row_key(surface);
                let focused = active == Some(&key);
                let expanded = expanded == Some(&key);
                let icon = match node {
                    Node::Item(item) => item.def.icon.clone(),
                    Node::Submenu(submenu) => submenu.def.icon.clone(),
                    Node::Group(_) => None,
                };
                Self::Node {
                    index,
                    label: node.display_label().to_owned(),
                    icon,
                    breadcrumbs: node.search().map(|search| search.breadcrumbs.clone()).unwrap_or_default(),
                    group: group.clone(),
                    attributes: RowAttributes::for_node(node, key, list_id, focused, expanded),
                }
            }
        }
    }

    /// Position in the flattened sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Heading { index, .. } | Self::Separator { index, .. } | Self::Node { index, .. } => *index,
        }
    }

    /// Attributes of an interactive row.
    #[must_use]
    pub fn attributes(&self) -> Option<&RowAttributes> {
        match self {
            Self::Node { attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}

/// Everything a presentation layer needs to draw one surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceView {
    /// Attributes of the content element.
    pub surface: SurfaceAttributes,
    /// Attributes of the search input, when the surface has one.
    pub input: Option<InputAttributes>,
    /// Raw input value.
    pub query: String,
    /// Breadcrumb title of a submenu surface.
    pub title: Option<String>,
    /// The realized index range and its spacer extents.
    pub strip: VisibleStrip,
    /// Total number of flattened rows.
    pub row_count: usize,
    /// Rows inside [`SurfaceView::strip`].
    pub rows: Vec<RowView>,
    /// Flags of the surface's own loader.
    pub status: Option<LoadStatus>,
    /// Combined deep-search loader state.
    pub deep: AggregateResult,
}

impl SurfaceView {
    /// Attributes of every realized interactive row.
    pub fn row_attributes(&self) -> impl Iterator<Item = &RowAttributes> + '_ {
        self.rows.iter().filter_map(RowView::attributes)
    }

    /// Returns `true` if the surface has nothing to show and nothing pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 && !self.status.as_ref().is_some_and(|status| status.is_loading) && !self.deep.is_loading
    }
}
