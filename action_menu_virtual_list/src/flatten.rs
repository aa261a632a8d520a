// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a surface's node tree into the flat row sequence it renders.

use action_menu_model::{GroupEdge, GroupNode, GroupPosition, Menu, Node, Row};

/// Flattens one surface for browsing (no query).
///
/// Items and submenu triggers pass through. A group becomes its heading row
/// (when it has one) followed by its children, each tagged with its
/// [`GroupPosition`]. Submenus are never descended into. Groups nested in
/// groups are flattened the same way, and their rows carry the innermost
/// group's position.
#[must_use]
pub fn flatten_rows<T>(menu: &Menu<T>) -> Vec<Row<T>> {
    let mut rows = Vec::with_capacity(menu.nodes.len());
    for node in &menu.nodes {
        push_node(node, None, &mut rows);
    }
    rows
}

/// Rows for an active query: one row per search result, in result order.
///
/// The results already carry their search context; groups never appear in
/// search results and are dropped if present.
#[must_use]
pub fn search_rows<T>(results: Vec<Node<T>>) -> Vec<Row<T>> {
    results
        .into_iter()
        .filter(|node| !matches!(node, Node::Group(_)))
        .map(Row::node)
        .collect()
}

fn push_node<T>(node: &Node<T>, group: Option<GroupPosition>, rows: &mut Vec<Row<T>>) {
    match node {
        Node::Group(inner) => push_group(inner, rows),
        _ => rows.push(Row::Node {
            node: node.clone(),
            group,
        }),
    }
}

fn push_group<T>(group: &GroupNode<T>, rows: &mut Vec<Row<T>>) {
    if let Some(text) = &group.def.heading {
        rows.push(Row::Heading {
            group: group.def.id.clone(),
            text: text.clone(),
        });
    }
    let size = group
        .children
        .iter()
        .filter(|child| !matches!(child, Node::Group(_)))
        .count();
    let mut index = 0;
    for child in &group.children {
        let position = if matches!(child, Node::Group(_)) {
            None
        } else {
            let position = GroupPosition {
                group: group.def.id.clone(),
                edge: GroupEdge::for_index(index, size),
                index,
                size,
            };
            index += 1;
            Some(position)
        };
        push_node(child, position, rows);
    }
}
