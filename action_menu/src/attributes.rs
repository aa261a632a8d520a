// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility and automation attributes.
//!
//! The attribute names and values here are a stable contract for styling and
//! end-to-end tests. Each type lists itself as `(name, value)` pairs through
//! `pairs()`, so hosts can copy them onto elements verbatim.

use action_menu_focus::SurfaceStateTag;
use action_menu_model::{ItemVariant, Node, RowId, SurfaceId};

/// Element id of a row, unique within the tree.
#[must_use]
pub fn row_element_id(list_id: &str, row: &RowId) -> String {
    format!("{list_id}::{row}")
}

/// Role of a row element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RowRole {
    /// `option`
    Option,
    /// `menuitemcheckbox`
    MenuItemCheckbox,
}

impl RowRole {
    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::MenuItemCheckbox => "menuitemcheckbox",
        }
    }
}

/// Attributes of an item or submenu trigger row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowAttributes {
    /// `id`
    pub element_id: String,
    /// `role`
    pub role: RowRole,
    /// `data-action-menu-item-id`
    pub item_id: RowId,
    /// Registry key of the row, as passed to selection and pointer calls.
    ///
    /// Equal to `item_id` except for deep search results from nested
    /// surfaces, which are qualified with their submenu path.
    pub key: RowId,
    /// `aria-selected` and `data-focused`: the row is active.
    pub focused: bool,
    /// `aria-checked`, for checkbox and radio items.
    pub checked: Option<bool>,
    /// `aria-expanded`, for submenu triggers.
    pub expanded: Option<bool>,
    /// `aria-disabled`
    pub disabled: bool,
}

impl RowAttributes {
    pub(crate) fn for_node<T>(node: &Node<T>, key: RowId, list_id: &str, focused: bool, expanded: bool) -> Self {
        let (role, checked) = match node.as_item() {
            Some(item) => match item.def.variant {
                ItemVariant::Button => (RowRole::Option, None),
                ItemVariant::Checkbox => (RowRole::MenuItemCheckbox, Some(item.is_checked())),
                ItemVariant::Radio => (RowRole::Option, Some(item.is_checked())),
            },
            None => (RowRole::Option, None),
        };
        Self {
            element_id: row_element_id(list_id, &key),
            role,
            item_id: node.id().clone(),
            key,
            focused,
            checked,
            expanded: node.as_submenu().map(|_| expanded),
            disabled: !node.is_interactive(),
        }
    }

    /// Attributes as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("id", self.element_id.clone()),
            ("role", self.role.as_str().to_owned()),
            ("data-action-menu-item-id", self.item_id.to_string()),
            ("aria-selected", self.focused.to_string()),
        ];
        if self.focused {
            pairs.push(("data-focused", String::new()));
        }
        if let Some(checked) = self.checked {
            pairs.push(("aria-checked", checked.to_string()));
        }
        if let Some(expanded) = self.expanded {
            pairs.push(("aria-haspopup", "menu".to_owned()));
            pairs.push(("aria-expanded", expanded.to_string()));
        }
        if self.disabled {
            pairs.push(("aria-disabled", "true".to_owned()));
        }
        pairs
    }
}

/// Attributes of a surface's content element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceAttributes {
    /// `data-surface-id`
    pub surface_id: SurfaceId,
    /// `data-state`
    pub state: SurfaceStateTag,
}

impl SurfaceAttributes {
    /// Attributes as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", "menu".to_owned()),
            ("data-state", self.state.as_str().to_owned()),
            ("data-surface-id", self.surface_id.to_string()),
        ]
    }
}

/// Attributes of a surface's search input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputAttributes {
    /// `aria-controls`: the list element id.
    pub controls: String,
    /// `aria-activedescendant`: element id of the active row.
    pub active_descendant: Option<String>,
}

impl InputAttributes {
    /// Attributes as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("role", "combobox".to_owned()),
            ("aria-autocomplete", "list".to_owned()),
            ("aria-expanded", "true".to_owned()),
            ("aria-controls", self.controls.clone()),
        ];
        if let Some(active) = &self.active_descendant {
            pairs.push(("aria-activedescendant", active.clone()));
        }
        pairs
    }
}

/// Attributes of the button that opens the root surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerAttributes {
    /// `aria-expanded`
    pub expanded: bool,
    /// `data-state`
    pub state: SurfaceStateTag,
}

impl TriggerAttributes {
    /// Attributes as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("aria-haspopup", "menu".to_owned()),
            ("aria-expanded", self.expanded.to_string()),
            ("data-state", self.state.as_str().to_owned()),
        ]
    }
}
