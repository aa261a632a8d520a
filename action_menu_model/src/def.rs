// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Author-time menu definitions.
//!
//! A definition tree is immutable once handed to the engine. Every node is
//! reference counted, so runtime nodes keep a cheap back-reference to the
//! definition that produced them and author callbacks survive instantiation
//! untouched.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ids::{RowId, SurfaceId};
use crate::loader::LoaderSpec;

/// Kind tag shared by definitions and runtime nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A selectable leaf row.
    Item,
    /// A transparent container with an optional heading.
    Group,
    /// A row that opens a nested surface.
    Submenu,
}

/// How an item reacts to selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemVariant {
    /// Fires its handler and (by default) closes the menu.
    #[default]
    Button,
    /// Toggles a checked state and keeps the menu open.
    Checkbox,
    /// Selects a value in the surrounding radio group.
    Radio,
}

/// Where search results come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Score every candidate locally.
    #[default]
    Client,
    /// Trust loader output as pre-filtered; skip local scoring.
    Server,
    /// Score locally and keep loader output alongside the local matches.
    Hybrid,
}

/// Search configuration for one surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Scoring strategy.
    pub mode: SearchMode,
    /// Delay between the raw input value and the effective query, in milliseconds.
    pub debounce_ms: u64,
    /// Queries shorter than this (in characters) never invoke loaders.
    pub min_length: usize,
}

/// Payload handed to an item's selection handler.
#[derive(Debug)]
pub struct SelectEvent<'a, T> {
    /// The selected item.
    pub item: &'a ItemDef<T>,
    /// The surface the item belongs to.
    pub surface: &'a SurfaceId,
    /// New checked state for checkbox and radio items.
    pub checked: Option<bool>,
}

/// Callback invoked when an item is selected.
pub type SelectHandler<T> = Rc<dyn Fn(&SelectEvent<'_, T>)>;

/// Callback invoked with the new value of a radio group.
pub type ValueChangeHandler = Rc<dyn Fn(&str)>;

/// A selectable leaf row.
pub struct ItemDef<T> {
    /// Unique id among its siblings.
    pub id: RowId,
    /// Display label.
    pub label: Option<String>,
    /// Optional icon name, interpreted by the presentation layer.
    pub icon: Option<String>,
    /// Extra search terms.
    pub keywords: Vec<String>,
    /// Arbitrary payload for the host.
    pub data: Option<T>,
    /// Selection behavior.
    pub variant: ItemVariant,
    /// Checked state for checkbox items.
    pub checked: bool,
    /// Disabled rows render but never become active.
    pub disabled: bool,
    /// Overrides the variant's default close-on-select behavior.
    pub close_on_select: Option<bool>,
    /// Selection handler.
    pub on_select: Option<SelectHandler<T>>,
}

impl<T> ItemDef<T> {
    /// Creates a button item with the given id.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            icon: None,
            keywords: Vec::new(),
            data: None,
            variant: ItemVariant::Button,
            checked: false,
            disabled: false,
            close_on_select: None,
            on_select: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the icon.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Adds search keywords.
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Attaches a host payload.
    #[must_use]
    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Turns this into a checkbox item.
    #[must_use]
    pub fn checkbox(mut self, checked: bool) -> Self {
        self.variant = ItemVariant::Checkbox;
        self.checked = checked;
        self
    }

    /// Turns this into a radio item.
    #[must_use]
    pub fn radio(mut self) -> Self {
        self.variant = ItemVariant::Radio;
        self
    }

    /// Marks the item disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Overrides whether selecting this item closes the menu.
    #[must_use]
    pub fn close_on_select(mut self, close: bool) -> Self {
        self.close_on_select = Some(close);
        self
    }

    /// Sets the selection handler.
    #[must_use]
    pub fn on_select(mut self, handler: impl Fn(&SelectEvent<'_, T>) + 'static) -> Self {
        self.on_select = Some(Rc::new(handler));
        self
    }

    /// Whether selecting this item should close the menu tree.
    #[must_use]
    pub fn closes_on_select(&self) -> bool {
        self.close_on_select
            .unwrap_or(matches!(self.variant, ItemVariant::Button))
    }

    /// Label if present, otherwise the id.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }
}

impl<T: fmt::Debug> fmt::Debug for ItemDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDef")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("keywords", &self.keywords)
            .field("data", &self.data)
            .field("variant", &self.variant)
            .field("checked", &self.checked)
            .field("disabled", &self.disabled)
            .field("close_on_select", &self.close_on_select)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

/// Single-value selection shared by the radio items of a group.
#[derive(Clone, Default)]
pub struct RadioGroup {
    /// Currently selected item id.
    pub value: Option<String>,
    /// Called with the id of a newly selected radio item.
    pub on_value_change: Option<ValueChangeHandler>,
}

impl fmt::Debug for RadioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioGroup")
            .field("value", &self.value)
            .field("on_value_change", &self.on_value_change.is_some())
            .finish()
    }
}

/// A transparent container of items and submenus.
pub struct GroupDef<T> {
    /// Unique id among its siblings.
    pub id: RowId,
    /// Optional heading row rendered before the children.
    pub heading: Option<String>,
    /// Ordered children.
    pub children: Vec<NodeDef<T>>,
    /// Present when the group is a radio group.
    pub radio: Option<RadioGroup>,
}

impl<T> GroupDef<T> {
    /// Creates an empty group.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            heading: None,
            children: Vec::new(),
            radio: None,
        }
    }

    /// Sets the heading.
    #[must_use]
    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Appends children.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = NodeDef<T>>,
    {
        self.children.extend(children);
        self
    }

    /// Turns the group into a radio group.
    #[must_use]
    pub fn radio(mut self, radio: RadioGroup) -> Self {
        self.radio = Some(radio);
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for GroupDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupDef")
            .field("id", &self.id)
            .field("heading", &self.heading)
            .field("children", &self.children)
            .field("radio", &self.radio)
            .finish()
    }
}

/// Content of a submenu.
pub enum SubmenuSource<T> {
    /// A static nested node list.
    Nodes(Vec<NodeDef<T>>),
    /// A (possibly asynchronous) loader.
    Loader(LoaderSpec<T>),
}

impl<T> Clone for SubmenuSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Nodes(nodes) => Self::Nodes(nodes.clone()),
            Self::Loader(loader) => Self::Loader(loader.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SubmenuSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nodes(nodes) => f.debug_tuple("Nodes").field(nodes).finish(),
            Self::Loader(loader) => f.debug_tuple("Loader").field(loader).finish(),
        }
    }
}

/// A row that opens a nested surface.
pub struct SubmenuDef<T> {
    /// Unique id among its siblings; also the last segment of the child surface id.
    pub id: RowId,
    /// Trigger label.
    pub label: Option<String>,
    /// Title used for breadcrumbs.
    pub title: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Extra search terms for the trigger row.
    pub keywords: Vec<String>,
    /// Nested content.
    pub source: SubmenuSource<T>,
    /// Whether descendants are reachable from ancestor search.
    pub deep_search: bool,
    /// Search configuration of the child surface.
    pub search: Option<SearchConfig>,
    /// Disabled triggers render but never become active.
    pub disabled: bool,
}

impl<T> SubmenuDef<T> {
    /// Creates a submenu over a static node list.
    pub fn new<I>(id: impl Into<RowId>, nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeDef<T>>,
    {
        Self::with_source(id, SubmenuSource::Nodes(nodes.into_iter().collect()))
    }

    /// Creates a submenu whose content comes from a loader.
    pub fn with_loader(id: impl Into<RowId>, loader: LoaderSpec<T>) -> Self {
        Self::with_source(id, SubmenuSource::Loader(loader))
    }

    fn with_source(id: impl Into<RowId>, source: SubmenuSource<T>) -> Self {
        Self {
            id: id.into(),
            label: None,
            title: None,
            icon: None,
            keywords: Vec::new(),
            source,
            deep_search: true,
            search: None,
            disabled: false,
        }
    }

    /// Sets the trigger label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the breadcrumb title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds search keywords.
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Controls whether ancestor search descends into this submenu.
    #[must_use]
    pub fn deep_search(mut self, enabled: bool) -> Self {
        self.deep_search = enabled;
        self
    }

    /// Sets the child surface's search configuration.
    #[must_use]
    pub fn search(mut self, config: SearchConfig) -> Self {
        self.search = Some(config);
        self
    }

    /// Marks the trigger disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Breadcrumb text: the title, falling back to the id.
    #[must_use]
    pub fn breadcrumb(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }

    /// Label if present, otherwise the title or id.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.breadcrumb())
    }

    /// The loader, if the content is loader-backed.
    #[must_use]
    pub fn loader(&self) -> Option<&LoaderSpec<T>> {
        match &self.source {
            SubmenuSource::Loader(loader) => Some(loader),
            SubmenuSource::Nodes(_) => None,
        }
    }
}

impl<T> Clone for SubmenuDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            keywords: self.keywords.clone(),
            source: self.source.clone(),
            deep_search: self.deep_search,
            search: self.search,
            disabled: self.disabled,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SubmenuDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmenuDef")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("keywords", &self.keywords)
            .field("source", &self.source)
            .field("deep_search", &self.deep_search)
            .field("search", &self.search)
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// One node of an author-time definition tree.
pub enum NodeDef<T> {
    /// A selectable leaf.
    Item(Rc<ItemDef<T>>),
    /// A transparent container.
    Group(Rc<GroupDef<T>>),
    /// A nested surface.
    Submenu(Rc<SubmenuDef<T>>),
}

impl<T> NodeDef<T> {
    /// Wraps an item definition.
    pub fn item(def: ItemDef<T>) -> Self {
        Self::Item(Rc::new(def))
    }

    /// Wraps a group definition.
    pub fn group(def: GroupDef<T>) -> Self {
        Self::Group(Rc::new(def))
    }

    /// Wraps a submenu definition.
    pub fn submenu(def: SubmenuDef<T>) -> Self {
        Self::Submenu(Rc::new(def))
    }

    /// The node's id.
    #[must_use]
    pub fn id(&self) -> &RowId {
        match self {
            Self::Item(def) => &def.id,
            Self::Group(def) => &def.id,
            Self::Submenu(def) => &def.id,
        }
    }

    /// The node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Item(_) => NodeKind::Item,
            Self::Group(_) => NodeKind::Group,
            Self::Submenu(_) => NodeKind::Submenu,
        }
    }
}

impl<T> Clone for NodeDef<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Item(def) => Self::Item(Rc::clone(def)),
            Self::Group(def) => Self::Group(Rc::clone(def)),
            Self::Submenu(def) => Self::Submenu(Rc::clone(def)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(def) => def.fmt(f),
            Self::Group(def) => def.fmt(f),
            Self::Submenu(def) => def.fmt(f),
        }
    }
}

impl<T> From<ItemDef<T>> for NodeDef<T> {
    fn from(def: ItemDef<T>) -> Self {
        Self::item(def)
    }
}

impl<T> From<GroupDef<T>> for NodeDef<T> {
    fn from(def: GroupDef<T>) -> Self {
        Self::group(def)
    }
}

impl<T> From<SubmenuDef<T>> for NodeDef<T> {
    fn from(def: SubmenuDef<T>) -> Self {
        Self::submenu(def)
    }
}
