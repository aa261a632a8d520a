// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime menu trees.
//!
//! A [`Menu`] is instantiated from a definition tree for one surface. Every
//! runtime node keeps a back-reference to its definition and to the surface
//! that owns it; submenu nodes carry their fully instantiated child menu.
//! Runtime trees are immutable snapshots: a new tree is built whenever the
//! definitions, the query, or a loader result change.

use std::fmt;
use std::rc::Rc;

use crate::def::{GroupDef, ItemDef, ItemVariant, NodeDef, NodeKind, SubmenuDef, SubmenuSource};
use crate::ids::{RowId, SURFACE_SEPARATOR, SurfaceId};
use crate::loader::{LoadStatus, LoaderResult, LoaderSpec};

/// Context attached to a node that is a live search result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchContext {
    /// Query that produced the match.
    pub query: String,
    /// Match score in `[0, 1]`.
    pub score: f64,
    /// `true` if the match lives below the searched surface.
    pub is_deep: bool,
    /// Titles of the submenus traversed to reach the match.
    pub breadcrumbs: Vec<String>,
    /// Ids of the submenus traversed to reach the match.
    pub breadcrumb_ids: Vec<RowId>,
}

/// Runtime item.
pub struct ItemNode<T> {
    /// Definition.
    pub def: Rc<ItemDef<T>>,
    /// Owning surface.
    pub parent: SurfaceId,
    /// Enclosing radio group, if any.
    pub radio_group: Option<Rc<GroupDef<T>>>,
    /// Present when this node is a search result.
    pub search: Option<SearchContext>,
}

impl<T> ItemNode<T> {
    /// Checked state, resolving radio items against their group value.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        match self.def.variant {
            ItemVariant::Button => false,
            ItemVariant::Checkbox => self.def.checked,
            ItemVariant::Radio => self
                .radio_group
                .as_ref()
                .and_then(|group| group.radio.as_ref())
                .and_then(|radio| radio.value.as_deref())
                .map_or(self.def.checked, |value| value == self.def.id.as_str()),
        }
    }
}

impl<T> Clone for ItemNode<T> {
    fn clone(&self) -> Self {
        Self {
            def: Rc::clone(&self.def),
            parent: self.parent.clone(),
            radio_group: self.radio_group.clone(),
            search: self.search.clone(),
        }
    }
}

/// Runtime group.
pub struct GroupNode<T> {
    /// Definition.
    pub def: Rc<GroupDef<T>>,
    /// Owning surface.
    pub parent: SurfaceId,
    /// Instantiated children.
    pub children: Vec<Node<T>>,
}

impl<T> Clone for GroupNode<T> {
    fn clone(&self) -> Self {
        Self {
            def: Rc::clone(&self.def),
            parent: self.parent.clone(),
            children: self.children.clone(),
        }
    }
}

/// Runtime submenu trigger plus its child menu.
pub struct SubmenuNode<T> {
    /// Definition.
    pub def: Rc<SubmenuDef<T>>,
    /// Owning surface.
    pub parent: SurfaceId,
    /// The nested menu, instantiated for surface `{parent}::{id}`.
    pub child: Rc<Menu<T>>,
    /// Present when this node is a search result.
    pub search: Option<SearchContext>,
}

impl<T> Clone for SubmenuNode<T> {
    fn clone(&self) -> Self {
        Self {
            def: Rc::clone(&self.def),
            parent: self.parent.clone(),
            child: Rc::clone(&self.child),
            search: self.search.clone(),
        }
    }
}

/// One runtime node.
pub enum Node<T> {
    /// A selectable leaf.
    Item(ItemNode<T>),
    /// A transparent container.
    Group(GroupNode<T>),
    /// A nested surface trigger.
    Submenu(SubmenuNode<T>),
}

impl<T> Node<T> {
    /// Node id.
    #[must_use]
    pub fn id(&self) -> &RowId {
        match self {
            Self::Item(node) => &node.def.id,
            Self::Group(node) => &node.def.id,
            Self::Submenu(node) => &node.def.id,
        }
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Item(_) => NodeKind::Item,
            Self::Group(_) => NodeKind::Group,
            Self::Submenu(_) => NodeKind::Submenu,
        }
    }

    /// Owning surface.
    #[must_use]
    pub fn parent(&self) -> &SurfaceId {
        match self {
            Self::Item(node) => &node.parent,
            Self::Group(node) => &node.parent,
            Self::Submenu(node) => &node.parent,
        }
    }

    /// Key of the node's row when listed on `surface`.
    ///
    /// Nodes of `surface` itself use their id. Nodes reached through deep
    /// search are qualified with the submenu path below `surface`, so
    /// `copy` inside `share` becomes `share::copy` and cannot collide with a
    /// `copy` on `surface`.
    #[must_use]
    pub fn row_key(&self, surface: &SurfaceId) -> RowId {
        let parent = self.parent();
        if parent == surface || !parent.is_within(surface) {
            return self.id().clone();
        }
        let relative = &parent.as_str()[surface.as_str().len() + SURFACE_SEPARATOR.len()..];
        RowId::new(format!("{relative}{SURFACE_SEPARATOR}{}", self.id()))
    }

    /// Whether the node can become active. Groups never can.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        match self {
            Self::Item(node) => !node.def.disabled,
            Self::Submenu(node) => !node.def.disabled,
            Self::Group(_) => false,
        }
    }

    /// Search context, when the node is a search result.
    #[must_use]
    pub fn search(&self) -> Option<&SearchContext> {
        match self {
            Self::Item(node) => node.search.as_ref(),
            Self::Submenu(node) => node.search.as_ref(),
            Self::Group(_) => None,
        }
    }

    /// Returns a copy of this node carrying the given search context.
    #[must_use]
    pub fn with_search(&self, context: SearchContext) -> Self {
        match self {
            Self::Item(node) => Self::Item(ItemNode {
                search: Some(context),
                ..node.clone()
            }),
            Self::Submenu(node) => Self::Submenu(SubmenuNode {
                search: Some(context),
                ..node.clone()
            }),
            Self::Group(node) => Self::Group(node.clone()),
        }
    }

    /// Label used for display.
    #[must_use]
    pub fn display_label(&self) -> &str {
        match self {
            Self::Item(node) => node.def.display_label(),
            Self::Submenu(node) => node.def.display_label(),
            Self::Group(node) => node.def.heading.as_deref().unwrap_or(node.def.id.as_str()),
        }
    }

    /// Search keywords of an item or submenu trigger.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        match self {
            Self::Item(node) => &node.def.keywords,
            Self::Submenu(node) => &node.def.keywords,
            Self::Group(_) => &[],
        }
    }

    /// Returns the item, if this is one.
    #[must_use]
    pub fn as_item(&self) -> Option<&ItemNode<T>> {
        match self {
            Self::Item(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the submenu, if this is one.
    #[must_use]
    pub fn as_submenu(&self) -> Option<&SubmenuNode<T>> {
        match self {
            Self::Submenu(node) => Some(node),
            _ => None,
        }
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Item(node) => Self::Item(node.clone()),
            Self::Group(node) => Self::Group(node.clone()),
            Self::Submenu(node) => Self::Submenu(node.clone()),
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("id", self.id())
            .field("parent", self.parent())
            .field("search", &self.search())
            .finish()
    }
}

/// Depth selection for [`Menu::flatten`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlattenMode {
    /// Descend into submenus.
    pub deep: bool,
}

/// Resolves the current result of a loader-backed submenu.
///
/// Static loaders are resolved without consulting the resolver.
pub trait LoaderResolver<T> {
    /// Current result for the submenu that owns `surface`, if one exists.
    fn resolve(&self, surface: &SurfaceId, loader: &LoaderSpec<T>) -> Option<LoaderResult<T>>;
}

/// A resolver that knows no results; only static loaders resolve.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoLoaders;

impl<T> LoaderResolver<T> for NoLoaders {
    fn resolve(&self, _: &SurfaceId, _: &LoaderSpec<T>) -> Option<LoaderResult<T>> {
        None
    }
}

impl<T, F> LoaderResolver<T> for F
where
    F: Fn(&SurfaceId, &LoaderSpec<T>) -> Option<LoaderResult<T>>,
{
    fn resolve(&self, surface: &SurfaceId, loader: &LoaderSpec<T>) -> Option<LoaderResult<T>> {
        self(surface, loader)
    }
}

/// A runtime menu for one surface.
pub struct Menu<T> {
    /// Path-qualified surface id.
    pub surface: SurfaceId,
    /// Submenu depth (`0` for the root).
    pub depth: usize,
    /// Title of the submenu that opened this surface.
    pub title: Option<String>,
    /// Instantiated nodes in authored order.
    pub nodes: Vec<Node<T>>,
    /// Loader flags when the content is loader-backed.
    pub status: Option<LoadStatus>,
}

impl<T> Menu<T> {
    /// Instantiates a root menu from static definitions.
    pub fn instantiate(defs: &[NodeDef<T>]) -> Self {
        Self::instantiate_at(defs, SurfaceId::root(), &NoLoaders)
    }

    /// Instantiates a menu for `surface`, resolving loader-backed submenus through `loaders`.
    pub fn instantiate_at(defs: &[NodeDef<T>], surface: SurfaceId, loaders: &dyn LoaderResolver<T>) -> Self {
        let depth = surface.depth();
        let nodes = instantiate_nodes(defs, &surface, None, loaders);
        Self {
            surface,
            depth,
            title: None,
            nodes,
            status: None,
        }
    }

    /// Ordered nodes of this menu; see [`FlattenMode`].
    ///
    /// Groups are transparent: a group and its children all appear at the
    /// group's level. With `deep`, every submenu's child menu follows its trigger.
    #[must_use]
    pub fn flatten(&self, mode: FlattenMode) -> Vec<&Node<T>> {
        let mut out = Vec::new();
        flatten_into(&self.nodes, mode, &mut out);
        out
    }

    /// Finds the menu for a descendant surface.
    #[must_use]
    pub fn find_surface(&self, surface: &SurfaceId) -> Option<&Self> {
        if *surface == self.surface {
            return Some(self);
        }
        if !surface.is_within(&self.surface) {
            return None;
        }
        self.flatten(FlattenMode { deep: false })
            .into_iter()
            .filter_map(Node::as_submenu)
            .find_map(|submenu| submenu.child.find_surface(surface))
    }

    /// Finds a node on this surface (groups searched transparently).
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&Node<T>> {
        self.flatten(FlattenMode { deep: false })
            .into_iter()
            .find(|node| node.id().as_str() == id)
    }

    /// Returns `true` if there are no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<T> fmt::Debug for Menu<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("surface", &self.surface)
            .field("depth", &self.depth)
            .field("title", &self.title)
            .field("nodes", &self.nodes)
            .field("status", &self.status)
            .finish()
    }
}

fn instantiate_nodes<T>(
    defs: &[NodeDef<T>],
    surface: &SurfaceId,
    radio_group: Option<&Rc<GroupDef<T>>>,
    loaders: &dyn LoaderResolver<T>,
) -> Vec<Node<T>> {
    defs.iter()
        .map(|def| match def {
            NodeDef::Item(item) => Node::Item(ItemNode {
                def: Rc::clone(item),
                parent: surface.clone(),
                radio_group: radio_group.cloned(),
                search: None,
            }),
            NodeDef::Group(group) => {
                let radio = group.radio.is_some().then_some(group).or(radio_group);
                Node::Group(GroupNode {
                    def: Rc::clone(group),
                    parent: surface.clone(),
                    children: instantiate_nodes(&group.children, surface, radio, loaders),
                })
            }
            NodeDef::Submenu(submenu) => Node::Submenu(instantiate_submenu(submenu, surface, loaders)),
        })
        .collect()
}

fn instantiate_submenu<T>(
    def: &Rc<SubmenuDef<T>>,
    parent: &SurfaceId,
    loaders: &dyn LoaderResolver<T>,
) -> SubmenuNode<T> {
    let surface = parent.child(&def.id);
    let (nodes, status) = match &def.source {
        SubmenuSource::Nodes(nodes) => (instantiate_nodes(nodes, &surface, None, loaders), None),
        SubmenuSource::Loader(LoaderSpec::Static(result)) => (
            instantiate_nodes(result.nodes(), &surface, None, loaders),
            Some(result.status()),
        ),
        SubmenuSource::Loader(loader) => match loaders.resolve(&surface, loader) {
            Some(result) => (
                instantiate_nodes(result.nodes(), &surface, None, loaders),
                Some(result.status()),
            ),
            None => (Vec::new(), None),
        },
    };
    SubmenuNode {
        def: Rc::clone(def),
        parent: parent.clone(),
        child: Rc::new(Menu {
            depth: surface.depth(),
            surface,
            title: Some(def.breadcrumb().to_owned()),
            nodes,
            status,
        }),
        search: None,
    }
}

fn flatten_into<'a, T>(nodes: &'a [Node<T>], mode: FlattenMode, out: &mut Vec<&'a Node<T>>) {
    for node in nodes {
        out.push(node);
        match node {
            Node::Group(group) => flatten_into(&group.children, mode, out),
            Node::Submenu(submenu) if mode.deep => flatten_into(&submenu.child.nodes, mode, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{GroupDef, RadioGroup};
    use crate::loader::LoaderResult;

    fn file_menu() -> Vec<NodeDef<()>> {
        vec![
            ItemDef::new("new").into(),
            GroupDef::new("recent")
                .heading("Recent")
                .children([ItemDef::new("a.txt").into(), ItemDef::new("b.txt").into()])
                .into(),
            SubmenuDef::new(
                "export",
                [
                    ItemDef::new("pdf").into(),
                    SubmenuDef::new("image", [ItemDef::new("png").into()]).into(),
                ],
            )
            .into(),
        ]
    }

    #[test]
    fn submenu_child_surface_is_path_qualified() {
        let menu = Menu::instantiate(&file_menu());
        let export = menu.find_node("export").and_then(Node::as_submenu).unwrap();
        assert_eq!(export.child.surface.as_str(), "root::export");
        assert_eq!(export.child.depth, 1);

        let image = export.child.find_node("image").and_then(Node::as_submenu).unwrap();
        assert_eq!(image.child.surface.as_str(), "root::export::image");
        assert_eq!(image.child.nodes[0].parent().as_str(), "root::export::image");
    }

    #[test]
    fn row_keys_qualify_nodes_of_nested_surfaces() {
        let menu = Menu::instantiate(&file_menu());
        let root = SurfaceId::root();
        let new = menu.find_node("new").unwrap();
        assert_eq!(new.row_key(&root).as_str(), "new");

        let export = menu.find_node("export").and_then(Node::as_submenu).unwrap();
        let image = export.child.find_node("image").and_then(Node::as_submenu).unwrap();
        let png = &image.child.nodes[0];
        assert_eq!(png.row_key(&root).as_str(), "export::image::png");
        assert_eq!(png.row_key(&export.child.surface).as_str(), "image::png");
        assert_eq!(png.row_key(&image.child.surface).as_str(), "png");
    }

    #[test]
    fn flatten_shallow_excludes_submenu_descendants() {
        let menu = Menu::instantiate(&file_menu());
        let ids: Vec<_> = menu
            .flatten(FlattenMode { deep: false })
            .iter()
            .map(|n| n.id().to_string())
            .collect();
        assert_eq!(ids, vec!["new", "recent", "a.txt", "b.txt", "export"]);
    }

    #[test]
    fn flatten_deep_includes_every_node() {
        let menu = Menu::instantiate(&file_menu());
        let ids: Vec<_> = menu
            .flatten(FlattenMode { deep: true })
            .iter()
            .map(|n| n.id().to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["new", "recent", "a.txt", "b.txt", "export", "pdf", "image", "png"]
        );
    }

    #[test]
    fn find_surface_walks_nested_menus() {
        let menu = Menu::instantiate(&file_menu());
        let image = menu
            .find_surface(&SurfaceId::from_path("root::export::image"))
            .unwrap();
        assert_eq!(image.nodes.len(), 1);
        assert!(menu.find_surface(&SurfaceId::from_path("root::nope")).is_none());
    }

    #[test]
    fn radio_items_resolve_against_group_value() {
        let defs: Vec<NodeDef<()>> = vec![
            GroupDef::new("size")
                .radio(RadioGroup {
                    value: Some("m".into()),
                    on_value_change: None,
                })
                .children([ItemDef::new("s").radio().into(), ItemDef::new("m").radio().into()])
                .into(),
        ];
        let menu = Menu::instantiate(&defs);
        let checked: Vec<_> = menu
            .flatten(FlattenMode::default())
            .into_iter()
            .filter_map(Node::as_item)
            .map(ItemNode::is_checked)
            .collect();
        assert_eq!(checked, vec![false, true]);
    }

    #[test]
    fn loader_submenus_resolve_through_resolver() {
        let defs: Vec<NodeDef<()>> = vec![
            SubmenuDef::with_loader(
                "remote",
                LoaderSpec::from_fn(|_| LoaderResult::ready(Vec::new())),
            )
            .into(),
            SubmenuDef::with_loader(
                "fixed",
                LoaderSpec::Static(LoaderResult::ready(vec![ItemDef::new("x").into()])),
            )
            .into(),
        ];

        let unresolved = Menu::instantiate(&defs);
        let remote = unresolved.find_node("remote").and_then(Node::as_submenu).unwrap();
        assert!(remote.child.is_empty());
        assert!(remote.child.status.is_none());
        let fixed = unresolved.find_node("fixed").and_then(Node::as_submenu).unwrap();
        assert_eq!(fixed.child.nodes.len(), 1);

        let resolver = |surface: &SurfaceId, _: &LoaderSpec<()>| {
            (surface.as_str() == "root::remote")
                .then(|| LoaderResult::ready(vec![ItemDef::new("y").into(), ItemDef::new("z").into()]))
        };
        let resolved = Menu::instantiate_at(&defs, SurfaceId::root(), &resolver);
        let remote = resolved.find_node("remote").and_then(Node::as_submenu).unwrap();
        assert_eq!(remote.child.nodes.len(), 2);
        assert_eq!(remote.child.status, Some(LoadStatus::default()));
    }
}
