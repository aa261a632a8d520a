// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported for developer misuse.

use action_menu_model::{LoaderSpec, NodeDef, RowId, SURFACE_SEPARATOR, SubmenuSource, SurfaceId};
use hashbrown::HashSet;
use thiserror::Error;

/// Misuse detected by the engine.
///
/// Loader failures are never reported here; they are data on the surface.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Two nodes on one surface share an id.
    #[error("duplicate id `{id}` on surface `{surface}`")]
    DuplicateId {
        /// Surface holding both nodes.
        surface: SurfaceId,
        /// The repeated id.
        id: RowId,
    },
    /// An id is empty or contains the surface path separator.
    #[error("invalid id `{id}` on surface `{surface}`: ids must be non-empty and must not contain `::`")]
    InvalidId {
        /// Surface holding the node.
        surface: SurfaceId,
        /// The offending id.
        id: RowId,
    },
    /// The surface is not open.
    #[error("surface `{0}` is not open")]
    UnknownSurface(SurfaceId),
}

/// Checks ids on `surface` and every statically known surface below it.
///
/// Groups are transparent: their ids and their children's ids share the
/// surface's namespace. Loader-backed submenus are checked when their static
/// data is known; function loaders are not run.
pub fn validate_defs<T>(defs: &[NodeDef<T>], surface: &SurfaceId) -> Result<(), MenuError> {
    let mut seen = HashSet::new();
    validate_level(defs, surface, &mut seen)
}

fn validate_level<'a, T>(
    defs: &'a [NodeDef<T>],
    surface: &SurfaceId,
    seen: &mut HashSet<&'a str>,
) -> Result<(), MenuError> {
    for def in defs {
        let id = def.id();
        if id.as_str().is_empty() || id.as_str().contains(SURFACE_SEPARATOR) {
            return Err(MenuError::InvalidId {
                surface: surface.clone(),
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(MenuError::DuplicateId {
                surface: surface.clone(),
                id: id.clone(),
            });
        }
        match def {
            NodeDef::Item(_) => {}
            NodeDef::Group(group) => validate_level(&group.children, surface, seen)?,
            NodeDef::Submenu(submenu) => {
                let child = surface.child(&submenu.id);
                match &submenu.source {
                    SubmenuSource::Nodes(nodes) => validate_defs(nodes, &child)?,
                    SubmenuSource::Loader(LoaderSpec::Static(result)) => {
                        validate_defs(result.nodes(), &child)?;
                    }
                    SubmenuSource::Loader(LoaderSpec::Function(_)) => {}
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use action_menu_model::{GroupDef, ItemDef, SubmenuDef};

    use super::*;

    #[test]
    fn group_children_share_the_surface_namespace() {
        let defs: Vec<NodeDef<()>> = vec![
            ItemDef::new("copy").into(),
            GroupDef::new("more")
                .children([ItemDef::new("copy").into()])
                .into(),
        ];
        let error = validate_defs(&defs, &SurfaceId::root()).unwrap_err();
        assert_eq!(
            error,
            MenuError::DuplicateId {
                surface: SurfaceId::root(),
                id: RowId::new("copy"),
            }
        );
    }

    #[test]
    fn nested_surfaces_have_their_own_namespace() {
        let defs: Vec<NodeDef<()>> = vec![
            ItemDef::new("copy").into(),
            SubmenuDef::new("share", [ItemDef::new("copy").into()]).into(),
        ];
        assert!(validate_defs(&defs, &SurfaceId::root()).is_ok());
    }

    #[test]
    fn separators_in_ids_are_rejected() {
        let defs: Vec<NodeDef<()>> = vec![SubmenuDef::new("a", [ItemDef::new("b::c").into()]).into()];
        let error = validate_defs(&defs, &SurfaceId::root()).unwrap_err();
        assert!(matches!(error, MenuError::InvalidId { ref surface, .. } if surface.as_str() == "root::a"));
        assert!(error.to_string().contains("b::c"));
    }
}
