// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row and surface identifiers.

use std::rc::Rc;
use core::borrow::Borrow;
use core::fmt;

/// Separator between path segments of a [`SurfaceId`].
pub const SURFACE_SEPARATOR: &str = "::";

/// Segment used for the root surface of every menu tree.
pub const ROOT_SURFACE: &str = "root";

/// Identifier of an interactive row (an item or a submenu trigger).
///
/// Row ids are author-supplied strings. They are unique among siblings and
/// cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(Rc<str>);

impl RowId {
    /// Creates a row id from a string.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({:?})", &*self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

impl PartialEq<str> for RowId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for RowId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Path-qualified identifier of one popup surface.
///
/// The root surface is `root`; the surface opened by submenu `file` is
/// `root::file`, and so on. A child id is always `{parent}::{submenu}`, so
/// the namespace is deterministic and collision-free as long as sibling row
/// ids are unique.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(Rc<str>);

impl SurfaceId {
    /// The id of the root surface.
    #[must_use]
    pub fn root() -> Self {
        Self(Rc::from(ROOT_SURFACE))
    }

    /// Builds a surface id from a raw path such as `root::file::export`.
    pub fn from_path(path: impl AsRef<str>) -> Self {
        Self(Rc::from(path.as_ref()))
    }

    /// Returns the id of the surface opened by `submenu` on this surface.
    #[must_use]
    pub fn child(&self, submenu: &RowId) -> Self {
        let mut path = String::with_capacity(self.0.len() + SURFACE_SEPARATOR.len() + submenu.as_str().len());
        path.push_str(&self.0);
        path.push_str(SURFACE_SEPARATOR);
        path.push_str(submenu.as_str());
        Self(Rc::from(path))
    }

    /// Returns the parent surface id, or `None` for a root surface.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind(SURFACE_SEPARATOR)
            .map(|at| Self(Rc::from(&self.0[..at])))
    }

    /// Returns the last path segment as a row id (the submenu that opened this surface).
    ///
    /// Returns `None` for a root surface.
    #[must_use]
    pub fn trigger(&self) -> Option<RowId> {
        self.0
            .rfind(SURFACE_SEPARATOR)
            .map(|at| RowId::new(&self.0[at + SURFACE_SEPARATOR.len()..]))
    }

    /// Number of submenu levels below the root (`0` for the root itself).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.matches(SURFACE_SEPARATOR).count()
    }

    /// Submenu ids traversed from the root to reach this surface.
    pub fn submenu_path(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(SURFACE_SEPARATOR).skip(1)
    }

    /// Returns `true` if `self` equals `other` or lies below it.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        self.0.len() > other.0.len()
            && self.0.starts_with(&*other.0)
            && self.0[other.0.len()..].starts_with(SURFACE_SEPARATOR)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({:?})", &*self.0)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SurfaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_parent_are_inverse() {
        let root = SurfaceId::root();
        let file = root.child(&RowId::new("file"));
        let export = file.child(&RowId::new("export"));

        assert_eq!(export.as_str(), "root::file::export");
        assert_eq!(export.parent(), Some(file.clone()));
        assert_eq!(file.parent(), Some(root.clone()));
        assert_eq!(root.parent(), None);
        assert_eq!(export.trigger(), Some(RowId::new("export")));
        assert_eq!(root.trigger(), None);
    }

    #[test]
    fn depth_and_path_follow_segments() {
        let export = SurfaceId::from_path("root::file::export");
        assert_eq!(export.depth(), 2);
        assert_eq!(SurfaceId::root().depth(), 0);
        assert_eq!(
            export.submenu_path().collect::<Vec<_>>(),
            vec!["file", "export"]
        );
    }

    #[test]
    fn is_within_respects_segment_boundaries() {
        let file = SurfaceId::from_path("root::file");
        let files = SurfaceId::from_path("root::files");
        let export = SurfaceId::from_path("root::file::export");

        assert!(export.is_within(&file));
        assert!(file.is_within(&file));
        assert!(!files.is_within(&file));
        assert!(!file.is_within(&export));
    }
}
