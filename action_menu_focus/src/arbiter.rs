// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus ownership.

use action_menu_model::SurfaceId;

use crate::tree::SurfaceTree;

/// Default number of frames a focus request waits for its surface to mount.
pub const DEFAULT_FOCUS_RETRY_FRAMES: u32 = 10;

/// Why ownership moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OwnershipReason {
    /// The root surface opened.
    RootOpened,
    /// A submenu opened and takes input.
    SubmenuOpened,
    /// A submenu closed through the keyboard; its parent takes input back.
    SubmenuClosed,
    /// The pointer moved inside a surface.
    PointerEntered,
}

/// Element of a surface that should receive real input focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The search input.
    Input,
    /// The list element.
    List,
}

/// A focus request that became deliverable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusGrant {
    /// Surface to focus.
    pub surface: SurfaceId,
    /// Element to focus.
    pub target: FocusTarget,
}

#[derive(Clone, Debug)]
struct PendingFocus {
    surface: SurfaceId,
    frames_left: u32,
}

/// Single source of truth for which surface owns keyboard input.
///
/// One arbiter exists per mounted menu tree and is handed to every handler
/// that needs it. Keyboard routing consults [`FocusArbiter::owns`] before
/// acting, so two nested surfaces never react to the same key.
///
/// Focusing a freshly opened surface usually has to wait until its content
/// exists. [`FocusArbiter::request_focus`] records the wish and
/// [`FocusArbiter::on_frame`] retries it once per animation frame until the
/// surface is mounted or the retry budget runs out.
#[derive(Clone, Debug)]
pub struct FocusArbiter {
    owner: Option<SurfaceId>,
    pending: Option<PendingFocus>,
    retry_frames: u32,
}

impl Default for FocusArbiter {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_RETRY_FRAMES)
    }
}

impl FocusArbiter {
    /// Creates an arbiter whose focus requests wait at most `retry_frames` frames.
    #[must_use]
    pub fn new(retry_frames: u32) -> Self {
        Self {
            owner: None,
            pending: None,
            retry_frames,
        }
    }

    /// Surface that currently owns input.
    #[must_use]
    pub fn owner(&self) -> Option<&SurfaceId> {
        self.owner.as_ref()
    }

    /// Returns `true` if `surface` owns input.
    #[must_use]
    pub fn owns(&self, surface: &SurfaceId) -> bool {
        self.owner.as_ref() == Some(surface)
    }

    /// Gives ownership to `surface`. Returns `true` if the owner changed.
    pub fn claim(&mut self, surface: &SurfaceId, reason: OwnershipReason) -> bool {
        if self.owns(surface) {
            return false;
        }
        tracing::debug!(from = ?self.owner, to = %surface, ?reason, "focus owner changed");
        self.owner = Some(surface.clone());
        true
    }

    /// Returns ownership from `surface` to its parent.
    ///
    /// Does nothing unless `surface` (or a descendant) owns input.
    pub fn release_to_parent(&mut self, surface: &SurfaceId) -> Option<SurfaceId> {
        let owner = self.owner.as_ref()?;
        if !owner.is_within(surface) {
            return None;
        }
        let parent = surface.parent()?;
        self.claim(&parent, OwnershipReason::SubmenuClosed);
        Some(parent)
    }

    /// Claims ownership for the surface under the pointer, if any.
    pub fn claim_for_pointer(&mut self, tree: &SurfaceTree, point: kurbo::Point) -> bool {
        match tree.surface_at(point) {
            Some(surface) => self.claim(&surface, OwnershipReason::PointerEntered),
            None => false,
        }
    }

    /// Asks for real focus to move into `surface` once it is mounted.
    pub fn request_focus(&mut self, surface: &SurfaceId) {
        self.pending = Some(PendingFocus {
            surface: surface.clone(),
            frames_left: self.retry_frames,
        });
    }

    /// Returns `true` while a focus request is waiting.
    #[must_use]
    pub fn has_pending_focus(&self) -> bool {
        self.pending.is_some()
    }

    /// Advances one animation frame.
    ///
    /// Returns the grant once the requested surface is mounted: the search
    /// input when the surface has one, the list otherwise. Requests for
    /// surfaces that closed meanwhile are dropped.
    pub fn on_frame(&mut self, tree: &SurfaceTree) -> Option<FocusGrant> {
        let pending = self.pending.as_mut()?;
        let Some(record) = tree.get(&pending.surface) else {
            tracing::trace!(surface = %pending.surface, "focus target closed before mounting");
            self.pending = None;
            return None;
        };
        if record.mounted {
            let target = if record.store.state().has_input {
                FocusTarget::Input
            } else {
                FocusTarget::List
            };
            let surface = pending.surface.clone();
            self.pending = None;
            return Some(FocusGrant { surface, target });
        }
        if pending.frames_left == 0 {
            tracing::warn!(surface = %pending.surface, "surface never mounted; giving up on focus");
            self.pending = None;
            return None;
        }
        pending.frames_left -= 1;
        tracing::trace!(surface = %pending.surface, frames_left = pending.frames_left, "focus retry");
        None
    }

    /// Forgets the owner and any pending request (the tree closed).
    pub fn reset(&mut self) {
        self.owner = None;
        self.pending = None;
    }
}
