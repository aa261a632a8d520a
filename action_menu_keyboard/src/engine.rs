// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The key transition table.

use action_menu_focus::{FocusArbiter, OwnershipReason, SurfaceTree};
use action_menu_model::{RowId, SurfaceId};
use action_menu_registry::{ActiveCause, ActiveChange, RowKind, SurfaceStore};
use serde::{Deserialize, Serialize};

use crate::key::{Direction, Key, KeyEvent};

/// Keyboard behavior switches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardOptions {
    /// Layout direction; decides which arrow opens and which closes.
    pub direction: Direction,
    /// Enables `ctrl+n/j`, `ctrl+p/k`, `ctrl+l`, `ctrl+h`.
    pub vim_bindings: bool,
}

/// Mutable engine state a key handler may touch.
#[derive(Debug)]
pub struct Navigator<'a> {
    /// Open surfaces.
    pub tree: &'a mut SurfaceTree,
    /// Input ownership.
    pub focus: &'a mut FocusArbiter,
}

/// What a handled key did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// The active row moved.
    Moved {
        /// Surface whose active row changed.
        surface: SurfaceId,
        /// New active row.
        row: RowId,
    },
    /// A submenu opened and took input.
    OpenedSubmenu {
        /// The new surface.
        surface: SurfaceId,
        /// Its trigger row on the parent surface.
        trigger: RowId,
    },
    /// A submenu closed and handed input back to its parent.
    ClosedSubmenu {
        /// The closed surface.
        surface: SurfaceId,
        /// The parent surface, now owning input.
        parent: SurfaceId,
        /// Trigger row restored as the parent's active row.
        restored: Option<RowId>,
    },
    /// An item should be selected.
    Select {
        /// Surface of the item.
        surface: SurfaceId,
        /// The item.
        row: RowId,
    },
    /// The whole menu tree closed.
    CloseTree,
    /// Tab was swallowed.
    TabTrapped,
}

/// Outcome of [`handle_key`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyResponse {
    /// The host should call `preventDefault` (or its equivalent).
    pub prevent_default: bool,
    /// The host should stop propagation.
    pub stop_propagation: bool,
    /// What happened, if anything.
    pub action: Option<KeyAction>,
}

impl KeyResponse {
    /// The key was not for the engine.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    /// The key was consumed.
    #[must_use]
    pub fn handled(action: Option<KeyAction>) -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
            action,
        }
    }

    /// Returns `true` if the key was consumed.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        self.prevent_default
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Intent {
    Next,
    Prev,
    First,
    Last,
    Open { enter: bool },
    Close,
    Escape,
    Trap,
}

fn intent_for(event: &KeyEvent, options: &KeyboardOptions) -> Option<Intent> {
    if options.vim_bindings && event.is_ctrl_only() {
        let vim = match event.key {
            Key::Character('n' | 'j') => Some(Intent::Next),
            Key::Character('p' | 'k') => Some(Intent::Prev),
            Key::Character('l') => Some(Intent::Open { enter: false }),
            Key::Character('h') => Some(Intent::Close),
            _ => None,
        };
        if vim.is_some() {
            return vim;
        }
    }
    let direction = options.direction;
    match event.key {
        Key::Tab => Some(Intent::Trap),
        Key::ArrowDown => Some(Intent::Next),
        Key::ArrowUp => Some(Intent::Prev),
        Key::Home | Key::PageUp => Some(Intent::First),
        Key::End | Key::PageDown => Some(Intent::Last),
        Key::Enter => Some(Intent::Open { enter: true }),
        key if key == direction.open_key() => Some(Intent::Open { enter: false }),
        key if key == direction.close_key() => Some(Intent::Close),
        Key::Escape => Some(Intent::Escape),
        _ => None,
    }
}

/// Interprets one key event against the surface that received it.
///
/// Events from a surface that does not own input are ignored, so nested
/// surfaces never both react to the same key. The first matching rule wins:
///
/// 1. vim-style bindings, when enabled;
/// 2. `Tab` is trapped;
/// 3. arrows, `Home`/`End`, `PageUp`/`PageDown` move the active row (wrapping);
/// 4. `Enter` or the direction's open arrow opens an active submenu trigger and
///    moves input into it; `Enter` on an item selects it;
/// 5. the direction's close arrow closes the current submenu, restoring the
///    parent's trigger row;
/// 6. `Escape` closes one submenu level, or the whole tree at the root.
pub fn handle_key(event: &KeyEvent, nav: &mut Navigator<'_>, options: &KeyboardOptions) -> KeyResponse {
    if !nav.focus.owns(&event.surface) || !nav.tree.is_open(&event.surface) {
        return KeyResponse::ignored();
    }
    let Some(intent) = intent_for(event, options) else {
        return KeyResponse::ignored();
    };
    let surface = &event.surface;
    tracing::trace!(surface = %surface, key = ?event.key, ?intent, "key");

    match intent {
        Intent::Trap => KeyResponse::handled(Some(KeyAction::TabTrapped)),
        Intent::Next => move_active(nav, surface, SurfaceStore::next),
        Intent::Prev => move_active(nav, surface, SurfaceStore::prev),
        Intent::First => move_active(nav, surface, SurfaceStore::first),
        Intent::Last => move_active(nav, surface, SurfaceStore::last),
        Intent::Open { enter } => open_active(nav, surface, enter),
        Intent::Close => {
            if surface.parent().is_none() {
                return KeyResponse::ignored();
            }
            close_level(nav, surface)
        }
        Intent::Escape => {
            if surface.parent().is_some() {
                return close_level(nav, surface);
            }
            nav.tree.close_all();
            nav.focus.reset();
            tracing::debug!("escape closed the menu");
            KeyResponse::handled(Some(KeyAction::CloseTree))
        }
    }
}

fn move_active(
    nav: &mut Navigator<'_>,
    surface: &SurfaceId,
    step: fn(&mut SurfaceStore, ActiveCause) -> Option<ActiveChange>,
) -> KeyResponse {
    let Some(store) = nav.tree.store_mut(surface) else {
        return KeyResponse::ignored();
    };
    let change = step(store, ActiveCause::Keyboard);
    let action = change.map(|change| {
        nav.tree.close_stale_children(surface, &change);
        KeyAction::Moved {
            surface: surface.clone(),
            row: change.current,
        }
    });
    KeyResponse::handled(action)
}

fn open_active(nav: &mut Navigator<'_>, surface: &SurfaceId, enter: bool) -> KeyResponse {
    let Some(store) = nav.tree.store(surface) else {
        return KeyResponse::ignored();
    };
    let Some(active) = store.active_id().cloned() else {
        return if enter {
            KeyResponse::handled(None)
        } else {
            KeyResponse::ignored()
        };
    };
    match store.active_kind() {
        Some(RowKind::Submenu) => {
            let Some(child) = nav.tree.open_submenu(surface, &active) else {
                return KeyResponse::ignored();
            };
            nav.focus.claim(&child, OwnershipReason::SubmenuOpened);
            nav.focus.request_focus(&child);
            KeyResponse::handled(Some(KeyAction::OpenedSubmenu {
                surface: child,
                trigger: active,
            }))
        }
        Some(RowKind::Item) if enter => KeyResponse::handled(Some(KeyAction::Select {
            surface: surface.clone(),
            row: active,
        })),
        _ => KeyResponse::ignored(),
    }
}

fn close_level(nav: &mut Navigator<'_>, surface: &SurfaceId) -> KeyResponse {
    let Some(parent) = surface.parent() else {
        return KeyResponse::ignored();
    };
    let restored = nav.tree.close_submenu(surface);
    if let Some(trigger) = &restored {
        nav.tree.set_active(&parent, trigger.as_str(), ActiveCause::Programmatic);
    }
    if nav.focus.release_to_parent(surface).is_none() {
        nav.focus.claim(&parent, OwnershipReason::SubmenuClosed);
    }
    nav.focus.request_focus(&parent);
    KeyResponse::handled(Some(KeyAction::ClosedSubmenu {
        surface: surface.clone(),
        parent,
        restored,
    }))
}

#[cfg(test)]
mod tests {
    use action_menu_focus::FocusGrant;
    use action_menu_registry::RowRecord;

    use super::*;
    use crate::key::Modifiers;

    struct Fixture {
        tree: SurfaceTree,
        focus: FocusArbiter,
        options: KeyboardOptions,
    }

    impl Fixture {
        /// Root rows: `cut` (item), `share` (submenu), `paste` (item).
        fn new() -> Self {
            let mut tree = SurfaceTree::new();
            let mut focus = FocusArbiter::new(2);
            let root = SurfaceId::root();
            tree.open_root();
            focus.claim(&root, OwnershipReason::RootOpened);
            let store = tree.store_mut(&root).unwrap();
            store.register_row(RowId::new("cut"), RowRecord::item());
            store.register_row(RowId::new("share"), RowRecord::submenu());
            store.register_row(RowId::new("paste"), RowRecord::item());
            Self {
                tree,
                focus,
                options: KeyboardOptions::default(),
            }
        }

        fn press(&mut self, key: Key, surface: &SurfaceId) -> KeyResponse {
            self.press_with(key, Modifiers::empty(), surface)
        }

        fn press_with(&mut self, key: Key, modifiers: Modifiers, surface: &SurfaceId) -> KeyResponse {
            let event = KeyEvent::new(key, surface.clone()).with_modifiers(modifiers);
            let mut nav = Navigator {
                tree: &mut self.tree,
                focus: &mut self.focus,
            };
            handle_key(&event, &mut nav, &self.options)
        }

        fn active(&self, surface: &SurfaceId) -> Option<String> {
            self.tree
                .store(surface)
                .and_then(|store| store.active_id())
                .map(ToString::to_string)
        }

        fn open_share(&mut self) -> SurfaceId {
            let root = SurfaceId::root();
            self.press(Key::ArrowDown, &root);
            let response = self.press(Key::Enter, &root);
            let Some(KeyAction::OpenedSubmenu { surface, .. }) = response.action else {
                panic!("expected submenu to open, got {response:?}");
            };
            let store = self.tree.store_mut(&surface).unwrap();
            store.register_row(RowId::new("mail"), RowRecord::item());
            store.register_row(RowId::new("link"), RowRecord::item());
            surface
        }
    }

    #[test]
    fn arrows_move_and_wrap() {
        let mut fx = Fixture::new();
        let root = SurfaceId::root();
        let response = fx.press(Key::ArrowDown, &root);
        assert!(response.prevent_default && response.stop_propagation);
        assert_eq!(fx.active(&root).as_deref(), Some("share"));

        fx.press(Key::ArrowUp, &root);
        fx.press(Key::ArrowUp, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("paste"));

        fx.press(Key::Home, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("cut"));
        fx.press(Key::PageDown, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("paste"));
        fx.press(Key::PageUp, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("cut"));
        fx.press(Key::End, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("paste"));
    }

    #[test]
    fn tab_is_trapped() {
        let mut fx = Fixture::new();
        let response = fx.press(Key::Tab, &SurfaceId::root());
        assert!(response.is_handled());
        assert_eq!(response.action, Some(KeyAction::TabTrapped));
    }

    #[test]
    fn enter_on_item_selects() {
        let mut fx = Fixture::new();
        let response = fx.press(Key::Enter, &SurfaceId::root());
        assert_eq!(
            response.action,
            Some(KeyAction::Select {
                surface: SurfaceId::root(),
                row: RowId::new("cut"),
            })
        );
    }

    #[test]
    fn open_arrow_on_item_is_a_noop() {
        let mut fx = Fixture::new();
        let response = fx.press(Key::ArrowRight, &SurfaceId::root());
        assert!(!response.is_handled());
        assert_eq!(fx.tree.len(), 1);
    }

    #[test]
    fn enter_on_submenu_moves_ownership_into_child() {
        let mut fx = Fixture::new();
        let child = fx.open_share();
        assert!(fx.focus.owns(&child));
        assert_eq!(fx.active(&child).as_deref(), Some("mail"));

        fx.tree.mark_mounted(&child);
        assert_eq!(
            fx.focus.on_frame(&fx.tree),
            Some(FocusGrant {
                surface: child.clone(),
                target: action_menu_focus::FocusTarget::List,
            })
        );

        // The parent no longer reacts to keys.
        let root = SurfaceId::root();
        assert!(!fx.press(Key::ArrowDown, &root).is_handled());
        assert_eq!(fx.active(&root).as_deref(), Some("share"));
    }

    #[test]
    fn close_arrow_restores_parent() {
        let mut fx = Fixture::new();
        let child = fx.open_share();
        let root = SurfaceId::root();

        // Closing at the root does nothing.
        fx.focus.claim(&root, OwnershipReason::PointerEntered);
        assert!(!fx.press(Key::ArrowLeft, &root).is_handled());
        fx.focus.claim(&child, OwnershipReason::PointerEntered);

        let response = fx.press(Key::ArrowLeft, &child);
        assert_eq!(
            response.action,
            Some(KeyAction::ClosedSubmenu {
                surface: child.clone(),
                parent: root.clone(),
                restored: Some(RowId::new("share")),
            })
        );
        assert!(!fx.tree.is_open(&child));
        assert!(fx.focus.owns(&root));
        assert_eq!(fx.active(&root).as_deref(), Some("share"));
    }

    #[test]
    fn rtl_swaps_open_and_close_arrows() {
        let mut fx = Fixture::new();
        fx.options.direction = Direction::Rtl;
        let root = SurfaceId::root();
        fx.press(Key::ArrowDown, &root);

        let response = fx.press(Key::ArrowLeft, &root);
        let Some(KeyAction::OpenedSubmenu { surface: child, .. }) = response.action else {
            panic!("expected submenu to open");
        };
        let response = fx.press(Key::ArrowRight, &child);
        assert!(matches!(response.action, Some(KeyAction::ClosedSubmenu { .. })));
    }

    #[test]
    fn escape_walks_back_one_level_per_press() {
        let mut fx = Fixture::new();
        let child = fx.open_share();
        let root = SurfaceId::root();

        let first = fx.press(Key::Escape, &child);
        assert!(matches!(first.action, Some(KeyAction::ClosedSubmenu { .. })));
        assert!(fx.tree.is_root_open());

        let second = fx.press(Key::Escape, &root);
        assert_eq!(second.action, Some(KeyAction::CloseTree));
        assert!(fx.tree.is_empty());
        assert_eq!(fx.focus.owner(), None);
    }

    #[test]
    fn vim_bindings_only_when_enabled() {
        let mut fx = Fixture::new();
        let root = SurfaceId::root();
        assert!(!fx.press_with(Key::Character('n'), Modifiers::CTRL, &root).is_handled());

        fx.options.vim_bindings = true;
        fx.press_with(Key::Character('j'), Modifiers::CTRL, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("share"));

        let response = fx.press_with(Key::Character('l'), Modifiers::CTRL, &root);
        let Some(KeyAction::OpenedSubmenu { surface: child, .. }) = response.action else {
            panic!("expected ctrl+l to open the submenu");
        };
        let response = fx.press_with(Key::Character('h'), Modifiers::CTRL, &child);
        assert!(matches!(response.action, Some(KeyAction::ClosedSubmenu { .. })));

        fx.press_with(Key::Character('k'), Modifiers::CTRL, &root);
        assert_eq!(fx.active(&root).as_deref(), Some("cut"));
    }

    #[test]
    fn moving_away_from_open_trigger_closes_its_submenu() {
        let mut fx = Fixture::new();
        let child = fx.open_share();
        let root = SurfaceId::root();
        fx.focus.claim(&root, OwnershipReason::PointerEntered);

        fx.press(Key::ArrowDown, &root);
        assert!(!fx.tree.is_open(&child));
    }
}
