// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key events and layout direction.

use action_menu_model::SurfaceId;
use serde::{Deserialize, Serialize};

/// Keys the engine understands. Everything else arrives as [`Key::Character`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A printable character, as typed.
    Character(char),
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL  = 0b0000_0001;
        /// Shift.
        const SHIFT = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command.
        const META  = 0b0000_1000;
    }
}

/// A key press delivered to one surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Surface whose input or list received the event.
    pub surface: SurfaceId,
}

impl KeyEvent {
    /// A key press without modifiers.
    #[must_use]
    pub fn new(key: Key, surface: SurfaceId) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            surface,
        }
    }

    /// Adds modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns `true` if exactly Control is held.
    #[must_use]
    pub fn is_ctrl_only(&self) -> bool {
        self.modifiers == Modifiers::CTRL
    }
}

/// Horizontal layout direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right: submenus open to the right.
    #[default]
    Ltr,
    /// Right to left: submenus open to the left.
    Rtl,
}

impl Direction {
    /// Arrow key that opens a submenu.
    #[must_use]
    pub const fn open_key(self) -> Key {
        match self {
            Self::Ltr => Key::ArrowRight,
            Self::Rtl => Key::ArrowLeft,
        }
    }

    /// Arrow key that closes a submenu.
    #[must_use]
    pub const fn close_key(self) -> Key {
        match self {
            Self::Ltr => Key::ArrowLeft,
            Self::Rtl => Key::ArrowRight,
        }
    }
}
