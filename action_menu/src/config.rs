// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use action_menu_aim::DEFAULT_AIM_GUARD_MS;
use action_menu_focus::DEFAULT_FOCUS_RETRY_FRAMES;
use action_menu_keyboard::{Direction, KeyboardOptions};
use action_menu_model::SearchConfig;
use action_menu_virtual_list::{DEFAULT_ESTIMATED_ROW_HEIGHT, DEFAULT_OVERSCAN, WindowConfig};
use serde::{Deserialize, Serialize};

/// Default delay before a closed menu's query is cleared, in milliseconds.
pub const DEFAULT_CLEAR_INPUT_MS: u64 = 300;

/// When the root query is cleared after the menu closes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearInput {
    /// After this many milliseconds, unless the menu reopens first.
    After(u64),
    /// As soon as the menu closes.
    Immediate,
    /// Never; the query survives reopening.
    Never,
}

impl Default for ClearInput {
    fn default() -> Self {
        Self::After(DEFAULT_CLEAR_INPUT_MS)
    }
}

/// Configuration of an [`ActionMenu`](crate::ActionMenu).
///
/// Every field has a default, so partial documents deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionMenuConfig {
    /// Layout direction.
    pub direction: Direction,
    /// Enables `ctrl+n/p/j/k/l/h` navigation.
    pub vim_bindings: bool,
    /// Search settings for surfaces without their own.
    pub search: SearchConfig,
    /// Whether surfaces render a search input.
    pub search_input: bool,
    /// Keep filtered checkbox items split into their open-time
    /// selected and unselected buckets.
    pub sticky_groups: bool,
    /// Rows realized beyond each viewport edge.
    pub overscan: usize,
    /// Height assumed for rows not yet measured.
    pub estimated_row_height: f64,
    /// Hover suppression window after the pointer aims at a submenu.
    pub aim_guard_ms: u64,
    /// Query clearing after close.
    pub clear_input: ClearInput,
    /// Frames a focus request waits for its surface to mount.
    pub focus_retry_frames: u32,
}

impl Default for ActionMenuConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            vim_bindings: false,
            search: SearchConfig::default(),
            search_input: true,
            sticky_groups: false,
            overscan: DEFAULT_OVERSCAN,
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
            aim_guard_ms: DEFAULT_AIM_GUARD_MS,
            clear_input: ClearInput::default(),
            focus_retry_frames: DEFAULT_FOCUS_RETRY_FRAMES,
        }
    }
}

impl ActionMenuConfig {
    /// Keyboard switches.
    #[must_use]
    pub fn keyboard(&self) -> KeyboardOptions {
        KeyboardOptions {
            direction: self.direction,
            vim_bindings: self.vim_bindings,
        }
    }

    /// Windowing parameters.
    #[must_use]
    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            overscan: self.overscan,
            estimated_row_height: self.estimated_row_height,
        }
    }
}
