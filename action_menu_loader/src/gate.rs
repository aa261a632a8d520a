// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input to effective query: debounce and minimum length.

use action_menu_model::SearchConfig;

/// Gate settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryGateConfig {
    /// Quiet period before a raw value becomes effective, in milliseconds.
    pub debounce_ms: u64,
    /// Effective queries shorter than this (in characters) do not load.
    pub min_length: usize,
}

impl From<SearchConfig> for QueryGateConfig {
    fn from(config: SearchConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            min_length: config.min_length,
        }
    }
}

/// Turns keystrokes into effective queries.
///
/// Every [`QueryGate::input`] restarts the debounce window. Once the window
/// passes, [`QueryGate::tick`] publishes the pending value as the effective
/// query, reporting it only when it differs from the previous one. With a
/// zero debounce the value is published by `input` itself.
#[derive(Clone, Debug, Default)]
pub struct QueryGate {
    config: QueryGateConfig,
    effective: String,
    pending: Option<(String, u64)>,
}

impl QueryGate {
    /// Creates a gate with an empty effective query.
    #[must_use]
    pub fn new(config: QueryGateConfig) -> Self {
        Self {
            config,
            effective: String::new(),
            pending: None,
        }
    }

    /// Settings.
    #[must_use]
    pub fn config(&self) -> QueryGateConfig {
        self.config
    }

    /// Current effective query.
    #[must_use]
    pub fn effective(&self) -> &str {
        &self.effective
    }

    /// Records a raw input value at `now_ms`.
    ///
    /// Returns the new effective query when it changed immediately.
    pub fn input(&mut self, value: &str, now_ms: u64) -> Option<&str> {
        if self.config.debounce_ms == 0 {
            self.pending = None;
            return self.publish(value.to_owned());
        }
        self.pending = Some((value.to_owned(), now_ms.saturating_add(self.config.debounce_ms)));
        None
    }

    /// Publishes a pending value whose window has passed.
    pub fn tick(&mut self, now_ms: u64) -> Option<&str> {
        match &self.pending {
            Some((_, deadline)) if now_ms >= *deadline => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        self.publish(value)
    }

    /// When the pending value becomes effective.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Clears both the pending and the effective query.
    ///
    /// Returns `true` if the effective query changed.
    pub fn reset(&mut self) -> bool {
        self.pending = None;
        self.publish(String::new()).is_some()
    }

    /// Returns `true` if the effective query is long enough to load.
    #[must_use]
    pub fn should_load(&self) -> bool {
        self.effective.chars().count() >= self.config.min_length
    }

    fn publish(&mut self, value: String) -> Option<&str> {
        if value == self.effective {
            return None;
        }
        tracing::debug!(from = %self.effective, to = %value, "effective query changed");
        self.effective = value;
        Some(&self.effective)
    }
}
