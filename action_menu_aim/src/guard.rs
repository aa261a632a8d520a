// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-boxed hover suppression.

/// Default suppression window in milliseconds.
pub const DEFAULT_AIM_GUARD_MS: u64 = 450;

/// A timed flag naming the submenu trigger the pointer is heading for.
///
/// While armed, hover-driven opens and closes on rows other than the guarded
/// trigger are suppressed. Arming again replaces the trigger and restarts the
/// window. The guard expires on its own; callers pass the current time to
/// every query.
#[derive(Clone, Debug)]
pub struct AimGuard<K> {
    window_ms: u64,
    armed: Option<(K, u64)>,
}

impl<K> Default for AimGuard<K> {
    fn default() -> Self {
        Self::new(DEFAULT_AIM_GUARD_MS)
    }
}

impl<K> AimGuard<K> {
    /// Creates a disarmed guard with the given window.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            armed: None,
        }
    }

    /// Suppression window in milliseconds.
    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Arms the guard for `trigger` until `now_ms + window`.
    pub fn arm(&mut self, trigger: K, now_ms: u64) {
        self.armed = Some((trigger, now_ms.saturating_add(self.window_ms)));
    }

    /// Disarms the guard.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Time at which the guard lapses, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.armed.as_ref().map(|(_, deadline)| *deadline)
    }

    /// The guarded trigger, if the guard is still running at `now_ms`.
    #[must_use]
    pub fn guarded(&self, now_ms: u64) -> Option<&K> {
        match &self.armed {
            Some((trigger, deadline)) if now_ms < *deadline => Some(trigger),
            _ => None,
        }
    }

    /// Returns `true` while the guard is running.
    #[must_use]
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.guarded(now_ms).is_some()
    }

    /// Drops an expired arming. Returns `true` if the guard just lapsed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if self.armed.is_some() && !self.is_active(now_ms) {
            self.armed = None;
            return true;
        }
        false
    }
}

impl<K: PartialEq> AimGuard<K> {
    /// Returns `true` if hovering `row` should be ignored at `now_ms`.
    #[must_use]
    pub fn suppresses(&self, row: &K, now_ms: u64) -> bool {
        self.guarded(now_ms).is_some_and(|trigger| trigger != row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_lapses_after_window() {
        let mut guard = AimGuard::new(100);
        assert!(!guard.is_active(0));
        guard.arm("a", 10);
        assert_eq!(guard.deadline(), Some(110));
        assert!(guard.is_active(109));
        assert!(!guard.is_active(110));
        assert!(!guard.expire(50));
        assert!(guard.expire(110));
        assert_eq!(guard.deadline(), None);
    }

    #[test]
    fn guarded_trigger_is_not_suppressed() {
        let mut guard = AimGuard::default();
        guard.arm(1_u32, 0);
        assert!(!guard.suppresses(&1, 10));
        assert!(guard.suppresses(&2, 10));
        guard.disarm();
        assert!(!guard.suppresses(&2, 10));
    }

    #[test]
    fn rearming_restarts_window() {
        let mut guard = AimGuard::new(100);
        guard.arm("a", 0);
        guard.arm("b", 90);
        assert_eq!(guard.guarded(150), Some(&"b"));
        assert!(guard.suppresses(&"a", 150));
    }
}
