// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current-index state and the single index resolver.
//!
//! [`NavigationState`] is the only owner of "which slide is shown". Every change
//! goes through [`NavigationState::request_index`], which resolves out-of-range
//! targets by either wrapping (loop enabled) or clamping (loop disabled).
//!
//! ```rust
//! use understory_carousel::navigation::NavigationState;
//!
//! let mut nav = NavigationState::new(true);
//! nav.reset(3, 0);
//! assert_eq!(nav.prev(3).map(|t| t.to), Some(2));
//! assert_eq!(nav.next(3).map(|t| t.to), Some(0));
//! ```

/// Resolves `target` against a collection of `len` items.
///
/// Returns `None` for an empty collection. With `wrap` the result is
/// `target` modulo `len` (always non-negative); without it the target is
/// clamped into `0..len`.
#[must_use]
pub fn resolve_index(target: isize, len: usize, wrap: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    if target < 0 {
        if !wrap {
            return Some(0);
        }
        let Ok(signed_len) = isize::try_from(len) else {
            // Only reachable with more than `isize::MAX` items.
            return Some(last);
        };
        return Some(target.rem_euclid(signed_len).unsigned_abs());
    }
    let target = target.unsigned_abs();
    if target > last {
        return Some(if wrap { target % len } else { last });
    }
    Some(target)
}

/// Result of a navigation request.
///
/// A transition is produced even when `from == Some(to)`: re-entering the
/// current slide is a legitimate request (for example snapping back after a
/// cancelled drag) and observers still refresh position and highlights.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Index before the request; `None` if nothing was selected.
    pub from: Option<usize>,
    /// Resolved index after the request.
    pub to: usize,
}

impl Transition {
    /// Returns `true` if the current index actually moved.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from != Some(self.to)
    }
}

/// Current index plus the wrap policy.
///
/// The state is either empty (`current() == None`) or points at a valid index
/// of the collection it was last resolved against. Callers must pass the live
/// collection length to every operation and call [`NavigationState::clamp_to`]
/// after the collection shrinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    current: Option<usize>,
    loop_enabled: bool,
}

impl NavigationState {
    /// Creates an empty navigation state.
    #[must_use]
    pub const fn new(loop_enabled: bool) -> Self {
        Self {
            current: None,
            loop_enabled,
        }
    }

    /// The current index, or `None` when there is no selection.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Whether out-of-range requests wrap around.
    #[must_use]
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Changes the wrap policy. Takes effect on the next request.
    pub fn set_loop_enabled(&mut self, loop_enabled: bool) {
        self.loop_enabled = loop_enabled;
    }

    /// Resolves `target` and moves there.
    ///
    /// Returns `None` (and stays empty) when `len == 0`.
    pub fn request_index(&mut self, target: isize, len: usize) -> Option<Transition> {
        let to = resolve_index(target, len, self.loop_enabled)?;
        let from = self.current;
        self.current = Some(to);
        Some(Transition { from, to })
    }

    /// Requests `current + 1`.
    pub fn next(&mut self, len: usize) -> Option<Transition> {
        let target = self.current_signed().saturating_add(1);
        self.request_index(target, len)
    }

    /// Requests `current - 1`.
    pub fn prev(&mut self, len: usize) -> Option<Transition> {
        let target = self.current_signed().saturating_sub(1);
        self.request_index(target, len)
    }

    /// Re-requests the current index (no movement, but still a transition).
    pub fn refresh(&mut self, len: usize) -> Option<Transition> {
        self.request_index(self.current_signed(), len)
    }

    /// Re-establishes the invariant after the collection changed to `len` items.
    ///
    /// An index past the end is clamped to the last item; an empty collection
    /// clears the selection. An index still in range is left alone.
    pub fn clamp_to(&mut self, len: usize) {
        self.current = match (self.current, len) {
            (_, 0) => None,
            (Some(current), len) if current >= len => Some(len - 1),
            (current, _) => current,
        };
    }

    /// Used when the collection is replaced wholesale.
    ///
    /// Keeps the current index when there is one, otherwise starts from
    /// `start_index`; in both cases the result is clamped into `0..len`.
    pub fn reset(&mut self, len: usize, start_index: usize) {
        let wanted = self.current.unwrap_or(start_index);
        self.current = (len > 0).then(|| wanted.min(len - 1));
    }

    fn current_signed(&self) -> isize {
        self.current
            .and_then(|current| isize::try_from(current).ok())
            .unwrap_or(0)
    }
}
