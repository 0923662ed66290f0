// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-navigate decisions.
//!
//! ## Usage
//!
//! 1) Open a session with [`GestureInterpreter::begin`] on pointer-down.
//! 2) Feed moves to [`GestureInterpreter::update`]; the returned [`DragOffset`]
//!    is a visual-only offset for the renderer.
//! 3) Close it with [`GestureInterpreter::end`] (or [`GestureInterpreter::cancel`])
//!    and apply the returned [`SwipeDecision`].
//!
//! The commit threshold is a fixed fraction of the surface width
//! ([`SWIPE_THRESHOLD_FRACTION`]), so a swipe feels the same at any display size.
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::gesture::{GestureInterpreter, SwipeDecision};
//!
//! let mut gestures = GestureInterpreter::new();
//! gestures.begin(Point::new(100.0, 0.0), 400.0);
//! // Moved 60px left; the threshold is 48px.
//! assert_eq!(gestures.end(Some(Point::new(40.0, 0.0))), Some(SwipeDecision::Next));
//! ```

use kurbo::Point;

/// Fraction of the surface width a drag must exceed to commit.
pub const SWIPE_THRESHOLD_FRACTION: f64 = 0.12;

/// What a finished drag asks the navigation state to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Dragged right past the threshold: go to the previous slide.
    Previous,
    /// Dragged left past the threshold: go to the next slide.
    Next,
    /// Below the threshold (or cancelled): snap back to the current slide.
    SnapBack,
}

/// Live horizontal offset of an open drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragOffset {
    /// Horizontal distance from the drag start, in surface units.
    pub delta: f64,
    /// `delta` as a percentage of the surface width.
    pub percent: f64,
}

/// An open drag, from pointer-down until pointer-up or cancel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Position where the drag began.
    pub start: Point,
    /// Last position reported during the drag.
    pub last: Point,
    /// Width of the display surface the drag happens on.
    pub surface_width: f64,
}

impl DragSession {
    fn delta_to(&self, pos: Point) -> f64 {
        (pos - self.start).x
    }

    fn offset_to(&self, pos: Point) -> DragOffset {
        let delta = self.delta_to(pos);
        // A zero-width surface would divide by zero; treat it as one unit wide.
        let width = if self.surface_width > 0.0 {
            self.surface_width
        } else {
            1.0
        };
        DragOffset {
            delta,
            percent: delta / width * 100.0,
        }
    }
}

/// Tracks at most one [`DragSession`] and turns it into a [`SwipeDecision`].
#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    session: Option<DragSession>,
}

impl GestureInterpreter {
    /// Creates an idle interpreter.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Returns `true` while a drag is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Opens a session at `pos`. Replaces any session already open.
    pub fn begin(&mut self, pos: Point, surface_width: f64) {
        self.session = Some(DragSession {
            start: pos,
            last: pos,
            surface_width,
        });
    }

    /// Records a move and returns the offset from the start.
    ///
    /// Returns `None` when no drag is open.
    pub fn update(&mut self, pos: Point) -> Option<DragOffset> {
        let session = self.session.as_mut()?;
        session.last = pos;
        Some(session.offset_to(pos))
    }

    /// Keeps an open session in sync with a resized surface.
    pub fn set_surface_width(&mut self, surface_width: f64) {
        if let Some(session) = self.session.as_mut() {
            session.surface_width = surface_width;
        }
    }

    /// Closes the session and decides what to do.
    ///
    /// When `pos` is `None` the last known position is used. An `end` with no
    /// open session is ignored and returns `None`.
    pub fn end(&mut self, pos: Option<Point>) -> Option<SwipeDecision> {
        let session = self.session.take()?;
        let delta = session.delta_to(pos.unwrap_or(session.last));
        let threshold = session.surface_width * SWIPE_THRESHOLD_FRACTION;
        let decision = if delta > threshold {
            SwipeDecision::Previous
        } else if delta < -threshold {
            SwipeDecision::Next
        } else {
            SwipeDecision::SnapBack
        };
        log::trace!("drag ended: delta={delta} threshold={threshold} -> {decision:?}");
        Some(decision)
    }

    /// Closes the session as if it ended where it started.
    ///
    /// Returns `None` when no drag is open.
    pub fn cancel(&mut self) -> Option<SwipeDecision> {
        self.session.take().map(|_| SwipeDecision::SnapBack)
    }
}
