// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events delivered to [`CarouselController::dispatch`](crate::CarouselController::dispatch).
//!
//! The input layer resolves raw platform events (hit testing, key codes) into
//! these values; the controller turns them into state transitions.

use kurbo::Point;

use crate::autoplay::TimerToken;
use crate::effect::RemovalTicket;

/// Keys the carousel reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Previous slide.
    ArrowLeft,
    /// Next slide.
    ArrowRight,
    /// Toggle autoplay.
    Space,
    /// Leave fullscreen.
    Escape,
    /// Anything else; ignored.
    Other,
}

impl Key {
    /// Maps a host key name (DOM `KeyboardEvent.key` style) to a [`Key`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            " " | "Space" | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// On-screen controls the renderer draws and the input layer hit-tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The "previous" button.
    Previous,
    /// The "next" button.
    Next,
    /// A position indicator for slide `i`.
    Indicator(usize),
    /// A thumbnail for slide `i`.
    Thumbnail(usize),
    /// The slide body itself; opens fullscreen.
    Slide(usize),
    /// The delete button on slide `i`.
    Delete(usize),
}

/// One discrete external event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the slide track.
    PointerDown(Point),
    /// Pointer moved anywhere.
    PointerMove(Point),
    /// Pointer released; some platforms omit the position.
    PointerUp(Option<Point>),
    /// The platform cancelled the pointer stream.
    PointerCancel,
    /// Pointer entered the carousel.
    PointerEnter,
    /// Pointer left the carousel.
    PointerLeave,
    /// A key was pressed while the carousel had focus.
    Key(Key),
    /// The display surface changed width.
    Resize {
        /// New surface width.
        width: f64,
    },
    /// The host's autoplay timer fired.
    TimerTick(TimerToken),
    /// A control was activated.
    Activate(Control),
    /// The exit animation for a marked slide finished.
    RemovalFinished(RemovalTicket),
}
