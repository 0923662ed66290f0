// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect descriptions produced by the controller.
//!
//! The controller never touches a display surface. Each operation returns an
//! [`Effects`] list describing what the renderer and host should do, in order.
//! A renderer that prefers to repaint from scratch can ignore the list and read
//! a [`RenderState`] snapshot instead.

use alloc::vec::Vec;
use core::ops::Deref;

use smallvec::SmallVec;

use crate::autoplay::TimerCommand;
use crate::collection::ImageId;
use crate::options::TransitionMode;

/// Identifies one pending two-phase removal.
///
/// Tickets name the image, not its position, so they stay valid while other
/// images are added or removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RemovalTicket(pub(crate) ImageId);

impl RemovalTicket {
    /// The image this ticket removes.
    #[must_use]
    pub fn image(self) -> ImageId {
        self.0
    }
}

/// One instruction for the renderer or host.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Foreground `active` and highlight its indicator and thumbnail.
    ///
    /// Also ends any live drag offset. `active` is `None` for an empty
    /// collection, where the renderer shows its placeholder.
    Present {
        /// The slide to show.
        active: Option<usize>,
        /// Number of slides.
        count: usize,
    },
    /// Load the image at `index`.
    Materialize {
        /// Position in the collection.
        index: usize,
        /// Identity of the image.
        id: ImageId,
    },
    /// Visual-only offset while a drag is open, as a percentage of the width.
    DragOffset {
        /// Horizontal offset in percent of the surface width.
        percent: f64,
    },
    /// Slides, indicators, or thumbnails changed shape; rebuild them.
    Rebuild,
    /// Switch presentation style.
    SetTransition(TransitionMode),
    /// Start or stop the autoplay timer.
    Timer(TimerCommand),
    /// Start the exit animation for a slide about to be removed.
    ///
    /// Report completion with the ticket to actually remove it.
    MarkForRemoval {
        /// Completion handle.
        ticket: RemovalTicket,
        /// Current position of the slide.
        index: usize,
        /// Identity of the image.
        id: ImageId,
    },
    /// Ask the platform to show the slide fullscreen. Best-effort.
    RequestFullscreen {
        /// Position of the slide.
        index: usize,
        /// Identity of the image.
        id: ImageId,
    },
    /// Ask the platform to leave fullscreen. Best-effort.
    ExitFullscreen,
    /// The controller was destroyed; release everything bound to it.
    Teardown,
}

/// Ordered effects from one controller operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects(SmallVec<[Effect; 4]>);

impl Effects {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Appends one effect.
    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    /// Active index of the last [`Effect::Present`], if any.
    #[must_use]
    pub fn presented(&self) -> Option<Option<usize>> {
        self.0.iter().rev().find_map(|effect| match effect {
            Effect::Present { active, .. } => Some(*active),
            _ => None,
        })
    }

    /// Indices named by [`Effect::Materialize`] entries, in order.
    #[must_use]
    pub fn materialized(&self) -> Vec<usize> {
        self.0
            .iter()
            .filter_map(|effect| match effect {
                Effect::Materialize { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Timer commands, in order.
    pub fn timer_commands(&self) -> impl Iterator<Item = &TimerCommand> + '_ {
        self.0.iter().filter_map(|effect| match effect {
            Effect::Timer(command) => Some(command),
            _ => None,
        })
    }
}

impl Deref for Effects {
    type Target = [Effect];

    fn deref(&self) -> &[Effect] {
        &self.0
    }
}

impl Extend<Effect> for Effects {
    fn extend<I: IntoIterator<Item = Effect>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = smallvec::IntoIter<[Effect; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = core::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Everything a renderer needs to paint the carousel from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    /// The foregrounded slide, if any.
    pub active_index: Option<usize>,
    /// Number of slides.
    pub count: usize,
    /// Slides whose image is loaded, in order.
    pub materialized_indices: Vec<usize>,
    /// Presentation style.
    pub transition: TransitionMode,
    /// Live drag offset in percent, only while dragging in slide mode.
    pub live_drag_offset: Option<f64>,
    /// Whether the thumbnail strip is shown.
    pub show_thumbnails: bool,
    /// Whether the autoplay timer is armed.
    pub is_playing: bool,
}
