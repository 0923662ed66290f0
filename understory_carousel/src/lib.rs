// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: renderer-agnostic state for image carousels.
//!
//! This crate owns the parts of a carousel that carry real invariants: which
//! slide is current, how out-of-range requests resolve, when a drag commits,
//! when the autoplay timer runs, and which images must be loaded. It does
//! **not** paint anything or read platform events. Hosts translate their
//! input into [`InputEvent`]s and apply the [`Effect`]s that come back.
//!
//! The pieces, leaves first:
//!
//! - [`collection`]: ordered images with stable, never-reused [`ImageId`]s.
//! - [`navigation`]: the current index and the single wrap/clamp resolver.
//! - [`gesture`]: drag sessions and the 12%-of-width commit threshold.
//! - [`autoplay`]: a timer state machine with independent pause reasons.
//! - [`lazy_load`]: the ±1 load window and monotonic materialization.
//! - [`options`]: typed configuration plus string-keyed updates.
//! - [`CarouselController`]: the orchestrator and single dispatch entry point.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::{CarouselController, CarouselOptions, Effect, InputEvent, Key};
//!
//! let mut carousel = CarouselController::new(CarouselOptions::default());
//! carousel.set_images(["a.jpg", "b.jpg", "c.jpg"]);
//! assert_eq!(carousel.current_index(), Some(0));
//!
//! // Loop is on by default: previous from the first slide wraps to the last.
//! let effects = carousel.dispatch(InputEvent::Key(Key::ArrowLeft));
//! assert_eq!(carousel.current_index(), Some(2));
//! assert!(effects.contains(&Effect::Present { active: Some(2), count: 3 }));
//! ```
//!
//! ## Timers
//!
//! The crate has no clock. When autoplay should run, the controller emits
//! [`Effect::Timer`] with a [`TimerCommand::Start`]; the host arms a periodic
//! timer and feeds each firing back as [`InputEvent::TimerTick`] with the
//! token it was given. Ticks with any other token are ignored, so a timer the
//! host failed to cancel cannot move the carousel.
//!
//! ```rust
//! use understory_carousel::{CarouselController, CarouselOptions, InputEvent, TimerCommand};
//!
//! let mut carousel = CarouselController::new(CarouselOptions::default());
//! let effects = carousel.set_images(["a.jpg", "b.jpg"]);
//! let token = effects
//!     .timer_commands()
//!     .find_map(|command| match command {
//!         TimerCommand::Start { token, .. } => Some(*token),
//!         TimerCommand::Cancel { .. } => None,
//!     })
//!     .unwrap();
//!
//! carousel.dispatch(InputEvent::TimerTick(token));
//! assert_eq!(carousel.current_index(), Some(1));
//! ```
//!
//! ## Removal
//!
//! Removing a slide is two-phase so the renderer can animate it out:
//! [`CarouselController::remove_image_by_index`] emits
//! [`Effect::MarkForRemoval`] with a [`RemovalTicket`], and the host reports
//! [`InputEvent::RemovalFinished`] when the animation is done.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod autoplay;
pub mod collection;
mod controller;
pub mod effect;
pub mod gesture;
pub mod input;
pub mod lazy_load;
pub mod navigation;
pub mod options;
pub mod platform;

pub use autoplay::{AutoplayState, PauseReasons, TimerCommand, TimerToken};
pub use collection::{ImageCollection, ImageId, ImageInput, ImageItem};
pub use controller::CarouselController;
pub use effect::{Effect, Effects, RemovalTicket, RenderState};
pub use input::{Control, InputEvent, Key};
pub use options::{CarouselOptions, OptionError, OptionKey, OptionValue, TransitionMode};
pub use platform::{FullscreenService, PlatformError, apply_fullscreen};
