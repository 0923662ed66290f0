// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fullscreen seam to the host platform.
//!
//! Fullscreen is fire-and-forget: the controller emits
//! [`Effect::RequestFullscreen`] / [`Effect::ExitFullscreen`] and no state
//! depends on the outcome. [`apply_fullscreen`] forwards those effects to a
//! [`FullscreenService`] and drops any failure.

use core::fmt;

use crate::collection::ImageId;
use crate::effect::Effect;

/// Why the platform could not satisfy a fullscreen request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform has no fullscreen mode.
    Unsupported,
    /// The platform refused (for example, no user activation).
    Denied,
    /// Nothing is fullscreen.
    NotFullscreen,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("fullscreen is not supported"),
            Self::Denied => f.write_str("fullscreen request was denied"),
            Self::NotFullscreen => f.write_str("not in fullscreen"),
        }
    }
}

impl core::error::Error for PlatformError {}

/// Host fullscreen facility.
pub trait FullscreenService {
    /// Shows the slide at `index` (image `id`) fullscreen.
    fn request_fullscreen(&mut self, index: usize, id: ImageId) -> Result<(), PlatformError>;

    /// Leaves fullscreen.
    fn exit_fullscreen(&mut self) -> Result<(), PlatformError>;
}

/// Forwards a fullscreen effect to `service`, ignoring failures.
///
/// Returns `true` if `effect` was a fullscreen effect.
pub fn apply_fullscreen<S: FullscreenService + ?Sized>(service: &mut S, effect: &Effect) -> bool {
    let result = match *effect {
        Effect::RequestFullscreen { index, id } => service.request_fullscreen(index, id),
        Effect::ExitFullscreen => service.exit_fullscreen(),
        _ => return false,
    };
    if let Err(err) = result {
        log::debug!("fullscreen effect dropped: {err}");
    }
    true
}
