// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration.
//!
//! [`CarouselOptions`] is the typed view. [`CarouselOptions::set`] is the
//! string-keyed entry point used by hosts that forward option changes by name
//! (for example from a settings panel or a JSON blob). Recognized keys are
//! coerced into their typed field; unknown keys are kept in
//! [`CarouselOptions::extra`] and otherwise ignored.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;

/// How the renderer animates between slides. Purely presentational.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransitionMode {
    /// Slides sit side by side on a track that translates.
    #[default]
    Slide,
    /// Slides are stacked and cross-fade.
    Fade,
    /// Slides scale in and out on a translating track.
    Zoom,
}

impl TransitionMode {
    /// The lowercase name used in option maps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Fade => "fade",
            Self::Zoom => "zoom",
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("slide") => Ok(Self::Slide),
            s if s.eq_ignore_ascii_case("fade") => Ok(Self::Fade),
            s if s.eq_ignore_ascii_case("zoom") => Ok(Self::Zoom),
            _ => Err(()),
        }
    }
}

/// A loosely typed option value as received from a host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer (milliseconds, indices).
    Int(i64),
    /// Free text (transition names, or numbers/flags spelled as text).
    Text(String),
}

impl OptionValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(i) => Some(*i != 0),
            Self::Text(t) => match t.trim() {
                "true" | "1" | "on" | "yes" => Some(true),
                "false" | "0" | "off" | "no" => Some(false),
                _ => None,
            },
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(t) => t.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    fn as_transition(&self) -> Option<TransitionMode> {
        match self {
            Self::Text(t) => t.parse().ok(),
            Self::Bool(_) | Self::Int(_) => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<TransitionMode> for OptionValue {
    fn from(value: TransitionMode) -> Self {
        Self::Text(value.name().into())
    }
}

/// Recognized option names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// `autoplay`
    Autoplay,
    /// `autoplayDelay`
    AutoplayDelay,
    /// `pauseOnHover`
    PauseOnHover,
    /// `loop`
    Loop,
    /// `lazyLoad`
    LazyLoad,
    /// `showThumbnails`
    ShowThumbnails,
    /// `startIndex`
    StartIndex,
    /// `transition`
    Transition,
}

impl OptionKey {
    /// All recognized keys.
    pub const ALL: [Self; 8] = [
        Self::Autoplay,
        Self::AutoplayDelay,
        Self::PauseOnHover,
        Self::Loop,
        Self::LazyLoad,
        Self::ShowThumbnails,
        Self::StartIndex,
        Self::Transition,
    ];

    /// The camelCase wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Autoplay => "autoplay",
            Self::AutoplayDelay => "autoplayDelay",
            Self::PauseOnHover => "pauseOnHover",
            Self::Loop => "loop",
            Self::LazyLoad => "lazyLoad",
            Self::ShowThumbnails => "showThumbnails",
            Self::StartIndex => "startIndex",
            Self::Transition => "transition",
        }
    }

    /// Looks up a key by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// A recognized key received a value of the wrong shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionError {
    /// The key being set.
    pub key: OptionKey,
    /// The rejected value.
    pub value: OptionValue,
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "option `{}` cannot take value {:?}",
            self.key.name(),
            self.value
        )
    }
}

impl core::error::Error for OptionError {}

/// A successfully applied option change, for side-effect routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionChange {
    /// A recognized key was set (possibly to its current value).
    Known(OptionKey),
    /// An unrecognized key was stored in [`CarouselOptions::extra`].
    Unknown(String),
}

/// Carousel configuration with the widget's defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CarouselOptions {
    /// Advance automatically on a timer.
    pub autoplay: bool,
    /// Timer period in milliseconds.
    pub autoplay_delay: u32,
    /// Hold autoplay while the pointer is over the carousel.
    pub pause_on_hover: bool,
    /// Wrap past either end instead of clamping.
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub loop_enabled: bool,
    /// Only materialize images near the current slide.
    pub lazy_load: bool,
    /// Render the thumbnail strip.
    pub show_thumbnails: bool,
    /// Index shown when the first images arrive.
    pub start_index: usize,
    /// Presentation style.
    pub transition: TransitionMode,
    /// Unrecognized options, kept for forward compatibility.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: HashMap<String, OptionValue>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay: 3000,
            pause_on_hover: true,
            loop_enabled: true,
            lazy_load: true,
            show_thumbnails: true,
            start_index: 0,
            transition: TransitionMode::Slide,
            extra: HashMap::new(),
        }
    }
}

impl CarouselOptions {
    /// Sets `autoplay`.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Sets `autoplayDelay`.
    #[must_use]
    pub fn with_autoplay_delay(mut self, autoplay_delay: u32) -> Self {
        self.autoplay_delay = autoplay_delay;
        self
    }

    /// Sets `pauseOnHover`.
    #[must_use]
    pub fn with_pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = pause_on_hover;
        self
    }

    /// Sets `loop`.
    #[must_use]
    pub fn with_loop(mut self, loop_enabled: bool) -> Self {
        self.loop_enabled = loop_enabled;
        self
    }

    /// Sets `lazyLoad`.
    #[must_use]
    pub fn with_lazy_load(mut self, lazy_load: bool) -> Self {
        self.lazy_load = lazy_load;
        self
    }

    /// Sets `showThumbnails`.
    #[must_use]
    pub fn with_thumbnails(mut self, show_thumbnails: bool) -> Self {
        self.show_thumbnails = show_thumbnails;
        self
    }

    /// Sets `startIndex`.
    #[must_use]
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Sets `transition`.
    #[must_use]
    pub fn with_transition(mut self, transition: TransitionMode) -> Self {
        self.transition = transition;
        self
    }

    /// Sets an option by wire name.
    ///
    /// Unknown keys are stored and reported as [`OptionChange::Unknown`].
    /// A recognized key with an uncoercible value leaves the options untouched
    /// and returns an [`OptionError`]. Negative delays and indices clamp to zero.
    pub fn set(&mut self, key: &str, value: OptionValue) -> Result<OptionChange, OptionError> {
        let Some(known) = OptionKey::from_name(key) else {
            self.extra.insert(key.to_string(), value);
            return Ok(OptionChange::Unknown(key.to_string()));
        };
        let applied = match known {
            OptionKey::Autoplay => value.as_bool().map(|v| self.autoplay = v),
            OptionKey::PauseOnHover => value.as_bool().map(|v| self.pause_on_hover = v),
            OptionKey::Loop => value.as_bool().map(|v| self.loop_enabled = v),
            OptionKey::LazyLoad => value.as_bool().map(|v| self.lazy_load = v),
            OptionKey::ShowThumbnails => value.as_bool().map(|v| self.show_thumbnails = v),
            OptionKey::AutoplayDelay => value
                .as_int()
                .map(|v| self.autoplay_delay = u32::try_from(v.max(0)).unwrap_or(u32::MAX)),
            OptionKey::StartIndex => value
                .as_int()
                .map(|v| self.start_index = usize::try_from(v.max(0)).unwrap_or(usize::MAX)),
            OptionKey::Transition => value.as_transition().map(|v| self.transition = v),
        };
        match applied {
            Some(()) => Ok(OptionChange::Known(known)),
            None => Err(OptionError { key: known, value }),
        }
    }

    /// Reads an option by wire name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<OptionValue> {
        let Some(known) = OptionKey::from_name(key) else {
            return self.extra.get(key).cloned();
        };
        Some(match known {
            OptionKey::Autoplay => self.autoplay.into(),
            OptionKey::AutoplayDelay => self.autoplay_delay.into(),
            OptionKey::PauseOnHover => self.pause_on_hover.into(),
            OptionKey::Loop => self.loop_enabled.into(),
            OptionKey::LazyLoad => self.lazy_load.into(),
            OptionKey::ShowThumbnails => self.show_thumbnails.into(),
            OptionKey::StartIndex => {
                OptionValue::Int(i64::try_from(self.start_index).unwrap_or(i64::MAX))
            }
            OptionKey::Transition => self.transition.into(),
        })
    }
}
