// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered image storage with stable, never-reused identities.
//!
//! [`ImageCollection`] is plain data: it knows nothing about the current slide,
//! timers, or rendering. Its order defines navigation order.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Stable identity of an image within one [`ImageCollection`].
///
/// Identities are minted by the collection in increasing order and are never
/// handed out twice, even after the image they named has been removed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageId(u64);

impl ImageId {
    /// Creates an id from a raw value.
    ///
    /// Hosts normally let the collection mint ids; this exists for callers that
    /// persist their own identities and pass them back through [`ImageInput::Item`].
    #[must_use]
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImageId").field(&self.0).finish()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img_{}", self.0)
    }
}

/// One image: an opaque source string plus its identity.
///
/// Items are immutable once created; replacing an image means removing it and
/// appending a new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageItem {
    id: ImageId,
    source: String,
}

impl ImageItem {
    /// The item's identity.
    #[must_use]
    #[inline]
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// The item's source (typically a URI).
    #[must_use]
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Input accepted by [`ImageCollection::set_all`].
///
/// Bare sources get a freshly minted id. Items that carry an id keep it unless
/// it collides with an id already used earlier in the same batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageInput {
    /// A bare source; the collection mints an id.
    Source(String),
    /// A source with a caller-supplied id.
    Item {
        /// Caller-chosen identity.
        id: ImageId,
        /// Image source.
        source: String,
    },
}

impl From<&str> for ImageInput {
    fn from(source: &str) -> Self {
        Self::Source(source.into())
    }
}

impl From<String> for ImageInput {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}

impl From<ImageItem> for ImageInput {
    fn from(item: ImageItem) -> Self {
        Self::Item {
            id: item.id,
            source: item.source,
        }
    }
}

/// An ordered sequence of [`ImageItem`]s with unique ids.
///
/// The collection carries a revision counter that bumps on every mutation that
/// changes contents, so observers can cheaply detect "something changed".
#[derive(Clone, Debug, Default)]
pub struct ImageCollection {
    items: Vec<ImageItem>,
    next_id: u64,
    revision: u64,
}

impl ImageCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            revision: 0,
        }
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in navigation order.
    #[must_use]
    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    /// Iterates over the items in navigation order.
    pub fn iter(&self) -> core::slice::Iter<'_, ImageItem> {
        self.items.iter()
    }

    /// Returns the item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageItem> {
        self.items.get(index)
    }

    /// Returns the current position of the item with `id`, if it is still present.
    #[must_use]
    pub fn index_of(&self, id: ImageId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Iterates over the sources in navigation order.
    pub fn sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(ImageItem::source)
    }

    /// Mutation counter; bumps whenever contents change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the whole collection.
    pub fn set_all<I>(&mut self, inputs: I)
    where
        I: IntoIterator,
        I::Item: Into<ImageInput>,
    {
        let inputs = inputs.into_iter();
        let mut items: Vec<ImageItem> = Vec::with_capacity(inputs.size_hint().0);
        for input in inputs {
            let item = match input.into() {
                ImageInput::Source(source) => ImageItem {
                    id: self.mint(),
                    source,
                },
                ImageInput::Item { id, source } => {
                    let id = if items.iter().any(|existing| existing.id == id) {
                        self.mint()
                    } else {
                        self.reserve(id);
                        id
                    };
                    ImageItem { id, source }
                }
            };
            items.push(item);
        }
        self.items = items;
        self.bump_revision();
    }

    /// Appends one image at the end and returns its new id.
    pub fn append(&mut self, source: impl Into<String>) -> ImageId {
        let id = self.mint();
        self.items.push(ImageItem {
            id,
            source: source.into(),
        });
        self.bump_revision();
        id
    }

    /// Removes and returns the item at `index`.
    ///
    /// Out-of-range indices are a no-op returning `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<ImageItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.bump_revision();
        Some(removed)
    }

    fn mint(&mut self) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Keeps the mint counter ahead of caller-supplied ids.
    fn reserve(&mut self, id: ImageId) {
        // `u64::MAX` has no successor; minting stays below it instead.
        if let Some(next) = id.0.checked_add(1) {
            self.next_id = self.next_id.max(next);
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a ImageCollection {
    type Item = &'a ImageItem;
    type IntoIter = core::slice::Iter<'a, ImageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
