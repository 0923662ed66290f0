// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which images must be materialized (loaded) around the current slide.
//!
//! The window is `current - radius ..= current + radius`, intersected with the
//! collection bounds. Materialization is monotonic: an image that entered the
//! window once stays materialized, even after the current index moves away.
//! Tracking is keyed by [`ImageId`], so it survives removals that shift indices.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashSet;

use crate::collection::{ImageCollection, ImageId};

/// Default window radius: the current slide and its direct neighbours.
pub const DEFAULT_RADIUS: usize = 1;

/// Index range realized around `current` in a collection of `len` items.
#[must_use]
pub fn load_window(current: usize, len: usize, radius: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let current = current.min(len - 1);
    let start = current.saturating_sub(radius);
    let end = current.saturating_add(radius).saturating_add(1).min(len);
    start..end
}

/// Materialization bookkeeping for one carousel.
#[derive(Clone, Debug)]
pub struct LazyLoadPolicy {
    enabled: bool,
    radius: usize,
    materialized: HashSet<ImageId>,
}

impl Default for LazyLoadPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LazyLoadPolicy {
    /// Creates a policy with the default radius.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            radius: DEFAULT_RADIUS,
            materialized: HashSet::new(),
        }
    }

    /// Whether loading is deferred outside the window.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Window radius around the current index.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Returns `true` if the image has been materialized.
    #[must_use]
    pub fn is_materialized(&self, id: ImageId) -> bool {
        self.materialized.contains(&id)
    }

    /// Number of materialized images.
    #[must_use]
    pub fn materialized_len(&self) -> usize {
        self.materialized.len()
    }

    /// Indices of materialized images in the current collection order.
    #[must_use]
    pub fn materialized_indices(&self, images: &ImageCollection) -> Vec<usize> {
        images
            .iter()
            .enumerate()
            .filter(|(_, item)| self.materialized.contains(&item.id()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Turns lazy loading on or off.
    ///
    /// Turning it off materializes everything; turning it on never unloads.
    /// Returns the indices that became materialized.
    pub fn set_enabled(&mut self, enabled: bool, images: &ImageCollection) -> Vec<usize> {
        self.enabled = enabled;
        if enabled {
            Vec::new()
        } else {
            self.materialize_all(images)
        }
    }

    /// Recomputes after the current index changed.
    ///
    /// Returns the indices that entered the materialized set.
    pub fn realize(&mut self, images: &ImageCollection, current: Option<usize>) -> Vec<usize> {
        if !self.enabled {
            return self.materialize_all(images);
        }
        let Some(current) = current else {
            return Vec::new();
        };
        let window = load_window(current, images.len(), self.radius);
        let mut fresh = Vec::new();
        for index in window {
            if let Some(item) = images.get(index) {
                if self.materialized.insert(item.id()) {
                    fresh.push(index);
                }
            }
        }
        fresh
    }

    /// Drops bookkeeping for images that are no longer in the collection.
    pub fn retain_present(&mut self, images: &ImageCollection) {
        if self.materialized.is_empty() {
            return;
        }
        let present: HashSet<ImageId> = images.iter().map(|item| item.id()).collect();
        self.materialized.retain(|id| present.contains(id));
    }

    fn materialize_all(&mut self, images: &ImageCollection) -> Vec<usize> {
        images
            .iter()
            .enumerate()
            .filter(|(_, item)| self.materialized.insert(item.id()))
            .map(|(index, _)| index)
            .collect()
    }
}
