// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared output-slot counter for the parallel treelet build.

use core::ops::Range;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Hands out disjoint, contiguous ranges of an output array to concurrent writers.
///
/// This is the only shared mutable state in the HLBVH build: every leaf emitted
/// by any treelet reserves its slots here with a single fetch-and-add.
#[derive(Debug, Default)]
pub(crate) struct AtomicOffset(AtomicUsize);

impl AtomicOffset {
    pub(crate) const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    /// Reserve `n` consecutive slots and return them.
    pub(crate) fn reserve(&self, n: usize) -> Range<usize> {
        // Ranges only need to be disjoint; the rayon join publishes the writes.
        let start = self.0.fetch_add(n, Ordering::Relaxed);
        start..start + n
    }

    /// Total number of slots reserved so far.
    pub(crate) fn into_inner(self) -> usize {
        self.0.into_inner()
    }
}
