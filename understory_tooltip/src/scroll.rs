// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll offset tracking for tooltips anchored inside a scrollable ancestor.

/// Turns absolute scroll offsets into deltas.
///
/// The first offset only sets the baseline unless one was given up front.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSync {
    last: Option<f64>,
}

impl ScrollSync {
    /// Starts from a known scroll offset.
    #[must_use]
    pub fn with_baseline(offset: f64) -> Self {
        Self { last: Some(offset) }
    }

    /// Records `offset`, returning how far it moved since the last one.
    pub fn update(&mut self, offset: f64) -> Option<f64> {
        let delta = self.last.map(|last| offset - last);
        self.last = Some(offset);
        delta
    }

    /// The last recorded offset.
    #[must_use]
    pub fn offset(&self) -> Option<f64> {
        self.last
    }
}
