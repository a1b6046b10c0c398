// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-range resolver.

use core::num::NonZeroUsize;
use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Cells covered by the viewport, as a half-open index range.
///
/// Whole rows are always included: a row that is only partially inside the
/// viewport contributes all of its cells. `start > end` is allowed and, like
/// `start == end`, denotes an empty range; it happens when the offset points
/// past the last item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// First visible index (inclusive).
    pub start: usize,
    /// One past the last visible index (exclusive), clamped to the item count.
    pub end: usize,
}

impl VisibleRange {
    /// The empty range at index zero.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Returns `true` if no index is visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of visible indices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if `index` is inside the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// First visible index, if any.
    #[must_use]
    pub const fn first(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.start)
        }
    }

    /// Last visible index (inclusive), if any.
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    /// The visible indices as a [`Range`]; empty when the range is empty.
    #[must_use]
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end.max(self.start)
    }
}

/// Compute which cells a viewport covers.
///
/// - `offset_y`: top of the viewport in content coordinates, already clamped to
///   the scrollable range.
/// - `viewport_height`: height of the viewport.
/// - `cell_height`: height of one row.
/// - `columns`: cells per row.
/// - `item_count`: total number of cells.
///
/// The first index is the first cell of the row containing `offset_y`; the end
/// is the end of the row containing the bottom edge of the viewport, clamped to
/// `item_count`.
///
/// Returns `None` when `cell_height` is zero, negative, or not finite: there is
/// no meaningful row mapping and the caller should skip realization for this
/// pass.
#[must_use]
pub fn compute_visible_range(
    offset_y: f64,
    viewport_height: f64,
    cell_height: f64,
    columns: NonZeroUsize,
    item_count: usize,
) -> Option<VisibleRange> {
    if cell_height.is_nan() || cell_height <= 0.0 || cell_height.is_infinite() {
        return None;
    }
    if item_count == 0 {
        return Some(VisibleRange::EMPTY);
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to integer casts saturate; rows beyond the item count are clamped below"
    )]
    let (first_row, end_row) = (
        (offset_y / cell_height).floor() as usize,
        ((offset_y + viewport_height) / cell_height).ceil() as usize,
    );

    let columns = columns.get();
    Some(VisibleRange {
        start: first_row.saturating_mul(columns),
        end: end_row.saturating_mul(columns).min(item_count),
    })
}
