// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout calculator: effective column/row counts, cell geometry, and extent.
//!
//! The grid scrolls vertically over *rows* while the backing items are a flat
//! sequence of *cells* indexed `0..len`:
//!
//! - Each row holds `columns` cells, where `columns` is the configured column
//!   count reduced to what fits into the available width.
//! - The row count is taken from the configuration as-is; it only decides how
//!   tall a cell is (`available height / rows`), never how many rows exist.
//! - Cell `i` sits in row `i / columns` and column `i % columns`.
//!
//! Everything here is a pure function of its inputs so the measure and arrange
//! passes can call it with different sizes.

use core::num::NonZeroUsize;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Insets, Size};

use crate::GridConfiguration;

/// Size of a single cell box, as used by measurement and arrangement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellGeometry {
    /// Width of a cell, including its margin.
    pub width: f64,
    /// Height of a cell.
    pub height: f64,
}

impl CellGeometry {
    /// Geometry used before the first measure pass.
    pub const INITIAL: Self = Self {
        width: 0.0,
        height: 10.0,
    };

    /// Creates a cell geometry.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the geometry as a [`Size`].
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns `true` if cells cannot be realized with this geometry.
    ///
    /// A width may be infinite, which is what an unconstrained measure
    /// produces. The height must be finite and positive.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let width_ok = self.width > 0.0;
        let height_ok = self.height.is_finite() && self.height > 0.0;
        !width_ok || !height_ok
    }

    /// The box a cell's content is measured against: the cell minus its
    /// horizontal margin.
    #[must_use]
    pub fn content_size(&self, margin: Insets) -> Size {
        Size::new((self.width - margin.x0 - margin.x1).max(0.0), self.height)
    }
}

/// Result of one layout calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridMetrics {
    /// Columns actually laid out.
    pub columns: NonZeroUsize,
    /// Rows per viewport.
    pub rows: NonZeroUsize,
    /// Per-cell box.
    pub cell: CellGeometry,
}

/// Number of columns laid out for `available_width`.
///
/// An unconstrained (infinite) width uses the configured column count. Otherwise
/// as many cells of `min_content_width` plus horizontal margin as fit are used,
/// at least one and at most the configured count.
#[must_use]
pub fn effective_columns(
    available_width: f64,
    config: &GridConfiguration,
    min_content_width: f64,
    margin: Insets,
) -> NonZeroUsize {
    if available_width.is_infinite() {
        return config.columns_non_zero();
    }
    let item_total_width = min_content_width + margin.x0 + margin.x1;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to integer casts saturate and the result is clamped to the configured count"
    )]
    let fitting = (available_width / item_total_width).floor() as usize;
    let fitting = NonZeroUsize::new(fitting).unwrap_or(NonZeroUsize::MIN);
    fitting.min(config.columns_non_zero())
}

/// Number of rows per viewport; rows are not reflowed by the available height.
#[must_use]
pub const fn effective_rows(config: &GridConfiguration) -> NonZeroUsize {
    config.rows_non_zero()
}

/// Computes the effective columns/rows and the cell box for `available`.
#[must_use]
pub fn compute_metrics(
    available: Size,
    config: &GridConfiguration,
    min_content_width: f64,
    margin: Insets,
) -> GridMetrics {
    let columns = effective_columns(available.width, config, min_content_width, margin);
    let rows = effective_rows(config);
    let cell = CellGeometry {
        width: available.width / count_as_f64(columns.get()),
        height: available.height / count_as_f64(rows.get()),
    };
    GridMetrics {
        columns,
        rows,
        cell,
    }
}

/// Total content size for `item_count` cells laid out `columns` per row.
#[must_use]
pub fn compute_extent(columns: NonZeroUsize, cell: CellGeometry, item_count: usize) -> Size {
    Size::new(
        count_as_f64(columns.get()) * cell.width,
        cell.height * count_as_f64(row_count(item_count, columns)),
    )
}

/// Number of rows needed to hold `item_count` cells.
#[must_use]
pub const fn row_count(item_count: usize, columns: NonZeroUsize) -> usize {
    item_count.div_ceil(columns.get())
}

/// Row containing cell `index`.
#[must_use]
pub const fn row_of(index: usize, columns: NonZeroUsize) -> usize {
    index / columns.get()
}

/// Column of cell `index` within its row.
#[must_use]
pub const fn column_of(index: usize, columns: NonZeroUsize) -> usize {
    index % columns.get()
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Item counts stay far below 2^52"
)]
pub(crate) const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use kurbo::{Insets, Size};

    use super::{
        CellGeometry, column_of, compute_extent, compute_metrics, effective_columns, row_count,
        row_of,
    };
    use crate::GridConfiguration;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn unconstrained_width_uses_configured_columns() {
        let config = GridConfiguration::new(2, 5).unwrap();
        let columns = effective_columns(f64::INFINITY, &config, 100.0, Insets::ZERO);
        assert_eq!(columns.get(), 5);
    }

    #[test]
    fn narrow_width_shows_fewer_columns_never_more() {
        let config = GridConfiguration::new(3, 3).unwrap();

        // 900 / 100 = 9 fit, capped at 3.
        assert_eq!(effective_columns(900.0, &config, 100.0, Insets::ZERO).get(), 3);
        // 250 / 100 = 2.5 → 2.
        assert_eq!(effective_columns(250.0, &config, 100.0, Insets::ZERO).get(), 2);
        // Never below one, even when nothing fits.
        assert_eq!(effective_columns(40.0, &config, 100.0, Insets::ZERO).get(), 1);
        assert_eq!(effective_columns(0.0, &config, 100.0, Insets::ZERO).get(), 1);
    }

    #[test]
    fn horizontal_margin_counts_towards_column_fit() {
        let config = GridConfiguration::new(1, 4).unwrap();
        // 100 + 5 + 5 = 110 per item; 330 / 110 = 3.
        let margin = Insets::new(5.0, 20.0, 5.0, 20.0);
        assert_eq!(effective_columns(330.0, &config, 100.0, margin).get(), 3);
        assert_eq!(effective_columns(329.0, &config, 100.0, margin).get(), 2);
    }

    #[test]
    fn metrics_split_available_size_evenly() {
        let config = GridConfiguration::new(3, 3).unwrap();
        let metrics = compute_metrics(Size::new(900.0, 600.0), &config, 100.0, Insets::ZERO);
        assert_eq!(metrics.columns.get(), 3);
        assert_eq!(metrics.rows.get(), 3);
        assert_eq!(metrics.cell, CellGeometry::new(300.0, 200.0));
    }

    #[test]
    fn extent_covers_partial_last_row() {
        // 31 cells, 3 per row → 11 rows.
        let extent = compute_extent(nz(3), CellGeometry::new(300.0, 200.0), 31);
        assert_eq!(extent, Size::new(900.0, 2200.0));

        // Single column of 400px cells.
        let extent = compute_extent(nz(1), CellGeometry::new(400.0, 400.0), 31);
        assert_eq!(extent.height, 12400.0);

        // No items, no height.
        let extent = compute_extent(nz(3), CellGeometry::new(300.0, 200.0), 0);
        assert_eq!(extent.height, 0.0);
    }

    #[test]
    fn cell_to_row_and_column_mapping() {
        assert_eq!(row_count(10, nz(4)), 3);
        assert_eq!(row_of(0, nz(4)), 0);
        assert_eq!(row_of(3, nz(4)), 0);
        assert_eq!(row_of(4, nz(4)), 1);
        assert_eq!(column_of(4, nz(4)), 0);
        assert_eq!(column_of(7, nz(4)), 3);
    }

    #[test]
    fn degenerate_geometry_is_detected() {
        assert!(CellGeometry::new(0.0, 10.0).is_degenerate());
        assert!(CellGeometry::new(10.0, 0.0).is_degenerate());
        assert!(CellGeometry::new(-5.0, 10.0).is_degenerate());
        assert!(CellGeometry::new(f64::NAN, 10.0).is_degenerate());
        assert!(CellGeometry::new(10.0, f64::INFINITY).is_degenerate());
        assert!(CellGeometry::new(10.0, f64::NAN).is_degenerate());
        assert!(!CellGeometry::new(10.0, 10.0).is_degenerate());
        // Unconstrained width still realizes rows.
        assert!(!CellGeometry::new(f64::INFINITY, 10.0).is_degenerate());
    }

    #[test]
    fn content_size_subtracts_horizontal_margin_only() {
        let cell = CellGeometry::new(300.0, 200.0);
        let content = cell.content_size(Insets::new(10.0, 7.0, 20.0, 7.0));
        assert_eq!(content, Size::new(270.0, 200.0));
        // Margins wider than the cell collapse to zero.
        let content = cell.content_size(Insets::uniform(200.0));
        assert_eq!(content.width, 0.0);
    }
}
