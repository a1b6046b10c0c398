// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arranger: places realized cells at their row/column slots.

use core::num::NonZeroUsize;

use kurbo::Rect;

use crate::layout::{column_of, count_as_f64, row_of};
use crate::{CellGeometry, GridVisual, RealizedSet};

/// Width of one column slot when `final_width` is split into `columns`.
#[must_use]
pub fn slot_width(final_width: f64, columns: NonZeroUsize) -> f64 {
    final_width / count_as_f64(columns.get())
}

/// Content-space rectangle of cell `index`.
///
/// The cell is `cell.width × cell.height`, centered horizontally in its column
/// slot when the slot is wider than the cell, and stacked at `row * cell.height`.
/// A cell measured against an unconstrained width takes the slot width.
#[must_use]
pub fn cell_rect(
    index: usize,
    columns: NonZeroUsize,
    final_width: f64,
    cell: CellGeometry,
) -> Rect {
    let slot = slot_width(final_width, columns);
    let width = if cell.width.is_finite() { cell.width } else { slot };
    let x = count_as_f64(column_of(index, columns)) * slot + (slot - width) / 2.0;
    let y = count_as_f64(row_of(index, columns)) * cell.height;
    Rect::from_origin_size((x, y), (width, cell.height))
}

/// Arranges every realized visual for a pass with `final_width`.
pub fn arrange_realized<V: GridVisual>(
    realized: &mut RealizedSet<V>,
    columns: NonZeroUsize,
    final_width: f64,
    cell: CellGeometry,
) {
    for entry in realized.iter_mut() {
        let rect = cell_rect(entry.index, columns, final_width, cell);
        entry.visual.arrange(rect);
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use kurbo::{Point, Rect};

    use super::{cell_rect, slot_width};
    use crate::CellGeometry;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn cells_fill_their_slots_when_widths_match() {
        let cell = CellGeometry::new(300.0, 200.0);
        assert_eq!(slot_width(900.0, nz(3)), 300.0);
        assert_eq!(
            cell_rect(0, nz(3), 900.0, cell),
            Rect::new(0.0, 0.0, 300.0, 200.0)
        );
        assert_eq!(
            cell_rect(4, nz(3), 900.0, cell),
            Rect::new(300.0, 200.0, 600.0, 400.0)
        );
        assert_eq!(
            cell_rect(8, nz(3), 900.0, cell),
            Rect::new(600.0, 400.0, 900.0, 600.0)
        );
    }

    #[test]
    fn narrow_cells_are_centered_in_wider_slots() {
        // Slots are 300 wide, cells only 200.
        let cell = CellGeometry::new(200.0, 100.0);
        assert_eq!(
            cell_rect(1, nz(3), 900.0, cell),
            Rect::new(350.0, 0.0, 550.0, 100.0)
        );
        assert_eq!(
            cell_rect(3, nz(3), 900.0, cell),
            Rect::new(50.0, 100.0, 250.0, 200.0)
        );
    }

    #[test]
    fn column_count_change_reassigns_rows_and_columns() {
        let cell = CellGeometry::new(300.0, 100.0);
        // Index 4 is row 1, column 1 with three columns…
        assert_eq!(cell_rect(4, nz(3), 900.0, cell).origin(), Point::new(300.0, 100.0));
        // …and row 2, column 0 with two.
        assert_eq!(cell_rect(4, nz(2), 600.0, cell).origin(), Point::new(0.0, 200.0));
    }

    #[test]
    fn unconstrained_cell_width_takes_the_slot() {
        let cell = CellGeometry::new(f64::INFINITY, 100.0);
        assert_eq!(
            cell_rect(4, nz(3), 900.0, cell),
            Rect::new(300.0, 100.0, 600.0, 200.0)
        );
        // Arranged at a zero width, the cell collapses but stays finite.
        let rect = cell_rect(4, nz(3), 0.0, cell);
        assert!(!rect.is_nan());
        assert_eq!(rect, Rect::new(0.0, 100.0, 0.0, 200.0));
    }
}
