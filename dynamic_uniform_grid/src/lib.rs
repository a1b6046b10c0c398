// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic Uniform Grid: a virtualizing, vertically scrolling uniform grid panel.
//!
//! Items are a flat sequence indexed `0..len`. The panel flows them into rows of
//! equally sized cells and only keeps visuals alive for the cells that intersect
//! the viewport, so a layout pass costs time proportional to what is visible,
//! never to the item count.
//!
//! The pieces, each usable on its own:
//!
//! - [`compute_metrics`] / [`compute_extent`]: the layout calculator. Picks how
//!   many columns fit the available width (never more than configured), splits
//!   the available size into cells, and sizes the scrollable content.
//! - [`compute_visible_range`]: maps a vertical offset onto the half-open range
//!   of cells covered by the viewport, whole rows at a time.
//! - [`RealizedSet`]: realizes the visible range through a host
//!   [`ItemGenerator`] and hands everything else back to it.
//! - [`cell_rect`] / [`arrange_realized`]: places realized visuals at their
//!   row/column slot.
//! - [`ScrollState`]: extent, viewport, and offset, with line/wheel/page steps
//!   and a [`ScrollPolicy`] deciding how requests become offsets.
//! - [`UniformGridPanel`]: ties these together into measure and arrange passes,
//!   tracking pending work in [`Invalidation`] flags that the host drains with
//!   [`UniformGridPanel::layout`].
//!
//! The panel knows nothing about any widget system. Host frameworks are
//! responsible for:
//!
//! - Implementing [`GridVisual`] for their cell views and [`ItemGenerator`]
//!   for their item source.
//! - Forwarding input to the scroll operations and running layout afterwards.
//! - Rendering realized visuals under [`UniformGridPanel::translation`].
//!
//! ## Minimal example
//!
//! ```rust
//! use dynamic_uniform_grid::{
//!     GenerateError, GridConfiguration, GridVisual, ItemGenerator, UniformGridPanel,
//! };
//! use kurbo::{Rect, Size};
//!
//! struct Tile {
//!     bounds: Rect,
//! }
//!
//! impl GridVisual for Tile {
//!     fn measure(&mut self, available: Size) -> Size {
//!         available
//!     }
//!
//!     fn arrange(&mut self, rect: Rect) {
//!         self.bounds = rect;
//!     }
//! }
//!
//! struct Tiles(usize);
//!
//! impl ItemGenerator for Tiles {
//!     type Visual = Tile;
//!
//!     fn item_count(&self) -> usize {
//!         self.0
//!     }
//!
//!     fn realize(&mut self, _index: usize) -> Result<Tile, GenerateError> {
//!         Ok(Tile { bounds: Rect::ZERO })
//!     }
//!
//!     fn release(&mut self, _index: usize, _visual: Tile) {}
//! }
//!
//! let config: GridConfiguration = "3,3".parse().unwrap();
//! let mut panel = UniformGridPanel::new(config);
//! let mut tiles = Tiles(31);
//!
//! panel.layout(Size::new(900.0, 900.0), &mut tiles);
//! assert_eq!(panel.realized().len(), 9);
//!
//! // Paging moves a whole viewport and realizes the next nine cells.
//! panel.page_down();
//! panel.layout(Size::new(900.0, 900.0), &mut tiles);
//! assert_eq!(panel.realized().indices().next(), Some(9));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo` and `log`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arrange;
mod config;
mod layout;
mod panel;
mod range;
mod realize;
mod scroll;

#[cfg(test)]
mod testing;

pub use arrange::{arrange_realized, cell_rect, slot_width};
pub use config::{
    Axis, ConfigError, DEFAULT_MAX_LAYOUT_PASSES, DEFAULT_MIN_CONTENT_WIDTH, DEFAULT_SCROLL_STEP,
    GridConfiguration, PanelOptions, ScrollPolicy,
};
pub use layout::{
    CellGeometry, GridMetrics, column_of, compute_extent, compute_metrics, effective_columns,
    effective_rows, row_count, row_of,
};
pub use panel::{Invalidation, LayoutOutcome, PanelError, UniformGridPanel};
pub use range::{VisibleRange, compute_visible_range};
pub use realize::{
    GenerateError, GridVisual, ItemGenerator, RealizeReport, RealizedSet, RealizedVisual,
};
pub use scroll::{ScrollInfo, ScrollState};
