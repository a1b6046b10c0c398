// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel controller: sequences measure and arrange passes over the calculators.

use core::num::NonZeroUsize;

use kurbo::{Affine, Size};

use crate::arrange::arrange_realized;
use crate::layout::{compute_extent, compute_metrics, count_as_f64, effective_columns, row_of};
use crate::range::compute_visible_range;
use crate::{
    CellGeometry, GridConfiguration, GridVisual, ItemGenerator, PanelOptions, RealizeReport,
    RealizedSet, ScrollInfo, ScrollState, VisibleRange,
};

bitflags::bitflags! {
    /// Work a panel still owes its host.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The visible range must be recomputed and realized.
        const MEASURE     = 0b0000_0001;
        /// Realized visuals must be placed again.
        const ARRANGE     = 0b0000_0010;
        /// Extent, viewport, or offset changed since the scrollbar owner last looked.
        const SCROLL_INFO = 0b0000_0100;
    }
}

/// Errors returned by [`UniformGridPanel`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// The index is not backed by a realized visual.
    #[error("index {index} is out of range for {len} realized visuals")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Realized visual count at the time of the request.
        len: usize,
    },
}

/// Result of draining a panel with [`UniformGridPanel::layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOutcome {
    /// Measure/arrange rounds performed.
    pub passes: usize,
    /// `false` if the pass limit was hit while work was still pending.
    pub settled: bool,
    /// Desired size reported by the last measure pass.
    pub desired: Size,
}

/// A virtualizing panel that lays its items out in a uniform grid.
///
/// Items are flowed left to right, `columns` per row, and scrolled vertically.
/// Only the cells intersecting the viewport own a visual; the host's
/// [`ItemGenerator`] creates those visuals and gets back the ones that
/// scrolled out.
///
/// The panel is driven by the host:
/// - input handlers call the scroll operations, which only mark the panel
///   dirty,
/// - the host then calls [`UniformGridPanel::layout`] (or `measure` followed by
///   `arrange`) until nothing is pending,
/// - the scrollbar owner polls [`UniformGridPanel::take_scroll_info_change`],
/// - the renderer draws the realized visuals under
///   [`UniformGridPanel::translation`].
#[derive(Debug)]
pub struct UniformGridPanel<V> {
    options: PanelOptions,
    config: GridConfiguration,
    scroll: ScrollState,
    cell: CellGeometry,
    columns: NonZeroUsize,
    realized: RealizedSet<V>,
    render_size: Size,
    measured_size: Option<Size>,
    visible: Option<VisibleRange>,
    last_report: Option<RealizeReport>,
    invalidation: Invalidation,
}

impl<V: GridVisual> UniformGridPanel<V> {
    /// Creates a panel with default [`PanelOptions`].
    #[must_use]
    pub fn new(config: GridConfiguration) -> Self {
        Self::with_options(config, PanelOptions::default())
    }

    /// Creates a panel with explicit options.
    #[must_use]
    pub fn with_options(config: GridConfiguration, options: PanelOptions) -> Self {
        Self {
            scroll: ScrollState::new(options.scroll_step, options.scroll_policy),
            options,
            columns: config.columns_non_zero(),
            config,
            cell: CellGeometry::INITIAL,
            realized: RealizedSet::new(),
            render_size: Size::ZERO,
            measured_size: None,
            visible: None,
            last_report: None,
            invalidation: Invalidation::MEASURE | Invalidation::ARRANGE,
        }
    }

    /// Options the panel was created with.
    #[must_use]
    pub const fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Current grid configuration.
    #[must_use]
    pub const fn configuration(&self) -> GridConfiguration {
        self.config
    }

    /// Applies a new configuration and returns to the top.
    ///
    /// The home position is set directly, without going through the scroll policy.
    pub fn set_configuration(&mut self, config: GridConfiguration) {
        if config != self.config {
            log::debug!("grid configuration {} -> {}", self.config, config);
            self.config = config;
        }
        if self.scroll.scroll_to_home() {
            self.invalidation |= Invalidation::SCROLL_INFO;
        }
        self.invalidation |= Invalidation::MEASURE | Invalidation::ARRANGE;
    }

    /// Cell geometry computed by the last measure pass.
    #[must_use]
    pub const fn cell_geometry(&self) -> CellGeometry {
        self.cell
    }

    /// Effective column count computed by the last measure pass.
    #[must_use]
    pub const fn columns(&self) -> NonZeroUsize {
        self.columns
    }

    /// Size given to the last arrange pass.
    #[must_use]
    pub const fn render_size(&self) -> Size {
        self.render_size
    }

    /// Realized visuals, ordered by item index.
    #[must_use]
    pub const fn realized(&self) -> &RealizedSet<V> {
        &self.realized
    }

    /// Range realized by the last measure pass, or `None` if that pass had
    /// degenerate geometry.
    #[must_use]
    pub const fn visible_range(&self) -> Option<VisibleRange> {
        self.visible
    }

    /// What the last realization pass did.
    #[must_use]
    pub fn last_report(&self) -> Option<&RealizeReport> {
        self.last_report.as_ref()
    }

    /// Pending work.
    #[must_use]
    pub const fn invalidation(&self) -> Invalidation {
        self.invalidation
    }

    /// Returns `true` if a measure or arrange pass is pending.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        self.invalidation
            .intersects(Invalidation::MEASURE.union(Invalidation::ARRANGE))
    }

    /// Marks the item source as changed.
    pub fn invalidate_items(&mut self) {
        self.invalidation |= Invalidation::MEASURE | Invalidation::ARRANGE;
    }

    /// Scroll state, read-only.
    #[must_use]
    pub const fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Snapshot of extent, viewport, and offset.
    #[must_use]
    pub const fn scroll_info(&self) -> ScrollInfo {
        self.scroll.info()
    }

    /// Returns a snapshot if the scroll info changed since the last call.
    pub fn take_scroll_info_change(&mut self) -> Option<ScrollInfo> {
        if !self.invalidation.contains(Invalidation::SCROLL_INFO) {
            return None;
        }
        self.invalidation.remove(Invalidation::SCROLL_INFO);
        Some(self.scroll.info())
    }

    /// Current vertical offset.
    #[must_use]
    pub const fn vertical_offset(&self) -> f64 {
        self.scroll.vertical_offset()
    }

    /// Transform to apply to realized visuals when rendering.
    #[must_use]
    pub fn translation(&self) -> Affine {
        self.scroll.translation()
    }

    /// Measure pass.
    ///
    /// Recomputes columns and cell geometry for `available`, refreshes the
    /// extent and viewport, and realizes exactly the visible cells. Returns the
    /// desired size, which is `available` with unconstrained dimensions
    /// reported as zero.
    pub fn measure<G>(&mut self, available: Size, generator: &mut G) -> Size
    where
        G: ItemGenerator<Visual = V>,
    {
        let margin = self.realized.sample_margin();
        let metrics = compute_metrics(
            available,
            &self.config,
            self.options.min_content_width,
            margin,
        );
        self.columns = metrics.columns;
        self.cell = metrics.cell;
        self.measured_size = Some(available);

        let count = generator.item_count();
        self.update_scroll_info(available, metrics.columns, count);
        if self.scroll.clamp_to_content() {
            log::debug!(
                "vertical offset clamped to {}",
                self.scroll.vertical_offset()
            );
            self.invalidation |= Invalidation::SCROLL_INFO;
        }

        let range = if self.cell.is_degenerate() {
            None
        } else {
            compute_visible_range(
                self.scroll.vertical_offset(),
                self.scroll.viewport().height,
                self.cell.height,
                self.columns,
                count,
            )
        };
        log::trace!(
            "measure {available:?}: {} columns, cell {:?}, range {range:?}",
            self.columns,
            self.cell
        );

        match range {
            Some(range) => {
                let report = self.realized.realize_range(range, self.cell, generator);
                if report.changed() {
                    log::debug!(
                        "realized {} and recycled {} visuals for {}..{}",
                        report.realized.len(),
                        report.recycled.len(),
                        range.start,
                        range.end
                    );
                }
                self.last_report = Some(report);
            }
            None => {
                log::trace!("degenerate cell {:?}; realization skipped", self.cell);
            }
        }
        self.visible = range;

        self.invalidation.remove(Invalidation::MEASURE);
        self.invalidation |= Invalidation::ARRANGE;
        Size::new(finite_or_zero(available.width), finite_or_zero(available.height))
    }

    /// Arrange pass.
    ///
    /// Columns are recomputed from `final_size`, which may differ from the
    /// size measured against. A zero final width, reported after an
    /// unconstrained measure, keeps the measured columns. A change of render
    /// size re-applies the current offset through the scroll policy.
    pub fn arrange(&mut self, final_size: Size, item_count: usize) -> Size {
        let columns = if final_size.width > 0.0 {
            effective_columns(
                final_size.width,
                &self.config,
                self.options.min_content_width,
                self.realized.sample_margin(),
            )
        } else {
            self.columns
        };
        self.update_scroll_info(final_size, columns, item_count);
        arrange_realized(&mut self.realized, columns, final_size.width, self.cell);
        self.invalidation.remove(Invalidation::ARRANGE);

        if final_size != self.render_size {
            self.on_render_size_changed(final_size);
        }
        final_size
    }

    /// Runs measure and arrange passes until nothing is pending.
    ///
    /// Each round measures against `available` and arranges at the desired
    /// size. An `available` size different from the last measured one is
    /// itself pending work. Gives up after [`PanelOptions::max_layout_passes`]
    /// rounds.
    pub fn layout<G>(&mut self, available: Size, generator: &mut G) -> LayoutOutcome
    where
        G: ItemGenerator<Visual = V>,
    {
        if self.measured_size != Some(available) {
            log::trace!("available size {:?} -> {available:?}", self.measured_size);
            self.invalidation |= Invalidation::MEASURE | Invalidation::ARRANGE;
        }
        let mut passes = 0;
        let mut desired = Size::new(
            finite_or_zero(available.width),
            finite_or_zero(available.height),
        );
        while self.needs_layout() {
            if passes >= self.options.max_layout_passes {
                log::warn!(
                    "layout did not settle after {passes} passes ({:?} pending)",
                    self.invalidation
                );
                return LayoutOutcome {
                    passes,
                    settled: false,
                    desired,
                };
            }
            passes += 1;
            if self.invalidation.contains(Invalidation::MEASURE) {
                desired = self.measure(available, generator);
            }
            if self.invalidation.contains(Invalidation::ARRANGE) {
                self.arrange(desired, generator.item_count());
            }
        }
        LayoutOutcome {
            passes,
            settled: true,
            desired,
        }
    }

    /// Releases every realized visual and returns to the top.
    ///
    /// Returns the number of visuals released.
    pub fn clear<G>(&mut self, generator: &mut G) -> usize
    where
        G: ItemGenerator<Visual = V>,
    {
        let released = self.realized.clear(generator);
        log::debug!("cleared {released} realized visuals");
        self.visible = None;
        self.last_report = None;
        let moved = self.scroll.scroll_to_home();
        self.scrolled(moved);
        self.invalidation |= Invalidation::MEASURE | Invalidation::ARRANGE;
        released
    }

    /// Requests a vertical offset under the panel's scroll policy.
    pub fn set_vertical_offset(&mut self, offset: f64) -> bool {
        let moved = self.scroll.set_vertical_offset(offset);
        self.scrolled(moved)
    }

    /// Scrolls up by one line step.
    pub fn line_up(&mut self) -> bool {
        let moved = self.scroll.line_up();
        self.scrolled(moved)
    }

    /// Scrolls down by one line step.
    pub fn line_down(&mut self) -> bool {
        let moved = self.scroll.line_down();
        self.scrolled(moved)
    }

    /// Scrolls up by one wheel notch.
    pub fn wheel_up(&mut self) -> bool {
        let moved = self.scroll.wheel_up();
        self.scrolled(moved)
    }

    /// Scrolls down by one wheel notch.
    pub fn wheel_down(&mut self) -> bool {
        let moved = self.scroll.wheel_down();
        self.scrolled(moved)
    }

    /// Scrolls up by one viewport.
    pub fn page_up(&mut self) -> bool {
        let moved = self.scroll.page_up();
        self.scrolled(moved)
    }

    /// Scrolls down by one viewport.
    pub fn page_down(&mut self) -> bool {
        let moved = self.scroll.page_down();
        self.scrolled(moved)
    }

    /// Jumps to the top.
    pub fn scroll_to_home(&mut self) -> bool {
        let moved = self.scroll.scroll_to_home();
        self.scrolled(moved)
    }

    /// Requests the offset of the row holding `index`.
    ///
    /// `index` must be below the number of realized visuals. The columns are
    /// recomputed from the render size, and the request goes through the
    /// scroll policy: under [`ScrollPolicy::Paged`](crate::ScrollPolicy::Paged)
    /// the panel moves a whole viewport toward that row instead of landing on it.
    pub fn bring_index_into_view(&mut self, index: usize) -> Result<(), PanelError> {
        let len = self.realized.len();
        if index >= len {
            return Err(PanelError::IndexOutOfRange { index, len });
        }
        let columns = effective_columns(
            self.render_size.width,
            &self.config,
            self.options.min_content_width,
            self.realized.sample_margin(),
        );
        let row = row_of(index, columns);
        self.set_vertical_offset(count_as_f64(row) * self.cell.height);
        Ok(())
    }

    fn on_render_size_changed(&mut self, size: Size) {
        log::trace!("render size {:?} -> {size:?}", self.render_size);
        self.render_size = size;
        let current = self.scroll.vertical_offset();
        self.set_vertical_offset(current);
    }

    fn update_scroll_info(&mut self, viewport: Size, columns: NonZeroUsize, count: usize) {
        let extent = compute_extent(columns, self.cell, count);
        if self.scroll.update(extent, viewport) {
            log::trace!("extent {extent:?}, viewport {viewport:?}");
            self.invalidation |= Invalidation::SCROLL_INFO;
        }
    }

    fn scrolled(&mut self, moved: bool) -> bool {
        if moved {
            log::debug!("vertical offset now {}", self.scroll.vertical_offset());
            self.invalidation |= Invalidation::all();
        }
        moved
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
