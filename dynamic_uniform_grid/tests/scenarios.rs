// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end layout scenarios driven through the public panel API.

use dynamic_uniform_grid::{
    GenerateError, GridConfiguration, GridVisual, ItemGenerator, PanelOptions, ScrollPolicy,
    UniformGridPanel, VisibleRange, cell_rect,
};
use kurbo::{Rect, Size};
use rstest::{fixture, rstest};

#[derive(Debug)]
struct Tile {
    id: u64,
    bounds: Option<Rect>,
}

impl GridVisual for Tile {
    fn measure(&mut self, available: Size) -> Size {
        available
    }

    fn arrange(&mut self, rect: Rect) {
        self.bounds = Some(rect);
    }
}

/// Item source that remembers which visuals are still out there.
#[derive(Debug, Default)]
struct Source {
    count: usize,
    next_id: u64,
    live: Vec<u64>,
}

impl ItemGenerator for Source {
    type Visual = Tile;

    fn item_count(&self) -> usize {
        self.count
    }

    fn realize(&mut self, index: usize) -> Result<Tile, GenerateError> {
        if index >= self.count {
            return Err(GenerateError::OutOfRange {
                index,
                count: self.count,
            });
        }
        self.next_id += 1;
        self.live.push(self.next_id);
        Ok(Tile {
            id: self.next_id,
            bounds: None,
        })
    }

    fn release(&mut self, _index: usize, visual: Tile) {
        self.live.retain(|id| *id != visual.id);
    }
}

#[fixture]
fn source() -> Source {
    Source {
        count: 31,
        ..Source::default()
    }
}

fn grid(rows: usize, columns: usize) -> GridConfiguration {
    GridConfiguration::new(rows, columns).expect("test configurations are non-zero")
}

fn realized(panel: &UniformGridPanel<Tile>) -> Vec<usize> {
    panel.realized().indices().collect()
}

#[rstest]
fn single_cell_grid_over_thirty_one_items(mut source: Source) {
    let mut panel = UniformGridPanel::new(grid(1, 1));
    panel.layout(Size::new(400.0, 400.0), &mut source);

    assert_eq!(panel.cell_geometry().height, 400.0);
    assert_eq!(panel.scroll_info().extent.height, 12400.0);
    assert_eq!(
        panel.visible_range(),
        Some(VisibleRange { start: 0, end: 1 })
    );
    assert_eq!(realized(&panel), [0]);
}

#[rstest]
fn three_by_three_grid_at_nine_hundred(mut source: Source) {
    let mut panel = UniformGridPanel::new(grid(3, 3));
    panel.layout(Size::new(900.0, 900.0), &mut source);

    assert_eq!(panel.columns().get(), 3);
    assert_eq!(panel.cell_geometry().width, 300.0);
    // 31 items over three columns is eleven rows.
    assert_eq!(
        panel.scroll_info().extent.height,
        panel.cell_geometry().height * 11.0
    );
}

#[rstest]
fn paging_through_three_viewports_stops_at_the_end() {
    // Three single-cell rows of 400 → extent 1200.
    let mut source = Source {
        count: 3,
        ..Source::default()
    };
    let mut panel = UniformGridPanel::new(GridConfiguration::SINGLE);
    panel.layout(Size::new(400.0, 400.0), &mut source);
    assert_eq!(panel.scroll_info().extent.height, 1200.0);

    let mut offsets = Vec::new();
    for _ in 0..3 {
        panel.page_down();
        panel.layout(Size::new(400.0, 400.0), &mut source);
        offsets.push(panel.vertical_offset());
    }
    assert_eq!(offsets, [400.0, 800.0, 800.0]);
    assert_eq!(realized(&panel), [2]);
}

#[rstest]
#[case::empty_source(0, grid(1, 1), Size::new(400.0, 400.0), 0)]
#[case::single_cell(31, grid(1, 1), Size::new(400.0, 400.0), 0)]
#[case::single_cell_paged(31, grid(1, 1), Size::new(400.0, 400.0), 4)]
#[case::three_by_three(31, grid(3, 3), Size::new(900.0, 900.0), 1)]
#[case::narrowed_three_by_three(31, grid(3, 3), Size::new(250.0, 900.0), 2)]
#[case::partial_last_row(7, grid(2, 4), Size::new(1000.0, 300.0), 1)]
#[case::odd_sizes(100, grid(5, 5), Size::new(333.0, 777.0), 3)]
fn realized_visuals_match_the_visible_range(
    #[case] count: usize,
    #[case] config: GridConfiguration,
    #[case] size: Size,
    #[case] pages: usize,
) {
    let mut source = Source {
        count,
        ..Source::default()
    };
    let mut panel = UniformGridPanel::new(config);
    panel.layout(size, &mut source);
    for _ in 0..pages {
        panel.page_down();
        panel.layout(size, &mut source);
    }

    let range = panel.visible_range().expect("geometry is not degenerate");
    assert!(range.end <= count);
    assert_eq!(panel.realized().len(), range.len());
    assert_eq!(realized(&panel), range.indices().collect::<Vec<_>>());
    assert_eq!(source.live.len(), range.len());
}

#[rstest]
#[case::barely_too_narrow(299.0)]
#[case::two_and_a_half(250.0)]
#[case::exactly_two(200.0)]
fn dropping_to_two_columns_reassigns_every_slot(mut source: Source, #[case] width: f64) {
    let mut panel = UniformGridPanel::new(grid(3, 3));
    panel.layout(Size::new(900.0, 900.0), &mut source);
    panel.page_down();
    panel.layout(Size::new(900.0, 900.0), &mut source);
    assert_eq!(panel.columns().get(), 3);

    // Only the size passed to layout changes.
    let outcome = panel.layout(Size::new(width, 900.0), &mut source);
    assert!(outcome.settled);
    assert_eq!(panel.columns().get(), 2);
    assert_eq!(panel.vertical_offset(), 900.0);
    // Rows 3..6 now hold two cells each.
    assert_eq!(
        panel.visible_range(),
        Some(VisibleRange { start: 6, end: 12 })
    );
    assert_eq!(realized(&panel), (6..12).collect::<Vec<_>>());

    let cell = panel.cell_geometry();
    for entry in panel.realized().iter() {
        let expected = cell_rect(entry.index, panel.columns(), width, cell);
        assert_eq!(entry.visual.bounds, Some(expected), "index {}", entry.index);
    }
    // Nothing left behind from the three-column window.
    assert_eq!(source.live.len(), panel.realized().len());
}

#[rstest]
fn resizing_back_and_forth_follows_the_width(mut source: Source) {
    let mut panel = UniformGridPanel::new(grid(3, 3));
    let wide = Size::new(900.0, 900.0);
    let narrow = Size::new(250.0, 900.0);
    panel.layout(wide, &mut source);
    panel.page_down();
    panel.layout(wide, &mut source);

    for (size, columns, range) in [
        (narrow, 2, 6..12),
        (wide, 3, 9..18),
        (narrow, 2, 6..12),
    ] {
        panel.layout(size, &mut source);
        assert_eq!(panel.columns().get(), columns, "at {size:?}");
        assert_eq!(panel.render_size(), size);
        assert_eq!(panel.scroll_info().viewport, size);
        assert_eq!(realized(&panel), range.collect::<Vec<_>>(), "at {size:?}");

        let cell = panel.cell_geometry();
        for entry in panel.realized().iter() {
            let expected = cell_rect(entry.index, panel.columns(), size.width, cell);
            assert_eq!(entry.visual.bounds, Some(expected), "index {}", entry.index);
        }
        assert_eq!(source.live.len(), panel.realized().len());
        assert!(!panel.needs_layout());
    }
}

#[rstest]
#[case::three_by_three(grid(3, 3), Size::new(900.0, 900.0))]
#[case::two_by_two(grid(2, 2), Size::new(400.0, 400.0))]
#[case::wide_rows(grid(2, 5), Size::new(1000.0, 500.0))]
fn bring_into_view_round_trips_with_exact_scrolling(
    mut source: Source,
    #[case] config: GridConfiguration,
    #[case] size: Size,
) {
    let options = PanelOptions {
        scroll_policy: ScrollPolicy::Exact,
        ..PanelOptions::default()
    };
    let mut panel = UniformGridPanel::with_options(config, options);
    panel.layout(size, &mut source);

    for index in realized(&panel) {
        panel.scroll_to_home();
        panel.layout(size, &mut source);
        panel
            .bring_index_into_view(index)
            .expect("index is realized at home");
        panel.layout(size, &mut source);
        let range = panel.visible_range().expect("geometry is not degenerate");
        assert!(range.contains(index), "{index} not in {range:?}");
    }
}

#[rstest]
#[case::paged(ScrollPolicy::Paged)]
#[case::exact(ScrollPolicy::Exact)]
fn repeating_a_reached_offset_is_a_no_op(mut source: Source, #[case] policy: ScrollPolicy) {
    let options = PanelOptions {
        scroll_policy: policy,
        ..PanelOptions::default()
    };
    let mut panel = UniformGridPanel::with_options(GridConfiguration::SINGLE, options);
    panel.layout(Size::new(400.0, 400.0), &mut source);
    assert!(panel.set_vertical_offset(400.0));
    panel.layout(Size::new(400.0, 400.0), &mut source);

    let before = realized(&panel);
    assert!(!panel.set_vertical_offset(400.0));
    assert!(!panel.needs_layout());
    assert_eq!(panel.vertical_offset(), 400.0);
    assert_eq!(realized(&panel), before);
}
