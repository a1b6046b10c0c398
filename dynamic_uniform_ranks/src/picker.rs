// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven `rows × columns` picker over a fixed grid of tracks.
//!
//! The picker shows a small square of tracks (6 × 6 by default) inside a popup.
//! Hovering highlights the rectangle from the top-left track to the track under
//! the pointer; releasing the pointer emits that rectangle as a
//! [`GridConfiguration`]. Four presets (1×1 through 4×4) can be chosen directly.
//!
//! ## Usage
//!
//! ```
//! use dynamic_uniform_ranks::picker::{CellShade, RanksPicker, SelectionChange};
//! use kurbo::{Point, Size};
//!
//! let mut picker = RanksPicker::new();
//! picker.open();
//!
//! // A 120×120 container makes every track 20×20.
//! let container = Size::new(120.0, 120.0);
//! let change = picker.on_move(Point::new(45.0, 30.0), container);
//! assert!(matches!(change, SelectionChange::Selected(_)));
//!
//! // Row 2, column 3 is the corner of the highlighted rectangle.
//! assert_eq!(picker.shade(2, 3), CellShade::Highlighted);
//! assert_eq!(picker.shade(3, 3), CellShade::Normal);
//!
//! let config = picker.on_up().unwrap();
//! assert_eq!((config.rows(), config.columns()), (2, 3));
//! assert!(!picker.is_open());
//! ```
//!
//! ## Selection rules
//!
//! 1. **Track size**: container size divided by the track counts. A container
//!    with no area leaves the selection untouched.
//! 2. **Track under the pointer**: `ceil(x / track width)` and
//!    `ceil(y / track height)`, clamped to `0..=total`. Tracks are numbered
//!    from 1, so a pointer on the top or left edge maps to track 0.
//! 3. **Selection**: if both numbers are in `1..=total` they become the
//!    selection; anything else clears it.
//! 4. **Shading**: track `(row, column)` is highlighted when
//!    `row <= selected row` and `column <= selected column`.

use core::fmt;
use core::num::NonZeroUsize;

use dynamic_uniform_grid::GridConfiguration;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

/// Track count along each axis of a default picker.
pub const DEFAULT_TRACKS: NonZeroUsize = NonZeroUsize::new(6).unwrap();

/// RGB of a track outside the selection.
pub const NORMAL_RGB: u32 = 0x40_40_40;

/// RGB of a track inside the selection.
pub const HIGHLIGHTED_RGB: u32 = 0xB4_B4_B4;

/// How a track is painted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellShade {
    /// Outside the selection.
    Normal,
    /// Inside the selection.
    Highlighted,
}

impl CellShade {
    /// Packed `0xRRGGBB` color for this shade.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Normal => NORMAL_RGB,
            Self::Highlighted => HIGHLIGHTED_RGB,
        }
    }
}

/// The track under the pointer, numbered from 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Selected row.
    pub row: NonZeroUsize,
    /// Selected column.
    pub column: NonZeroUsize,
}

impl From<Selection> for GridConfiguration {
    fn from(selection: Selection) -> Self {
        Self::from_non_zero(selection.row, selection.column)
    }
}

/// Result of a pointer move or leave.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing to repaint.
    Unchanged,
    /// A different track is now selected.
    Selected(Selection),
    /// The selection was cleared.
    Cleared,
}

/// Fixed layouts offered next to the track grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RanksPreset {
    /// One cell.
    #[default]
    OneByOne,
    /// Two rows of two.
    TwoByTwo,
    /// Three rows of three.
    ThreeByThree,
    /// Four rows of four.
    FourByFour,
}

impl RanksPreset {
    /// Every preset, smallest first.
    pub const ALL: [Self; 4] = [
        Self::OneByOne,
        Self::TwoByTwo,
        Self::ThreeByThree,
        Self::FourByFour,
    ];

    /// Tracks along each axis.
    #[must_use]
    pub const fn size(self) -> NonZeroUsize {
        let n = match self {
            Self::OneByOne => 1,
            Self::TwoByTwo => 2,
            Self::ThreeByThree => 3,
            Self::FourByFour => 4,
        };
        match NonZeroUsize::new(n) {
            Some(n) => n,
            None => NonZeroUsize::MIN,
        }
    }

    /// Configuration emitted when the preset is chosen.
    #[must_use]
    pub const fn configuration(self) -> GridConfiguration {
        GridConfiguration::from_non_zero(self.size(), self.size())
    }
}

impl fmt::Display for RanksPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "{n}*{n}")
    }
}

/// One track of the picker grid, as handed to a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// Row, from 1.
    pub row: usize,
    /// Column, from 1.
    pub column: usize,
    /// Current shade.
    pub shade: CellShade,
}

/// Headless state of the ranks picker popup.
#[derive(Clone, Debug)]
pub struct RanksPicker {
    rows: NonZeroUsize,
    columns: NonZeroUsize,
    selection: Option<Selection>,
    preset: RanksPreset,
    open: bool,
}

impl Default for RanksPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl RanksPicker {
    /// Creates a closed 6 × 6 picker showing the 1×1 preset.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_tracks(DEFAULT_TRACKS, DEFAULT_TRACKS)
    }

    /// Creates a closed picker with a custom track grid.
    #[must_use]
    pub const fn with_tracks(rows: NonZeroUsize, columns: NonZeroUsize) -> Self {
        Self {
            rows,
            columns,
            selection: None,
            preset: RanksPreset::OneByOne,
            open: false,
        }
    }

    /// Track rows.
    #[must_use]
    pub const fn rows(&self) -> NonZeroUsize {
        self.rows
    }

    /// Track columns.
    #[must_use]
    pub const fn columns(&self) -> NonZeroUsize {
        self.columns
    }

    /// Opens the popup.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the popup.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Returns `true` while the popup is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Track currently under the pointer, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Preset whose icon is shown on the collapsed picker.
    #[must_use]
    pub const fn current_preset(&self) -> RanksPreset {
        self.preset
    }

    /// Updates the selection for a pointer at `point` inside a container of
    /// `container` size.
    pub fn on_move(&mut self, point: Point, container: Size) -> SelectionChange {
        let track_width = container.width / count_as_f64(self.columns.get());
        let track_height = container.height / count_as_f64(self.rows.get());
        if track_width.is_nan() || track_height.is_nan() || track_width <= 0.0 || track_height <= 0.0
        {
            return SelectionChange::Unchanged;
        }

        let column = track_at(point.x, track_width, self.columns);
        let row = track_at(point.y, track_height, self.rows);
        match (NonZeroUsize::new(row), NonZeroUsize::new(column)) {
            (Some(row), Some(column)) => {
                let next = Selection { row, column };
                if self.selection == Some(next) {
                    return SelectionChange::Unchanged;
                }
                self.selection = Some(next);
                SelectionChange::Selected(next)
            }
            _ => self.clear_selection(),
        }
    }

    /// Clears the selection when the pointer leaves the track grid.
    pub fn on_leave(&mut self) -> SelectionChange {
        self.clear_selection()
    }

    /// Closes the popup and emits the selection, if there is one.
    pub fn on_up(&mut self) -> Option<GridConfiguration> {
        self.open = false;
        let config = self.selection.map(GridConfiguration::from);
        if let Some(config) = config {
            log::debug!("ranks picker chose {config}");
        }
        config
    }

    /// Closes the popup and emits `preset`, showing it as the current icon.
    pub fn choose_preset(&mut self, preset: RanksPreset) -> GridConfiguration {
        self.open = false;
        self.preset = preset;
        log::debug!("ranks picker preset {preset}");
        preset.configuration()
    }

    /// Shade of track `(row, column)`, numbered from 1.
    #[must_use]
    pub fn shade(&self, row: usize, column: usize) -> CellShade {
        match self.selection {
            Some(sel) if row <= sel.row.get() && column <= sel.column.get() => {
                CellShade::Highlighted
            }
            _ => CellShade::Normal,
        }
    }

    /// Every track in row-major order.
    pub fn tracks(&self) -> impl Iterator<Item = Track> + '_ {
        (1..=self.rows.get()).flat_map(move |row| {
            (1..=self.columns.get()).map(move |column| Track {
                row,
                column,
                shade: self.shade(row, column),
            })
        })
    }

    fn clear_selection(&mut self) -> SelectionChange {
        match self.selection.take() {
            Some(_) => SelectionChange::Cleared,
            None => SelectionChange::Unchanged,
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped to 0..=total first; NaN casts to zero"
)]
fn track_at(coordinate: f64, track_extent: f64, total: NonZeroUsize) -> usize {
    (coordinate / track_extent)
        .ceil()
        .clamp(0.0, count_as_f64(total.get())) as usize
}

#[allow(clippy::cast_precision_loss, reason = "Track counts are tiny")]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}
