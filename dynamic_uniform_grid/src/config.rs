// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and panel options.

use alloc::string::{String, ToString};
use core::fmt;
use core::num::{NonZeroUsize, ParseIntError};
use core::str::FromStr;

/// Minimum content width of a single cell, excluding its margin.
///
/// Used to decide how many columns fit into the available width.
pub const DEFAULT_MIN_CONTENT_WIDTH: f64 = 100.0;

/// Offset applied by one line or wheel step.
pub const DEFAULT_SCROLL_STEP: f64 = 10.0;

/// Upper bound on measure/arrange rounds performed by a single
/// [`UniformGridPanel::layout`](crate::UniformGridPanel::layout) call.
pub const DEFAULT_MAX_LAYOUT_PASSES: usize = 4;

/// One axis of a [`GridConfiguration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The row count.
    Rows,
    /// The column count.
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("rows"),
            Self::Columns => f.write_str("columns"),
        }
    }
}

/// Errors produced when building a [`GridConfiguration`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One of the dimensions was zero.
    #[error("grid {0} must be at least 1")]
    ZeroDimension(Axis),
    /// The tag did not have the `rows,columns` shape.
    #[error("expected a `rows,columns` tag, got {0:?}")]
    Malformed(String),
    /// One of the numbers in the tag did not parse.
    #[error("invalid {axis} count in layout tag")]
    InvalidNumber {
        /// Axis whose number failed to parse.
        axis: Axis,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Target number of rows and columns shown per viewport.
///
/// Rows are always honored. Columns are an upper bound: a narrow viewport may
/// show fewer columns than configured, never more.
///
/// ```rust
/// use dynamic_uniform_grid::GridConfiguration;
///
/// let config: GridConfiguration = "3,3".parse().unwrap();
/// assert_eq!(config.rows(), 3);
/// assert_eq!(config.columns(), 3);
///
/// assert!(GridConfiguration::new(0, 2).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridConfiguration {
    rows: NonZeroUsize,
    columns: NonZeroUsize,
}

impl GridConfiguration {
    /// A single cell filling the viewport.
    pub const SINGLE: Self = Self {
        rows: NonZeroUsize::MIN,
        columns: NonZeroUsize::MIN,
    };

    /// Creates a configuration, rejecting zero rows or columns.
    pub fn new(rows: usize, columns: usize) -> Result<Self, ConfigError> {
        let rows = NonZeroUsize::new(rows).ok_or(ConfigError::ZeroDimension(Axis::Rows))?;
        let columns =
            NonZeroUsize::new(columns).ok_or(ConfigError::ZeroDimension(Axis::Columns))?;
        Ok(Self { rows, columns })
    }

    /// Creates a configuration from already-validated counts.
    #[must_use]
    pub const fn from_non_zero(rows: NonZeroUsize, columns: NonZeroUsize) -> Self {
        Self { rows, columns }
    }

    /// Configured row count.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Configured column count.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Configured row count as a [`NonZeroUsize`].
    #[must_use]
    pub const fn rows_non_zero(&self) -> NonZeroUsize {
        self.rows
    }

    /// Configured column count as a [`NonZeroUsize`].
    #[must_use]
    pub const fn columns_non_zero(&self) -> NonZeroUsize {
        self.columns
    }
}

impl Default for GridConfiguration {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for GridConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.rows, self.columns)
    }
}

impl FromStr for GridConfiguration {
    type Err = ConfigError;

    /// Parses the `rows,columns` tag format, e.g. `"2,2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(rows), Some(columns), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConfigError::Malformed(s.to_string()));
        };
        let rows = rows
            .trim()
            .parse::<usize>()
            .map_err(|source| ConfigError::InvalidNumber {
                axis: Axis::Rows,
                source,
            })?;
        let columns = columns
            .trim()
            .parse::<usize>()
            .map_err(|source| ConfigError::InvalidNumber {
                axis: Axis::Columns,
                source,
            })?;
        Self::new(rows, columns)
    }
}

/// How [`ScrollState::set_vertical_offset`](crate::ScrollState::set_vertical_offset)
/// turns a request into a new offset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScrollPolicy {
    /// Any movement advances by one whole viewport in the requested direction.
    ///
    /// Line, wheel, and drag requests therefore all move by pages.
    #[default]
    Paged,
    /// Land on the clamped request.
    Exact,
}

/// Tunables for a [`UniformGridPanel`](crate::UniformGridPanel).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelOptions {
    /// Minimum content width of a cell, excluding its horizontal margin.
    pub min_content_width: f64,
    /// Offset applied by a single line or wheel step.
    pub scroll_step: f64,
    /// Offset policy used for every vertical scroll request.
    pub scroll_policy: ScrollPolicy,
    /// Upper bound on measure/arrange rounds per layout call.
    pub max_layout_passes: usize,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            min_content_width: DEFAULT_MIN_CONTENT_WIDTH,
            scroll_step: DEFAULT_SCROLL_STEP,
            scroll_policy: ScrollPolicy::Paged,
            max_layout_passes: DEFAULT_MAX_LAYOUT_PASSES,
        }
    }
}
