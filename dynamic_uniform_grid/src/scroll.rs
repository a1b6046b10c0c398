// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state: extent, viewport, and the vertical offset with its paging policy.

use kurbo::{Affine, Size, Vec2};

use crate::{DEFAULT_SCROLL_STEP, ScrollPolicy};

/// Snapshot of the scroll state handed to a scrollbar owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollInfo {
    /// Total content size.
    pub extent: Size,
    /// Visible window size.
    pub viewport: Size,
    /// Current offset. `x` is always zero.
    pub offset: Vec2,
}

impl ScrollInfo {
    /// Largest reachable vertical offset.
    #[must_use]
    pub fn max_vertical_offset(&self) -> f64 {
        (self.extent.height - self.viewport.height).max(0.0)
    }

    /// Returns `true` if the content is taller than the viewport.
    #[must_use]
    pub fn can_scroll_vertically(&self) -> bool {
        self.extent.height > self.viewport.height
    }
}

/// Owner of the extent, the viewport, and the vertical scroll offset.
///
/// This type:
/// - stores the extent and viewport reported by the last layout pass,
/// - clamps every offset request into `0..=max(0, extent - viewport)`,
/// - applies a [`ScrollPolicy`] to turn requests into offsets,
/// - exposes line, wheel, and page steps.
///
/// Each mutator reports whether the offset (or, for [`ScrollState::update`],
/// the extent or viewport) actually changed, so the caller can decide whether
/// to schedule another layout pass and notify its scrollbar.
///
/// Only vertical scrolling is supported; the horizontal offset stays at zero.
#[derive(Debug, Clone)]
pub struct ScrollState {
    extent: Size,
    viewport: Size,
    offset: Vec2,
    step: f64,
    policy: ScrollPolicy,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_STEP, ScrollPolicy::default())
    }
}

impl ScrollState {
    /// Creates an empty scroll state at the home position.
    #[must_use]
    pub fn new(step: f64, policy: ScrollPolicy) -> Self {
        Self {
            extent: Size::ZERO,
            viewport: Size::ZERO,
            offset: Vec2::ZERO,
            step: step.max(0.0),
            policy,
        }
    }

    /// Total content size.
    #[must_use]
    pub const fn extent(&self) -> Size {
        self.extent
    }

    /// Visible window size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current vertical offset.
    #[must_use]
    pub const fn vertical_offset(&self) -> f64 {
        self.offset.y
    }

    /// Offset applied by line and wheel steps.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Sets the offset applied by line and wheel steps.
    pub fn set_step(&mut self, step: f64) {
        self.step = step.max(0.0);
    }

    /// Policy applied by [`ScrollState::set_vertical_offset`].
    #[must_use]
    pub const fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    /// Sets the policy applied by [`ScrollState::set_vertical_offset`].
    pub fn set_policy(&mut self, policy: ScrollPolicy) {
        self.policy = policy;
    }

    /// Largest reachable vertical offset.
    #[must_use]
    pub fn max_vertical_offset(&self) -> f64 {
        (self.extent.height - self.viewport.height).max(0.0)
    }

    /// Snapshot for a scrollbar owner.
    #[must_use]
    pub const fn info(&self) -> ScrollInfo {
        ScrollInfo {
            extent: self.extent,
            viewport: self.viewport,
            offset: self.offset,
        }
    }

    /// Stores a new extent and viewport, returning `true` if either changed.
    ///
    /// The offset is left untouched; see [`ScrollState::clamp_to_content`].
    pub fn update(&mut self, extent: Size, viewport: Size) -> bool {
        let mut changed = false;
        if extent != self.extent {
            self.extent = extent;
            changed = true;
        }
        if viewport != self.viewport {
            self.viewport = viewport;
            changed = true;
        }
        changed
    }

    /// Clamps `requested` into the reachable range.
    ///
    /// A viewport at least as tall as the content always yields zero.
    #[must_use]
    pub fn clamp_request(&self, requested: f64) -> f64 {
        let viewport = self.viewport.height;
        let extent = self.extent.height;
        if requested < 0.0 || viewport >= extent {
            0.0
        } else if requested + viewport >= extent {
            extent - viewport
        } else {
            requested
        }
    }

    /// The offset [`ScrollState::set_vertical_offset`] would move to.
    ///
    /// A NaN request resolves to the current offset.
    #[must_use]
    pub fn resolve_vertical_offset(&self, requested: f64) -> f64 {
        if requested.is_nan() {
            return self.offset.y;
        }
        let clamped = self.clamp_request(requested);
        match self.policy {
            ScrollPolicy::Exact => clamped,
            ScrollPolicy::Paged => {
                let current = self.offset.y;
                let viewport = self.viewport.height;
                let paged = if clamped > current {
                    current + viewport
                } else if clamped < current {
                    current - viewport
                } else {
                    clamped
                };
                if paged < 0.0 {
                    0.0
                } else if paged + viewport > self.extent.height {
                    self.max_vertical_offset()
                } else {
                    paged
                }
            }
        }
    }

    /// Requests a new vertical offset, returning `true` if the offset changed.
    ///
    /// The request is clamped first. Under [`ScrollPolicy::Paged`] the clamped
    /// request only decides the direction: the offset then moves one whole
    /// viewport from where it is now, and is clamped again. A request equal
    /// to the current offset leaves it unchanged under either policy.
    pub fn set_vertical_offset(&mut self, requested: f64) -> bool {
        let next = self.resolve_vertical_offset(requested);
        if next == self.offset.y {
            return false;
        }
        self.offset.y = next;
        true
    }

    /// Scrolls up by one line step.
    pub fn line_up(&mut self) -> bool {
        self.set_vertical_offset(self.offset.y - self.step)
    }

    /// Scrolls down by one line step.
    pub fn line_down(&mut self) -> bool {
        self.set_vertical_offset(self.offset.y + self.step)
    }

    /// Scrolls up by one wheel notch.
    pub fn wheel_up(&mut self) -> bool {
        self.line_up()
    }

    /// Scrolls down by one wheel notch.
    pub fn wheel_down(&mut self) -> bool {
        self.line_down()
    }

    /// Scrolls up by one viewport.
    pub fn page_up(&mut self) -> bool {
        self.set_vertical_offset(self.offset.y - self.viewport.height)
    }

    /// Scrolls down by one viewport.
    pub fn page_down(&mut self) -> bool {
        self.set_vertical_offset(self.offset.y + self.viewport.height)
    }

    /// Jumps straight to the top, bypassing the scroll policy.
    pub fn scroll_to_home(&mut self) -> bool {
        if self.offset.y == 0.0 {
            return false;
        }
        self.offset.y = 0.0;
        true
    }

    /// Pulls the offset back into the reachable range after the extent or
    /// viewport shrank, bypassing the scroll policy.
    pub fn clamp_to_content(&mut self) -> bool {
        let max = self.max_vertical_offset();
        let clamped = self.offset.y.clamp(0.0, max);
        if clamped == self.offset.y {
            return false;
        }
        self.offset.y = clamped;
        true
    }

    /// Transform that shifts content so the offset is at the top of the viewport.
    #[must_use]
    pub fn translation(&self) -> Affine {
        Affine::translate((-self.offset.x, -self.offset.y))
    }
}
