// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window realizer/recycler: keeps exactly the visible cells realized.
//!
//! The panel never creates or destroys visuals itself. An [`ItemGenerator`]
//! supplied by the host does that; the [`RealizedSet`] decides *which* indices
//! need a visual and hands the ones that fell out of the visible range back to
//! the generator in the same pass.

use alloc::vec::Vec;

use kurbo::{Insets, Rect, Size};
use smallvec::SmallVec;

use crate::{CellGeometry, VisibleRange};

/// Capabilities the panel needs from a realized cell visual.
pub trait GridVisual {
    /// Outer margin around the cell content. Only the horizontal part is used.
    fn margin(&self) -> Insets {
        Insets::ZERO
    }

    /// Measures the visual against the content box of its cell.
    fn measure(&mut self, available: Size) -> Size;

    /// Places the visual at `rect` in content coordinates.
    fn arrange(&mut self, rect: Rect);
}

/// Why a generator could not produce a visual.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// The index is beyond the current item source.
    #[error("item {index} is outside the source of {count} items")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Item count at the time of the request.
        count: usize,
    },
    /// The item was removed from the source while the pass was running.
    #[error("item {index} was removed from the source during realization")]
    Removed {
        /// Requested index.
        index: usize,
    },
}

/// Host-side factory for cell visuals.
///
/// The generator owns the item source. Index ↔ visual mapping only needs to be
/// consistent within one layout pass.
pub trait ItemGenerator {
    /// Visual type produced for each realized item.
    type Visual: GridVisual;

    /// Number of items in the source.
    fn item_count(&self) -> usize;

    /// Creates (or reuses a pending) visual for item `index`.
    fn realize(&mut self, index: usize) -> Result<Self::Visual, GenerateError>;

    /// Returns `false` if `visual` no longer represents item `index`, for
    /// example because the item was replaced in the source.
    ///
    /// Stale visuals are released and realized again.
    fn is_current(&self, index: usize, visual: &Self::Visual) -> bool {
        let _ = (index, visual);
        true
    }

    /// Takes back a visual that left the visible range.
    fn release(&mut self, index: usize, visual: Self::Visual);
}

/// A realized visual together with the logical index it represents.
#[derive(Clone, Debug)]
pub struct RealizedVisual<V> {
    /// Logical item index.
    pub index: usize,
    /// The visual created by the generator.
    pub visual: V,
}

/// What a realization pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RealizeReport {
    /// Indices that received a freshly created visual.
    pub realized: SmallVec<[usize; 16]>,
    /// Number of visuals kept from the previous pass.
    pub reused: usize,
    /// Indices whose visuals were handed back to the generator.
    pub recycled: SmallVec<[usize; 16]>,
    /// Indices the generator failed to realize.
    pub skipped: SmallVec<[usize; 4]>,
}

impl RealizeReport {
    /// Returns `true` if the pass created or released any visual.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.realized.is_empty() || !self.recycled.is_empty()
    }
}

/// Realized visuals ordered by logical index.
///
/// The position of a visual in this set plays the role of its generator
/// position: [`RealizedSet::position_of`] maps an index to where its visual
/// is, or would be inserted.
#[derive(Clone, Debug)]
pub struct RealizedSet<V> {
    entries: Vec<RealizedVisual<V>>,
}

impl<V> Default for RealizedSet<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> RealizedSet<V> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of realized visuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is realized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Ok(position)` of the visual for `index`, or `Err(position)` where it
    /// would be inserted.
    pub fn position_of(&self, index: usize) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&index, |entry| entry.index)
    }

    /// Visual realized for `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        let position = self.position_of(index).ok()?;
        self.entries.get(position).map(|entry| &entry.visual)
    }

    /// Iterates over realized visuals in index order.
    pub fn iter(&self) -> impl Iterator<Item = &RealizedVisual<V>> {
        self.entries.iter()
    }

    /// Iterates mutably over realized visuals in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RealizedVisual<V>> {
        self.entries.iter_mut()
    }

    /// Realized indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.index)
    }
}

impl<V: GridVisual> RealizedSet<V> {
    /// Margin of the first realized visual, or zero when nothing is realized.
    ///
    /// All cells are assumed to share it.
    #[must_use]
    pub fn sample_margin(&self) -> Insets {
        self.entries
            .first()
            .map_or(Insets::ZERO, |entry| entry.visual.margin())
    }

    /// Makes the realized set match `range` exactly.
    ///
    /// 1. Walks `range` in order starting at the insertion point of its first
    ///    index. Missing indices are realized and inserted; existing ones are
    ///    kept unless the generator reports them stale, in which case they are
    ///    released and realized again. Each visual is then measured against
    ///    the content box of `cell`.
    /// 2. Scans the set in reverse and releases every visual outside `range`
    ///    or beyond the generator's item count.
    ///
    /// Realization failures are logged and skipped; the next pass retries
    /// them. The work done is proportional to the size of `range` plus the
    /// number of previously realized visuals, never to the item count.
    pub fn realize_range<G>(
        &mut self,
        range: VisibleRange,
        cell: CellGeometry,
        generator: &mut G,
    ) -> RealizeReport
    where
        G: ItemGenerator<Visual = V>,
    {
        let mut report = RealizeReport::default();
        let count = generator.item_count();

        let mut position = match self.position_of(range.start) {
            Ok(position) | Err(position) => position,
        };
        for index in range.indices() {
            let current = match self.entries.get(position) {
                Some(entry) if entry.index == index => {
                    Some(generator.is_current(index, &entry.visual))
                }
                _ => None,
            };
            match current {
                Some(true) => {
                    report.reused += 1;
                }
                Some(false) => {
                    let stale = self.entries.remove(position);
                    log::debug!("releasing stale visual for item {index}");
                    generator.release(stale.index, stale.visual);
                    report.recycled.push(index);
                    if !self.insert_fresh(position, index, generator, &mut report) {
                        continue;
                    }
                }
                None => {
                    if !self.insert_fresh(position, index, generator, &mut report) {
                        continue;
                    }
                }
            }

            let content = cell.content_size(self.sample_margin());
            if let Some(entry) = self.entries.get_mut(position) {
                entry.visual.measure(content);
            }
            position += 1;
        }

        self.recycle_outside(range, count, generator, &mut report);
        report
    }

    /// Releases every realized visual back to `generator`.
    pub fn clear<G>(&mut self, generator: &mut G) -> usize
    where
        G: ItemGenerator<Visual = V>,
    {
        let released = self.entries.len();
        for entry in self.entries.drain(..).rev() {
            generator.release(entry.index, entry.visual);
        }
        released
    }

    fn insert_fresh<G>(
        &mut self,
        position: usize,
        index: usize,
        generator: &mut G,
        report: &mut RealizeReport,
    ) -> bool
    where
        G: ItemGenerator<Visual = V>,
    {
        match generator.realize(index) {
            Ok(visual) => {
                self.entries
                    .insert(position, RealizedVisual { index, visual });
                report.realized.push(index);
                true
            }
            Err(err) => {
                log::warn!("skipping item {index}: {err}");
                report.skipped.push(index);
                false
            }
        }
    }

    fn recycle_outside<G>(
        &mut self,
        range: VisibleRange,
        count: usize,
        generator: &mut G,
        report: &mut RealizeReport,
    ) where
        G: ItemGenerator<Visual = V>,
    {
        for position in (0..self.entries.len()).rev() {
            let index = self.entries[position].index;
            if range.contains(index) && index < count {
                continue;
            }
            let entry = self.entries.remove(position);
            generator.release(entry.index, entry.visual);
            report.recycled.push(index);
        }
    }
}
