// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test visual and generator shared by the unit tests.

use alloc::vec::Vec;

use kurbo::{Insets, Rect, Size};

use crate::{GenerateError, GridVisual, ItemGenerator};

#[derive(Debug)]
pub(crate) struct TestCell {
    pub(crate) id: u32,
    pub(crate) margin: Insets,
    pub(crate) measured: Option<Size>,
    pub(crate) arranged: Option<Rect>,
}

impl GridVisual for TestCell {
    fn margin(&self) -> Insets {
        self.margin
    }

    fn measure(&mut self, available: Size) -> Size {
        self.measured = Some(available);
        available
    }

    fn arrange(&mut self, rect: Rect) {
        self.arranged = Some(rect);
    }
}

/// Generator that tracks which visuals are alive.
#[derive(Debug, Default)]
pub(crate) struct TestGenerator {
    pub(crate) count: usize,
    pub(crate) next_id: u32,
    pub(crate) live: Vec<u32>,
    pub(crate) released: Vec<usize>,
    pub(crate) failing: Option<usize>,
    pub(crate) stale_ids: Vec<u32>,
    pub(crate) margin: Insets,
}

impl TestGenerator {
    pub(crate) fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }
}

impl ItemGenerator for TestGenerator {
    type Visual = TestCell;

    fn item_count(&self) -> usize {
        self.count
    }

    fn realize(&mut self, index: usize) -> Result<TestCell, GenerateError> {
        if index >= self.count {
            return Err(GenerateError::OutOfRange {
                index,
                count: self.count,
            });
        }
        if self.failing == Some(index) {
            return Err(GenerateError::Removed { index });
        }
        self.next_id += 1;
        self.live.push(self.next_id);
        Ok(TestCell {
            id: self.next_id,
            margin: self.margin,
            measured: None,
            arranged: None,
        })
    }

    fn is_current(&self, _index: usize, visual: &TestCell) -> bool {
        !self.stale_ids.contains(&visual.id)
    }

    fn release(&mut self, index: usize, visual: TestCell) {
        self.live.retain(|id| *id != visual.id);
        self.released.push(index);
    }
}
