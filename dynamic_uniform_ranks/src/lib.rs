// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic Uniform Ranks: a headless layout picker for the uniform grid panel.
//!
//! [`picker::RanksPicker`] models the small popup that lets a user drag out a
//! `rows × columns` rectangle on a grid of tracks, or pick one of the square
//! [`picker::RanksPreset`]s. It only tracks state and answers questions
//! (which track is lit, what to emit on release); drawing and pointer capture
//! stay with the host.
//!
//! Every emitted value is a [`dynamic_uniform_grid::GridConfiguration`], ready
//! to hand to `UniformGridPanel::set_configuration`.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo` and `log`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod picker;

pub use picker::{CellShade, RanksPicker, RanksPreset, Selection, SelectionChange, Track};
