// Copyright 2025 the Dynamic Uniform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host loop driving the uniform grid panel and the ranks picker.
//!
//! This example plays the part of a window:
//! - it owns 31 text items and one image item,
//! - it hands out item containers through an `ItemGenerator` that pools and
//!   counts them,
//! - it feeds picker output and resizes into the panel and runs layout after
//!   each input.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p dynamic_uniform_demos --example host_loop`

use std::error::Error;
use std::path::PathBuf;

use dynamic_uniform_grid::{
    GenerateError, GridConfiguration, GridVisual, ItemGenerator, UniformGridPanel,
};
use dynamic_uniform_ranks::{RanksPicker, RanksPreset};
use hashbrown::HashMap;
use kurbo::{Insets, Point, Rect, Size};

/// Item data shown in a cell.
#[derive(Clone, Debug)]
enum Payload {
    Label(String),
    Image { caption: String, path: PathBuf },
}

/// A reusable cell container.
#[derive(Debug)]
struct Container {
    id: u64,
    content: String,
    desired: Size,
    bounds: Rect,
}

impl GridVisual for Container {
    fn margin(&self) -> Insets {
        Insets::new(4.0, 4.0, 4.0, 4.0)
    }

    fn measure(&mut self, available: Size) -> Size {
        self.desired = available;
        available
    }

    fn arrange(&mut self, rect: Rect) {
        self.bounds = rect;
    }
}

/// Item source that pools released containers and tracks live ones.
#[derive(Debug)]
struct Gallery {
    items: Vec<Payload>,
    live: HashMap<u64, usize>,
    pool: Vec<Container>,
    next_id: u64,
}

impl Gallery {
    fn new(items: Vec<Payload>) -> Self {
        Self {
            items,
            live: HashMap::new(),
            pool: Vec::new(),
            next_id: 0,
        }
    }

    fn content(payload: &Payload) -> String {
        match payload {
            Payload::Label(text) => text.clone(),
            Payload::Image { caption, path } => format!("{caption} [{}]", path.display()),
        }
    }
}

impl ItemGenerator for Gallery {
    type Visual = Container;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn realize(&mut self, index: usize) -> Result<Container, GenerateError> {
        let payload = self.items.get(index).ok_or(GenerateError::OutOfRange {
            index,
            count: self.items.len(),
        })?;
        let content = Self::content(payload);
        let container = match self.pool.pop() {
            Some(mut container) => {
                container.content = content;
                container
            }
            None => {
                self.next_id += 1;
                Container {
                    id: self.next_id,
                    content,
                    desired: Size::ZERO,
                    bounds: Rect::ZERO,
                }
            }
        };
        self.live.insert(container.id, index);
        Ok(container)
    }

    fn release(&mut self, _index: usize, visual: Container) {
        self.live.remove(&visual.id);
        self.pool.push(visual);
    }
}

fn demo_items() -> Vec<Payload> {
    let mut items: Vec<_> = (1..=31).map(|n| Payload::Label(n.to_string())).collect();
    items.push(Payload::Image {
        caption: (items.len() + 1).to_string(),
        path: PathBuf::from("testImage.jpg"),
    });
    items
}

fn run(
    step: &str,
    panel: &mut UniformGridPanel<Container>,
    gallery: &mut Gallery,
    viewport: Size,
) -> Result<(), Box<dyn Error>> {
    let outcome = panel.layout(viewport, gallery);
    if let Some(info) = panel.take_scroll_info_change() {
        log::info!(
            "{step}: scrollbar extent {:.0}, viewport {:.0}, offset {:.0}",
            info.extent.height,
            info.viewport.height,
            info.offset.y
        );
    }
    log::info!(
        "{step}: {} columns, {} realized in {:?} after {} pass(es)",
        panel.columns(),
        panel.realized().len(),
        panel.visible_range(),
        outcome.passes
    );

    println!("{step} ({}x{})", viewport.width, viewport.height);
    let translation = panel.translation();
    for entry in panel.realized().iter() {
        let on_screen = translation.transform_rect_bbox(entry.visual.bounds);
        println!(
            "  #{:<2} {:<24} content {:>5.1}x{:<5.1} at ({:.0}, {:.0})",
            entry.index,
            entry.visual.content,
            entry.visual.desired.width,
            entry.visual.desired.height,
            on_screen.x0,
            on_screen.y0
        );
    }

    if gallery.live.len() != panel.realized().len() {
        return Err(format!(
            "{step}: {} live containers for {} realized cells",
            gallery.live.len(),
            panel.realized().len()
        )
        .into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut gallery = Gallery::new(demo_items());
    let mut picker = RanksPicker::new();
    let mut panel = UniformGridPanel::new(RanksPreset::OneByOne.configuration());
    let window = Size::new(400.0, 400.0);

    // The layout combo box starts on its first entry.
    let config: GridConfiguration = "1,1".parse()?;
    panel.set_configuration(config);
    run("load", &mut panel, &mut gallery, window)?;

    panel.page_down();
    run("page down", &mut panel, &mut gallery, window)?;

    // Drag out a 3×3 rectangle on the 6×6 picker.
    picker.open();
    let track_grid = Size::new(120.0, 120.0);
    picker.on_move(Point::new(10.0, 10.0), track_grid);
    picker.on_move(Point::new(55.0, 58.0), track_grid);
    let config = picker.on_up().ok_or("picker released without a selection")?;
    panel.set_configuration(config);
    let window = Size::new(900.0, 900.0);
    run("pick 3x3", &mut panel, &mut gallery, window)?;

    panel.wheel_down();
    run("wheel down", &mut panel, &mut gallery, window)?;

    // Narrow enough that only two 100px cells fit.
    run("narrow", &mut panel, &mut gallery, Size::new(250.0, 900.0))?;

    let config = picker.choose_preset(RanksPreset::FourByFour);
    panel.set_configuration(config);
    run("preset 4*4", &mut panel, &mut gallery, Size::new(800.0, 800.0))?;

    let released = panel.clear(&mut gallery);
    println!(
        "cleared {released} containers; {} pooled, {} created in total",
        gallery.pool.len(),
        gallery.next_id
    );
    Ok(())
}
