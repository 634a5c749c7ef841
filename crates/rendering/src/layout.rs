//! Board layout model: bounding box, enclosure rectangles, chip slots.
//!
//! All rectangles are in board space (y-down, origin at the top-left of
//! the bounding box). The bounding box is the canvas the camera fits to,
//! and every enclosure rectangle is computed relative to it.

use bevy::prelude::*;

use board::enclosure::{capacity_for, Enclosure, EnclosureSet, DEFAULT_CAPACITY};

/// Padding applied symmetrically around the content so enclosures never
/// touch the content edge.
pub const BOARD_PAD: f32 = 60.0;

/// Bounding box size used when there are no enclosures at all.
pub const DEFAULT_BOUNDS: Vec2 = Vec2::new(1200.0, 800.0);

/// Chip slot columns inside large pens; ordinary enclosures stack chips in
/// a single column.
pub const CHIP_COLS: usize = 10;

/// Chip slot row height.
pub const CHIP_ROW_H: f32 = 26.0;

/// Inset from the enclosure border to the chip area.
const CHIP_INSET: f32 = 6.0;

/// Vertical space reserved for the enclosure's code label.
const HEADER_H: f32 = 22.0;

/// Bounding box of the whole board.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BoardBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for BoardBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: DEFAULT_BOUNDS.x,
            height: DEFAULT_BOUNDS.y,
        }
    }
}

/// Derive the bounding box from enclosure records. Zero enclosures yield
/// the fixed default size.
pub fn compute_bounds(enclosures: &[Enclosure]) -> BoardBounds {
    if enclosures.is_empty() {
        return BoardBounds::default();
    }
    let min_x = enclosures.iter().map(|e| e.x).fold(f32::INFINITY, f32::min);
    let min_y = enclosures.iter().map(|e| e.y).fold(f32::INFINITY, f32::min);
    let max_x = enclosures
        .iter()
        .map(|e| e.x + e.w)
        .fold(f32::NEG_INFINITY, f32::max);
    let max_y = enclosures
        .iter()
        .map(|e| e.y + e.h)
        .fold(f32::NEG_INFINITY, f32::max);
    BoardBounds {
        min_x,
        min_y,
        width: max_x - min_x + BOARD_PAD * 2.0,
        height: max_y - min_y + BOARD_PAD * 2.0,
    }
}

/// Board-space rectangle of an enclosure.
pub fn enclosure_rect(enclosure: &Enclosure, bounds: &BoardBounds) -> Rect {
    let x = enclosure.x - bounds.min_x + BOARD_PAD;
    let y = enclosure.y - bounds.min_y + BOARD_PAD;
    Rect::new(x, y, x + enclosure.w, y + enclosure.h)
}

/// Board-space rectangle of the chip slot at `index` inside an enclosure.
///
/// Large pens lay chips out row-major in [`CHIP_COLS`] columns; ordinary
/// enclosures stack their two chips vertically.
pub fn chip_slot(enclosure: &Enclosure, bounds: &BoardBounds, index: usize) -> Rect {
    let rect = enclosure_rect(enclosure, bounds);
    let cols = if capacity_for(&enclosure.code) > DEFAULT_CAPACITY {
        CHIP_COLS
    } else {
        1
    };
    let col = index % cols;
    let row = index / cols;
    let col_w = (rect.width() - CHIP_INSET * 2.0) / cols as f32;
    let x = rect.min.x + CHIP_INSET + col as f32 * col_w;
    let y = rect.min.y + HEADER_H + row as f32 * CHIP_ROW_H;
    Rect::new(x, y, x + col_w - 2.0, y + CHIP_ROW_H - 4.0)
}

/// First enclosure whose rectangle contains the given board-space point.
pub fn enclosure_at<'a>(
    enclosures: &'a [Enclosure],
    bounds: &BoardBounds,
    pos: Vec2,
) -> Option<&'a str> {
    enclosures
        .iter()
        .find(|e| enclosure_rect(e, bounds).contains(pos))
        .map(|e| e.code.as_str())
}

/// System: recompute the bounding box from the loaded enclosure set.
pub fn refresh_bounds(set: Res<EnclosureSet>, mut bounds: ResMut<BoardBounds>) {
    let computed = compute_bounds(&set.enclosures);
    if *bounds != computed {
        *bounds = computed;
    }
}
