//! World-space rendering of enclosures and occupant chips.
//!
//! The board is rebuilt wholesale whenever the roster changes (optimistic
//! moves and reloads alike); at this scale a rebuild is cheaper than
//! diffing. [`ChipIndex`] is committed at the end of every rebuild and is
//! the readiness signal the focus navigator waits on.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::sprite::Anchor;

use board::drag::{DragState, HoverTarget};
use board::enclosure::{is_inactive, EnclosureSet};
use board::occupant::OccupantRoster;
use board::search::SearchState;
use board::selection::Picked;

use crate::layout::{chip_slot, enclosure_rect, BoardBounds};

const Z_ENCLOSURE: f32 = 0.0;
const Z_LABEL: f32 = 2.0;
const Z_CHIP: f32 = 1.0;

const ENCLOSURE_FILL: Color = Color::srgb(0.09, 0.13, 0.19);
const ENCLOSURE_HOVER_FILL: Color = Color::srgb(0.16, 0.24, 0.35);
const CHIP_FILL: Color = Color::srgb(0.20, 0.25, 0.33);
const PICKED_FILL: Color = Color::srgb(0.72, 0.55, 0.13);
const PENDING_FILL: Color = Color::srgb(0.13, 0.46, 0.72);
const LABEL_COLOR: Color = Color::srgb(0.55, 0.62, 0.72);

/// Alpha applied to enclosures (and their chips) that are inactive or hold
/// no match while a query is active.
const DIM_ALPHA: f32 = 0.35;

/// Everything spawned by a board rebuild.
#[derive(Component)]
pub struct BoardEntity;

#[derive(Component)]
pub struct EnclosureMarker {
    pub code: String,
}

#[derive(Component)]
pub struct ChipMarker {
    pub occupant_id: String,
    pub enclosure: String,
    pub base_color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct ChipEntry {
    pub entity: Entity,
    pub rect: Rect,
}

/// Occupant id → rendered chip, committed after every board rebuild.
///
/// Doubles as the hit-testing index for the input layer and as the
/// readiness signal the focus navigator polls.
#[derive(Resource, Default)]
pub struct ChipIndex {
    entries: HashMap<String, ChipEntry>,
}

impl ChipIndex {
    pub fn get(&self, occupant_id: &str) -> Option<&ChipEntry> {
        self.entries.get(occupant_id)
    }

    /// Chip under the given board-space point, if any.
    pub fn chip_at(&self, pos: Vec2) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.rect.contains(pos))
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a `#rrggbb` color tag. Anything else falls back to the default
/// chip fill.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::srgb_u8(r, g, b))
}

fn rebuild(
    commands: &mut Commands,
    existing: &Query<Entity, With<BoardEntity>>,
    enclosures: &EnclosureSet,
    roster: &OccupantRoster,
    bounds: &BoardBounds,
    chip_index: &mut ChipIndex,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn_recursive();
    }
    chip_index.entries.clear();

    for enclosure in &enclosures.enclosures {
        let rect = enclosure_rect(enclosure, bounds);
        commands.spawn((
            EnclosureMarker {
                code: enclosure.code.clone(),
            },
            BoardEntity,
            Sprite {
                color: ENCLOSURE_FILL,
                custom_size: Some(rect.size()),
                ..default()
            },
            Transform::from_xyz(rect.center().x, -rect.center().y, Z_ENCLOSURE),
        ));
        commands.spawn((
            BoardEntity,
            Text2d::new(enclosure.code.clone()),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(LABEL_COLOR),
            Anchor::TopLeft,
            Transform::from_xyz(rect.min.x + 4.0, -(rect.min.y + 2.0), Z_LABEL),
        ));

        for (index, occupant) in roster.in_enclosure(&enclosure.code).iter().enumerate() {
            let slot = chip_slot(enclosure, bounds, index);
            let base_color = occupant
                .color
                .as_deref()
                .and_then(parse_hex_color)
                .unwrap_or(CHIP_FILL);
            let entity = commands
                .spawn((
                    ChipMarker {
                        occupant_id: occupant.id.clone(),
                        enclosure: enclosure.code.clone(),
                        base_color,
                    },
                    BoardEntity,
                    Sprite {
                        color: base_color,
                        custom_size: Some(slot.size()),
                        ..default()
                    },
                    Transform::from_xyz(slot.center().x, -slot.center().y, Z_CHIP),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text2d::new(occupant.name.clone()),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        Transform::from_xyz(0.0, 0.0, 0.1),
                    ));
                })
                .id();
            chip_index
                .entries
                .insert(occupant.id.clone(), ChipEntry { entity, rect: slot });
        }
    }

    debug!(
        "board rebuilt: {} enclosures, {} chips",
        enclosures.enclosures.len(),
        chip_index.entries.len()
    );
}

/// System: full rebuild on entering the ready state.
pub fn rebuild_board(
    mut commands: Commands,
    existing: Query<Entity, With<BoardEntity>>,
    enclosures: Res<EnclosureSet>,
    roster: Res<OccupantRoster>,
    bounds: Res<BoardBounds>,
    mut chip_index: ResMut<ChipIndex>,
) {
    rebuild(
        &mut commands,
        &existing,
        &enclosures,
        &roster,
        &bounds,
        &mut chip_index,
    );
}

/// System: rebuild whenever the roster mutates (moves and reloads).
pub fn sync_on_roster_change(
    mut commands: Commands,
    existing: Query<Entity, With<BoardEntity>>,
    enclosures: Res<EnclosureSet>,
    roster: Res<OccupantRoster>,
    bounds: Res<BoardBounds>,
    mut chip_index: ResMut<ChipIndex>,
) {
    if !roster.is_changed() {
        return;
    }
    rebuild(
        &mut commands,
        &existing,
        &enclosures,
        &roster,
        &bounds,
        &mut chip_index,
    );
}

/// Fill color of an enclosure given its visual situation.
fn enclosure_fill(dimmed: bool, hovered: bool) -> Color {
    let base = if hovered {
        ENCLOSURE_HOVER_FILL
    } else {
        ENCLOSURE_FILL
    };
    if dimmed {
        base.with_alpha(DIM_ALPHA)
    } else {
        base
    }
}

/// Fill color of a chip given its visual situation.
fn chip_fill(
    base: Color,
    dimmed: bool,
    picked: bool,
    pending: bool,
    dragging: bool,
) -> Color {
    let color = if pending {
        PENDING_FILL
    } else if picked {
        PICKED_FILL
    } else {
        base
    };
    if dragging {
        color.with_alpha(0.5)
    } else if dimmed {
        color.with_alpha(DIM_ALPHA)
    } else {
        color
    }
}

/// System: resolve dim/hover/selection state into sprite colors.
///
/// While a query is active, enclosures without a match (and inactive
/// enclosures always) are de-emphasized; the drag hover target is
/// highlighted; picked and pending occupants are tinted.
pub fn apply_visual_state(
    search: Res<SearchState>,
    hover: Res<HoverTarget>,
    drag_state: Res<DragState>,
    picked: Res<Picked>,
    chip_index: Res<ChipIndex>,
    mut enclosure_sprites: Query<(&EnclosureMarker, &mut Sprite)>,
    mut chip_sprites: Query<(&ChipMarker, &mut Sprite), Without<EnclosureMarker>>,
) {
    let anything_changed = search.is_changed()
        || hover.is_changed()
        || drag_state.is_changed()
        || picked.is_changed()
        || chip_index.is_changed();
    if !anything_changed {
        return;
    }

    let dragging_id = match &*drag_state {
        DragState::Dragging { occupant_id, .. } => Some(occupant_id.as_str()),
        _ => None,
    };
    let pending_id = drag_state.pending();

    for (marker, mut sprite) in &mut enclosure_sprites {
        let dimmed = is_inactive(&marker.code)
            || (search.active() && !search.enclosures_with_matches.contains(&marker.code));
        let hovered = hover.0.as_deref() == Some(marker.code.as_str());
        sprite.color = enclosure_fill(dimmed, hovered);
    }

    for (marker, mut sprite) in &mut chip_sprites {
        let enclosure_dimmed = is_inactive(&marker.enclosure)
            || (search.active() && !search.match_set.contains(&marker.occupant_id));
        sprite.color = chip_fill(
            marker.base_color,
            enclosure_dimmed,
            picked.contains(&marker.occupant_id),
            pending_id == Some(marker.occupant_id.as_str()),
            dragging_id == Some(marker.occupant_id.as_str()),
        );
    }
}
