//! A single interactive tile: its visual record and its two-state toggle.

use bevy::prelude::{Color, Reflect, Vec2};

/// Interaction state of one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum TileState {
    /// Neutral tint. Every tile starts here.
    #[default]
    Unselected,
    /// Highlight tint.
    Selected,
}

impl TileState {
    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            TileState::Unselected => TileState::Selected,
            TileState::Selected => TileState::Unselected,
        }
    }
}

/// Per-instance visual data. The texture is shared; everything else is owned.
#[derive(Clone, Debug, PartialEq)]
pub struct TileVisual<T> {
    /// Shared template texture.
    pub texture: T,
    /// Placement of the unrotated top-left corner, screen space (y down).
    pub position: Vec2,
    /// Rotation in radians, clockwise on screen.
    pub rotation: f32,
    /// Multiplicative tint; white is untinted.
    pub tint: Color,
    /// Clickable region in the local, unrotated frame.
    pub hit_area: [Vec2; 6],
}

/// One tile of the grid.
///
/// Pointer handling is an explicit method rather than a captured callback:
/// whatever delivers pointer events calls [`Tile::handle_pointer_down`] on the
/// tile it hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile<T> {
    visual: TileVisual<T>,
    state: TileState,
    highlight: Color,
}

impl<T> Tile<T> {
    /// Neutral tint applied while unselected.
    pub const NEUTRAL_TINT: Color = Color::WHITE;

    /// Wraps a visual; the tile starts unselected with a neutral tint.
    pub fn new(mut visual: TileVisual<T>, highlight: Color) -> Self {
        visual.tint = Self::NEUTRAL_TINT;
        Self {
            visual,
            state: TileState::Unselected,
            highlight,
        }
    }

    /// The visual record.
    pub fn visual(&self) -> &TileVisual<T> {
        &self.visual
    }

    /// Current interaction state.
    pub fn state(&self) -> TileState {
        self.state
    }

    /// `true` while selected.
    pub fn is_clicked(&self) -> bool {
        self.state == TileState::Selected
    }

    /// Toggles the state and retints. Returns the new state.
    pub fn handle_pointer_down(&mut self) -> TileState {
        self.state = self.state.toggled();
        self.visual.tint = match self.state {
            TileState::Selected => self.highlight,
            TileState::Unselected => Self::NEUTRAL_TINT,
        };
        self.state
    }

    /// Moves the tile. Does not touch the interaction state.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.visual.position = Vec2::new(x, y);
    }
}
