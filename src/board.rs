//! Tile board: builds the factory at startup, spawns the grid, routes presses.
//!
//! The grid lives under one [`TileBoard`] container entity whose origin sits
//! at the window's top-left corner plus [`BoardConfig::grid_offset`]. Each
//! tile is a sprite child carrying its [`HexTile`] state and its own press
//! observer.

mod entities;
mod systems;

pub use entities::{HexTile, TileBoard, TileCoord, TilePressed};
pub use systems::{board_origin, pointer_presses, tile_transform, topmost_tile_at, world_center};

use bevy::prelude::*;

use crate::GameState;
use crate::factory::TileStyle;
use crate::geometry::Orientation;
use crate::surface::hex_color;

/// Configuration for the tile board.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BoardConfig {
    /// Shape and colors shared by every tile.
    pub tiles: TileStyle,
    /// Grid rows; non-positive yields an empty board.
    pub rows: i32,
    /// Grid columns; non-positive yields an empty board.
    pub columns: i32,
    /// Logical window size, also used when no window exists.
    pub window_size: UVec2,
    /// Container offset from the window's top-left corner (screen space, y down).
    pub grid_offset: Vec2,
    /// Background clear color.
    pub clear_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let side_length = 50.0;
        Self {
            tiles: TileStyle {
                side_length,
                hex_border: 5.0,
                orientation: Orientation::Horizontal,
                fill: hex_color(0xffffff),
                border: hex_color(0x999999),
                highlight: hex_color(0x30a211),
            },
            rows: 20,
            columns: 20,
            window_size: UVec2::new(640, 480),
            grid_offset: Vec2::splat(-side_length),
            clear_color: hex_color(0x6495ed),
        }
    }
}

/// Interactive hexagon tile board.
pub struct BoardPlugin(pub BoardConfig);

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BoardConfig>()
            .register_type::<TileCoord>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(Startup, systems::spawn_board)
            .add_systems(
                Update,
                (
                    systems::anchor_board,
                    systems::dispatch_pointer_presses.run_if(in_state(GameState::Running)),
                    systems::sync_tile_visuals,
                )
                    .chain(),
            );
    }
}
