use bevy::prelude::*;
use hexx::Hex;

use crate::geometry::TileGeometry;
use crate::layout::GridCell;
use crate::tile::Tile;

/// Container entity that parents every tile sprite.
#[derive(Component)]
pub struct TileBoard {
    /// Geometry shared by all tiles on this board.
    pub geometry: TileGeometry,
}

/// Tile state attached to each sprite.
#[derive(Component, Debug)]
pub struct HexTile {
    /// Visual record and toggle state.
    pub tile: Tile<Handle<Image>>,
}

/// Where a tile sits in the grid.
#[derive(Component, Reflect, Clone, Copy, Debug)]
pub struct TileCoord {
    /// Offset `(row, column)` cell.
    pub cell: GridCell,
    /// Axial coordinate of the same cell.
    pub hex: Hex,
}

/// A pointer press landed inside this tile's hit polygon.
#[derive(EntityEvent, Debug)]
pub struct TilePressed {
    /// The tile that was hit.
    pub entity: Entity,
}
