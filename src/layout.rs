//! Offset-coordinate grid placement.
//!
//! Cells are addressed by `(row, column)`. Odd rows are pushed half a tile
//! along the packing axis so neighbouring rows interlock. Each cell also maps
//! onto an axial [`Hex`] coordinate; projecting that coordinate gives the same
//! placement, which is how the two orientation formulas are cross-checked.

use bevy::prelude::{Reflect, Vec2};
use hexx::Hex;

use crate::geometry::{Orientation, TileGeometry};

/// One cell of a rectangular offset grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub struct GridCell {
    /// Row index, top to bottom.
    pub row: i32,
    /// Column index, left to right.
    pub column: i32,
}

impl GridCell {
    /// Cell at `(row, column)`.
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Whether this row is shifted by half a tile.
    pub fn is_shifted(self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    /// Axial coordinate of this cell for the given orientation.
    ///
    /// Vertical grids are "odd-r" offset grids of pointy hexes. Horizontal grids
    /// place rows half a tile apart, which in axial terms puts consecutive
    /// cells of a row two flat-hex columns apart.
    pub fn axial(self, orientation: Orientation) -> Hex {
        let shift = self.row.rem_euclid(2);
        match orientation {
            Orientation::Vertical => Hex::new(self.column - self.row.div_euclid(2), self.row),
            Orientation::Horizontal => {
                let q = 2 * self.column + shift;
                Hex::new(q, self.row.div_euclid(2) - self.column)
            }
        }
    }
}

/// Placement of a cell's local origin in screen space (y down).
pub fn cell_position(geometry: &TileGeometry, cell: GridCell) -> Vec2 {
    let (w, h) = (geometry.width(), geometry.height());
    let (row, column) = (cell.row as f32, cell.column as f32);
    match geometry.orientation() {
        Orientation::Vertical => {
            let shift = if cell.is_shifted() { w / 2.0 } else { 0.0 };
            Vec2::new(column * w + shift, row * h * 0.75)
        }
        Orientation::Horizontal => {
            let shift = if cell.is_shifted() { h * 0.75 } else { 0.0 };
            Vec2::new(column * h * 1.5 + shift, row * w * 0.5)
        }
    }
}

/// Projects an axial coordinate into screen space, relative to cell `(0, 0)`.
pub fn axial_position(geometry: &TileGeometry, hex: Hex) -> Vec2 {
    let (w, h) = (geometry.width(), geometry.height());
    let (q, r) = (hex.x as f32, hex.y as f32);
    match geometry.orientation() {
        Orientation::Vertical => Vec2::new(w * (q + r / 2.0), h * 0.75 * r),
        Orientation::Horizontal => Vec2::new(h * 0.75 * q, w * (r + q / 2.0)),
    }
}

/// Row-major cells of a `rows × columns` grid; empty when either is not positive.
pub fn grid_cells(rows: i32, columns: i32) -> impl Iterator<Item = GridCell> {
    let (rows, columns) = if rows <= 0 || columns <= 0 {
        (0, 0)
    } else {
        (rows, columns)
    };
    (0..rows).flat_map(move |row| (0..columns).map(move |column| GridCell::new(row, column)))
}
