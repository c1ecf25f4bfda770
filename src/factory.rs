//! Tile factory: one shared texture, many independently placed tiles.

use bevy::prelude::*;

use crate::error::TileError;
use crate::geometry::{Orientation, TileGeometry};
use crate::layout::{GridCell, cell_position, grid_cells};
use crate::surface::{HexTemplate, TileSurface};
use crate::tile::{Tile, TileVisual};

/// Global parameters every tile of a factory shares.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct TileStyle {
    /// Requested side length, before border inflation.
    pub side_length: f32,
    /// Border stroke width, drawn outward.
    pub hex_border: f32,
    /// Tile orientation.
    pub orientation: Orientation,
    /// Interior color of the template.
    pub fill: Color,
    /// Border color of the template.
    pub border: Color,
    /// Tint applied to selected tiles.
    pub highlight: Color,
}

/// Produces tiles that all reference one texture drawn at construction.
#[derive(Debug)]
pub struct TileFactory<T> {
    geometry: TileGeometry,
    template: HexTemplate,
    highlight: Color,
    texture: T,
}

impl<T: Clone> TileFactory<T> {
    /// Validates `style`, then asks `surface` to draw the shared texture once.
    pub fn new<S>(style: &TileStyle, surface: &mut S) -> Result<Self, TileError>
    where
        S: TileSurface<Texture = T>,
    {
        let geometry = TileGeometry::new(style.side_length, style.hex_border, style.orientation)?;
        if !surface.supports_polygons() {
            return Err(TileError::UnsupportedSurface(surface.name()));
        }

        let template = HexTemplate {
            geometry,
            fill: style.fill,
            border: style.border,
        };
        let size = template.checked_texture_size()?;
        let texture = surface.generate_texture(&template);
        debug!("tile texture {}x{} drawn on {}", size.x, size.y, surface.name());

        Ok(Self {
            geometry,
            template,
            highlight: style.highlight,
            texture,
        })
    }

    /// Derived tile geometry.
    pub fn geometry(&self) -> &TileGeometry {
        &self.geometry
    }

    /// The template the shared texture was drawn from.
    pub fn template(&self) -> &HexTemplate {
        &self.template
    }

    /// The shared texture.
    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// One tile at `(x, y)`, sharing the factory texture.
    pub fn produce(&self, x: f32, y: f32) -> Tile<T> {
        let mut tile = Tile::new(
            TileVisual {
                texture: self.texture.clone(),
                position: Vec2::ZERO,
                rotation: self.geometry.rotation(),
                tint: Color::WHITE,
                hit_area: self.geometry.hit_polygon(),
            },
            self.highlight,
        );
        tile.set_position(x, y);
        tile
    }

    /// Screen-space placement of a grid cell.
    pub fn place(&self, cell: GridCell) -> Vec2 {
        cell_position(&self.geometry, cell)
    }

    /// One tile placed at `cell`.
    pub fn produce_cell(&self, cell: GridCell) -> Tile<T> {
        let pos = self.place(cell);
        self.produce(pos.x, pos.y)
    }

    /// `rows × columns` tiles, row-major. Non-positive bounds give an empty grid.
    pub fn produce_grid(&self, rows: i32, columns: i32) -> Vec<Vec<Tile<T>>> {
        let mut grid: Vec<Vec<Tile<T>>> = Vec::new();
        for cell in grid_cells(rows, columns) {
            if cell.column == 0 {
                grid.push(Vec::with_capacity(columns as usize));
            }
            if let Some(row) = grid.last_mut() {
                row.push(self.produce_cell(cell));
            }
        }
        grid
    }
}
