#![warn(missing_docs)]
//! Interactive hexagon tiles.
//!
//! A [`factory::TileFactory`] derives tile geometry from a side length, border
//! width, and orientation, draws one shared texture, and produces tiles placed
//! on an offset hex grid. Each [`tile::Tile`] toggles between unselected and
//! selected on pointer press. The [`board`] plugin wires this into Bevy.

pub mod board;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod layout;
pub mod surface;
pub mod tile;

pub use error::TileError;
pub use factory::{TileFactory, TileStyle};
pub use geometry::{Orientation, TileGeometry};
pub use layout::GridCell;
pub use tile::{Tile, TileState};

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Tiles respond to pointer presses.
    #[default]
    Running,
    /// World inspector open (Tab to toggle); presses are ignored.
    Debugging,
}
