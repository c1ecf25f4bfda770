//! Hexagon tile geometry: bounding size, rotation, hit polygon, and fill shape.
//!
//! Everything here is a pure function of `(side_length, hex_border, orientation)`.
//! Coordinates use the tile's local, unrotated frame: origin at the top-left
//! corner of the bounding box, x to the right, y downwards. Rotation is applied
//! by whoever renders the tile, never baked into the dimensions.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
use std::fmt;
use std::str::FromStr;

use bevy::prelude::{Reflect, Vec2};

use crate::error::TileError;

/// Signed-distance slack for [`convex_contains`], in local units.
const EDGE_TOLERANCE: f32 = 1e-3;

/// How tiles present themselves on screen.
///
/// `Vertical` tiles are drawn as-is (a vertex at the top, rows interlock
/// vertically). `Horizontal` tiles are the same shape rotated a quarter turn,
/// so columns interlock instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum Orientation {
    /// Unrotated; offset rows.
    Vertical,
    /// Rotated by π/2; offset columns.
    #[default]
    Horizontal,
}

impl Orientation {
    /// Rotation applied to each rendered tile, in radians.
    pub fn rotation(self) -> f32 {
        match self {
            Orientation::Vertical => 0.0,
            Orientation::Horizontal => FRAC_PI_2,
        }
    }
}

impl FromStr for Orientation {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(TileError::UnknownOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => f.write_str("vertical"),
            Orientation::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Derived dimensions of one hexagon tile.
///
/// The border is drawn outward, so the effective side length grows by half the
/// border width and the fillable interior keeps the requested size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGeometry {
    side_length: f32,
    hex_border: f32,
    orientation: Orientation,
    effective_side_length: f32,
    width: f32,
    height: f32,
}

impl TileGeometry {
    /// Validates the inputs and derives the tile dimensions.
    ///
    /// A border wider than twice the side length is accepted; the visible
    /// fill then collapses (see [`TileGeometry::inner_radius`]).
    pub fn new(
        side_length: f32,
        hex_border: f32,
        orientation: Orientation,
    ) -> Result<Self, TileError> {
        if !side_length.is_finite() || side_length <= 0.0 {
            return Err(TileError::InvalidSideLength(side_length));
        }
        if !hex_border.is_finite() || hex_border < 0.0 {
            return Err(TileError::InvalidBorder(hex_border));
        }

        let effective_side_length = side_length + hex_border / 2.0;
        Ok(Self {
            side_length,
            hex_border,
            orientation,
            effective_side_length,
            width: effective_side_length * 3f32.sqrt(),
            height: effective_side_length * 2.0,
        })
    }

    /// Side length as requested, before border inflation.
    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    /// Border stroke width.
    pub fn hex_border(&self) -> f32 {
        self.hex_border
    }

    /// Orientation the geometry was derived for.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// `side_length + hex_border / 2`.
    pub fn effective_side_length(&self) -> f32 {
        self.effective_side_length
    }

    /// Bounding width in the unrotated frame (`effective · √3`).
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Bounding height in the unrotated frame (`effective · 2`).
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Rotation applied to the rendered instance, in radians.
    pub fn rotation(&self) -> f32 {
        self.orientation.rotation()
    }

    /// On-screen bounding size once rotation is applied.
    pub fn rotated_size(&self) -> Vec2 {
        match self.orientation {
            Orientation::Vertical => Vec2::new(self.width, self.height),
            Orientation::Horizontal => Vec2::new(self.height, self.width),
        }
    }

    /// Centre of the bounding box in the local frame.
    pub fn local_center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// The clickable region, clockwise from the top vertex.
    pub fn hit_polygon(&self) -> [Vec2; 6] {
        let (w, h) = (self.width, self.height);
        [
            Vec2::new(w * 0.5, 0.0),
            Vec2::new(w, h * 0.25),
            Vec2::new(w, h * 0.75),
            Vec2::new(w * 0.5, h),
            Vec2::new(0.0, h * 0.75),
            Vec2::new(0.0, h * 0.25),
        ]
    }

    /// Circumradius of the fill path; the border stroke is centred on it.
    pub fn fill_radius(&self) -> f32 {
        self.effective_side_length - self.hex_border / 2.0
    }

    /// Radius of the visible fill inside the border stroke.
    ///
    /// Non-positive when `hex_border >= 2 · side_length`.
    pub fn inner_radius(&self) -> f32 {
        self.fill_radius() - self.hex_border / 2.0
    }

    /// Regular hexagon of `radius` centred on the tile, first vertex pointing up.
    pub fn regular_polygon(&self, radius: f32) -> [Vec2; 6] {
        let center = self.local_center();
        std::array::from_fn(|i| {
            let angle = -FRAC_PI_2 + i as f32 * FRAC_PI_3;
            center + Vec2::from_angle(angle) * radius
        })
    }

    /// The fill path the template is drawn from.
    pub fn fill_polygon(&self) -> [Vec2; 6] {
        self.regular_polygon(self.fill_radius())
    }

    /// Whether a local-frame point falls inside the hit polygon (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        convex_contains(&self.hit_polygon(), point)
    }

    /// Offset from the placement origin to the rendered centre after rotation.
    ///
    /// Placement positions refer to the top-left corner of the unrotated tile;
    /// renderers that anchor sprites at their centre add this to the position.
    pub fn center_offset(&self) -> Vec2 {
        Vec2::from_angle(self.rotation()).rotate(self.local_center())
    }

    /// Maps a point from a centre-anchored, y-up frame into the local frame.
    pub fn local_from_centered(&self, centered: Vec2) -> Vec2 {
        Vec2::new(
            centered.x + self.width * 0.5,
            self.height * 0.5 - centered.y,
        )
    }
}

/// Inclusive point-in-polygon test for convex polygons of either winding.
pub fn convex_contains(polygon: &[Vec2], point: Vec2) -> bool {
    let mut left = false;
    let mut right = false;
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let edge = b - a;
        let len = edge.length();
        if len <= f32::EPSILON {
            continue;
        }
        let distance = edge.perp_dot(point - a) / len;
        if distance > EDGE_TOLERANCE {
            left = true;
        } else if distance < -EDGE_TOLERANCE {
            right = true;
        }
        if left && right {
            return false;
        }
    }
    true
}
