//! Rendering surface boundary and the hexagon template rasterizer.
//!
//! A [`TileSurface`] turns a [`HexTemplate`] into a texture once per factory.
//! The pixels themselves come from [`HexTemplate::rasterize`], which is plain
//! CPU work so headless surfaces and the Bevy image store draw the same thing.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::error::TileError;
use crate::geometry::{TileGeometry, convex_contains};

/// Largest texture side accepted, matching wgpu's default 2D texture limit.
pub const MAX_TEXTURE_SIDE: u32 = 8192;

/// Builds a color from a `0xRRGGBB` literal.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Everything needed to draw the shared tile texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexTemplate {
    /// Shape and border width.
    pub geometry: TileGeometry,
    /// Interior color.
    pub fill: Color,
    /// Border stroke color.
    pub border: Color,
}

impl HexTemplate {
    /// Texture dimensions in pixels: the unrotated bounding box, rounded up.
    pub fn texture_size(&self) -> UVec2 {
        let size = Vec2::new(self.geometry.width(), self.geometry.height());
        size.ceil().as_uvec2().max(UVec2::ONE)
    }

    /// [`texture_size`](Self::texture_size), or an error past [`MAX_TEXTURE_SIDE`].
    pub fn checked_texture_size(&self) -> Result<UVec2, TileError> {
        let size = self.texture_size();
        if size.max_element() > MAX_TEXTURE_SIDE {
            return Err(TileError::TextureTooLarge {
                width: size.x,
                height: size.y,
                max: MAX_TEXTURE_SIDE,
            });
        }
        Ok(size)
    }

    /// Color of the texel whose centre is at `texel` (texture pixels, y down).
    ///
    /// `None` is transparent.
    pub fn texel_color(&self, texel: Vec2) -> Option<Color> {
        let g = &self.geometry;
        let texture_center = self.texture_size().as_vec2() * 0.5;
        let local = texel - texture_center + g.local_center();

        let inner = g.inner_radius();
        if inner > 0.0 && convex_contains(&g.regular_polygon(inner), local) {
            return Some(self.fill);
        }
        let outer = g.fill_radius() + g.hex_border() / 2.0;
        if g.hex_border() > 0.0 && convex_contains(&g.regular_polygon(outer), local) {
            return Some(self.border);
        }
        None
    }

    /// RGBA8 (sRGB) pixels, row-major from the top-left texel.
    pub fn rasterize(&self) -> Vec<u8> {
        let size = self.texture_size();
        let fill = self.fill.to_srgba().to_u8_array();
        let border = self.border.to_srgba().to_u8_array();

        let texels = (size.x as usize).saturating_mul(size.y as usize);
        let mut data = Vec::with_capacity(texels.saturating_mul(4));
        for y in 0..size.y {
            for x in 0..size.x {
                let texel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let rgba = match self.texel_color(texel) {
                    Some(c) if c == self.fill => fill,
                    Some(_) => border,
                    None => [0; 4],
                };
                data.extend_from_slice(&rgba);
            }
        }
        data
    }
}

/// Something that can turn a [`HexTemplate`] into a reusable texture.
pub trait TileSurface {
    /// Handle to the generated texture; cloning must share, not copy, pixels.
    type Texture: Clone;

    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether this surface can rasterize polygon templates at all.
    fn supports_polygons(&self) -> bool {
        true
    }

    /// Draws the template once and returns the shared texture.
    fn generate_texture(&mut self, template: &HexTemplate) -> Self::Texture;
}

impl TileSurface for Assets<Image> {
    type Texture = Handle<Image>;

    fn name(&self) -> &'static str {
        "bevy image assets"
    }

    fn generate_texture(&mut self, template: &HexTemplate) -> Handle<Image> {
        let size = template.texture_size();
        let image = Image::new(
            Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            template.rasterize(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );
        self.add(image)
    }
}
