// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// resvg-backed rasterizer. The SVG is stretched to the requested pixel size
// on a transparent pixmap and returned as straight-alpha RGBA.

use image::{Rgba, RgbaImage};
use resinmask_core::error::{MaskError, Result};
use tiny_skia::{Pixmap, Transform};
use tracing::{debug, instrument};

use super::Rasterizer;

/// Rasterizer built on `usvg` parsing and `resvg` rendering.
#[derive(Debug, Clone, Copy)]
pub struct SvgRasterizer {
    shape_rendering: usvg::ShapeRendering,
}

impl Default for SvgRasterizer {
    /// Masks are rendered with crisp edges.
    fn default() -> Self {
        Self {
            shape_rendering: usvg::ShapeRendering::CrispEdges,
        }
    }
}

impl SvgRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous rendering used by the async trait method.
    #[instrument(skip_all, fields(markup_len = markup.len(), width = size.0, height = size.1))]
    pub fn render(&self, markup: &str, size: (u32, u32)) -> Result<RgbaImage> {
        let (width, height) = size;
        let options = usvg::Options {
            shape_rendering: self.shape_rendering,
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(markup, &options)
            .map_err(|err| MaskError::Rasterization(format!("failed to parse SVG: {err}")))?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            MaskError::Rasterization(format!("cannot allocate a {width}x{height} pixmap"))
        })?;

        let svg_size = tree.size();
        let transform = Transform::from_scale(
            width as f32 / svg_size.width(),
            height as f32 / svg_size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let mut img = RgbaImage::new(width, height);
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        debug!("SVG rasterized");
        Ok(img)
    }
}

impl Rasterizer for SvgRasterizer {
    async fn rasterize(&self, markup: &str, size: (u32, u32)) -> Result<RgbaImage> {
        self.render(markup, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half black, right half empty.
    const HALF: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="4mm" viewBox="0 0 10 4"><rect x="0" y="0" width="5" height="4" fill="#000"/></svg>"##;

    #[test]
    fn renders_stretched_to_target() {
        let img = SvgRasterizer::new().render(HALF, (20, 8)).unwrap();
        assert_eq!(img.dimensions(), (20, 8));
        assert_eq!(*img.get_pixel(3, 4), Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(16, 4).0[3], 0);
    }

    #[test]
    fn garbage_is_rasterization_error() {
        let result = SvgRasterizer::new().render("not svg", (4, 4));
        assert!(matches!(result, Err(MaskError::Rasterization(_))));
    }

    #[test]
    fn zero_size_is_rasterization_error() {
        let result = SvgRasterizer::new().render(HALF, (0, 4));
        assert!(matches!(result, Err(MaskError::Rasterization(_))));
    }

    #[tokio::test]
    async fn trait_method_matches_sync_render() {
        let rasterizer = SvgRasterizer::new();
        let via_trait = rasterizer.rasterize(HALF, (10, 4)).await.unwrap();
        assert_eq!(via_trait, rasterizer.render(HALF, (10, 4)).unwrap());
    }
}
