// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — vector-to-raster conversion and PNG encoding.

pub mod svg;

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use resinmask_core::error::{MaskError, Result};

pub use svg::SvgRasterizer;

/// Converts layer markup into a board-sized raster.
///
/// Implementations must return an image of exactly `size` pixels and fail
/// with `MaskError::Rasterization` when the markup cannot be rendered.
pub trait Rasterizer {
    fn rasterize(
        &self,
        markup: &str,
        size: (u32, u32),
    ) -> impl Future<Output = Result<RgbaImage>> + Send;
}

/// Encode a raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| MaskError::Image(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trips_dimensions() {
        let img = RgbaImage::from_pixel(7, 3, Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
