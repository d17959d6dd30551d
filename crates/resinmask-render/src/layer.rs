// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-layer render: mirror -> rasterize -> place -> expose -> preview.

use image::RgbaImage;
use resinmask_core::error::{MaskError, Result};
use resinmask_core::types::{BoardLayer, CalibrationSpec, PlacementOptions, PrinterProfile};
use tracing::{debug, info, instrument};

use crate::artwork::{Affine, BoardArtwork, apply_transform};
use crate::plate::calibration::render_grid;
use crate::plate::{BoardPlacement, ExposureCell, PlateCompositor};
use crate::raster::Rasterizer;

/// Everything produced for one layer before file encoding.
#[derive(Debug, Clone)]
pub struct RenderedLayer {
    pub placement: BoardPlacement,
    /// Row-major exposure steps; a single cell without calibration.
    pub cells: Vec<ExposureCell>,
    /// Plate in working orientation, turned back from the first slice.
    pub preview: RgbaImage,
    /// Board region of the preview at the profile's preview resolution.
    pub thumbnail: RgbaImage,
}

enum Exposure<'a> {
    Single(f64),
    Grid(&'a CalibrationSpec),
}

/// Render one layer onto the printer's plate.
///
/// Configuration errors (missing or non-positive exposure time, degenerate
/// calibration) are reported before the artwork is rasterized.
#[instrument(skip_all, fields(layer = %layer.id, side = %layer.side))]
pub async fn render_layer<R: Rasterizer>(
    rasterizer: &R,
    layer: &BoardLayer,
    options: &PlacementOptions,
    profile: &PrinterProfile,
) -> Result<RenderedLayer> {
    let exposure = match &options.calibration {
        Some(spec) => {
            spec.validate()?;
            Exposure::Grid(spec)
        }
        None => Exposure::Single(options.exposure_time(&layer.id)?),
    };

    let artwork = BoardArtwork::parse(&layer.markup)?;
    let mirror = Affine::mirror(&artwork.view_box, profile.flips.for_side(layer.side));
    let markup = if mirror.is_identity() {
        layer.markup.clone()
    } else {
        apply_transform(&layer.markup, &mirror)?
    };

    let board_size = (
        board_pixels(profile, artwork.width_mm)?,
        board_pixels(profile, artwork.height_mm)?,
    );
    debug!(board_w = board_size.0, board_h = board_size.1, "Board size resolved");

    let board = rasterizer.rasterize(&markup, board_size).await?;
    if board.dimensions() != board_size {
        return Err(MaskError::Rasterization(format!(
            "rasterizer returned {}x{}, expected {}x{}",
            board.width(),
            board.height(),
            board_size.0,
            board_size.1
        )));
    }

    let compositor = PlateCompositor::new(profile);
    let offset = (
        profile.mm_to_px(options.anchor_offset_mm[0]),
        profile.mm_to_px(options.anchor_offset_mm[1]),
    );
    let placement = compositor.place(board_size, options.anchor_corner, offset);
    let mut canvas = compositor.compose(&board, &placement, layer.inverted);

    let cells = match exposure {
        Exposure::Single(duration_s) => vec![ExposureCell {
            duration_s,
            raster: canvas.slice(),
        }],
        Exposure::Grid(spec) => render_grid(&mut canvas, &placement, spec)?,
    };

    let first = cells
        .first()
        .ok_or_else(|| MaskError::DegenerateCalibration("no exposure cells produced".into()))?;
    let preview = compositor.preview(&first.raster);
    let thumbnail = compositor.thumbnail(&preview, &placement, profile.preview_resolution);

    info!(cells = cells.len(), "Layer rendered");
    Ok(RenderedLayer {
        placement,
        cells,
        preview,
        thumbnail,
    })
}

fn board_pixels(profile: &PrinterProfile, mm: f64) -> Result<u32> {
    let px = profile.mm_to_px(mm);
    u32::try_from(px)
        .ok()
        .filter(|&px| px > 0)
        .ok_or_else(|| {
            MaskError::MalformedMarkup(format!(
                "{mm}mm does not cover a whole pixel at {}mm pitch",
                profile.pixel_pitch_mm
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SvgRasterizer;
    use image::Rgba;
    use resinmask_core::types::{AnchorCorner, AxisFlip, FlipFlags, Interpolation, Side};

    /// 2mm x 1mm board: left half black, right half transparent.
    const HALF: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2mm" height="1mm" viewBox="0 0 20 10"><rect x="0" y="0" width="10" height="10" fill="#000"/></svg>"##;

    /// Fills every board with one opaque colour.
    struct Solid(Rgba<u8>);

    impl Rasterizer for Solid {
        async fn rasterize(&self, _markup: &str, size: (u32, u32)) -> Result<RgbaImage> {
            Ok(RgbaImage::from_pixel(size.0, size.1, self.0))
        }
    }

    /// Always returns a 1x1 image.
    struct WrongSize;

    impl Rasterizer for WrongSize {
        async fn rasterize(&self, _markup: &str, _size: (u32, u32)) -> Result<RgbaImage> {
            Ok(RgbaImage::new(1, 1))
        }
    }

    fn profile(flips: FlipFlags) -> PrinterProfile {
        PrinterProfile {
            model: "test".into(),
            resolution: [60, 100],
            pixel_pitch_mm: 0.1,
            preview_resolution: [10, 5],
            file_format: "pwms".into(),
            rotate_180: true,
            flips,
        }
    }

    fn layer(side: Side) -> BoardLayer {
        BoardLayer {
            id: "copper".into(),
            side,
            filename: "copper.svg".into(),
            markup: HALF.into(),
            inverted: false,
            display_order: 0,
        }
    }

    fn options() -> PlacementOptions {
        let mut options = PlacementOptions {
            anchor_corner: AnchorCorner::TopLeft,
            anchor_offset_mm: [1.0, 0.5],
            ..Default::default()
        };
        options.exposure_times.insert("copper".into(), 6.0);
        options
    }

    fn is_black(img: &RgbaImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y).0 == [0u8, 0, 0, 255]
    }

    #[tokio::test]
    async fn single_exposure_layer() {
        let rendered = render_layer(
            &SvgRasterizer::new(),
            &layer(Side::Top),
            &options(),
            &profile(FlipFlags::default()),
        )
        .await
        .unwrap();

        assert_eq!(rendered.cells.len(), 1);
        assert_eq!(rendered.cells[0].duration_s, 6.0);
        assert_eq!(rendered.cells[0].raster.dimensions(), (60, 100));
        assert_eq!(
            rendered.placement,
            BoardPlacement { x: 10, y: 5, width: 20, height: 10 }
        );
        assert_eq!(rendered.preview.dimensions(), (100, 60));
        assert_eq!(rendered.thumbnail.dimensions(), (10, 5));
        // Unflipped: black on the left half of the board.
        assert!(is_black(&rendered.preview, 12, 8));
        assert!(!is_black(&rendered.preview, 27, 8));
    }

    #[tokio::test]
    async fn side_flags_mirror_artwork() {
        let flips = FlipFlags {
            top: AxisFlip::default(),
            bottom: AxisFlip { horizontal: true, vertical: false },
        };
        let rendered = render_layer(
            &SvgRasterizer::new(),
            &layer(Side::Bottom),
            &options(),
            &profile(flips),
        )
        .await
        .unwrap();
        assert!(!is_black(&rendered.preview, 12, 8));
        assert!(is_black(&rendered.preview, 27, 8));
    }

    #[tokio::test]
    async fn calibration_layer_produces_grid() {
        let mut options = options();
        options.exposure_times.clear();
        options.calibration = Some(CalibrationSpec {
            rows: 2,
            columns: 3,
            min_time_s: 1.0,
            max_time_s: 6.0,
            interpolation: Interpolation::Linear,
        });
        let rendered = render_layer(
            &Solid(Rgba([255, 255, 255, 255])),
            &layer(Side::Top),
            &options,
            &profile(FlipFlags::default()),
        )
        .await
        .unwrap();
        assert_eq!(rendered.cells.len(), 6);
        assert!(rendered.cells.iter().all(|c| (c.duration_s - 1.0).abs() < 1e-9));
        // The preview comes from the first, unmasked capture.
        assert!(!is_black(&rendered.preview, 10, 14));
    }

    #[tokio::test]
    async fn missing_exposure_time_fails_before_rasterizing() {
        let mut options = options();
        options.exposure_times.clear();
        let result = render_layer(
            &WrongSize,
            &layer(Side::Top),
            &options,
            &profile(FlipFlags::default()),
        )
        .await;
        assert!(matches!(result, Err(MaskError::MissingExposureTime(_))));
    }

    #[tokio::test]
    async fn non_positive_exposure_time_fails_before_rasterizing() {
        for seconds in [0.0, -5.0, f64::NAN] {
            let mut options = options();
            options.exposure_times.insert("copper".into(), seconds);
            let result = render_layer(
                &WrongSize,
                &layer(Side::Top),
                &options,
                &profile(FlipFlags::default()),
            )
            .await;
            assert!(
                matches!(&result, Err(MaskError::InvalidExposureTime(id, _)) if id == "copper"),
                "{seconds} gave {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn wrong_raster_size_is_rejected() {
        let result = render_layer(
            &WrongSize,
            &layer(Side::Top),
            &options(),
            &profile(FlipFlags::default()),
        )
        .await;
        assert!(matches!(result, Err(MaskError::Rasterization(_))));
    }

    #[tokio::test]
    async fn malformed_markup_is_fatal() {
        let mut bad = layer(Side::Top);
        bad.markup = "<svg xmlns=\"http://www.w3.org/2000/svg\"/>".into();
        let result = render_layer(
            &Solid(Rgba([0, 0, 0, 255])),
            &bad,
            &options(),
            &profile(FlipFlags::default()),
        )
        .await;
        assert!(matches!(result, Err(MaskError::MalformedMarkup(_))));
    }
}
