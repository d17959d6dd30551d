// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plate compositor — places a board raster on the landscape working canvas,
// captures native-orientation slicing rasters and derives previews from
// those exact pixels.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use resinmask_core::types::{AnchorCorner, PrinterProfile};
use tracing::{debug, info, instrument};

use super::orientation::PlateOrientation;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Board rectangle on the working canvas, in pixels. The origin may be
/// negative or past the plate edge; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPlacement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl BoardPlacement {
    /// Intersection with a `width` x `height` canvas as (x, y, w, h), or
    /// `None` if the board lies entirely off the canvas.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + i64::from(self.width)).min(i64::from(width));
        let y1 = (self.y + i64::from(self.height)).min(i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// Lays boards out on one printer's build plate.
#[derive(Debug, Clone, Copy)]
pub struct PlateCompositor {
    working: (u32, u32),
    orientation: PlateOrientation,
}

impl PlateCompositor {
    pub fn new(profile: &PrinterProfile) -> Self {
        Self {
            working: profile.working_size(),
            orientation: PlateOrientation::from_profile(profile),
        }
    }

    /// Landscape canvas size (width >= height).
    pub fn working_size(&self) -> (u32, u32) {
        self.working
    }

    /// Resolve the board origin for an anchor corner and a pixel offset.
    ///
    /// The centre anchor uses floor division so that an exactly centred
    /// board never moves by a rounding step.
    pub fn place(
        &self,
        board: (u32, u32),
        corner: AnchorCorner,
        offset: (i64, i64),
    ) -> BoardPlacement {
        let (plate_w, plate_h) = (i64::from(self.working.0), i64::from(self.working.1));
        let (board_w, board_h) = (i64::from(board.0), i64::from(board.1));
        let (off_x, off_y) = offset;

        let (x, y) = match corner {
            AnchorCorner::TopLeft => (off_x, off_y),
            AnchorCorner::TopRight => (plate_w - off_x - board_w, off_y),
            AnchorCorner::BottomLeft => (off_x, plate_h - off_y - board_h),
            AnchorCorner::BottomRight => (plate_w - off_x - board_w, plate_h - off_y - board_h),
            AnchorCorner::Center => (
                (plate_w - board_w).div_euclid(2) + off_x,
                (plate_h - board_h).div_euclid(2) + off_y,
            ),
        };
        debug!(?corner, x, y, "Board anchored");
        BoardPlacement {
            x,
            y,
            width: board.0,
            height: board.1,
        }
    }

    /// Fill the plate with the layer's background and draw the board on it.
    ///
    /// Inverted layers sit on a black plate, everything else on white. The
    /// board is alpha-composited so transparent artwork shows the plate.
    #[instrument(skip(self, board), fields(x = placement.x, y = placement.y))]
    pub fn compose(
        &self,
        board: &RgbaImage,
        placement: &BoardPlacement,
        inverted: bool,
    ) -> PlateCanvas {
        let background = if inverted { BLACK } else { WHITE };
        let mut working = RgbaImage::from_pixel(self.working.0, self.working.1, background);
        imageops::overlay(&mut working, board, placement.x, placement.y);
        info!(
            plate_w = self.working.0,
            plate_h = self.working.1,
            inverted,
            "Board composited onto plate"
        );
        PlateCanvas {
            working,
            orientation: self.orientation,
        }
    }

    /// Preview of a captured slicing raster, turned back to the working
    /// orientation. Pixels come from the slice itself, never from a fresh
    /// render.
    pub fn preview(&self, slice: &RgbaImage) -> RgbaImage {
        self.orientation.invert(slice)
    }

    /// Thumbnail for the output file: the board region of `preview`
    /// scaled to `size`. Falls back to the whole plate when the board lies
    /// fully off it.
    pub fn thumbnail(
        &self,
        preview: &RgbaImage,
        placement: &BoardPlacement,
        size: [u32; 2],
    ) -> RgbaImage {
        let region = match placement.clip(preview.width(), preview.height()) {
            Some((x, y, w, h)) => imageops::crop_imm(preview, x, y, w, h).to_image(),
            None => preview.clone(),
        };
        imageops::resize(&region, size[0], size[1], FilterType::Lanczos3)
    }
}

/// The working canvas of one layer, mutated by calibration masks.
#[derive(Debug, Clone)]
pub struct PlateCanvas {
    working: RgbaImage,
    orientation: PlateOrientation,
}

impl PlateCanvas {
    /// The landscape canvas as drawn.
    pub fn working(&self) -> &RgbaImage {
        &self.working
    }

    /// Capture the plate in the printer's native orientation.
    pub fn slice(&self) -> RgbaImage {
        self.orientation.apply(&self.working)
    }

    /// Paint an opaque black rectangle. Parts outside the canvas are
    /// clipped; an empty rectangle is a no-op.
    pub fn mask(&mut self, x: i64, y: i64, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let rect = Rect::at(clamp(x), clamp(y)).of_size(width, height);
        draw_filled_rect_mut(&mut self.working, rect, BLACK);
    }
}
