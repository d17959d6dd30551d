// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lossless quarter-turn mapping between the landscape working canvas and the
// printer's native panel orientation.

use image::RgbaImage;
use image::imageops::{rotate90, rotate180, rotate270};
use resinmask_core::types::PrinterProfile;

/// Rotations applied when a working canvas becomes a slicing raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlateOrientation {
    /// Firmware-mandated half turn.
    pub rotate_180: bool,
    /// Native panel is portrait; the landscape canvas is turned a quarter
    /// turn clockwise to fit it.
    pub portrait: bool,
}

impl PlateOrientation {
    pub fn from_profile(profile: &PrinterProfile) -> Self {
        Self {
            rotate_180: profile.rotate_180,
            portrait: profile.is_portrait(),
        }
    }

    /// Working canvas -> native raster. The portrait quarter turn is applied
    /// first, the half turn last.
    pub fn apply(&self, working: &RgbaImage) -> RgbaImage {
        let turned = if self.portrait {
            rotate90(working)
        } else {
            working.clone()
        };
        if self.rotate_180 {
            rotate180(&turned)
        } else {
            turned
        }
    }

    /// Native raster -> working canvas: the exact inverse of [`apply`],
    /// undoing the last rotation first.
    ///
    /// [`apply`]: PlateOrientation::apply
    pub fn invert(&self, native: &RgbaImage) -> RgbaImage {
        let unturned = if self.rotate_180 {
            rotate180(native)
        } else {
            native.clone()
        };
        if self.portrait {
            rotate270(&unturned)
        } else {
            unturned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// A 4x2 image whose pixels are all distinct.
    fn numbered() -> RgbaImage {
        RgbaImage::from_fn(4, 2, |x, y| Rgba([x as u8, y as u8, (x + 4 * y) as u8, 255]))
    }

    fn all() -> [PlateOrientation; 4] {
        [
            PlateOrientation { rotate_180: false, portrait: false },
            PlateOrientation { rotate_180: true, portrait: false },
            PlateOrientation { rotate_180: false, portrait: true },
            PlateOrientation { rotate_180: true, portrait: true },
        ]
    }

    #[test]
    fn invert_undoes_apply() {
        let img = numbered();
        for orientation in all() {
            assert_eq!(orientation.invert(&orientation.apply(&img)), img, "{orientation:?}");
        }
    }

    #[test]
    fn portrait_swaps_dimensions() {
        let orientation = PlateOrientation { rotate_180: false, portrait: true };
        assert_eq!(orientation.apply(&numbered()).dimensions(), (2, 4));
    }

    #[test]
    fn portrait_turn_is_clockwise() {
        // Working (x, y) lands on native (H - 1 - y, x).
        let orientation = PlateOrientation { rotate_180: false, portrait: true };
        let native = orientation.apply(&numbered());
        assert_eq!(native.get_pixel(1, 0), numbered().get_pixel(0, 0));
        assert_eq!(native.get_pixel(0, 3), numbered().get_pixel(3, 1));
    }

    #[test]
    fn half_turn_maps_corners() {
        let orientation = PlateOrientation { rotate_180: true, portrait: false };
        let native = orientation.apply(&numbered());
        assert_eq!(native.get_pixel(3, 1), numbered().get_pixel(0, 0));
    }

    #[test]
    fn identity_leaves_pixels_alone() {
        let orientation = PlateOrientation::default();
        assert_eq!(orientation.apply(&numbered()), numbered());
    }
}
