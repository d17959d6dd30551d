// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 2x3 affine transforms in drawing units, in SVG `matrix(a b c d e f)` order.

use resinmask_core::types::AxisFlip;

use super::markup::ViewBox;

/// Affine map `(x, y) -> (a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Matrix product `self * inner`: the result applies `inner` first.
    pub fn then(&self, inner: &Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn approx_eq(&self, other: &Affine, epsilon: f64) -> bool {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .all(|delta| delta.abs() <= epsilon)
    }

    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, 1e-12)
    }

    /// Reflect content about the midlines of `view_box` on the flagged axes.
    ///
    /// A flipped axis scales by -1 inside a translation of
    /// `2 * (origin + extent / 2)`, which maps the box onto itself. Unflipped
    /// axes are left untouched.
    pub fn mirror(view_box: &ViewBox, flip: AxisFlip) -> Affine {
        let (tx, sx) = if flip.horizontal {
            (2.0 * (view_box.x + view_box.width / 2.0), -1.0)
        } else {
            (0.0, 1.0)
        };
        let (ty, sy) = if flip.vertical {
            (2.0 * (view_box.y + view_box.height / 2.0), -1.0)
        } else {
            (0.0, 1.0)
        };
        Affine::translate(tx, ty).then(&Affine::scale(sx, sy))
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!(
            "matrix({} {} {} {} {} {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_box() -> ViewBox {
        ViewBox {
            x: 10.0,
            y: -5.0,
            width: 100.0,
            height: 40.0,
        }
    }

    const BOTH: AxisFlip = AxisFlip {
        horizontal: true,
        vertical: true,
    };

    #[test]
    fn translate_then_scale_is_nested_order() {
        let m = Affine::translate(5.0, 7.0).then(&Affine::scale(-1.0, 2.0));
        assert_eq!(m.apply(1.0, 1.0), (4.0, 9.0));
    }

    #[test]
    fn no_flip_is_identity() {
        assert!(Affine::mirror(&view_box(), AxisFlip::default()).is_identity());
    }

    #[test]
    fn mirror_keeps_box_in_place() {
        let vb = view_box();
        let m = Affine::mirror(&vb, BOTH);
        let (x0, y0) = m.apply(vb.x, vb.y);
        let (x1, y1) = m.apply(vb.x + vb.width, vb.y + vb.height);
        assert_eq!((x0, y0), (vb.x + vb.width, vb.y + vb.height));
        assert_eq!((x1, y1), (vb.x, vb.y));
    }

    #[test]
    fn mirror_reverses_handedness_per_axis() {
        let m = Affine::mirror(
            &view_box(),
            AxisFlip {
                horizontal: true,
                vertical: false,
            },
        );
        assert_eq!(m.a, -1.0);
        assert_eq!(m.d, 1.0);
        assert_eq!(m.e, 120.0);
        assert_eq!(m.f, 0.0);
        // Vertical positions are untouched.
        assert_eq!(m.apply(20.0, 3.0).1, 3.0);
    }

    #[test]
    fn mirror_twice_round_trips() {
        for flip in [
            AxisFlip { horizontal: true, vertical: false },
            AxisFlip { horizontal: false, vertical: true },
            BOTH,
        ] {
            let m = Affine::mirror(&view_box(), flip);
            assert!(m.then(&m).is_identity(), "{flip:?}");
        }
    }

    #[test]
    fn svg_serialization() {
        let m = Affine::mirror(&view_box(), BOTH);
        assert_eq!(m.to_svg(), "matrix(-1 0 0 -1 120 30)");
    }
}
