//! Rectangles in PDF user space and the placement matrix used to show one
//! page's content inside another page's rectangle.

/// An axis-aligned rectangle, normalised so `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// A rectangle anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Finite and with a positive area.
    pub fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// A PDF transformation matrix `[a b c d e f]`.
pub type Matrix = [f32; 6];

/// Matrix that maps `src` into `dst`.
///
/// With `keep_proportion` the content is scaled uniformly by the smaller of
/// the two axis ratios and centred in `dst`; otherwise each axis is stretched
/// independently.
pub fn placement_matrix(src: Rect, dst: Rect, keep_proportion: bool) -> Matrix {
    let mut sx = dst.width() / src.width();
    let mut sy = dst.height() / src.height();
    if keep_proportion {
        let s = sx.min(sy);
        sx = s;
        sy = s;
    }
    let ox = dst.x0 + (dst.width() - src.width() * sx) / 2.0;
    let oy = dst.y0 + (dst.height() - src.height() * sy) / 2.0;
    [sx, 0.0, 0.0, sy, ox - src.x0 * sx, oy - src.y0 * sy]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(m: Matrix, x: f32, y: f32) -> (f32, f32) {
        (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
    }

    #[test]
    fn rect_normalises_corners() {
        let r = Rect::new(100.0, 50.0, 0.0, 0.0);
        assert_eq!(r.to_array(), [0.0, 0.0, 100.0, 50.0]);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }

    #[test]
    fn degenerate_rects_are_invalid() {
        assert!(!Rect::from_size(0.0, 100.0).is_valid());
        assert!(!Rect::from_size(100.0, 0.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 10.0).is_valid());
        assert!(Rect::from_size(612.0, 792.0).is_valid());
    }

    #[test]
    fn same_size_is_identity() {
        let r = Rect::from_size(612.0, 792.0);
        assert_eq!(placement_matrix(r, r, true), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn offset_source_box_is_moved_to_origin() {
        let src = Rect::new(10.0, 20.0, 622.0, 812.0);
        let dst = Rect::from_size(612.0, 792.0);
        let m = placement_matrix(src, dst, true);
        assert_eq!(apply(m, 10.0, 20.0), (0.0, 0.0));
        assert_eq!(apply(m, 622.0, 812.0), (612.0, 792.0));
    }

    #[test]
    fn keep_proportion_letterboxes() {
        let src = Rect::from_size(100.0, 50.0);
        let dst = Rect::from_size(200.0, 200.0);
        let m = placement_matrix(src, dst, true);
        assert_eq!(m[0], 2.0);
        assert_eq!(m[3], 2.0);
        // 100pt tall result centred in 200pt
        assert_eq!(apply(m, 0.0, 0.0), (0.0, 50.0));
        assert_eq!(apply(m, 100.0, 50.0), (200.0, 150.0));
    }

    #[test]
    fn stretch_fills_both_axes() {
        let src = Rect::from_size(100.0, 50.0);
        let dst = Rect::from_size(200.0, 200.0);
        let m = placement_matrix(src, dst, false);
        assert_eq!(apply(m, 100.0, 50.0), (200.0, 200.0));
    }
}
