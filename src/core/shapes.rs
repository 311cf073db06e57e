//! Raster shape primitives for card drawing: rounded rectangles (filled or stroked),
//! ring outlines, and alpha-masked pasting of an RGBA card onto an RGB page.
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_circle_mut;

/// Axis-aligned rectangle with inclusive pixel bounds and circular corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundedRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub radius: i32,
}

impl RoundedRect {
    /// Radius is clamped to half of the shorter side.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32, radius: i32) -> Self {
        let half_side = ((right - left).min(bottom - top) / 2).max(0);
        Self {
            left,
            top,
            right,
            bottom,
            radius: radius.clamp(0, half_side),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.right < self.left || self.bottom < self.top
    }

    /// Shrinks every side by `by` pixels; the corner radius shrinks with it.
    pub fn inset(&self, by: i32) -> Self {
        Self::new(
            self.left + by,
            self.top + by,
            self.right - by,
            self.bottom - by,
            self.radius - by,
        )
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            radius: self.radius,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        if self.is_empty() || x < self.left || x > self.right || y < self.top || y > self.bottom {
            return false;
        }
        let r = self.radius;
        let cx = if x < self.left + r {
            self.left + r
        } else if x > self.right - r {
            self.right - r
        } else {
            return true;
        };
        let cy = if y < self.top + r {
            self.top + r
        } else if y > self.bottom - r {
            self.bottom - r
        } else {
            return true;
        };
        let (dx, dy) = ((x - cx) as i64, (y - cy) as i64);
        dx * dx + dy * dy <= (r as i64) * (r as i64)
    }

    /// Pixel bounds clipped to a `width`×`height` canvas, as half-open ranges.
    fn clipped(&self, width: u32, height: u32) -> (std::ops::Range<u32>, std::ops::Range<u32>) {
        let clamp = |v: i32, max: u32| v.clamp(0, max as i32) as u32;
        (
            clamp(self.left, width)..clamp(self.right + 1, width),
            clamp(self.top, height)..clamp(self.bottom + 1, height),
        )
    }
}

pub fn fill_rounded_rect(img: &mut RgbaImage, rect: RoundedRect, color: Rgba<u8>) {
    let (xs, ys) = rect.clipped(img.width(), img.height());
    for y in ys {
        for x in xs.clone() {
            if rect.contains(x as i32, y as i32) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Draws a `width` pixel outline along the inside edge of `rect`.
pub fn stroke_rounded_rect(img: &mut RgbaImage, rect: RoundedRect, width: i32, color: Rgba<u8>) {
    let inner = rect.inset(width);
    let (xs, ys) = rect.clipped(img.width(), img.height());
    for y in ys {
        for x in xs.clone() {
            let (xi, yi) = (x as i32, y as i32);
            if rect.contains(xi, yi) && !inner.contains(xi, yi) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Circle outline growing inwards from `radius`.
pub fn stroke_circle(
    img: &mut RgbaImage,
    center: (i32, i32),
    radius: i32,
    width: i32,
    color: Rgba<u8>,
) {
    for k in 0..width.max(1) {
        let r = radius - k;
        if r <= 0 {
            break;
        }
        draw_hollow_circle_mut(img, center, r, color);
    }
}

/// Composites `card` onto `page` at `(x, y)` using the card's alpha as paste mask.
pub fn paste_with_alpha(page: &mut RgbImage, card: &RgbaImage, x: u32, y: u32) {
    for (cx, cy, px) in card.enumerate_pixels() {
        let (px_x, px_y) = (x + cx, y + cy);
        if px_x >= page.width() || px_y >= page.height() {
            continue;
        }
        let a = px[3] as u32;
        if a == 0 {
            continue;
        }
        let dst = page.get_pixel_mut(px_x, px_y);
        let blend = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8;
        *dst = Rgb([
            blend(px[0], dst[0]),
            blend(px[1], dst[1]),
            blend(px[2], dst[2]),
        ]);
    }
}
