//! Auto-crop and grid slicing geometry.
use image::{Rgb, RgbImage, imageops};

/// Half-open pixel rectangle `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn crop(&self, img: &RgbImage) -> RgbImage {
        imageops::crop_imm(img, self.left, self.top, self.width(), self.height()).to_image()
    }
}

/// Bounding box of every pixel that differs from `background` in any channel.
///
/// With a white background this is the box of non-zero pixels of the inverted
/// image. Returns `None` for a uniform image.
pub fn content_bbox(img: &RgbImage, background: Rgb<u8>) -> Option<CropBox> {
    let mut bbox: Option<CropBox> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if *px == background {
            continue;
        }
        let b = bbox.get_or_insert(CropBox {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        b.left = b.left.min(x);
        b.top = b.top.min(y);
        b.right = b.right.max(x + 1);
        b.bottom = b.bottom.max(y + 1);
    }
    bbox
}

/// Crops away uniform white margins. `None` for a blank page.
pub fn autocrop(img: &RgbImage) -> Option<RgbImage> {
    content_bbox(img, Rgb([255, 255, 255])).map(|bbox| bbox.crop(img))
}

/// Splits a `width`×`height` area into `n`×`n` cells, rows outer and columns inner.
///
/// Cell size is `width / n` by `height / n` in real numbers; boundaries are
/// rounded half-to-even so neighbouring cells share an edge and the cells tile
/// the area exactly.
pub fn grid_cells(width: u32, height: u32, n: u32) -> Vec<CropBox> {
    if n == 0 {
        return Vec::new();
    }
    let edge = |k: u32, size: u32| (k as f64 * size as f64 / n as f64).round_ties_even() as u32;

    let mut cells = Vec::with_capacity((n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            cells.push(CropBox {
                left: edge(col, width),
                top: edge(row, height),
                right: edge(col + 1, width),
                bottom: edge(row + 1, height),
            });
        }
    }
    cells
}
