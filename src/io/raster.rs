//! Page rasterization using the pure Rust `hayro` renderer.
use std::path::Path;
use std::sync::Arc;

use hayro::{InterpreterSettings, Pdf, RenderSettings};
use image::RgbImage;

use crate::error::{Error, Result};

/// Opened PDF ready to render pages to RGB bitmaps.
pub struct PageRasterizer {
    pdf: Pdf,
    page_count: usize,
}

impl PageRasterizer {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::missing(path));
        }
        let data = std::fs::read(path)?;
        let pdf = Pdf::new(Arc::new(data))
            .map_err(|e| Error::Render(format!("Failed to parse PDF: {:?}", e)))?;
        let page_count = pdf.pages().len();
        Ok(Self { pdf, page_count })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Renders page `index` (zero-based) at `zoom` (1.0 = 72 DPI) over a white background.
    pub fn render(&self, index: usize, zoom: f32) -> Result<RgbImage> {
        let page = self
            .pdf
            .pages()
            .get(index)
            .ok_or_else(|| Error::Render(format!("Page {} not found", index + 1)))?;

        let settings = RenderSettings {
            x_scale: zoom,
            y_scale: zoom,
            ..Default::default()
        };
        let pixmap = hayro::render(page, &InterpreterSettings::default(), &settings);

        let width = u32::from(pixmap.width());
        let height = u32::from(pixmap.height());
        let rgb = flatten_premultiplied(pixmap.data_as_u8_slice());

        RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| Error::Render("Failed to convert pixmap to image".to_string()))
    }
}

/// Composites premultiplied RGBA samples over white.
fn flatten_premultiplied(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let uncovered = 255 - px[3];
        rgb.push(px[0].saturating_add(uncovered));
        rgb.push(px[1].saturating_add(uncovered));
        rgb.push(px[2].saturating_add(uncovered));
    }
    rgb
}
