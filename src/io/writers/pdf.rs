//! Multi-page PDF output where every page is one full-bleed JPEG image.
use std::path::Path;

use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::writers::jpeg::encode_rgb_jpeg;

const POINTS_PER_INCH: f32 = 72.0;

/// Writes `pages` into one PDF, first page first.
///
/// Page size in points is `pixels * 72 / dpi`. Each page image is stored
/// DCT-encoded at `quality`.
pub fn write_multipage_pdf(path: &Path, pages: &[RgbImage], dpi: f32, quality: u8) -> Result<()> {
    if pages.is_empty() {
        return Err(Error::Processing("no pages to write".to_string()));
    }
    if !(dpi.is_finite() && dpi > 0.0) {
        return Err(Error::InvalidParams {
            arg: "dpi",
            value: dpi.to_string(),
        });
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        let (px_w, px_h) = page.dimensions();
        let width_pt = px_w as f32 * POINTS_PER_INCH / dpi;
        let height_pt = px_h as f32 * POINTS_PER_INCH / dpi;

        let jpeg = encode_rgb_jpeg(page, quality)?;
        debug!(
            "Page {}: {}x{} px, {:.1}x{:.1} pt, {} JPEG bytes",
            index + 1,
            px_w,
            px_h,
            width_pt,
            height_pt,
            jpeg.len()
        );

        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => px_w as i64,
                "Height" => px_h as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
        .with_compression(false);
        let image_id = doc.add_object(image);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width_pt.into(),
                        0_i64.into(),
                        0_i64.into(),
                        height_pt.into(),
                        0_i64.into(),
                        0_i64.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0_i64.into(), 0_i64.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)?;
    Ok(())
}
