//! Card sheet pages to individual card images.
use std::path::Path;

use image::Rgb;
use tracing::{debug, info, warn};

use crate::core::crop::{content_bbox, grid_cells};
use crate::core::params::SlicerParams;
use crate::error::Result;
use crate::io::raster::PageRasterizer;
use crate::io::writers::numbered::NumberedWriter;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Outcome of one slicer run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceReport {
    pub documents_processed: usize,
    pub documents_missing: usize,
    pub documents_failed: usize,
    pub pages_rendered: usize,
    /// Pages with no non-white pixel
    pub pages_blank: usize,
    /// Pages whose cropped content is below the minimum size
    pub pages_too_small: usize,
    pub cells_written: usize,
}

/// Renders each page, crops the white margins and saves the `grid`×`grid`
/// cells of every large enough page as numbered JPEG files.
pub fn slice_documents(params: &SlicerParams) -> Result<SliceReport> {
    params.validate()?;
    let mut writer =
        NumberedWriter::create(&params.output_dir, &params.file_prefix, params.start_index)?;
    let mut report = SliceReport::default();

    for path in &params.documents {
        if !path.is_file() {
            warn!("Document not found, skipping: {}", path.display());
            report.documents_missing += 1;
            continue;
        }
        match slice_document(path, params, &mut writer, &mut report) {
            Ok(()) => report.documents_processed += 1,
            Err(e) => {
                warn!("Failed to slice {}: {}", path.display(), e);
                report.documents_failed += 1;
            }
        }
    }

    report.cells_written = writer.written();
    info!(
        "Slicing finished: {} card(s) written to {}",
        report.cells_written,
        params.output_dir.display()
    );
    Ok(report)
}

fn slice_document(
    path: &Path,
    params: &SlicerParams,
    writer: &mut NumberedWriter,
    report: &mut SliceReport,
) -> Result<()> {
    let raster = PageRasterizer::open(path)?;
    info!(
        "Processing {} ({} page(s))",
        path.display(),
        raster.page_count()
    );

    for index in 0..raster.page_count() {
        let page = raster.render(index, params.zoom)?;
        report.pages_rendered += 1;

        let Some(bbox) = content_bbox(&page, WHITE) else {
            debug!("Page {} is blank", index + 1);
            report.pages_blank += 1;
            continue;
        };
        if bbox.width() < params.min_width || bbox.height() < params.min_height {
            debug!(
                "Page {}: content {}x{} below minimum, skipped",
                index + 1,
                bbox.width(),
                bbox.height()
            );
            report.pages_too_small += 1;
            continue;
        }

        let sheet = bbox.crop(&page);
        let first = writer.next_index();
        for cell in grid_cells(sheet.width(), sheet.height(), params.grid) {
            if cell.width() == 0 || cell.height() == 0 {
                continue;
            }
            writer.write_jpeg(&cell.crop(&sheet), params.jpeg_quality)?;
        }
        debug!(
            "Page {}: {}x{} sheet, cards {}..{}",
            index + 1,
            sheet.width(),
            sheet.height(),
            first,
            writer.next_index()
        );
    }
    Ok(())
}
