//! Embedded image extraction into a numbered file sequence.
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::params::ExtractorParams;
use crate::error::Result;
use crate::io::codecs::{Codecs, raw_to_rgb};
use crate::io::pdf::PdfSource;
use crate::io::writers::numbered::NumberedWriter;

/// Outcome of one extractor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub documents_processed: usize,
    pub documents_missing: usize,
    pub documents_failed: usize,
    pub images_written: usize,
    /// Images below the minimum size
    pub images_filtered: usize,
    /// Images that could not be read or written
    pub items_failed: usize,
}

enum ItemOutcome {
    Written(PathBuf),
    TooSmall(u32, u32),
}

/// Writes every qualifying embedded image of `params.documents` to
/// `params.output_dir`, numbered from `params.start_index` in document, page
/// and image order.
///
/// Missing or unreadable documents and broken images are logged and skipped.
pub fn extract_images(params: &ExtractorParams) -> Result<ExtractReport> {
    let codecs = Codecs::detect(params);
    let mut writer =
        NumberedWriter::create(&params.output_dir, &params.file_prefix, params.start_index)?;
    let mut report = ExtractReport::default();

    for path in &params.documents {
        if !path.is_file() {
            warn!("Document not found, skipping: {}", path.display());
            report.documents_missing += 1;
            continue;
        }
        let source = match PdfSource::open(path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Failed to open {}: {}", path.display(), e);
                report.documents_failed += 1;
                continue;
            }
        };
        info!(
            "Processing {} ({} page(s))",
            path.display(),
            source.page_count()
        );
        extract_document(&source, &codecs, params, &mut writer, &mut report);
        report.documents_processed += 1;
    }

    report.images_written = writer.written();
    info!(
        "Extraction finished: {} image(s) written to {}",
        report.images_written,
        params.output_dir.display()
    );
    Ok(report)
}

fn extract_document(
    source: &PdfSource,
    codecs: &Codecs,
    params: &ExtractorParams,
    writer: &mut NumberedWriter,
    report: &mut ExtractReport,
) {
    for (page_index, page_id) in source.pages().into_iter().enumerate() {
        for id in source.page_image_ids(page_id) {
            match extract_item(source, page_index, id, codecs, params, writer) {
                Ok(ItemOutcome::Written(out)) => debug!("Saved {}", out.display()),
                Ok(ItemOutcome::TooSmall(w, h)) => {
                    debug!(
                        "Page {}: object {} is {}x{}, below minimum",
                        page_index + 1,
                        id.0,
                        w,
                        h
                    );
                    report.images_filtered += 1;
                }
                Err(e) => {
                    warn!(
                        "{} page {}: skipping object {}: {}",
                        source.path().display(),
                        page_index + 1,
                        id.0,
                        e
                    );
                    report.items_failed += 1;
                }
            }
        }
    }
}

fn extract_item(
    source: &PdfSource,
    page_index: usize,
    id: lopdf::ObjectId,
    codecs: &Codecs,
    params: &ExtractorParams,
    writer: &mut NumberedWriter,
) -> Result<ItemOutcome> {
    let image = source.extract(page_index, id)?;

    // An unreadable header leaves the size unknown; the bytes are kept as-is
    if codecs.can_probe(image.encoding) {
        match codecs.probe_dimensions(&image) {
            Ok((w, h)) if w < params.min_width || h < params.min_height => {
                return Ok(ItemOutcome::TooSmall(w, h));
            }
            Ok(_) => {}
            Err(e) => warn!(
                "Page {}: size of object {} unknown, keeping it: {}",
                page_index + 1,
                id.0,
                e
            ),
        }
    }

    let out = if image.encoding.is_jpeg() {
        writer.write_bytes("jpg", &image.data)?
    } else if codecs.can_transcode(image.encoding) {
        let rgb = raw_to_rgb(&image)?;
        writer.write_jpeg(&rgb, params.jpeg_quality)?
    } else {
        writer.write_bytes(image.encoding.extension(), &image.data)?
    };
    Ok(ItemOutcome::Written(out))
}
