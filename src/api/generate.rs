//! Word list to printable card sheet PDF.
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::core::card::CardRenderer;
use crate::core::layout::GridLayout;
use crate::core::params::GeneratorParams;
use crate::core::shapes::paste_with_alpha;
use crate::error::Result;
use crate::io::words::load_word_list;
use crate::io::writers::pdf::write_multipage_pdf;

/// Outcome of one generator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub cards: usize,
    pub cards_per_page: usize,
    pub pages: usize,
    /// `None` when there was nothing to write
    pub output: Option<PathBuf>,
}

/// Renders every word of `params.words_path` as a card and writes all pages
/// into `params.output_path`.
///
/// A missing or malformed word list fails before anything is written. An
/// empty list succeeds with zero pages and no document.
pub fn generate_cards(params: &GeneratorParams) -> Result<GenerateReport> {
    let words = load_word_list(&params.words_path)?;
    let layout = GridLayout::fit(
        (params.page_width, params.page_height),
        (params.card_width, params.card_height),
        params.margin,
    )?;

    if words.is_empty() {
        info!(
            "Word list {} is empty: no cards generated",
            params.words_path.display()
        );
        return Ok(GenerateReport {
            cards_per_page: layout.cards_per_page(),
            ..GenerateReport::default()
        });
    }

    info!(
        "Creating {} cards: {}x{} per page, {} page(s)",
        words.len(),
        layout.columns,
        layout.rows,
        layout.page_count(words.len())
    );

    let renderer = CardRenderer::from_params(params);
    let pages = compose_pages(&renderer, &layout, &words, params);

    if let Some(parent) = params.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_multipage_pdf(&params.output_path, &pages, params.dpi, params.jpeg_quality)?;
    info!(
        "Wrote {} page(s) to {}",
        pages.len(),
        params.output_path.display()
    );

    Ok(GenerateReport {
        cards: words.len(),
        cards_per_page: layout.cards_per_page(),
        pages: pages.len(),
        output: Some(params.output_path.clone()),
    })
}

/// Lays the rendered cards out on page rasters, in word order.
pub fn compose_pages(
    renderer: &CardRenderer,
    layout: &GridLayout,
    words: &[String],
    params: &GeneratorParams,
) -> Vec<RgbImage> {
    let background = Rgb(params.palette.page);
    layout
        .pages(words.len())
        .enumerate()
        .map(|(page_no, range)| {
            let mut page = RgbImage::from_pixel(params.page_width, params.page_height, background);
            for (slot, word) in words[range.clone()].iter().enumerate() {
                let card = renderer.render(word);
                let (x, y) = layout.position(slot);
                paste_with_alpha(&mut page, &card, x, y);
            }
            debug!("Page {}: {} card(s)", page_no + 1, range.len());
            page
        })
        .collect()
}
