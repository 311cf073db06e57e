//! Page layout arithmetic for tiling cards onto fixed-size pages.
use std::ops::Range;

use crate::error::{Error, Result};

/// Regular grid of equally sized cards separated (and surrounded) by a margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub margin: u32,
}

impl GridLayout {
    /// Fits as many `card` sized cells as possible onto a `page` sized canvas.
    pub fn fit(page: (u32, u32), card: (u32, u32), margin: u32) -> Result<Self> {
        let (page_w, page_h) = page;
        let (card_w, card_h) = card;
        if card_w == 0 || card_h == 0 {
            return Err(Error::InvalidLayout(format!(
                "card size must be non-zero, got {}x{}",
                card_w, card_h
            )));
        }

        let columns = page_w.saturating_sub(margin) / (card_w + margin);
        let rows = page_h.saturating_sub(margin) / (card_h + margin);
        if columns == 0 || rows == 0 {
            return Err(Error::InvalidLayout(format!(
                "no {}x{} card fits on a {}x{} page with margin {}",
                card_w, card_h, page_w, page_h, margin
            )));
        }

        Ok(Self {
            columns,
            rows,
            card_width: card_w,
            card_height: card_h,
            margin,
        })
    }

    pub fn cards_per_page(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// `ceil(total / cards_per_page)`
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.cards_per_page())
    }

    /// Top-left pixel of the card at page-local index `index` (row-major).
    pub fn position(&self, index: usize) -> (u32, u32) {
        let col = index as u32 % self.columns;
        let row = index as u32 / self.columns;
        (
            self.margin + col * (self.card_width + self.margin),
            self.margin + row * (self.card_height + self.margin),
        )
    }

    /// Ranges of flat card indices held by each page, in page order.
    pub fn pages(&self, total: usize) -> impl Iterator<Item = Range<usize>> + '_ {
        let per_page = self.cards_per_page();
        (0..self.page_count(total)).map(move |page| {
            let start = page * per_page;
            start..(start + per_page).min(total)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_at_300_dpi_holds_three_by_seven() {
        let layout = GridLayout::fit((2480, 3508), (600, 400), 40).unwrap();
        assert_eq!((layout.columns, layout.rows), (3, 7));
        assert_eq!(layout.cards_per_page(), 21);
    }

    #[test]
    fn twenty_five_cards_at_twelve_per_page() {
        // 3 columns x 4 rows
        let layout = GridLayout::fit((2480, 1800), (600, 400), 40).unwrap();
        assert_eq!(layout.cards_per_page(), 12);
        assert_eq!(layout.page_count(25), 3);

        let sizes: Vec<usize> = layout.pages(25).map(|r| r.len()).collect();
        assert_eq!(sizes, vec![12, 12, 1]);
    }

    #[test]
    fn every_card_lands_on_exactly_one_page() {
        let layout = GridLayout::fit((2480, 3508), (600, 400), 40).unwrap();
        for total in [0usize, 1, 20, 21, 22, 100] {
            let indices: Vec<usize> = layout.pages(total).flatten().collect();
            assert_eq!(indices, (0..total).collect::<Vec<_>>());
            assert_eq!(layout.pages(total).count(), layout.page_count(total));
        }
    }

    #[test]
    fn placement_is_row_major_with_margins() {
        let layout = GridLayout::fit((2480, 3508), (600, 400), 40).unwrap();
        assert_eq!(layout.position(0), (40, 40));
        assert_eq!(layout.position(1), (680, 40));
        assert_eq!(layout.position(2), (1320, 40));
        assert_eq!(layout.position(3), (40, 480));
        assert_eq!(layout.position(20), (1320, 40 + 6 * 440));
    }

    #[test]
    fn oversized_card_is_rejected() {
        let err = GridLayout::fit((500, 500), (600, 400), 40).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
        assert!(GridLayout::fit((500, 500), (0, 400), 40).is_err());
    }
}
