//! Board-game style card rendering.
//!
//! A card is drawn on a transparent RGBA canvas, back to front:
//! body with outline, inset border, round stamp with label, shadowed text panel
//! and finally the upper-cased word centered in the panel.
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::core::fonts::CardFont;
use crate::core::params::{GeneratorParams, Palette};
use crate::core::shapes::{RoundedRect, fill_rounded_rect, stroke_circle, stroke_rounded_rect};
use crate::types::Rgb8;

const OUTLINE_WIDTH: i32 = 2;
const BORDER_PADDING: i32 = 15;
const STAMP_RIGHT_OFFSET: i32 = 100;
const STAMP_TOP: i32 = 40;
const STAMP_DIAMETER: i32 = 60;
const STAMP_LABEL_OFFSET: (i32, i32) = (20, 15);
const PANEL_MARGIN: i32 = 25;
const PANEL_HEIGHT: i32 = 120;
const PANEL_RADIUS: i32 = 10;
const SHADOW_OFFSET: i32 = 4;

fn opaque(c: Rgb8) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/// Renders cards with fonts resolved up front.
#[derive(Debug)]
pub struct CardRenderer {
    width: u32,
    height: u32,
    corner_radius: i32,
    stamp_label: String,
    palette: Palette,
    word_font: CardFont,
    stamp_font: CardFont,
}

impl CardRenderer {
    pub fn new(params: &GeneratorParams, word_font: CardFont, stamp_font: CardFont) -> Self {
        Self {
            width: params.card_width,
            height: params.card_height,
            corner_radius: params.corner_radius as i32,
            stamp_label: params.stamp_label.clone(),
            palette: params.palette.clone(),
            word_font,
            stamp_font,
        }
    }

    /// Resolves both font chains from `params.fonts`.
    pub fn from_params(params: &GeneratorParams) -> Self {
        let fonts = &params.fonts;
        let word_font = CardFont::resolve(&fonts.word, &fonts.search_dirs, fonts.builtin_word_scale);
        let stamp_font =
            CardFont::resolve(&fonts.stamp, &fonts.search_dirs, fonts.builtin_stamp_scale);
        Self::new(params, word_font, stamp_font)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Vertical extent of the text panel: `(top, bottom)`, inclusive.
    pub fn panel_bounds(&self) -> (i32, i32) {
        let h = self.height as i32;
        let top = h - PANEL_HEIGHT - PANEL_MARGIN;
        (top, h - PANEL_MARGIN)
    }

    pub fn render(&self, word: &str) -> RgbaImage {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut card = RgbaImage::new(self.width, self.height);
        let p = &self.palette;

        // Body
        let body = RoundedRect::new(0, 0, w - 1, h - 1, self.corner_radius);
        fill_rounded_rect(&mut card, body, opaque(p.card));
        stroke_rounded_rect(&mut card, body, OUTLINE_WIDTH, opaque(p.card_outline));

        // Inset border
        let border = RoundedRect::new(
            BORDER_PADDING,
            BORDER_PADDING,
            w - BORDER_PADDING,
            h - BORDER_PADDING,
            self.corner_radius - 5,
        );
        stroke_rounded_rect(&mut card, border, OUTLINE_WIDTH, opaque(p.border));

        // Stamp
        let stamp_x = w - STAMP_RIGHT_OFFSET;
        let radius = STAMP_DIAMETER / 2;
        stroke_circle(
            &mut card,
            (stamp_x + radius, STAMP_TOP + radius),
            radius,
            OUTLINE_WIDTH,
            opaque(p.border),
        );
        self.stamp_font.draw(
            &mut card,
            opaque(p.border),
            stamp_x + STAMP_LABEL_OFFSET.0,
            STAMP_TOP + STAMP_LABEL_OFFSET.1,
            &self.stamp_label,
        );

        // Text panel and its shadow
        let (panel_top, panel_bottom) = self.panel_bounds();
        let panel = RoundedRect::new(
            PANEL_MARGIN,
            panel_top,
            w - PANEL_MARGIN,
            panel_bottom,
            PANEL_RADIUS,
        );
        fill_rounded_rect(
            &mut card,
            panel.offset(SHADOW_OFFSET, SHADOW_OFFSET),
            opaque(p.shadow),
        );
        fill_rounded_rect(&mut card, panel, opaque(p.text_panel));

        // Word
        let text = word.to_uppercase();
        let (text_w, text_h) = self.word_font.measure(&text);
        let center_x = w as f32 / 2.0;
        let center_y = panel_top as f32 + PANEL_HEIGHT as f32 / 2.0;
        let x = (center_x - text_w as f32 / 2.0) as i32;
        let y = (center_y - text_h as f32 / 1.5) as i32;
        debug!("Card '{}': text {}x{} at ({}, {})", text, text_w, text_h, x, y);
        self.word_font.draw(&mut card, opaque(p.text), x, y, &text);

        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_renderer() -> CardRenderer {
        let params = GeneratorParams::default();
        CardRenderer::new(
            &params,
            CardFont::Builtin { scale: 6 },
            CardFont::Builtin { scale: 3 },
        )
    }

    #[test]
    fn card_has_configured_size_and_transparent_corners() {
        let renderer = builtin_renderer();
        let card = renderer.render("banana");
        assert_eq!(card.dimensions(), (600, 400));
        assert_eq!(card.get_pixel(0, 0)[3], 0);
        assert_eq!(card.get_pixel(599, 399)[3], 0);
        assert_eq!(*card.get_pixel(300, 100), opaque(Palette::default().card));
    }

    #[test]
    fn word_is_drawn_inside_the_panel() {
        let renderer = builtin_renderer();
        let blank = renderer.render("");
        let card = renderer.render("mesa");
        let (top, bottom) = renderer.panel_bounds();

        let text = opaque(Palette::default().text);
        let inked: Vec<(u32, u32)> = card
            .enumerate_pixels()
            .filter(|(_, _, px)| **px == text)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(_, y)| (y as i32) >= top && (y as i32) <= bottom));
        assert!(blank.pixels().all(|px| *px != text));
    }

    #[test]
    fn panel_shadow_peeks_out_bottom_right() {
        let renderer = builtin_renderer();
        let card = renderer.render("x");
        let (_, bottom) = renderer.panel_bounds();
        let palette = Palette::default();
        assert_eq!(*card.get_pixel(300, (bottom + 2) as u32), opaque(palette.shadow));
        assert_eq!(*card.get_pixel(300, bottom as u32), opaque(palette.text_panel));
    }
}
