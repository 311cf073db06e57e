//! Font fallback chain: the first candidate that can be found and parsed wins,
//! otherwise the built-in bitmap font is used. Resolved once per run.
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, info};

use crate::core::builtin_font;
use crate::core::params::FontCandidate;
use crate::error::{Error, Result};

pub enum CardFont {
    /// TrueType/OpenType font rendered through `ab_glyph`
    Outline {
        font: FontVec,
        scale: PxScale,
        source: PathBuf,
    },
    /// Built-in 5x7 bitmap font magnified by `scale`
    Builtin { scale: u32 },
}

impl std::fmt::Debug for CardFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFont::Outline { scale, source, .. } => f
                .debug_struct("Outline")
                .field("source", source)
                .field("size", &scale.y)
                .finish(),
            CardFont::Builtin { scale } => f.debug_struct("Builtin").field("scale", scale).finish(),
        }
    }
}

impl CardFont {
    /// Walks `chain` in order and returns the first loadable font.
    pub fn resolve(chain: &[FontCandidate], search_dirs: &[PathBuf], builtin_scale: u32) -> Self {
        for candidate in chain {
            let Some(path) = locate(&candidate.file, search_dirs) else {
                debug!("Font not found: {}", candidate.file.display());
                continue;
            };
            match load_font(&path) {
                Ok(font) => {
                    info!("Using font {} at {}px", path.display(), candidate.size);
                    return CardFont::Outline {
                        font,
                        scale: PxScale::from(candidate.size),
                        source: path,
                    };
                }
                Err(e) => debug!("Skipping font {}: {}", path.display(), e),
            }
        }

        info!("No font candidate available, using built-in bitmap font");
        CardFont::Builtin {
            scale: builtin_scale.max(1),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, CardFont::Builtin { .. })
    }

    /// Width and height of the rendered text's bounding box.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            CardFont::Outline { font, scale, .. } => text_size(*scale, font, text),
            CardFont::Builtin { scale } => builtin_font::text_size(text, *scale),
        }
    }

    pub fn draw(&self, img: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        match self {
            CardFont::Outline { font, scale, .. } => {
                draw_text_mut(img, color, x, y, *scale, font, text)
            }
            CardFont::Builtin { scale } => builtin_font::draw_text(img, color, x, y, *scale, text),
        }
    }
}

fn locate(file: &Path, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    if file.is_absolute() {
        return file.is_file().then(|| file.to_path_buf());
    }
    search_dirs
        .iter()
        .map(|dir| dir.join(file))
        .find(|path| path.is_file())
}

fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path)?;
    FontVec::try_from_vec(data)
        .map_err(|_| Error::Render(format!("Failed to parse font file: {}", path.display())))
}
