use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Rgb8;

/// Default directory both the extractor and the slicer write into.
pub const DEFAULT_OUTPUT_DIR: &str = "client/public/dixit_cards";

/// Colors used by the card generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Page background behind the cards
    pub page: Rgb8,
    pub card: Rgb8,
    /// Outer outline of the card body
    pub card_outline: Rgb8,
    /// Inset border, stamp ring and stamp label
    pub border: Rgb8,
    /// Drop shadow under the text panel
    pub shadow: Rgb8,
    pub text_panel: Rgb8,
    pub text: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            page: [255, 255, 255],
            card: [230, 210, 181],
            card_outline: [160, 140, 110],
            border: [190, 170, 140],
            shadow: [200, 180, 150],
            text_panel: [255, 255, 255],
            text: [0, 0, 0],
        }
    }
}

/// One candidate in a font fallback chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontCandidate {
    /// File name (searched in `FontParams::search_dirs`) or an absolute path
    pub file: PathBuf,
    /// Pixel size the font is rendered at
    pub size: f32,
}

impl FontCandidate {
    pub fn new(file: impl Into<PathBuf>, size: f32) -> Self {
        Self {
            file: file.into(),
            size,
        }
    }
}

/// Font fallback chains for the word and the stamp label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontParams {
    pub search_dirs: Vec<PathBuf>,
    pub word: Vec<FontCandidate>,
    pub stamp: Vec<FontCandidate>,
    /// Pixel multiplier of the built-in bitmap font used when no candidate loads
    pub builtin_word_scale: u32,
    pub builtin_stamp_scale: u32,
}

impl Default for FontParams {
    fn default() -> Self {
        Self {
            search_dirs: vec![
                PathBuf::from("."),
                PathBuf::from("/usr/share/fonts/truetype/msttcorefonts"),
                PathBuf::from("/usr/share/fonts/TTF"),
                PathBuf::from("/Library/Fonts"),
                PathBuf::from("/System/Library/Fonts/Supplemental"),
                PathBuf::from("C:\\Windows\\Fonts"),
            ],
            word: vec![
                FontCandidate::new("impact.ttf", 65.0),
                FontCandidate::new("arialbd.ttf", 55.0),
            ],
            stamp: vec![FontCandidate::new("arial.ttf", 30.0)],
            builtin_word_scale: 6,
            builtin_stamp_scale: 3,
        }
    }
}

/// Card generator parameters. Sizes are in pixels of the output page raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    /// JSON file holding one array of strings
    pub words_path: PathBuf,
    pub output_path: PathBuf,
    pub page_width: u32,
    pub page_height: u32,
    pub card_width: u32,
    pub card_height: u32,
    /// Gap between cards and around the grid
    pub margin: u32,
    pub corner_radius: u32,
    /// Physical resolution of the page raster
    pub dpi: f32,
    /// Short text inside the round stamp
    pub stamp_label: String,
    /// JPEG quality of the page images embedded in the PDF
    pub jpeg_quality: u8,
    pub palette: Palette,
    pub fonts: FontParams,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("words_codenames.json"),
            output_path: PathBuf::from("cards_jogo_completo.pdf"),
            // A4 at 300 DPI
            page_width: 2480,
            page_height: 3508,
            card_width: 600,
            card_height: 400,
            margin: 40,
            corner_radius: 20,
            dpi: 300.0,
            stamp_label: "Op".to_string(),
            jpeg_quality: 95,
            palette: Palette::default(),
            fonts: FontParams::default(),
        }
    }
}

/// Embedded image extractor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    pub documents: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    /// Number of the first written file
    pub start_index: u32,
    pub min_width: u32,
    pub min_height: u32,
    /// Quality used when re-encoding non-JPEG images
    pub jpeg_quality: u8,
    /// Allow decoding headers to read dimensions of encoded images
    pub probe_dimensions: bool,
    /// Allow converting non-JPEG images to RGB JPEG
    pub transcode: bool,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            documents: vec![
                PathBuf::from("DIXIT_10_OVERVIEW.pdf"),
                PathBuf::from("DIXIT_9_OVERVIEW.pdf"),
                PathBuf::from("DIXIT_5_OVERVIEW.pdf"),
            ],
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_prefix: "card".to_string(),
            start_index: 101,
            min_width: 200,
            min_height: 200,
            jpeg_quality: 90,
            probe_dimensions: true,
            transcode: true,
        }
    }
}

/// Auto-crop slicer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerParams {
    pub documents: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub start_index: u32,
    /// Render magnification (1.0 = 72 DPI)
    pub zoom: f32,
    /// Cropped pages smaller than this are not treated as card sheets
    pub min_width: u32,
    pub min_height: u32,
    /// Cells per side of the N×N grid
    pub grid: u32,
    pub jpeg_quality: u8,
}

impl Default for SlicerParams {
    fn default() -> Self {
        Self {
            documents: vec![PathBuf::from("cartas_dixit.pdf")],
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_prefix: "card".to_string(),
            start_index: 1,
            zoom: 3.0,
            min_width: 500,
            min_height: 500,
            grid: 3,
            jpeg_quality: 95,
        }
    }
}

impl SlicerParams {
    pub fn validate(&self) -> Result<()> {
        if self.grid == 0 {
            return Err(Error::InvalidParams {
                arg: "grid",
                value: self.grid.to_string(),
            });
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(Error::InvalidParams {
                arg: "zoom",
                value: self.zoom.to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters for all three pipelines, suitable for config files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorParams,
    pub extractor: ExtractorParams,
    pub slicer: SlicerParams,
}

impl Config {
    /// Reads a JSON config file. Omitted fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::missing(path));
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{ "slicer": { "grid": 4 }, "extractor": { "min_width": 120 } }"#)
                .unwrap();
        assert_eq!(cfg.slicer.grid, 4);
        assert_eq!(cfg.slicer.zoom, 3.0);
        assert_eq!(cfg.extractor.min_width, 120);
        assert_eq!(cfg.extractor.min_height, 200);
        assert_eq!(cfg.generator, GeneratorParams::default());
    }

    #[test]
    fn zero_grid_is_rejected() {
        let params = SlicerParams {
            grid: 0,
            ..SlicerParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParams { arg: "grid", .. })
        ));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = Config::load(Path::new("/nonexistent/cardsmith.json")).unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
    }
}
