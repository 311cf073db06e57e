//! Shared types and enums used across cardsmith.
//! Includes `EmbeddedEncoding` (how a PDF image stream is stored), `SampleLayout`
//! and `ColorSpace` (how raw image samples map to color) and the `Rgb8` color
//! triple used in configs.
use serde::{Deserialize, Serialize};

/// 8-bit RGB color as stored in configuration files.
pub type Rgb8 = [u8; 3];

/// Storage encoding of an embedded image stream, derived from its `/Filter`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EmbeddedEncoding {
    /// `DCTDecode`: the stream is a complete JPEG file.
    Jpeg,
    /// `JPXDecode`: the stream is a JPEG 2000 codestream.
    Jpeg2000,
    /// `CCITTFaxDecode`: fax-compressed bilevel data.
    Ccitt,
    /// `JBIG2Decode`: JBIG2-compressed bilevel data.
    Jbig2,
    /// Flate/LZW/unfiltered: decoded pixel samples described by the image dictionary.
    Raw,
}

impl EmbeddedEncoding {
    /// Maps a PDF filter name to an encoding. Unknown filters return `None`.
    pub fn from_filter(name: &str) -> Option<Self> {
        match name {
            "DCTDecode" | "DCT" => Some(EmbeddedEncoding::Jpeg),
            "JPXDecode" => Some(EmbeddedEncoding::Jpeg2000),
            "CCITTFaxDecode" | "CCF" => Some(EmbeddedEncoding::Ccitt),
            "JBIG2Decode" => Some(EmbeddedEncoding::Jbig2),
            "FlateDecode" | "Fl" | "LZWDecode" | "LZW" | "RunLengthDecode" | "RL" => {
                Some(EmbeddedEncoding::Raw)
            }
            _ => None,
        }
    }

    /// File extension used when the bytes are written verbatim.
    pub fn extension(&self) -> &'static str {
        match self {
            EmbeddedEncoding::Jpeg => "jpg",
            EmbeddedEncoding::Jpeg2000 => "jpx",
            EmbeddedEncoding::Ccitt => "fax",
            EmbeddedEncoding::Jbig2 => "jb2",
            EmbeddedEncoding::Raw => "raw",
        }
    }

    pub fn is_jpeg(&self) -> bool {
        matches!(self, EmbeddedEncoding::Jpeg)
    }
}

impl std::fmt::Display for EmbeddedEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EmbeddedEncoding::Jpeg => "JPEG",
            EmbeddedEncoding::Jpeg2000 => "JPEG2000",
            EmbeddedEncoding::Ccitt => "CCITT",
            EmbeddedEncoding::Jbig2 => "JBIG2",
            EmbeddedEncoding::Raw => "Raw",
        };
        write!(f, "{}", s)
    }
}

/// Color model of raw (non-JPEG) image samples.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SampleLayout {
    Gray,
    Rgb,
    Cmyk,
}

impl SampleLayout {
    /// Resolves a `/ColorSpace` name. ICC-based spaces are matched by component count.
    pub fn from_color_space(name: &str, components: Option<i64>) -> Option<Self> {
        match name {
            "DeviceGray" | "G" | "CalGray" => Some(SampleLayout::Gray),
            "DeviceRGB" | "RGB" | "CalRGB" => Some(SampleLayout::Rgb),
            "DeviceCMYK" | "CMYK" => Some(SampleLayout::Cmyk),
            "ICCBased" => match components {
                Some(1) => Some(SampleLayout::Gray),
                Some(3) => Some(SampleLayout::Rgb),
                Some(4) => Some(SampleLayout::Cmyk),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            SampleLayout::Gray => 1,
            SampleLayout::Rgb => 3,
            SampleLayout::Cmyk => 4,
        }
    }
}

impl std::fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleLayout::Gray => write!(f, "Gray"),
            SampleLayout::Rgb => write!(f, "RGB"),
            SampleLayout::Cmyk => write!(f, "CMYK"),
        }
    }
}

/// Color space of raw image samples.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ColorSpace {
    /// Samples carry `layout.channels()` components per pixel.
    Device(SampleLayout),
    /// One palette index per pixel. `lookup` holds `base.channels()` bytes per
    /// entry, entry 0 first.
    Indexed { base: SampleLayout, lookup: Vec<u8> },
}

impl ColorSpace {
    /// Components per pixel in the sample data.
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::Device(layout) => layout.channels(),
            ColorSpace::Indexed { .. } => 1,
        }
    }

    /// Number of palette entries; 0 for device spaces.
    pub fn palette_len(&self) -> usize {
        match self {
            ColorSpace::Device(_) => 0,
            ColorSpace::Indexed { base, lookup } => lookup.len() / base.channels(),
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSpace::Device(layout) => write!(f, "{}", layout),
            ColorSpace::Indexed { base, .. } => {
                write!(f, "Indexed {} ({} colors)", base, self.palette_len())
            }
        }
    }
}
