//! Optional image codec capabilities, detected once per run.
//!
//! Dimension probing and conversion to JPEG depend on which decoders are
//! compiled into `image` and on what the user allows. Each capability is a
//! plain flag the extractor branches on; nothing is attempted and swallowed.
use std::io::Cursor;

use image::{ImageFormat, ImageReader, RgbImage};
use tracing::info;

use crate::core::params::ExtractorParams;
use crate::error::{Error, Result};
use crate::io::pdf::EmbeddedImage;
use crate::types::{ColorSpace, EmbeddedEncoding, SampleLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codecs {
    /// Dimension probing allowed at all
    pub probe: bool,
    /// Conversion to RGB JPEG allowed at all
    pub transcode: bool,
    /// `image` can read JPEG headers
    pub jpeg_reader: bool,
}

impl Codecs {
    pub fn detect(params: &ExtractorParams) -> Self {
        let codecs = Self {
            probe: params.probe_dimensions,
            transcode: params.transcode,
            jpeg_reader: ImageFormat::Jpeg.reading_enabled(),
        };
        if !codecs.probe {
            info!("Dimension probing disabled: size filter will be skipped");
        }
        if !codecs.transcode {
            info!("Conversion disabled: non-JPEG images are written as extracted");
        }
        codecs
    }

    /// Whether width/height of this encoding can be determined.
    pub fn can_probe(&self, encoding: EmbeddedEncoding) -> bool {
        self.probe
            && match encoding {
                EmbeddedEncoding::Raw => true,
                EmbeddedEncoding::Jpeg => self.jpeg_reader,
                _ => false,
            }
    }

    /// Whether images of this encoding are converted to RGB JPEG.
    ///
    /// Raw samples in a color space [`raw_to_rgb`] cannot handle are still routed
    /// here and surface as [`Error::UnsupportedImage`].
    pub fn can_transcode(&self, encoding: EmbeddedEncoding) -> bool {
        self.transcode && encoding == EmbeddedEncoding::Raw
    }

    /// Width and height of the image. Only call when [`Codecs::can_probe`] holds.
    pub fn probe_dimensions(&self, image: &EmbeddedImage) -> Result<(u32, u32)> {
        match image.encoding {
            EmbeddedEncoding::Raw => Ok((image.width, image.height)),
            EmbeddedEncoding::Jpeg => {
                let reader = ImageReader::with_format(Cursor::new(&image.data), ImageFormat::Jpeg);
                Ok(reader.into_dimensions()?)
            }
            other => Err(Error::UnsupportedImage(format!(
                "no dimension probe for {} data",
                other
            ))),
        }
    }
}

/// Converts Gray, RGB, CMYK or indexed samples to RGB.
///
/// Samples may be 1, 2, 4, 8 or 16 bits wide (indexed: up to 8), with each row
/// padded to a whole byte.
pub fn raw_to_rgb(image: &EmbeddedImage) -> Result<RgbImage> {
    let color_space = image.color_space.as_ref().ok_or_else(|| {
        Error::UnsupportedImage(format!("object {} has an unsupported color space", image.object_id.0))
    })?;
    let bpc = image.bits_per_component;
    let supported = match color_space {
        ColorSpace::Device(_) => matches!(bpc, 1 | 2 | 4 | 8 | 16),
        ColorSpace::Indexed { .. } => {
            matches!(bpc, 1 | 2 | 4 | 8) && color_space.palette_len() > 0
        }
    };
    if !supported {
        return Err(Error::UnsupportedImage(format!(
            "object {} has {} bits per component in {}",
            image.object_id.0, bpc, color_space
        )));
    }

    let samples = unpack_samples(image, color_space.components())?;
    let rgb: Vec<u8> = match color_space {
        ColorSpace::Device(layout) => {
            let max = if bpc < 8 { (1u32 << bpc) - 1 } else { 255 };
            samples
                .chunks_exact(layout.channels())
                .flat_map(|px| {
                    let mut scaled = [0u8; 4];
                    for (dst, &v) in scaled.iter_mut().zip(px) {
                        *dst = (v as u32 * 255 / max) as u8;
                    }
                    to_rgb(*layout, &scaled[..px.len()])
                })
                .collect()
        }
        ColorSpace::Indexed { base, lookup } => {
            let channels = base.channels();
            let last = color_space.palette_len() - 1;
            samples
                .iter()
                .flat_map(|&index| {
                    let entry = (index as usize).min(last) * channels;
                    to_rgb(*base, &lookup[entry..entry + channels])
                })
                .collect()
        }
    };

    RgbImage::from_raw(image.width, image.height, rgb)
        .ok_or_else(|| Error::Processing("sample buffer does not match dimensions".to_string()))
}

/// One byte per sample, unscaled below 8 bits; 16-bit samples keep their high byte.
fn unpack_samples(image: &EmbeddedImage, components: usize) -> Result<Vec<u8>> {
    let bits = image.bits_per_component as usize;
    let per_row = image.width as usize * components;
    let row_bytes = (per_row * bits).div_ceil(8);
    let expected = row_bytes * image.height as usize;
    if image.data.len() < expected {
        return Err(Error::UnsupportedImage(format!(
            "object {} holds {} bytes, expected {} for {}x{} at {} bits",
            image.object_id.0,
            image.data.len(),
            expected,
            image.width,
            image.height,
            bits
        )));
    }

    let mut samples = Vec::with_capacity(per_row * image.height as usize);
    for row in image.data[..expected].chunks_exact(row_bytes) {
        match bits {
            8 => samples.extend_from_slice(&row[..per_row]),
            16 => samples.extend(row.chunks_exact(2).take(per_row).map(|pair| pair[0])),
            _ => {
                let mask = (1u16 << bits) as u8 - 1;
                samples.extend((0..per_row).map(|i| {
                    let bit = i * bits;
                    (row[bit / 8] >> (8 - bits - bit % 8)) & mask
                }));
            }
        }
    }
    Ok(samples)
}

fn to_rgb(layout: SampleLayout, px: &[u8]) -> [u8; 3] {
    match layout {
        SampleLayout::Gray => [px[0], px[0], px[0]],
        SampleLayout::Rgb => [px[0], px[1], px[2]],
        SampleLayout::Cmyk => {
            let k = 255 - px[3] as u32;
            let ch = |c: u8| ((255 - c as u32) * k / 255) as u8;
            [ch(px[0]), ch(px[1]), ch(px[2])]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn raw(layout: SampleLayout, width: u32, height: u32, data: Vec<u8>) -> EmbeddedImage {
        raw_in(ColorSpace::Device(layout), 8, width, height, data)
    }

    fn raw_in(
        color_space: ColorSpace,
        bits_per_component: u8,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> EmbeddedImage {
        EmbeddedImage {
            page_index: 0,
            object_id: (7, 0),
            width,
            height,
            encoding: EmbeddedEncoding::Raw,
            color_space: Some(color_space),
            bits_per_component,
            data,
        }
    }

    #[test]
    fn capabilities_follow_params() {
        let all = Codecs::detect(&ExtractorParams::default());
        assert!(all.can_probe(EmbeddedEncoding::Raw));
        assert!(!all.can_probe(EmbeddedEncoding::Jpeg2000));
        assert!(all.can_transcode(EmbeddedEncoding::Raw));
        assert!(!all.can_transcode(EmbeddedEncoding::Jbig2));

        let none = Codecs::detect(&ExtractorParams {
            probe_dimensions: false,
            transcode: false,
            ..ExtractorParams::default()
        });
        assert!(!none.can_probe(EmbeddedEncoding::Raw));
        assert!(!none.can_transcode(EmbeddedEncoding::Raw));
    }

    #[test]
    fn gray_and_cmyk_samples_convert_to_rgb() {
        let gray = raw_to_rgb(&raw(SampleLayout::Gray, 2, 1, vec![0, 200])).unwrap();
        assert_eq!(*gray.get_pixel(1, 0), Rgb([200, 200, 200]));

        let cmyk = raw_to_rgb(&raw(SampleLayout::Cmyk, 2, 1, vec![0, 0, 0, 0, 255, 0, 0, 0]))
            .unwrap();
        assert_eq!(*cmyk.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*cmyk.get_pixel(1, 0), Rgb([0, 255, 255]));
    }

    #[test]
    fn short_sample_buffer_is_rejected() {
        let err = raw_to_rgb(&raw(SampleLayout::Rgb, 4, 4, vec![0; 10])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage(_)));
    }

    #[test]
    fn bilevel_rows_are_padded_to_whole_bytes() {
        // 10 px wide: two bytes per row, the last 6 bits unused
        let image = raw_in(
            ColorSpace::Device(SampleLayout::Gray),
            1,
            10,
            2,
            vec![0b1010_1010, 0b1100_0000, 0b0000_0000, 0b0100_0000],
        );
        let rgb = raw_to_rgb(&image).unwrap();
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*rgb.get_pixel(1, 0), Rgb([0, 0, 0]));
        assert_eq!(*rgb.get_pixel(8, 0), Rgb([255, 255, 255]));
        assert_eq!(*rgb.get_pixel(9, 0), Rgb([255, 255, 255]));
        assert_eq!(*rgb.get_pixel(8, 1), Rgb([0, 0, 0]));
        assert_eq!(*rgb.get_pixel(9, 1), Rgb([255, 255, 255]));
    }

    #[test]
    fn indexed_samples_go_through_the_palette() {
        let rgb_palette = ColorSpace::Indexed {
            base: SampleLayout::Rgb,
            lookup: vec![0, 0, 255, 255, 0, 0],
        };
        let image = raw_to_rgb(&raw_in(rgb_palette, 8, 3, 1, vec![0, 1, 9])).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 255]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([255, 0, 0]));
        // Out of range indices take the last entry
        assert_eq!(*image.get_pixel(2, 0), Rgb([255, 0, 0]));

        let cmyk_palette = ColorSpace::Indexed {
            base: SampleLayout::Cmyk,
            lookup: vec![0, 0, 0, 0, 0, 255, 255, 0],
        };
        // 4-bit indices 0 and 1 packed into one byte
        let image = raw_to_rgb(&raw_in(cmyk_palette, 4, 2, 1, vec![0x01])).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([255, 0, 0]));
    }

    #[test]
    fn sixteen_bit_indexed_samples_are_rejected() {
        let palette = ColorSpace::Indexed {
            base: SampleLayout::Gray,
            lookup: vec![0, 255],
        };
        let err = raw_to_rgb(&raw_in(palette, 16, 1, 1, vec![0, 1])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage(_)));
    }
}
