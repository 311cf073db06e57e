use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;

use crate::error::{Error, Result};

/// JPEG dimensions are stored as 16-bit values.
fn jpeg_dims(image: &RgbImage) -> Result<(u16, u16)> {
    let (w, h) = image.dimensions();
    match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::InvalidParams {
            arg: "jpeg_dimensions",
            value: format!("{}x{}", w, h),
        }),
    }
}

pub fn encode_rgb_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let (cols, rows) = jpeg_dims(image)?;
    let mut buf = Vec::new();
    let encoder = Encoder::new(&mut buf, quality);
    encoder.encode(image.as_raw(), cols, rows, ColorType::Rgb)?;
    Ok(buf)
}

pub fn write_rgb_jpeg(output: &Path, image: &RgbImage, quality: u8) -> Result<()> {
    let (cols, rows) = jpeg_dims(image)?;
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder.encode(image.as_raw(), cols, rows, ColorType::Rgb)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, ImageReader, Rgb};
    use std::io::Cursor;

    #[test]
    fn encoded_jpeg_keeps_dimensions() {
        let img = RgbImage::from_pixel(33, 17, Rgb([200, 10, 10]));
        let bytes = encode_rgb_jpeg(&img, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let dims = ImageReader::with_format(Cursor::new(&bytes), ImageFormat::Jpeg)
            .into_dimensions()
            .unwrap();
        assert_eq!(dims, (33, 17));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let img = RgbImage::new(70_000, 1);
        assert!(matches!(
            encode_rgb_jpeg(&img, 90),
            Err(Error::InvalidParams { .. })
        ));
    }
}
