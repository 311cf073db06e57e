//! Sequentially numbered output files, `{prefix}_{n}.{ext}`.
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::Result;
use crate::io::writers::jpeg::write_rgb_jpeg;

/// Hands out file names from a running counter.
///
/// The counter only advances once a file has actually been written, so a
/// failed or skipped item never leaves a gap in the numbering.
#[derive(Debug)]
pub struct NumberedWriter {
    dir: PathBuf,
    prefix: String,
    next: u32,
    written: usize,
}

impl NumberedWriter {
    /// Creates `dir` (and parents) if needed.
    pub fn create(dir: &Path, prefix: &str, start_index: u32) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            next: start_index,
            written: 0,
        })
    }

    pub fn path_for(&self, extension: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.{}", self.prefix, self.next, extension))
    }

    pub fn write_bytes(&mut self, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(extension);
        std::fs::write(&path, bytes)?;
        Ok(self.advance(path))
    }

    pub fn write_jpeg(&mut self, image: &RgbImage, quality: u8) -> Result<PathBuf> {
        let path = self.path_for("jpg");
        write_rgb_jpeg(&path, image, quality)?;
        Ok(self.advance(path))
    }

    pub fn next_index(&self) -> u32 {
        self.next
    }

    /// Files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn advance(&mut self, path: PathBuf) -> PathBuf {
        self.next += 1;
        self.written += 1;
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn names_follow_the_counter() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");
        let mut writer = NumberedWriter::create(&out, "card", 101).unwrap();
        assert_eq!(writer.path_for("jpg"), out.join("card_101.jpg"));

        let first = writer.write_bytes("jpx", b"data").unwrap();
        assert_eq!(first, out.join("card_101.jpx"));

        let img = RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]));
        let second = writer.write_jpeg(&img, 90).unwrap();
        assert_eq!(second, out.join("card_102.jpg"));
        assert!(second.is_file());
        assert_eq!(writer.next_index(), 103);
        assert_eq!(writer.written(), 2);
    }

    #[test]
    fn failed_write_keeps_the_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = NumberedWriter::create(dir.path(), "card", 1).unwrap();
        let too_wide = RgbImage::new(70_000, 1);
        assert!(writer.write_jpeg(&too_wide, 90).is_err());
        assert_eq!(writer.next_index(), 1);
        assert_eq!(writer.written(), 0);
    }
}
