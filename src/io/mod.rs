//! I/O layer for word lists and PDF documents.
//! Provides the `pdf` embedded-image reader, the `raster` page renderer,
//! `codecs` capability detection, and `writers` for JPEG/PDF outputs.
pub mod codecs;
pub use codecs::{Codecs, raw_to_rgb};

pub mod pdf;
pub use pdf::{EmbeddedImage, PdfSource};

pub mod raster;
pub use raster::PageRasterizer;

pub mod words;
pub use words::load_word_list;

pub mod writers;
