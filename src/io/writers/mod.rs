//! Output writers: JPEG files, numbered file sequences, and image-per-page PDFs.
pub mod jpeg;
pub mod numbered;
pub mod pdf;

pub use jpeg::{encode_rgb_jpeg, write_rgb_jpeg};
pub use numbered::NumberedWriter;
pub use pdf::write_multipage_pdf;
