//! Core building blocks: parameters, page layout arithmetic, shape and text
//! drawing, card rendering, and auto-crop/grid geometry. These are the
//! primitives consumed by the high-level `api` pipelines.
pub mod builtin_font;
pub mod card;
pub mod crop;
pub mod fonts;
pub mod layout;
pub mod params;
pub mod shapes;
