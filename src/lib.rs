#![doc = r#"
cardsmith — batch tools for printing and harvesting board-game cards.

This crate bundles three independent pipelines behind a typed API. It powers the
`cardsmith` CLI and can be embedded in your own Rust applications.

- **Card generator**: a JSON word list becomes styled cards tiled onto pages
  and written as one multi-page PDF.
- **Image extractor**: embedded raster images of PDFs are filtered by size and
  saved as sequentially numbered files.
- **Auto-crop slicer**: PDF pages are rendered, trimmed of white margins and
  cut into an N×N grid of numbered card images.

Everything is pure Rust: `lopdf` reads and writes PDFs, `hayro` renders pages,
`image`/`imageproc`/`ab_glyph` draw and crop, `jpeg-encoder` writes JPEGs.

Stability
---------
The public library API is experimental in initial releases and may evolve.

Quick start: generate a card sheet
----------------------------------
```rust,no_run
use std::path::PathBuf;
use cardsmith::{generate_cards, GeneratorParams};

fn main() -> cardsmith::Result<()> {
    let params = GeneratorParams {
        words_path: PathBuf::from("words.json"),
        output_path: PathBuf::from("out/cards.pdf"),
        ..GeneratorParams::default()
    };

    let report = generate_cards(&params)?;
    println!("{} cards on {} page(s)", report.cards, report.pages);
    Ok(())
}
```

Extract embedded images
-----------------------
```rust,no_run
use std::path::PathBuf;
use cardsmith::{extract_images, ExtractorParams};

fn main() -> cardsmith::Result<()> {
    let params = ExtractorParams {
        documents: vec![PathBuf::from("overview.pdf")],
        output_dir: PathBuf::from("cards"),
        min_width: 300,
        min_height: 300,
        ..ExtractorParams::default()
    };

    let report = extract_images(&params)?;
    println!(
        "written={} filtered={} failed={}",
        report.images_written, report.images_filtered, report.items_failed
    );
    Ok(())
}
```

Slice card sheets
-----------------
```rust,no_run
use std::path::PathBuf;
use cardsmith::{slice_documents, SlicerParams};

fn main() -> cardsmith::Result<()> {
    let params = SlicerParams {
        documents: vec![PathBuf::from("sheets.pdf")],
        grid: 3,
        zoom: 2.0,
        ..SlicerParams::default()
    };
    let report = slice_documents(&params)?;
    println!("{} cards", report.cells_written);
    Ok(())
}
```

Configuration
-------------
[`Config`] groups the parameters of all three pipelines and loads from JSON; any
omitted field keeps its default.

```rust,no_run
use std::path::Path;
use cardsmith::Config;

fn main() -> cardsmith::Result<()> {
    let config = Config::load(Path::new("cardsmith.json"))?;
    cardsmith::slice_documents(&config.slicer)?;
    Ok(())
}
```

Error handling
--------------
All public functions return `cardsmith::Result<T>`; match on `cardsmith::Error` to
handle specific cases.

```rust,no_run
use cardsmith::{generate_cards, Error, GeneratorParams};

fn main() {
    match generate_cards(&GeneratorParams::default()) {
        Ok(report) => println!("{} page(s)", report.pages),
        Err(Error::MissingInput { path }) => eprintln!("missing: {}", path.display()),
        Err(Error::InvalidLayout(msg)) => eprintln!("layout: {msg}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level pipeline entry points and their reports.
- [`core`] — parameters, layout arithmetic, drawing, fonts, crop geometry.
- [`io`] — word list, PDF reading and rendering, codec capabilities, writers.
- [`types`] — embedded image encodings and color spaces.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{
    Config, ExtractorParams, FontCandidate, FontParams, GeneratorParams, Palette, SlicerParams,
};
pub use error::{Error, Result};
pub use types::{ColorSpace, EmbeddedEncoding, SampleLayout};

// Readers
pub use io::pdf::{EmbeddedImage, PdfSource};
pub use io::raster::PageRasterizer;

// High-level API re-exports
pub use api::{
    ExtractReport, GenerateReport, SliceReport, extract_images, generate_cards, slice_documents,
};
