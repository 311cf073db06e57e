use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardsmith", version, about = "Card sheet generator, image extractor and slicer")]
pub struct CliArgs {
    /// JSON config file; command-line values take precedence over it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a word list as cards into one multi-page PDF
    Generate(GenerateArgs),
    /// Save embedded images of PDFs as numbered files
    Extract(ExtractArgs),
    /// Auto-crop PDF pages and cut them into a grid of numbered card images
    Slice(SliceArgs),
}

#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Word list (JSON array of strings)
    #[arg(short, long)]
    pub words: Option<PathBuf>,

    /// Output PDF
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Source PDFs, processed in order
    pub documents: Vec<PathBuf>,

    /// Directory receiving the numbered images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of the first written file
    #[arg(long)]
    pub start_index: Option<u32>,
}

#[derive(Args, Default)]
pub struct SliceArgs {
    /// Source PDFs, processed in order
    pub documents: Vec<PathBuf>,

    /// Directory receiving the numbered images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Cells per side of the grid (e.g. 3 for 3x3)
    #[arg(long)]
    pub grid: Option<u32>,

    /// Render magnification, 1.0 = 72 DPI
    #[arg(long)]
    pub zoom: Option<f32>,
}
