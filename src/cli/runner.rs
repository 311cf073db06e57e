use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cardsmith::{Config, ExtractorParams, GeneratorParams, SlicerParams};

use super::args::{CliArgs, Command, ExtractArgs, GenerateArgs, SliceArgs};
use super::errors::AppError;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    match path {
        Some(path) => {
            let config = Config::load(path).map_err(|source| AppError::Config {
                path: path.display().to_string(),
                source,
            })?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn generator_params(base: GeneratorParams, args: GenerateArgs) -> GeneratorParams {
    GeneratorParams {
        words_path: args.words.unwrap_or(base.words_path),
        output_path: args.output.unwrap_or(base.output_path),
        ..base
    }
}

fn extractor_params(base: ExtractorParams, args: ExtractArgs) -> ExtractorParams {
    ExtractorParams {
        documents: if args.documents.is_empty() {
            base.documents
        } else {
            args.documents
        },
        output_dir: args.output_dir.unwrap_or(base.output_dir),
        start_index: args.start_index.unwrap_or(base.start_index),
        ..base
    }
}

fn slicer_params(base: SlicerParams, args: SliceArgs) -> Result<SlicerParams, AppError> {
    if let Some(grid) = args.grid {
        if grid == 0 {
            return Err(AppError::ZeroGrid { grid });
        }
    }
    if let Some(zoom) = args.zoom {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(AppError::InvalidZoom { zoom });
        }
    }
    Ok(SlicerParams {
        documents: if args.documents.is_empty() {
            base.documents
        } else {
            args.documents
        },
        output_dir: args.output_dir.unwrap_or(base.output_dir),
        grid: args.grid.unwrap_or(base.grid),
        zoom: args.zoom.unwrap_or(base.zoom),
        ..base
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Generate(cmd) => {
            let params = generator_params(config.generator, cmd);
            info!("Reading words from {}", params.words_path.display());
            let report = cardsmith::generate_cards(&params).map_err(AppError::from)?;
            match report.output {
                Some(output) => info!(
                    "Generated {} cards on {} page(s): {}",
                    report.cards,
                    report.pages,
                    output.display()
                ),
                None => warn!("No cards generated"),
            }
        }
        Command::Extract(cmd) => {
            let params = extractor_params(config.extractor, cmd);
            let report = cardsmith::extract_images(&params).map_err(AppError::from)?;
            info!("Extraction complete!");
            info!("Images written: {}", report.images_written);
            info!("Below minimum size: {}", report.images_filtered);
            info!("Failed images: {}", report.items_failed);
            info!(
                "Documents: {} processed, {} missing, {} failed",
                report.documents_processed, report.documents_missing, report.documents_failed
            );
        }
        Command::Slice(cmd) => {
            let params = slicer_params(config.slicer, cmd)?;
            let report = cardsmith::slice_documents(&params).map_err(AppError::from)?;
            info!("Slicing complete!");
            info!("Cards written: {}", report.cells_written);
            info!(
                "Pages: {} rendered, {} blank, {} too small",
                report.pages_rendered, report.pages_blank, report.pages_too_small
            );
            info!(
                "Documents: {} processed, {} missing, {} failed",
                report.documents_processed, report.documents_missing, report.documents_failed
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn command_line_overrides_config_values() {
        let base = SlicerParams {
            grid: 4,
            zoom: 2.0,
            min_width: 10,
            ..SlicerParams::default()
        };
        let args = SliceArgs {
            grid: Some(2),
            ..SliceArgs::default()
        };
        let params = slicer_params(base, args).unwrap();
        assert_eq!(params.grid, 2);
        assert_eq!(params.zoom, 2.0);
        assert_eq!(params.min_width, 10);
        assert_eq!(params.documents, vec![PathBuf::from("cartas_dixit.pdf")]);
    }

    #[test]
    fn zero_grid_is_rejected() {
        let args = SliceArgs {
            grid: Some(0),
            ..SliceArgs::default()
        };
        assert!(matches!(
            slicer_params(SlicerParams::default(), args),
            Err(AppError::ZeroGrid { grid: 0 })
        ));
    }

    #[test]
    fn extract_documents_replace_defaults() {
        let cli = CliArgs::parse_from([
            "cardsmith",
            "extract",
            "a.pdf",
            "b.pdf",
            "--start-index",
            "7",
            "--log",
        ]);
        assert!(cli.log);
        let Command::Extract(cmd) = cli.command else {
            panic!("expected extract");
        };
        let params = extractor_params(ExtractorParams::default(), cmd);
        assert_eq!(
            params.documents,
            vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]
        );
        assert_eq!(params.start_index, 7);
        assert_eq!(params.min_width, 200);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/cardsmith.json"))).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
