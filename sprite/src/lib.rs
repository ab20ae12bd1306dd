//! Turns a raster image into a 0/1 sprite mask literal.
//!
//! Dark pixels (mean channel value below the threshold) become `1`, light
//! ones `0`. The grid is rendered either as a named constant or as a bare
//! nested array.

mod format;
mod grid;
pub mod load;

pub use {
    format::{Form, Label, LabelError, format_compact, format_named},
    grid::{PixelGrid, Summary, Threshold},
    load::{LoadError, Raster},
};

use camino::Utf8PathBuf as PathBuf;

pub struct Config {
    pub path: PathBuf,
    pub threshold: Threshold,
    pub target_wide: Option<u32>,
    pub form: Form,
}

pub struct Converted {
    pub text: String,
    pub summary: Summary,
}

/// Runs the whole pipeline. Nothing is written anywhere; the caller decides
/// where text and summary go.
pub fn convert(config: &Config) -> Result<Converted, LoadError> {
    let image = load::load(&config.path, config.target_wide)?;
    let grid = PixelGrid::from_pixmap(&image, config.threshold);
    drop(image);

    let text = config.form.render(&grid);

    Ok(Converted{text, summary: Summary::of(&grid)})
}
