use {
    camino::{Utf8Path as Path, Utf8PathBuf as PathBuf},
    pixmap::{Pixmap, Rgb},
};

pub type Raster = Pixmap<Vec<Rgb>>;

/// Largest raster a resize may produce.
pub const MAX_PIXELS: u64 = 1 << 26;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("decoded {path} has inconsistent dimensions")]
    Malformed { path: PathBuf },
    #[error("resizing to {wide}x{high} exceeds the {limit} pixel limit")]
    TooLarge { wide: u32, high: u32, limit: u64 },
}

/// Decodes `path` into an RGB raster, whatever its stored colour type.
pub fn load_rgb(path: &Path) -> Result<Raster, LoadError> {
    if !path.exists() {return Err(LoadError::NotFound(path.to_owned()))}

    // sniff the contents, so a misnamed file still decodes
    let decoded = image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::from)
        .and_then(|reader| reader.decode())
        .map_err(|source| LoadError::Decode { path: path.to_owned(), source })?;
    let color = decoded.color();
    let rgb = decoded.into_rgb8();
    let (wide, high) = rgb.dimensions();
    log::debug!("decoded {path}: {color:?} {wide}x{high}");

    Pixmap::from_rgb8(wide, high, rgb.as_raw())
        .ok_or_else(|| LoadError::Malformed { path: path.to_owned() })
}

/// Size that `wide`×`high` scales to at `target_wide`, keeping aspect.
/// Height rounds half away from zero and never drops below one row.
pub fn scaled_size(wide: u32, high: u32, target_wide: u32) -> [u32; 2] {
    if wide == 0 {return [target_wide, high]}
    let aspect = high as f64 / wide as f64;
    let target_high = (target_wide as f64 * aspect).round().max(1.) as u32;
    [target_wide, target_high]
}

/// Nearest-neighbour resize to `target_wide` columns, if one is given.
pub fn resize(image: Raster, target_wide: Option<u32>) -> Result<Raster, LoadError> {
    let Some(target_wide) = target_wide else {return Ok(image)};
    let [wide, high] = scaled_size(image.wide(), image.high(), target_wide);
    if [wide, high] == image.dims() {return Ok(image)}
    if wide as u64 * high as u64 > MAX_PIXELS {
        return Err(LoadError::TooLarge { wide, high, limit: MAX_PIXELS });
    }

    log::debug!("resizing {}x{} -> {wide}x{high}", image.wide(), image.high());
    Ok(image.resized_nearest(wide, high))
}

/// Loads `path` and applies the optional resize, reporting the final size.
pub fn load(path: &Path, target_wide: Option<u32>) -> Result<Raster, LoadError> {
    let image = resize(load_rgb(path)?, target_wide)?;
    log::info!("Image size: {}x{}", image.wide(), image.high());
    Ok(image)
}
