//! Canvas export and background-image loading.
//!
//! Everything between "user clicked Save" and "PNG on disk" funnels
//! through `export_canvas`, the single fallible boundary the UI reports
//! from.  Cancelling a dialog is not an error.

use image::codecs::png::PngEncoder;
use image::{ImageError, RgbaImage};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Error type for canvas export operations.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Encode(ImageError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
            ExportError::Encode(e) => write!(f, "PNG encode error: {}", e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<ImageError> for ExportError {
    fn from(e: ImageError) -> Self {
        ExportError::Encode(e)
    }
}

/// Outcome of a save request that did not fail.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// The full export flow: prompt for a destination, then write the PNG.
pub fn export_canvas(snapshot: &RgbaImage) -> Result<SaveOutcome, ExportError> {
    match prompt_save_path() {
        Some(path) => {
            save_png(snapshot, &path)?;
            Ok(SaveOutcome::Saved(path))
        }
        // Dialog cancelled: no file, no error
        None => Ok(SaveOutcome::Cancelled),
    }
}

/// Ask the user where to save.  Returns `None` if the dialog was
/// cancelled.
pub fn prompt_save_path() -> Option<PathBuf> {
    FileDialog::new()
        .set_file_name("drawing.png")
        .add_filter("PNG image", &["png"])
        .add_filter("All files", &["*"])
        .save_file()
        .map(ensure_png_extension)
}

/// A chosen name with no extension at all gets `.png`; an explicit
/// extension is kept as-is.
fn ensure_png_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension("png")
    } else {
        path
    }
}

/// Encode the snapshot as PNG, entirely in memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    #[allow(deprecated)]
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Write the snapshot to `path`.  The PNG is encoded before the file is
/// created, so a failed encode leaves nothing on disk.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Ask the user for a background image.  Returns `None` if the dialog
/// was cancelled.
pub fn prompt_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Decode an image file to RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageError> {
    Ok(image::open(path)?.to_rgba8())
}
