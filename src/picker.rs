/// Photo selection and decoding
///
/// Wraps the native file dialog and decodes the chosen file off the UI
/// thread. The dialog itself is synchronous (it blocks inside `update`,
/// same as the folder picker pattern); only the decode hops to a
/// background task.

use std::path::PathBuf;

use image::DynamicImage;
use rfd::FileDialog;
use thiserror::Error;

/// Formats the picker offers; everything here decodes through `image::open`
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Show the native file picker filtered to common image formats.
/// Returns `None` when the user cancels.
pub fn pick_photo() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select a Picture")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
}

/// Decode an image file on a blocking task
pub async fn load_photo(path: PathBuf) -> Result<DynamicImage, LoadError> {
    tokio::task::spawn_blocking(move || load_photo_blocking(path)).await?
}

fn load_photo_blocking(path: PathBuf) -> Result<DynamicImage, LoadError> {
    image::open(&path).map_err(|source| LoadError::Open { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_decodes_a_png_from_disk() {
        let dir = std::env::temp_dir().join("snap-filter-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("picker-{}.png", std::process::id()));

        RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let decoded = load_photo_blocking(path.clone()).unwrap();
        assert_eq!(decoded.to_rgba8().dimensions(), (3, 2));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_open_error() {
        let result = load_photo_blocking(PathBuf::from("/definitely/not/here.png"));
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }
}
