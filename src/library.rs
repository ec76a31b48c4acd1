/// Saving processed images to the pictures directory
///
/// The desktop stand-in for "write to the photo album": processed images
/// land as timestamped PNGs in a SnapFilter folder under the user's
/// pictures directory. Each save request resolves to exactly one outcome,
/// the saved path or an error; there is no retry.

use std::path::{Path, PathBuf};

use chrono::Utc;
use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not create {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("save task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Where saved images go. Falls back through the data and home
/// directories for systems without a pictures directory.
fn save_dir() -> PathBuf {
    let mut path = dirs::picture_dir()
        .or_else(|| dirs::data_dir())
        .or_else(|| dirs::home_dir())
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("SnapFilter");
    path
}

/// Write a processed image into the pictures directory on a blocking task
pub async fn save_photo(image: RgbaImage) -> Result<PathBuf, SaveError> {
    tokio::task::spawn_blocking(move || save_photo_blocking(&image, &save_dir())).await?
}

fn save_photo_blocking(image: &RgbaImage, dir: &Path) -> Result<PathBuf, SaveError> {
    std::fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let filename = format!("snapfilter-{}.png", Utc::now().format("%Y%m%d-%H%M%S%3f"));
    let path = dir.join(filename);

    image.save(&path).map_err(|source| SaveError::Write {
        path: path.clone(),
        source,
    })?;

    println!(
        "📸 Saved {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("snap-filter-tests")
            .join(format!("{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_save_writes_a_decodable_png() {
        let dir = temp_dir("save-ok");
        let image = RgbaImage::from_pixel(5, 4, Rgba([200, 100, 50, 255]));

        let path = save_photo_blocking(&image, &dir).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "png");

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (5, 4));
        assert_eq!(reloaded.get_pixel(0, 0), &Rgba([200, 100, 50, 255]));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_into_blocked_directory_is_an_error() {
        // A file where the directory should be makes create_dir_all fail
        let parent = temp_dir("save-blocked");
        std::fs::create_dir_all(&parent).unwrap();
        let blocked = parent.join("not-a-directory");
        std::fs::write(&blocked, b"occupied").unwrap();

        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let result = save_photo_blocking(&image, &blocked);
        assert!(matches!(result, Err(SaveError::CreateDir { .. })));

        let _ = std::fs::remove_dir_all(&parent);
    }

    #[test]
    fn test_save_resolves_to_exactly_one_outcome() {
        // The Result type carries success or failure, never both; check
        // both arms are reachable and mutually exclusive
        let dir = temp_dir("save-outcome");
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));

        match save_photo_blocking(&image, &dir) {
            Ok(path) => assert!(path.exists()),
            Err(e) => panic!("expected success, got {}", e),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
