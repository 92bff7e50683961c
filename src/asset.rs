use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use tracing::debug;

use crate::error::AssetError;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let io_error = |source| AssetError::Io { path: dir_path.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(AssetError::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

pub fn is_image(path: &Path) -> bool {
    extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|s| s.to_str()).map(str::to_lowercase)
}

/// Rotation to bake into a decoded image.
///
/// Only the pure rotations of the EXIF orientation tag are handled; the
/// mirrored variants are shown as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,      // 1 = Top-left
    Rotate180,   // 3 = Bottom-right
    Rotate90Cw,  // 6 = Top-right
    Rotate90Ccw, // 8 = Bottom-left
}

impl Orientation {
    pub fn from_exif(value: u16) -> Self {
        match value {
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90Cw,
            8 => Orientation::Rotate90Ccw,
            _ => Orientation::Normal,
        }
    }

    /// Clockwise quarter turns needed to display the image upright
    pub fn quarter_turns_cw(self) -> u8 {
        match self {
            Orientation::Normal => 0,
            Orientation::Rotate90Cw => 1,
            Orientation::Rotate180 => 2,
            Orientation::Rotate90Ccw => 3,
        }
    }
}

/// Reads the EXIF orientation of a JPEG. Other formats, and JPEGs without
/// readable EXIF data, are treated as upright.
pub fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> Orientation {
    if !matches!(extension(image_path).as_deref(), Some("jpg" | "jpeg")) {
        return Orientation::Normal;
    }

    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .map(Orientation::from_exif)
            .unwrap_or(Orientation::Normal),
        Err(e) => {
            debug!(path = %image_path.display(), error = %e, "no usable EXIF data");
            Orientation::Normal
        }
    }
}
