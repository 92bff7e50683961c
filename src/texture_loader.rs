use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use raylib::prelude::*;
use tracing::{debug, warn};

use crate::asset::{Orientation, extension, read_orientation};
use crate::error::AssetError;

const PLACEHOLDER_SIZE: i32 = 64;

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, AssetError> {
    let file_bytes = fs::read(image_path).map_err(|source| AssetError::Io {
        path: image_path.to_path_buf(),
        source,
    })?;
    let decode_error = |message: String| AssetError::Decode {
        path: image_path.to_path_buf(),
        message,
    };

    let orientation = read_orientation(image_path, &file_bytes);

    // Provide extension hint for loading from memory
    let hint = format!(".{}", extension(image_path).unwrap_or_default());
    let mut image = Image::load_image_from_mem(&hint, &file_bytes)
        .map_err(|e| decode_error(e.to_string()))?;

    match orientation {
        Orientation::Normal => {}
        Orientation::Rotate90Ccw => image.rotate_ccw(),
        turns => {
            for _ in 0..turns.quarter_turns_cw() {
                image.rotate_cw();
            }
        }
    }
    debug!(path = %image_path.display(), ?orientation, "decoded image");

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| decode_error(e.to_string()))
}

/// Whether a texture is the real asset or the stand-in for a failed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Loaded,
    Placeholder,
}

/// Every texture an instance can show, loaded once up front.
///
/// A path that fails to load is served the placeholder from then on; there is
/// no retry.
pub struct TextureCache {
    textures: HashMap<PathBuf, Texture2D>,
    placeholder: Texture2D,
}

impl TextureCache {
    pub fn preload(rl: &mut RaylibHandle, thread: &RaylibThread, paths: &[&Path]) -> anyhow::Result<Self> {
        let image = Image::gen_image_color(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, Color::new(90, 30, 43, 255));
        let placeholder = rl
            .load_texture_from_image(thread, &image)
            .map_err(|e| anyhow::anyhow!("failed to create placeholder texture: {e}"))?;

        let mut textures = HashMap::new();
        for path in paths {
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => {
                    textures.insert(path.to_path_buf(), texture);
                }
                Err(e) => {
                    warn!(error = %e, "showing placeholder");
                }
            }
        }

        Ok(Self { textures, placeholder })
    }

    pub fn get(&self, path: &Path) -> (&Texture2D, AssetStatus) {
        match self.textures.get(path) {
            Some(texture) => (texture, AssetStatus::Loaded),
            None => (&self.placeholder, AssetStatus::Placeholder),
        }
    }
}
