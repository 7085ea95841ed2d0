use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui;
use tracing::{debug, warn};

/// Textures for object images, loaded lazily relative to the document.
/// Failed loads are remembered so a broken path is reported once.
pub struct ImageCache {
    base_path: PathBuf,
    textures: RefCell<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            textures: RefCell::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }

    pub fn get_or_load(&self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.borrow().get(path) {
            return cached.clone();
        }
        let full = self.resolve(path);
        let texture = match load_color_image(&full) {
            Ok(image) => {
                debug!(path = %full.display(), size = ?image.size, "image loaded");
                Some(ctx.load_texture(path, image, egui::TextureOptions::LINEAR))
            }
            Err(e) => {
                warn!(path = %full.display(), error = %e, "image could not be loaded");
                None
            }
        };
        self.textures
            .borrow_mut()
            .insert(path.to_string(), texture.clone());
        texture
    }
}

pub fn load_color_image(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::open(path)?.into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
