mod resource_manager;
use resource_manager::ResourceManager;
mod model;
pub use model::*;
mod image;
pub use image::*;

use thiserror::Error;

use std::sync::Arc;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("failed to parse \"{path}\" at line {line}: {message}")]
    ObjParse {
        path: String,
        line: usize,
        message: String
    },
    #[error("failed to decode image \"{path}\": {message}")]
    ImageDecode {
        path: String,
        message: String
    }
}

/// Seconds an asset with no outside users is kept before being dropped.
const KILL_TIME: f32 = 30.0;

pub struct Resources {
    models: ResourceManager<Model>,
    images: ResourceManager<Image>
}

impl Resources {
    pub(crate) fn new() -> Self {
        Resources {
            models: ResourceManager::new(KILL_TIME),
            images: ResourceManager::new(KILL_TIME)
        }
    }

    pub(crate) fn update(&mut self) {
        self.models.update();
        self.images.update();
    }

    /// Load a Wavefront OBJ model, or reuse the cached copy.
    pub fn get_model(&mut self, asset_path: &str) -> Result<Arc<Model>, AssetError> {
        if let Some(model) = self.models.get(asset_path) {
            return Ok(model);
        }

        let model = Arc::new(Model::load(asset_path)?);
        log::info!("loaded model \"{}\" ({} vertices)", asset_path, model.mesh.vertex_count());
        self.models.insert(model.clone(), asset_path.to_owned());

        Ok(model)
    }

    /// Load an image, or reuse the cached copy.
    pub fn get_image(&mut self, asset_path: &str) -> Result<Arc<Image>, AssetError> {
        if let Some(image) = self.images.get(asset_path) {
            return Ok(image);
        }

        let image = Arc::new(Image::load(asset_path)?);
        log::info!(
            "loaded image \"{}\" ({}x{}, {} channels)",
            asset_path, image.dimensions.x, image.dimensions.y, image.channel_count
        );
        self.images.insert(image.clone(), asset_path.to_owned());

        Ok(image)
    }
}
