use glam::*;
use stb_image::image::LoadResult;

use super::AssetError;

#[derive(Clone, Debug)]
pub struct Image {
    pub data: Vec<u8>,
    pub dimensions: IVec2,
    pub channel_count: i32
}

impl Image {
    pub fn new(data: Vec<u8>, dimensions: &IVec2, channel_count: i32) -> Self {
        Image {
            data,
            dimensions: *dimensions,
            channel_count
        }
    }

    pub(crate) fn load(asset_path: &str) -> Result<Self, AssetError> {
        match stb_image::image::load(asset_path) {
            LoadResult::ImageU8(image) => Ok(Image::new(
                image.data,
                &IVec2::new(image.width as i32, image.height as i32),
                image.depth as i32
            )),
            LoadResult::ImageF32(_) => Err(AssetError::ImageDecode {
                path: asset_path.to_owned(),
                message: "HDR images are not supported".to_owned()
            }),
            LoadResult::Error(message) => Err(AssetError::ImageDecode {
                path: asset_path.to_owned(),
                message
            })
        }
    }

    /// Expand to tightly packed RGBA8 for GL upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.channel_count {
            4 => self.data.clone(),
            3 => self.data
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 0xFF])
                .collect(),
            2 => self.data
                .chunks_exact(2)
                .flat_map(|la| [la[0], la[0], la[0], la[1]])
                .collect(),
            1 => self.data
                .iter()
                .flat_map(|&l| [l, l, l, 0xFF])
                .collect(),
            _ => panic!("Failed to convert image. (Unsupported channel count)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_gains_an_opaque_alpha_channel() {
        let image = Image::new(vec![10, 20, 30, 40, 50, 60], &IVec2::new(2, 1), 3);
        assert_eq!(image.to_rgba8(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn grayscale_alpha_expands_to_rgba() {
        let image = Image::new(vec![100, 200], &IVec2::new(1, 1), 2);
        assert_eq!(image.to_rgba8(), vec![100, 100, 100, 200]);
    }

    #[test]
    fn rgba_is_passed_through() {
        let data = vec![1, 2, 3, 4];
        let image = Image::new(data.clone(), &IVec2::new(1, 1), 4);
        assert_eq!(image.to_rgba8(), data);
    }
}
