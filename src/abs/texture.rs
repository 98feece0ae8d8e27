//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and [`PixelFormat`] which decides how decoded pixels are laid out for upload.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;

/// Errors that can occur while turning an image file into a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported number of color components: {0}")]
    UnsupportedComponents(u8),
    #[error("failed to create texture object: {0}")]
    Create(String),
}

/// Channel layout of the pixels uploaded to a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Red,
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Infers the layout from the number of color components of a decoded image.
    pub fn from_components(components: u8) -> Result<Self, TextureError> {
        match components {
            1 => Ok(Self::Red),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(TextureError::UnsupportedComponents(n)),
        }
    }

    /// Returns the OpenGL enum used as both internal and client format.
    pub fn gl_format(self) -> u32 {
        match self {
            Self::Red => glow::RED,
            Self::Rgb => glow::RGB,
            Self::Rgba => glow::RGBA,
        }
    }

    /// Returns the number of bytes per pixel.
    pub fn components(self) -> usize {
        match self {
            Self::Red => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Converts a decoded image into tightly packed 8-bit pixels in the inferred layout.
///
/// Higher bit depths are narrowed to 8 bits per channel.
pub fn pixel_data(image: &DynamicImage) -> Result<(PixelFormat, Vec<u8>), TextureError> {
    let format = PixelFormat::from_components(image.color().channel_count())?;
    let data = match format {
        PixelFormat::Red => image.to_luma8().into_raw(),
        PixelFormat::Rgb => image.to_rgb8().into_raw(),
        PixelFormat::Rgba => image.to_rgba8().into_raw(),
    };
    Ok((format, data))
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Texture {
    /// Decodes the image at `path` and uploads it to a new mipmapped texture.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let texture = Self::new(gl, &image)?;
        log::info!(
            "Loaded texture {} ({}x{}, {:?})",
            path.display(),
            texture.width,
            texture.height,
            texture.format
        );
        Ok(texture)
    }

    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        let (format, data) = pixel_data(image)?;
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * format.components()
        );
        unsafe {
            let texture = gl.create_texture().map_err(TextureError::Create)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            // RGB and single channel rows are not 4-byte aligned in general.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format.gl_format() as i32,
                width as i32,
                height as i32,
                0,
                format.gl_format(),
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
                format,
            })
        }
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }

    /// Clears whatever 2D texture is bound to the specified texture unit.
    pub fn unbind(gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_components() {
        assert_eq!(PixelFormat::from_components(1).unwrap(), PixelFormat::Red);
        assert_eq!(PixelFormat::from_components(3).unwrap(), PixelFormat::Rgb);
        assert_eq!(PixelFormat::from_components(4).unwrap(), PixelFormat::Rgba);
        for n in [0, 2, 5] {
            assert!(matches!(
                PixelFormat::from_components(n),
                Err(TextureError::UnsupportedComponents(c)) if c == n
            ));
        }
    }

    #[test]
    fn test_gl_formats() {
        assert_eq!(PixelFormat::Red.gl_format(), glow::RED);
        assert_eq!(PixelFormat::Rgb.gl_format(), glow::RGB);
        assert_eq!(PixelFormat::Rgba.gl_format(), glow::RGBA);
    }

    #[test]
    fn test_pixel_data_is_tightly_packed() {
        for (image, expected) in [
            (DynamicImage::new_luma8(3, 2), PixelFormat::Red),
            (DynamicImage::new_rgb8(3, 2), PixelFormat::Rgb),
            (DynamicImage::new_rgba8(3, 2), PixelFormat::Rgba),
            (DynamicImage::new_rgb16(3, 2), PixelFormat::Rgb),
        ] {
            let (format, data) = pixel_data(&image).unwrap();
            assert_eq!(format, expected);
            assert_eq!(data.len(), 3 * 2 * format.components());
        }
    }

    #[test]
    fn test_luma_alpha_is_rejected() {
        let image = DynamicImage::new_luma_a8(2, 2);
        assert!(matches!(
            pixel_data(&image),
            Err(TextureError::UnsupportedComponents(2))
        ));
    }

    #[test]
    fn test_default_textures_decode() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        for path in crate::config::Config::default().textures {
            let image = image::open(root.join(&path)).unwrap();
            let (format, data) = pixel_data(&image).unwrap();
            assert!(matches!(format, PixelFormat::Rgb | PixelFormat::Rgba));
            assert_eq!(data.len(), 64 * 64 * format.components());
        }
    }
}
