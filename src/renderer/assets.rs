//! Sprite loading and caching
//!
//! Every sprite is decoded and uploaded once, at startup. Any failure here is
//! fatal to launch.

use std::collections::HashMap;
use std::path::PathBuf;

use glam::Vec2;

use super::{AssetLoader, Engine, ImageData, SourceRect, TextureHandle};
use crate::error::GameError;
use crate::settings::SpriteNames;
use crate::sim::SpriteSizes;

/// Uploaded sprite: texture plus image dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAsset {
    pub texture: TextureHandle,
    pub width: u32,
    pub height: u32,
}

impl SpriteAsset {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whole-image source rectangle
    pub fn source_rect(&self) -> SourceRect {
        SourceRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }
}

/// Sprites keyed by image name
#[derive(Debug, Default)]
pub struct SpriteCache {
    sprites: HashMap<String, SpriteAsset>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached sprite, or load, upload and cache it
    pub fn get_or_load(
        &mut self,
        name: &str,
        loader: &mut impl AssetLoader,
        engine: &mut impl Engine,
    ) -> Result<SpriteAsset, GameError> {
        if let Some(sprite) = self.sprites.get(name) {
            return Ok(*sprite);
        }

        let image = loader.load_image(name)?;
        let texture = engine
            .upload_texture(&image)
            .map_err(|reason| GameError::TextureUpload {
                name: name.to_string(),
                reason,
            })?;
        let sprite = SpriteAsset {
            texture,
            width: image.width,
            height: image.height,
        };
        log::info!("Loaded sprite {} ({}x{})", name, image.width, image.height);

        self.sprites.insert(name.to_string(), sprite);
        Ok(sprite)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// The three sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSprites {
    pub ship: SpriteAsset,
    pub bullet: SpriteAsset,
    pub enemy: SpriteAsset,
}

impl GameSprites {
    pub fn load(
        names: &SpriteNames,
        cache: &mut SpriteCache,
        loader: &mut impl AssetLoader,
        engine: &mut impl Engine,
    ) -> Result<Self, GameError> {
        Ok(Self {
            ship: cache.get_or_load(&names.ship, loader, engine)?,
            bullet: cache.get_or_load(&names.bullet, loader, engine)?,
            enemy: cache.get_or_load(&names.enemy, loader, engine)?,
        })
    }

    pub fn sizes(&self) -> SpriteSizes {
        SpriteSizes {
            ship: self.ship.size(),
            bullet: self.bullet.size(),
            enemy: self.enemy.size(),
        }
    }
}

/// Decodes PNG sprites from a directory
#[derive(Debug, Clone)]
pub struct FileAssetLoader {
    root: PathBuf,
}

impl FileAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for FileAssetLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageData, GameError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(GameError::AssetNotFound(path.display().to_string()));
        }

        let image = image::open(&path)
            .map_err(|source| GameError::AssetDecode {
                name: name.to_string(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();

        Ok(ImageData {
            pixels: image.into_raw(),
            width,
            height,
        })
    }
}

/// In-memory images, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    images: HashMap<String, ImageData>,
    loads: usize,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blank image of the given size
    pub fn with_blank(mut self, name: &str, width: u32, height: u32) -> Self {
        let pixels = vec![0; (width * height * 4) as usize];
        self.images.insert(
            name.to_string(),
            ImageData {
                pixels,
                width,
                height,
            },
        );
        self
    }

    /// Number of successful `load_image` calls
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageData, GameError> {
        let image = self
            .images
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::AssetNotFound(name.to_string()))?;
        self.loads += 1;
        Ok(image)
    }
}
