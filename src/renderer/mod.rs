//! Rendering seam
//!
//! The scene-graph engine and the image loader live outside this crate; they
//! are consumed through the `Engine` and `AssetLoader` traits. The binder turns
//! simulation state into node transforms once per frame.

pub mod assets;
pub mod binder;
pub mod headless;

pub use assets::{FileAssetLoader, GameSprites, MemoryAssetLoader, SpriteAsset, SpriteCache};
pub use binder::RenderBinder;
pub use headless::RecordingEngine;

use serde::Serialize;

use crate::error::GameError;
use crate::sim::{Affine, ScreenSize, Tick};

/// Scene-graph node owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeHandle(pub u32);

/// Uploaded texture owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureHandle(pub u32);

/// Pixel rectangle of a texture to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Per-frame viewport handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub screen: ScreenSize,
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// External scene-graph renderer
pub trait Engine {
    fn register_node(&mut self) -> NodeHandle;
    fn set_parent(&mut self, child: NodeHandle, parent: NodeHandle);
    fn set_transform(&mut self, node: NodeHandle, transform: Affine);
    fn set_texture(&mut self, node: NodeHandle, texture: TextureHandle, source: SourceRect);
    /// Upload decoded pixels; the error string is the engine's reason
    fn upload_texture(&mut self, image: &ImageData) -> Result<TextureHandle, String>;
    /// Draw the tree under `root`. Called once per frame after all steps.
    fn render(&mut self, root: NodeHandle, tick: Tick, viewport: Viewport);
}

/// External image source
pub trait AssetLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageData, GameError>;
}
