//! Headless engine that records the scene graph instead of drawing it

use super::{Engine, ImageData, NodeHandle, SourceRect, TextureHandle, Viewport};
use crate::sim::{Affine, Tick};

/// Everything the engine was told about one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRecord {
    pub parent: Option<NodeHandle>,
    pub transform: Option<Affine>,
    pub texture: Option<(TextureHandle, SourceRect)>,
}

/// In-memory `Engine` implementation
#[derive(Debug, Default)]
pub struct RecordingEngine {
    nodes: Vec<NodeRecord>,
    textures: Vec<(u32, u32)>,
    renders: u64,
    last_render: Option<(NodeHandle, Tick, Viewport)>,
    fail_uploads: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every texture upload fail
    pub fn fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&NodeRecord> {
        self.nodes.get(handle.0 as usize)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children_of(&self, parent: NodeHandle) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.parent == Some(parent))
            .count()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn last_render(&self) -> Option<(NodeHandle, Tick, Viewport)> {
        self.last_render
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut NodeRecord> {
        let node = self.nodes.get_mut(handle.0 as usize);
        if node.is_none() {
            log::warn!("Unknown node {:?}", handle);
        }
        node
    }
}

impl Engine for RecordingEngine {
    fn register_node(&mut self) -> NodeHandle {
        self.nodes.push(NodeRecord::default());
        NodeHandle(self.nodes.len() as u32 - 1)
    }

    fn set_parent(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn set_transform(&mut self, node: NodeHandle, transform: Affine) {
        if let Some(node) = self.node_mut(node) {
            node.transform = Some(transform);
        }
    }

    fn set_texture(&mut self, node: NodeHandle, texture: TextureHandle, source: SourceRect) {
        if let Some(node) = self.node_mut(node) {
            node.texture = Some((texture, source));
        }
    }

    fn upload_texture(&mut self, image: &ImageData) -> Result<TextureHandle, String> {
        if self.fail_uploads {
            return Err("uploads disabled".to_string());
        }
        let expected = image.width as usize * image.height as usize * 4;
        if image.pixels.len() != expected {
            return Err(format!(
                "expected {} bytes of RGBA, got {}",
                expected,
                image.pixels.len()
            ));
        }
        self.textures.push((image.width, image.height));
        Ok(TextureHandle(self.textures.len() as u32 - 1))
    }

    fn render(&mut self, root: NodeHandle, tick: Tick, viewport: Viewport) {
        self.renders += 1;
        self.last_render = Some((root, tick, viewport));
    }
}
