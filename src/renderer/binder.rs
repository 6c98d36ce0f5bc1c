//! Render binder
//!
//! Keeps one engine node per entity and pushes every entity's transform to the
//! engine each frame. Bullet and enemy collections are append-only, so node
//! lists stay index-aligned with them.

use super::assets::{GameSprites, SpriteAsset};
use super::{Engine, NodeHandle, Viewport};
use crate::sim::{Affine, EntityRef, SimState, Tick};

pub struct RenderBinder {
    root: NodeHandle,
    sprites: GameSprites,
    ship_node: Option<NodeHandle>,
    bullet_nodes: Vec<NodeHandle>,
    enemy_nodes: Vec<NodeHandle>,
}

impl RenderBinder {
    /// Register the scene root with an identity transform
    pub fn new(engine: &mut impl Engine, sprites: GameSprites) -> Self {
        let root = engine.register_node();
        engine.set_transform(root, Affine::IDENTITY);
        Self {
            root,
            sprites,
            ship_node: None,
            bullet_nodes: Vec::new(),
            enemy_nodes: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeHandle {
        self.root
    }

    pub fn ship_node(&self) -> Option<NodeHandle> {
        self.ship_node
    }

    pub fn bullet_nodes(&self) -> &[NodeHandle] {
        &self.bullet_nodes
    }

    pub fn enemy_nodes(&self) -> &[NodeHandle] {
        &self.enemy_nodes
    }

    /// Register nodes for entities seen for the first time, then push the
    /// transform of every entity.
    pub fn sync(&mut self, engine: &mut impl Engine, state: &SimState, tick: Tick) {
        if let Some(ship) = &state.ship {
            let node = match self.ship_node {
                Some(node) => node,
                None => {
                    let node = attach(engine, self.root, &self.sprites.ship);
                    self.ship_node = Some(node);
                    node
                }
            };
            engine.set_transform(node, EntityRef::Ship(ship).compute_transform(tick));
        }

        while self.bullet_nodes.len() < state.bullets.len() {
            let node = attach(engine, self.root, &self.sprites.bullet);
            self.bullet_nodes.push(node);
        }
        for (bullet, &node) in state.bullets.iter().zip(&self.bullet_nodes) {
            engine.set_transform(node, EntityRef::Bullet(bullet).compute_transform(tick));
        }

        while self.enemy_nodes.len() < state.enemies.len() {
            let node = attach(engine, self.root, &self.sprites.enemy);
            self.enemy_nodes.push(node);
        }
        for (enemy, &node) in state.enemies.iter().zip(&self.enemy_nodes) {
            engine.set_transform(node, EntityRef::Enemy(enemy).compute_transform(tick));
        }
    }

    /// Sync transforms and hand the tree to the engine
    pub fn render_frame(
        &mut self,
        engine: &mut impl Engine,
        state: &SimState,
        tick: Tick,
        viewport: Viewport,
    ) {
        self.sync(engine, state, tick);
        engine.render(self.root, tick, viewport);
    }
}

/// New textured child of `root`
fn attach(engine: &mut impl Engine, root: NodeHandle, sprite: &SpriteAsset) -> NodeHandle {
    let node = engine.register_node();
    engine.set_parent(node, root);
    engine.set_texture(node, sprite.texture, sprite.source_rect());
    node
}
