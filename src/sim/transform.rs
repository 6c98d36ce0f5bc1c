//! Per-entity render transforms
//!
//! Each entity kind maps its position and sprite size to a scale+translate
//! affine. No rotation or shear is ever produced.

use glam::Vec2;
use serde::Serialize;

use super::clock::Tick;
use super::state::{Bullet, Enemy, Ship};
use crate::consts::{BULLET_SCALE, ENEMY_SCALE};

/// 2x3 affine matrix, rows `[sx, 0, tx]` and `[0, sy, ty]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affine(pub [[f32; 3]; 2]);

impl Affine {
    pub const IDENTITY: Affine = Affine([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    pub fn scale_translate(scale: Vec2, translate: Vec2) -> Self {
        Affine([[scale.x, 0.0, translate.x], [0.0, scale.y, translate.y]])
    }

    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.0[0][0], self.0[1][1])
    }

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.0[0][2], self.0[1][2])
    }
}

/// Borrowed view of any drawable entity
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Ship(&'a Ship),
    Bullet(&'a Bullet),
    Enemy(&'a Enemy),
}

impl EntityRef<'_> {
    /// Transform for this frame. Motion is frame-stepped, so the tick is
    /// currently unused by every kind.
    pub fn compute_transform(&self, _tick: Tick) -> Affine {
        match self {
            // Sprite centered on the logical position
            EntityRef::Ship(ship) => {
                Affine::scale_translate(ship.sprite_size, ship.pos - ship.sprite_size / 2.0)
            }
            // Horizontally centered on the spawn column, top edge at the position
            EntityRef::Bullet(bullet) => {
                let size = bullet.sprite_size / BULLET_SCALE;
                let translate = Vec2::new(bullet.pos.x - size.x / 2.0, bullet.pos.y);
                Affine::scale_translate(size, translate)
            }
            EntityRef::Enemy(enemy) => {
                Affine::scale_translate(enemy.sprite_size / ENEMY_SCALE, enemy.pos())
            }
        }
    }
}
