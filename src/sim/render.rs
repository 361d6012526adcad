//! Read-only render seam
//!
//! The render collaborator implements [`Canvas`]; the scene pass walks the
//! sprite tables and emits draw calls. It takes the store by shared
//! reference, so mutation of simulation state is excluded by construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::frame::Renderable;
use super::store::EntityStore;

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

pub const PADDLE_COLOR: Color = Color(0xb5b5b5);
pub const BALL_COLOR: Color = Color(0xffffff);
/// Brick colors indexed by remaining hits - 1
pub const BRICK_PALETTE: [Color; 3] = [Color(0xccff33), Color(0xffcc33), Color(0x33ccff)];

/// Drawing surface provided by the render collaborator.
/// Coordinates are canvas-centered, +y up; rects take center and full size.
pub trait Canvas {
    fn fill_rect(&mut self, center: Vec2, size: Vec2, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
}

/// A recorded draw call, for tests and headless drivers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Rect {
        center: Vec2,
        size: Vec2,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
}

/// Canvas that records ops instead of rasterizing
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, center: Vec2, size: Vec2, color: Color) {
        self.ops.push(DrawOp::Rect {
            center,
            size,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.ops.push(DrawOp::Ellipse {
            center,
            radii,
            color,
        });
    }
}

/// Draws paddle and bricks as rectangles and balls as ellipses, with brick
/// color keyed by remaining hit points.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SceneRenderer;

impl Renderable for SceneRenderer {
    fn draw(&self, store: &EntityStore, canvas: &mut dyn Canvas) {
        for (id, sprite) in store.paddle_sprites() {
            let Some(tf) = store.transform(id) else {
                debug_assert!(false, "paddle sprite {id} has no transform");
                continue;
            };
            canvas.fill_rect(tf.pos, tf.size, sprite.color);
        }

        for (id, _sprite) in store.brick_sprites() {
            let (Some(tf), Some(body)) = (store.transform(id), store.brick_body(id)) else {
                debug_assert!(false, "brick sprite {id} missing transform or body");
                continue;
            };
            debug_assert!(body.hits >= 1, "live brick {id} with zero hits");
            let idx = (body.hits.max(1) - 1).min(BRICK_PALETTE.len() as u8 - 1) as usize;
            canvas.fill_rect(tf.pos, tf.size, BRICK_PALETTE[idx]);
        }

        for (id, sprite) in store.ball_sprites() {
            let Some(tf) = store.transform(id) else {
                debug_assert!(false, "ball sprite {id} has no transform");
                continue;
            };
            canvas.fill_ellipse(tf.pos, tf.size / 2.0, sprite.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::spawn_world;

    #[test]
    fn test_scene_op_counts() {
        let mut store = EntityStore::new();
        spawn_world(&mut store, 11);

        let mut canvas = RecordingCanvas::default();
        SceneRenderer.draw(&store, &mut canvas);

        let rects = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .count();
        let ellipses = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Ellipse { .. }))
            .count();
        assert_eq!(rects, 1 + 48);
        assert_eq!(ellipses, 1);
    }

    #[test]
    fn test_brick_color_tracks_hits() {
        let mut store = EntityStore::new();
        spawn_world(&mut store, 11);

        let brick = store.brick_ids()[0];
        store.brick_body_mut(brick).unwrap().hits = 3;

        let mut canvas = RecordingCanvas::default();
        SceneRenderer.draw(&store, &mut canvas);

        let brick_pos = store.transform(brick).unwrap().pos;
        let op = canvas
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::Rect { center, .. } if *center == brick_pos))
            .unwrap();
        assert!(matches!(op, DrawOp::Rect { color, .. } if *color == BRICK_PALETTE[2]));
    }

    #[test]
    fn test_destroyed_brick_not_drawn() {
        let mut store = EntityStore::new();
        spawn_world(&mut store, 11);

        let brick = store.brick_ids()[0];
        let gone_pos = store.transform(brick).unwrap().pos;
        store.remove_entity(brick);

        let mut canvas = RecordingCanvas::default();
        SceneRenderer.draw(&store, &mut canvas);

        assert!(!canvas
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { center, .. } if *center == gone_pos)));
    }
}
