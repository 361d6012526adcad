//! Paddle kinematics
//!
//! Pure positional update, no collision handling. The paddle is clamped to
//! the canvas and drags any anchored ball by the same horizontal delta.

use serde::{Deserialize, Serialize};

use super::frame::Updatable;
use super::input::InputState;
use super::state::SimEvent;
use super::store::EntityStore;
use crate::consts::CANVAS_WIDTH;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaddleIntegrator;

impl Updatable for PaddleIntegrator {
    fn update(
        &mut self,
        store: &mut EntityStore,
        _input: &dyn InputState,
        dt: f32,
        _events: &mut Vec<SimEvent>,
    ) {
        for paddle_id in store.paddle_ids() {
            let Some(body) = store.paddle_body(paddle_id).copied() else {
                continue;
            };
            let Some(tf) = store.transform_mut(paddle_id) else {
                debug_assert!(false, "paddle {paddle_id} has no transform");
                continue;
            };

            let max = CANVAS_WIDTH / 2.0 - tf.half_w();
            let old_x = tf.pos.x;
            tf.pos.x = (old_x + dt * body.speed * body.vx).clamp(-max, max);
            let dx = tf.pos.x - old_x;

            if dx == 0.0 {
                continue;
            }

            // Rigid attachment: anchored balls follow the paddle exactly
            for ball_id in store.ball_ids() {
                let anchored_here = store
                    .ball_body(ball_id)
                    .is_some_and(|b| b.anchor == Some(paddle_id));
                if anchored_here {
                    if let Some(ball_tf) = store.transform_mut(ball_id) {
                        ball_tf.pos.x += dx;
                    }
                }
            }
        }
    }
}
