//! Paddle control system
//!
//! Translates the logical button state into paddle velocity and turns a
//! shoot press into launch events for anchored balls.

use serde::{Deserialize, Serialize};

use super::frame::Updatable;
use super::input::{Button, InputState};
use super::state::SimEvent;
use super::store::EntityStore;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaddleController;

/// Launch velocity from the ball's offset across the paddle.
///
/// The ratio is clamped to [-1, 1] before the square root: a ball hanging
/// past the paddle edge would otherwise produce |vx| > 1 and a non-real vy.
/// Clamping saturates to a fully horizontal launch instead.
pub(crate) fn launch_velocity(ball_x: f32, paddle_x: f32, paddle_half_w: f32) -> glam::Vec2 {
    let vx = ((ball_x - paddle_x) / paddle_half_w).clamp(-1.0, 1.0);
    let vy = (1.0 - vx * vx).max(0.0).sqrt();
    glam::Vec2::new(vx, vy)
}

impl Updatable for PaddleController {
    fn update(
        &mut self,
        store: &mut EntityStore,
        input: &dyn InputState,
        _dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        let left = input.is_pressed(Button::Left);
        let right = input.is_pressed(Button::Right);
        let shoot = input.is_pressed(Button::Shoot);

        for paddle_id in store.paddle_ids() {
            // Both pressed cancels out to 0
            let vx = (right as i8 - left as i8) as f32;
            if let Some(body) = store.paddle_body_mut(paddle_id) {
                body.vx = vx;
            }

            if !shoot {
                continue;
            }

            let Some(paddle_tf) = store.transform(paddle_id).copied() else {
                debug_assert!(false, "paddle {paddle_id} has no transform");
                continue;
            };

            for ball_id in store.ball_ids() {
                let anchored_here = store
                    .ball_body(ball_id)
                    .is_some_and(|b| b.anchor == Some(paddle_id));
                if !anchored_here {
                    continue;
                }
                let Some(ball_tf) = store.transform(ball_id).copied() else {
                    debug_assert!(false, "ball {ball_id} has no transform");
                    continue;
                };
                if let Some(body) = store.ball_body_mut(ball_id) {
                    body.anchor = None;
                    body.vel =
                        launch_velocity(ball_tf.pos.x, paddle_tf.pos.x, paddle_tf.half_w());
                    events.push(SimEvent::BallLaunched { ball: ball_id });
                    log::debug!("ball {ball_id} launched with vel {:?}", body.vel);
                }
            }
        }
    }
}
