//! Ball integration and collision resolution
//!
//! The hard part of the simulation. Free balls advance through a fixed
//! sub-step accumulator: the frame's dt is clamped and accumulated, then
//! drained in 1 ms increments so per-step displacement stays small and
//! collision tests cannot tunnel through a brick at high frame times.
//!
//! Each sub-step moves the ball optimistically, tests walls, the paddle and
//! every brick, and reverts the move if anything was struck. The revert does
//! not guarantee separation: a corner hit whose reflected velocity still
//! points into the obstacle can bounce in place for a few sub-steps.

use serde::{Deserialize, Serialize};

use super::controller::launch_velocity;
use super::frame::Updatable;
use super::input::InputState;
use super::state::SimEvent;
use super::store::EntityStore;
use crate::consts::*;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BallIntegrator;

impl Updatable for BallIntegrator {
    fn update(
        &mut self,
        store: &mut EntityStore,
        _input: &dyn InputState,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        // An unbounded dt (backgrounded tab resuming) must not run the
        // sub-step loop an unbounded number of times.
        let dt = dt.min(MAX_FRAME_DT);
        let bound_x = CANVAS_WIDTH / 2.0;
        let bound_y = CANVAS_HEIGHT / 2.0;

        for ball_id in store.ball_ids() {
            let Some(mut body) = store.ball_body(ball_id).copied() else {
                continue;
            };
            // Anchored balls are moved by the paddle integrator and keep an
            // empty accumulator so launch does not start with a backlog.
            if body.anchor.is_some() {
                continue;
            }
            let Some(mut tf) = store.transform(ball_id).copied() else {
                debug_assert!(false, "ball {ball_id} has no transform");
                continue;
            };

            body.dt_acc += dt;
            let h = SUB_STEP;
            let mut steps = 0u32;

            while body.dt_acc > h && steps < MAX_SUB_STEPS {
                body.dt_acc -= h;
                steps += 1;

                let delta = body.vel * (h * body.speed);
                let pre = tf.pos;
                tf.pos += delta;
                let mut collided = false;

                // Side walls reflect horizontally, the top wall vertically.
                if tf.left() < -bound_x || tf.right() > bound_x {
                    body.vel.x = -body.vel.x;
                    collided = true;
                }
                if tf.top() > bound_y {
                    body.vel.y = -body.vel.y;
                    collided = true;
                }

                // Paddle before bricks: the tie-break when both are near in
                // the same sub-step. The touch test is a tolerance band on
                // the ball-bottom/paddle-top seam; requiring downward motion
                // keeps the ball from re-triggering inside the band after
                // the bounce.
                for paddle_id in store.paddle_ids() {
                    let Some(ptf) = store.transform(paddle_id) else {
                        debug_assert!(false, "paddle {paddle_id} has no transform");
                        continue;
                    };
                    let x_overlap = tf.right() > ptf.left() && tf.left() < ptf.right();
                    let in_band = (tf.bottom() - ptf.top()).abs() <= PADDLE_TOUCH_BAND;
                    if x_overlap && in_band && body.vel.y < 0.0 {
                        body.vel = launch_velocity(tf.pos.x, ptf.pos.x, ptf.half_w());
                        collided = true;
                    }
                }

                // Bricks: the id snapshot makes removal mid-scan safe. Every
                // overlapping brick mutates velocity independently; with
                // several overlaps the last one (ascending id) wins.
                for brick_id in store.brick_ids() {
                    let Some(btf) = store.transform(brick_id).copied() else {
                        debug_assert!(false, "brick {brick_id} has no transform");
                        continue;
                    };
                    if !tf.overlaps(&btf) {
                        continue;
                    }

                    let Some(brick) = store.brick_body_mut(brick_id) else {
                        continue;
                    };
                    brick.hits = brick.hits.saturating_sub(1);
                    let hits_left = brick.hits;
                    if hits_left == 0 {
                        store.remove_entity(brick_id);
                        events.push(SimEvent::BrickDestroyed { brick: brick_id });
                        log::debug!("brick {brick_id} destroyed");
                    } else {
                        events.push(SimEvent::BrickHit {
                            brick: brick_id,
                            hits_left,
                        });
                    }

                    // The axis with the larger normalized center offset is
                    // the side that was struck.
                    let nx = (tf.pos.x - btf.pos.x) / btf.half_w();
                    let ny = (tf.pos.y - btf.pos.y) / btf.half_h();
                    if nx.abs() > ny.abs() {
                        body.vel.x = -body.vel.x;
                    } else {
                        body.vel.y = -body.vel.y;
                    }
                    collided = true;
                }

                if collided {
                    tf.pos = pre;
                }

                // The bottom bound has no reflection: the ball continues
                // off-screen. The loss is reported once, on the sub-step
                // that ends below the bound (a reverted corner hit does
                // not count as a crossing).
                let was_above_floor = pre.y - tf.half_h() >= -bound_y;
                if tf.bottom() < -bound_y && was_above_floor {
                    events.push(SimEvent::BallLost { ball: ball_id });
                    log::debug!("ball {ball_id} crossed the bottom bound");
                }
            }

            if let Some(b) = store.ball_body_mut(ball_id) {
                *b = body;
            }
            if let Some(t) = store.transform_mut(ball_id) {
                *t = tf;
            }
        }
    }
}
