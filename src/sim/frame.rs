//! Simulation context and frame driving
//!
//! An external scheduler calls [`Simulation::frame`] once per animation
//! callback with a monotonically increasing timestamp; everything else is
//! synchronous and single-threaded. Systems implement [`Updatable`] and run
//! in a fixed order; render passes implement [`Renderable`] and only ever
//! see the store immutably.

use serde::{Deserialize, Serialize};

use super::ball::BallIntegrator;
use super::controller::PaddleController;
use super::input::InputState;
use super::paddle::PaddleIntegrator;
use super::render::{Canvas, SceneRenderer};
use super::state::{spawn_world, SimEvent};
use super::store::EntityStore;
use crate::consts::MAX_FRAME_DT;

/// A system that mutates the store once per frame
pub trait Updatable {
    fn update(
        &mut self,
        store: &mut EntityStore,
        input: &dyn InputState,
        dt: f32,
        events: &mut Vec<SimEvent>,
    );
}

/// A read-only scene pass. Must not (and cannot) mutate simulation state.
pub trait Renderable {
    fn draw(&self, store: &EntityStore, canvas: &mut dyn Canvas);
}

/// Owns the entity store and the update systems.
///
/// Update order is fixed: controller, paddle integrator, ball integrator.
/// Determinism: with the same seed and the same timestamp/input sequence,
/// two simulations produce identical trajectories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub store: EntityStore,
    controller: PaddleController,
    paddle: PaddleIntegrator,
    ball: BallIntegrator,
    renderer: SceneRenderer,
    /// Run seed, kept for reproducibility
    pub seed: u64,
    last_time: Option<f64>,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        let mut store = EntityStore::new();
        spawn_world(&mut store, seed);
        Self {
            store,
            controller: PaddleController,
            paddle: PaddleIntegrator,
            ball: BallIntegrator,
            renderer: SceneRenderer,
            seed,
            last_time: None,
            events: Vec::new(),
        }
    }

    /// Advance by one frame given the driver's timestamp in seconds.
    ///
    /// The first call has no previous timestamp and runs with dt = 0.
    /// Returns the dt that was applied.
    pub fn frame(&mut self, now_secs: f64, input: &dyn InputState) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((now_secs - last).max(0.0) as f32).min(MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now_secs);
        self.update(dt, input);
        dt
    }

    /// Run all update systems once, in fixed order.
    pub fn update(&mut self, dt: f32, input: &dyn InputState) {
        self.controller
            .update(&mut self.store, input, dt, &mut self.events);
        self.paddle
            .update(&mut self.store, input, dt, &mut self.events);
        self.ball
            .update(&mut self.store, input, dt, &mut self.events);

        #[cfg(debug_assertions)]
        self.store.assert_consistent();
    }

    /// Read-only render pass over the current store.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.renderer.draw(&self.store, canvas);
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remaining live bricks
    pub fn bricks_left(&self) -> usize {
        self.store.brick_ids().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::input::ButtonState;
    use crate::sim::render::{DrawOp, RecordingCanvas};
    use glam::Vec2;

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut sim = Simulation::new(5);
        let idle = ButtonState::default();

        // A huge first timestamp must not move anything
        let dt = sim.frame(1.0e6, &idle);
        assert_eq!(dt, 0.0);

        let ball = sim.store.ball_ids()[0];
        let before = sim.store.transform(ball).unwrap().pos;
        let dt = sim.frame(1.0e6 + 0.016, &idle);
        assert!((dt - 0.016).abs() < 1e-6);
        // Ball is still anchored and the paddle idle, so nothing moved
        assert_eq!(sim.store.transform(ball).unwrap().pos, before);
    }

    #[test]
    fn test_frame_dt_clamped_after_pause() {
        let mut sim = Simulation::new(5);
        let idle = ButtonState::default();
        sim.frame(0.0, &idle);
        // Tab resumed after a minute
        let dt = sim.frame(60.0, &idle);
        assert_eq!(dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_scenario_centered_shoot_launches_straight_up() {
        let mut sim = Simulation::new(5);
        let paddle = sim.store.paddle_ids()[0];
        let ball = sim.store.ball_ids()[0];
        sim.store.transform_mut(paddle).unwrap().pos.x = 0.0;
        sim.store.transform_mut(ball).unwrap().pos.x = 0.0;

        let shoot = ButtonState {
            shoot: true,
            ..Default::default()
        };
        sim.frame(0.0, &shoot);

        let body = sim.store.ball_body(ball).unwrap();
        assert_eq!(body.anchor, None);
        assert_eq!(body.vel, Vec2::new(0.0, 1.0));
        assert!(sim
            .drain_events()
            .contains(&SimEvent::BallLaunched { ball }));
    }

    #[test]
    fn test_anchored_ball_tracks_paddle_through_frames() {
        let mut sim = Simulation::new(5);
        let paddle = sim.store.paddle_ids()[0];
        let ball = sim.store.ball_ids()[0];
        let offset = sim.store.transform(ball).unwrap().pos.x
            - sim.store.transform(paddle).unwrap().pos.x;

        let right = ButtonState {
            right: true,
            ..Default::default()
        };
        let mut now = 0.0;
        sim.frame(now, &right);
        for _ in 0..30 {
            now += 1.0 / 60.0;
            sim.frame(now, &right);
        }

        let new_offset = sim.store.transform(ball).unwrap().pos.x
            - sim.store.transform(paddle).unwrap().pos.x;
        assert!((new_offset - offset).abs() < 1e-3);
        // And the integrator never gave the anchored ball a velocity
        assert_eq!(sim.store.ball_body(ball).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_run_determinism() {
        let script = |sim: &mut Simulation| {
            let mut now = 0.0;
            sim.frame(now, &ButtonState::default());
            let shoot = ButtonState {
                shoot: true,
                ..Default::default()
            };
            now += 0.016;
            sim.frame(now, &shoot);
            let right = ButtonState {
                right: true,
                ..Default::default()
            };
            for i in 0..600 {
                now += if i % 3 == 0 { 0.017 } else { 0.016 };
                sim.frame(now, &right);
            }
        };

        let mut a = Simulation::new(2024);
        let mut b = Simulation::new(2024);
        script(&mut a);
        script(&mut b);

        let ball = a.store.ball_ids()[0];
        assert_eq!(a.store.transform(ball), b.store.transform(ball));
        assert_eq!(a.store.ball_body(ball), b.store.ball_body(ball));
        assert_eq!(a.store.brick_ids(), b.store.brick_ids());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_scenario_full_depletion_clears_tables_and_render() {
        let mut sim = Simulation::new(99);
        assert_eq!(sim.bricks_left(), 48);
        let ball = sim.store.ball_ids()[0];
        sim.store.ball_body_mut(ball).unwrap().anchor = None;

        // Drive the ball onto each remaining brick until the grid is gone.
        // This registers exactly `hits` collisions per brick.
        let mut destroyed = 0;
        let mut guard = 0;
        while let Some(&brick) = sim.store.brick_ids().first() {
            let target = sim.store.transform(brick).unwrap().pos;
            {
                let tf = sim.store.transform_mut(ball).unwrap();
                tf.pos = Vec2::new(target.x, target.y - BRICK_HEIGHT);
            }
            sim.store.ball_body_mut(ball).unwrap().vel = Vec2::new(0.0, 1.0);
            sim.update(SUB_STEP * 1.5, &ButtonState::default());

            destroyed += sim
                .drain_events()
                .iter()
                .filter(|e| matches!(e, SimEvent::BrickDestroyed { .. }))
                .count();
            guard += 1;
            assert!(guard < 48 * 4, "brick grid failed to deplete");
        }

        assert_eq!(destroyed, 48);
        assert_eq!(sim.bricks_left(), 0);

        // Render pass references no destroyed entity: only the paddle rect
        // and the ball ellipse remain.
        let mut canvas = RecordingCanvas::default();
        sim.render(&mut canvas);
        assert_eq!(canvas.ops.len(), 2);
        assert!(matches!(canvas.ops[0], DrawOp::Rect { .. }));
        assert!(matches!(canvas.ops[1], DrawOp::Ellipse { .. }));
    }
}
