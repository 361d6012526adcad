//! Property tests for the simulation invariants

use brickfall::consts::*;
use brickfall::sim::{ButtonState, Simulation};
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = ButtonState> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, shoot)| ButtonState {
        left,
        right,
        shoot,
    })
}

proptest! {
    /// Paddle center x never leaves [-max, max], whatever the inputs.
    #[test]
    fn paddle_stays_in_bounds(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..120),
    ) {
        let mut sim = Simulation::new(seed);
        let paddle = sim.store.paddle_ids()[0];
        let max = CANVAS_WIDTH / 2.0 - PADDLE_WIDTH / 2.0;

        let mut now = 0.0;
        for input in &inputs {
            sim.frame(now, input);
            now += 1.0 / 60.0;
            let x = sim.store.transform(paddle).unwrap().pos.x;
            prop_assert!((-max..=max).contains(&x), "paddle at {x}, max {max}");
        }
    }

    /// Launch velocity is unit-length for any ball offset, including
    /// offsets past the paddle's half width.
    #[test]
    fn launch_is_normalized(seed in any::<u64>(), offset in -200.0f32..200.0) {
        let mut sim = Simulation::new(seed);
        let paddle = sim.store.paddle_ids()[0];
        let ball = sim.store.ball_ids()[0];
        sim.store.transform_mut(paddle).unwrap().pos.x = 0.0;
        sim.store.transform_mut(ball).unwrap().pos.x = offset;

        let shoot = ButtonState { shoot: true, ..Default::default() };
        sim.frame(0.0, &shoot);

        let body = sim.store.ball_body(ball).unwrap();
        prop_assert!(body.anchor.is_none());
        prop_assert!((body.vel.length_squared() - 1.0).abs() < 1e-5);
        prop_assert!(body.vel.y >= 0.0, "launch always points upward or flat");
        prop_assert!(body.vel.x.is_finite() && body.vel.y.is_finite());
    }

    /// Identical seeds and dt sequences produce identical trajectories.
    #[test]
    fn trajectories_are_deterministic(
        seed in any::<u64>(),
        dts in prop::collection::vec(0.0f32..0.05, 1..200),
    ) {
        let run = |dts: &[f32]| {
            let mut sim = Simulation::new(seed);
            let mut now = 0.0f64;
            sim.frame(now, &ButtonState::default());
            let shoot = ButtonState { shoot: true, ..Default::default() };
            now += 0.016;
            sim.frame(now, &shoot);
            for &dt in dts {
                now += dt as f64;
                sim.frame(now, &ButtonState::default());
            }
            let ball = sim.store.ball_ids()[0];
            (
                *sim.store.transform(ball).unwrap(),
                *sim.store.ball_body(ball).unwrap(),
                sim.store.brick_ids(),
            )
        };

        prop_assert_eq!(run(&dts), run(&dts));
    }

    /// A free ball's velocity stays unit-length through any number of
    /// wall, paddle and brick bounces (flips and relaunches both preserve it).
    #[test]
    fn free_ball_velocity_stays_normalized(
        seed in any::<u64>(),
        frames in 1usize..300,
    ) {
        let mut sim = Simulation::new(seed);
        let ball = sim.store.ball_ids()[0];

        let mut now = 0.0;
        sim.frame(now, &ButtonState::default());
        let shoot = ButtonState { shoot: true, ..Default::default() };
        now += 0.016;
        sim.frame(now, &shoot);

        for _ in 0..frames {
            now += 0.016;
            sim.frame(now, &ButtonState::default());
        }

        let vel = sim.store.ball_body(ball).unwrap().vel;
        prop_assert!((vel.length_squared() - 1.0).abs() < 1e-4, "vel {vel:?}");
    }
}
