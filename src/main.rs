//! Brickfall entry point
//!
//! Headless demo driver: seeds a simulation, plays it with a tiny
//! follow-the-ball controller, and logs what happens. Pass a seed as the
//! first argument; pass `--dump` to print the final state as JSON.

use brickfall::sim::{Button, ButtonState, SimEvent, Simulation};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut seed = 0xb1_5c07u64;
    let mut dump = false;
    for arg in &mut args {
        if arg == "--dump" {
            dump = true;
        } else if let Ok(s) = arg.parse() {
            seed = s;
        }
    }

    log::info!("brickfall starting with seed {seed}");
    let mut sim = Simulation::new(seed);

    let frame_dt = 1.0 / 60.0;
    let mut now = 0.0;
    let mut input = ButtonState::default();
    let mut lost = false;

    for frame in 0..(60 * 60) {
        // Launch once the session has settled, then chase the ball
        input.set(Button::Shoot, frame == 30);

        let paddle = sim.store.paddle_ids()[0];
        let ball = sim.store.ball_ids()[0];
        let paddle_x = sim.store.transform(paddle).map(|t| t.pos.x).unwrap_or(0.0);
        let ball_x = sim.store.transform(ball).map(|t| t.pos.x).unwrap_or(0.0);
        input.set(Button::Left, ball_x < paddle_x - 5.0);
        input.set(Button::Right, ball_x > paddle_x + 5.0);

        sim.frame(now, &input);
        now += frame_dt;

        for event in sim.drain_events() {
            match event {
                SimEvent::BallLaunched { ball } => log::info!("ball {ball} launched"),
                SimEvent::BrickDestroyed { brick } => {
                    log::info!("brick {brick} destroyed, {} left", sim.bricks_left());
                }
                SimEvent::BrickHit { brick, hits_left } => {
                    log::debug!("brick {brick} hit, {hits_left} hits left");
                }
                SimEvent::BallLost { ball } => {
                    log::warn!("ball {ball} lost below the paddle");
                    lost = true;
                }
            }
        }

        if lost || sim.bricks_left() == 0 {
            break;
        }
    }

    log::info!(
        "run over after {:.1}s: {} bricks left{}",
        now,
        sim.bricks_left(),
        if lost { " (ball lost)" } else { "" }
    );

    if dump {
        match serde_json::to_string_pretty(&sim) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("snapshot failed: {err}"),
        }
    }
}
