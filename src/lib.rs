//! Brickfall - a breakout simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity store, integrators, collisions)
//!
//! Rendering, keyboard capture and frame scheduling are external
//! collaborators: a driver supplies timestamps and an input state once per
//! frame, then reads the store back through a read-only render pass.

pub mod sim;

pub use sim::{SimEvent, Simulation};

/// Game configuration constants
pub mod consts {
    /// Fixed physics sub-step in seconds (1 ms)
    pub const SUB_STEP: f32 = 1e-3;
    /// Frame dt is clamped to this before accumulation (backgrounded-tab guard)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum sub-steps per ball per frame to prevent spiral of death
    pub const MAX_SUB_STEPS: u32 = 128;

    /// Canvas dimensions, origin at center, +y up
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = -230.0;
    pub const PADDLE_SPEED: f32 = 300.0;
    /// Tolerance band for the ball-bottom vs. paddle-top touch test.
    /// Wider than one sub-step of ball travel (SUB_STEP * BALL_SPEED = 0.3).
    pub const PADDLE_TOUCH_BAND: f32 = 1.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED: f32 = 300.0;
    /// The anchored ball starts at a random x offset within +/- half this span
    pub const BALL_START_SPREAD: f32 = 80.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 15.0;
    pub const BRICK_COLS: u32 = 6;
    pub const BRICK_ROWS: u32 = 8;
    pub const BRICK_COL_PITCH: f32 = 120.0;
    pub const BRICK_ROW_PITCH: f32 = 30.0;
    /// Brick hit points are rolled in 1..=BRICK_MAX_HITS
    pub const BRICK_MAX_HITS: u8 = 3;
}
