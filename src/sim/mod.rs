//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed sub-step integration only
//! - Seeded RNG only, and only during world population
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod controller;
pub mod frame;
pub mod input;
pub mod paddle;
pub mod render;
pub mod state;
pub mod store;

pub use ball::BallIntegrator;
pub use controller::PaddleController;
pub use frame::{Renderable, Simulation, Updatable};
pub use input::{Button, ButtonState, InputState};
pub use paddle::PaddleIntegrator;
pub use render::{Canvas, Color, DrawOp, RecordingCanvas, SceneRenderer, BRICK_PALETTE};
pub use state::{
    BallBody, BallSprite, BrickBody, BrickSprite, EntityId, PaddleBody, PaddleSprite, SimEvent,
    Transform,
};
pub use store::EntityStore;
