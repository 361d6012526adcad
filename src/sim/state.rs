//! Component records and world population
//!
//! Components are plain data attached to entities by the [`EntityStore`].
//! All state is serde-derived so a driver can snapshot a run.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::store::EntityStore;
use crate::consts::*;

/// Opaque entity identifier. Allocated monotonically, never reused.
pub type EntityId = u32;

/// Center position and full extents of an axis-aligned rectangle.
///
/// Required for every paddle, ball and brick entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Center position
    pub pos: Vec2,
    /// Full width/height
    pub size: Vec2,
}

impl Transform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn half_w(&self) -> f32 {
        self.size.x / 2.0
    }

    #[inline]
    pub fn half_h(&self) -> f32 {
        self.size.y / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.half_w()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.half_w()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.half_h()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_h()
    }

    /// Full AABB overlap test (all four edges)
    #[inline]
    pub fn overlaps(&self, other: &Transform) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.top() > other.bottom()
            && self.bottom() < other.top()
    }
}

/// Horizontal-only paddle motion state. `vx` is held in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleBody {
    pub speed: f32,
    pub vx: f32,
}

/// Ball motion state.
///
/// While `anchor` is set the ball rides the referenced paddle and `vel` is
/// ignored. Once free, `vel` is unit-length and scaled by `speed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallBody {
    /// Accumulated unsimulated time for the fixed sub-step loop
    pub dt_acc: f32,
    pub speed: f32,
    pub vel: Vec2,
    /// Paddle the ball is riding, if any. Cleared on launch, never re-set.
    pub anchor: Option<EntityId>,
}

/// Destructible brick state. The entity dies when `hits` reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickBody {
    pub hits: u8,
}

/// Render descriptor for the paddle rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleSprite {
    pub color: super::render::Color,
}

/// Render descriptor for the ball ellipse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallSprite {
    pub color: super::render::Color,
}

/// Render descriptor for a brick. Color is derived from remaining hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrickSprite;

/// Events produced by one update pass, drained by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A ball left its paddle anchor
    BallLaunched { ball: EntityId },
    /// A brick absorbed a hit and survived
    BrickHit { brick: EntityId, hits_left: u8 },
    /// A brick was depleted and removed from every table
    BrickDestroyed { brick: EntityId },
    /// A ball crossed the bottom bound and is off-screen for good
    BallLost { ball: EntityId },
}

/// Populate the store with the session entities: one paddle, one ball
/// anchored to it, and a rectangular brick grid with random hit points.
///
/// This is the only place randomness enters the simulation; everything after
/// population is fully determined by the input and dt sequence.
pub fn spawn_world(store: &mut EntityStore, seed: u64) {
    let mut rng = Pcg32::seed_from_u64(seed);

    let paddle = store.spawn_id();
    store.insert_transform(
        paddle,
        Transform::new(0.0, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT),
    );
    store.insert_paddle_body(
        paddle,
        PaddleBody {
            speed: PADDLE_SPEED,
            vx: 0.0,
        },
    );
    store.insert_paddle_sprite(
        paddle,
        PaddleSprite {
            color: super::render::PADDLE_COLOR,
        },
    );

    let ball = store.spawn_id();
    let offset = (rng.random::<f32>() - 0.5) * BALL_START_SPREAD;
    // Ball rests on the paddle's top edge
    let ball_y = PADDLE_Y + PADDLE_HEIGHT / 2.0 + BALL_SIZE / 2.0;
    store.insert_transform(ball, Transform::new(offset, ball_y, BALL_SIZE, BALL_SIZE));
    store.insert_ball_body(
        ball,
        BallBody {
            dt_acc: 0.0,
            speed: BALL_SPEED,
            vel: Vec2::ZERO,
            anchor: Some(paddle),
        },
    );
    store.insert_ball_sprite(
        ball,
        BallSprite {
            color: super::render::BALL_COLOR,
        },
    );

    for i in 0..(BRICK_COLS * BRICK_ROWS) {
        let col = i % BRICK_COLS;
        let row = i / BRICK_COLS;
        let x = (col as f32 - (BRICK_COLS - 1) as f32 / 2.0) * BRICK_COL_PITCH;
        let y = row as f32 * BRICK_ROW_PITCH;
        let hits = rng.random_range(1..=BRICK_MAX_HITS);

        let brick = store.spawn_id();
        store.insert_transform(brick, Transform::new(x, y, BRICK_WIDTH, BRICK_HEIGHT));
        store.insert_brick_body(brick, BrickBody { hits });
        store.insert_brick_sprite(brick, BrickSprite);
    }

    log::info!(
        "world populated: seed={seed}, {} bricks",
        BRICK_COLS * BRICK_ROWS
    );
}
