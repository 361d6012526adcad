//! Component tables and entity lifecycle
//!
//! The store exclusively owns every component table. Tables are BTreeMaps so
//! iteration is stable by entity ID, which keeps runs deterministic without
//! any extra sorting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::{
    BallBody, BallSprite, BrickBody, BrickSprite, EntityId, PaddleBody, PaddleSprite, Transform,
};

/// Central container for all entity data.
///
/// Systems query and mutate components through typed accessors. Destruction
/// goes through [`EntityStore::remove_entity`], which deletes the id from
/// every table in one step so no table can retain a stale entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    transforms: BTreeMap<EntityId, Transform>,
    paddle_bodies: BTreeMap<EntityId, PaddleBody>,
    ball_bodies: BTreeMap<EntityId, BallBody>,
    brick_bodies: BTreeMap<EntityId, BrickBody>,
    paddle_sprites: BTreeMap<EntityId, PaddleSprite>,
    ball_sprites: BTreeMap<EntityId, BallSprite>,
    brick_sprites: BTreeMap<EntityId, BrickSprite>,
    next_id: EntityId,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity id. Ids are never reused.
    pub fn spawn_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Delete `id` from every component table, whether or not the tables
    /// contain it. Idempotent.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.transforms.remove(&id);
        self.paddle_bodies.remove(&id);
        self.ball_bodies.remove(&id);
        self.brick_bodies.remove(&id);
        self.paddle_sprites.remove(&id);
        self.ball_sprites.remove(&id);
        self.brick_sprites.remove(&id);
    }

    // --- Transform ---

    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.transforms.get(&id)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.transforms.get_mut(&id)
    }

    pub fn insert_transform(&mut self, id: EntityId, tf: Transform) {
        self.transforms.insert(id, tf);
    }

    // --- Paddle ---

    pub fn paddle_body(&self, id: EntityId) -> Option<&PaddleBody> {
        self.paddle_bodies.get(&id)
    }

    pub fn paddle_body_mut(&mut self, id: EntityId) -> Option<&mut PaddleBody> {
        self.paddle_bodies.get_mut(&id)
    }

    pub fn insert_paddle_body(&mut self, id: EntityId, body: PaddleBody) {
        self.paddle_bodies.insert(id, body);
    }

    pub fn insert_paddle_sprite(&mut self, id: EntityId, sprite: PaddleSprite) {
        self.paddle_sprites.insert(id, sprite);
    }

    pub fn paddle_sprites(&self) -> impl Iterator<Item = (EntityId, &PaddleSprite)> {
        self.paddle_sprites.iter().map(|(id, s)| (*id, s))
    }

    // --- Ball ---

    pub fn ball_body(&self, id: EntityId) -> Option<&BallBody> {
        self.ball_bodies.get(&id)
    }

    pub fn ball_body_mut(&mut self, id: EntityId) -> Option<&mut BallBody> {
        self.ball_bodies.get_mut(&id)
    }

    pub fn insert_ball_body(&mut self, id: EntityId, body: BallBody) {
        self.ball_bodies.insert(id, body);
    }

    pub fn insert_ball_sprite(&mut self, id: EntityId, sprite: BallSprite) {
        self.ball_sprites.insert(id, sprite);
    }

    pub fn ball_sprites(&self) -> impl Iterator<Item = (EntityId, &BallSprite)> {
        self.ball_sprites.iter().map(|(id, s)| (*id, s))
    }

    // --- Brick ---

    pub fn brick_body(&self, id: EntityId) -> Option<&BrickBody> {
        self.brick_bodies.get(&id)
    }

    pub fn brick_body_mut(&mut self, id: EntityId) -> Option<&mut BrickBody> {
        self.brick_bodies.get_mut(&id)
    }

    pub fn insert_brick_body(&mut self, id: EntityId, body: BrickBody) {
        self.brick_bodies.insert(id, body);
    }

    pub fn insert_brick_sprite(&mut self, id: EntityId, sprite: BrickSprite) {
        self.brick_sprites.insert(id, sprite);
    }

    pub fn brick_sprites(&self) -> impl Iterator<Item = (EntityId, &BrickSprite)> {
        self.brick_sprites.iter().map(|(id, s)| (*id, s))
    }

    // --- Id snapshots ---
    //
    // Systems iterate these instead of the live tables, so removing an
    // entity mid-pass cannot skip or duplicate later checks.

    pub fn paddle_ids(&self) -> Vec<EntityId> {
        self.paddle_bodies.keys().copied().collect()
    }

    pub fn ball_ids(&self) -> Vec<EntityId> {
        self.ball_bodies.keys().copied().collect()
    }

    pub fn brick_ids(&self) -> Vec<EntityId> {
        self.brick_bodies.keys().copied().collect()
    }

    /// True if no table holds any component for `id`
    pub fn is_empty_of(&self, id: EntityId) -> bool {
        !self.transforms.contains_key(&id)
            && !self.paddle_bodies.contains_key(&id)
            && !self.ball_bodies.contains_key(&id)
            && !self.brick_bodies.contains_key(&id)
            && !self.paddle_sprites.contains_key(&id)
            && !self.ball_sprites.contains_key(&id)
            && !self.brick_sprites.contains_key(&id)
    }

    /// Development-time check: every body id must have a matching Transform.
    /// An orphaned body is an integration bug, not a runtime condition.
    pub fn assert_consistent(&self) {
        for id in self
            .paddle_bodies
            .keys()
            .chain(self.ball_bodies.keys())
            .chain(self.brick_bodies.keys())
        {
            debug_assert!(
                self.transforms.contains_key(id),
                "entity {id} has a body but no transform"
            );
        }
    }
}
