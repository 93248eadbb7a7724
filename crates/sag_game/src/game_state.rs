//! The single mutable game world: one character, a score, and a list of
//! power-ups waiting to be picked up.

use glam::IVec2;
use sag_core::animation::AnimationPlayer;

use crate::collision::{Aabb, Bounds};
use crate::config::GameConfig;
use crate::controller::Direction;

#[derive(Debug, Clone)]
pub struct GameState {
    /// Top-left corner of the character box.
    pub position: IVec2,
    pub direction: Direction,
    pub animation: AnimationPlayer,
    pub score: u32,
    /// Top-left corners of the remaining power-ups, in spawn order.
    pub power_ups: Vec<IVec2>,
    pub config: GameConfig,
}

/// What happened during one [`GameState::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub collected: Vec<IVec2>,
    pub frame_changed: bool,
}

impl GameState {
    /// Fresh world at the start position with randomly scattered power-ups.
    pub fn new(config: GameConfig, rng: &mut fastrand::Rng) -> Self {
        let max = config.max_position();
        let power_ups = (0..config.power_up_count)
            .map(|_| IVec2::new(rng.i32(0..max.x), rng.i32(0..max.y)))
            .collect();
        Self::with_power_ups(config, power_ups)
    }

    pub fn with_power_ups(config: GameConfig, power_ups: Vec<IVec2>) -> Self {
        Self {
            position: config.start_position,
            direction: Direction::None,
            animation: AnimationPlayer::default(),
            score: 0,
            power_ups,
            config,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(IVec2::ZERO, self.config.max_position())
    }

    pub fn character_box(&self) -> Aabb {
        Aabb::new(self.position, self.config.sprite_extent())
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        log::debug!(
            "Direction {} -> {}",
            self.direction.label(),
            direction.label()
        );
        self.direction = direction;
        self.animation.set_kind(direction.animation());
    }

    /// Advance the world by one tick: move, clamp, animate, collect.
    pub fn step(&mut self) -> TickReport {
        let moved = self.position + self.direction.vector() * self.config.speed;
        self.position = self.bounds().clamp(moved);

        let frame_changed = self.animation.tick();

        let character = self.character_box();
        let extent = self.config.sprite_extent();
        let mut collected = Vec::new();
        self.power_ups.retain(|&point| {
            if character.intersects(&Aabb::new(point, extent)) {
                collected.push(point);
                false
            } else {
                true
            }
        });

        self.score = self.score.saturating_add(collected.len() as u32);

        TickReport {
            collected,
            frame_changed,
        }
    }
}
