use glam::IVec2;

/// Gameplay tunables. There is no external configuration surface; these are
/// the values the game ships with.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// Edge length of every tile, character and power-up, in pixels.
    pub sprite_size: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
    /// Pixels moved per tick along the active axis.
    pub speed: i32,
    pub start_position: IVec2,
    pub power_up_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sprite_size: 64,
            canvas_width: 512,
            canvas_height: 512,
            speed: 4,
            start_position: IVec2::new(100, 100),
            power_up_count: 4,
        }
    }
}

impl GameConfig {
    /// Largest legal top-left corner for a sprite-sized box.
    pub fn max_position(&self) -> IVec2 {
        IVec2::new(
            self.canvas_width - self.sprite_size,
            self.canvas_height - self.sprite_size,
        )
    }

    pub fn sprite_extent(&self) -> IVec2 {
        IVec2::splat(self.sprite_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_leave_room_for_one_sprite() {
        let config = GameConfig::default();
        assert_eq!(config.max_position(), IVec2::new(448, 448));
    }
}
