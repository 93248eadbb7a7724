use sag_render::{SpriteVertex, QUAD_INDICES};

use crate::atlas::SpriteAtlas;
use crate::config::GameConfig;
use crate::game_loop::FrameSnapshot;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// CPU-side geometry for one frame. Everything samples the same sheet, so the
/// whole batch is drawn with a single indexed call.
#[derive(Debug, Default, Clone)]
pub struct SpriteBatch {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
}

impl SpriteBatch {
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
        }
    }

    pub fn push_quad(&mut self, rect: [f32; 4], uv: [f32; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend_from_slice(&SpriteVertex::quad(rect, uv, WHITE));
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Back to front: background tiles, power-ups, then the character.
pub fn build_frame_mesh(
    snapshot: &FrameSnapshot,
    atlas: &SpriteAtlas,
    config: &GameConfig,
) -> SpriteBatch {
    let size = config.sprite_size;
    let columns = config.canvas_width / size;
    let rows = config.canvas_height / size;
    let tile_count = (columns * rows).max(0) as usize;
    let mut batch = SpriteBatch::with_quad_capacity(tile_count + snapshot.power_ups.len() + 1);

    let side = size as f32;
    let background = atlas.background_uv();
    for row in 0..rows {
        for column in 0..columns {
            let rect = [(column * size) as f32, (row * size) as f32, side, side];
            batch.push_quad(rect, background);
        }
    }

    let power_up = atlas.power_up_uv();
    for point in &snapshot.power_ups {
        batch.push_quad([point.x as f32, point.y as f32, side, side], power_up);
    }

    let character = atlas.frame_uv(snapshot.animation, snapshot.animation_frame);
    batch.push_quad(
        [
            snapshot.position.x as f32,
            snapshot.position.y as f32,
            side,
            side,
        ],
        character,
    );

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Direction;
    use glam::IVec2;
    use sag_core::animation::AnimationKind;
    use sag_core::time::TickStats;

    fn snapshot(animation: AnimationKind, power_ups: Vec<IVec2>) -> FrameSnapshot {
        FrameSnapshot {
            position: IVec2::new(100, 120),
            direction: Direction::None,
            animation,
            animation_frame: 2,
            score: 0,
            power_ups,
            tick: TickStats::default(),
        }
    }

    fn atlas() -> SpriteAtlas {
        SpriteAtlas::from_dimensions(512, 512).expect("valid sheet")
    }

    #[test]
    fn full_canvas_is_tiled_then_power_ups_then_character() {
        let snap = snapshot(
            AnimationKind::Idle,
            vec![IVec2::new(10, 20), IVec2::new(300, 40)],
        );
        let batch = build_frame_mesh(&snap, &atlas(), &GameConfig::default());
        assert_eq!(batch.quad_count(), 64 + 2 + 1);
        assert_eq!(batch.indices.len(), batch.quad_count() * 6);

        let last_tile = &batch.vertices[63 * 4..64 * 4];
        assert_eq!(last_tile[2].position, [512.0, 512.0]);

        let first_power_up = &batch.vertices[64 * 4];
        assert_eq!(first_power_up.position, [10.0, 20.0]);

        let character = &batch.vertices[66 * 4];
        assert_eq!(character.position, [100.0, 120.0]);
    }

    #[test]
    fn indices_point_at_their_own_quad() {
        let batch = build_frame_mesh(
            &snapshot(AnimationKind::RunUp, Vec::new()),
            &atlas(),
            &GameConfig::default(),
        );
        let last = &batch.indices[batch.indices.len() - 6..];
        let base = (batch.vertices.len() - 4) as u32;
        assert_eq!(last, &[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    #[test]
    fn run_right_character_is_flipped() {
        let atlas = atlas();
        let batch = build_frame_mesh(
            &snapshot(AnimationKind::RunRight, Vec::new()),
            &atlas,
            &GameConfig::default(),
        );
        let top_left = batch.vertices[batch.vertices.len() - 4];
        let top_right = batch.vertices[batch.vertices.len() - 3];
        assert!(top_left.tex_coords[0] > top_right.tex_coords[0]);

        let left = atlas.frame_uv(AnimationKind::RunLeft, 2);
        assert_eq!(top_left.tex_coords, [left[2], left[1]]);
    }
}
