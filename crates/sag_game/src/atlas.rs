//! Sprite sheet loading and grid slicing.
//!
//! The game ships a single PNG laid out as an 8×8 grid of 64 px tiles.
//! Animation strips come from [`AnimationKind::strip`]; the background and
//! power-up tiles sit at fixed cells. Slicing is pure UV math over the one
//! uploaded texture, so every sprite in a frame shares a single bind group.

use image::RgbaImage;
use sag_core::animation::AnimationKind;
use std::path::Path;

pub const SPRITE_SHEET_PATH: &str = "assets/SpriteSheet.png";
pub const TILE_SIZE_PX: u32 = 64;
pub const GRID_COLUMNS: u32 = 8;
pub const GRID_ROWS: u32 = 8;

/// (column, row) of the tile repeated over the whole canvas.
pub const BACKGROUND_CELL: (u32, u32) = (7, 0);
/// (column, row) of the collectible.
pub const POWER_UP_CELL: (u32, u32) = (0, 6);

/// UV lookup over a grid-aligned sheet of known pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAtlas {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
}

/// Decoded sheet plus its UV lookup, ready for upload.
pub struct SpriteSheet {
    pub image: RgbaImage,
    pub atlas: SpriteAtlas,
}

impl SpriteAtlas {
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, String> {
        validate_sheet_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            tile_size: TILE_SIZE_PX,
        })
    }

    /// `[u0, v0, u1, v1]` of the cell at `(column, row)`.
    pub fn cell_uv(&self, column: u32, row: u32) -> [f32; 4] {
        let x0 = (column * self.tile_size) as f32;
        let y0 = (row * self.tile_size) as f32;
        let x1 = x0 + self.tile_size as f32;
        let y1 = y0 + self.tile_size as f32;
        [
            x0 / self.width as f32,
            y0 / self.height as f32,
            x1 / self.width as f32,
            y1 / self.height as f32,
        ]
    }

    /// UV rect for one animation frame, with u0/u1 already swapped when the
    /// strip is drawn mirrored. Out-of-range frames wrap into the strip.
    pub fn frame_uv(&self, kind: AnimationKind, frame: usize) -> [f32; 4] {
        let strip = kind.strip();
        let column = (frame % strip.frame_count) as u32;
        let [u0, v0, u1, v1] = self.cell_uv(column, strip.row);
        if strip.mirrored {
            [u1, v0, u0, v1]
        } else {
            [u0, v0, u1, v1]
        }
    }

    pub fn background_uv(&self) -> [f32; 4] {
        self.cell_uv(BACKGROUND_CELL.0, BACKGROUND_CELL.1)
    }

    pub fn power_up_uv(&self) -> [f32; 4] {
        self.cell_uv(POWER_UP_CELL.0, POWER_UP_CELL.1)
    }
}

pub fn load_sprite_sheet(path: &Path) -> Result<SpriteSheet, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read sprite sheet {}: {e}", path.display()))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| format!("Failed to decode sprite sheet {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    let atlas = SpriteAtlas::from_dimensions(width, height)
        .map_err(|e| format!("{e} ({})", path.display()))?;

    log::info!(
        "Loaded sprite sheet {} ({}x{}, {} px tiles)",
        path.display(),
        width,
        height,
        TILE_SIZE_PX
    );
    Ok(SpriteSheet { image, atlas })
}

fn validate_sheet_dimensions(width: u32, height: u32) -> Result<(), String> {
    let min_width = GRID_COLUMNS * TILE_SIZE_PX;
    let min_height = GRID_ROWS * TILE_SIZE_PX;
    if width < min_width || height < min_height {
        return Err(format!(
            "Sprite sheet validation failed: {width}x{height} is smaller than the \
             {min_width}x{min_height} tile grid"
        ));
    }
    Ok(())
}
