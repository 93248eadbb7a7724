//! Versioned JSON snapshot of the game, written on close and read on launch.
//!
//! A save that fails to read, parse or validate is reported to the caller as
//! an error; startup logs it and keeps the freshly generated world.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::collision::Bounds;
use crate::config::GameConfig;
use crate::game_state::GameState;

pub const SAVE_PATH: &str = "game_state.json";
pub const SAVE_VERSION: &str = "0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: String,
    pub character: SavedRect,
    pub score: u32,
    pub power_ups: Vec<SavedPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPoint {
    pub x: i32,
    pub y: i32,
}

impl SaveFile {
    pub fn from_state(state: &GameState) -> Self {
        let size = state.config.sprite_size;
        Self {
            version: SAVE_VERSION.to_string(),
            character: SavedRect {
                x: state.position.x,
                y: state.position.y,
                w: size,
                h: size,
            },
            score: state.score,
            power_ups: state
                .power_ups
                .iter()
                .map(|p| SavedPoint { x: p.x, y: p.y })
                .collect(),
        }
    }

    /// Rebuild a world from the snapshot. Movement is not persisted, so the
    /// character comes back standing still on the first idle frame.
    pub fn into_state(self, config: GameConfig) -> GameState {
        let power_ups = self
            .power_ups
            .iter()
            .map(|p| IVec2::new(p.x, p.y))
            .collect();
        let mut state = GameState::with_power_ups(config, power_ups);
        state.position = IVec2::new(self.character.x, self.character.y);
        state.score = self.score;
        state
    }
}

/// Read and validate a save. A missing file is not an error and yields `None`.
pub fn load_save_from_path(path: &Path, config: &GameConfig) -> Result<Option<SaveFile>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read save file {}: {e}", path.display()))?;
    let save: SaveFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse save file {}: {e}", path.display()))?;
    validate_save(&save, config)?;
    Ok(Some(save))
}

/// Serialize to a sibling `.tmp` file, then rename it over `path`.
pub fn write_save_to_path(path: &Path, save: &SaveFile) -> Result<(), String> {
    let json = serde_json::to_string_pretty(save)
        .map_err(|e| format!("Failed to serialize save file: {e}"))?;
    let tmp = temporary_output_path(path);
    fs::write(&tmp, json).map_err(|e| format!("Failed to write '{}': {e}", tmp.display()))?;
    fs::rename(&tmp, path).map_err(|e| {
        format!(
            "Failed to move temporary save '{}' -> '{}': {e}",
            tmp.display(),
            path.display()
        )
    })
}

fn temporary_output_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("save");
    path.with_file_name(format!("{file_name}.tmp"))
}

fn validate_save(save: &SaveFile, config: &GameConfig) -> Result<(), String> {
    if save.version != SAVE_VERSION {
        return Err(format!(
            "Save validation failed: unsupported version '{}'",
            save.version
        ));
    }
    let character = save.character;
    if character.w != config.sprite_size || character.h != config.sprite_size {
        return Err(format!(
            "Save validation failed: character box is {}x{}, expected {}x{}",
            character.w, character.h, config.sprite_size, config.sprite_size
        ));
    }

    let bounds = Bounds::new(IVec2::ZERO, config.max_position());
    if !bounds.contains(IVec2::new(character.x, character.y)) {
        return Err(format!(
            "Save validation failed: character at ({}, {}) is out of bounds",
            character.x, character.y
        ));
    }
    for (index, point) in save.power_ups.iter().enumerate() {
        if !bounds.contains(IVec2::new(point.x, point.y)) {
            return Err(format!(
                "Save validation failed: power_ups[{index}] at ({}, {}) is out of bounds",
                point.x, point.y
            ));
        }
    }
    Ok(())
}
