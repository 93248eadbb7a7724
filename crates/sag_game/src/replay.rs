use crate::controller::Direction;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scripted direction changes for driving [`crate::game_state::GameState`]
/// through a fixed number of ticks.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ReplayFrame {
    #[serde(default)]
    pub direction: ReplayDirection,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplayDirection {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl From<ReplayDirection> for Direction {
    fn from(value: ReplayDirection) -> Self {
        match value {
            ReplayDirection::None => Direction::None,
            ReplayDirection::Left => Direction::Left,
            ReplayDirection::Right => Direction::Right,
            ReplayDirection::Up => Direction::Up,
            ReplayDirection::Down => Direction::Down,
        }
    }
}

impl ReplaySequence {
    /// One direction per tick.
    pub fn expanded_directions(&self) -> Vec<Direction> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(frame.direction.into());
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game_state::GameState;
    use glam::IVec2;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "sag_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn run(directions: &[Direction], power_ups: Vec<IVec2>) -> GameState {
        let mut state = GameState::with_power_ups(GameConfig::default(), power_ups);
        for &direction in directions {
            state.set_direction(direction);
            state.step();
        }
        state
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "direction": "right", "repeat": 3 },
                { "repeat": 2 },
                { "direction": "up" }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_directions();
        assert_eq!(expanded.len(), 6);
        assert_eq!(expanded[0], Direction::Right);
        assert_eq!(expanded[3], Direction::None);
        assert_eq!(expanded[5], Direction::Up);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "direction": "right", "repeat": 90 },
                { "direction": "down", "repeat": 40 },
                { "repeat": 13 },
                { "direction": "left", "repeat": 200 },
                { "direction": "up", "repeat": 7 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let directions = replay.expanded_directions();
        let power_ups = vec![IVec2::new(300, 100), IVec2::new(448, 250), IVec2::new(5, 5)];

        let run_a = run(&directions, power_ups.clone());
        let run_b = run(&directions, power_ups);

        assert_eq!(run_a.position, run_b.position);
        assert_eq!(run_a.score, run_b.score);
        assert_eq!(run_a.power_ups, run_b.power_ups);
        assert_eq!(run_a.animation, run_b.animation);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn long_replay_keeps_invariants() {
        let frames = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::None,
        ];
        let power_ups = vec![
            IVec2::new(200, 100),
            IVec2::new(440, 440),
            IVec2::new(0, 300),
            IVec2::new(250, 250),
        ];
        let mut state = GameState::with_power_ups(GameConfig::default(), power_ups);
        let mut last_score = 0;
        for (i, &direction) in frames.iter().cycle().take(25).enumerate() {
            state.set_direction(direction);
            for _ in 0..(40 + i * 3) {
                state.step();
                assert!(state.bounds().contains(state.position));
                assert!(state.animation.frame_index < state.animation.kind.frame_count());
                assert!(state.score >= last_score);
                assert_eq!(state.score as usize + state.power_ups.len(), 4);
                last_score = state.score;
            }
        }
    }
}
