//! Strip-based sprite animation types and deterministic tick logic.
//!
//! Every animation is a horizontal strip of equally sized frames in the sprite
//! sheet. Playback is counted in whole simulation ticks rather than elapsed
//! time, so two runs fed the same inputs land on the same frame.
//!
//! `RunRight` has no strip of its own: it reuses the `RunLeft` strip and asks
//! the renderer to mirror it horizontally.

/// Number of ticks a frame stays on screen before the timer fires is
/// `FRAME_DELAY_TICKS + 1`: the timer must *exceed* this value.
pub const FRAME_DELAY_TICKS: u32 = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    #[default]
    Idle,
    RunLeft,
    RunUp,
    RunRight,
    RunDown,
}

/// Where an animation's frames live in the sheet and how to draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripRef {
    /// Sheet row holding the frames.
    pub row: u32,
    /// Playable frames in the strip (starting at column 0).
    pub frame_count: usize,
    /// Draw the frames flipped horizontally.
    pub mirrored: bool,
}

impl AnimationKind {
    pub const ALL: &'static [AnimationKind] = &[
        AnimationKind::Idle,
        AnimationKind::RunLeft,
        AnimationKind::RunUp,
        AnimationKind::RunRight,
        AnimationKind::RunDown,
    ];

    pub fn strip(self) -> StripRef {
        match self {
            Self::Idle => StripRef {
                row: 0,
                frame_count: 7,
                mirrored: false,
            },
            Self::RunLeft => StripRef {
                row: 1,
                frame_count: 8,
                mirrored: false,
            },
            Self::RunUp => StripRef {
                row: 2,
                frame_count: 8,
                mirrored: false,
            },
            Self::RunRight => StripRef {
                row: 1,
                frame_count: 8,
                mirrored: true,
            },
            Self::RunDown => StripRef {
                row: 4,
                frame_count: 8,
                mirrored: false,
            },
        }
    }

    pub fn frame_count(self) -> usize {
        self.strip().frame_count
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RunLeft => "run_left",
            Self::RunUp => "run_up",
            Self::RunRight => "run_right",
            Self::RunDown => "run_down",
        }
    }
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Runtime playback state for the single animated character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPlayer {
    pub kind: AnimationKind,
    pub frame_index: usize,
    pub frame_timer: u32,
}

impl AnimationPlayer {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            frame_index: 0,
            frame_timer: 0,
        }
    }

    /// Switch to another animation without restarting playback. The frame
    /// index is wrapped into the new strip so it always stays addressable.
    pub fn set_kind(&mut self, kind: AnimationKind) {
        if self.kind == kind {
            return;
        }
        self.kind = kind;
        self.frame_index %= kind.frame_count();
    }

    /// Advance by one simulation tick. Returns true when the visible frame changed.
    pub fn tick(&mut self) -> bool {
        self.frame_timer += 1;
        if self.frame_timer <= FRAME_DELAY_TICKS {
            return false;
        }
        self.frame_index = (self.frame_index + 1) % self.kind.frame_count();
        self.frame_timer = 0;
        true
    }
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new(AnimationKind::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_advances_on_every_sixth_tick() {
        let mut player = AnimationPlayer::new(AnimationKind::RunDown);
        for _ in 0..5 {
            assert!(!player.tick());
            assert_eq!(player.frame_index, 0);
        }
        assert!(player.tick());
        assert_eq!(player.frame_index, 1);
        assert_eq!(player.frame_timer, 0);
    }

    #[test]
    fn idle_wraps_after_seventh_frame() {
        let mut player = AnimationPlayer {
            kind: AnimationKind::Idle,
            frame_index: 6,
            frame_timer: 5,
        };
        player.tick();
        assert_eq!(player.frame_index, 0);
        assert_eq!(player.frame_timer, 0);
    }

    #[test]
    fn running_strips_use_all_eight_frames() {
        let mut player = AnimationPlayer::new(AnimationKind::RunLeft);
        let mut seen_last = false;
        for _ in 0..(6 * 8) {
            player.tick();
            assert!(player.frame_index < 8);
            if player.frame_index == 7 {
                seen_last = true;
            }
        }
        assert!(seen_last);
        assert_eq!(player.frame_index, 0);
    }

    #[test]
    fn frame_index_stays_in_range_for_every_kind() {
        for &kind in AnimationKind::ALL {
            let mut player = AnimationPlayer::new(kind);
            for _ in 0..500 {
                player.tick();
                assert!(player.frame_index < kind.frame_count());
            }
        }
    }

    #[test]
    fn switching_to_idle_wraps_out_of_range_frame() {
        let mut player = AnimationPlayer {
            kind: AnimationKind::RunUp,
            frame_index: 7,
            frame_timer: 3,
        };
        player.set_kind(AnimationKind::Idle);
        assert_eq!(player.frame_index, 0);
        // Timer carries over; only the strip changes.
        assert_eq!(player.frame_timer, 3);
    }

    #[test]
    fn switching_keeps_in_range_frame() {
        let mut player = AnimationPlayer {
            kind: AnimationKind::Idle,
            frame_index: 4,
            frame_timer: 0,
        };
        player.set_kind(AnimationKind::RunLeft);
        assert_eq!(player.frame_index, 4);
    }

    #[test]
    fn run_right_mirrors_run_left_strip() {
        let left = AnimationKind::RunLeft.strip();
        let right = AnimationKind::RunRight.strip();
        assert_eq!(left.row, right.row);
        assert!(!left.mirrored);
        assert!(right.mirrored);
    }

    #[test]
    fn display_matches_label() {
        for &kind in AnimationKind::ALL {
            assert_eq!(format!("{}", kind), kind.label());
        }
    }
}
