//! Fixed-rate simulation thread.
//!
//! The loop thread owns the [`GameState`] outright. The window thread talks to
//! it through three shared handles:
//!  - a direction mailbox (newest value wins, taken once per tick)
//!  - the latest [`FrameSnapshot`], copied out under a short lock
//!  - a stop flag checked at the top of every tick

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use glam::IVec2;
use sag_core::animation::AnimationKind;
use sag_core::mailbox::Mailbox;
use sag_core::time::{TickPacing, TickStats, TimeState};

use crate::controller::Direction;
use crate::game_state::GameState;

/// Everything the renderer and the debug panel need from one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub position: IVec2,
    pub direction: Direction,
    pub animation: AnimationKind,
    pub animation_frame: usize,
    pub score: u32,
    pub power_ups: Vec<IVec2>,
    pub tick: TickStats,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, tick: TickStats) -> Self {
        Self {
            position: state.position,
            direction: state.direction,
            animation: state.animation.kind,
            animation_frame: state.animation.frame_index,
            score: state.score,
            power_ups: state.power_ups.clone(),
            tick,
        }
    }
}

pub struct GameLoop {
    directions: Arc<Mailbox<Direction>>,
    snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<GameState>>,
}

impl GameLoop {
    /// Start ticking `state` on its own thread. `on_tick` runs after every
    /// published snapshot; the window uses it to request a redraw.
    pub fn spawn<F>(state: GameState, pacing: TickPacing, on_tick: F) -> Result<Self, String>
    where
        F: Fn() + Send + 'static,
    {
        let directions = Arc::new(Mailbox::new());
        let snapshot = Arc::new(Mutex::new(Some(FrameSnapshot::capture(
            &state,
            TickStats::default(),
        ))));
        let stop = Arc::new(AtomicBool::new(false));

        let worker = LoopWorker {
            state,
            time: TimeState::new(pacing),
            directions: Arc::clone(&directions),
            snapshot: Arc::clone(&snapshot),
            stop: Arc::clone(&stop),
        };
        let handle = std::thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || worker.run(on_tick))
            .map_err(|e| format!("Failed to spawn game loop thread: {e}"))?;

        log::info!(
            "Game loop started ({:.1} ms budget)",
            pacing.budget.as_secs_f64() * 1000.0
        );

        Ok(Self {
            directions,
            snapshot,
            stop,
            handle: Some(handle),
        })
    }

    pub fn post_direction(&self, direction: Direction) {
        self.directions.post(direction);
    }

    pub fn latest_snapshot(&self) -> Option<FrameSnapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop the thread and hand back the final state. Returns `None` when the
    /// loop was already stopped or the thread panicked.
    pub fn stop(&mut self) -> Option<GameState> {
        self.stop.store(true, Ordering::SeqCst);
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(state) => {
                log::info!("Game loop stopped after final score {}", state.score);
                Some(state)
            }
            Err(_) => {
                log::error!("Game loop thread panicked; final state lost");
                None
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.stop();
        }
    }
}

struct LoopWorker {
    state: GameState,
    time: TimeState,
    directions: Arc<Mailbox<Direction>>,
    snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    stop: Arc<AtomicBool>,
}

impl LoopWorker {
    fn run(mut self, on_tick: impl Fn()) -> GameState {
        while !self.stop.load(Ordering::SeqCst) {
            self.time.begin_tick();

            if let Some(direction) = self.directions.take() {
                self.state.set_direction(direction);
            }
            let report = self.state.step();
            for point in &report.collected {
                log::info!(
                    "Collected power-up at ({}, {}), score {}",
                    point.x,
                    point.y,
                    self.state.score
                );
            }
            if report.frame_changed {
                log::trace!(
                    "{} frame {}",
                    self.state.animation.kind,
                    self.state.animation.frame_index
                );
            }

            // Stats cover ticks completed before this one.
            let frame = FrameSnapshot::capture(&self.state, self.time.stats());
            *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
            on_tick();
            let sleep = self.time.end_tick();

            std::thread::sleep(sleep);
        }
        self.state
    }
}
