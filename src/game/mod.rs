//! Game session
//!
//! Owns one run's entity store plus everything around it: the lifecycle
//! phase, the elapsed-time clock, both spawn timers, the frame loop handle,
//! persistence and audio. The host only calls commands and pumps.

mod driver;
mod lifecycle;
pub mod scheduler;


pub use scheduler::{FrameLoop, Scheduler};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioSink;
use crate::highscores::HighScore;
use crate::persistence::{Store, keys, read_flag};
use crate::sim::{ElapsedClock, GameState, TickInput};
use crate::story::StoryProgress;
use crate::tuning::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    /// Briefing slides (first run or replay)
    Story,
    Playing,
    Paused,
    /// Ship destruction animation; world frozen
    Exploding,
    MissionEnd,
}

/// Result of a finished run, for the mission-end screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionReport {
    pub score: u64,
    /// Best score after this run was recorded
    pub high_score: u64,
    pub new_high_score: bool,
}

pub struct Game {
    phase: Phase,
    state: GameState,
    clock: ElapsedClock,
    asteroid_timer: Scheduler,
    power_up_timer: Scheduler,
    frame_loop: FrameLoop,
    rng: Pcg32,
    tuning: Tuning,
    store: Box<dyn Store>,
    audio: Box<dyn AudioSink>,
    high_score: HighScore,
    input: TickInput,
    story: Option<StoryProgress>,
    report: Option<MissionReport>,
    story_played: bool,
    orientation_ok: bool,
}

impl Game {
    pub fn new(
        mut store: Box<dyn Store>,
        audio: Box<dyn AudioSink>,
        tuning: Tuning,
        seed: u64,
    ) -> Self {
        let high_score = HighScore::load(store.as_mut());
        let story_played = read_flag(store.as_mut(), keys::STORY_PLAYED);
        Self {
            phase: Phase::Menu,
            state: GameState::new(),
            clock: ElapsedClock::default(),
            asteroid_timer: Scheduler::new("asteroid spawner"),
            power_up_timer: Scheduler::new("power-up spawner"),
            frame_loop: FrameLoop::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            store,
            audio,
            high_score,
            input: TickInput::default(),
            story: None,
            report: None,
            story_played,
            orientation_ok: true,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Current briefing slide, while in the Story phase
    pub fn story(&self) -> Option<&StoryProgress> {
        self.story.as_ref()
    }

    /// Report of the last finished run (MissionEnd only)
    pub fn report(&self) -> Option<&MissionReport> {
        self.report.as_ref()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    /// Whether the briefing has been seen on this device
    pub fn story_played(&self) -> bool {
        self.story_played
    }

    pub fn orientation_ok(&self) -> bool {
        self.orientation_ok
    }

    /// Effective elapsed seconds of the current run
    pub fn elapsed_secs(&self, now: f64) -> f64 {
        self.clock.elapsed_secs(now)
    }

    pub fn is_loop_running(&self) -> bool {
        self.frame_loop.is_armed()
    }

    pub fn asteroid_timer(&self) -> &Scheduler {
        &self.asteroid_timer
    }

    pub fn power_up_timer(&self) -> &Scheduler {
        &self.power_up_timer
    }
}
